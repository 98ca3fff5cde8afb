use anyhow::Context;
use clap::Subcommand;
use folio_config::Config;
use folio_extern_contracts::relay::MessageRelayApiService;
use folio_models::contact::ContactFormFields;

use crate::environment;

#[derive(Debug, Subcommand)]
pub enum RelayCommand {
    /// Test message relay deliverability
    Test {
        /// Reply address put into the test message
        #[arg(long, default_value = "relay-test@example.com")]
        email: String,
    },
}

impl RelayCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            RelayCommand::Test { email } => test(config, email).await,
        }
    }
}

async fn test(config: Config, email: String) -> anyhow::Result<()> {
    let credentials = environment::relay_credentials(&config.relay).context(
        "Message relay credentials are not configured (relay.service_id, relay.template_id, \
         relay.public_key)",
    )?;

    let relay_api = environment::relay_api(&config.relay)?;
    relay_api
        .send(
            &credentials.service_id,
            &credentials.template_id,
            &ContactFormFields {
                name: "Relay Deliverability Test".into(),
                email,
                message: "Message relay deliverability seems to be working!".into(),
            },
            &credentials.public_key,
        )
        .await
        .context("Failed to send test message")?;

    println!("Test message sent");

    Ok(())
}
