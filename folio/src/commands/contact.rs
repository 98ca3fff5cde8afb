use std::fmt::Write;

use clap::Subcommand;
use folio_config::Config;
use folio_form::view::{quick_links, ContactFormView, QuickLink};
use folio_models::form::{FormField, SubmissionPhase};

use crate::environment;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a message through the contact form
    Send {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
        /// Keep running until the status message disappears
        #[arg(long)]
        wait: bool,
    },
    /// Show the direct contact links
    Links,
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                email,
                message,
                wait,
            } => send(config, [name, email, message], wait).await,
            ContactCommand::Links => {
                print!("{}", render_links(&links(&config)));
                Ok(())
            }
        }
    }
}

async fn send(config: Config, values: [String; 3], wait: bool) -> anyhow::Result<()> {
    let form = environment::contact_form(&config)?;
    for (field, value) in FormField::ALL.into_iter().zip(values) {
        form.update_field(field, value);
    }

    let result = form.submit().await;
    let state = form.state();
    print!("{}", render(&ContactFormView::new(&state)));

    if wait && state.phase.is_terminal() {
        let mut rx = form.subscribe();
        rx.wait_for(|form| form.phase == SubmissionPhase::Idle)
            .await?;
        println!("Status cleared");
    }

    form.close().await;

    if result.is_err() {
        print!("{}", render_links(&links(&config)));
    }

    result.map_err(Into::into)
}

fn links(config: &Config) -> Vec<QuickLink> {
    quick_links(
        &config.links.email,
        config.links.github.as_str(),
        config.links.linkedin.as_str(),
    )
}

fn render(view: &ContactFormView) -> String {
    let mut out = String::new();
    let errors = view
        .fields
        .iter()
        .filter_map(|field| field.error.map(|error| (field.label, error)));
    for (label, error) in errors {
        let _ = writeln!(out, "{label}: {error}");
    }
    if let Some(status) = view.status {
        let _ = writeln!(out, "{}", status.text);
    }
    out
}

fn render_links(links: &[QuickLink]) -> String {
    links
        .iter()
        .map(|link| format!("{}: {}\n", link.text, link.href))
        .collect()
}
