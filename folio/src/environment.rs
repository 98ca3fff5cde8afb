use anyhow::Context;
use folio_config::{Config, RelayConfig};
use folio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use folio_extern_contracts::relay::RelayCredentials;
use folio_extern_impl::{
    http::HttpClient,
    relay::{MessageRelayApiServiceConfig, MessageRelayApiServiceImpl},
};
use folio_form::{ContactFormConfig, ContactFormController};
use tracing::debug;

pub type ContactService = ContactServiceImpl<MessageRelayApiServiceImpl>;

pub fn relay_credentials(config: &RelayConfig) -> Option<RelayCredentials> {
    RelayCredentials::new(
        config.service_id.clone(),
        config.template_id.clone(),
        config.public_key.clone(),
    )
}

pub fn relay_api(config: &RelayConfig) -> anyhow::Result<MessageRelayApiServiceImpl> {
    let client = HttpClient::new().context("Failed to build http client")?;
    Ok(MessageRelayApiServiceImpl::new(
        MessageRelayApiServiceConfig::new(config.endpoint_override.clone()),
        client,
    ))
}

pub fn contact_service(config: &Config) -> anyhow::Result<ContactService> {
    let contact_config = match relay_credentials(&config.relay) {
        Some(credentials) => {
            debug!(service_id = %credentials.service_id, "using message relay");
            ContactServiceConfig::Relay(credentials)
        }
        None => ContactServiceConfig::Simulated {
            delay: config.contact.simulated_delay.into(),
        },
    };

    Ok(ContactServiceImpl::new(
        relay_api(&config.relay)?,
        contact_config,
    ))
}

pub fn contact_form(config: &Config) -> anyhow::Result<ContactFormController<ContactService>> {
    let form_config = ContactFormConfig {
        status_display: config.contact.status_display.into(),
    };

    Ok(ContactFormController::new(
        contact_service(config)?,
        form_config,
    ))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use folio_config::DEFAULT_CONFIG_PATH;

    use super::*;

    #[test]
    fn no_credentials() {
        let config = folio_config::load(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
        let relay = RelayConfig {
            service_id: None,
            ..config.relay
        };

        assert_eq!(relay_credentials(&relay), None);
    }

    #[test]
    fn blank_credentials() {
        let config = folio_config::load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &[r#"
                relay.service_id = "service"
                relay.template_id = ""
                relay.public_key = "key"
            "#],
        )
        .unwrap();

        assert_eq!(relay_credentials(&config.relay), None);
    }

    #[test]
    fn credentials() {
        let config = folio_config::load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &[r#"
                relay.service_id = "service"
                relay.template_id = "template"
                relay.public_key = "key"
            "#],
        )
        .unwrap();

        assert_eq!(
            relay_credentials(&config.relay),
            Some(RelayCredentials {
                service_id: "service".into(),
                template_id: "template".into(),
                public_key: "key".into(),
            })
        );
    }

    #[test]
    fn credentials_from_env() {
        let vars = [
            ("FOLIO_RELAY__SERVICE_ID", "service"),
            ("FOLIO_RELAY__TEMPLATE_ID", "template"),
            ("FOLIO_RELAY__PUBLIC_KEY", "key"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let config = folio_config::load(&[Path::new(DEFAULT_CONFIG_PATH)]);

        for (key, _) in vars {
            std::env::remove_var(key);
        }
        assert_eq!(
            relay_credentials(&config.unwrap().relay),
            Some(RelayCredentials {
                service_id: "service".into(),
                template_id: "template".into(),
                public_key: "key".into(),
            })
        );
    }
}
