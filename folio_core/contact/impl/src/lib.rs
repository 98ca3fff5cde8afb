use std::time::Duration;

use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_extern_contracts::relay::{MessageRelayApiService, RelayCredentials};
use folio_models::contact::ContactFormFields;
use tracing::{error, info, trace, warn};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<RelayApi> {
    relay_api: RelayApi,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactServiceConfig {
    /// Deliver messages through the relay.
    Relay(RelayCredentials),
    /// No relay credentials are configured. Sends only wait for `delay` and
    /// log the message.
    Simulated { delay: Duration },
}

impl<RelayApi> ContactServiceImpl<RelayApi> {
    pub fn new(relay_api: RelayApi, config: ContactServiceConfig) -> Self {
        if let ContactServiceConfig::Simulated { .. } = config {
            warn!("Message relay credentials missing. Contact form messages will only be logged.");
        }

        Self { relay_api, config }
    }
}

impl<RelayApi> ContactService for ContactServiceImpl<RelayApi>
where
    RelayApi: MessageRelayApiService,
{
    async fn send_message(&self, fields: ContactFormFields) -> Result<(), ContactSendMessageError> {
        match &self.config {
            ContactServiceConfig::Simulated { delay } => {
                tokio::time::sleep(*delay).await;
                info!(?fields, "Contact form (simulated send)");
                Ok(())
            }
            ContactServiceConfig::Relay(credentials) => {
                trace!(service_id = %credentials.service_id, "send through relay");
                self.relay_api
                    .send(
                        &credentials.service_id,
                        &credentials.template_id,
                        &fields,
                        &credentials.public_key,
                    )
                    .await
                    .map_err(|err| {
                        error!("Failed to send contact form message: {err:#}");
                        ContactSendMessageError::Send
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_extern_contracts::relay::MockMessageRelayApiService;
    use folio_utils::assert_matches;
    use tokio::time::Instant;

    use super::*;

    fn fields() -> ContactFormFields {
        ContactFormFields {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            message: "Hello World!".into(),
        }
    }

    fn credentials() -> RelayCredentials {
        RelayCredentials {
            service_id: "service_abc".into(),
            template_id: "template_xyz".into(),
            public_key: "public".into(),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let relay_api = MockMessageRelayApiService::new().with_send(credentials(), fields(), Ok(()));

        let sut = ContactServiceImpl::new(relay_api, ContactServiceConfig::Relay(credentials()));

        // Act
        let result = sut.send_message(fields()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn relay_error() {
        // Arrange
        let relay_api = MockMessageRelayApiService::new().with_send(
            credentials(),
            fields(),
            Err("The Public Key is invalid"),
        );

        let sut = ContactServiceImpl::new(relay_api, ContactServiceConfig::Relay(credentials()));

        // Act
        let result = sut.send_message(fields()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Send));
    }

    #[tokio::test(start_paused = true)]
    async fn simulated() {
        // Arrange
        let relay_api = MockMessageRelayApiService::new();

        let sut = ContactServiceImpl::new(
            relay_api,
            ContactServiceConfig::Simulated {
                delay: Duration::from_millis(800),
            },
        );

        // Act
        let start = Instant::now();
        let result = sut.send_message(fields()).await;

        // Assert
        result.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(800), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(900), "{elapsed:?}");
    }
}
