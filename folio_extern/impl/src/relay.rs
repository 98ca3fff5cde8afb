use std::sync::Arc;

use anyhow::{anyhow, Context};
use folio_extern_contracts::relay::MessageRelayApiService;
use folio_models::contact::ContactFormFields;
use serde::Serialize;
use tracing::trace;
use url::Url;

use crate::http::HttpClient;

const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct MessageRelayApiServiceImpl {
    config: MessageRelayApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct MessageRelayApiServiceConfig {
    send_endpoint: Arc<Url>,
}

impl MessageRelayApiServiceConfig {
    pub fn new(send_endpoint_override: Option<Url>) -> Self {
        Self {
            send_endpoint: send_endpoint_override
                .unwrap_or_else(|| SEND_ENDPOINT.parse().unwrap())
                .into(),
        }
    }

    pub fn send_endpoint(&self) -> &Url {
        &self.send_endpoint
    }
}

impl MessageRelayApiServiceImpl {
    pub fn new(config: MessageRelayApiServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl MessageRelayApiService for MessageRelayApiServiceImpl {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        fields: &ContactFormFields,
        public_key: &str,
    ) -> anyhow::Result<()> {
        trace!(endpoint = %self.config.send_endpoint, "send message through relay");

        let response = self
            .client
            .post((*self.config.send_endpoint).clone())
            .json(&SendRequest {
                service_id,
                template_id,
                user_id: public_key,
                template_params: fields,
            })
            .send()
            .await
            .context("Failed to reach message relay")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(anyhow!("Message relay rejected the message ({status}): {body}"))
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactFormFields,
}
