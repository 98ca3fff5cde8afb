use std::future::Future;

use folio_models::contact::ContactFormFields;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Delivers one contact form message to the site owner.
    fn send_message(
        &self,
        fields: ContactFormFields,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Failed to send message.")]
    Send,
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        fields: ContactFormFields,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(fields))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
