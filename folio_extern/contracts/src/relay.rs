use std::future::Future;

use folio_models::contact::ContactFormFields;

/// Client of the third party service that turns a set of template
/// parameters into an email.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MessageRelayApiService: Send + Sync + 'static {
    /// Delivers `fields` using the template `template_id` of the relay
    /// service `service_id`. Performs exactly one request.
    fn send(
        &self,
        service_id: &str,
        template_id: &str,
        fields: &ContactFormFields,
        public_key: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Everything needed to address a relay template. Only exists if every part
/// is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl RelayCredentials {
    /// Returns `None` if any of the parts is missing or blank.
    pub fn new(
        service_id: Option<String>,
        template_id: Option<String>,
        public_key: Option<String>,
    ) -> Option<Self> {
        let present = |x: Option<String>| x.filter(|x| !x.trim().is_empty());
        Some(Self {
            service_id: present(service_id)?,
            template_id: present(template_id)?,
            public_key: present(public_key)?,
        })
    }
}

#[cfg(feature = "mock")]
impl MockMessageRelayApiService {
    pub fn with_send(
        mut self,
        credentials: RelayCredentials,
        fields: ContactFormFields,
        result: Result<(), &'static str>,
    ) -> Self {
        self.expect_send()
            .once()
            .withf(move |service_id, template_id, f, public_key| {
                service_id == credentials.service_id
                    && template_id == credentials.template_id
                    && *f == fields
                    && public_key == credentials.public_key
            })
            .return_once(move |_, _, _, _| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(x: &str) -> Option<String> {
        Some(x.into())
    }

    #[test]
    fn credentials_complete() {
        assert_eq!(
            RelayCredentials::new(some("service"), some("template"), some("key")),
            Some(RelayCredentials {
                service_id: "service".into(),
                template_id: "template".into(),
                public_key: "key".into(),
            })
        );
    }

    #[test]
    fn credentials_incomplete() {
        assert_eq!(RelayCredentials::new(None, some("template"), some("key")), None);
        assert_eq!(RelayCredentials::new(some("service"), None, some("key")), None);
        assert_eq!(RelayCredentials::new(some("service"), some("template"), None), None);
        assert_eq!(RelayCredentials::new(some(""), some("template"), some("key")), None);
        assert_eq!(RelayCredentials::new(some("service"), some("  "), some("key")), None);
    }
}
