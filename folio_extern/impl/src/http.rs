use std::{ops::Deref, sync::LazyLock};

use folio_utils::folio_version;

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let homepage = env!("CARGO_PKG_HOMEPAGE");
    let version = folio_version();

    format!("folio ({homepage}, Version {version})")
});

const _: () = assert!(!env!("CARGO_PKG_HOMEPAGE").is_empty());

/// Shared reqwest client that identifies itself with [`USER_AGENT`].
#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new() -> anyhow::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .build()
            .map(Self)
            .map_err(Into::into)
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
