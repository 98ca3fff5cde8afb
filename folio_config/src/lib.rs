use std::path::Path;

use anyhow::Context;
use config::{Environment, File, FileFormat};
pub use duration::Duration;
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Prefix of environment variables that override config values, e.g.
/// `FOLIO_RELAY__SERVICE_ID` for `relay.service_id`.
pub const ENV_PREFIX: &str = "FOLIO";

pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Loads the config files in order, then the environment, then each of the
/// inline toml `overrides`. Later sources take precedence.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

    overrides
        .iter()
        .fold(builder, |builder, &source| {
            builder.add_source(File::from_str(source, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub contact: ContactConfig,
    pub relay: RelayConfig,
    pub links: LinksConfig,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// How long a success or failure status stays visible.
    pub status_display: Duration,
    /// Artificial latency of a send while no relay credentials are set.
    pub simulated_delay: Duration,
}

#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    pub endpoint_override: Option<Url>,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LinksConfig {
    pub email: String,
    pub github: Url,
    pub linkedin: Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let config = load(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();

        assert_eq!(
            *config.contact.status_display,
            std::time::Duration::from_secs(5)
        );
        assert_eq!(
            *config.contact.simulated_delay,
            std::time::Duration::from_millis(800)
        );
    }

    #[test]
    fn override_relay_credentials() {
        let config = load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &[r#"
                relay.service_id = "service_abc"
                relay.template_id = "template_xyz"
                relay.public_key = "public"
                relay.endpoint_override = "http://127.0.0.1:8001/api/v1.0/email/send"
            "#],
        )
        .unwrap();

        assert_eq!(config.relay.service_id.as_deref(), Some("service_abc"));
        assert_eq!(config.relay.template_id.as_deref(), Some("template_xyz"));
        assert_eq!(config.relay.public_key.as_deref(), Some("public"));
        assert_eq!(
            config.relay.endpoint_override.unwrap().as_str(),
            "http://127.0.0.1:8001/api/v1.0/email/send"
        );
    }

    #[test]
    fn relay_credentials_from_env() {
        // No other test in this crate reads these from the environment.
        let vars = [
            ("FOLIO_RELAY__SERVICE_ID", "service_env"),
            ("FOLIO_RELAY__TEMPLATE_ID", "template_env"),
            ("FOLIO_RELAY__PUBLIC_KEY", "public_env"),
            ("FOLIO__RELAY__ENDPOINT_OVERRIDE", "http://127.0.0.1:1/ignored"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let config = load(&[Path::new(DEFAULT_CONFIG_PATH)]);

        for (key, _) in vars {
            std::env::remove_var(key);
        }
        let config = config.unwrap();
        assert_eq!(config.relay.service_id.as_deref(), Some("service_env"));
        assert_eq!(config.relay.template_id.as_deref(), Some("template_env"));
        assert_eq!(config.relay.public_key.as_deref(), Some("public_env"));
        assert_eq!(config.relay.endpoint_override, None);
    }

    #[test]
    fn missing_file() {
        let err = load(&[Path::new("/does/not/exist.toml")]).unwrap_err();

        assert!(err.to_string().contains("/does/not/exist.toml"));
    }
}
