//! Service configuration.
//!
//! Values are layered with `figment`: built-in defaults, then an optional `dataset-summary.toml`
//! in the working directory, then `DATASET_SUMMARY_*` environment variables
//! (e.g. `DATASET_SUMMARY_PORT=9000`).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Optional configuration file read from the working directory.
pub const CONFIG_FILE: &str = "dataset-summary.toml";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DATASET_SUMMARY_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Figment(#[from] figment::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// actix worker threads; `None` uses one per physical core.
    pub workers: Option<usize>,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,
    /// Largest accepted JSON records body, in bytes.
    pub max_json_bytes: usize,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Text returned by `GET /`.
    pub welcome_message: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            workers: None,
            max_upload_bytes: 50 * 1024 * 1024,
            max_json_bytes: 50 * 1024 * 1024,
            log_filter: "info".to_string(),
            welcome_message: "Welcome to the dataset summary API".to_string(),
        }
    }
}

impl ServiceConfig {
    /// The layered configuration sources.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(ServiceConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load configuration from defaults, [`CONFIG_FILE`] and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_sources() {
        Jail::expect_with(|_jail| {
            let config: ServiceConfig = ServiceConfig::figment().extract()?;
            assert_eq!(config, ServiceConfig::default());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "port = 9100\nwelcome_message = \"hi\"\n")?;
            jail.set_env("DATASET_SUMMARY_PORT", "9200");

            let config: ServiceConfig = ServiceConfig::figment().extract()?;
            assert_eq!(config.port, 9200);
            assert_eq!(config.welcome_message, "hi");
            assert_eq!(config.max_upload_bytes, ServiceConfig::default().max_upload_bytes);
            Ok(())
        });
    }
}
