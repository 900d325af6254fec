pub mod aggregator;
pub mod log;
pub mod poller;
pub mod server;
pub mod token_api;

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

pub use aggregator::AggregatorConfig;
pub use log::LoggingConfig;
pub use poller::PollerConfig;
pub use server::ServerConfig;
pub use token_api::TokenApiConfig;

use crate::constants::TOKEN_API_KEY_ENV;
use crate::err_with_loc;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub token_api: TokenApiConfig,
    pub aggregator: AggregatorConfig,
    pub poller: PollerConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_toml_str(raw: &str) -> crate::Result<Self> {
        let config: Config =
            toml::from_str(raw).map_err(|e| err_with_loc!(ConfigError::ParseError(e.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// `TOKEN_API_KEY` wins over whatever the file says.
    pub fn apply_env(mut self) -> Self {
        if let Ok(key) = std::env::var(TOKEN_API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.token_api.api_key = Some(key);
            }
        }
        self
    }

    fn validate(&self) -> crate::Result<()> {
        if self.aggregator.page_size == 0 {
            return Err(err_with_loc!(ConfigError::InvalidValue("aggregator.page_size must be > 0".into())));
        }
        if self.aggregator.max_pages == 0 {
            return Err(err_with_loc!(ConfigError::InvalidValue("aggregator.max_pages must be > 0".into())));
        }
        if self.poller.interval_secs == 0 {
            return Err(err_with_loc!(ConfigError::InvalidValue("poller.interval_secs must be > 0".into())));
        }
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> crate::Result<Config> {
    let path = path.as_ref();
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| err_with_loc!(ConfigError::OpenFileError(format!("{}: {}", path.display(), e))))?;
    let config = Config::from_toml_str(&config_str)?;
    debug!("config::loaded::{}", path.display());
    Ok(config.apply_env())
}

/// Missing or broken config files fall back to defaults so the aquarium
/// still starts against the public endpoint.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Config {
    match load_config(path.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            warn!("config::fallback_to_default::{:#}", e);
            Config::default().apply_env()
        },
    }
}
