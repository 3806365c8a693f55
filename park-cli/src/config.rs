//! `parkwise.toml` configuration.
//!
//! Every section and key is optional; anything left out falls back to the
//! defaults below. Command-line flags are applied on top by the caller.
//!
//! ```toml
//! [pricing]
//! hourly_rate = 20
//! currency_symbol = "₹"
//!
//! [checkout]
//! backend = "http"
//! base_url = "http://127.0.0.1:8000"
//! timeout_secs = 10
//!
//! [logging]
//! level = "info"
//! file = "parkwise.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use park_core::Rate;
use park_core::checkout::GatewayConfig;
use serde::Deserialize;
use thiserror::Error;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "parkwise.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub checkout: CheckoutConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Accepts a number or a string; anything unparseable is a zero rate.
    pub hourly_rate: Rate,
    pub currency_symbol: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            hourly_rate: Rate::ZERO,
            currency_symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub backend: String,
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        let gateway = GatewayConfig::default();
        Self {
            backend: gateway.backend,
            base_url: gateway.base_url,
            timeout_secs: None,
        }
    }
}

impl CheckoutConfig {
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            backend: self.backend.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or full `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    /// Also append log records to this file.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(
        input: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`]
    /// is read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&contents, &path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
