//! # Argus Configuration
//!
//! Layered configuration for the probe: built-in defaults, optional YAML
//! files, then `ARGUS_*` environment variables. Every loaded configuration
//! is validated before it is returned.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod consumer;
mod error;
mod queue;
mod telemetry;
mod validation;

pub use consumer::{ConsumerConfig, ReplayConfig};
pub use error::ConfigError;
pub use queue::QueueConfig;
pub use telemetry::TelemetryConfig;

const BASE_FILE: &str = "config/argus.yaml";
const ENV_PREFIX: &str = "ARGUS_";

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq, Eq)]
pub struct ArgusConfig {
    /// Event queue sizing and record layout.
    #[serde(default)]
    #[validate(nested)]
    pub queue: QueueConfig,

    /// Event consumer loop.
    #[serde(default)]
    #[validate(nested)]
    pub consumer: ConsumerConfig,

    /// Offline replay workers.
    #[serde(default)]
    #[validate(nested)]
    pub replay: ReplayConfig,

    /// Logging and metrics.
    #[serde(default)]
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl ArgusConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/argus.yaml`, if present
    /// 3. `config/<ARGUS_ENV>.yaml`, if present (`production` when unset)
    /// 4. `ARGUS_*` environment variables, `__` separating nested keys
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(ArgusConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        } else {
            tracing::info!("{BASE_FILE} not found, using default configuration");
        }

        let env = std::env::var("ARGUS_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{env}.yaml");
        if Path::new(&env_file).exists() {
            tracing::debug!(file = %env_file, "applying environment overrides");
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific YAML file plus the environment.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Self::extract(
            Figment::from(Serialized::defaults(ArgusConfig::default())).merge(Yaml::file(path)),
        )
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
