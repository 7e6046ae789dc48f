use argus_config::ConfigError;
use argus_core::EventError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Event queue error: {0}")]
    Event(#[from] EventError),

    #[error("Unknown record layout: {0}")]
    UnknownLayout(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Event handler failed: {0}")]
    Handler(String),
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(errors: validator::ValidationErrors) -> Self {
        EngineError::Config(ConfigError::from(errors))
    }
}
