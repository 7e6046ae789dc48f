//! Event queue sizing and record layout.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

/// Bounded event queue configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Number of event slots (must be a power of two).
    #[serde(default = "default_capacity")]
    #[validate(range(min = 128, max = 1048576))]
    #[validate(custom(function = validation::validate_power_of_two))]
    pub capacity: usize,

    /// Encoded record layout handed to record consumers: `extended` or `legacy`.
    #[serde(default = "default_record_layout")]
    #[validate(custom(function = validation::validate_record_layout))]
    pub record_layout: String,
}

fn default_capacity() -> usize {
    4096
}

fn default_record_layout() -> String {
    "extended".into()
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            record_layout: default_record_layout(),
        }
    }
}
