//! Consumer loop and replay worker parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Event consumer polling behaviour.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct ConsumerConfig {
    /// Sleep between polls of an empty queue (milliseconds).
    #[serde(default = "default_poll_interval_ms")]
    #[validate(range(min = 1, max = 1000))]
    pub poll_interval_ms: u64,

    /// Maximum events drained per batch.
    #[serde(default = "default_batch_size")]
    #[validate(range(min = 1, max = 65536))]
    pub batch_size: usize,
}

fn default_poll_interval_ms() -> u64 {
    10
}

fn default_batch_size() -> usize {
    256
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            batch_size: default_batch_size(),
        }
    }
}

/// Offline frame replay.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Parallel processing contexts.
    #[serde(default = "default_workers")]
    #[validate(range(min = 1, max = 256))]
    pub workers: usize,
}

fn default_workers() -> usize {
    num_cpus::get().clamp(1, 256)
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}
