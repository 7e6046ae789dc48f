//! # Argus Telemetry
//!
//! Logging subscriber setup and the Prometheus registry the probe reports into.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
