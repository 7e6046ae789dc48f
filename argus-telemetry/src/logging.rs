//! ## argus-telemetry::logging
//! Structured logging with `tracing`.
//!
//! The subscriber is a plain `fmt` layer filtered by `RUST_LOG`, falling back
//! to the configured filter. Installation is idempotent so tests and
//! embedding applications can call it freely.

use std::fmt::Display;

use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, Debug)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. Returns `false` if one already exists.
    pub fn init(default_filter: &str) -> bool {
        fmt()
            .with_env_filter(Self::filter(default_filter))
            .with_thread_names(true)
            .with_span_events(FmtSpan::NONE)
            .try_init()
            .is_ok()
    }

    /// `RUST_LOG` when set and valid, otherwise `default_filter`.
    pub fn filter(default_filter: &str) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    }

    /// Emits one observed network event at `info`.
    #[inline]
    pub fn log_event(event_type: &str, summary: &dyn Display) {
        let span = info_span!("network_event", event_type = event_type);
        span.in_scope(|| {
            tracing::info!(%summary, "Network event observed");
        });
    }
}
