//! # Argus Engine
//!
//! Wires the classifier, event queue, configuration and telemetry into a
//! [`Probe`] that frame sources call once per frame, plus the consumer side
//! that drains and reports what the probe saw.

pub mod consumer;
pub mod error;
pub mod probe;
pub mod reader;
pub mod replay;

pub use consumer::{spawn_consumer, ConsumerStats, EventHandler, LoggingHandler};
pub use error::EngineError;
pub use probe::Probe;
pub use reader::EventReader;
pub use replay::{replay_frames, ReplayStats};
