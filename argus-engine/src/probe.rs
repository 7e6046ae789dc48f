//! The frame-handling entry point: classifier, queue and metrics wired from
//! configuration.

use std::time::Duration;

use argus_config::ArgusConfig;
use argus_core::{Emit, EventQueue, EventSink, NetworkEvent, RecordLayout};
use argus_protocols::{Disposition, FrameClassifier};
use argus_telemetry::{EventLogger, MetricsRecorder};
use bytes::Bytes;
use tracing::{debug, info};
use validator::Validate;

use crate::error::EngineError;
use crate::reader::EventReader;
use crate::replay::{replay_frames, ReplayStats};

/// One observation point. Clones share the queue and metrics, so every
/// processing context (thread, worker, hook) can own its own handle.
#[derive(Clone, Debug)]
pub struct Probe {
    classifier: FrameClassifier,
    queue: EventQueue,
    metrics: MetricsRecorder,
    metrics_enabled: bool,
    layout: RecordLayout,
    poll_interval: Duration,
    batch_size: usize,
    replay_workers: usize,
}

impl Probe {
    /// Validates `config`, installs the global log subscriber with
    /// `telemetry.log_filter`, and builds the probe.
    ///
    /// `RUST_LOG` still wins over the configured filter. An already installed
    /// subscriber is left in place.
    pub fn bootstrap(config: &ArgusConfig) -> Result<Self, EngineError> {
        config.validate()?;
        if !EventLogger::init(&config.telemetry.log_filter) {
            debug!("global subscriber already installed");
        }
        Self::new(config)
    }

    pub fn new(config: &ArgusConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let layout = RecordLayout::from_name(&config.queue.record_layout)
            .ok_or_else(|| EngineError::UnknownLayout(config.queue.record_layout.clone()))?;
        let queue = EventQueue::with_capacity(config.queue.capacity)?;
        let metrics = MetricsRecorder::new()?;

        info!(
            capacity = config.queue.capacity,
            layout = ?layout,
            metrics = config.telemetry.metrics_enabled,
            "probe initialised"
        );

        Ok(Self {
            classifier: FrameClassifier::new(),
            queue,
            metrics,
            metrics_enabled: config.telemetry.metrics_enabled,
            layout,
            poll_interval: Duration::from_millis(config.consumer.poll_interval_ms),
            batch_size: config.consumer.batch_size,
            replay_workers: config.replay.workers,
        })
    }

    /// Classifies one frame, publishes its event if any, and passes the frame.
    #[inline]
    pub fn handle_frame(&self, frame: &[u8]) -> Disposition {
        self.observe(frame).0
    }

    /// Like [`Probe::handle_frame`], also reporting the publish outcome
    /// (`None` when the frame produced no event).
    pub fn observe(&self, frame: &[u8]) -> (Disposition, Option<Emit>) {
        if !self.metrics_enabled {
            return self.classifier.process(frame, &self.queue);
        }

        self.metrics.inc_frames();
        let sink = MeteredSink {
            queue: &self.queue,
            metrics: &self.metrics,
        };
        let outcome = self.classifier.process(frame, &sink);
        if outcome.1.is_none() {
            self.metrics.inc_ignored();
        }
        outcome
    }

    pub fn reader(&self) -> EventReader {
        EventReader::new(
            self.queue.clone(),
            self.layout,
            self.poll_interval,
            self.batch_size,
            self.metrics_enabled.then(|| self.metrics.clone()),
        )
    }

    /// Replays a capture with the configured number of workers.
    pub fn replay(&self, frames: &[Bytes]) -> ReplayStats {
        replay_frames(self, frames, self.replay_workers)
    }

    pub fn replay_workers(&self) -> usize {
        self.replay_workers
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Events discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.queue.dropped()
    }
}

/// Counts each event by type before handing it to the queue.
struct MeteredSink<'a> {
    queue: &'a EventQueue,
    metrics: &'a MetricsRecorder,
}

impl EventSink for MeteredSink<'_> {
    #[inline]
    fn emit(&self, event: NetworkEvent) -> Emit {
        self.metrics.inc_event(event.event_type);
        let emitted = self.queue.emit(event);
        if emitted == Emit::Dropped {
            self.metrics.inc_dropped();
        }
        emitted
    }
}
