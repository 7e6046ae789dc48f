//! Consumer-side view of the event queue.

use std::time::Duration;

use argus_core::{EventQueue, NetworkEvent, RecordError, RecordLayout};
use argus_telemetry::MetricsRecorder;
use bytes::Bytes;
use tracing::debug;

/// Drains events published by a [`crate::Probe`].
///
/// Readers never block producers. Several readers may drain the same queue;
/// each event is delivered to exactly one of them.
#[derive(Clone, Debug)]
pub struct EventReader {
    queue: EventQueue,
    layout: RecordLayout,
    poll_interval: Duration,
    batch_size: usize,
    metrics: Option<MetricsRecorder>,
}

impl EventReader {
    pub(crate) fn new(
        queue: EventQueue,
        layout: RecordLayout,
        poll_interval: Duration,
        batch_size: usize,
        metrics: Option<MetricsRecorder>,
    ) -> Self {
        Self {
            queue,
            layout,
            poll_interval,
            batch_size,
            metrics,
        }
    }

    /// Next event, or `None` when the queue is empty.
    #[inline]
    pub fn try_recv(&self) -> Option<NetworkEvent> {
        self.queue.try_pop()
    }

    /// Up to `max` events in publish order.
    pub fn drain(&self, max: usize) -> Vec<NetworkEvent> {
        let mut batch = Vec::with_capacity(max.min(self.queue.len()));
        while batch.len() < max {
            match self.queue.try_pop() {
                Some(event) => batch.push(event),
                None => break,
            }
        }
        batch
    }

    /// Up to `max` events encoded in the configured record layout.
    ///
    /// Events the layout cannot carry (ICMP under the legacy layout) are
    /// consumed and skipped.
    pub fn drain_records(&self, max: usize) -> Vec<Bytes> {
        self.drain(max)
            .iter()
            .filter_map(|event| match self.layout.encode(event) {
                Ok(record) => Some(record),
                Err(RecordError::NotRepresentable(event_type)) => {
                    debug!(%event_type, layout = ?self.layout, "skipping unrepresentable event");
                    None
                }
                Err(err) => {
                    debug!(error = %err, "record encoding failed");
                    None
                }
            })
            .collect()
    }

    /// Waits until an event is available, polling at the configured interval.
    pub async fn recv(&self) -> NetworkEvent {
        loop {
            if let Some(event) = self.queue.try_pop() {
                return event;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Events discarded by producers because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.queue.dropped()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub(crate) fn observe_batch(&self, len: usize) {
        if let Some(metrics) = &self.metrics {
            metrics.observe_batch(len);
        }
    }
}
