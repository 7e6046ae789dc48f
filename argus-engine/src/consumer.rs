//! Background consumer task.
//!
//! Drains the queue in batches and hands each event to an [`EventHandler`].
//! Handler failures are logged and counted; they never stop the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use argus_core::NetworkEvent;
use argus_protocols::EventSummary;
use argus_telemetry::EventLogger;
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{info, warn, Instrument};

use crate::error::EngineError;
use crate::reader::EventReader;

#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Processes a single drained event.
    async fn handle(&self, event: &NetworkEvent) -> Result<(), EngineError>;
}

/// Logs one summary line per event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

#[async_trait]
impl EventHandler for LoggingHandler {
    async fn handle(&self, event: &NetworkEvent) -> Result<(), EngineError> {
        let summary = EventSummary::from_event(event);
        EventLogger::log_event(event.event_type.as_str(), &summary);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerStats {
    pub batches: u64,
    pub events: u64,
    pub failures: u64,
}

/// Spawns the consumer loop on the current tokio runtime.
///
/// The loop exits once `shutdown` is set and the queue has been emptied.
pub fn spawn_consumer<H>(
    reader: EventReader,
    handler: H,
    shutdown: Arc<AtomicBool>,
) -> JoinHandle<ConsumerStats>
where
    H: EventHandler + 'static,
{
    tokio::spawn(
        async move { run_consumer(reader, handler, shutdown).await }
            .instrument(tracing::info_span!("event_consumer")),
    )
}

async fn run_consumer<H: EventHandler>(
    reader: EventReader,
    handler: H,
    shutdown: Arc<AtomicBool>,
) -> ConsumerStats {
    let mut stats = ConsumerStats::default();

    loop {
        let batch = reader.drain(reader.batch_size());
        if batch.is_empty() {
            if shutdown.load(Ordering::Acquire) {
                break;
            }
            tokio::time::sleep(reader.poll_interval()).await;
            continue;
        }

        reader.observe_batch(batch.len());
        stats.batches += 1;
        for event in &batch {
            stats.events += 1;
            if let Err(err) = handler.handle(event).await {
                stats.failures += 1;
                warn!(event_type = %event.event_type, error = %err, "event handler failed");
            }
        }
    }

    info!(
        batches = stats.batches,
        events = stats.events,
        failures = stats.failures,
        dropped = reader.dropped(),
        "consumer stopped"
    );
    stats
}
