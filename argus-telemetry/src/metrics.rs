//! ## argus-telemetry::metrics
//! Prometheus counters for the classification pipeline.
//!
//! Per-event-type counters are resolved once at construction so the frame
//! path only touches atomics.

use argus_core::EventType;
use prometheus::{
    exponential_buckets, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub frames: IntCounter,
    pub frames_ignored: IntCounter,
    pub events_dropped: IntCounter,
    pub batch_size: Histogram,
    events_by_type: [IntCounter; EventType::ALL.len()],
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let frames = IntCounter::new("argus_frames_total", "Frames handed to the classifier")?;
        let frames_ignored = IntCounter::new(
            "argus_frames_ignored_total",
            "Frames that produced no event (short, malformed or unsupported)",
        )?;
        let events = IntCounterVec::new(
            Opts::new("argus_events_total", "Events classified, by event type"),
            &["event_type"],
        )?;
        let events_dropped = IntCounter::new(
            "argus_events_dropped_total",
            "Events discarded because the queue was full",
        )?;
        let batch_size = Histogram::with_opts(
            HistogramOpts::new(
                "argus_consumer_batch_size",
                "Events drained per consumer batch",
            )
            .buckets(exponential_buckets(1.0, 2.0, 17)?),
        )?;

        registry.register(Box::new(frames.clone()))?;
        registry.register(Box::new(frames_ignored.clone()))?;
        registry.register(Box::new(events.clone()))?;
        registry.register(Box::new(events_dropped.clone()))?;
        registry.register(Box::new(batch_size.clone()))?;

        let events_by_type = EventType::ALL.map(|t| events.with_label_values(&[t.as_str()]));

        Ok(Self {
            registry,
            frames,
            frames_ignored,
            events_dropped,
            batch_size,
            events_by_type,
        })
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    #[inline]
    pub fn inc_frames(&self) {
        self.frames.inc();
    }

    #[inline]
    pub fn inc_ignored(&self) {
        self.frames_ignored.inc();
    }

    #[inline]
    pub fn inc_event(&self, event_type: EventType) {
        self.events_by_type[event_type.index()].inc();
    }

    #[inline]
    pub fn inc_dropped(&self) {
        self.events_dropped.inc();
    }

    pub fn observe_batch(&self, len: usize) {
        self.batch_size.observe(len as f64);
    }

    pub fn events_of(&self, event_type: EventType) -> u64 {
        self.events_by_type[event_type.index()].get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_render_in_text_format() {
        let metrics = MetricsRecorder::new().unwrap();
        metrics.inc_frames();
        metrics.inc_frames();
        metrics.inc_ignored();
        metrics.inc_event(EventType::Dns);
        metrics.inc_dropped();
        metrics.observe_batch(8);

        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("argus_frames_total 2"));
        assert!(text.contains("argus_frames_ignored_total 1"));
        assert!(text.contains("argus_events_total{event_type=\"DNS\"} 1"));
        assert!(text.contains("argus_events_dropped_total 1"));
        assert!(text.contains("argus_consumer_batch_size_count 1"));
    }

    #[test]
    fn every_event_type_is_pre_resolved() {
        let metrics = MetricsRecorder::new().unwrap();
        for t in EventType::ALL {
            metrics.inc_event(t);
        }
        for t in EventType::ALL {
            assert_eq!(metrics.events_of(t), 1);
        }
        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("event_type=\"ICMP\""));
    }

    #[test]
    fn recorders_are_independent() {
        let a = MetricsRecorder::new().unwrap();
        let b = MetricsRecorder::new().unwrap();
        a.inc_frames();
        assert_eq!(a.frames.get(), 1);
        assert_eq!(b.frames.get(), 0);
    }
}
