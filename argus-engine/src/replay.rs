//! Offline frame replay across parallel processing contexts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use argus_core::Emit;
use bytes::Bytes;
use tracing::{info, instrument};

use crate::probe::Probe;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub frames: u64,
    pub queued: u64,
    pub dropped: u64,
    pub ignored: u64,
}

#[derive(Default)]
struct Tally {
    frames: AtomicU64,
    queued: AtomicU64,
    dropped: AtomicU64,
    ignored: AtomicU64,
}

impl Tally {
    fn snapshot(&self) -> ReplayStats {
        ReplayStats {
            frames: self.frames.load(Ordering::Relaxed),
            queued: self.queued.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
        }
    }
}

/// Feeds `frames` through `workers` scoped threads, each with its own probe
/// handle. Frames are split into contiguous chunks, one per worker.
#[instrument(level = "info", name = "replay_frames", skip(probe, frames), fields(frames = frames.len()))]
pub fn replay_frames(probe: &Probe, frames: &[Bytes], workers: usize) -> ReplayStats {
    let tally = Tally::default();
    if frames.is_empty() {
        return tally.snapshot();
    }

    let workers = workers.clamp(1, frames.len());
    let chunk_len = frames.len().div_ceil(workers);

    thread::scope(|scope| {
        for chunk in frames.chunks(chunk_len) {
            let probe = probe.clone();
            let tally = &tally;
            scope.spawn(move || {
                let (mut queued, mut dropped, mut ignored) = (0u64, 0u64, 0u64);
                for frame in chunk {
                    match probe.observe(frame).1 {
                        Some(Emit::Queued) => queued += 1,
                        Some(Emit::Dropped) => dropped += 1,
                        None => ignored += 1,
                    }
                }
                tally.frames.fetch_add(chunk.len() as u64, Ordering::Relaxed);
                tally.queued.fetch_add(queued, Ordering::Relaxed);
                tally.dropped.fetch_add(dropped, Ordering::Relaxed);
                tally.ignored.fetch_add(ignored, Ordering::Relaxed);
            });
        }
    });

    let stats = tally.snapshot();
    info!(
        workers,
        queued = stats.queued,
        dropped = stats.dropped,
        ignored = stats.ignored,
        "replay complete"
    );
    stats
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use argus_config::ArgusConfig;
    use argus_protocols::synth::FrameBuilder;

    use super::*;

    fn probe(capacity: usize) -> Probe {
        let mut config = ArgusConfig::default();
        config.queue.capacity = capacity;
        Probe::new(&config).unwrap()
    }

    fn frames(n: usize) -> Vec<Bytes> {
        let b = FrameBuilder::new();
        (0..n)
            .map(|i| {
                let port = 1024 + (i % 60000) as u16;
                if i % 10 == 9 {
                    Bytes::from_static(&[0u8; 12])
                } else {
                    b.udp(Ipv4Addr::new(10, 9, 0, 1), Ipv4Addr::new(10, 9, 0, 2), port, 5000, b"x")
                }
            })
            .collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(replay_frames(&probe(128), &[], 4), ReplayStats::default());
    }

    #[test]
    fn accounts_for_every_frame() {
        let probe = probe(1024);
        let stats = replay_frames(&probe, &frames(500), 4);
        assert_eq!(stats.frames, 500);
        assert_eq!(stats.ignored, 50);
        assert_eq!(stats.queued, 450);
        assert_eq!(stats.dropped, 0);
        assert_eq!(probe.reader().len(), 450);
    }

    #[test]
    fn saturation_under_parallel_replay() {
        let probe = probe(128);
        let stats = replay_frames(&probe, &frames(1000), 8);
        assert_eq!(stats.queued, 128);
        assert_eq!(stats.dropped, 900 - 128);
        assert_eq!(probe.dropped(), stats.dropped);
        assert_eq!(probe.reader().drain(usize::MAX).len(), 128);
    }

    #[test]
    fn more_workers_than_frames() {
        let stats = replay_frames(&probe(128), &frames(3), 64);
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.queued, 3);
    }
}
