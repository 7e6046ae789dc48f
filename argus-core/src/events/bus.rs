//! Bounded, lock-free event queue shared between frame handlers and readers.
//!
//! Producers publish with [`EventSink::emit`], which never blocks: when the
//! ring is full the event is discarded and counted. Slots become visible to
//! readers only once fully written, so a rejected publish never leaves a
//! partial record behind.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam::queue::ArrayQueue;
use thiserror::Error;

use super::network::NetworkEvent;

/// Event queue error conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Invalid capacity {0} (must be a non-zero power of two)")]
    InvalidCapacity(usize),
}

/// Outcome of a publish attempt. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Queued,
    Dropped,
}

/// Destination for completed events.
pub trait EventSink {
    /// Publishes `event` without blocking.
    fn emit(&self, event: NetworkEvent) -> Emit;
}

/// Cache-line aligned counter to keep the drop tally off the ring's lines.
#[repr(align(64))]
struct AlignedCounter(AtomicU64);

struct InnerQueue {
    ring: ArrayQueue<NetworkEvent>,
    dropped: AlignedCounter,
}

/// Multi-producer, multi-consumer bounded event queue.
///
/// Cloning yields another handle to the same ring.
#[derive(Clone)]
pub struct EventQueue {
    inner: Arc<InnerQueue>,
}

impl EventQueue {
    /// Creates a queue holding at most `capacity` events.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Must be a non-zero power of two.
    pub fn with_capacity(capacity: usize) -> Result<Self, EventError> {
        if !capacity.is_power_of_two() {
            return Err(EventError::InvalidCapacity(capacity));
        }

        Ok(Self {
            inner: Arc::new(InnerQueue {
                ring: ArrayQueue::new(capacity),
                dropped: AlignedCounter(AtomicU64::new(0)),
            }),
        })
    }

    /// Removes the oldest event, or `None` if the queue is empty.
    #[inline]
    pub fn try_pop(&self) -> Option<NetworkEvent> {
        self.inner.ring.pop()
    }

    /// Events discarded because the ring was full.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.inner.dropped.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.ring.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.ring.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.ring.capacity()
    }
}

impl fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQueue")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("dropped", &self.dropped())
            .finish()
    }
}

impl EventSink for EventQueue {
    #[inline]
    fn emit(&self, event: NetworkEvent) -> Emit {
        match self.inner.ring.push(event) {
            Ok(()) => Emit::Queued,
            Err(_rejected) => {
                self.inner.dropped.0.fetch_add(1, Ordering::Relaxed);
                Emit::Dropped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::network::EventType;

    fn test_event(seq: u16) -> NetworkEvent {
        let mut event = NetworkEvent::new(EventType::Udp);
        event.src_port = seq;
        event
    }

    #[test]
    fn rejects_non_power_of_two() {
        assert!(matches!(
            EventQueue::with_capacity(3),
            Err(EventError::InvalidCapacity(3))
        ));
        assert!(EventQueue::with_capacity(0).is_err());
    }

    #[test]
    fn handles_single_element() {
        let queue = EventQueue::with_capacity(2).unwrap();
        assert_eq!(queue.emit(test_event(1)), Emit::Queued);
        assert_eq!(queue.try_pop().unwrap().src_port, 1);
        assert!(queue.try_pop().is_none());
    }

    #[test]
    fn drops_when_full_and_counts() {
        let queue = EventQueue::with_capacity(2).unwrap();
        queue.emit(test_event(1));
        queue.emit(test_event(2));
        assert_eq!(queue.emit(test_event(3)), Emit::Dropped);
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.len(), 2);

        // Survivors are intact and in order.
        assert_eq!(queue.try_pop().unwrap().src_port, 1);
        assert_eq!(queue.try_pop().unwrap().src_port, 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn wraps_buffer_correctly() {
        let queue = EventQueue::with_capacity(4).unwrap();
        for cycle in 0..2 {
            for i in 0..4 {
                queue.emit(test_event(i + cycle * 4));
            }
            for i in 0..4 {
                assert_eq!(queue.try_pop().unwrap().src_port, i + cycle * 4);
            }
        }
        assert_eq!(queue.dropped(), 0);
    }

    #[test]
    fn concurrent_producers_never_exceed_capacity() {
        let queue = EventQueue::with_capacity(64).unwrap();
        std::thread::scope(|s| {
            for t in 0..4u16 {
                let queue = queue.clone();
                s.spawn(move || {
                    for i in 0..100 {
                        queue.emit(test_event(t * 1000 + i));
                    }
                });
            }
        });

        assert_eq!(queue.len(), 64);
        assert_eq!(queue.dropped(), 400 - 64);

        let mut drained = 0;
        while let Some(event) = queue.try_pop() {
            assert_eq!(event.event_type, EventType::Udp);
            drained += 1;
        }
        assert_eq!(drained, 64);
    }
}
