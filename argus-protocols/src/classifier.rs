//! ## argus-protocols::classifier
//! Frame-level entry point: Ethernet dispatch to the ARP or IPv4 branch,
//! then publication of the single resulting event.
//!
//! Classification is a pure function of the frame bytes. It performs no
//! allocation, takes no locks and its only loop is the bounded payload copy.

use argus_core::{Emit, EventSink, NetworkEvent};

use crate::error::ParseError;
use crate::ethernet::{EthernetHeader, NextLayer};
use crate::{arp, ipv4};

/// Verdict handed back to whatever feeds frames in. Observation never
/// alters traffic, so `Pass` is the only verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Pass,
}

/// Stateless frame classifier.
#[derive(Default, Debug, Copy, Clone)]
pub struct FrameClassifier;

impl FrameClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Builds the event for `frame`, or explains why there is none.
    #[inline]
    pub fn classify(&self, frame: &[u8]) -> Result<NetworkEvent, ParseError> {
        let eth = EthernetHeader::parse(frame)?;
        match eth.next_layer()? {
            NextLayer::Arp => arp::classify(&eth, frame),
            NextLayer::Ipv4 => ipv4::classify(&eth, frame),
        }
    }

    /// Classifies `frame` and publishes at most one event to `sink`.
    ///
    /// Returns the publish outcome (`None` when the frame produced no
    /// event) alongside the disposition, which is always `Pass`.
    #[inline]
    pub fn process<S>(&self, frame: &[u8], sink: &S) -> (Disposition, Option<Emit>)
    where
        S: EventSink + ?Sized,
    {
        let emitted = self.classify(frame).ok().map(|event| sink.emit(event));
        (Disposition::Pass, emitted)
    }
}
