//! # Argus Protocol Classifiers
//!
//! Inline frame classification: Ethernet dispatch, ARP decoding, IPv4
//! transport dispatch, TCP/UDP/ICMP field extraction and HTTP/TLS/DNS
//! heuristics over a 32-byte payload snapshot.
//!
//! Every header access is bounds-checked against the frame slice. A frame
//! that is short, malformed or of an unsupported protocol yields no event
//! and is always passed through.

pub mod arp;
pub mod classifier;
pub mod error;
pub mod ethernet;
pub mod icmp;
pub mod inspect;
pub mod ipv4;
pub mod l7;
pub mod payload;
pub mod synth;
pub mod tcp;
pub mod udp;

mod wire;

pub use classifier::{Disposition, FrameClassifier};
pub use error::ParseError;
pub use inspect::{EventSummary, TrafficKind};
