//! # argus-core
//!
//! Foundation layer for the Argus frame probe: the event record every
//! classifier produces, its binary record layouts, and the bounded queue
//! that carries events to readers.
//!
//! ### Expectations (Production):
//! - Zero heap allocations in packet processing paths
//! - Lock-free synchronization primitives
//!
//! ### Key Submodules:
//! - `events`: `NetworkEvent`, record codec, `EventQueue`

pub mod events;

pub mod prelude {
    pub use crate::events::*;
}

pub use events::{
    Emit, EventError, EventQueue, EventSink, EventType, MacAddr, NetworkEvent, RecordError,
    RecordLayout, TcpFlags,
};
