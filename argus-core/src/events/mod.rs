//! ## argus-core::events
//! **Event model, record layouts and the lock-free event queue**
//!
//! ### Expectations (Production):
//! - Zero heap allocations on the publish path
//! - Lock-free multi-producer publish
//! - Fixed per-event memory footprint
pub mod bus;
pub mod network;
pub mod record;

pub use bus::{Emit, EventError, EventQueue, EventSink};
pub use network::{EventType, MacAddr, NetworkEvent, TcpFlags, L7_PAYLOAD_LEN};
pub use record::{RecordError, RecordLayout, EXTENDED_RECORD_LEN, LEGACY_RECORD_LEN};
