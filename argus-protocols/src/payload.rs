//! Transport payload snapshot.

use argus_core::events::L7_PAYLOAD_LEN;

/// Zero-padded copy of at most [`L7_PAYLOAD_LEN`] payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub bytes: [u8; L7_PAYLOAD_LEN],
    /// Number of bytes actually copied from the frame.
    pub len: usize,
}

impl Snapshot {
    /// Copies the payload starting at `start`. A start at or past the end
    /// of the frame yields an empty snapshot.
    #[inline]
    pub fn capture(frame: &[u8], start: usize) -> Self {
        let mut bytes = [0u8; L7_PAYLOAD_LEN];
        let available = frame.get(start..).unwrap_or(&[]);
        let len = available.len().min(L7_PAYLOAD_LEN);
        bytes[..len].copy_from_slice(&available[..len]);
        Self { bytes, len }
    }

    /// The copied bytes, without padding.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
