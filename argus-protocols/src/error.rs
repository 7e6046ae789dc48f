use thiserror::Error;

/// Reasons a frame produced no event.
///
/// These never leave the classifier as failures: the frame is passed
/// through and the error only tells tests and callers why it was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Insufficient data for {0} header")]
    Truncated(&'static str),
    #[error("Unsupported EtherType 0x{0:04x}")]
    UnsupportedEtherType(u16),
    #[error("ARP packet is not Ethernet/IPv4")]
    UnsupportedArp,
    #[error("Unsupported IP protocol {0}")]
    UnsupportedIpProtocol(u8),
}
