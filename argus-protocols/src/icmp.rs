//! ## argus-protocols::icmp
//! ICMP type and code extraction. Ports, flags and payload stay zero.

use argus_core::{EventType, NetworkEvent};

use crate::error::ParseError;
use crate::ethernet::EthernetHeader;
use crate::ipv4::Ipv4Header;
use crate::wire;

/// Type, code, checksum and the four-byte rest-of-header.
pub const ICMP_HEADER_LEN: usize = 8;

const LAYER: &str = "ICMP";

pub(crate) fn classify(
    eth: &EthernetHeader,
    ip: &Ipv4Header,
    frame: &[u8],
) -> Result<NetworkEvent, ParseError> {
    let offset = ip.transport_offset();
    wire::require(frame, offset, ICMP_HEADER_LEN, LAYER)?;

    let mut event = ip.base_event(eth, EventType::Icmp);
    event.icmp_type = wire::u8_at(frame, offset, LAYER)?;
    event.icmp_code = wire::u8_at(frame, offset + 1, LAYER)?;
    Ok(event)
}
