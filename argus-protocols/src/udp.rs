//! ## argus-protocols::udp
//! UDP field extraction; port 53 in either direction marks DNS.

use argus_core::{EventType, NetworkEvent};

use crate::error::ParseError;
use crate::ethernet::EthernetHeader;
use crate::ipv4::Ipv4Header;
use crate::l7::dns;
use crate::payload::Snapshot;
use crate::wire;

pub const UDP_HEADER_LEN: usize = 8;

const LAYER: &str = "UDP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpHeader {
    pub src_port: u16,
    pub dst_port: u16,
}

impl UdpHeader {
    pub fn parse(frame: &[u8], offset: usize) -> Result<Self, ParseError> {
        wire::require(frame, offset, UDP_HEADER_LEN, LAYER)?;
        Ok(Self {
            src_port: wire::u16_be(frame, offset, LAYER)?,
            dst_port: wire::u16_be(frame, offset + 2, LAYER)?,
        })
    }
}

pub(crate) fn classify(
    eth: &EthernetHeader,
    ip: &Ipv4Header,
    frame: &[u8],
) -> Result<NetworkEvent, ParseError> {
    let offset = ip.transport_offset();
    let udp = UdpHeader::parse(frame, offset)?;

    let event_type = if dns::is_dns_port(udp.src_port, udp.dst_port) {
        EventType::Dns
    } else {
        EventType::Udp
    };
    let mut event = ip.base_event(eth, event_type);
    event.src_port = udp.src_port;
    event.dst_port = udp.dst_port;
    event.l7_payload = Snapshot::capture(frame, offset + UDP_HEADER_LEN).bytes;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ports() {
        let mut h = [0u8; 8];
        h[0..2].copy_from_slice(&5353u16.to_be_bytes());
        h[2..4].copy_from_slice(&53u16.to_be_bytes());
        let udp = UdpHeader::parse(&h, 0).unwrap();
        assert_eq!(udp.src_port, 5353);
        assert_eq!(udp.dst_port, 53);
    }

    #[test]
    fn short_header_is_truncated() {
        assert_eq!(
            UdpHeader::parse(&[0u8; 7], 0),
            Err(ParseError::Truncated("UDP"))
        );
    }
}
