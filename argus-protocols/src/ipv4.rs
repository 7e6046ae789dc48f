//! ## argus-protocols::ipv4
//! Minimal IPv4 header decoding and transport dispatch.

use argus_core::{EventType, NetworkEvent};

use crate::error::ParseError;
use crate::ethernet::{EthernetHeader, ETH_HEADER_LEN};
use crate::wire;
use crate::{icmp, tcp, udp};

pub const IPV4_MIN_HEADER_LEN: usize = 20;

pub const IPPROTO_ICMP: u8 = 1;
pub const IPPROTO_TCP: u8 = 6;
pub const IPPROTO_UDP: u8 = 17;

const LAYER: &str = "IPv4";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    /// Offset of this header inside the frame.
    pub offset: usize,
    /// Header length in bytes as declared by IHL.
    pub header_len: usize,
    pub protocol: u8,
    pub src: u32,
    pub dst: u32,
}

impl Ipv4Header {
    pub fn parse(frame: &[u8], offset: usize) -> Result<Self, ParseError> {
        wire::require(frame, offset, IPV4_MIN_HEADER_LEN, LAYER)?;

        let version_ihl = wire::u8_at(frame, offset, LAYER)?;
        Ok(Self {
            offset,
            header_len: usize::from(version_ihl & 0x0f) * 4,
            protocol: wire::u8_at(frame, offset + 9, LAYER)?,
            src: wire::u32_be(frame, offset + 12, LAYER)?,
            dst: wire::u32_be(frame, offset + 16, LAYER)?,
        })
    }

    /// Frame offset of the transport header. The IHL is taken as declared;
    /// the transport parser bounds-checks what it finds there.
    #[inline]
    pub fn transport_offset(&self) -> usize {
        self.offset + self.header_len
    }

    /// Event pre-filled with the link and network fields every transport
    /// classifier shares.
    pub(crate) fn base_event(&self, eth: &EthernetHeader, event_type: EventType) -> NetworkEvent {
        let mut event = NetworkEvent::new(event_type);
        event.src_mac = eth.src;
        event.dst_mac = eth.dst;
        event.src_ip = self.src;
        event.dst_ip = self.dst;
        event.protocol = self.protocol;
        event
    }
}

pub(crate) fn classify(eth: &EthernetHeader, frame: &[u8]) -> Result<NetworkEvent, ParseError> {
    let ip = Ipv4Header::parse(frame, ETH_HEADER_LEN)?;

    match ip.protocol {
        IPPROTO_TCP => tcp::classify(eth, &ip, frame),
        IPPROTO_UDP => udp::classify(eth, &ip, frame),
        IPPROTO_ICMP => icmp::classify(eth, &ip, frame),
        other => Err(ParseError::UnsupportedIpProtocol(other)),
    }
}
