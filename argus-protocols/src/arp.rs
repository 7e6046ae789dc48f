//! ## argus-protocols::arp
//! ARP (RFC 826) decoding for Ethernet/IPv4 only.
//!
//! Field placement in the emitted event:
//! - `src_mac` / `dst_mac`: Ethernet header addresses, not the ARP payload
//! - `arp_sha`, `src_ip`: sender hardware and protocol address
//! - `arp_tha`, `dst_ip`: target hardware and protocol address

use argus_core::{EventType, MacAddr, NetworkEvent};

use crate::error::ParseError;
use crate::ethernet::{EthernetHeader, ETHERTYPE_IPV4, ETH_HEADER_LEN};
use crate::wire;

/// Fixed part: hardware type, protocol type, lengths, operation.
pub const ARP_HEADER_LEN: usize = 8;
/// Sender and target hardware/protocol addresses for Ethernet/IPv4.
pub const ARP_ADDRS_LEN: usize = 20;

pub const ARP_HTYPE_ETHERNET: u16 = 1;
pub const ARP_OP_REQUEST: u16 = 1;
pub const ARP_OP_REPLY: u16 = 2;

const LAYER: &str = "ARP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpPacket {
    pub operation: u16,
    pub sender_hw: MacAddr,
    pub sender_ip: u32,
    pub target_hw: MacAddr,
    pub target_ip: u32,
}

impl ArpPacket {
    /// Parses the ARP packet starting at `offset` inside `frame`.
    pub fn parse(frame: &[u8], offset: usize) -> Result<Self, ParseError> {
        wire::require(frame, offset, ARP_HEADER_LEN, LAYER)?;

        let hardware_type = wire::u16_be(frame, offset, LAYER)?;
        let protocol_type = wire::u16_be(frame, offset + 2, LAYER)?;
        let hardware_len = wire::u8_at(frame, offset + 4, LAYER)?;
        let protocol_len = wire::u8_at(frame, offset + 5, LAYER)?;
        if hardware_type != ARP_HTYPE_ETHERNET
            || protocol_type != ETHERTYPE_IPV4
            || hardware_len != 6
            || protocol_len != 4
        {
            return Err(ParseError::UnsupportedArp);
        }
        let operation = wire::u16_be(frame, offset + 6, LAYER)?;

        let addrs = offset + ARP_HEADER_LEN;
        wire::require(frame, addrs, ARP_ADDRS_LEN, LAYER)?;

        Ok(Self {
            operation,
            sender_hw: MacAddr(wire::array(frame, addrs, LAYER)?),
            sender_ip: wire::u32_be(frame, addrs + 6, LAYER)?,
            target_hw: MacAddr(wire::array(frame, addrs + 10, LAYER)?),
            target_ip: wire::u32_be(frame, addrs + 16, LAYER)?,
        })
    }
}

pub(crate) fn classify(eth: &EthernetHeader, frame: &[u8]) -> Result<NetworkEvent, ParseError> {
    let arp = ArpPacket::parse(frame, ETH_HEADER_LEN)?;

    let mut event = NetworkEvent::new(EventType::Arp);
    event.src_mac = eth.src;
    event.dst_mac = eth.dst;
    event.arp_op = arp.operation;
    event.arp_sha = arp.sender_hw;
    event.src_ip = arp.sender_ip;
    event.arp_tha = arp.target_hw;
    event.dst_ip = arp.target_ip;
    Ok(event)
}
