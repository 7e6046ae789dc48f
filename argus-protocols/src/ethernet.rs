//! ## argus-protocols::ethernet
//! Ethernet II header decoding and next-layer dispatch tag.

use argus_core::MacAddr;

use crate::error::ParseError;
use crate::wire;

pub const ETH_HEADER_LEN: usize = 14;
pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_ARP: u16 = 0x0806;

const LAYER: &str = "Ethernet";

/// Next layer selected by the EtherType.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLayer {
    Arp,
    Ipv4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    pub dst: MacAddr,
    pub src: MacAddr,
    /// EtherType in host order.
    pub ether_type: u16,
}

impl EthernetHeader {
    pub fn parse(frame: &[u8]) -> Result<Self, ParseError> {
        wire::require(frame, 0, ETH_HEADER_LEN, LAYER)?;
        Ok(Self {
            dst: MacAddr(wire::array(frame, 0, LAYER)?),
            src: MacAddr(wire::array(frame, 6, LAYER)?),
            ether_type: wire::u16_be(frame, 12, LAYER)?,
        })
    }

    pub fn next_layer(&self) -> Result<NextLayer, ParseError> {
        match self.ether_type {
            ETHERTYPE_ARP => Ok(NextLayer::Arp),
            ETHERTYPE_IPV4 => Ok(NextLayer::Ipv4),
            other => Err(ParseError::UnsupportedEtherType(other)),
        }
    }
}
