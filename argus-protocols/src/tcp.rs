//! ## argus-protocols::tcp
//! TCP field extraction and HTTP/TLS reclassification.
//!
//! Heuristics run only when payload bytes are present, HTTP first and TLS
//! second; a TLS match overrides an HTTP match. Their port sets are
//! disjoint, so in practice at most one applies.

use argus_core::{EventType, NetworkEvent, TcpFlags};

use crate::error::ParseError;
use crate::ethernet::EthernetHeader;
use crate::ipv4::Ipv4Header;
use crate::l7::{http, tls};
use crate::payload::Snapshot;
use crate::wire;

pub const TCP_MIN_HEADER_LEN: usize = 20;

const LAYER: &str = "TCP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    /// Header length in bytes as declared by the data offset field.
    pub header_len: usize,
    /// Raw control bits (byte 13).
    pub control: u8,
}

impl TcpHeader {
    pub fn parse(frame: &[u8], offset: usize) -> Result<Self, ParseError> {
        wire::require(frame, offset, TCP_MIN_HEADER_LEN, LAYER)?;

        Ok(Self {
            src_port: wire::u16_be(frame, offset, LAYER)?,
            dst_port: wire::u16_be(frame, offset + 2, LAYER)?,
            header_len: usize::from(wire::u8_at(frame, offset + 12, LAYER)? >> 4) * 4,
            control: wire::u8_at(frame, offset + 13, LAYER)?,
        })
    }

    /// FIN, SYN, RST, PSH and ACK; the remaining control bits are not reported.
    #[inline]
    pub fn flags(&self) -> TcpFlags {
        TcpFlags(self.control & TcpFlags::REPORTED)
    }
}

pub(crate) fn classify(
    eth: &EthernetHeader,
    ip: &Ipv4Header,
    frame: &[u8],
) -> Result<NetworkEvent, ParseError> {
    let offset = ip.transport_offset();
    let tcp = TcpHeader::parse(frame, offset)?;

    let mut event = ip.base_event(eth, EventType::Tcp);
    event.src_port = tcp.src_port;
    event.dst_port = tcp.dst_port;
    event.tcp_flags = tcp.flags().bits();

    let snapshot = Snapshot::capture(frame, offset + tcp.header_len);
    event.l7_payload = snapshot.bytes;
    if !snapshot.is_empty() {
        event.event_type = sniff(&tcp, snapshot.as_slice());
    }
    Ok(event)
}

fn sniff(tcp: &TcpHeader, payload: &[u8]) -> EventType {
    let mut event_type = EventType::Tcp;
    if http::is_http_port(tcp.src_port, tcp.dst_port) && http::looks_like_request(payload) {
        event_type = EventType::Http;
    }
    if tls::is_tls_port(tcp.src_port, tcp.dst_port) && tls::looks_like_handshake(payload) {
        event_type = EventType::Tls;
    }
    event_type
}
