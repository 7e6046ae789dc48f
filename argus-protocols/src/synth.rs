//! ## argus-protocols::synth
//! Synthetic Ethernet frame construction for tests, benchmarks and replay.
//!
//! Checksums are left at zero; the classifier never looks at them.

use std::net::Ipv4Addr;

use argus_core::MacAddr;
use bytes::{BufMut, Bytes, BytesMut};

use crate::arp::ARP_HTYPE_ETHERNET;
use crate::ethernet::{ETHERTYPE_ARP, ETHERTYPE_IPV4, ETH_HEADER_LEN};
use crate::ipv4::{IPPROTO_ICMP, IPPROTO_TCP, IPPROTO_UDP, IPV4_MIN_HEADER_LEN};
use crate::tcp::TCP_MIN_HEADER_LEN;
use crate::udp::UDP_HEADER_LEN;

const DEFAULT_TTL: u8 = 64;

#[derive(Debug, Clone, Copy)]
pub struct FrameBuilder {
    pub src_mac: MacAddr,
    pub dst_mac: MacAddr,
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::with_macs(
            MacAddr([0x02, 0x00, 0x5e, 0x10, 0x00, 0x01]),
            MacAddr([0x02, 0x00, 0x5e, 0x10, 0x00, 0x02]),
        )
    }

    pub fn with_macs(src_mac: MacAddr, dst_mac: MacAddr) -> Self {
        Self { src_mac, dst_mac }
    }

    pub fn ethernet(&self, ether_type: u16, body: &[u8]) -> Bytes {
        let mut buf = BytesMut::with_capacity(ETH_HEADER_LEN + body.len());
        buf.put_slice(&self.dst_mac.0);
        buf.put_slice(&self.src_mac.0);
        buf.put_u16(ether_type);
        buf.put_slice(body);
        buf.freeze()
    }

    pub fn arp(
        &self,
        operation: u16,
        sender_hw: MacAddr,
        sender_ip: Ipv4Addr,
        target_hw: MacAddr,
        target_ip: Ipv4Addr,
    ) -> Bytes {
        let mut body = BytesMut::with_capacity(28);
        body.put_u16(ARP_HTYPE_ETHERNET);
        body.put_u16(ETHERTYPE_IPV4);
        body.put_u8(6);
        body.put_u8(4);
        body.put_u16(operation);
        body.put_slice(&sender_hw.0);
        body.put_slice(&sender_ip.octets());
        body.put_slice(&target_hw.0);
        body.put_slice(&target_ip.octets());
        self.ethernet(ETHERTYPE_ARP, &body)
    }

    /// IPv4 packet with a 20-byte header around `transport`.
    pub fn ipv4(&self, src: Ipv4Addr, dst: Ipv4Addr, protocol: u8, transport: &[u8]) -> Bytes {
        let total_len = u16::try_from(IPV4_MIN_HEADER_LEN + transport.len()).unwrap_or(u16::MAX);

        let mut body = BytesMut::with_capacity(IPV4_MIN_HEADER_LEN + transport.len());
        body.put_u8(0x45);
        body.put_u8(0);
        body.put_u16(total_len);
        body.put_u16(0); // identification
        body.put_u16(0x4000); // don't fragment
        body.put_u8(DEFAULT_TTL);
        body.put_u8(protocol);
        body.put_u16(0); // checksum
        body.put_slice(&src.octets());
        body.put_slice(&dst.octets());
        body.put_slice(transport);
        self.ethernet(ETHERTYPE_IPV4, &body)
    }

    pub fn tcp(
        &self,
        src: Ipv4Addr,
        dst: Ipv4Addr,
        src_port: u16,
        dst_port: u16,
        flags: u8,
        payload: &[u8],
    ) -> Bytes {
        let mut segment = BytesMut::with_capacity(TCP_MIN_HEADER_LEN + payload.len());
        segment.put_u16(src_port);
        segment.put_u16(dst_port);
        segment.put_u32(1); // sequence
        segment.put_u32(0); // acknowledgment
        segment.put_u8(5 << 4);
        segment.put_u8(flags);
        segment.put_u16(64240); // window
        segment.put_u16(0); // checksum
        segment.put_u16(0); // urgent pointer
        segment.put_slice(payload);
        self.ipv4(src, dst, IPPROTO_TCP, &segment)
    }

    pub fn udp(
        &self,
        src: Ipv4Addr,
        dst: Ipv4Addr,
        src_port: u16,
        dst_port: u16,
        payload: &[u8],
    ) -> Bytes {
        let len = u16::try_from(UDP_HEADER_LEN + payload.len()).unwrap_or(u16::MAX);

        let mut datagram = BytesMut::with_capacity(UDP_HEADER_LEN + payload.len());
        datagram.put_u16(src_port);
        datagram.put_u16(dst_port);
        datagram.put_u16(len);
        datagram.put_u16(0); // checksum
        datagram.put_slice(payload);
        self.ipv4(src, dst, IPPROTO_UDP, &datagram)
    }

    /// ICMP message with identifier/sequence 1/1 and no data.
    pub fn icmp(&self, src: Ipv4Addr, dst: Ipv4Addr, icmp_type: u8, code: u8) -> Bytes {
        let mut message = BytesMut::with_capacity(8);
        message.put_u8(icmp_type);
        message.put_u8(code);
        message.put_u16(0); // checksum
        message.put_u16(1);
        message.put_u16(1);
        self.ipv4(src, dst, IPPROTO_ICMP, &message)
    }
}
