//! Network event record emitted once per classified frame.

use std::fmt;
use std::net::Ipv4Addr;

/// Size of the transport payload snapshot carried by every event.
pub const L7_PAYLOAD_LEN: usize = 32;

/// Classification result. The discriminants are part of the record format.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Arp = 1,
    Tcp = 2,
    Udp = 3,
    Icmp = 4,
    Dns = 5,
    Http = 6,
    Tls = 7,
}

impl EventType {
    /// All event types in discriminant order.
    pub const ALL: [EventType; 7] = [
        EventType::Arp,
        EventType::Tcp,
        EventType::Udp,
        EventType::Icmp,
        EventType::Dns,
        EventType::Http,
        EventType::Tls,
    ];

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(EventType::Arp),
            2 => Some(EventType::Tcp),
            3 => Some(EventType::Udp),
            4 => Some(EventType::Icmp),
            5 => Some(EventType::Dns),
            6 => Some(EventType::Http),
            7 => Some(EventType::Tls),
            _ => None,
        }
    }

    /// Position of this type inside [`EventType::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EventType::Arp => "ARP",
            EventType::Tcp => "TCP",
            EventType::Udp => "UDP",
            EventType::Icmp => "ICMP",
            EventType::Dns => "DNS",
            EventType::Http => "HTTP",
            EventType::Tls => "TLS",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Six-byte link-layer address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub const ZERO: MacAddr = MacAddr([0; 6]);

    #[inline]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 6]
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

/// TCP control bits as carried in [`NetworkEvent::tcp_flags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TcpFlags(pub u8);

impl TcpFlags {
    pub const FIN: u8 = 0x01;
    pub const SYN: u8 = 0x02;
    pub const RST: u8 = 0x04;
    pub const PSH: u8 = 0x08;
    pub const ACK: u8 = 0x10;

    /// Bits the classifier reports; URG, ECE and CWR are masked off.
    pub const REPORTED: u8 = Self::FIN | Self::SYN | Self::RST | Self::PSH | Self::ACK;

    #[inline]
    pub const fn contains(self, bits: u8) -> bool {
        self.0 & bits == bits
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// One classified frame.
///
/// Fields that do not apply to `event_type` are always zero. Multi-byte
/// numeric fields are in host byte order. There is no default event; every
/// value starts from [`NetworkEvent::new`] with its type fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkEvent {
    pub event_type: EventType,
    pub src_mac: MacAddr,
    pub dst_mac: MacAddr,
    pub src_ip: u32,
    pub dst_ip: u32,
    pub src_port: u16,
    pub dst_port: u16,
    pub protocol: u8,
    pub tcp_flags: u8,
    pub arp_op: u16,
    pub arp_sha: MacAddr,
    pub arp_tha: MacAddr,
    pub icmp_type: u8,
    pub icmp_code: u8,
    pub l7_payload: [u8; L7_PAYLOAD_LEN],
}

impl NetworkEvent {
    /// Zeroed event of the given type.
    #[inline]
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            src_mac: MacAddr::ZERO,
            dst_mac: MacAddr::ZERO,
            src_ip: 0,
            dst_ip: 0,
            src_port: 0,
            dst_port: 0,
            protocol: 0,
            tcp_flags: 0,
            arp_op: 0,
            arp_sha: MacAddr::ZERO,
            arp_tha: MacAddr::ZERO,
            icmp_type: 0,
            icmp_code: 0,
            l7_payload: [0; L7_PAYLOAD_LEN],
        }
    }

    #[inline]
    pub fn src_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.src_ip)
    }

    #[inline]
    pub fn dst_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.dst_ip)
    }

    #[inline]
    pub fn flags(&self) -> TcpFlags {
        TcpFlags(self.tcp_flags)
    }

    /// Payload snapshot with trailing zero padding removed.
    pub fn payload_prefix(&self) -> &[u8] {
        let end = self
            .l7_payload
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |i| i + 1);
        &self.l7_payload[..end]
    }
}
