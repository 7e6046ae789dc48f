//! ## argus-protocols::inspect
//! Reader-side interpretation of emitted events.
//!
//! Nothing here runs while classifying: these helpers derive a finer
//! traffic label and a short application-layer hint from an event that
//! already left the queue.

use std::fmt;

use argus_core::{EventType, NetworkEvent, TcpFlags};

use crate::arp::ARP_OP_REPLY;
use crate::l7::tls::HandshakeKind;
use crate::l7::{dns, http, tls};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficKind {
    ArpRequest,
    ArpReply,
    ArpProbe,
    ArpAnnounce,
    TcpSyn,
    TcpSynAck,
    TcpAck,
    TcpFin,
    TcpRst,
    TcpHttp,
    TcpHttps,
    TcpSsh,
    TcpOther,
    UdpDns,
    UdpDhcp,
    UdpNtp,
    UdpSnmp,
    UdpOther,
    IcmpEchoRequest,
    IcmpEchoReply,
    IcmpDestinationUnreachable,
    IcmpTimeExceeded,
    IcmpRedirect,
    IcmpOther,
    DnsQuery,
    DnsResponse,
    HttpGet,
    HttpPost,
    HttpRequest,
    TlsClientHello,
    TlsServerHello,
    TlsHandshake,
}

impl TrafficKind {
    pub const fn as_str(self) -> &'static str {
        use TrafficKind::*;
        match self {
            ArpRequest => "ARP_REQUEST",
            ArpReply => "ARP_REPLY",
            ArpProbe => "ARP_PROBE",
            ArpAnnounce => "ARP_ANNOUNCE",
            TcpSyn => "TCP_SYN",
            TcpSynAck => "TCP_SYNACK",
            TcpAck => "TCP_ACK",
            TcpFin => "TCP_FIN",
            TcpRst => "TCP_RST",
            TcpHttp => "TCP_HTTP",
            TcpHttps => "TCP_HTTPS",
            TcpSsh => "TCP_SSH",
            TcpOther => "TCP_OTHER",
            UdpDns => "UDP_DNS",
            UdpDhcp => "UDP_DHCP",
            UdpNtp => "UDP_NTP",
            UdpSnmp => "UDP_SNMP",
            UdpOther => "UDP_OTHER",
            IcmpEchoRequest => "ICMP_ECHO_REQUEST",
            IcmpEchoReply => "ICMP_ECHO_REPLY",
            IcmpDestinationUnreachable => "ICMP_DEST_UNREACHABLE",
            IcmpTimeExceeded => "ICMP_TIME_EXCEEDED",
            IcmpRedirect => "ICMP_REDIRECT",
            IcmpOther => "ICMP_OTHER",
            DnsQuery => "DNS_QUERY",
            DnsResponse => "DNS_RESPONSE",
            HttpGet => "HTTP_GET",
            HttpPost => "HTTP_POST",
            HttpRequest => "HTTP_REQUEST",
            TlsClientHello => "TLS_CLIENT_HELLO",
            TlsServerHello => "TLS_SERVER_HELLO",
            TlsHandshake => "TLS_HANDSHAKE",
        }
    }
}

impl fmt::Display for TrafficKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn traffic_kind(event: &NetworkEvent) -> TrafficKind {
    match event.event_type {
        EventType::Arp => arp_kind(event),
        EventType::Tcp => tcp_kind(event),
        EventType::Udp => udp_kind(event),
        EventType::Icmp => icmp_kind(event.icmp_type),
        EventType::Dns if dns::is_response(&event.l7_payload) => TrafficKind::DnsResponse,
        EventType::Dns => TrafficKind::DnsQuery,
        EventType::Http if event.l7_payload.starts_with(b"GET ") => TrafficKind::HttpGet,
        EventType::Http if event.l7_payload.starts_with(b"POST ") => TrafficKind::HttpPost,
        EventType::Http => TrafficKind::HttpRequest,
        EventType::Tls => match tls::handshake_kind(&event.l7_payload) {
            Some(HandshakeKind::ClientHello) => TrafficKind::TlsClientHello,
            Some(HandshakeKind::ServerHello) => TrafficKind::TlsServerHello,
            _ => TrafficKind::TlsHandshake,
        },
    }
}

fn arp_kind(event: &NetworkEvent) -> TrafficKind {
    if event.src_ip == 0 {
        TrafficKind::ArpProbe
    } else if event.src_ip == event.dst_ip {
        TrafficKind::ArpAnnounce
    } else if event.arp_op == ARP_OP_REPLY {
        TrafficKind::ArpReply
    } else {
        TrafficKind::ArpRequest
    }
}

fn tcp_kind(event: &NetworkEvent) -> TrafficKind {
    match event.dst_port {
        80 => return TrafficKind::TcpHttp,
        443 => return TrafficKind::TcpHttps,
        22 => return TrafficKind::TcpSsh,
        _ => {}
    }

    let flags = event.flags();
    if flags.contains(TcpFlags::SYN) {
        if flags.contains(TcpFlags::ACK) {
            TrafficKind::TcpSynAck
        } else {
            TrafficKind::TcpSyn
        }
    } else if flags.contains(TcpFlags::FIN) {
        TrafficKind::TcpFin
    } else if flags.contains(TcpFlags::RST) {
        TrafficKind::TcpRst
    } else if flags.contains(TcpFlags::ACK) {
        TrafficKind::TcpAck
    } else {
        TrafficKind::TcpOther
    }
}

fn udp_kind(event: &NetworkEvent) -> TrafficKind {
    if dns::is_dns_port(event.src_port, event.dst_port) {
        return TrafficKind::UdpDns;
    }
    match event.dst_port {
        67 | 68 => TrafficKind::UdpDhcp,
        123 => TrafficKind::UdpNtp,
        161 | 162 => TrafficKind::UdpSnmp,
        _ => TrafficKind::UdpOther,
    }
}

fn icmp_kind(icmp_type: u8) -> TrafficKind {
    match icmp_type {
        0 => TrafficKind::IcmpEchoReply,
        3 => TrafficKind::IcmpDestinationUnreachable,
        5 => TrafficKind::IcmpRedirect,
        8 => TrafficKind::IcmpEchoRequest,
        11 => TrafficKind::IcmpTimeExceeded,
        _ => TrafficKind::IcmpOther,
    }
}

/// Short application-layer hint: DNS query name, HTTP request line, or
/// `"TLS"` for a handshake record. SNI does not fit in the snapshot.
pub fn l7_info(event: &NetworkEvent) -> Option<String> {
    match event.event_type {
        EventType::Dns => dns::query_name(&event.l7_payload),
        EventType::Http => http::RequestLine::parse(&event.l7_payload).map(|line| line.to_string()),
        EventType::Tls => tls::handshake_kind(&event.l7_payload).map(|_| "TLS".to_string()),
        _ => None,
    }
}

/// One-line rendering of an event for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub protocol: EventType,
    pub kind: TrafficKind,
    pub src: String,
    pub dst: String,
    pub dst_port: u16,
    pub l7_info: Option<String>,
    /// Hex of the trimmed payload snapshot, empty when there is none.
    pub payload_hex: String,
}

impl EventSummary {
    pub fn from_event(event: &NetworkEvent) -> Self {
        Self {
            protocol: event.event_type,
            kind: traffic_kind(event),
            src: format!("{} ({})", event.src_addr(), event.src_mac),
            dst: event.dst_addr().to_string(),
            dst_port: event.dst_port,
            l7_info: l7_info(event),
            payload_hex: hex::encode(event.payload_prefix()),
        }
    }
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} -> {}", self.protocol, self.src, self.dst)?;
        if self.dst_port > 0 {
            write!(f, ":{}", self.dst_port)?;
        }
        write!(f, " ({})", self.kind)?;
        if let Some(info) = &self.l7_info {
            write!(f, " [{}]", info)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use argus_core::MacAddr;

    use super::*;
    use crate::classifier::FrameClassifier;
    use crate::synth::FrameBuilder;

    const A: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 5);
    const B: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);

    fn event(frame: &[u8]) -> NetworkEvent {
        FrameClassifier::new().classify(frame).unwrap()
    }

    #[test]
    fn arp_probe_announce_and_reply() {
        let b = FrameBuilder::new();
        let probe = event(&b.arp(1, b.src_mac, Ipv4Addr::UNSPECIFIED, MacAddr::ZERO, A));
        let announce = event(&b.arp(1, b.src_mac, A, MacAddr::ZERO, A));
        let reply = event(&b.arp(2, b.src_mac, B, b.dst_mac, A));
        let request = event(&b.arp(1, b.src_mac, A, MacAddr::ZERO, B));

        assert_eq!(traffic_kind(&probe), TrafficKind::ArpProbe);
        assert_eq!(traffic_kind(&announce), TrafficKind::ArpAnnounce);
        assert_eq!(traffic_kind(&reply), TrafficKind::ArpReply);
        assert_eq!(traffic_kind(&request), TrafficKind::ArpRequest);
    }

    #[test]
    fn tcp_service_ports_win_over_flags() {
        let b = FrameBuilder::new();
        let ssh = event(&b.tcp(A, B, 50000, 22, TcpFlags::SYN, b""));
        let syn = event(&b.tcp(A, B, 50000, 5432, TcpFlags::SYN, b""));
        let rst = event(&b.tcp(A, B, 50000, 5432, TcpFlags::RST | TcpFlags::ACK, b""));

        assert_eq!(traffic_kind(&ssh), TrafficKind::TcpSsh);
        assert_eq!(traffic_kind(&syn), TrafficKind::TcpSyn);
        assert_eq!(traffic_kind(&rst), TrafficKind::TcpRst);
    }

    #[test]
    fn dns_query_name_and_direction() {
        let mut query = vec![0xab, 0xcd, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
        query.extend_from_slice(b"\x04rust\x04lang\x00\x00\x01\x00\x01");
        let e = event(&FrameBuilder::new().udp(A, B, 40000, 53, &query));

        assert_eq!(traffic_kind(&e), TrafficKind::DnsQuery);
        assert_eq!(l7_info(&e).as_deref(), Some("rust.lang"));
    }

    #[test]
    fn http_summary_line() {
        let e = event(&FrameBuilder::new().tcp(
            A,
            B,
            50000,
            80,
            TcpFlags::PSH | TcpFlags::ACK,
            b"POST /api/v1/items HTTP/1.1\r\n",
        ));
        assert_eq!(traffic_kind(&e), TrafficKind::HttpPost);

        let summary = EventSummary::from_event(&e);
        assert_eq!(summary.l7_info.as_deref(), Some("POST /api/v1/items"));
        assert_eq!(
            summary.to_string(),
            format!(
                "[HTTP] 10.0.0.5 ({}) -> 10.0.0.1:80 (HTTP_POST) [POST /api/v1/items]",
                FrameBuilder::new().src_mac
            )
        );
    }

    #[test]
    fn tls_hello_kinds() {
        let b = FrameBuilder::new();
        let client = event(&b.tcp(A, B, 50000, 443, TcpFlags::ACK, &[0x16, 3, 1, 0, 0xc8, 1]));
        let server = event(&b.tcp(B, A, 443, 50000, TcpFlags::ACK, &[0x16, 3, 3, 0, 0x5a, 2]));

        assert_eq!(traffic_kind(&client), TrafficKind::TlsClientHello);
        assert_eq!(traffic_kind(&server), TrafficKind::TlsServerHello);
        assert_eq!(l7_info(&client).as_deref(), Some("TLS"));
    }

    #[test]
    fn icmp_kinds_and_no_port_in_summary() {
        let e = event(&FrameBuilder::new().icmp(A, B, 11, 0));
        assert_eq!(traffic_kind(&e), TrafficKind::IcmpTimeExceeded);

        let summary = EventSummary::from_event(&e);
        assert!(summary.to_string().ends_with("-> 10.0.0.1 (ICMP_TIME_EXCEEDED)"));
        assert!(summary.payload_hex.is_empty());
    }

    #[test]
    fn payload_hex_for_plain_udp() {
        let e = event(&FrameBuilder::new().udp(A, B, 40000, 9999, &[0xde, 0xad]));
        let summary = EventSummary::from_event(&e);
        assert_eq!(summary.kind, TrafficKind::UdpOther);
        assert_eq!(summary.payload_hex, "dead");
        assert_eq!(summary.l7_info, None);
    }
}
