//! Fixed-size binary record layouts for [`NetworkEvent`].
//!
//! Both layouts are packed, keep the field order of the event struct and
//! store multi-byte numbers in host byte order:
//!
//! ```text
//! event_type:u8, src_mac:u8[6], dst_mac:u8[6], src_ip:u32, dst_ip:u32,
//! src_port:u16, dst_port:u16, protocol:u8, tcp_flags:u8, arp_op:u16,
//! arp_sha:u8[6], arp_tha:u8[6],                      <- legacy ends here (41)
//! icmp_type:u8, icmp_code:u8, l7_payload:u8[32]      <- extended (75)
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

use super::network::{EventType, MacAddr, NetworkEvent, L7_PAYLOAD_LEN};

/// Size of the legacy ARP/TCP/UDP record.
pub const LEGACY_RECORD_LEN: usize = 41;

/// Size of the extended record with ICMP fields and payload snapshot.
pub const EXTENDED_RECORD_LEN: usize = LEGACY_RECORD_LEN + 2 + L7_PAYLOAD_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Record truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("Unknown event type code {0}")]
    UnknownEventType(u8),
    #[error("{0} events cannot be represented in the legacy layout")]
    NotRepresentable(EventType),
}

/// Wire layout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordLayout {
    #[default]
    Extended,
    Legacy,
}

impl RecordLayout {
    #[inline]
    pub const fn record_len(self) -> usize {
        match self {
            RecordLayout::Extended => EXTENDED_RECORD_LEN,
            RecordLayout::Legacy => LEGACY_RECORD_LEN,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "extended" => Some(RecordLayout::Extended),
            "legacy" => Some(RecordLayout::Legacy),
            _ => None,
        }
    }

    pub fn encode(self, event: &NetworkEvent) -> Result<Bytes, RecordError> {
        let mut buf = BytesMut::with_capacity(self.record_len());
        self.encode_into(event, &mut buf)?;
        Ok(buf.freeze())
    }

    /// Appends the encoded record to `buf`.
    pub fn encode_into(self, event: &NetworkEvent, buf: &mut impl BufMut) -> Result<(), RecordError> {
        let event_type = match self {
            RecordLayout::Extended => event.event_type,
            RecordLayout::Legacy => legacy_event_type(event.event_type)?,
        };

        buf.put_u8(event_type.code());
        buf.put_slice(&event.src_mac.0);
        buf.put_slice(&event.dst_mac.0);
        buf.put_u32_ne(event.src_ip);
        buf.put_u32_ne(event.dst_ip);
        buf.put_u16_ne(event.src_port);
        buf.put_u16_ne(event.dst_port);
        buf.put_u8(event.protocol);
        buf.put_u8(event.tcp_flags);
        buf.put_u16_ne(event.arp_op);
        buf.put_slice(&event.arp_sha.0);
        buf.put_slice(&event.arp_tha.0);

        if self == RecordLayout::Extended {
            buf.put_u8(event.icmp_type);
            buf.put_u8(event.icmp_code);
            buf.put_slice(&event.l7_payload);
        }
        Ok(())
    }

    /// Decodes one record from the front of `data`. Trailing bytes are ignored.
    pub fn decode(self, data: &[u8]) -> Result<NetworkEvent, RecordError> {
        if data.len() < self.record_len() {
            return Err(RecordError::Truncated {
                expected: self.record_len(),
                actual: data.len(),
            });
        }

        let mut buf = &data[..self.record_len()];
        let code = buf.get_u8();
        let event_type = EventType::from_code(code).ok_or(RecordError::UnknownEventType(code))?;

        let mut event = NetworkEvent::new(event_type);
        event.src_mac = read_mac(&mut buf);
        event.dst_mac = read_mac(&mut buf);
        event.src_ip = buf.get_u32_ne();
        event.dst_ip = buf.get_u32_ne();
        event.src_port = buf.get_u16_ne();
        event.dst_port = buf.get_u16_ne();
        event.protocol = buf.get_u8();
        event.tcp_flags = buf.get_u8();
        event.arp_op = buf.get_u16_ne();
        event.arp_sha = read_mac(&mut buf);
        event.arp_tha = read_mac(&mut buf);

        if self == RecordLayout::Extended {
            event.icmp_type = buf.get_u8();
            event.icmp_code = buf.get_u8();
            buf.copy_to_slice(&mut event.l7_payload);
        }
        Ok(event)
    }
}

/// The legacy producer only knew ARP, TCP and UDP; application-layer types
/// collapse onto their transport.
fn legacy_event_type(event_type: EventType) -> Result<EventType, RecordError> {
    match event_type {
        EventType::Arp => Ok(EventType::Arp),
        EventType::Tcp | EventType::Http | EventType::Tls => Ok(EventType::Tcp),
        EventType::Udp | EventType::Dns => Ok(EventType::Udp),
        EventType::Icmp => Err(RecordError::NotRepresentable(EventType::Icmp)),
    }
}

fn read_mac(buf: &mut &[u8]) -> MacAddr {
    let mut mac = [0u8; 6];
    buf.copy_to_slice(&mut mac);
    MacAddr(mac)
}
