//! ## argus-protocols::l7::tls
//! TLS handshake record detection.
//!
//! ```text
//! TLS Record:
//!   Content Type (1 byte): 0x16 = Handshake
//!   Version (2 bytes): 0x03 0x00..=0x04 (SSLv3 .. TLS 1.3)
//!   Length (2 bytes)
//! Handshake:
//!   Type (1 byte): 1 = ClientHello, 2 = ServerHello
//! ```

pub const HTTPS_PORT: u16 = 443;
pub const HTTPS_ALT_PORT: u16 = 8443;

const CONTENT_TYPE_HANDSHAKE: u8 = 0x16;
const CLIENT_HELLO: u8 = 0x01;
const SERVER_HELLO: u8 = 0x02;

/// Record header plus the handshake type byte.
const MIN_HANDSHAKE_LEN: usize = 6;

#[inline]
pub fn is_tls_port(src_port: u16, dst_port: u16) -> bool {
    matches!(src_port, HTTPS_PORT | HTTPS_ALT_PORT)
        || matches!(dst_port, HTTPS_PORT | HTTPS_ALT_PORT)
}

/// True when the payload opens with a handshake record of a known version.
#[inline]
pub fn looks_like_handshake(payload: &[u8]) -> bool {
    match payload.get(..MIN_HANDSHAKE_LEN) {
        Some(&[CONTENT_TYPE_HANDSHAKE, 0x03, minor, ..]) => minor <= 0x04,
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeKind {
    ClientHello,
    ServerHello,
    Other,
}

/// Handshake message type carried by the first record, if it is a
/// handshake record at all.
pub fn handshake_kind(payload: &[u8]) -> Option<HandshakeKind> {
    match payload.get(..MIN_HANDSHAKE_LEN)? {
        &[CONTENT_TYPE_HANDSHAKE, _, _, _, _, CLIENT_HELLO] => Some(HandshakeKind::ClientHello),
        &[CONTENT_TYPE_HANDSHAKE, _, _, _, _, SERVER_HELLO] => Some(HandshakeKind::ServerHello),
        &[CONTENT_TYPE_HANDSHAKE, ..] => Some(HandshakeKind::Other),
        _ => None,
    }
}
