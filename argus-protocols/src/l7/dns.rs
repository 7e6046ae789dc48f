//! ## argus-protocols::l7::dns
//! DNS is recognised by port alone; the helpers here read what little the
//! 32-byte snapshot holds (QR bit and the leading labels of the QNAME).

pub const DNS_PORT: u16 = 53;

/// Fixed DNS header size; the question section starts right after it.
const DNS_HEADER_LEN: usize = 12;
const MAX_LABEL_LEN: usize = 63;
const QR_BIT: u8 = 0x80;

#[inline]
pub fn is_dns_port(src_port: u16, dst_port: u16) -> bool {
    src_port == DNS_PORT || dst_port == DNS_PORT
}

/// True when the QR bit marks the message as a response.
pub fn is_response(payload: &[u8]) -> bool {
    payload.get(2).is_some_and(|flags| flags & QR_BIT != 0)
}

/// Labels of the first question name that fit inside `payload`, joined
/// with dots. Parsing stops at the root label, an oversized label or the
/// end of the snapshot.
pub fn query_name(payload: &[u8]) -> Option<String> {
    let mut labels: Vec<String> = Vec::new();
    let mut offset = DNS_HEADER_LEN;

    while let Some(&len) = payload.get(offset) {
        let len = usize::from(len);
        if len == 0 || len > MAX_LABEL_LEN {
            break;
        }
        let Some(label) = payload.get(offset + 1..offset + 1 + len) else {
            break;
        };
        labels.push(String::from_utf8_lossy(label).into_owned());
        offset += 1 + len;
    }

    if labels.is_empty() {
        None
    } else {
        Some(labels.join("."))
    }
}
