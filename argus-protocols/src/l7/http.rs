//! ## argus-protocols::l7::http
//! HTTP request detection from the first payload bytes, plus request-line
//! extraction for inspection.

pub const HTTP_PORT: u16 = 80;
pub const HTTP_ALT_PORT: u16 = 8080;

/// Four-byte prefixes that open an HTTP request. `DELE` stands in for DELETE.
const REQUEST_PREFIXES: [&[u8; 4]; 5] = [b"GET ", b"POST", b"HEAD", b"PUT ", b"DELE"];

/// Methods recognised by [`RequestLine::parse`]; each must be followed by a space.
const METHODS: [&str; 5] = ["GET", "POST", "HEAD", "PUT", "DELETE"];

#[inline]
pub fn is_http_port(src_port: u16, dst_port: u16) -> bool {
    matches!(src_port, HTTP_PORT | HTTP_ALT_PORT) || matches!(dst_port, HTTP_PORT | HTTP_ALT_PORT)
}

/// True when the first four payload bytes open an HTTP request.
#[inline]
pub fn looks_like_request(payload: &[u8]) -> bool {
    match payload.get(..4) {
        Some(head) => REQUEST_PREFIXES.iter().any(|prefix| head == &prefix[..]),
        None => false,
    }
}

/// Method and request target read from a payload snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: &'static str,
    pub target: Option<String>,
}

impl RequestLine {
    /// Parses `METHOD SP target` out of a (possibly zero padded) snapshot.
    pub fn parse(payload: &[u8]) -> Option<Self> {
        let text = trim_padding(payload);
        let method = METHODS.iter().copied().find(|m| {
            text.len() > m.len() && text.starts_with(m.as_bytes()) && text[m.len()] == b' '
        })?;

        let target = text
            .split(|b| b.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
            .nth(1)
            .map(|token| String::from_utf8_lossy(token).into_owned());

        Some(Self { method, target })
    }
}

impl std::fmt::Display for RequestLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{} {}", self.method, target),
            None => f.write_str(self.method),
        }
    }
}

fn trim_padding(payload: &[u8]) -> &[u8] {
    let end = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());
    &payload[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_request_prefixes() {
        for payload in [
            &b"GET / HTTP/1.1"[..],
            &b"POST /login"[..],
            &b"HEAD /"[..],
            &b"PUT /x"[..],
            &b"DELETE /x"[..],
        ] {
            assert!(looks_like_request(payload), "{:?}", payload);
        }
    }

    #[test]
    fn rejects_short_or_foreign_payloads() {
        assert!(!looks_like_request(b"GET"));
        assert!(!looks_like_request(b"HTTP/1.1 200 OK"));
        assert!(!looks_like_request(b"get /"));
        assert!(!looks_like_request(b""));
    }

    #[test]
    fn port_match_is_either_direction() {
        assert!(is_http_port(51000, 80));
        assert!(is_http_port(8080, 51000));
        assert!(!is_http_port(443, 51000));
    }

    #[test]
    fn request_line_with_target() {
        let mut snapshot = [0u8; 32];
        snapshot[..21].copy_from_slice(b"GET /index.html HTTP/");
        let line = RequestLine::parse(&snapshot).unwrap();
        assert_eq!(line.method, "GET");
        assert_eq!(line.target.as_deref(), Some("/index.html"));
        assert_eq!(line.to_string(), "GET /index.html");
    }

    #[test]
    fn request_line_requires_full_method() {
        assert!(RequestLine::parse(b"DELE").is_none());
        assert!(RequestLine::parse(b"POSTX /").is_none());
        let line = RequestLine::parse(b"DELETE ").unwrap();
        assert_eq!(line.method, "DELETE");
        assert_eq!(line.target, None);
        assert_eq!(line.to_string(), "DELETE");
    }
}
