//! Bounds-checked big-endian field readers.
//!
//! Every read names the layer it belongs to so a short buffer maps to
//! `ParseError::Truncated(layer)`. Nothing here can index past `data`.

use crate::error::ParseError;

#[inline]
pub(crate) fn array<const N: usize>(
    data: &[u8],
    offset: usize,
    layer: &'static str,
) -> Result<[u8; N], ParseError> {
    let end = offset.checked_add(N).ok_or(ParseError::Truncated(layer))?;
    data.get(offset..end)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(ParseError::Truncated(layer))
}

#[inline]
pub(crate) fn u8_at(data: &[u8], offset: usize, layer: &'static str) -> Result<u8, ParseError> {
    data.get(offset).copied().ok_or(ParseError::Truncated(layer))
}

#[inline]
pub(crate) fn u16_be(data: &[u8], offset: usize, layer: &'static str) -> Result<u16, ParseError> {
    array::<2>(data, offset, layer).map(u16::from_be_bytes)
}

#[inline]
pub(crate) fn u32_be(data: &[u8], offset: usize, layer: &'static str) -> Result<u32, ParseError> {
    array::<4>(data, offset, layer).map(u32::from_be_bytes)
}

/// Fails unless `len` bytes starting at `offset` lie inside `data`.
#[inline]
pub(crate) fn require(
    data: &[u8],
    offset: usize,
    len: usize,
    layer: &'static str,
) -> Result<(), ParseError> {
    match offset.checked_add(len) {
        Some(end) if end <= data.len() => Ok(()),
        _ => Err(ParseError::Truncated(layer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian() {
        let data = [0x08, 0x06, 0xc0, 0xa8, 0x00, 0x01];
        assert_eq!(u16_be(&data, 0, "t"), Ok(0x0806));
        assert_eq!(u32_be(&data, 2, "t"), Ok(0xc0a8_0001));
        assert_eq!(u8_at(&data, 5, "t"), Ok(0x01));
    }

    #[test]
    fn refuses_out_of_bounds() {
        let data = [0u8; 4];
        assert_eq!(u32_be(&data, 1, "ip"), Err(ParseError::Truncated("ip")));
        assert_eq!(u8_at(&data, 4, "ip"), Err(ParseError::Truncated("ip")));
        assert_eq!(
            array::<2>(&data, usize::MAX, "ip"),
            Err(ParseError::Truncated("ip"))
        );
        assert!(require(&data, 0, 4, "ip").is_ok());
        assert!(require(&data, 1, 4, "ip").is_err());
        assert!(require(&data, usize::MAX, 1, "ip").is_err());
    }
}
