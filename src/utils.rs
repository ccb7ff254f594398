//! Utility functions for moving words and counts in and out of
//! [`Bytes`], the currency of the map and reduce functions.
//!

use anyhow::{ensure, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Read an entire [`Bytes`] slice into a [`String`].
///
/// Returns an error if the slice contains invalid UTF-8.
pub fn string_from_bytes(buf: Bytes) -> Result<String> {
    Ok(String::from_utf8(buf.as_ref().into())?)
}

/// Convert a [`String`] to [`Bytes`].
#[inline]
pub fn string_to_bytes(s: String) -> Bytes {
    Bytes::from(s)
}

/// Encode a count as 8 big-endian bytes.
pub fn count_to_bytes(count: u64) -> Bytes {
    let mut buf = BytesMut::with_capacity(8);
    buf.put_u64(count);
    buf.freeze()
}

/// Decode a count written by [`count_to_bytes`].
///
/// Anything other than exactly 8 bytes is rejected rather than silently
/// truncated.
pub fn count_from_bytes(mut buf: Bytes) -> Result<u64> {
    ensure!(buf.len() == 8, "count value has {} bytes, expected 8", buf.len());
    Ok(buf.get_u64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_survive_encoding() {
        assert_eq!(count_from_bytes(count_to_bytes(42)).unwrap(), 42);
        assert_eq!(count_from_bytes(count_to_bytes(u64::MAX)).unwrap(), u64::MAX);
    }

    #[test]
    fn short_count_is_rejected() {
        assert!(count_from_bytes(Bytes::from_static(&[0, 1])).is_err());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert!(string_from_bytes(Bytes::from_static(&[0xff, 0xfe])).is_err());
        assert_eq!(string_from_bytes(string_to_bytes("cat".into())).unwrap(), "cat");
    }
}
