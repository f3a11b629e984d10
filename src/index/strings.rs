//! String form of an index: lowercase hexadecimal, no prefix, no padding.

use std::fmt;

use crate::types::{H3Error, H3Index, H3_NULL};

impl fmt::Display for H3Index {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:x}", self.0)
  }
}

impl fmt::LowerHex for H3Index {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::LowerHex::fmt(&self.0, f)
  }
}

/// Format an index into a caller-supplied byte buffer, NUL-free. Fails if
/// the buffer cannot hold the representation.
pub fn h3_to_string(h: H3Index, buf: &mut [u8]) -> Result<usize, H3Error> {
  let s = h3_to_string_alloc(h);
  let bytes = s.as_bytes();
  if buf.len() < bytes.len() {
    return Err(H3Error::MemoryBounds);
  }
  buf[..bytes.len()].copy_from_slice(bytes);
  Ok(bytes.len())
}

/// Format an index as an owned string.
#[must_use]
pub fn h3_to_string_alloc(h: H3Index) -> String {
  format!("{:x}", h.0)
}

/// Parse an index from hexadecimal. Malformed input (including the empty
/// string) yields the null index.
#[must_use]
pub fn string_to_h3(s: &str) -> H3Index {
  u64::from_str_radix(s, 16).map_or(H3_NULL, H3Index)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formats_without_padding() {
    assert_eq!(h3_to_string_alloc(H3Index(0xcafe)), "cafe");
    assert_eq!(h3_to_string_alloc(H3Index(0x8528_3473_ffff_fff)), "85283473fffffff");
  }

  #[test]
  fn buffer_too_small_is_an_error() {
    let mut buf = [0u8; 3];
    assert_eq!(h3_to_string(H3Index(0xcafe), &mut buf), Err(H3Error::MemoryBounds));
    let mut buf = [0u8; 17];
    assert_eq!(h3_to_string(H3Index(0xcafe), &mut buf), Ok(4));
    assert_eq!(&buf[..4], b"cafe");
  }

  #[test]
  fn parses_and_rejects() {
    assert_eq!(string_to_h3("ffffffffffffffff"), H3Index(u64::MAX));
    assert_eq!(string_to_h3("85283473fffffff"), H3Index(0x8528_3473_ffff_fff));
    assert_eq!(string_to_h3(""), H3_NULL);
    assert_eq!(string_to_h3("not hex"), H3_NULL);
  }

  #[test]
  fn round_trip() {
    let h = H3Index(0x8f28_3080_dcb0_19a);
    assert_eq!(string_to_h3(&h3_to_string_alloc(h)), h);
  }
}
