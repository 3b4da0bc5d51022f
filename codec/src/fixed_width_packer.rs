//! Two packing disciplines for lists of fixed-width unsigned fields.
//!
//! **P8** packs aligned groups of exactly 8 values at width `w` into
//! exactly `w` bytes per group; every 8-value group lands on a byte
//! boundary, since `8 * w` bits is always a whole number of bytes.
//! **Tail-pack** handles the `N mod 8` leftover values by continuing the
//! same MSB-first bit stream and then padding with zero bits out to the
//! next 32-bit word, mirroring a big-endian streaming accumulator that
//! flushes every 4 bytes.
//!
//! `encode_outliers` / `decode_outliers` glue the two disciplines
//! together: the first `8 * floor(N / 8)` values go through P8, the
//! remaining `N mod 8` through tail-pack.

use crate::bit_io::{BitReader, BitWriter};
use crate::errors::BosmResult;

/// Packs `values` at bit width `w`, P8 for full groups of 8 followed by a
/// tail-packed remainder. `w` must be at least 1 if `values` is non-empty.
pub fn encode_outliers(writer: &mut BitWriter, values: &[u32], w: u32) -> BosmResult<()> {
  if values.is_empty() {
    return Ok(());
  }
  debug_assert!(w >= 1, "encode_outliers called with zero width");

  let full_groups = values.len() / 8;
  for v in &values[..full_groups * 8] {
    writer.write_bits(*v, w)?;
  }
  // every full group of 8 values occupies exactly w bytes, so the writer
  // is byte-aligned here regardless of w.

  let tail = &values[full_groups * 8..];
  for v in tail {
    writer.write_bits(*v, w)?;
  }
  if !tail.is_empty() {
    writer.align_to_u32()?;
  }
  Ok(())
}

/// Inverse of [`encode_outliers`]; reads exactly `count` values packed at
/// width `w`.
pub fn decode_outliers(reader: &mut BitReader, count: usize, w: u32) -> BosmResult<Vec<u32>> {
  if count == 0 {
    return Ok(Vec::new());
  }
  debug_assert!(w >= 1, "decode_outliers called with zero width");

  let full_groups = count / 8;
  let mut res = Vec::with_capacity(count);
  for _ in 0..full_groups * 8 {
    res.push(reader.read_bits(w)?);
  }

  let tail_len = count - full_groups * 8;
  for _ in 0..tail_len {
    res.push(reader.read_bits(w)?);
  }
  if tail_len > 0 {
    reader.align_to_u32()?;
  }
  Ok(res)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn roundtrip(values: &[u32], w: u32, buf_len: usize) -> Vec<u32> {
    let mut buf = vec![0u8; buf_len];
    {
      let mut writer = BitWriter::new(&mut buf);
      encode_outliers(&mut writer, values, w).unwrap();
    }
    let mut reader = BitReader::new(&buf);
    decode_outliers(&mut reader, values.len(), w).unwrap()
  }

  #[test]
  fn test_exact_multiple_of_8() {
    let values: Vec<u32> = (0..16).collect();
    assert_eq!(roundtrip(&values, 5, 32), values);
  }

  #[test]
  fn test_with_tail() {
    let values: Vec<u32> = (0..11).collect();
    assert_eq!(roundtrip(&values, 4, 32), values);
  }

  #[test]
  fn test_tail_only() {
    let values = vec![1u32, 2, 3];
    assert_eq!(roundtrip(&values, 10, 16), values);
  }

  #[test]
  fn test_empty() {
    let values: Vec<u32> = Vec::new();
    assert_eq!(roundtrip(&values, 7, 0), values);
  }

  #[test]
  fn test_tail_pads_to_word32() {
    // 3 values at width 3 = 9 bits, padded up to 32 bits = 4 bytes.
    let mut buf = [0xffu8; 8];
    {
      let mut writer = BitWriter::new(&mut buf);
      encode_outliers(&mut writer, &[1, 2, 3], 3).unwrap();
      assert_eq!(writer.byte_pos(), 4);
    }
  }
}
