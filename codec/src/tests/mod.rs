//! Crate-level round-trip and property tests exercising [`crate::compress`]
//! and [`crate::decompress`] together, beyond what each module's own
//! `#[cfg(test)]` block already covers in isolation.

use crate::{compress, decompress};

fn roundtrip(values: &[i32], block_size: u32) {
  let encoded = compress(values, block_size).unwrap();
  let decoded = decompress(&encoded).unwrap();
  assert_eq!(decoded, values, "block_size={}", block_size);
}

#[test]
fn test_s1_through_s4_as_a_single_block_stream() {
  roundtrip(&[7; 16], 16);
  roundtrip(&(0..8).collect::<Vec<i32>>(), 8);
  roundtrip(&[0, 0, 0, 0, 0, 0, 0, 1000], 8);
  roundtrip(&[0, 50, 50, 50, 50, 50, 50, 100], 8);
}

#[test]
fn test_s5_short_literal_tail() {
  let values: Vec<i32> = (0..1026).map(|i| i - 500).collect();
  roundtrip(&values, 1024);
}

#[test]
fn test_s6_long_block_tail() {
  let values: Vec<i32> = (0..1500).map(|i| ((i * 131) % 4001) - 2000).collect();
  roundtrip(&values, 1024);
}

#[test]
fn test_block_size_property_across_sizes() {
  let values: Vec<i32> = (0..5000)
    .map(|i| match i % 97 {
      0 => i * 10_000,
      n if n < 20 => 7,
      _ => i,
    })
    .collect();
  for &block_size in &[64u32, 256, 1024, 2048] {
    roundtrip(&values, block_size);
  }
}

#[test]
fn test_extreme_low_values() {
  // a block near i32::MIN has a small span, so it's in-scope even though
  // the individual values are extreme.
  let values = vec![
    i32::MIN,
    i32::MIN + 1,
    i32::MIN + 2,
    i32::MIN,
    i32::MIN,
    i32::MIN,
    i32::MIN,
    i32::MIN,
    i32::MIN,
    i32::MIN,
    i32::MIN,
    i32::MIN + 2,
    i32::MIN + 1,
    i32::MIN,
    i32::MIN + 3,
    i32::MIN,
  ];
  roundtrip(&values, 16);
}

#[test]
fn test_extreme_high_values() {
  let values = vec![
    i32::MAX,
    i32::MAX - 1,
    i32::MAX - 2,
    i32::MAX,
    i32::MAX,
    i32::MAX,
    i32::MAX,
    i32::MAX,
    i32::MAX,
    i32::MAX,
    i32::MAX,
    i32::MAX - 2,
    i32::MAX - 1,
    i32::MAX,
    i32::MAX - 3,
    i32::MAX,
  ];
  roundtrip(&values, 16);
}

#[test]
fn test_span_wider_than_i32_rejected() {
  // a block spanning both i32::MIN and i32::MAX exceeds the RawBlock
  // invariant ("max - min fits in i32") and must be rejected rather than
  // silently wrapped.
  let values = vec![i32::MIN, -1000, 0, 1000, i32::MAX];
  assert!(matches!(
    compress(&values, 16),
    Err(e) if e.kind == crate::errors::ErrorKind::InvalidInput
  ));
}

#[test]
fn test_all_runs_collapse() {
  let mut values = Vec::new();
  for block in 0..4 {
    values.extend(std::iter::repeat(block * 3).take(64));
  }
  roundtrip(&values, 64);
}

#[test]
fn test_single_value_stream() {
  roundtrip(&[12345], 64);
}

#[test]
fn test_empty_values_stream() {
  roundtrip(&[], 64);
}

#[test]
fn test_rejects_truncated_stream() {
  let encoded = compress(&(0..500).collect::<Vec<i32>>(), 128).unwrap();
  for cut in [0usize, 1, 7, encoded.len() - 1] {
    assert!(decompress(&encoded[..cut]).is_err(), "cut at {}", cut);
  }
}

#[test]
fn test_rejects_corrupt_block_size_header() {
  let mut encoded = compress(&(0..10).collect::<Vec<i32>>(), 64).unwrap();
  encoded[4..8].copy_from_slice(&0u32.to_be_bytes());
  assert!(decompress(&encoded).is_err());
}
