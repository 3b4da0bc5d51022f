//! Top-level stream framing: a length prefix, a block-size prefix, a run
//! of full [`block_codec`] blocks, and a tail handled by one of two
//! policies depending on its size.

use crate::bit_io::{BitReader, BitWriter};
use crate::bits::bitwidth;
use crate::block_codec::{decode_block, encode_block};
use crate::constants::{MAX_BLOCK_SIZE, MAX_LITERAL_TAIL, STREAM_HEADER_BYTES};
use crate::errors::{BosmError, BosmResult};

fn validate_block_size(block_size: u32) -> BosmResult<()> {
  if block_size == 0 || block_size > MAX_BLOCK_SIZE {
    Err(BosmError::invalid_input(format!(
      "block_size {} must be in 1..={}",
      block_size, MAX_BLOCK_SIZE,
    )))
  } else {
    Ok(())
  }
}

/// Worst-case number of bytes [`encode`] may need for `n` values: the
/// 8-byte frame header plus 4 bytes per value, the legacy upper bound
/// noted in the design (the codec never expands a value's own encoded
/// width beyond 32 bits, but per-block header overhead is additional).
pub fn max_encoded_len(n: usize, block_size: u32) -> usize {
  let num_blocks = if block_size == 0 {
    n
  } else {
    (n + block_size as usize - 1) / block_size as usize + 1
  };
  STREAM_HEADER_BYTES + 4 * n + 32 * num_blocks.max(1)
}

/// Encodes `values` into a caller-supplied buffer, returning the number
/// of bytes written. `out` must be at least [`max_encoded_len`] bytes.
pub fn encode_into(values: &[i32], block_size: u32, out: &mut [u8]) -> BosmResult<usize> {
  validate_block_size(block_size)?;
  let n = values.len();
  if n > u32::MAX as usize {
    return Err(BosmError::invalid_input(
      "stream length does not fit in a u32",
    ));
  }
  if out.len() < STREAM_HEADER_BYTES {
    return Err(BosmError::insufficient_output(
      "output buffer too small for the stream frame header",
    ));
  }

  out[0..4].copy_from_slice(&(n as u32).to_be_bytes());
  out[4..8].copy_from_slice(&block_size.to_be_bytes());

  let block_size = block_size as usize;
  let full_blocks = n / block_size;
  let r = n - full_blocks * block_size;
  let run_width = bitwidth(block_size as u32);
  let index_width = bitwidth((block_size - 1) as u32);

  let mut writer = BitWriter::new(&mut out[STREAM_HEADER_BYTES..]);
  for i in 0..full_blocks {
    let block = &values[i * block_size..(i + 1) * block_size];
    encode_block(&mut writer, block, run_width, index_width)?;
  }

  let tail = &values[full_blocks * block_size..];
  if r > 0 && r <= MAX_LITERAL_TAIL {
    for &v in tail {
      writer.write_i32(v)?;
    }
  } else if r > MAX_LITERAL_TAIL {
    encode_block(&mut writer, tail, run_width, index_width)?;
  }

  Ok(STREAM_HEADER_BYTES + writer.byte_pos())
}

/// Encodes `values` into a freshly allocated, exactly-sized buffer.
pub fn encode(values: &[i32], block_size: u32) -> BosmResult<Vec<u8>> {
  let mut buf = vec![0u8; max_encoded_len(values.len(), block_size)];
  let written = encode_into(values, block_size, &mut buf)?;
  buf.truncate(written);
  Ok(buf)
}

/// Decodes a complete stream produced by [`encode`] / [`encode_into`].
pub fn decode(bytes: &[u8]) -> BosmResult<Vec<i32>> {
  if bytes.len() < STREAM_HEADER_BYTES {
    return Err(BosmError::truncated_input(
      "input shorter than the 8-byte stream frame header",
    ));
  }
  let n = u32::from_be_bytes(bytes[0..4].try_into().unwrap()) as usize;
  let block_size = u32::from_be_bytes(bytes[4..8].try_into().unwrap());
  if block_size == 0 || block_size > MAX_BLOCK_SIZE {
    return Err(BosmError::corrupt_header(format!(
      "decoded block_size {} out of range",
      block_size,
    )));
  }

  let block_size = block_size as usize;
  let full_blocks = n / block_size;
  let r = n - full_blocks * block_size;
  let run_width = bitwidth(block_size as u32);
  let index_width = bitwidth((block_size - 1) as u32);

  let mut reader = BitReader::new(&bytes[STREAM_HEADER_BYTES..]);
  let mut res = Vec::with_capacity(n);
  for _ in 0..full_blocks {
    res.extend(decode_block(&mut reader, block_size, run_width, index_width)?);
  }

  if r > 0 && r <= MAX_LITERAL_TAIL {
    for _ in 0..r {
      res.push(reader.read_i32()?);
    }
  } else if r > MAX_LITERAL_TAIL {
    res.extend(decode_block(&mut reader, r, run_width, index_width)?);
  }

  Ok(res)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn roundtrip(values: &[i32], block_size: u32) {
    let encoded = encode(values, block_size).unwrap();
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded, values, "block_size={}", block_size);
  }

  #[test]
  fn test_empty_stream() {
    roundtrip(&[], 64);
  }

  #[test]
  fn test_s5_tail_under_four() {
    // S5: length 1026, block_size 1024 -> tail of 2 literal i32s.
    let values: Vec<i32> = (0..1026).collect();
    roundtrip(&values, 1024);
  }

  #[test]
  fn test_s6_tail_block() {
    // S6: length 1500, block_size 1024 -> tail of 476 values as one block.
    let values: Vec<i32> = (0..1500).map(|i| (i * 37) % 211 - 100).collect();
    roundtrip(&values, 1024);
  }

  #[test]
  fn test_various_tail_sizes() {
    for &r in &[1usize, 2, 3, 4, 5, 7, 8, 1023] {
      let values: Vec<i32> = (0..(1024 + r)).map(|i| (i as i32 % 17) - 8).collect();
      roundtrip(&values, 1024);
    }
  }

  #[test]
  fn test_exact_multiple_of_block_size() {
    let values: Vec<i32> = (0..2048).collect();
    roundtrip(&values, 256);
  }

  #[test]
  fn test_assorted_block_sizes() {
    let values: Vec<i32> = (-500..500).map(|i| if i % 13 == 0 { i * 1000 } else { i }).collect();
    for &block_size in &[64u32, 256, 1024, 2048] {
      roundtrip(&values, block_size);
    }
  }

  #[test]
  fn test_determinism() {
    let values: Vec<i32> = (0..500).map(|i| (i * 7) % 101).collect();
    let a = encode(&values, 128).unwrap();
    let b = encode(&values, 128).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn test_rejects_oversized_block_size() {
    let values = vec![1, 2, 3];
    assert!(encode(&values, 32768).is_err());
  }
}
