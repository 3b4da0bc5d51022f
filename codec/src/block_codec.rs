//! Orchestrates [`delta_rle`] and [`median_split`] into the on-wire block
//! layout, and its inverse.
//!
//! This implements the "legacy" layout described in the format notes:
//! header fields first, then the run table, then (when the block has
//! outliers) the partition bounds and outlier positions, then three
//! separate value streams (left outliers, right outliers, normals) in
//! that order. The interleaved "improved" layout is a distinct,
//! non-interoperable wire format and is not implemented here.

use crate::bit_io::{BitReader, BitWriter};
use crate::bits::bitwidth;
use crate::delta_rle::{self, RepeatRun};
use crate::errors::{BosmError, BosmResult};
use crate::fixed_width_packer::{decode_outliers, encode_outliers};
use crate::median_split::{self, safe_bitwidth_diff, Partition};

const MAX_K1: u32 = (1 << 15) - 1;
const MAX_K2: u32 = (1 << 16) - 1;
const MAX_RUNS: usize = u8::MAX as usize / 2;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Class {
  Left,
  Right,
  Normal,
}

fn classify(deltas: &[u32], p: &Partition) -> Vec<Class> {
  deltas
    .iter()
    .map(|&v| {
      let v = v as i64;
      if v <= p.x_l_minus {
        Class::Left
      } else if v >= p.x_u_plus {
        Class::Right
      } else {
        Class::Normal
      }
    })
    .collect()
}

/// Encodes one raw block of up to `block_size` values.
///
/// `run_width` and `index_width` are derived once per stream from the
/// stream's `block_size` (`bitwidth(block_size)` and
/// `bitwidth(block_size - 1)` respectively) so that every block in the
/// stream packs its run table and outlier-index lists at the same width.
pub fn encode_block(
  writer: &mut BitWriter,
  raw: &[i32],
  run_width: u32,
  index_width: u32,
) -> BosmResult<()> {
  let delta_block = delta_rle::encode(raw)?;
  let l_prime = delta_block.deltas.len();

  if delta_block.runs.len() > MAX_RUNS {
    return Err(BosmError::invalid_input(format!(
      "block produced {} runs, exceeding the {}-run limit of the u8 run_count field",
      delta_block.runs.len(),
      MAX_RUNS,
    )));
  }

  let partition = median_split::choose_partition(&delta_block.deltas, delta_block.max_delta);
  let classes = classify(&delta_block.deltas, &partition);

  let mut left_positions = Vec::new();
  let mut right_positions = Vec::new();
  let mut left_values = Vec::new();
  let mut right_values = Vec::new();
  let mut normal_values = Vec::new();
  for (i, (&d, &c)) in delta_block.deltas.iter().zip(classes.iter()).enumerate() {
    match c {
      Class::Left => {
        left_positions.push(i as u32);
        left_values.push(d);
      }
      Class::Right => {
        right_positions.push(i as u32);
        right_values.push(d - partition.x_u_plus as u32);
      }
      Class::Normal => {
        normal_values.push(d - partition.x_l_plus as u32);
      }
    }
  }

  let k1 = left_positions.len() as u32;
  let k2 = right_positions.len() as u32;
  if k1 > MAX_K1 || k2 > MAX_K2 {
    return Err(BosmError::invalid_input(format!(
      "outlier counts k1={} k2={} exceed the k_byte field's 15/16-bit capacity",
      k1, k2,
    )));
  }

  let degenerate = k1 == 0 && k2 == 0;
  let alpha: u32 = if degenerate {
    0
  } else if (k1 as u64 + k2 as u64) * bitwidth((l_prime as u32).saturating_sub(1)) as u64
    <= (l_prime + k1 as usize + k2 as usize) as u64
  {
    1
  } else {
    0
  };

  let k_byte = (alpha << 31) | (k1 << 16) | k2;
  writer.write_u32(k_byte)?;
  writer.write_i32(delta_block.min)?;
  writer.write_u8((delta_block.runs.len() * 2) as u8)?;

  let mut run_flat = Vec::with_capacity(delta_block.runs.len() * 2);
  for run in &delta_block.runs {
    run_flat.push(run.start_index);
    run_flat.push(run.run_length);
  }
  encode_outliers(writer, &run_flat, run_width)?;

  if degenerate {
    let bit_width_normal = bitwidth(delta_block.max_delta);
    writer.write_u8(bit_width_normal as u8)?;
    encode_outliers(writer, &delta_block.deltas, bit_width_normal)?;
    return Ok(());
  }

  writer.write_i32(partition.x_l_plus as i32)?;
  writer.write_i32(partition.x_u_plus as i32)?;
  let bit_width_normal = safe_bitwidth_diff(partition.x_u_minus, partition.x_l_plus);
  let bit_width_left = safe_bitwidth_diff(partition.x_l_minus, 0);
  let bit_width_right = safe_bitwidth_diff(delta_block.max_delta as i64, partition.x_u_plus);
  writer.write_u8(bit_width_normal as u8)?;
  writer.write_u8(bit_width_left as u8)?;
  writer.write_u8(bit_width_right as u8)?;

  if alpha == 0 {
    for c in &classes {
      match c {
        Class::Normal => writer.write_bits(0, 1)?,
        Class::Right => writer.write_bits(0b10, 2)?,
        Class::Left => writer.write_bits(0b11, 2)?,
      }
    }
    writer.align_to_byte()?;
  } else {
    encode_outliers(writer, &left_positions, index_width)?;
    encode_outliers(writer, &right_positions, index_width)?;
  }

  encode_outliers(writer, &left_values, bit_width_left)?;
  encode_outliers(writer, &right_values, bit_width_right)?;
  encode_outliers(writer, &normal_values, bit_width_normal)?;

  Ok(())
}

/// Decodes one block of exactly `block_len` values (`block_len` is
/// either the stream's `block_size` for a full block, or the tail
/// remainder `r` for the final partial block).
pub fn decode_block(
  reader: &mut BitReader,
  block_len: usize,
  run_width: u32,
  index_width: u32,
) -> BosmResult<Vec<i32>> {
  let k_byte = reader.read_u32()?;
  let alpha = k_byte >> 31;
  let k1 = ((k_byte >> 16) & MAX_K1) as usize;
  let k2 = (k_byte & MAX_K2) as usize;

  let min = reader.read_i32()?;
  let run_count = reader.read_u8()? as usize;
  if run_count % 2 != 0 {
    return Err(BosmError::corrupt_header(format!(
      "run_count {} is not even",
      run_count,
    )));
  }
  let num_runs = run_count / 2;
  let run_flat = decode_outliers(reader, run_count, run_width)?;
  let mut runs = Vec::with_capacity(num_runs);
  for i in 0..num_runs {
    let start_index = run_flat[2 * i];
    let run_length = run_flat[2 * i + 1];
    if run_length < 8 {
      return Err(BosmError::corrupt_header(format!(
        "run length {} below the minimum of 8",
        run_length,
      )));
    }
    if start_index as usize >= block_len {
      return Err(BosmError::corrupt_header(format!(
        "run start {} exceeds block length {}",
        start_index, block_len,
      )));
    }
    runs.push(RepeatRun {
      start_index,
      run_length,
    });
  }

  let collapsed_savings: usize = runs.iter().map(|r| (r.run_length - 1) as usize).sum();
  if collapsed_savings > block_len {
    return Err(BosmError::corrupt_header(
      "run table collapses more values than the block contains",
    ));
  }
  let l_prime = block_len - collapsed_savings;
  if k1 + k2 > l_prime {
    return Err(BosmError::corrupt_header(format!(
      "k1+k2 ({}) exceeds collapsed block length {}",
      k1 + k2,
      l_prime,
    )));
  }

  if k1 == 0 && k2 == 0 {
    let bit_width_normal = reader.read_u8()? as u32;
    check_width(bit_width_normal)?;
    let deltas = decode_outliers(reader, l_prime, bit_width_normal)?;
    return Ok(delta_rle::decode(min, &deltas, &runs, block_len));
  }

  let x_l_plus = reader.read_i32()? as i64;
  let x_u_plus = reader.read_i32()? as i64;
  let bit_width_normal = reader.read_u8()? as u32;
  let bit_width_left = reader.read_u8()? as u32;
  let bit_width_right = reader.read_u8()? as u32;
  check_width(bit_width_normal)?;
  check_width(bit_width_left)?;
  check_width(bit_width_right)?;

  let classes: Vec<Class> = if alpha == 0 {
    let mut classes = Vec::with_capacity(l_prime);
    for _ in 0..l_prime {
      if reader.read_bits(1)? == 0 {
        classes.push(Class::Normal);
      } else if reader.read_bits(1)? == 1 {
        classes.push(Class::Left);
      } else {
        classes.push(Class::Right);
      }
    }
    reader.align_to_byte()?;
    classes
  } else {
    let left_positions = decode_outliers(reader, k1, index_width)?;
    let right_positions = decode_outliers(reader, k2, index_width)?;
    let mut classes = vec![Class::Normal; l_prime];
    for &pos in &left_positions {
      let pos = pos as usize;
      if pos >= l_prime {
        return Err(BosmError::corrupt_header("left outlier index out of range"));
      }
      classes[pos] = Class::Left;
    }
    for &pos in &right_positions {
      let pos = pos as usize;
      if pos >= l_prime {
        return Err(BosmError::corrupt_header("right outlier index out of range"));
      }
      classes[pos] = Class::Right;
    }
    classes
  };

  let left_values = decode_outliers(reader, k1, bit_width_left)?;
  let right_values = decode_outliers(reader, k2, bit_width_right)?;
  let normal_values = decode_outliers(reader, l_prime - k1 - k2, bit_width_normal)?;

  let mut li = 0usize;
  let mut ri = 0usize;
  let mut ni = 0usize;
  let mut deltas = Vec::with_capacity(l_prime);
  for c in &classes {
    let d = match c {
      Class::Left => {
        let v = left_values[li];
        li += 1;
        v
      }
      Class::Right => {
        let v = right_values[ri] + x_u_plus as u32;
        ri += 1;
        v
      }
      Class::Normal => {
        let v = normal_values[ni] + x_l_plus as u32;
        ni += 1;
        v
      }
    };
    deltas.push(d);
  }

  Ok(delta_rle::decode(min, &deltas, &runs, block_len))
}

fn check_width(w: u32) -> BosmResult<()> {
  if w == 0 || w > 32 {
    Err(BosmError::corrupt_header(format!(
      "decoded bit width {} out of range",
      w,
    )))
  } else {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn run_width_for(block_size: usize) -> u32 {
    bitwidth(block_size as u32)
  }

  fn index_width_for(block_size: usize) -> u32 {
    bitwidth((block_size - 1) as u32)
  }

  fn roundtrip(raw: &[i32], block_size: usize) -> Vec<i32> {
    let mut buf = vec![0u8; raw.len() * 8 + 64];
    let run_w = run_width_for(block_size);
    let idx_w = index_width_for(block_size);
    {
      let mut writer = BitWriter::new(&mut buf);
      encode_block(&mut writer, raw, run_w, idx_w).unwrap();
    }
    let mut reader = BitReader::new(&buf);
    decode_block(&mut reader, raw.len(), run_w, idx_w).unwrap()
  }

  #[test]
  fn test_s1_constant_run() {
    let raw = vec![7; 16];
    assert_eq!(roundtrip(&raw, 16), raw);
  }

  #[test]
  fn test_s2_all_distinct() {
    let raw: Vec<i32> = (0..8).collect();
    assert_eq!(roundtrip(&raw, 8), raw);
  }

  #[test]
  fn test_s3_one_sided_outlier() {
    let raw = vec![0, 0, 0, 0, 0, 0, 0, 1000];
    assert_eq!(roundtrip(&raw, 8), raw);
  }

  #[test]
  fn test_s4_two_sided_split() {
    let raw = vec![0, 50, 50, 50, 50, 50, 50, 100];
    assert_eq!(roundtrip(&raw, 8), raw);
  }

  #[test]
  fn test_negative_values() {
    let raw = vec![-100, -50, 0, 50, 100, -100, -100, -100, -100, -100, -100, -100, -100];
    assert_eq!(roundtrip(&raw, raw.len()), raw);
  }

  #[test]
  fn test_single_value() {
    let raw = vec![42];
    assert_eq!(roundtrip(&raw, 1), raw);
  }

  #[test]
  fn test_span_wider_than_i32_rejected() {
    let raw = vec![i32::MIN, 0, i32::MAX];
    let mut buf = vec![0u8; raw.len() * 8 + 64];
    let mut writer = BitWriter::new(&mut buf);
    let run_w = run_width_for(raw.len());
    let idx_w = index_width_for(raw.len());
    assert!(encode_block(&mut writer, &raw, run_w, idx_w).is_err());
  }
}
