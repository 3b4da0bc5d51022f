//! Per-block minimum subtraction plus a run-length pass over the
//! resulting deltas.

use crate::errors::{BosmError, BosmResult};

/// A collapsed run of `run_length` equal deltas, referring to positions in
/// the *uncollapsed* (original) block. `run_length >= 8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatRun {
  pub start_index: u32,
  pub run_length: u32,
}

/// Output of the delta + run-length pass over one raw block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaBlock {
  pub min: i32,
  pub max_delta: u32,
  pub deltas: Vec<u32>,
  pub runs: Vec<RepeatRun>,
}

impl DeltaBlock {
  pub fn collapsed_len(&self) -> usize {
    self.deltas.len()
  }
}

const RUN_THRESHOLD: u32 = 7;

/// Flushes one pending run of `run` copies of `pre_delta` starting at
/// `run_start`, collapsing it into a [`RepeatRun`] when it exceeds
/// [`RUN_THRESHOLD`] and inlining it into `deltas` otherwise. Applied
/// identically whether the run ends because a different value followed
/// it or because the block itself ended.
fn flush_run(deltas: &mut Vec<u32>, runs: &mut Vec<RepeatRun>, pre_delta: u32, run_start: u32, run: u32) {
  if run > RUN_THRESHOLD {
    runs.push(RepeatRun {
      start_index: run_start,
      run_length: run,
    });
    deltas.push(pre_delta);
  } else {
    for _ in 0..run {
      deltas.push(pre_delta);
    }
  }
}

/// Computes `(min, deltas, runs)` for `raw`, collapsing runs of more than
/// [`RUN_THRESHOLD`] equal deltas into a single emitted value plus a
/// [`RepeatRun`] side-table entry. The run ending the block is subject
/// to the same threshold as any other run.
///
/// Rejects a block whose `max - min` does not fit in `i32`, per the
/// `RawBlock` invariant: such a span cannot be reconstructed losslessly
/// and is out of scope for this codec.
pub fn encode(raw: &[i32]) -> BosmResult<DeltaBlock> {
  assert!(!raw.is_empty(), "encode called on an empty block");

  let min = *raw.iter().min().unwrap();
  let max = *raw.iter().max().unwrap();
  let span = max as i64 - min as i64;
  if span > i32::MAX as i64 {
    return Err(BosmError::invalid_input(format!(
      "block span {} (max {} - min {}) does not fit in i32",
      span, max, min,
    )));
  }
  let max_delta = span as u32;

  let mut deltas = Vec::with_capacity(raw.len());
  let mut runs = Vec::new();

  let mut pre_delta = (raw[0] as i64 - min as i64) as u32;
  let mut run_start = 0u32;
  let mut run = 1u32;

  for j in 1..raw.len() {
    let d = (raw[j] as i64 - min as i64) as u32;
    if d == pre_delta {
      run += 1;
    } else {
      flush_run(&mut deltas, &mut runs, pre_delta, run_start, run);
      run = 1;
      run_start = j as u32;
      pre_delta = d;
    }
  }

  flush_run(&mut deltas, &mut runs, pre_delta, run_start, run);

  Ok(DeltaBlock {
    min,
    max_delta,
    deltas,
    runs,
  })
}

/// Expands `deltas` and `runs` back into the `len`-long sequence of raw
/// values, adding `min` back in.
pub fn decode(min: i32, deltas: &[u32], runs: &[RepeatRun], len: usize) -> Vec<i32> {
  let mut res = Vec::with_capacity(len);
  let mut repeat_i = 0usize;
  let mut cur_i = 0u32;
  let mut delta_i = 0usize;

  while res.len() < len {
    let d = deltas[delta_i];
    // widen before narrowing: `min` and `d` as bare i32/u32 can each sit
    // at an extreme of their range, and `min + d` overflows i32 if added
    // directly.
    let value = ((min as i64) + (d as i64)) as i32;
    if repeat_i < runs.len() && cur_i == runs[repeat_i].start_index {
      for _ in 0..runs[repeat_i].run_length {
        res.push(value);
        cur_i += 1;
      }
      repeat_i += 1;
      delta_i += 1;
    } else {
      res.push(value);
      cur_i += 1;
      delta_i += 1;
    }
  }

  res
}
