//! A self-contained integer block codec: per-block minimum-subtraction
//! and run-length collapsing, a median-centered outlier split chosen by
//! exhaustive bit-cost search, and a two-discipline bit-packing layer
//! underneath a block/stream framing format.
//!
//! The entry points are [`compress`] / [`compress_into`] and
//! [`decompress`]; see [`stream_codec`] for the on-wire frame they
//! produce and consume.
#![allow(clippy::needless_range_loop)]

pub use errors::{BosmError, BosmResult, ErrorKind};
pub use stream_codec::max_encoded_len;

mod bit_io;
mod bits;
mod block_codec;
mod constants;
mod delta_rle;
pub mod errors;
mod fixed_width_packer;
mod median_split;
mod stream_codec;

#[cfg(test)]
mod tests;

/// Encodes `values` into a freshly allocated buffer, choosing `block_size`
/// values per block.
pub fn compress(values: &[i32], block_size: u32) -> BosmResult<Vec<u8>> {
  stream_codec::encode(values, block_size)
}

/// Encodes `values` into the caller-supplied `out` buffer, returning the
/// number of bytes written. `out` must be at least
/// [`max_encoded_len`]`(values.len(), block_size)` bytes long.
pub fn compress_into(values: &[i32], block_size: u32, out: &mut [u8]) -> BosmResult<usize> {
  stream_codec::encode_into(values, block_size, out)
}

/// Decodes a buffer produced by [`compress`] / [`compress_into`].
pub fn decompress(bytes: &[u8]) -> BosmResult<Vec<i32>> {
  stream_codec::decode(bytes)
}
