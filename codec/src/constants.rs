/// Largest `block_size` the wire format supports: `k1` has only 15 bits
/// in the block header's `k_byte` field, so a block can hold at most
/// `2^15 - 1` left outliers, and a block cannot itself be longer than
/// that without risking `k1` overflow in a pathological all-left-outlier
/// block.
pub const MAX_BLOCK_SIZE: u32 = (1 << 15) - 1;

/// Stream frame header: `u32 total_length` + `u32 block_size`.
pub const STREAM_HEADER_BYTES: usize = 8;

/// Tail lengths at or below this are emitted as raw big-endian `i32`
/// literals instead of a one-off `BlockCodec` block.
pub const MAX_LITERAL_TAIL: usize = 3;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_max_block_size_fits_k1_field() {
    assert_eq!(MAX_BLOCK_SIZE, 32767);
  }
}
