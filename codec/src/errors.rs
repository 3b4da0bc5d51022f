use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

/// The different kinds of errors produced by `bosm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
  /// The caller-supplied output buffer was too small to hold the encoded
  /// stream.
  InsufficientOutputBuffer,
  /// A decoded header field was out of range, inconsistent with other
  /// header fields, or otherwise could not have been produced by this
  /// encoder.
  CorruptHeader,
  /// The decoder's cursor would have to advance past the end of the input
  /// to satisfy the current read.
  TruncatedInput,
  /// The encoder's input violated a precondition of the codec (e.g. a
  /// block's `max - min` does not fit in `u32`, or `block_size` exceeds
  /// the codec's limit).
  InvalidInput,
}

/// The error type used in results for all `bosm` functionality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BosmError {
  pub kind: ErrorKind,
  pub message: String,
}

impl BosmError {
  pub(crate) fn new<S: AsRef<str>>(kind: ErrorKind, message: S) -> Self {
    BosmError {
      kind,
      message: message.as_ref().to_string(),
    }
  }

  pub(crate) fn insufficient_output<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::InsufficientOutputBuffer, message)
  }

  pub(crate) fn corrupt_header<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::CorruptHeader, message)
  }

  pub(crate) fn truncated_input<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::TruncatedInput, message)
  }

  pub(crate) fn truncated_recipe(name: &str, bits_wanted: u32, bit_idx: usize, total_bits: usize) -> Self {
    Self::truncated_input(format!(
      "{}: cannot read {} bits at bit idx {} out of {}",
      name, bits_wanted, bit_idx, total_bits,
    ))
  }

  pub(crate) fn invalid_input<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::InvalidInput, message)
  }
}

impl Display for BosmError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "bosm {:?} error: {}", self.kind, &self.message)
  }
}

impl Error for BosmError {}

pub type BosmResult<T> = Result<T, BosmError>;
