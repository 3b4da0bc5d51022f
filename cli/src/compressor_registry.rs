//! Dispatches a named general-purpose compressor by tag, the way the
//! upstream benchmark harness dispatches its `CodecConfig`s: compression
//! of the codec under test lives elsewhere (in `bosm` itself); this
//! module only exists so the CLI can put bosm's numbers next to a few
//! familiar byte-oriented codecs for comparison.

use std::convert::TryInto;
use std::io::{Read, Write};
use std::str::FromStr;

use anyhow::{anyhow, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodecName {
  Bosm,
  Snappy,
  Lz4,
  Gzip,
  Zstd,
  Lzma2,
}

impl FromStr for CodecName {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "bosm" => Ok(CodecName::Bosm),
      "snappy" => Ok(CodecName::Snappy),
      "lz4" => Ok(CodecName::Lz4),
      "gzip" => Ok(CodecName::Gzip),
      "zstd" => Ok(CodecName::Zstd),
      "lzma2" => Ok(CodecName::Lzma2),
      other => Err(anyhow!("unknown codec: {}", other)),
    }
  }
}

impl CodecName {
  pub fn name(&self) -> &'static str {
    match self {
      CodecName::Bosm => "bosm",
      CodecName::Snappy => "snappy",
      CodecName::Lz4 => "lz4",
      CodecName::Gzip => "gzip",
      CodecName::Zstd => "zstd",
      CodecName::Lzma2 => "lzma2",
    }
  }

  pub fn compress(&self, values: &[i32], block_size: u32) -> Result<Vec<u8>> {
    match self {
      CodecName::Bosm => Ok(bosm::compress(values, block_size)?),
      CodecName::Snappy => Ok(compress_snappy(values)),
      CodecName::Lz4 => Ok(compress_lz4(values)),
      CodecName::Gzip => Ok(compress_gzip(values)?),
      CodecName::Zstd => Ok(compress_zstd(values)?),
      CodecName::Lzma2 => Ok(compress_lzma2(values)?),
    }
  }

  pub fn decompress(&self, bytes: &[u8]) -> Result<Vec<i32>> {
    match self {
      CodecName::Bosm => Ok(bosm::decompress(bytes)?),
      CodecName::Snappy => Ok(decompress_snappy(bytes)),
      CodecName::Lz4 => Ok(decompress_lz4(bytes)),
      CodecName::Gzip => Ok(decompress_gzip(bytes)?),
      CodecName::Zstd => Ok(decompress_zstd(bytes)?),
      CodecName::Lzma2 => Ok(decompress_lzma2(bytes)?),
    }
  }
}

fn values_to_bytes(values: &[i32]) -> Vec<u8> {
  let mut res = Vec::with_capacity(4 + values.len() * 4);
  res.extend((values.len() as u32).to_le_bytes());
  for &v in values {
    res.extend(v.to_le_bytes());
  }
  res
}

fn bytes_to_values(raw: &[u8]) -> Vec<i32> {
  let len = u32::from_le_bytes(raw[0..4].try_into().unwrap()) as usize;
  let mut res = Vec::with_capacity(len);
  for chunk in raw[4..].chunks_exact(4) {
    res.push(i32::from_le_bytes(chunk.try_into().unwrap()));
  }
  res
}

fn compress_snappy(values: &[i32]) -> Vec<u8> {
  let raw = values_to_bytes(values);
  let mut wtr = snap::write::FrameEncoder::new(Vec::new());
  wtr.write_all(&raw).expect("snappy encoder write failed");
  wtr.into_inner().expect("snappy encoder flush failed")
}

fn decompress_snappy(bytes: &[u8]) -> Vec<i32> {
  let mut rdr = snap::read::FrameDecoder::new(bytes);
  let mut raw = Vec::new();
  rdr.read_to_end(&mut raw).expect("snappy decoder read failed");
  bytes_to_values(&raw)
}

fn compress_lz4(values: &[i32]) -> Vec<u8> {
  let raw = values_to_bytes(values);
  lz4_flex::compress_prepend_size(&raw)
}

fn decompress_lz4(bytes: &[u8]) -> Vec<i32> {
  let raw = lz4_flex::decompress_size_prepended(bytes).expect("lz4 decompress failed");
  bytes_to_values(&raw)
}

fn compress_gzip(values: &[i32]) -> Result<Vec<u8>> {
  use flate2::write::GzEncoder;
  use flate2::Compression;
  let raw = values_to_bytes(values);
  let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
  encoder.write_all(&raw)?;
  Ok(encoder.finish()?)
}

fn decompress_gzip(bytes: &[u8]) -> Result<Vec<i32>> {
  use flate2::read::GzDecoder;
  let mut decoder = GzDecoder::new(bytes);
  let mut raw = Vec::new();
  decoder.read_to_end(&mut raw)?;
  Ok(bytes_to_values(&raw))
}

fn compress_zstd(values: &[i32]) -> Result<Vec<u8>> {
  let raw = values_to_bytes(values);
  Ok(zstd::encode_all(raw.as_slice(), 0)?)
}

fn decompress_zstd(bytes: &[u8]) -> Result<Vec<i32>> {
  let raw = zstd::decode_all(bytes)?;
  Ok(bytes_to_values(&raw))
}

fn compress_lzma2(values: &[i32]) -> Result<Vec<u8>> {
  use xz2::write::XzEncoder;
  let raw = values_to_bytes(values);
  let mut encoder = XzEncoder::new(Vec::new(), 6);
  encoder.write_all(&raw)?;
  Ok(encoder.finish()?)
}

fn decompress_lzma2(bytes: &[u8]) -> Result<Vec<i32>> {
  use xz2::read::XzDecoder;
  let mut decoder = XzDecoder::new(bytes);
  let mut raw = Vec::new();
  decoder.read_to_end(&mut raw)?;
  Ok(bytes_to_values(&raw))
}
