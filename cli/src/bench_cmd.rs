//! Thin timing harness: compresses and decompresses the same column with
//! each requested codec and reports size and wall-clock time, mirroring
//! the upstream benchmark's per-codec `warmup_iter` / `stats_iter` split
//! at far smaller scale.

use std::time::Instant;

use anyhow::Result;

use crate::compressor_registry::CodecName;
use crate::csv_ingest;
use crate::opt::BenchOpt;

struct Stat {
  codec: CodecName,
  compressed_bytes: usize,
  avg_compress: std::time::Duration,
  avg_decompress: std::time::Duration,
}

pub fn bench(opt: BenchOpt) -> Result<()> {
  let values = csv_ingest::read_column(&opt.csv)?;
  let codecs = if opt.codecs.is_empty() {
    vec![
      CodecName::Bosm,
      CodecName::Snappy,
      CodecName::Lz4,
      CodecName::Gzip,
      CodecName::Zstd,
      CodecName::Lzma2,
    ]
  } else {
    opt.codecs.clone()
  };

  let mut stats = Vec::new();
  for codec in codecs {
    let mut compressed = Vec::new();
    let mut total_compress = std::time::Duration::ZERO;
    let mut total_decompress = std::time::Duration::ZERO;
    for _ in 0..opt.iters.max(1) {
      let t = Instant::now();
      compressed = codec.compress(&values, opt.block_size)?;
      total_compress += t.elapsed();

      let t = Instant::now();
      let roundtripped = codec.decompress(&compressed)?;
      total_decompress += t.elapsed();

      anyhow::ensure!(
        roundtripped == values,
        "{} failed to round-trip the input",
        codec.name(),
      );
    }
    stats.push(Stat {
      codec,
      compressed_bytes: compressed.len(),
      avg_compress: total_compress / opt.iters.max(1) as u32,
      avg_decompress: total_decompress / opt.iters.max(1) as u32,
    });
  }

  println!(
    "{} values from {:?}",
    values.len(),
    opt.csv.csv_path,
  );
  for stat in &stats {
    println!(
      "{:>8}: {:>10} bytes ({:>6.2} bits/value)  compress {:>10?}  decompress {:>10?}",
      stat.codec.name(),
      stat.compressed_bytes,
      8.0 * stat.compressed_bytes as f64 / values.len().max(1) as f64,
      stat.avg_compress,
      stat.avg_decompress,
    );
  }
  Ok(())
}
