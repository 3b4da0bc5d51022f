use std::fs;

use anyhow::Result;

use crate::csv_ingest;
use crate::opt::CompressOpt;

pub fn compress(opt: CompressOpt) -> Result<()> {
  let values = csv_ingest::read_column(&opt.csv)?;
  let compressed = bosm::compress(&values, opt.block_size)?;
  println!(
    "read {} values, compressed to {} bytes ({:.2} bits/value)",
    values.len(),
    compressed.len(),
    8.0 * compressed.len() as f64 / values.len().max(1) as f64,
  );
  fs::write(&opt.out_path, compressed)?;
  Ok(())
}
