use std::fs;

use anyhow::Result;

use crate::opt::DecompressOpt;

pub fn decompress(opt: DecompressOpt) -> Result<()> {
  let bytes = fs::read(&opt.in_path)?;
  let values = bosm::decompress(&bytes)?;
  for v in &values {
    println!("{}", v);
  }
  Ok(())
}
