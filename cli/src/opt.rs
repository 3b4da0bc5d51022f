use std::path::PathBuf;

use structopt::StructOpt;

use crate::compressor_registry::CodecName;

#[derive(Clone, Debug, StructOpt)]
#[structopt(name = "bosm", about = "Compress, decompress, and benchmark integer CSV columns")]
pub enum Opt {
  #[structopt(name = "compress")]
  Compress(CompressOpt),
  #[structopt(name = "decompress")]
  Decompress(DecompressOpt),
  #[structopt(name = "bench")]
  Bench(BenchOpt),
}

#[derive(Clone, Debug, StructOpt)]
pub struct CsvColumnOpt {
  #[structopt(long = "csv")]
  pub csv_path: PathBuf,
  #[structopt(long = "col-name")]
  pub col_name: Option<String>,
  #[structopt(long = "col-idx")]
  pub col_idx: Option<usize>,
  #[structopt(long = "no-header")]
  pub no_header: bool,
}

#[derive(Clone, Debug, StructOpt)]
pub struct CompressOpt {
  #[structopt(flatten)]
  pub csv: CsvColumnOpt,
  #[structopt(long = "block-size", default_value = "1024")]
  pub block_size: u32,
  #[structopt(long = "out", parse(from_os_str))]
  pub out_path: PathBuf,
}

#[derive(Clone, Debug, StructOpt)]
pub struct DecompressOpt {
  #[structopt(parse(from_os_str))]
  pub in_path: PathBuf,
}

#[derive(Clone, Debug, StructOpt)]
pub struct BenchOpt {
  #[structopt(flatten)]
  pub csv: CsvColumnOpt,
  #[structopt(long = "block-size", default_value = "1024")]
  pub block_size: u32,
  #[structopt(long = "codec")]
  pub codecs: Vec<CodecName>,
  #[structopt(long = "iters", default_value = "3")]
  pub iters: usize,
}
