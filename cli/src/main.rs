use anyhow::Result;
use structopt::StructOpt;

use crate::opt::Opt;

mod bench_cmd;
mod compress_cmd;
mod compressor_registry;
mod csv_ingest;
mod decompress_cmd;
mod opt;

fn main() -> Result<()> {
  let opt = Opt::from_args();
  match opt {
    Opt::Compress(compress_opt) => compress_cmd::compress(compress_opt)?,
    Opt::Decompress(decompress_opt) => decompress_cmd::decompress(decompress_opt)?,
    Opt::Bench(bench_opt) => bench_cmd::bench(bench_opt)?,
  }
  Ok(())
}
