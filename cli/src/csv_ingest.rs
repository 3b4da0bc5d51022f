//! Reads one integer column out of a CSV file. This is the CLI's only
//! supported input format: the codec itself only ever sees `&[i32]`.

use std::fs::File;

use anyhow::{anyhow, Result};

use crate::opt::CsvColumnOpt;

fn find_col_idx(headers: &csv::StringRecord, opt: &CsvColumnOpt) -> Result<usize> {
  match (&opt.col_name, opt.col_idx) {
    (Some(name), None) => headers
      .iter()
      .position(|h| h == name)
      .ok_or_else(|| anyhow!("no column named {} in CSV header", name)),
    (None, Some(idx)) => Ok(idx),
    (None, None) => Ok(0),
    (Some(_), Some(_)) => Err(anyhow!("specify either --col-name or --col-idx, not both")),
  }
}

/// Reads the configured column of `opt.csv_path`, parsing every field as
/// an `i32`.
pub fn read_column(opt: &CsvColumnOpt) -> Result<Vec<i32>> {
  let file = File::open(&opt.csv_path)?;
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(!opt.no_header)
    .from_reader(file);

  let col_idx = if opt.no_header {
    opt.col_idx.unwrap_or(0)
  } else {
    find_col_idx(reader.headers()?, opt)?
  };

  let mut values = Vec::new();
  for record in reader.records() {
    let record = record?;
    let field = record
      .get(col_idx)
      .ok_or_else(|| anyhow!("column index {} out of range for record {:?}", col_idx, record))?;
    values.push(
      field
        .trim()
        .parse::<i32>()
        .map_err(|e| anyhow!("could not parse {:?} as i32: {}", field, e))?,
    );
  }
  Ok(values)
}
