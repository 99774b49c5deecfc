use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::models::HitRecord;

/// Number of distinct sequence ids among `hits`.
pub fn count_sequences(hits: &[HitRecord]) -> usize {
    hits.iter()
        .map(|h| h.sequence_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

pub fn dataframe_to_tsv(df: &mut DataFrame, path: &Path) -> Result<()> {
    debug!("Writing {} rows to {}", df.height(), path.display());
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b'\t')
        .finish(df)?;
    Ok(())
}

/// Write one id per line, the format `seqkit grep -f` expects.
pub fn write_ids(ids: &[String], path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for id in ids {
        writeln!(writer, "{}", id)?;
    }
    writer.flush()?;
    Ok(())
}
