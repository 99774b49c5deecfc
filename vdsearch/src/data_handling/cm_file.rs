use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, VdsearchError};
use crate::models::{CutoffKind, CutoffSet, CutoffTable, Dataset};

/// Every model in an Infernal CM file opens with a `INFERNAL1/a [...]` line.
const BLOCK_SENTINEL: &str = "INFERNAL";

/// A covariance model file (e.g. the bundled ribozyme CMs).
pub struct CmFile {
    pub path: PathBuf,
}

impl Dataset for CmFile {
    type Output = CutoffTable;

    fn load(&self) -> Result<CutoffTable> {
        load_cutoffs(&self.path)
    }
}

/// Read the GA/TC/NC cutoffs of every model in `path`.
pub fn load_cutoffs(path: &Path) -> Result<CutoffTable> {
    info!("Reading model cutoffs from {}", path.display());
    let file = File::open(path).map_err(|e| VdsearchError::unreadable(path, e))?;
    let cutoffs = parse_cutoffs(BufReader::new(file), path)?;
    debug!("Loaded cutoffs for {} models", cutoffs.len());
    Ok(cutoffs)
}

/// In-progress model block.
#[derive(Default)]
struct Block {
    name: Option<String>,
    cutoffs: CutoffSet,
}

impl Block {
    fn flush_into(self, table: &mut CutoffTable) {
        match self.name {
            Some(name) => {
                table.insert(name, self.cutoffs);
            }
            None => debug!("Skipping model block without a NAME line"),
        }
    }
}

pub fn parse_cutoffs<R: BufRead>(reader: R, source: &Path) -> Result<CutoffTable> {
    let mut table = CutoffTable::default();
    // `None` until the first line, so a leading sentinel does not flush an empty block
    let mut block: Option<Block> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| VdsearchError::unreadable(source, e))?;

        if line.contains(BLOCK_SENTINEL) {
            if let Some(done) = block.take() {
                done.flush_into(&mut table);
            }
            block = Some(Block::default());
            continue;
        }

        let mut fields = line.split_whitespace();
        let keyword = match fields.next() {
            Some(k) => k,
            None => continue,
        };

        let kind = match keyword {
            "NAME" => {
                let name = fields
                    .next()
                    .ok_or_else(|| VdsearchError::format(source, line_no, "NAME line without a value"))?;
                block.get_or_insert_with(Block::default).name = Some(name.to_string());
                continue;
            }
            "GA" => CutoffKind::GA,
            "TC" => CutoffKind::TC,
            "NC" => CutoffKind::NC,
            _ => continue,
        };

        let raw = fields.next().ok_or_else(|| {
            VdsearchError::format(source, line_no, format!("{} line without a value", keyword))
        })?;
        let value = raw.trim_end_matches(';').parse::<f64>().map_err(|_| {
            VdsearchError::format(source, line_no, format!("invalid {} cutoff `{}`", keyword, raw))
        })?;
        block.get_or_insert_with(Block::default).cutoffs.set(kind, value);
    }

    // last model in the file has no sentinel after it
    if let Some(done) = block.take() {
        done.flush_into(&mut table);
    }

    Ok(table)
}
