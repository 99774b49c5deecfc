use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::{Result, VdsearchError};
use crate::models::{Dataset, HitRecord, Strand};

// column positions in `cmsearch --tblout`
const COL_SEQ_ID: usize = 0;
const COL_ACCESSION: usize = 1;
const COL_PROFILE: usize = 2;
const COL_FROM: usize = 7;
const COL_TO: usize = 8;
const COL_STRAND: usize = 9;
const COL_SCORE: usize = 14;
const COL_EVALUE: usize = 15;
const COL_INC: usize = 16;
const MIN_FIELDS: usize = COL_INC + 1;

/// Tabular output of an Infernal search.
pub struct InfernalTblout {
    pub path: PathBuf,
}

impl Dataset for InfernalTblout {
    type Output = Vec<HitRecord>;

    fn load(&self) -> Result<Vec<HitRecord>> {
        read_tblout(&self.path)
    }
}

pub fn read_tblout(path: &Path) -> Result<Vec<HitRecord>> {
    info!("Reading Infernal tabular output from {}", path.display());
    let file = File::open(path).map_err(|e| VdsearchError::unreadable(path, e))?;
    let hits = parse_tblout(BufReader::new(file), path)?;
    debug!("Parsed {} ribozyme hits", hits.len());
    Ok(hits)
}

pub fn parse_tblout<R: BufRead>(reader: R, source: &Path) -> Result<Vec<HitRecord>> {
    let mut hits = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| VdsearchError::unreadable(source, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            return Err(VdsearchError::format(
                source,
                line_no,
                format!("expected at least {} columns, found {}", MIN_FIELDS, fields.len()),
            ));
        }

        let hit = HitRecord {
            sequence_id: fields[COL_SEQ_ID].to_string(),
            accession: fields[COL_ACCESSION].to_string(),
            profile_name: fields[COL_PROFILE].to_string(),
            from: parse_field(&fields, COL_FROM, "seq from", source, line_no)?,
            to: parse_field(&fields, COL_TO, "seq to", source, line_no)?,
            strand: fields[COL_STRAND]
                .parse::<Strand>()
                .map_err(|e| VdsearchError::format(source, line_no, e))?,
            score: parse_field(&fields, COL_SCORE, "score", source, line_no)?,
            evalue: parse_field(&fields, COL_EVALUE, "E-value", source, line_no)?,
            inclusion_flag: fields[COL_INC].to_string(),
        };
        hits.push(hit);
    }

    Ok(hits)
}

fn parse_field<T: FromStr>(fields: &[&str], col: usize, what: &str, source: &Path, line_no: usize) -> Result<T> {
    fields[col].parse::<T>().map_err(|_| {
        VdsearchError::format(source, line_no, format!("invalid {} `{}` in column {}", what, fields[col], col + 1))
    })
}
