use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::analysis::ribozyme_filter::ClassificationResult;
use crate::config::ClassificationConfig;
use crate::error::Result;
use crate::helper_functions::count_sequences;
use crate::models::{HitRecord, Polarity, TaggedHit};

/// Distinct viroid-like sequences per ribozyme model, split by polarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RibozymeSummary {
    pub ribozyme: String,
    pub plus_only: usize,
    pub plus_and_minus: usize,
}

pub fn summarize_by_ribozyme(rows: &[TaggedHit]) -> Vec<RibozymeSummary> {
    let mut per_model: BTreeMap<&str, (BTreeSet<&str>, BTreeSet<&str>)> = BTreeMap::new();

    for row in rows {
        let (single, dual) = per_model.entry(row.hit.profile_name.as_str()).or_default();
        match row.polarity {
            Polarity::Single => single.insert(row.hit.sequence_id.as_str()),
            Polarity::Dual => dual.insert(row.hit.sequence_id.as_str()),
        };
    }

    per_model
        .into_iter()
        .map(|(ribozyme, (single, dual))| RibozymeSummary {
            ribozyme: ribozyme.to_string(),
            plus_only: single.len(),
            plus_and_minus: dual.len(),
        })
        .collect()
}

/// Tab-separated summary with a closing `Total` row of distinct sequences.
pub fn write_summary_tsv(summary: &[RibozymeSummary], result: &ClassificationResult, path: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?;
    for row in summary {
        wtr.serialize(row)?;
    }
    wtr.serialize(RibozymeSummary {
        ribozyme: "Total".to_string(),
        plus_only: result.single_polarity.len(),
        plus_and_minus: result.dual_polarity.len(),
    })?;
    wtr.flush()?;
    Ok(())
}

/// Counts of one run, together with the thresholds that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub hits_analyzed: usize,
    pub sequences_analyzed: usize,
    pub viroid_like: usize,
    pub single_polarity: usize,
    pub dual_polarity: usize,
    pub config: ClassificationConfig,
}

impl RunReport {
    pub fn new(hits: &[HitRecord], result: Option<&ClassificationResult>, config: &ClassificationConfig) -> Self {
        let (single, dual) = result
            .map(|r| (r.single_polarity.len(), r.dual_polarity.len()))
            .unwrap_or((0, 0));

        Self {
            hits_analyzed: hits.len(),
            sequences_analyzed: count_sequences(hits),
            viroid_like: single + dual,
            single_polarity: single,
            dual_polarity: dual,
            config: *config,
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
