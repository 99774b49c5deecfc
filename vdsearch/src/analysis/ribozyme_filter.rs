//! Decide which sequences are viroid-like from covariance-model ribozyme hits.
//!
//! Hits are grouped by ribozyme model. Within each group a hit can count as
//! strand evidence (plus or minus) and/or as significant, based on the model's
//! score cutoff and on its e-value. A sequence with evidence on both strands is
//! dual polarity; any other significant sequence is single polarity.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::analysis::evidence::EvidenceSets;
use crate::analysis::summary::{summarize_by_ribozyme, write_summary_tsv, RibozymeSummary, RunReport};
use crate::config::ClassificationConfig;
use crate::data_handling::cm_file::CmFile;
use crate::data_handling::tblout::InfernalTblout;
use crate::error::Result;
use crate::helper_functions::{count_sequences, dataframe_to_tsv, write_ids};
use crate::models::{CutoffTable, Dataset, HitRecord, Polarity, TaggedHit};

const NO_RIBOZYMES: &str = "No ribozymes present to analyze.";
const NO_VIROID_LIKES: &str = "No viroid-like sequences found by ribozyme search.";

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub evidence: EvidenceSets,
    pub single_polarity: BTreeSet<String>,
    pub dual_polarity: BTreeSet<String>,
    /// Rows of single polarity sequences, in input order.
    pub single_rows: Vec<TaggedHit>,
    /// Rows of dual polarity sequences, in input order.
    pub dual_rows: Vec<TaggedHit>,
    /// `single_rows` and `dual_rows` together, in input order.
    pub viroid_like_rows: Vec<TaggedHit>,
    pub hits_analyzed: usize,
    pub sequences_analyzed: usize,
}

impl ClassificationResult {
    pub fn viroid_like_count(&self) -> usize {
        self.single_polarity.len() + self.dual_polarity.len()
    }

    /// Sorted ids of every viroid-like sequence.
    pub fn viroid_like_ids(&self) -> Vec<String> {
        self.single_polarity
            .union(&self.dual_polarity)
            .cloned()
            .collect()
    }

    /// Viroid-like rows ordered by ascending e-value; ties keep input order.
    pub fn sorted_by_evalue(&self) -> Vec<&TaggedHit> {
        let mut rows: Vec<&TaggedHit> = self.viroid_like_rows.iter().collect();
        rows.sort_by(|a, b| a.hit.evalue.total_cmp(&b.hit.evalue));
        rows
    }

    pub fn summary(&self) -> Vec<RibozymeSummary> {
        summarize_by_ribozyme(&self.viroid_like_rows)
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        hits_to_dataframe(&self.sorted_by_evalue())
    }

    /// Write the viroid-like rows as a TSV sorted by e-value.
    pub fn write_tsv(&self, path: &Path) -> Result<()> {
        if self.viroid_like_rows.is_empty() {
            return Ok(());
        }
        let mut df = self.to_dataframe()?;
        dataframe_to_tsv(&mut df, path)
    }
}

pub fn hits_to_dataframe(rows: &[&TaggedHit]) -> PolarsResult<DataFrame> {
    let seq_id: Vec<String> = rows.iter().map(|r| r.hit.sequence_id.clone()).collect();
    let accession: Vec<String> = rows.iter().map(|r| r.hit.accession.clone()).collect();
    let ribozyme: Vec<String> = rows.iter().map(|r| r.hit.profile_name.clone()).collect();
    let from: Vec<u64> = rows.iter().map(|r| r.hit.from).collect();
    let to: Vec<u64> = rows.iter().map(|r| r.hit.to).collect();
    let strand: Vec<String> = rows.iter().map(|r| r.hit.strand.to_string()).collect();
    let score: Vec<f64> = rows.iter().map(|r| r.hit.score).collect();
    let evalue: Vec<f64> = rows.iter().map(|r| r.hit.evalue).collect();
    let inc: Vec<String> = rows.iter().map(|r| r.hit.inclusion_flag.clone()).collect();
    let polarity: Vec<&str> = rows.iter().map(|r| r.polarity.label()).collect();

    DataFrame::new(vec![
        Column::from(Series::new(PlSmallStr::from("seq_id"), seq_id)),
        Column::from(Series::new(PlSmallStr::from("accession"), accession)),
        Column::from(Series::new(PlSmallStr::from("ribozyme"), ribozyme)),
        Column::from(Series::new(PlSmallStr::from("from"), from)),
        Column::from(Series::new(PlSmallStr::from("to"), to)),
        Column::from(Series::new(PlSmallStr::from("strand"), strand)),
        Column::from(Series::new(PlSmallStr::from("score"), score)),
        Column::from(Series::new(PlSmallStr::from("evalue"), evalue)),
        Column::from(Series::new(PlSmallStr::from("inc"), inc)),
        Column::from(Series::new(PlSmallStr::from("Polarity"), polarity)),
    ])
}

/// Classify sequences from their ribozyme hits.
///
/// Returns `None` when there is nothing to analyze or when no sequence turns
/// out viroid-like. Neither case is an error.
pub fn classify(
    hits: &[HitRecord],
    cutoffs: &CutoffTable,
    config: &ClassificationConfig,
) -> Option<ClassificationResult> {
    if hits.is_empty() {
        info!("{}", NO_RIBOZYMES);
        return None;
    }

    let sequences_analyzed = count_sequences(hits);
    info!(
        "Analyzing {} ribozymes in {} sequences to find viroid-like sequences...",
        hits.len(),
        sequences_analyzed
    );

    let use_cutoffs = config.use_cutoff_filter && !cutoffs.is_empty();
    if config.use_cutoff_filter && cutoffs.is_empty() {
        warn!("CM cutoff filter requested but no cutoffs were loaded; score cutoffs are ignored.");
    }

    let groups = group_by_profile(hits);
    let evidence = groups
        .par_iter()
        .map(|(profile, rows)| evaluate_group(profile, rows, cutoffs, config, use_cutoffs))
        .reduce(EvidenceSets::default, EvidenceSets::union);

    let dual_polarity = evidence.dual_polarity();
    let single_polarity = evidence.single_polarity();

    if dual_polarity.is_empty() && single_polarity.is_empty() {
        info!("{}", NO_VIROID_LIKES);
        return None;
    }

    info!(
        "Found {} viroid-like sequences. {} with one ribozyme, {} with two ribozymes.",
        single_polarity.len() + dual_polarity.len(),
        single_polarity.len(),
        dual_polarity.len()
    );
    debug!("Generating output tables...");

    let mut single_rows = Vec::new();
    let mut dual_rows = Vec::new();
    let mut viroid_like_rows = Vec::new();

    for hit in hits {
        let polarity = if dual_polarity.contains(&hit.sequence_id) {
            Polarity::Dual
        } else if single_polarity.contains(&hit.sequence_id) {
            Polarity::Single
        } else {
            continue;
        };

        let tagged = TaggedHit { hit: hit.clone(), polarity };
        match polarity {
            Polarity::Single => single_rows.push(tagged.clone()),
            Polarity::Dual => dual_rows.push(tagged.clone()),
        }
        viroid_like_rows.push(tagged);
    }

    Some(ClassificationResult {
        evidence,
        single_polarity,
        dual_polarity,
        single_rows,
        dual_rows,
        viroid_like_rows,
        hits_analyzed: hits.len(),
        sequences_analyzed,
    })
}

fn group_by_profile(hits: &[HitRecord]) -> BTreeMap<&str, Vec<&HitRecord>> {
    let mut groups: BTreeMap<&str, Vec<&HitRecord>> = BTreeMap::new();
    for hit in hits {
        groups.entry(hit.profile_name.as_str()).or_default().push(hit);
    }
    groups
}

/// Evidence contributed by the hits of a single ribozyme model.
fn evaluate_group(
    profile: &str,
    rows: &[&HitRecord],
    cutoffs: &CutoffTable,
    config: &ClassificationConfig,
    use_cutoffs: bool,
) -> EvidenceSets {
    let mut evidence = EvidenceSets::default();

    debug!(
        "Analyzing {}: {} hits, {} significant.",
        profile,
        rows.len(),
        rows.iter().filter(|h| h.evalue < config.max_evalue).count()
    );

    if use_cutoffs {
        match cutoffs.cutoff(profile, config.cutoff_kind) {
            Ok(cutoff) => {
                for hit in rows.iter().filter(|h| h.score > cutoff) {
                    evidence.add_strand_hit(hit.strand, &hit.sequence_id);
                    evidence.add_significant_hit(&hit.sequence_id);
                }
            }
            Err(e) => warn!("{}; skipping score cutoffs for its hits", e),
        }
    }

    if config.use_evalue_filter {
        let strand_threshold = config.strand_evalue_threshold();
        for hit in rows {
            if hit.evalue < strand_threshold {
                evidence.add_strand_hit(hit.strand, &hit.sequence_id);
            }
            if hit.evalue < config.max_evalue {
                evidence.add_significant_hit(&hit.sequence_id);
            }
        }
    }

    evidence
}

/// Inputs and requested outputs of one `ribozyme-filter` run.
#[derive(Debug, Clone, Default)]
pub struct RibozymeFilterOptions {
    pub infernal_tblout: PathBuf,
    pub output_tsv: Option<PathBuf>,
    pub cm_file: Option<PathBuf>,
    pub config: ClassificationConfig,
    pub summary_tsv: Option<PathBuf>,
    pub ids_out: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
}

/// Read the hit table and model cutoffs, classify, and write the requested outputs.
pub fn ribozyme_filter(opts: &RibozymeFilterOptions) -> Result<Option<ClassificationResult>> {
    opts.config.validate()?;

    let hits = InfernalTblout { path: opts.infernal_tblout.clone() }.load()?;

    let result = if hits.is_empty() {
        info!("{}", NO_RIBOZYMES);
        None
    } else {
        let cutoffs = match (&opts.cm_file, opts.config.use_cutoff_filter) {
            (Some(path), true) => CmFile { path: path.clone() }.load()?,
            (None, true) => {
                warn!("CM cutoffs requested but no CM file was given.");
                CutoffTable::default()
            }
            (_, false) => CutoffTable::default(),
        };
        classify(&hits, &cutoffs, &opts.config)
    };

    if let Some(result) = &result {
        if let Some(path) = &opts.output_tsv {
            result.write_tsv(path)?;
            info!("Wrote ribozyme data for viroid-like sequences to {}", path.display());
        }

        if let Some(path) = &opts.summary_tsv {
            let summary = result.summary();
            for row in &summary {
                debug!(
                    "{:<20} (+) only: {:>5}  (+) and (-): {:>5}",
                    row.ribozyme, row.plus_only, row.plus_and_minus
                );
            }
            write_summary_tsv(&summary, result, path)?;
            info!("Wrote per-ribozyme summary to {}", path.display());
        }

        if let Some(path) = &opts.ids_out {
            write_ids(&result.viroid_like_ids(), path)?;
            info!("Wrote {} viroid-like sequence ids to {}", result.viroid_like_count(), path.display());
        }
    }

    if let Some(path) = &opts.report_json {
        RunReport::new(&hits, result.as_ref(), &opts.config).write_json(path)?;
        info!("Wrote run report to {}", path.display());
    }

    Ok(result)
}
