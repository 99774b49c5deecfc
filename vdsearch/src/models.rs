use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VdsearchError};

/// Anything that can be read from disk into memory in one go.
pub trait Dataset {
    type Output;

    fn load(&self) -> Result<Self::Output>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Plus,
    Minus,
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            other => Err(format!("unknown strand `{}`", other)),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strand::Plus => "+",
            Strand::Minus => "-",
        };
        write!(f, "{s}")
    }
}

/// A single row of `cmsearch --tblout` output.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRecord {
    pub sequence_id: String,
    pub accession: String,
    /// Name of the covariance model that matched, e.g. `Twister-P5`.
    pub profile_name: String,
    pub from: u64,
    pub to: u64,
    pub strand: Strand,
    pub score: f64,
    pub evalue: f64,
    /// `!` or `?` in Infernal output; carried through untouched.
    pub inclusion_flag: String,
}

/// Which of the three Rfam-style score thresholds to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[allow(clippy::upper_case_acronyms)]
pub enum CutoffKind {
    /// Gathering threshold
    #[default]
    #[value(name = "GA")]
    GA,
    /// Noise cutoff
    #[value(name = "NC")]
    NC,
    /// Trusted cutoff
    #[value(name = "TC")]
    TC,
}

impl fmt::Display for CutoffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CutoffKind::GA => "GA",
            CutoffKind::NC => "NC",
            CutoffKind::TC => "TC",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CutoffSet {
    pub ga: f64,
    pub nc: f64,
    pub tc: f64,
}

impl CutoffSet {
    pub fn get(&self, kind: CutoffKind) -> f64 {
        match kind {
            CutoffKind::GA => self.ga,
            CutoffKind::NC => self.nc,
            CutoffKind::TC => self.tc,
        }
    }

    pub fn set(&mut self, kind: CutoffKind, value: f64) {
        match kind {
            CutoffKind::GA => self.ga = value,
            CutoffKind::NC => self.nc = value,
            CutoffKind::TC => self.tc = value,
        }
    }
}

/// Mapping *profile name → cutoffs*.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutoffTable(pub HashMap<String, CutoffSet>);

impl std::ops::Deref for CutoffTable {
    type Target = HashMap<String, CutoffSet>;
    fn deref(&self) -> &Self::Target { &self.0 }
}
impl std::ops::DerefMut for CutoffTable {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl CutoffTable {
    /// Threshold of `kind` for `profile`, or `MissingCutoff` when the profile
    /// was never defined in the model file.
    pub fn cutoff(&self, profile: &str, kind: CutoffKind) -> Result<f64> {
        self.0
            .get(profile)
            .map(|set| set.get(kind))
            .ok_or_else(|| VdsearchError::MissingCutoff(profile.to_string()))
    }
}

impl FromIterator<(String, CutoffSet)> for CutoffTable {
    fn from_iter<I: IntoIterator<Item = (String, CutoffSet)>>(iter: I) -> Self {
        CutoffTable(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// Ribozyme evidence on one strand only.
    Single,
    /// Ribozymes on both strands.
    Dual,
}

impl Polarity {
    pub fn label(&self) -> &'static str {
        match self {
            Polarity::Single => "(+)",
            Polarity::Dual => "(+) and (-)",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A hit row belonging to a viroid-like sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedHit {
    pub hit: HitRecord,
    pub polarity: Polarity,
}
