use std::collections::BTreeSet;

use crate::models::Strand;

/// Sequence ids collected while scanning ribozyme hits.
///
/// Partial sets from independent profile groups combine with [`EvidenceSets::union`],
/// so groups can be evaluated in any order or in parallel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceSets {
    pub plus_strand_hits: BTreeSet<String>,
    pub minus_strand_hits: BTreeSet<String>,
    pub significant_hits: BTreeSet<String>,
}

impl EvidenceSets {
    pub fn add_strand_hit(&mut self, strand: Strand, sequence_id: &str) {
        let set = match strand {
            Strand::Plus => &mut self.plus_strand_hits,
            Strand::Minus => &mut self.minus_strand_hits,
        };
        set.insert(sequence_id.to_string());
    }

    pub fn add_significant_hit(&mut self, sequence_id: &str) {
        self.significant_hits.insert(sequence_id.to_string());
    }

    pub fn union(mut self, other: EvidenceSets) -> EvidenceSets {
        self.plus_strand_hits.extend(other.plus_strand_hits);
        self.minus_strand_hits.extend(other.minus_strand_hits);
        self.significant_hits.extend(other.significant_hits);
        self
    }

    /// Sequences with ribozyme evidence on both strands.
    pub fn dual_polarity(&self) -> BTreeSet<String> {
        self.plus_strand_hits
            .intersection(&self.minus_strand_hits)
            .cloned()
            .collect()
    }

    /// Significant sequences that are not dual polarity.
    pub fn single_polarity(&self) -> BTreeSet<String> {
        let dual = self.dual_polarity();
        self.significant_hits.difference(&dual).cloned().collect()
    }

    pub fn viroid_like(&self) -> BTreeSet<String> {
        let mut all = self.dual_polarity();
        all.extend(self.single_polarity());
        all
    }
}
