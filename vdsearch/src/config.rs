use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, VdsearchError};
use crate::models::CutoffKind;

pub const DEFAULT_MAX_EVALUE: f64 = 0.01;

/// Thresholds used to decide whether a ribozyme hit counts as evidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    pub use_cutoff_filter: bool,
    pub cutoff_kind: CutoffKind,
    pub use_evalue_filter: bool,
    pub max_evalue: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            use_cutoff_filter: true,
            cutoff_kind: CutoffKind::GA,
            use_evalue_filter: true,
            max_evalue: DEFAULT_MAX_EVALUE,
        }
    }
}

impl ClassificationConfig {
    /// E-value below which a hit counts as strand evidence. Looser than
    /// `max_evalue`, which a hit must beat to count as significant.
    pub fn strand_evalue_threshold(&self) -> f64 {
        self.max_evalue.sqrt()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.max_evalue.is_finite() || self.max_evalue <= 0.0 {
            return Err(VdsearchError::InvalidConfig(format!(
                "max e-value must be a positive number, got {}",
                self.max_evalue
            )));
        }

        if !self.use_cutoff_filter && !self.use_evalue_filter {
            warn!("Both the CM cutoff and the e-value filter are disabled; no sequence can be classified.");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_command_line_defaults() {
        let config = ClassificationConfig::default();
        assert!(config.use_cutoff_filter);
        assert!(config.use_evalue_filter);
        assert_eq!(config.cutoff_kind, CutoffKind::GA);
        assert_eq!(config.max_evalue, 0.01);
        assert!((config.strand_evalue_threshold() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_evalue() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = ClassificationConfig { max_evalue: bad, ..Default::default() };
            assert!(matches!(config.validate(), Err(VdsearchError::InvalidConfig(_))));
        }
    }

    #[test]
    fn accepts_both_filters_disabled() {
        let config = ClassificationConfig {
            use_cutoff_filter: false,
            use_evalue_filter: false,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn round_trips_through_json() {
        let config = ClassificationConfig { cutoff_kind: CutoffKind::TC, max_evalue: 1e-3, ..Default::default() };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"TC\""));
        let back: ClassificationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
