use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VdsearchError>;

#[derive(Debug, Error)]
pub enum VdsearchError {
    /// Input file could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file was readable but a line does not follow the expected layout.
    #[error("{path}:{line}: {reason}")]
    FileFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("no cutoffs for profile `{0}`")]
    MissingCutoff(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl VdsearchError {
    pub(crate) fn format(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        VdsearchError::FileFormat {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VdsearchError::Unreadable {
            path: path.into(),
            source,
        }
    }
}
