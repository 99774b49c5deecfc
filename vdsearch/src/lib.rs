//! Find viroid-like circular RNAs from covariance-model ribozyme hits.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data_handling;
pub mod error;
pub mod helper_functions;
pub mod models;

pub use analysis::ribozyme_filter::{classify, ribozyme_filter, ClassificationResult, RibozymeFilterOptions};
pub use config::ClassificationConfig;
pub use error::{Result, VdsearchError};
