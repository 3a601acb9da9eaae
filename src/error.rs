//! Error taxonomy for the analysis pipeline.
//!
//! Validation and ingestion errors abort a run before aggregation. Classifier
//! errors abort only the model sub-report; threshold results stay usable.
//! An empty flagged set is not an error anywhere in the crate.

use thiserror::Error;

/// Errors produced by the robocall detection core
#[derive(Debug, Error)]
pub enum Error {
    /// The input table lacks one or more required columns
    #[error("input table is missing required column(s): {}", missing.join(", "))]
    Schema {
        /// Missing column names, sorted
        missing: Vec<String>,
    },

    /// A row failed type or range checks; the whole dataset is rejected
    #[error("invalid record at data row {row}: {reason}")]
    InvalidRecord {
        /// 1-based data row index (header not counted)
        row: usize,
        reason: String,
    },

    /// Training labels contain a single class, so no decision boundary exists
    #[error("cannot train: every caller is labeled '{observed}'; threshold results remain available")]
    DegenerateLabels {
        /// The one label class observed
        observed: &'static str,
    },

    /// Too few callers to carve out non-empty train and held-out partitions
    #[error("cannot train on {callers} caller(s); at least 2 are required")]
    InsufficientSamples { callers: usize },

    /// Tree fitting failed inside the ML backend
    #[error("model training failed: {0}")]
    Training(String),

    /// Report serialization failed
    #[error("report export failed: {0}")]
    Export(String),

    /// Reading or parsing the delimited input failed
    #[error("failed to read input table: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors that only abort the model sub-report
    pub fn is_model_only(&self) -> bool {
        matches!(
            self,
            Error::DegenerateLabels { .. } | Error::InsufficientSamples { .. } | Error::Training(_)
        )
    }
}
