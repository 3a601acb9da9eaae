//! Robocall Detection Core
//!
//! Converts a raw call log (caller, receiver, duration) into per-caller
//! aggregate statistics and flags accounts whose outgoing behavior resembles
//! automated robocalling: very high call volume combined with very short
//! average call duration. Callers are classified by a fixed threshold rule
//! and, optionally, by a random forest trained on threshold-derived labels.
//!
//! The library is synchronous and holds no state between calls; presentation
//! concerns (upload widgets, charts, navigation) belong to the caller.

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod error;
pub mod features;
pub mod ingest;
pub mod report;
pub mod types;
pub mod validator;

pub use aggregator::{aggregate, CallGraph};
pub use classifier::{
    classify_model, classify_threshold, ConfusionMatrix, ModelConfig, ModelEvaluation,
    RandomForest, ThresholdPolicy,
};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use features::FeatureExtractor;
pub use ingest::{read_records, read_records_from_path};
pub use report::{build_report, AnalysisReport, ReportRow};
pub use types::{CallRecord, CallerStats, ClassificationResult, EdgeAggregate, LabelSource};
