//! Type definitions for the robocall detection core

pub mod classification;
pub mod record;
pub mod stats;

pub use classification::{ClassificationResult, LabelSource};
pub use record::CallRecord;
pub use stats::{CallerStats, EdgeAggregate};
