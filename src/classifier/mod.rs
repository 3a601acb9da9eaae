//! Robocaller classification components

pub mod evaluation;
pub mod forest;
pub mod threshold;

pub use evaluation::{ConfusionMatrix, ModelEvaluation};
pub use forest::{classify_model, ModelConfig, RandomForest};
pub use threshold::{classify_threshold, is_robocaller, ThresholdPolicy};
