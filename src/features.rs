//! Feature extraction for the trained classifier.
//!
//! Maps per-caller statistics to the fixed-order numeric vector the model is
//! trained on. Order here must match the order used at prediction time.

use crate::types::CallerStats;

/// Feature names, in extraction order.
pub const FEATURE_NAMES: [&str; 2] = ["outgoing_calls", "avg_call_duration"];

/// Extracts model input features from caller statistics.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Number of features produced per caller.
    pub fn feature_count(&self) -> usize {
        FEATURE_NAMES.len()
    }

    /// Extract the feature vector for one caller.
    pub fn extract(&self, stats: &CallerStats) -> [f64; 2] {
        [stats.outgoing_calls as f64, stats.avg_call_duration]
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
