//! Classification outcome structures

use serde::{Deserialize, Serialize};

/// Which stage produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSource {
    /// Fixed-threshold rule on outgoing volume and average duration
    Threshold,
    /// Trained random forest predicting on held-out callers
    Model,
}

/// Per-caller classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// True when the caller's behavior matches the robocaller profile
    pub is_robocaller: bool,

    /// Stage that produced the verdict
    pub source: LabelSource,
}

impl ClassificationResult {
    /// Result produced by the threshold rule
    pub fn from_threshold(is_robocaller: bool) -> Self {
        Self {
            is_robocaller,
            source: LabelSource::Threshold,
        }
    }

    /// Result produced by the trained model
    pub fn from_model(is_robocaller: bool) -> Self {
        Self {
            is_robocaller,
            source: LabelSource::Model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_serialization() {
        let result = ClassificationResult::from_threshold(true);

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"threshold\""));

        let deserialized: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }
}
