//! Fixed-threshold robocaller rule.
//!
//! A caller is flagged when it places strictly more calls than the volume
//! threshold AND its average duration is strictly below the duration
//! threshold. Boundary values are not flagged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{CallerStats, ClassificationResult};

/// Thresholds for the fixed rule.
///
/// The reference dashboard exposes call_threshold in [10, 500] and
/// duration_threshold in [5, 60] seconds; the functions here accept any
/// positive values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    /// Minimum outgoing call count; callers must exceed this to be flagged
    #[serde(default = "default_call_threshold")]
    pub call_threshold: u64,

    /// Maximum average call duration in seconds; callers must fall below
    /// this to be flagged
    #[serde(default = "default_duration_threshold")]
    pub duration_threshold: f64,
}

fn default_call_threshold() -> u64 {
    100
}

fn default_duration_threshold() -> f64 {
    20.0
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            call_threshold: default_call_threshold(),
            duration_threshold: default_duration_threshold(),
        }
    }
}

/// Pure threshold rule for a single caller. Strict inequalities on both
/// sides.
pub fn is_robocaller(stats: &CallerStats, policy: &ThresholdPolicy) -> bool {
    stats.outgoing_calls > policy.call_threshold
        && stats.avg_call_duration < policy.duration_threshold
}

/// Apply the threshold rule to every caller.
pub fn classify_threshold(
    stats: &HashMap<String, CallerStats>,
    policy: &ThresholdPolicy,
) -> HashMap<String, ClassificationResult> {
    stats
        .iter()
        .map(|(caller_id, caller_stats)| {
            (
                caller_id.clone(),
                ClassificationResult::from_threshold(is_robocaller(caller_stats, policy)),
            )
        })
        .collect()
}
