//! Call log record structures

use serde::{Deserialize, Serialize};

/// A single call event from an uploaded call log.
///
/// Field names match the required CSV column names, so records deserialize
/// straight from a header-carrying log file. Extra columns in the input are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Account that placed the call
    pub caller_id: String,

    /// Account that received the call
    pub receiver_id: String,

    /// Call duration in seconds, non-negative
    pub call_duration_sec: f64,
}

impl CallRecord {
    /// Create a new call record
    pub fn new(
        caller_id: impl Into<String>,
        receiver_id: impl Into<String>,
        call_duration_sec: f64,
    ) -> Self {
        Self {
            caller_id: caller_id.into(),
            receiver_id: receiver_id.into(),
            call_duration_sec,
        }
    }
}
