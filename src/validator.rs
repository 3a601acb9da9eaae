//! Schema and range validation for incoming call logs.
//!
//! Both checks are pure: they never mutate their input, and the caller
//! decides whether to abort. One bad row rejects the whole dataset, so
//! everything downstream of a successful validation can assume uniform,
//! well-formed records.

use crate::error::{Error, Result};
use crate::types::CallRecord;

/// Columns every call log must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 3] = ["caller_id", "receiver_id", "call_duration_sec"];

/// Check that a header row carries every required column.
///
/// Fails with a schema error naming all missing columns at once, sorted, so
/// a malformed upload is reported in a single pass.
pub fn validate_headers<S: AsRef<str>>(headers: &[S]) -> Result<()> {
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h.as_ref() == **required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        missing.sort_unstable();
        Err(Error::Schema { missing })
    }
}

/// Range-check already-parsed records.
///
/// Durations must be finite and non-negative; identifiers must be non-empty.
/// The first offending row aborts with its 1-based index.
pub fn validate_records(records: &[CallRecord]) -> Result<()> {
    for (idx, record) in records.iter().enumerate() {
        let row = idx + 1;

        if record.caller_id.is_empty() || record.receiver_id.is_empty() {
            return Err(Error::InvalidRecord {
                row,
                reason: "caller_id and receiver_id must be non-empty".to_string(),
            });
        }

        if !record.call_duration_sec.is_finite() {
            return Err(Error::InvalidRecord {
                row,
                reason: format!(
                    "call_duration_sec is not a finite number ({})",
                    record.call_duration_sec
                ),
            });
        }

        if record.call_duration_sec < 0.0 {
            return Err(Error::InvalidRecord {
                row,
                reason: format!("call_duration_sec is negative ({})", record.call_duration_sec),
            });
        }
    }

    Ok(())
}
