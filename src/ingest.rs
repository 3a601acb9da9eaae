//! Delimited call log ingestion.
//!
//! Reads a header-carrying CSV into typed [`CallRecord`]s. The header is
//! schema-checked before any row is parsed, and rows are rejected with their
//! 1-based index when the duration fails to parse or falls out of range.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::CallRecord;
use crate::validator;

/// Read call records from any delimited-text reader.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<CallRecord>> {
    let csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    drain_reader(csv_reader)
}

/// Read call records from a file on disk.
pub fn read_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CallRecord>> {
    let csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    drain_reader(csv_reader)
}

fn drain_reader<R: Read>(mut csv_reader: csv::Reader<R>) -> Result<Vec<CallRecord>> {
    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    validator::validate_headers(&headers)?;

    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize::<CallRecord>().enumerate() {
        let row_number = idx + 1;
        let record = row.map_err(|e| Error::InvalidRecord {
            row: row_number,
            reason: e.to_string(),
        })?;

        if !record.call_duration_sec.is_finite() {
            return Err(Error::InvalidRecord {
                row: row_number,
                reason: format!(
                    "call_duration_sec is not a finite number ({})",
                    record.call_duration_sec
                ),
            });
        }

        if record.call_duration_sec < 0.0 {
            return Err(Error::InvalidRecord {
                row: row_number,
                reason: format!("call_duration_sec is negative ({})", record.call_duration_sec),
            });
        }

        records.push(record);
    }

    debug!(records = records.len(), "Parsed call log");
    Ok(records)
}
