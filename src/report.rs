//! Report assembly and export.
//!
//! Merges caller statistics with threshold and model classifications into one
//! table sorted by outgoing calls descending (ties by caller id ascending),
//! and serializes the flagged subset for download. Zero flagged callers is a
//! valid, reportable outcome.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{CallerStats, ClassificationResult};

/// One caller in the assembled report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub caller_id: String,
    pub outgoing_calls: u64,
    pub avg_call_duration: f64,

    /// True when any classification source flagged the caller
    pub is_robocaller: bool,

    /// Verdict of the threshold rule
    pub flagged_by_threshold: bool,

    /// Verdict of the trained model; None for callers outside the held-out
    /// partition (or when the model step was skipped)
    pub flagged_by_model: Option<bool>,
}

/// Export row for the flagged-callers download, fixed column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedCallerRow {
    pub caller_id: String,
    pub outgoing_calls: u64,
    pub avg_call_duration: f64,
    pub is_robocaller: bool,
}

/// Assembled per-caller analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Unique id for this analysis run
    pub report_id: String,

    /// Report assembly timestamp
    pub generated_at: DateTime<Utc>,

    /// All callers, sorted by outgoing calls descending then caller id
    pub rows: Vec<ReportRow>,
}

impl AnalysisReport {
    /// First `n` rows under the report ordering.
    pub fn top_n(&self, n: usize) -> &[ReportRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Rows flagged by any classification source.
    pub fn filter_flagged(&self) -> Vec<&ReportRow> {
        self.rows.iter().filter(|row| row.is_robocaller).collect()
    }

    /// Number of flagged callers.
    pub fn flagged_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_robocaller).count()
    }

    /// Serialize every row as delimited text with the fixed export columns.
    pub fn to_delimited_text(&self) -> Result<String> {
        render_delimited(self.rows.iter())
    }

    /// Serialize only the flagged callers, the downloadable export.
    pub fn flagged_to_delimited_text(&self) -> Result<String> {
        render_delimited(self.rows.iter().filter(|row| row.is_robocaller))
    }

    /// Full report as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Export(e.to_string()))
    }
}

/// Merge statistics with classification outcomes into a sorted report.
///
/// A row's `is_robocaller` is true when either source flagged it. Callers the
/// model never predicted on keep `flagged_by_model = None` rather than an
/// invented verdict.
pub fn build_report(
    stats: &HashMap<String, CallerStats>,
    threshold_results: &HashMap<String, ClassificationResult>,
    model_results: Option<&HashMap<String, ClassificationResult>>,
) -> AnalysisReport {
    let mut rows: Vec<ReportRow> = stats
        .values()
        .map(|caller_stats| {
            let flagged_by_threshold = threshold_results
                .get(&caller_stats.caller_id)
                .map(|r| r.is_robocaller)
                .unwrap_or(false);
            let flagged_by_model = model_results
                .and_then(|results| results.get(&caller_stats.caller_id))
                .map(|r| r.is_robocaller);

            ReportRow {
                caller_id: caller_stats.caller_id.clone(),
                outgoing_calls: caller_stats.outgoing_calls,
                avg_call_duration: caller_stats.avg_call_duration,
                is_robocaller: flagged_by_threshold || flagged_by_model.unwrap_or(false),
                flagged_by_threshold,
                flagged_by_model,
            }
        })
        .collect();

    rows.sort_by(|a, b| match b.outgoing_calls.cmp(&a.outgoing_calls) {
        Ordering::Equal => a.caller_id.cmp(&b.caller_id),
        other => other,
    });

    let report = AnalysisReport {
        report_id: uuid::Uuid::new_v4().to_string(),
        generated_at: Utc::now(),
        rows,
    };

    debug!(
        callers = report.rows.len(),
        flagged = report.flagged_count(),
        "Assembled analysis report"
    );
    report
}

/// Parse a previously exported delimited report back into rows.
pub fn parse_delimited_text(text: &str) -> Result<Vec<FlaggedCallerRow>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for row in reader.deserialize::<FlaggedCallerRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Export column names, in the fixed declared order.
pub const EXPORT_COLUMNS: [&str; 4] = [
    "caller_id",
    "outgoing_calls",
    "avg_call_duration",
    "is_robocaller",
];

fn render_delimited<'a, I: Iterator<Item = &'a ReportRow>>(rows: I) -> Result<String> {
    // header is written up front so an empty flagged set still exports a
    // well-formed table
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(EXPORT_COLUMNS)
        .map_err(|e| Error::Export(e.to_string()))?;
    for row in rows {
        writer
            .serialize(FlaggedCallerRow {
                caller_id: row.caller_id.clone(),
                outgoing_calls: row.outgoing_calls,
                avg_call_duration: row.avg_call_duration,
                is_robocaller: row.is_robocaller,
            })
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}
