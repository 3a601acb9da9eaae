//! Robocall Detection - Main Entry Point
//!
//! Reads a call log CSV, aggregates per-caller statistics, flags robocallers
//! by the threshold rule and a trained classifier, and writes the
//! flagged-callers export.

use std::collections::HashMap;

use anyhow::{Context, Result};
use robocall_detection::{
    aggregate, build_report, classifier, config::AppConfig, ingest,
};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("robocall_detection=info".parse()?),
        )
        .init();

    info!("Starting robocall detection");

    // Load configuration
    let config = AppConfig::load_or_default()?;
    info!(
        call_threshold = config.detection.call_threshold,
        duration_threshold = config.detection.duration_threshold,
        model_enabled = config.model.enabled,
        "Configuration loaded"
    );

    let input_path = std::env::args()
        .nth(1)
        .context("usage: robocall-detection <call_log.csv>")?;

    // Ingest and validate; one bad row rejects the dataset
    let records = ingest::read_records_from_path(&input_path)
        .with_context(|| format!("failed to ingest {input_path}"))?;
    info!(records = records.len(), path = %input_path, "Call log ingested");

    // Aggregate into the call graph and per-caller statistics
    let (graph, stats) = aggregate(&records);
    info!(
        edges = graph.edge_count(),
        callers = graph.caller_count(),
        "Call graph aggregated"
    );

    // Threshold classification; its verdicts double as training labels
    let threshold_results = classifier::classify_threshold(&stats, &config.detection);
    let labels: HashMap<String, bool> = threshold_results
        .iter()
        .map(|(caller_id, result)| (caller_id.clone(), result.is_robocaller))
        .collect();

    let model_results = if config.model.enabled {
        match classifier::classify_model(&stats, &labels, &config.model.model_config()) {
            Ok((results, evaluation)) => {
                info!(
                    accuracy = evaluation.accuracy,
                    robocaller_precision = evaluation.robocaller_precision,
                    robocaller_recall = evaluation.robocaller_recall,
                    true_positive = evaluation.confusion.true_positive,
                    false_positive = evaluation.confusion.false_positive,
                    true_negative = evaluation.confusion.true_negative,
                    false_negative = evaluation.confusion.false_negative,
                    "Model evaluation on held-out callers"
                );
                Some(results)
            }
            Err(e) if e.is_model_only() => {
                warn!(error = %e, "Skipping model step; threshold results remain");
                None
            }
            Err(e) => return Err(e).context("model classification failed"),
        }
    } else {
        None
    };

    // Assemble and export the report
    let report = build_report(&stats, &threshold_results, model_results.as_ref());

    for row in report.top_n(config.report.top_n) {
        info!(
            "Top caller {}: {} calls, {:.2}s average, flagged={}",
            row.caller_id, row.outgoing_calls, row.avg_call_duration, row.is_robocaller
        );
    }

    if report.flagged_count() > 0 {
        info!(
            flagged = report.flagged_count(),
            "Potential robocaller(s) detected"
        );
    } else {
        info!("No robocallers detected with the current thresholds");
    }

    let export = report.flagged_to_delimited_text()?;
    std::fs::write(&config.report.output_path, export)
        .with_context(|| format!("failed to write {}", config.report.output_path))?;
    info!(path = %config.report.output_path, "Flagged callers exported");

    Ok(())
}
