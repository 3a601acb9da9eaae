//! End-to-end pipeline tests: CSV file in, report out.

use std::collections::HashMap;
use std::io::Write;

use robocall_detection::{
    aggregate, build_report, classify_model, classify_threshold, ingest, report,
    Error, ModelConfig, ThresholdPolicy,
};
use tempfile::NamedTempFile;

fn write_log(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write log");
    file
}

const SCENARIO_LOG: &str = "caller_id,receiver_id,call_duration_sec\n\
                            A,B,10\n\
                            A,B,10\n\
                            A,C,5\n";

#[test]
fn aggregates_scenario_log_from_file() {
    let file = write_log(SCENARIO_LOG);
    let records = ingest::read_records_from_path(file.path()).unwrap();
    let (_, stats) = aggregate(&records);

    assert_eq!(stats.len(), 1);
    let a = &stats["A"];
    assert_eq!(a.outgoing_calls, 3);
    assert!((a.avg_call_duration - 25.0 / 3.0).abs() < 1e-9);
    assert!(!stats.contains_key("B"));
    assert!(!stats.contains_key("C"));
}

#[test]
fn threshold_boundaries_are_strict() {
    let file = write_log(SCENARIO_LOG);
    let records = ingest::read_records_from_path(file.path()).unwrap();
    let (_, stats) = aggregate(&records);

    let loose = ThresholdPolicy {
        call_threshold: 2,
        duration_threshold: 9.0,
    };
    let tight = ThresholdPolicy {
        call_threshold: 2,
        duration_threshold: 8.0,
    };

    assert!(classify_threshold(&stats, &loose)["A"].is_robocaller);
    // 8.33 is not strictly below 8.0
    assert!(!classify_threshold(&stats, &tight)["A"].is_robocaller);
}

#[test]
fn missing_duration_column_fails_before_aggregation() {
    let file = write_log("caller_id,receiver_id\nA,B\n");
    let err = ingest::read_records_from_path(file.path()).unwrap_err();

    match err {
        Error::Schema { missing } => assert_eq!(missing, vec!["call_duration_sec"]),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn aggregation_invariant_under_row_permutation() {
    let forward = write_log(
        "caller_id,receiver_id,call_duration_sec\nA,B,10\nA,B,10\nA,C,5\nD,A,7\n",
    );
    let backward = write_log(
        "caller_id,receiver_id,call_duration_sec\nD,A,7\nA,C,5\nA,B,10\nA,B,10\n",
    );

    let (_, stats_forward) =
        aggregate(&ingest::read_records_from_path(forward.path()).unwrap());
    let (_, stats_backward) =
        aggregate(&ingest::read_records_from_path(backward.path()).unwrap());

    assert_eq!(stats_forward, stats_backward);
}

/// A log whose callers split cleanly: a handful of short-call bulk dialers
/// and a larger population of ordinary callers.
fn mixed_population_log() -> String {
    let mut log = String::from("caller_id,receiver_id,call_duration_sec\n");

    for bot in 0..8 {
        for call in 0..150 {
            log.push_str(&format!("bot_{bot},recv_{},4.{}\n", call % 40, call % 10));
        }
    }
    for human in 0..40 {
        for call in 0..(5 + human % 10) {
            log.push_str(&format!(
                "human_{human},recv_{},{}\n",
                call % 40,
                60 + (call * 7) % 120
            ));
        }
    }
    log
}

#[test]
fn full_pipeline_flags_bulk_dialers() {
    let file = write_log(&mixed_population_log());
    let records = ingest::read_records_from_path(file.path()).unwrap();
    let (_, stats) = aggregate(&records);

    let policy = ThresholdPolicy::default();
    let threshold_results = classify_threshold(&stats, &policy);
    let labels: HashMap<String, bool> = threshold_results
        .iter()
        .map(|(id, r)| (id.clone(), r.is_robocaller))
        .collect();

    let (model_results, evaluation) =
        classify_model(&stats, &labels, &ModelConfig::default()).unwrap();

    let report = build_report(&stats, &threshold_results, Some(&model_results));

    // every bot exceeds 100 calls at ~4s average; every human stays far under
    assert_eq!(report.flagged_count(), 8);
    assert!(report
        .filter_flagged()
        .iter()
        .all(|row| row.caller_id.starts_with("bot_")));
    assert!(evaluation.accuracy >= 0.8);

    // report ordering puts the heaviest dialers first
    assert!(report.rows[0].caller_id.starts_with("bot_"));
    let volumes: Vec<u64> = report.rows.iter().map(|r| r.outgoing_calls).collect();
    assert!(volumes.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn model_results_are_deterministic_for_fixed_seed() {
    let file = write_log(&mixed_population_log());
    let records = ingest::read_records_from_path(file.path()).unwrap();
    let (_, stats) = aggregate(&records);

    let threshold_results = classify_threshold(&stats, &ThresholdPolicy::default());
    let labels: HashMap<String, bool> = threshold_results
        .iter()
        .map(|(id, r)| (id.clone(), r.is_robocaller))
        .collect();

    let config = ModelConfig::default();
    let (first, first_eval) = classify_model(&stats, &labels, &config).unwrap();
    let (second, second_eval) = classify_model(&stats, &labels, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_eval.confusion, second_eval.confusion);
}

#[test]
fn uniform_labels_skip_model_but_keep_threshold_report() {
    // every caller is an obvious bulk dialer, so threshold labels degenerate
    let mut log = String::from("caller_id,receiver_id,call_duration_sec\n");
    for bot in 0..6 {
        for call in 0..120 {
            log.push_str(&format!("bot_{bot},recv_{},3\n", call % 20));
        }
    }

    let file = write_log(&log);
    let records = ingest::read_records_from_path(file.path()).unwrap();
    let (_, stats) = aggregate(&records);

    let threshold_results = classify_threshold(&stats, &ThresholdPolicy::default());
    let labels: HashMap<String, bool> = threshold_results
        .iter()
        .map(|(id, r)| (id.clone(), r.is_robocaller))
        .collect();

    let err = classify_model(&stats, &labels, &ModelConfig::default()).unwrap_err();
    match err {
        Error::DegenerateLabels { observed } => assert_eq!(observed, "robocaller"),
        other => panic!("expected degenerate labels, got {other:?}"),
    }

    // threshold-based report still assembles and exports
    let report = build_report(&stats, &threshold_results, None);
    assert_eq!(report.flagged_count(), 6);
    assert!(report.flagged_to_delimited_text().is_ok());
}

#[test]
fn exported_report_round_trips_through_a_file() {
    let file = write_log(&mixed_population_log());
    let records = ingest::read_records_from_path(file.path()).unwrap();
    let (_, stats) = aggregate(&records);

    let threshold_results = classify_threshold(&stats, &ThresholdPolicy::default());
    let analysis = build_report(&stats, &threshold_results, None);

    let mut export = NamedTempFile::new().unwrap();
    export
        .write_all(analysis.flagged_to_delimited_text().unwrap().as_bytes())
        .unwrap();

    let text = std::fs::read_to_string(export.path()).unwrap();
    let parsed = report::parse_delimited_text(&text).unwrap();

    let flagged = analysis.filter_flagged();
    assert_eq!(parsed.len(), flagged.len());
    for (parsed_row, original) in parsed.iter().zip(flagged) {
        assert_eq!(parsed_row.caller_id, original.caller_id);
        assert_eq!(parsed_row.outgoing_calls, original.outgoing_calls);
        assert!((parsed_row.avg_call_duration - original.avg_call_duration).abs() < 1e-9);
    }
}

#[test]
fn zero_flagged_callers_is_a_valid_outcome() {
    let file = write_log(SCENARIO_LOG);
    let records = ingest::read_records_from_path(file.path()).unwrap();
    let (_, stats) = aggregate(&records);

    // default thresholds are far above this tiny log
    let threshold_results = classify_threshold(&stats, &ThresholdPolicy::default());
    let report = build_report(&stats, &threshold_results, None);

    assert_eq!(report.flagged_count(), 0);
    let text = report.flagged_to_delimited_text().unwrap();
    assert_eq!(
        text.trim_end(),
        "caller_id,outgoing_calls,avg_call_duration,is_robocaller"
    );
}
