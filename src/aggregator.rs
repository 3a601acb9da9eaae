//! Call graph aggregation.
//!
//! Folds raw call records into per-(caller, receiver) edge aggregates, then
//! derives per-caller outgoing statistics from the edge map. The fold is
//! commutative, so the result is invariant to input row order. Runs in
//! O(records) time and O(distinct pairs + distinct callers) space.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::types::{CallRecord, CallerStats, EdgeAggregate};

/// Directed multigraph of observed calls, collapsed to one aggregate per
/// ordered (caller, receiver) pair.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    edges: HashMap<(String, String), EdgeAggregate>,
}

impl CallGraph {
    /// Build the graph from a batch of records.
    pub fn from_records(records: &[CallRecord]) -> Self {
        let mut graph = CallGraph::default();
        for record in records {
            graph.record_call(record);
        }

        debug!(
            records = records.len(),
            edges = graph.edge_count(),
            callers = graph.caller_count(),
            "Aggregated call log"
        );
        graph
    }

    /// Fold a single call into the graph.
    pub fn record_call(&mut self, record: &CallRecord) {
        self.edges
            .entry((record.caller_id.clone(), record.receiver_id.clone()))
            .or_default()
            .record_call(record.call_duration_sec);
    }

    /// Number of distinct ordered (caller, receiver) pairs observed.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of distinct accounts observed placing at least one call.
    ///
    /// Accounts appearing only as receivers are not counted; they never
    /// called anyone.
    pub fn caller_count(&self) -> usize {
        self.edges
            .keys()
            .map(|(caller, _)| caller.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Aggregate state for one ordered pair, if any calls were observed.
    pub fn edge(&self, caller: &str, receiver: &str) -> Option<&EdgeAggregate> {
        self.edges
            .get(&(caller.to_string(), receiver.to_string()))
    }

    /// Iterate over all edge aggregates.
    pub fn edges(&self) -> impl Iterator<Item = (&(String, String), &EdgeAggregate)> {
        self.edges.iter()
    }

    /// Derive per-caller outgoing statistics from the edge map.
    ///
    /// Recomputed in full on each call; nothing is maintained incrementally.
    /// Only accounts observed as callers appear in the result.
    pub fn caller_stats(&self) -> HashMap<String, CallerStats> {
        let mut totals: HashMap<&str, (u64, f64)> = HashMap::new();
        for ((caller, _), edge) in &self.edges {
            let entry = totals.entry(caller.as_str()).or_insert((0, 0.0));
            entry.0 += edge.count;
            entry.1 += edge.total_duration;
        }

        totals
            .into_iter()
            .map(|(caller, (calls, duration))| {
                (
                    caller.to_string(),
                    CallerStats::from_totals(caller, calls, duration),
                )
            })
            .collect()
    }
}

/// Aggregate a batch of records into the call graph and its derived
/// per-caller statistics.
pub fn aggregate(records: &[CallRecord]) -> (CallGraph, HashMap<String, CallerStats>) {
    let graph = CallGraph::from_records(records);
    let stats = graph.caller_stats();
    (graph, stats)
}
