//! Shared tabular row model for the table and delimited renderers.
//!
//! Every row carries the same columns: label, request count, one count per
//! verb and status bucket (ordered by key, missing per-path buckets filled
//! with zero), then mean/median/p90/p75/p25 for times, upstream times and
//! body bytes. Per-path rows come first (lexicographic), the overall row
//! closes the table.

use std::collections::HashMap;

use crate::report::{ListStats, Report};

pub(crate) const STAT_NAMES: [&str; 5] = ["mean", "median", "p90", "p75", "p25"];
pub(crate) const METRIC_NAMES: [&str; 3] = ["time", "upstream_time", "body_bytes"];

pub(crate) struct Row {
    pub label: String,
    pub requests: u64,
    pub verb_counts: Vec<u64>,
    pub status_counts: Vec<u64>,
    /// time, upstream time and body bytes stats, flattened in
    /// [`STAT_NAMES`] order
    pub stats: Vec<Option<f64>>,
}

pub(crate) struct RowModel {
    /// verb column keys, ordered lexicographically
    pub verbs: Vec<String>,
    /// status column keys, ordered lexicographically
    pub status: Vec<String>,
    pub rows: Vec<Row>,
}

pub(crate) fn row_model(report: &Report, path_stats: bool, total_label: &str) -> RowModel {
    let verbs = ordered_keys(&report.verbs());
    let status = ordered_keys(&report.status());

    let mut rows = Vec::new();

    if path_stats {
        let requests: HashMap<&str, u64> = report.path_requests().into_iter().collect();
        let path_verbs = report.path_verbs();
        let path_status = report.path_status();
        let path_times = report.path_times();
        let path_upstream_times = report.path_upstream_times();
        let path_body_bytes = report.path_body_bytes();

        // the per-path views share their lexicographic order, so rows can
        // be assembled by index
        for (i, (path, verb_counts)) in path_verbs.iter().enumerate() {
            rows.push(Row {
                label: path.to_string(),
                requests: requests.get(path).copied().unwrap_or(0),
                verb_counts: filled(&verbs, verb_counts),
                status_counts: filled(&status, &path_status[i].1),
                stats: stat_columns(&[
                    path_times[i].1,
                    path_upstream_times[i].1,
                    path_body_bytes[i].1,
                ]),
            });
        }
    }

    rows.push(Row {
        label: total_label.to_string(),
        requests: report.requests(),
        verb_counts: filled(&verbs, &report.verbs()),
        status_counts: filled(&status, &report.status()),
        stats: stat_columns(&[report.times(), report.upstream_times(), report.body_bytes()]),
    });

    RowModel { verbs, status, rows }
}

fn ordered_keys(counts: &[(&str, u64)]) -> Vec<String> {
    let mut keys: Vec<String> = counts.iter().map(|(key, _)| key.to_string()).collect();
    keys.sort();
    keys
}

/// Align `counts` to `all_keys`, filling missing keys with zero.
fn filled(all_keys: &[String], counts: &[(&str, u64)]) -> Vec<u64> {
    let lookup: HashMap<&str, u64> = counts.iter().copied().collect();
    all_keys
        .iter()
        .map(|key| lookup.get(key.as_str()).copied().unwrap_or(0))
        .collect()
}

fn stat_columns(metrics: &[ListStats; 3]) -> Vec<Option<f64>> {
    metrics
        .iter()
        .flat_map(|stats| {
            [
                stats.mean,
                stats.median,
                stats.perc90,
                stats.perc75,
                stats.perc25,
            ]
        })
        .collect()
}
