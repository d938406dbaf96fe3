//! Log analysis report: accumulation on [`Report::add`], derived views
//! recomputed on every read.

mod counter;
mod stats;

#[cfg(test)]
mod tests;

pub use counter::{Counter, PrefixCounter};
pub use stats::ListStats;

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::render::{self, RenderError};

/// Per-path accumulation, created lazily the first time a path is seen.
#[derive(Debug, Clone)]
struct PathStats {
    /// first-seen rank, breaks frequency ties in [`Report::path_requests`]
    seq: usize,
    requests: u64,
    verbs: Counter,
    status: PrefixCounter,
    times: Vec<f64>,
    upstream_times: Vec<f64>,
    body_bytes: Vec<f64>,
}

impl PathStats {
    fn new(seq: usize, status_seed: &[String]) -> Self {
        Self {
            seq,
            requests: 0,
            verbs: Counter::new(),
            status: PrefixCounter::seeded(status_seed.iter().cloned()),
            times: Vec::new(),
            upstream_times: Vec::new(),
            body_bytes: Vec::new(),
        }
    }
}

/// Aggregated metrics of one analysis pass.
///
/// Tracks overall and per-path distributions: request method, status code
/// family, response time, upstream response time, and body size. Mutated
/// only through [`Report::add`]; every view recomputes from the live
/// counters so it always reflects the latest state.
#[derive(Debug, Clone)]
pub struct Report {
    requests: u64,
    execution_time: Option<Duration>,
    verbs: Counter,
    status: PrefixCounter,
    times: Vec<f64>,
    upstream_times: Vec<f64>,
    body_bytes: Vec<f64>,
    status_seed: Vec<String>,
    paths: HashMap<String, PathStats>,
}

impl Report {
    /// Empty report tracking the given verbs and status code prefixes.
    pub fn new(
        verbs: impl IntoIterator<Item = impl Into<String>>,
        status_codes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let status_seed: Vec<String> = status_codes.into_iter().map(Into::into).collect();

        Self {
            requests: 0,
            execution_time: None,
            verbs: Counter::seeded(verbs),
            status: PrefixCounter::seeded(status_seed.iter().cloned()),
            times: Vec::new(),
            upstream_times: Vec::new(),
            body_bytes: Vec::new(),
            status_seed,
            paths: HashMap::new(),
        }
    }

    /// Record one accepted log entry.
    ///
    /// `path` is the resolved monitored group key. The overall verb counter
    /// only tracks configured verbs; the per-path counters track every verb
    /// that shows up.
    pub fn add(
        &mut self,
        path: &str,
        verb: &str,
        status: u16,
        time: f64,
        upstream_time: f64,
        body_bytes: u64,
    ) {
        self.requests += 1;

        if self.verbs.contains(verb) {
            self.verbs.record(verb);
        } else {
            debug!(verb, "ignoring untracked verb in method distribution");
        }
        self.status.record(status);
        self.times.push(time);
        self.upstream_times.push(upstream_time);
        self.body_bytes.push(body_bytes as f64);

        let seq = self.paths.len();
        let path_stats = self
            .paths
            .entry(path.to_string())
            .or_insert_with(|| PathStats::new(seq, &self.status_seed));
        path_stats.requests += 1;
        path_stats.verbs.record(verb);
        path_stats.status.record(status);
        path_stats.times.push(time);
        path_stats.upstream_times.push(upstream_time);
        path_stats.body_bytes.push(body_bytes as f64);
    }

    /// Total number of accepted entries.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Wall-clock duration of the analysis pass, set once on completion.
    pub fn execution_time(&self) -> Option<Duration> {
        self.execution_time
    }

    pub fn set_execution_time(&mut self, elapsed: Duration) {
        self.execution_time = Some(elapsed);
    }

    /// Request methods by descending frequency, tracked set only.
    pub fn verbs(&self) -> Vec<(&str, u64)> {
        self.verbs.most_common()
    }

    /// Status code families by descending frequency.
    pub fn status(&self) -> Vec<(&str, u64)> {
        self.status.most_common()
    }

    pub fn times(&self) -> ListStats {
        ListStats::of(&self.times)
    }

    pub fn upstream_times(&self) -> ListStats {
        ListStats::of(&self.upstream_times)
    }

    pub fn body_bytes(&self) -> ListStats {
        ListStats::of(&self.body_bytes)
    }

    /// Monitored paths by descending request count, ties in first-seen order.
    pub fn path_requests(&self) -> Vec<(&str, u64)> {
        let mut paths: Vec<(&str, u64, usize)> = self
            .paths
            .iter()
            .map(|(path, stats)| (path.as_str(), stats.requests, stats.seq))
            .collect();
        paths.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        paths.into_iter().map(|(path, count, _)| (path, count)).collect()
    }

    /// Per-path method distribution (all verbs, not just tracked ones),
    /// ordered lexicographically by path.
    pub fn path_verbs(&self) -> Vec<(&str, Vec<(&str, u64)>)> {
        self.sorted_paths()
            .into_iter()
            .map(|(path, stats)| (path, stats.verbs.most_common()))
            .collect()
    }

    /// Per-path status family distribution, ordered lexicographically.
    pub fn path_status(&self) -> Vec<(&str, Vec<(&str, u64)>)> {
        self.sorted_paths()
            .into_iter()
            .map(|(path, stats)| (path, stats.status.most_common()))
            .collect()
    }

    /// Per-path response time statistics, ordered lexicographically.
    pub fn path_times(&self) -> Vec<(&str, ListStats)> {
        self.sorted_paths()
            .into_iter()
            .map(|(path, stats)| (path, ListStats::of(&stats.times)))
            .collect()
    }

    /// Per-path upstream response time statistics, ordered lexicographically.
    pub fn path_upstream_times(&self) -> Vec<(&str, ListStats)> {
        self.sorted_paths()
            .into_iter()
            .map(|(path, stats)| (path, ListStats::of(&stats.upstream_times)))
            .collect()
    }

    /// Per-path body size statistics, ordered lexicographically.
    pub fn path_body_bytes(&self) -> Vec<(&str, ListStats)> {
        self.sorted_paths()
            .into_iter()
            .map(|(path, stats)| (path, ListStats::of(&stats.body_bytes)))
            .collect()
    }

    /// Render this report with the named output format (`plain` by default).
    pub fn render(
        &self,
        path_stats: bool,
        output_format: Option<&str>,
    ) -> Result<String, RenderError> {
        let renderer = render::by_name(output_format)?;
        renderer.render(self, path_stats)
    }

    fn sorted_paths(&self) -> Vec<(&str, &PathStats)> {
        let mut paths: Vec<(&str, &PathStats)> = self
            .paths
            .iter()
            .map(|(path, stats)| (path.as_str(), stats))
            .collect();
        paths.sort_by_key(|(path, _)| *path);
        paths
    }
}
