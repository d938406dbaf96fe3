//! The streaming analysis engine.
//!
//! One pass over a line source: match each line against the configured
//! format, apply the age window and path filter, and feed accepted entries
//! into a [`Report`].


use std::io::BufRead;
use std::str::FromStr;
use std::time::Instant;

use chrono::{DateTime, DurationRound, Local, TimeDelta};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::Config;
use crate::format::{FormatError, LogFormat, NGINX_TIME_FORMAT};
use crate::report::Report;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("no log format given; specify a format name or a regex pattern")]
    MissingFormat,

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to read from log source")]
    Io(#[from] std::io::Error),

    /// A matched line carried a non-numeric value in a numeric field. This
    /// is a defect in the format definition, not a runtime condition, so
    /// the pass aborts instead of skipping the line.
    #[error("unparseable {field} value '{value}' in matched log line")]
    MalformedField { field: &'static str, value: String },

    #[error("unparseable timestamp '{value}' for time format '{time_format}'")]
    Timestamp {
        value: String,
        time_format: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Log analysis pass over a finite line source.
///
/// Construction resolves the format and validates the configuration; the
/// actual work happens in [`Analyzer::run`], which consumes the analyzer
/// and produces a [`Report`].
pub struct Analyzer<R> {
    log: R,
    format: LogFormat,
    verbs: Vec<String>,
    status_codes: Vec<String>,
    paths: Vec<String>,
    max_age: Option<i64>,
}

impl<R: BufRead> Analyzer<R> {
    /// Configure an analysis pass.
    ///
    /// Fails with [`AnalyzerError::MissingFormat`] when the config names
    /// neither a format nor a pattern, and with a [`FormatError`] when an
    /// ad-hoc pattern does not compile into a usable format.
    pub fn new(log: R, config: &Config) -> Result<Self, AnalyzerError> {
        let time_format = config.time_format.as_deref().unwrap_or(NGINX_TIME_FORMAT);

        let format = match (&config.regex, &config.format) {
            (Some(pattern), _) => LogFormat::new("custom", pattern, time_format)?,
            (None, Some(name)) => match LogFormat::builtin(name) {
                Some(format) => format.clone(),
                // An unregistered name degrades to an ad-hoc pattern. A
                // typo'd name has no capture groups and fails right here
                // with the offending string in the error.
                None => LogFormat::new("custom", name, time_format)?,
            },
            (None, None) => return Err(AnalyzerError::MissingFormat),
        };

        Ok(Self {
            log,
            format,
            verbs: config.verbs.clone(),
            status_codes: config.status_codes.clone(),
            paths: config.paths.clone(),
            max_age: config.max_age,
        })
    }

    /// Analyze the log source and return the populated report.
    pub fn run(mut self) -> Result<Report, AnalyzerError> {
        // Age window, truncated to the minute. Entries newer than `now`
        // end the pass: the log is chronological, so everything after them
        // is in the future too.
        let window = self.max_age.map(|minutes| {
            let now = Local::now();
            let now = now.duration_trunc(TimeDelta::minutes(1)).unwrap_or(now);
            (now - TimeDelta::minutes(minutes), now)
        });

        let started = Instant::now();
        let mut report = Report::new(self.verbs.iter().cloned(), self.status_codes.iter().cloned());

        let mut line = String::new();
        loop {
            line.clear();
            if self.log.read_line(&mut line)? == 0 {
                break;
            }

            let Some(entry) = self.format.parse(line.trim_end()) else {
                trace!("skipping unmatched line");
                continue;
            };

            if let Some((min_time, now)) = window {
                let timestamp = self.parse_timestamp(entry.timestamp())?;
                if timestamp < min_time {
                    continue;
                }
                if timestamp > now {
                    debug!(
                        timestamp = %timestamp,
                        "entry is in the future, ending pass"
                    );
                    break;
                }
            }

            let Some(path) = monitor_path(&self.paths, entry.path()) else {
                trace!(path = entry.path(), "path not monitored, skipping entry");
                continue;
            };

            let status: u16 = numeric("status", entry.status())?;
            let time: f64 = numeric("request_time", entry.request_time())?;
            let upstream_time: f64 =
                numeric("upstream_response_time", entry.upstream_response_time())?;
            let body_bytes: u64 = numeric("body_bytes_sent", entry.body_bytes_sent())?;

            report.add(path, entry.verb(), status, time, upstream_time, body_bytes);
        }

        report.set_execution_time(started.elapsed());
        debug!(requests = report.requests(), "analysis pass complete");

        Ok(report)
    }

    fn parse_timestamp(&self, value: &str) -> Result<DateTime<Local>, AnalyzerError> {
        self.format
            .parse_timestamp(value)
            .map(|timestamp| timestamp.with_timezone(&Local))
            .map_err(|source| AnalyzerError::Timestamp {
                value: value.to_string(),
                time_format: self.format.time_format().to_string(),
                source,
            })
    }
}

/// Resolve a full request path to its monitored group.
///
/// With no configured prefixes every full path is its own group. Otherwise
/// the first configured prefix that matches wins, and unmatched paths are
/// outside all monitored groups.
fn monitor_path<'a>(configured: &'a [String], path: &'a str) -> Option<&'a str> {
    if configured.is_empty() {
        return Some(path);
    }
    configured
        .iter()
        .find(|monitored| path.starts_with(monitored.as_str()))
        .map(String::as_str)
}

fn numeric<T: FromStr>(field: &'static str, value: &str) -> Result<T, AnalyzerError> {
    value.parse().map_err(|_| AnalyzerError::MalformedField {
        field,
        value: value.to_string(),
    })
}
