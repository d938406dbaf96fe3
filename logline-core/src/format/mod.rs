//! Log format recognition.
//!
//! A [`LogFormat`] pairs a regex with named capture groups and a chrono
//! timestamp layout. Built-in formats live in a process-wide registry;
//! ad-hoc formats are plain values owned by whoever configured them.

mod builtin;
mod entry;
mod error;


pub use builtin::NGINX_TIME_FORMAT;
pub use entry::LogEntry;
pub use error::FormatError;

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;

/// Capture groups every format must define.
const REQUIRED_GROUPS: &[&str] = &[
    "timestamp",
    "verb",
    "path",
    "status",
    "body_bytes_sent",
    "request_time",
    "upstream_response_time",
];

static BUILTINS: Lazy<HashMap<&'static str, LogFormat>> = Lazy::new(|| {
    let mut map = HashMap::new();

    let nginx = LogFormat::new("nginx", builtin::NGINX_PATTERN, NGINX_TIME_FORMAT)
        .unwrap_or_else(|err| panic!("built-in nginx format is invalid: {err}"));
    map.insert("nginx", nginx);

    map
});

/// A named log-line grammar: recognition pattern plus timestamp layout.
#[derive(Debug, Clone)]
pub struct LogFormat {
    name: String,
    pattern: Regex,
    time_format: String,
}

impl LogFormat {
    /// Compile a format definition.
    ///
    /// Fails when `pattern` is not a valid regex or when it lacks any of the
    /// required named groups (timestamp, verb, path, status,
    /// body_bytes_sent, request_time, upstream_response_time).
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        time_format: impl Into<String>,
    ) -> Result<Self, FormatError> {
        let name = name.into();

        let pattern = Regex::new(pattern).map_err(|source| FormatError::InvalidExpression {
            name: name.clone(),
            source: Box::new(source),
        })?;

        let groups: Vec<&str> = pattern.capture_names().flatten().collect();
        let missing: Vec<String> = REQUIRED_GROUPS
            .iter()
            .copied()
            .filter(|required| !groups.contains(required))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(FormatError::MissingGroups { name, missing });
        }

        Ok(Self {
            name,
            pattern,
            time_format: time_format.into(),
        })
    }

    /// All built-in formats, registered for the process lifetime.
    pub fn builtins() -> &'static HashMap<&'static str, LogFormat> {
        &BUILTINS
    }

    /// Look up a built-in format by name.
    pub fn builtin(name: &str) -> Option<&'static LogFormat> {
        BUILTINS.get(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Match one log line. `None` means the line does not belong to this
    /// format and should be skipped; it is never an error.
    pub fn parse(&self, line: &str) -> Option<LogEntry> {
        let captures = self.pattern.captures(line)?;

        let mut fields = HashMap::new();
        for name in self.pattern.capture_names().flatten() {
            if let Some(value) = captures.name(name) {
                fields.insert(name.to_string(), value.as_str().to_string());
            }
        }

        Some(LogEntry::new(fields))
    }

    /// Parse an entry's timestamp field with this format's time layout.
    pub fn parse_timestamp(&self, value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_str(value, &self.time_format)
    }
}
