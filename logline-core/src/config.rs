//! Analysis configuration, loadable from a TOML file and overridable by the
//! CLI layer.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// HTTP verbs tracked when none are configured.
pub const DEFAULT_VERBS: &[&str] = &["DELETE", "GET", "PATCH", "POST", "PUT"];

/// Status code prefixes tracked when none are configured.
pub const DEFAULT_STATUS_CODES: &[&str] = &["1", "2", "3", "4", "5"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// Everything one analysis pass needs to know.
///
/// `format` names a registered format; any unregistered value degrades to an
/// ad-hoc regex pattern. `regex` supplies a pattern directly, bypassing the
/// name lookup. Custom patterns parse timestamps with `time_format`,
/// falling back to the nginx layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Registered format name, or an ad-hoc pattern.
    pub format: Option<String>,

    /// Explicit regex pattern with named capture groups.
    pub regex: Option<String>,

    /// chrono strftime layout for custom patterns.
    pub time_format: Option<String>,

    /// HTTP verbs to track.
    pub verbs: Vec<String>,

    /// Status codes to track; prefixes group code families, e.g. "4".
    pub status_codes: Vec<String>,

    /// Monitored path prefixes. Empty means group by full request path.
    pub paths: Vec<String>,

    /// Only analyze entries younger than this many minutes.
    pub max_age: Option<i64>,

    /// Report output format name.
    pub output: Option<String>,

    /// Include per-path detail in the report.
    pub path_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: None,
            regex: None,
            time_format: None,
            verbs: DEFAULT_VERBS.iter().map(|v| v.to_string()).collect(),
            status_codes: DEFAULT_STATUS_CODES.iter().map(|c| c.to_string()).collect(),
            paths: Vec::new(),
            max_age: None,
            output: None,
            path_stats: false,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_track_common_verbs_and_all_status_families() {
        let config = Config::default();

        assert_eq!(config.verbs, ["DELETE", "GET", "PATCH", "POST", "PUT"]);
        assert_eq!(config.status_codes, ["1", "2", "3", "4", "5"]);
        assert!(config.paths.is_empty());
        assert!(config.format.is_none());
        assert!(config.max_age.is_none());
        assert!(!config.path_stats);
    }

    #[test]
    fn from_file_overrides_defaults_only_where_set() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            format = "nginx"
            paths = ["/auth", "/api"]
            max_age = 15
            output = "table"
            path_stats = true
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.format.as_deref(), Some("nginx"));
        assert_eq!(config.paths, ["/auth", "/api"]);
        assert_eq!(config.max_age, Some(15));
        assert_eq!(config.output.as_deref(), Some("table"));
        assert!(config.path_stats);
        // untouched keys keep their defaults
        assert_eq!(config.verbs, ["DELETE", "GET", "PATCH", "POST", "PUT"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "fromat = \"nginx\"").unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            Config::from_file("/nonexistent/logline.toml"),
            Err(ConfigError::ReadFile { .. })
        ));
    }
}
