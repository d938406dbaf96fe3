//! Shared helpers for the end-to-end tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// One nginx `combined_timed` access log line.
pub fn nginx_line(timestamp: &str, verb: &str, path: &str, status: u16, time: f64) -> String {
    format!(
        "123.123.123.123 - frank [{timestamp}] \"{verb} {path} HTTP/1.1\" \
         {status} 174 \"-\" \"UAString\" \"-\" {time} {time}"
    )
}

/// Write `lines` to a temp logfile, one entry per line.
pub fn write_log(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp logfile");
    for line in lines {
        writeln!(file, "{line}").expect("write log line");
    }
    file.flush().expect("flush temp logfile");
    file
}
