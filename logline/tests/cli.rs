//! Binary-level tests: flags, stdin piping, exit codes.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn logline() -> Command {
    Command::cargo_bin("logline").expect("logline binary built")
}

fn nginx_line(timestamp: &str, verb: &str, path: &str, status: u16, time: f64) -> String {
    format!(
        "123.123.123.123 - frank [{timestamp}] \"{verb} {path} HTTP/1.1\" \
         {status} 174 \"-\" \"UAString\" \"-\" {time} {time}"
    )
}

fn write_log(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp logfile");
    for line in lines {
        writeln!(file, "{line}").expect("write log line");
    }
    file.flush().expect("flush temp logfile");
    file
}

fn sample_log() -> Vec<String> {
    vec![
        nginx_line("16/Jan/2014:13:30:30 +0000", "POST", "/auth/token", 200, 0.5),
        nginx_line("16/Jan/2014:13:30:31 +0000", "GET", "/sub/folder", 200, 0.25),
    ]
}

#[test]
fn analyzes_a_logfile_argument() {
    let log = write_log(&sample_log());

    logline()
        .arg(log.path())
        .args(["--format", "nginx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Requests: 2"));
}

#[test]
fn reads_stdin_when_no_logfile_is_given() {
    logline()
        .args(["--format", "nginx"])
        .write_stdin(sample_log().join("\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Requests: 2"));
}

#[test]
fn missing_format_exits_nonzero() {
    logline()
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no log format"));
}

#[test]
fn unknown_output_format_exits_nonzero() {
    let log = write_log(&sample_log());

    logline()
        .arg(log.path())
        .args(["--format", "nginx", "--output", "yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown output format 'yaml'"));
}

#[test]
fn missing_logfile_exits_nonzero() {
    logline()
        .arg("/nonexistent/access.log")
        .args(["--format", "nginx"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot open logfile"));
}

#[test]
fn csv_output_with_path_stats() {
    let log = write_log(&sample_log());

    logline()
        .arg(log.path())
        .args(["--format", "nginx", "--output", "csv", "--path-stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path,requests,"))
        .stdout(predicate::str::contains("/auth/token,1,"))
        .stdout(predicate::str::contains("total,2,"));
}

#[test]
fn monitored_paths_flag_groups_requests() {
    let log = write_log(&sample_log());

    logline()
        .arg(log.path())
        .args(["--format", "nginx", "--path", "/auth", "--output", "csv", "--path-stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/auth,1,"))
        .stdout(predicate::str::contains("total,1,"));
}

#[test]
fn config_file_supplies_defaults() {
    let log = write_log(&sample_log());
    let mut config = NamedTempFile::new().expect("create temp config");
    writeln!(config, "format = \"nginx\"\noutput = \"csv\"").expect("write config");

    logline()
        .arg(log.path())
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("path,requests,"));
}

#[test]
fn flags_override_the_config_file() {
    let log = write_log(&sample_log());
    let mut config = NamedTempFile::new().expect("create temp config");
    writeln!(config, "format = \"nginx\"\noutput = \"csv\"").expect("write config");

    logline()
        .arg(log.path())
        .arg("--config")
        .arg(config.path())
        .args(["--output", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Requests: 2"));
}

#[test]
fn timing_goes_to_stderr() {
    let log = write_log(&sample_log());

    logline()
        .arg(log.path())
        .args(["--format", "nginx", "--timing"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Analyzed logs in"));
}
