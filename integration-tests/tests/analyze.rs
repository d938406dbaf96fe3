//! End-to-end passes through the public library API.

use std::fs::File;
use std::io::BufReader;

use integration_tests::{nginx_line, write_log};
use logline_core::{Analyzer, Config};
use pretty_assertions::assert_eq;

fn nginx_config() -> Config {
    Config {
        format: Some("nginx".to_string()),
        ..Config::default()
    }
}

fn analyze(config: &Config, lines: &[String]) -> logline_core::Report {
    let log = write_log(lines);
    let reader = BufReader::new(File::open(log.path()).expect("reopen temp logfile"));
    Analyzer::new(reader, config)
        .expect("construct analyzer")
        .run()
        .expect("run analysis")
}

#[test]
fn logfile_to_report() {
    let report = analyze(
        &nginx_config(),
        &[
            nginx_line("16/Jan/2014:13:30:30 +0000", "POST", "/auth/token", 200, 0.5),
            nginx_line("16/Jan/2014:13:30:31 +0000", "GET", "/sub/folder", 200, 0.25),
            nginx_line("16/Jan/2014:13:30:32 +0000", "GET", "/auth/token", 404, 0.25),
        ],
    );

    assert_eq!(report.requests(), 3);
    assert_eq!(report.verbs()[0], ("GET", 2));
    assert_eq!(report.status()[0], ("2", 2));
    assert_eq!(report.path_requests()[0], ("/auth/token", 2));
    assert!(report.execution_time().is_some());

    let per_path: u64 = report.path_requests().iter().map(|(_, n)| n).sum();
    assert_eq!(per_path, report.requests());
}

#[test]
fn monitored_prefixes_group_and_filter() {
    let config = Config {
        paths: vec!["/auth".to_string()],
        ..nginx_config()
    };

    let report = analyze(
        &config,
        &[
            nginx_line("16/Jan/2014:13:30:30 +0000", "POST", "/auth/token", 200, 0.5),
            nginx_line("16/Jan/2014:13:30:31 +0000", "GET", "/auth/refresh", 200, 0.25),
            nginx_line("16/Jan/2014:13:30:32 +0000", "GET", "/not/interesting", 200, 0.25),
        ],
    );

    assert_eq!(report.requests(), 2);
    assert_eq!(report.path_requests(), [("/auth", 2)]);
}

#[test]
fn report_renders_in_every_registered_format() {
    let report = analyze(
        &nginx_config(),
        &[nginx_line("16/Jan/2014:13:30:30 +0000", "GET", "/a", 200, 0.5)],
    );

    for name in logline_core::render::renderer_names() {
        let rendered = report
            .render(true, Some(name))
            .unwrap_or_else(|err| panic!("renderer {name} failed: {err}"));
        assert!(!rendered.is_empty(), "renderer {name} produced nothing");
    }
}

#[test]
fn age_window_end_to_end() {
    use chrono::{Local, TimeDelta};

    let stamp = |offset: i64| {
        (Local::now() + TimeDelta::minutes(offset))
            .format("%d/%b/%Y:%H:%M:%S %z")
            .to_string()
    };

    let config = Config {
        max_age: Some(15),
        ..nginx_config()
    };

    let report = analyze(
        &config,
        &[
            nginx_line(&stamp(-20), "GET", "/too-old", 200, 0.5),
            nginx_line(&stamp(-10), "GET", "/in-window", 200, 0.5),
            nginx_line(&stamp(5), "GET", "/future", 200, 0.5),
            nginx_line(&stamp(-1), "GET", "/after-future", 200, 0.5),
        ],
    );

    assert_eq!(report.requests(), 1);
    assert_eq!(report.path_requests(), [("/in-window", 1)]);
}
