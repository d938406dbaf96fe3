mod logging;

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use logline_core::{Analyzer, Config, Report};

/// Exit code when the run is cut short by SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser, Debug)]
#[command(
    name = "logline",
    version,
    about = "Analyze web server access logs",
    long_about = "Analyze web server access logs.\n\n\
        Name the logfile to analyze, or leave it out to read from stdin \
        (handy for piping filtered logfiles through grep). Group requests by \
        path prefixes with --path, or point --pathconf at a file listing one \
        prefix per line; without either, paths are grouped automatically."
)]
struct Cli {
    /// Logfile to analyze. Reads stdin when omitted.
    log: Option<PathBuf>,

    /// Predefined log format name (e.g. "nginx").
    #[arg(short, long, conflicts_with = "regex")]
    format: Option<String>,

    /// Custom regex pattern with named capture groups.
    #[arg(short, long)]
    regex: Option<String>,

    /// Timestamp layout for custom patterns (chrono strftime).
    #[arg(long, value_name = "FORMAT")]
    time_format: Option<String>,

    /// Path prefix to monitor; repeatable.
    #[arg(short, long = "path", value_name = "PREFIX", conflicts_with = "pathconf")]
    paths: Vec<String>,

    /// File listing monitored path prefixes, one per line.
    #[arg(short = 'c', long, value_name = "FILE")]
    pathconf: Option<PathBuf>,

    /// TOML config file with analysis defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// HTTP verb to track; repeatable, replaces the default set.
    #[arg(long = "verb", value_name = "VERB")]
    verbs: Vec<String>,

    /// Status code or prefix to track; repeatable, replaces the default set.
    #[arg(long = "status", value_name = "CODE")]
    status_codes: Vec<String>,

    /// Only analyze entries younger than this many minutes.
    #[arg(short = 'a', long, value_name = "MINUTES")]
    max_age: Option<i64>,

    /// Report output format (plain, table, grid, csv, tsv, json).
    #[arg(short, long, value_name = "NAME")]
    output: Option<String>,

    /// Include per-path statistics in the report.
    #[arg(long)]
    path_stats: bool,

    /// Print analysis timing to stderr.
    #[arg(long)]
    timing: bool,
}

fn main() {
    logging::init();

    if let Err(err) = ctrlc::set_handler(|| exit(EXIT_INTERRUPTED)) {
        tracing::warn!(error = %err, "failed to install interrupt handler");
    }

    if let Err(err) = run(Cli::parse()) {
        eprintln!("logline: {err:#}");
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;

    let report = analyze(&cli, &config)?;

    if cli.timing {
        let elapsed = report.execution_time().unwrap_or_default();
        eprintln!("Analyzed logs in {:.3}s.", elapsed.as_secs_f64());
    }

    println!(
        "{}",
        report.render(config.path_stats, config.output.as_deref())?
    );

    Ok(())
}

fn analyze(cli: &Cli, config: &Config) -> Result<Report> {
    let report = match &cli.log {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open logfile {}", path.display()))?;
            Analyzer::new(BufReader::new(file), config)?.run()?
        }
        None => Analyzer::new(io::stdin().lock(), config)?.run()?,
    };
    Ok(report)
}

/// File config first, CLI flags on top.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if cli.format.is_some() {
        config.format = cli.format.clone();
    }
    if cli.regex.is_some() {
        config.regex = cli.regex.clone();
    }
    if cli.time_format.is_some() {
        config.time_format = cli.time_format.clone();
    }
    if !cli.verbs.is_empty() {
        config.verbs = cli.verbs.clone();
    }
    if !cli.status_codes.is_empty() {
        config.status_codes = cli.status_codes.clone();
    }
    if !cli.paths.is_empty() {
        config.paths = cli.paths.clone();
    } else if let Some(pathconf) = &cli.pathconf {
        let listing = fs::read_to_string(pathconf)
            .with_context(|| format!("cannot read path config {}", pathconf.display()))?;
        config.paths = listing
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
    }
    if cli.max_age.is_some() {
        config.max_age = cli.max_age;
    }
    if cli.output.is_some() {
        config.output = cli.output.clone();
    }
    if cli.path_stats {
        config.path_stats = true;
    }

    Ok(config)
}
