use crate::render::{NO_REQUESTS, RenderError, Renderer};
use crate::report::{ListStats, Report};

/// Default renderer: indented plain-text lists.
pub(crate) struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, report: &Report, path_stats: bool) -> Result<String, RenderError> {
        if report.requests() == 0 {
            return Ok(NO_REQUESTS.to_string());
        }

        let mut out = String::new();

        out.push_str(&format!("Requests: {}\n\n", report.requests()));
        section(&mut out, 0, "HTTP Verbs:", &counts_block(&report.verbs()));
        section(&mut out, 0, "Status Codes:", &counts_block(&report.status()));
        section(&mut out, 0, "Paths:", &counts_block(&report.path_requests()));
        section(&mut out, 0, "Times [s]:", &stats_block(&report.times()));
        section(
            &mut out,
            0,
            "Upstream Times [s]:",
            &stats_block(&report.upstream_times()),
        );
        section(
            &mut out,
            0,
            "Body Bytes Sent [B]:",
            &stats_block(&report.body_bytes()),
        );

        if path_stats {
            let path_verbs = report.path_verbs();
            let path_status = report.path_status();
            let path_times = report.path_times();
            let path_upstream_times = report.path_upstream_times();
            let path_body_bytes = report.path_body_bytes();

            for (i, (path, verbs)) in path_verbs.iter().enumerate() {
                out.push('\n');
                out.push_str(path);
                out.push_str("\n\n");
                section(&mut out, 4, "HTTP Verbs:", &counts_block(verbs));
                section(&mut out, 4, "Status Codes:", &counts_block(&path_status[i].1));
                section(&mut out, 4, "Times [s]:", &stats_block(&path_times[i].1));
                section(
                    &mut out,
                    4,
                    "Upstream Times [s]:",
                    &stats_block(&path_upstream_times[i].1),
                );
                section(
                    &mut out,
                    4,
                    "Body Bytes Sent [B]:",
                    &stats_block(&path_body_bytes[i].1),
                );
            }
        }

        Ok(out.trim_end().to_string())
    }
}

fn section(out: &mut String, indent: usize, title: &str, body: &str) {
    let pad = " ".repeat(indent);
    out.push_str(&pad);
    out.push_str(title);
    out.push('\n');
    for line in body.lines() {
        out.push_str(&pad);
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}

fn counts_block(counts: &[(&str, u64)]) -> String {
    counts
        .iter()
        .map(|(key, count)| format!("{count:>10}   {key}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn stats_block(stats: &ListStats) -> String {
    [
        (stats.mean, "mean"),
        (stats.median, "median"),
        (stats.perc90, "90th percentile"),
        (stats.perc75, "75th percentile"),
        (stats.perc25, "25th percentile"),
    ]
    .iter()
    .map(|(value, label)| match value {
        Some(value) => format!("{value:>10.3}   {label}"),
        None => format!("{:>10}   {label}", "-"),
    })
    .collect::<Vec<_>>()
    .join("\n")
}
