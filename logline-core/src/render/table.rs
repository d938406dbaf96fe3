use crate::render::rows::{METRIC_NAMES, STAT_NAMES, row_model};
use crate::render::{NO_REQUESTS, RenderError, Renderer};
use crate::report::Report;

enum TableStyle {
    /// reSt simple table: `====`-rules above and below the header and at
    /// the bottom.
    Simple,
    /// Grid table: every row boxed with `+---+` rules.
    Grid,
}

/// Tabular renderer: one column per verb and status bucket plus the
/// statistic columns, one row per monitored path and a closing `ALL` row.
pub(crate) struct TableRenderer {
    style: TableStyle,
}

impl TableRenderer {
    pub(crate) fn simple() -> Self {
        Self {
            style: TableStyle::Simple,
        }
    }

    pub(crate) fn grid() -> Self {
        Self {
            style: TableStyle::Grid,
        }
    }
}

impl Renderer for TableRenderer {
    fn render(&self, report: &Report, path_stats: bool) -> Result<String, RenderError> {
        if report.requests() == 0 {
            return Ok(NO_REQUESTS.to_string());
        }

        let model = row_model(report, path_stats, "ALL");

        let mut headers = vec!["Path".to_string(), "Requests".to_string()];
        headers.extend(model.verbs.iter().map(|verb| format!("Verb[{verb}]")));
        headers.extend(model.status.iter().map(|status| format!("Status[{status}]")));
        for metric in table_metric_labels() {
            for stat in table_stat_labels() {
                headers.push(format!("{metric}[{stat}]"));
            }
        }

        let rows: Vec<Vec<String>> = model
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.label.clone(), row.requests.to_string()];
                cells.extend(row.verb_counts.iter().map(u64::to_string));
                cells.extend(row.status_counts.iter().map(u64::to_string));
                cells.extend(row.stats.iter().map(|stat| match stat {
                    Some(value) => format!("{value:.3}"),
                    None => "-".to_string(),
                }));
                cells
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                rows.iter()
                    .map(|row| row[col].len())
                    .chain([header.len()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        Ok(match self.style {
            TableStyle::Simple => simple_table(&headers, &rows, &widths),
            TableStyle::Grid => grid_table(&headers, &rows, &widths),
        })
    }
}

fn table_metric_labels() -> [&'static str; METRIC_NAMES.len()] {
    ["Time", "Upstream Time", "Body Bytes"]
}

fn table_stat_labels() -> [&'static str; STAT_NAMES.len()] {
    ["mean", "median", "90th perc", "75th perc", "25th perc"]
}

/// First column is left-aligned text, the rest are numeric.
fn cell(text: &str, width: usize, col: usize) -> String {
    if col == 0 {
        format!("{text:<width$}")
    } else {
        format!("{text:>width$}")
    }
}

fn simple_table(headers: &[String], rows: &[Vec<String>], widths: &[usize]) -> String {
    let rule = widths
        .iter()
        .map(|width| "=".repeat(*width))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![rule.clone()];
    lines.push(format_row(headers, widths, "  "));
    lines.push(rule.clone());
    for row in rows {
        lines.push(format_row(row, widths, "  "));
    }
    lines.push(rule);

    lines.join("\n")
}

fn grid_table(headers: &[String], rows: &[Vec<String>], widths: &[usize]) -> String {
    let rule = |fill: &str| {
        let body = widths
            .iter()
            .map(|width| fill.repeat(width + 2))
            .collect::<Vec<_>>()
            .join("+");
        format!("+{body}+")
    };

    let boxed = |cells: &[String]| {
        let body = cells
            .iter()
            .enumerate()
            .map(|(col, text)| format!(" {} ", cell(text, widths[col], col)))
            .collect::<Vec<_>>()
            .join("|");
        format!("|{body}|")
    };

    let mut lines = vec![rule("-")];
    lines.push(boxed(headers));
    lines.push(rule("="));
    for row in rows {
        lines.push(boxed(row));
        lines.push(rule("-"));
    }

    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize], separator: &str) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(col, text)| cell(text, widths[col], col))
        .collect::<Vec<_>>()
        .join(separator)
        .trim_end()
        .to_string()
}
