use serde_json::json;

use crate::render::{RenderError, Renderer};
use crate::report::Report;

/// Machine-readable dump of the report views.
pub(crate) struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, report: &Report, path_stats: bool) -> Result<String, RenderError> {
        let mut root = json!({
            "requests": report.requests(),
            "execution_time_seconds": report.execution_time().map(|d| d.as_secs_f64()),
            "verbs": counts(&report.verbs()),
            "status": counts(&report.status()),
            "path_requests": counts(&report.path_requests()),
            "times": report.times(),
            "upstream_times": report.upstream_times(),
            "body_bytes": report.body_bytes(),
        });

        if path_stats {
            let path_status = report.path_status();
            let path_times = report.path_times();
            let path_upstream_times = report.path_upstream_times();
            let path_body_bytes = report.path_body_bytes();

            let mut paths = serde_json::Map::new();
            for (i, (path, verbs)) in report.path_verbs().iter().enumerate() {
                paths.insert(
                    path.to_string(),
                    json!({
                        "verbs": counts(verbs),
                        "status": counts(&path_status[i].1),
                        "times": path_times[i].1,
                        "upstream_times": path_upstream_times[i].1,
                        "body_bytes": path_body_bytes[i].1,
                    }),
                );
            }
            root["paths"] = serde_json::Value::Object(paths);
        }

        Ok(serde_json::to_string_pretty(&root)?)
    }
}

fn counts(entries: &[(&str, u64)]) -> serde_json::Value {
    entries
        .iter()
        .map(|(name, count)| json!({ "name": name, "count": count }))
        .collect()
}
