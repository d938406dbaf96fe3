use crate::render::rows::{METRIC_NAMES, STAT_NAMES, row_model};
use crate::render::{RenderError, Renderer};
use crate::report::Report;

/// CSV/TSV renderer over the shared row model. Always emits a header row
/// and the `total` row, so an empty report still yields valid output.
pub(crate) struct DelimitedRenderer {
    delimiter: u8,
}

impl DelimitedRenderer {
    pub(crate) fn csv() -> Self {
        Self { delimiter: b',' }
    }

    pub(crate) fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl Renderer for DelimitedRenderer {
    fn render(&self, report: &Report, path_stats: bool) -> Result<String, RenderError> {
        let model = row_model(report, path_stats, "total");

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        let mut headers = vec!["path".to_string(), "requests".to_string()];
        headers.extend(model.verbs.iter().map(|verb| format!("verb_{verb}")));
        headers.extend(model.status.iter().map(|status| format!("status_{status}")));
        for metric in METRIC_NAMES {
            for stat in STAT_NAMES {
                headers.push(format!("{metric}_{stat}"));
            }
        }
        writer.write_record(&headers)?;

        for row in &model.rows {
            let mut record = vec![row.label.clone(), row.requests.to_string()];
            record.extend(row.verb_counts.iter().map(u64::to_string));
            record.extend(row.status_counts.iter().map(u64::to_string));
            record.extend(row.stats.iter().map(|stat| match stat {
                Some(value) => value.to_string(),
                None => String::new(),
            }));
            writer.write_record(&record)?;
        }

        let data = writer
            .into_inner()
            .map_err(|err| RenderError::Csv(err.into_error().into()))?;
        Ok(String::from_utf8_lossy(&data).trim_end().to_string())
    }
}
