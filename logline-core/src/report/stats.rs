use serde::Serialize;

/// Statistic snapshot of a sample list: mean, median, 90th/75th/25th
/// percentile. Every field is `None` for an empty list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ListStats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub perc90: Option<f64>,
    pub perc75: Option<f64>,
    pub perc25: Option<f64>,
}

impl ListStats {
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

        Self {
            mean: Some(mean),
            median: Some(percentile(&sorted, 50.0)),
            perc90: Some(percentile(&sorted, 90.0)),
            perc75: Some(percentile(&sorted, 75.0)),
            perc25: Some(percentile(&sorted, 25.0)),
        }
    }
}

/// Percentile with linear interpolation between closest ranks.
///
/// `sorted` must be non-empty and ascending.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let low = rank.floor() as usize;
    let high = rank.ceil() as usize;
    let fraction = rank - low as f64;

    sorted[low] + (sorted[high] - sorted[low]) * fraction
}
