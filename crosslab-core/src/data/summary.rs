//! Descriptive statistics of a raw close series, for data-quality reporting.

use serde::{Deserialize, Serialize};

use super::provider::RawPrice;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    /// Rows delivered by the provider, including gaps.
    pub rows: usize,
    /// Rows with no close.
    pub missing: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation (n - 1); `None` below two observations.
    pub std_dev: Option<f64>,
}

impl DataSummary {
    pub fn from_raw(raw: &[RawPrice]) -> Self {
        let mut closes: Vec<f64> = raw.iter().filter_map(|r| r.close).collect();
        let n = closes.len();

        let mean = (n > 0).then(|| closes.iter().sum::<f64>() / n as f64);
        let std_dev = match mean {
            Some(m) if n >= 2 => {
                let var = closes.iter().map(|c| (c - m).powi(2)).sum::<f64>() / (n - 1) as f64;
                Some(var.sqrt())
            }
            _ => None,
        };

        closes.sort_by(f64::total_cmp);
        let median = match n {
            0 => None,
            _ if n % 2 == 1 => Some(closes[n / 2]),
            _ => Some((closes[n / 2 - 1] + closes[n / 2]) / 2.0),
        };

        Self {
            rows: raw.len(),
            missing: raw.len() - n,
            mean,
            median,
            std_dev,
        }
    }
}
