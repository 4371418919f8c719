//! PricePoint: one closing price on one trading day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily close for the traded asset.
///
/// Series handed to the core are ascending by `date` with no duplicates and
/// no gaps left unfilled; `data::prepare` is the only place that enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// True when the close can be traded on: finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// Build a daily series from bare closes, starting at `start` and stepping one
/// calendar day per point. Convenience for tests, benches, and fixtures.
pub fn series_from_closes(start: NaiveDate, closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(start + chrono::Duration::days(i as i64), close))
        .collect()
}
