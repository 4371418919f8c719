//! Price indicators.
//!
//! Indicators are precomputed once over the whole series and return a vector
//! aligned index-for-index with the input, NaN during the look-back.

pub mod sma;

pub use sma::Sma;

use crate::domain::PricePoint;

/// A single-series indicator over closing prices.
pub trait Indicator: Send + Sync {
    fn name(&self) -> &str;

    /// Number of leading points that produce NaN.
    fn lookback(&self) -> usize;

    fn compute(&self, prices: &[PricePoint]) -> Vec<f64>;
}

/// Build a daily price series from bare closes for indicator tests.
#[cfg(test)]
pub fn make_prices(closes: &[f64]) -> Vec<PricePoint> {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    crate::domain::price::series_from_closes(start, closes)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
