//! Simple Moving Average (SMA).
//!
//! Trailing mean of closes, inclusive of the current point.
//! Lookback: period - 1 (first valid value at index period-1).

use super::Indicator;
use crate::domain::PricePoint;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    /// Callers validate `period >= 1`; a zero period yields an all-NaN series.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, prices: &[PricePoint]) -> Vec<f64> {
        let n = prices.len();
        let mut result = vec![f64::NAN; n];

        if self.period == 0 || n < self.period {
            return result;
        }

        // Summed per window, not rolled: equal windows give bit-identical means.
        for i in (self.period - 1)..n {
            let window = &prices[(i + 1 - self.period)..=i];
            let sum: f64 = window.iter().map(|p| p.close).sum();
            result[i] = sum / self.period as f64;
        }

        result
    }
}
