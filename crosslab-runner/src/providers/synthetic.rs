//! Synthetic price provider: a seeded random walk on weekdays.
//!
//! The walk is deterministic per (seed, symbol) so repeated fetches agree.
//! A configurable share of days is left missing to exercise gap handling.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crosslab_core::data::{DataError, PriceProvider, RawPrice};

#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    pub seed: u64,
    pub start_price: f64,
    /// Daily returns are drawn uniformly from [-max_daily_move, max_daily_move).
    pub max_daily_move: f64,
    /// Probability that a weekday has no close.
    pub gap_probability: f64,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self {
            seed: 0,
            start_price: 100.0,
            max_daily_move: 0.03,
            gap_probability: 0.0,
        }
    }
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_gaps(mut self, gap_probability: f64) -> Self {
        self.gap_probability = gap_probability;
        self
    }

    /// Reject settings that would panic the sampler or produce unusable closes.
    pub fn validate(&self) -> Result<(), DataError> {
        if !(self.start_price.is_finite() && self.start_price > 0.0) {
            return Err(DataError::InvalidSettings(format!(
                "start_price must be positive, got {}",
                self.start_price
            )));
        }
        // Below 1.0 so a single day can never reach zero.
        if !(self.max_daily_move > 0.0 && self.max_daily_move < 1.0) {
            return Err(DataError::InvalidSettings(format!(
                "max_daily_move must lie in (0, 1), got {}",
                self.max_daily_move
            )));
        }
        if !(0.0..=1.0).contains(&self.gap_probability) {
            return Err(DataError::InvalidSettings(format!(
                "gap_probability must lie in [0, 1], got {}",
                self.gap_probability
            )));
        }
        Ok(())
    }

    fn rng_for(&self, symbol: &str) -> StdRng {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(symbol.as_bytes());
        StdRng::from_seed(*hasher.finalize().as_bytes())
    }
}

impl PriceProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawPrice>, DataError> {
        self.validate()?;
        let mut rng = self.rng_for(symbol);
        let mut price = self.start_price;
        let mut rows = Vec::new();

        for date in start.iter_days().take_while(|d| *d <= end) {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }
            let daily_return: f64 = rng.gen_range(-self.max_daily_move..self.max_daily_move);
            price *= 1.0 + daily_return;

            let missing = rng.gen::<f64>() < self.gap_probability;
            rows.push(RawPrice::new(date, (!missing).then_some(price)));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    #[test]
    fn deterministic_per_symbol() {
        let (start, end) = range();
        let p = SyntheticProvider::new(7);
        assert_eq!(p.fetch("SPY", start, end).unwrap(), p.fetch("SPY", start, end).unwrap());
        assert_ne!(p.fetch("SPY", start, end).unwrap(), p.fetch("QQQ", start, end).unwrap());
    }

    #[test]
    fn skips_weekends_and_stays_positive() {
        let (start, end) = range();
        let rows = SyntheticProvider::new(1).fetch("SPY", start, end).unwrap();
        assert!(!rows.is_empty());
        assert!(rows
            .iter()
            .all(|r| !matches!(r.date.weekday(), Weekday::Sat | Weekday::Sun)));
        assert!(rows.iter().all(|r| r.close.is_some_and(|c| c > 0.0)));
    }

    #[test]
    fn rejects_non_positive_daily_move() {
        let (start, end) = range();
        for max_daily_move in [0.0, -0.02, 1.0, f64::NAN] {
            let provider = SyntheticProvider {
                max_daily_move,
                ..SyntheticProvider::new(5)
            };
            assert!(
                matches!(
                    provider.fetch("SPY", start, end),
                    Err(DataError::InvalidSettings(_))
                ),
                "{max_daily_move}"
            );
        }
    }

    #[test]
    fn rejects_bad_start_price_and_gap_probability() {
        let (start, end) = range();
        let zero_start = SyntheticProvider {
            start_price: 0.0,
            ..SyntheticProvider::new(5)
        };
        assert!(matches!(
            zero_start.fetch("SPY", start, end),
            Err(DataError::InvalidSettings(_))
        ));
        let bad_gaps = SyntheticProvider::new(5).with_gaps(1.5);
        assert!(matches!(
            bad_gaps.fetch("SPY", start, end),
            Err(DataError::InvalidSettings(_))
        ));
    }

    #[test]
    fn gaps_are_emitted() {
        let (start, end) = range();
        let rows = SyntheticProvider::new(3)
            .with_gaps(0.5)
            .fetch("SPY", start, end)
            .unwrap();
        assert!(rows.iter().any(|r| r.close.is_none()));
        assert!(rows.iter().any(|r| r.close.is_some()));
    }
}
