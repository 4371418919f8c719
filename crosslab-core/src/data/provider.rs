//! Price provider trait and structured data errors.
//!
//! The `PriceProvider` trait abstracts over where closes come from (CSV files,
//! synthetic generators, remote feeds) so the runner can swap sources and tests
//! can supply fixtures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily close as delivered by a provider, before gap handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPrice {
    pub date: NaiveDate,
    /// `None` for a non-trading or missing day.
    pub close: Option<f64>,
}

impl RawPrice {
    pub fn new(date: NaiveDate, close: Option<f64>) -> Self {
        Self { date, close }
    }
}

/// Errors from fetching or preparing a price series.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("duplicate date {0} in price series")]
    DuplicateDate(NaiveDate),

    #[error("date {0} is earlier than the point before it")]
    OutOfOrder(NaiveDate),

    #[error("close on {date} is not a positive finite number: {close}")]
    NonPositivePrice { date: NaiveDate, close: f64 },

    #[error("price series is empty after gap handling")]
    Empty,

    #[error("unknown fill policy '{0}' (expected forward_fill, backward_fill, or drop)")]
    UnknownFillPolicy(String),

    #[error("invalid provider settings: {0}")]
    InvalidSettings(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

/// A source of daily closes for one symbol.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch closes for `symbol` between `start` and `end`, both inclusive.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawPrice>, DataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixtureProvider;

    impl PriceProvider for FixtureProvider {
        fn name(&self) -> &str {
            "fixture"
        }

        fn fetch(
            &self,
            symbol: &str,
            start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<RawPrice>, DataError> {
            if symbol != "SPY" {
                return Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                });
            }
            Ok(vec![RawPrice::new(start, Some(100.0))])
        }
    }

    #[test]
    fn provider_is_object_safe() {
        let provider: &dyn PriceProvider = &FixtureProvider;
        let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(provider.name(), "fixture");
        assert_eq!(provider.fetch("SPY", d, d).unwrap().len(), 1);
        let err = provider.fetch("QQQ", d, d).unwrap_err();
        assert_eq!(err.to_string(), "symbol not found: QQQ");
    }
}
