//! Gap handling and validation of raw provider output.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::provider::{DataError, RawPrice};
use crate::domain::PricePoint;

/// How missing closes are resolved. Exactly one policy applies per series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Carry the last known close forward. Leading gaps are dropped.
    #[default]
    ForwardFill,
    /// Pull the next known close backward. Trailing gaps are dropped.
    BackwardFill,
    /// Drop every missing day.
    Drop,
}

impl FillPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FillPolicy::ForwardFill => "forward_fill",
            FillPolicy::BackwardFill => "backward_fill",
            FillPolicy::Drop => "drop",
        }
    }
}

impl fmt::Display for FillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FillPolicy {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward_fill" | "ffill" => Ok(FillPolicy::ForwardFill),
            "backward_fill" | "bfill" => Ok(FillPolicy::BackwardFill),
            "drop" => Ok(FillPolicy::Drop),
            other => Err(DataError::UnknownFillPolicy(other.to_string())),
        }
    }
}

/// Sort, de-gap, and validate raw closes into a core-ready series.
///
/// Fails on duplicate dates, on any present close that is non-finite or not
/// positive, and when nothing is left after gap handling.
pub fn prepare(raw: &[RawPrice], policy: FillPolicy) -> Result<Vec<PricePoint>, DataError> {
    let mut by_date: BTreeMap<NaiveDate, Option<f64>> = BTreeMap::new();
    for r in raw {
        if let Some(close) = r.close {
            if !(close.is_finite() && close > 0.0) {
                return Err(DataError::NonPositivePrice {
                    date: r.date,
                    close,
                });
            }
        }
        if by_date.insert(r.date, r.close).is_some() {
            return Err(DataError::DuplicateDate(r.date));
        }
    }

    let ordered: Vec<(NaiveDate, Option<f64>)> = by_date.into_iter().collect();
    let filled: Vec<(NaiveDate, Option<f64>)> = match policy {
        FillPolicy::ForwardFill => fill_forward(ordered.iter().copied()).collect(),
        FillPolicy::BackwardFill => {
            let mut v: Vec<_> = fill_forward(ordered.iter().rev().copied()).collect();
            v.reverse();
            v
        }
        FillPolicy::Drop => ordered,
    };

    let total = filled.len();
    let prices: Vec<PricePoint> = filled
        .into_iter()
        .filter_map(|(date, close)| close.map(|c| PricePoint::new(date, c)))
        .collect();

    let dropped = total - prices.len();
    if dropped > 0 {
        warn!(target: "crosslab::data", dropped, policy = %policy, "dropped unfillable gaps");
    }
    if prices.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(prices)
}

/// Check a caller-built series against the invariants `prepare` guarantees:
/// every close positive and finite, dates strictly ascending.
pub fn validate_series(prices: &[PricePoint]) -> Result<(), DataError> {
    if let Some(bad) = prices.iter().find(|p| !p.is_valid()) {
        return Err(DataError::NonPositivePrice {
            date: bad.date,
            close: bad.close,
        });
    }
    for pair in prices.windows(2) {
        if pair[1].date == pair[0].date {
            return Err(DataError::DuplicateDate(pair[1].date));
        }
        if pair[1].date < pair[0].date {
            return Err(DataError::OutOfOrder(pair[1].date));
        }
    }
    Ok(())
}

/// Replace each `None` with the most recent `Some` seen so far in iteration order.
fn fill_forward(
    iter: impl Iterator<Item = (NaiveDate, Option<f64>)>,
) -> impl Iterator<Item = (NaiveDate, Option<f64>)> {
    iter.scan(None, |last: &mut Option<f64>, (date, close)| {
        if close.is_some() {
            *last = close;
        }
        Some((date, close.or(*last)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn gappy() -> Vec<RawPrice> {
        vec![
            RawPrice::new(d(2), None),
            RawPrice::new(d(3), Some(100.0)),
            RawPrice::new(d(4), None),
            RawPrice::new(d(5), Some(102.0)),
            RawPrice::new(d(8), None),
        ]
    }

    fn closes(p: &[PricePoint]) -> Vec<f64> {
        p.iter().map(|x| x.close).collect()
    }

    #[test]
    fn forward_fill_drops_leading_gap() {
        let p = prepare(&gappy(), FillPolicy::ForwardFill).unwrap();
        assert_eq!(p[0].date, d(3));
        assert_eq!(closes(&p), vec![100.0, 100.0, 102.0, 102.0]);
    }

    #[test]
    fn backward_fill_drops_trailing_gap() {
        let p = prepare(&gappy(), FillPolicy::BackwardFill).unwrap();
        assert_eq!(p[0].date, d(2));
        assert_eq!(p.last().unwrap().date, d(5));
        assert_eq!(closes(&p), vec![100.0, 100.0, 102.0, 102.0]);
    }

    #[test]
    fn drop_removes_all_gaps() {
        let p = prepare(&gappy(), FillPolicy::Drop).unwrap();
        assert_eq!(closes(&p), vec![100.0, 102.0]);
    }

    #[test]
    fn sorts_unordered_input() {
        let raw = vec![
            RawPrice::new(d(5), Some(3.0)),
            RawPrice::new(d(3), Some(1.0)),
            RawPrice::new(d(4), Some(2.0)),
        ];
        let p = prepare(&raw, FillPolicy::Drop).unwrap();
        assert_eq!(closes(&p), vec![1.0, 2.0, 3.0]);
        assert!(p.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn rejects_duplicates() {
        let raw = vec![RawPrice::new(d(3), Some(1.0)), RawPrice::new(d(3), Some(2.0))];
        assert!(matches!(
            prepare(&raw, FillPolicy::Drop),
            Err(DataError::DuplicateDate(date)) if date == d(3)
        ));
    }

    #[test]
    fn rejects_bad_prices() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let raw = vec![RawPrice::new(d(3), Some(bad))];
            assert!(matches!(
                prepare(&raw, FillPolicy::ForwardFill),
                Err(DataError::NonPositivePrice { .. })
            ));
        }
    }

    #[test]
    fn all_missing_is_empty() {
        let raw = vec![RawPrice::new(d(3), None), RawPrice::new(d(4), None)];
        assert!(matches!(
            prepare(&raw, FillPolicy::ForwardFill),
            Err(DataError::Empty)
        ));
        assert!(matches!(prepare(&[], FillPolicy::Drop), Err(DataError::Empty)));
    }

    #[test]
    fn validate_series_accepts_prepared_output() {
        let p = prepare(&gappy(), FillPolicy::ForwardFill).unwrap();
        assert!(validate_series(&p).is_ok());
        assert!(validate_series(&[]).is_ok());
    }

    #[test]
    fn validate_series_rejects_bad_series() {
        let zero = vec![PricePoint::new(d(3), 100.0), PricePoint::new(d(4), 0.0)];
        assert!(matches!(
            validate_series(&zero),
            Err(DataError::NonPositivePrice { date, .. }) if date == d(4)
        ));

        let dup = vec![PricePoint::new(d(3), 1.0), PricePoint::new(d(3), 2.0)];
        assert!(matches!(
            validate_series(&dup),
            Err(DataError::DuplicateDate(date)) if date == d(3)
        ));

        let back = vec![PricePoint::new(d(5), 1.0), PricePoint::new(d(4), 2.0)];
        assert!(matches!(
            validate_series(&back),
            Err(DataError::OutOfOrder(date)) if date == d(4)
        ));
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("ffill".parse::<FillPolicy>().unwrap(), FillPolicy::ForwardFill);
        assert_eq!("backward_fill".parse::<FillPolicy>().unwrap(), FillPolicy::BackwardFill);
        assert_eq!("drop".parse::<FillPolicy>().unwrap(), FillPolicy::Drop);
        assert!(matches!(
            "interpolate".parse::<FillPolicy>(),
            Err(DataError::UnknownFillPolicy(_))
        ));
        assert_eq!(FillPolicy::BackwardFill.to_string(), "backward_fill");
    }
}
