//! Calendar-month return grid for heatmap-style reporting.
//!
//! Returns are bucketed by the trade's exit month and compounded within the
//! month: prod(1 + r) - 1. The grid spans every year from the first to the
//! last exit; months inside that span with no exits read 0.0, months outside
//! it read `None`.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crosslab_core::domain::TradeReturn;

/// Year × month table of compounded returns. Row `i` belongs to `years[i]`,
/// column `m` to calendar month `m + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyGrid {
    years: Vec<i32>,
    rows: Vec<[Option<f64>; 12]>,
}

impl MonthlyGrid {
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn rows(&self) -> &[[Option<f64>; 12]] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Compounded return for `month` (1-12) of `year`.
    pub fn get(&self, year: i32, month: u32) -> Option<f64> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let row = self.years.iter().position(|&y| y == year)?;
        self.rows[row][(month - 1) as usize]
    }
}

/// Bucket trades by exit month and compound within each bucket.
pub fn monthly_returns(trades: &[TradeReturn]) -> MonthlyGrid {
    let mut growth: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for t in trades {
        let key = (t.exit_date.year(), t.exit_date.month());
        *growth.entry(key).or_insert(1.0) *= 1.0 + t.return_pct;
    }

    let (Some(&first), Some(&last)) = (growth.keys().next(), growth.keys().next_back()) else {
        return MonthlyGrid::default();
    };

    let years: Vec<i32> = (first.0..=last.0).collect();
    let rows = years
        .iter()
        .map(|&year| {
            let mut row = [None; 12];
            for (m, cell) in row.iter_mut().enumerate() {
                let key = (year, m as u32 + 1);
                if key < first || key > last {
                    continue;
                }
                *cell = Some(growth.get(&key).map_or(0.0, |g| g - 1.0));
            }
            row
        })
        .collect();

    MonthlyGrid { years, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crosslab_core::domain::ExitReason;

    fn trade(y: i32, m: u32, d: u32, r: f64) -> TradeReturn {
        let exit = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        TradeReturn {
            entry_index: 0,
            entry_date: exit,
            entry_price: 100.0,
            exit_index: 1,
            exit_date: exit,
            exit_price: 100.0 * (1.0 + r),
            exit_reason: ExitReason::SignalExit,
            return_pct: r,
        }
    }

    #[test]
    fn compounds_within_month() {
        let grid = monthly_returns(&[trade(2023, 3, 1, 0.1), trade(2023, 3, 20, -0.1)]);
        assert_eq!(grid.years(), &[2023]);
        assert!((grid.get(2023, 3).unwrap() - (1.1 * 0.9 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn span_months_without_trades_are_zero() {
        let grid = monthly_returns(&[trade(2023, 11, 3, 0.02), trade(2024, 2, 8, 0.01)]);
        assert_eq!(grid.years(), &[2023, 2024]);
        // Before the first exit month and after the last: absent.
        assert_eq!(grid.get(2023, 10), None);
        assert_eq!(grid.get(2024, 3), None);
        // Inside the span without exits: flat.
        assert_eq!(grid.get(2023, 12), Some(0.0));
        assert_eq!(grid.get(2024, 1), Some(0.0));
        assert!((grid.get(2023, 11).unwrap() - 0.02).abs() < 1e-12);
        assert!((grid.get(2024, 2).unwrap() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn empty_trades_give_empty_grid() {
        let grid = monthly_returns(&[]);
        assert!(grid.is_empty());
        assert!(grid.rows().is_empty());
    }

    #[test]
    fn out_of_range_lookups() {
        let grid = monthly_returns(&[trade(2023, 5, 1, 0.01)]);
        assert_eq!(grid.get(2023, 0), None);
        assert_eq!(grid.get(2023, 13), None);
        assert_eq!(grid.get(1999, 5), None);
    }
}
