//! TradeReturn: a closed long position and its realized return.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PricePoint;

/// Why a long position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// The crossover flipped to `Sell`.
    SignalExit,
    /// Close fell below entry * (1 - stop_loss_fraction).
    StopLoss,
    /// Closed on the last bar because `force_close_at_end` was requested.
    EndOfData,
}

/// A realized round trip: entry on a `Buy`, exit on a stop or `Sell`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeReturn {
    // ── Entry ──
    pub entry_index: usize,
    pub entry_date: NaiveDate,
    pub entry_price: f64,

    // ── Exit ──
    pub exit_index: usize,
    pub exit_date: NaiveDate,
    pub exit_price: f64,
    pub exit_reason: ExitReason,

    /// (exit - entry) / entry, as a fraction.
    pub return_pct: f64,
}

impl TradeReturn {
    /// Realize a long entered at `entry_price` by exiting at `exit`.
    pub fn close(
        entry_index: usize,
        entry_date: NaiveDate,
        entry_price: f64,
        exit_index: usize,
        exit: &PricePoint,
        exit_reason: ExitReason,
    ) -> Self {
        Self {
            entry_index,
            entry_date,
            entry_price,
            exit_index,
            exit_date: exit.date,
            exit_price: exit.close,
            exit_reason,
            return_pct: simple_return(entry_price, exit.close),
        }
    }

    pub fn is_winner(&self) -> bool {
        self.return_pct > 0.0
    }

    pub fn bars_held(&self) -> usize {
        self.exit_index - self.entry_index
    }
}

/// Simple return of a long round trip.
pub fn simple_return(entry_price: f64, exit_price: f64) -> f64 {
    (exit_price - entry_price) / entry_price
}

/// Project the realized returns out of a trade list, preserving order.
pub fn returns_of(trades: &[TradeReturn]) -> Vec<f64> {
    trades.iter().map(|t| t.return_pct).collect()
}
