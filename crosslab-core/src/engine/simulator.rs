//! Fold over the aligned (price, signal) sequence.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::{ExecutionConfig, ExecutionEvent};
use super::transition::step;
use super::ExecutionError;
use crate::domain::{ExitReason, Position, PricePoint, Signal, TradeReturn};

/// Trades plus the ordered audit trail of every transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub trades: Vec<TradeReturn>,
    pub events: Vec<ExecutionEvent>,
    /// Position after the last point (still `Long` if a trade was left open).
    pub final_position: Position,
}

/// Replay `prices` and `signals` and return the realized trades in exit order.
///
/// A round trip that exits at exactly its entry price is not a trade: it
/// shows up in the audit trail but not in `trades`.
///
/// A position still open after the last point produces no trade unless
/// `config.force_close_at_end` is set.
pub fn simulate(
    prices: &[PricePoint],
    signals: &[Option<Signal>],
    config: &ExecutionConfig,
) -> Result<Vec<TradeReturn>, ExecutionError> {
    simulate_with_audit(prices, signals, config).map(|out| out.trades)
}

/// Like [`simulate`], but also returns the entry/exit audit trail.
pub fn simulate_with_audit(
    prices: &[PricePoint],
    signals: &[Option<Signal>],
    config: &ExecutionConfig,
) -> Result<SimulationOutput, ExecutionError> {
    if prices.len() != signals.len() {
        return Err(ExecutionError::MismatchedLength {
            prices: prices.len(),
            signals: signals.len(),
        });
    }
    config.validate()?;

    let stop = config.stop_loss_fraction;
    let mut out = prices.iter().zip(signals.iter()).enumerate().fold(
        SimulationOutput::default(),
        |mut acc, (i, (price, &signal))| {
            let (next, trade) = step(acc.final_position, i, price, signal, stop);
            if acc.final_position.is_flat() && next.is_long() {
                debug!(target: "crosslab::engine", index = i, date = %price.date, price = price.close, "enter long");
                acc.events.push(ExecutionEvent::Entered {
                    index: i,
                    date: price.date,
                    price: price.close,
                });
            }
            if let Some(trade) = trade {
                book_exit(&mut acc, trade);
            }
            acc.final_position = next;
            acc
        },
    );

    if config.force_close_at_end {
        if let (
            Position::Long {
                entry_price,
                entry_date,
                entry_index,
            },
            Some(last),
        ) = (out.final_position, prices.last())
        {
            let trade = TradeReturn::close(
                entry_index,
                entry_date,
                entry_price,
                prices.len() - 1,
                last,
                ExitReason::EndOfData,
            );
            book_exit(&mut out, trade);
            out.final_position = Position::Flat;
        }
    }

    Ok(out)
}

/// Every exit is audited; only exits with a non-zero return are booked as trades.
fn book_exit(out: &mut SimulationOutput, trade: TradeReturn) {
    debug!(
        target: "crosslab::engine",
        index = trade.exit_index,
        date = %trade.exit_date,
        price = trade.exit_price,
        return_pct = trade.return_pct,
        reason = ?trade.exit_reason,
        "exit long"
    );
    out.events.push(ExecutionEvent::Exited {
        index: trade.exit_index,
        date: trade.exit_date,
        price: trade.exit_price,
        return_pct: trade.return_pct,
        reason: trade.exit_reason,
    });
    if trade.return_pct != 0.0 {
        out.trades.push(trade);
    }
}
