//! The single-step transition function of the position state machine.
//!
//! Rules, first match wins:
//! 1. Flat + Buy → Long at the current close
//! 2. Long + close below the stop → Flat, `StopLoss`
//! 3. Long + Sell → Flat, `SignalExit`
//! 4. anything else → unchanged
//!
//! The stop is checked before the sell signal, so a bar that both breaches the
//! stop and signals `Sell` books a `StopLoss`.

use crate::domain::{ExitReason, Position, PricePoint, Signal, TradeReturn};

/// Advance the position by one point. Pure: same inputs, same outputs.
pub fn step(
    position: Position,
    index: usize,
    price: &PricePoint,
    signal: Option<Signal>,
    stop_loss_fraction: f64,
) -> (Position, Option<TradeReturn>) {
    match position {
        Position::Flat => match signal {
            Some(Signal::Buy) => (
                Position::Long {
                    entry_price: price.close,
                    entry_date: price.date,
                    entry_index: index,
                },
                None,
            ),
            _ => (Position::Flat, None),
        },
        Position::Long {
            entry_price,
            entry_date,
            entry_index,
        } => {
            let reason = if price.close < entry_price * (1.0 - stop_loss_fraction) {
                ExitReason::StopLoss
            } else if signal == Some(Signal::Sell) {
                ExitReason::SignalExit
            } else {
                return (position, None);
            };
            let trade = TradeReturn::close(
                entry_index,
                entry_date,
                entry_price,
                index,
                price,
                reason,
            );
            (Position::Flat, Some(trade))
        }
    }
}
