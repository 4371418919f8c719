//! Moving average crossover: state signals from fast vs slow SMA.
//!
//! Unlike an edge-triggered cross detector, every post-warm-up index gets a
//! signal describing the current relationship:
//! - `Buy` while the fast SMA is above the slow SMA
//! - `Sell` while it is below
//! - equality resolved by the configured `TieBreak`

use crate::domain::{PricePoint, Signal, TieBreak};
use crate::indicators::{Indicator, Sma};

use super::SignalError;

/// Validated crossover parameters.
#[derive(Debug, Clone)]
pub struct MaCrossover {
    fast: Sma,
    slow: Sma,
    tie_break: TieBreak,
}

impl MaCrossover {
    pub fn new(
        fast_window: usize,
        slow_window: usize,
        tie_break: TieBreak,
    ) -> Result<Self, SignalError> {
        if fast_window == 0 || slow_window == 0 || fast_window >= slow_window {
            return Err(SignalError::InvalidWindow {
                fast_window,
                slow_window,
            });
        }
        Ok(Self {
            fast: Sma::new(fast_window),
            slow: Sma::new(slow_window),
            tie_break,
        })
    }

    pub fn fast_window(&self) -> usize {
        self.fast.period()
    }

    pub fn slow_window(&self) -> usize {
        self.slow.period()
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Indices without a signal: `slow_window - 1`.
    pub fn warmup(&self) -> usize {
        self.slow.lookback()
    }

    /// Produce one `Option<Signal>` per input price.
    pub fn generate(&self, prices: &[PricePoint]) -> Result<Vec<Option<Signal>>, SignalError> {
        let required = self.slow_window();
        if prices.len() < required {
            return Err(SignalError::InsufficientData {
                required,
                actual: prices.len(),
            });
        }

        let fast = self.fast.compute(prices);
        let slow = self.slow.compute(prices);
        let warmup = self.warmup();

        let mut last_directional: Option<Signal> = None;
        let signals = fast
            .iter()
            .zip(slow.iter())
            .enumerate()
            .map(|(i, (&f, &s))| {
                if i < warmup {
                    return None;
                }
                let signal = if f > s {
                    Signal::Buy
                } else if f < s {
                    Signal::Sell
                } else {
                    match self.tie_break {
                        TieBreak::Hold => Signal::Hold,
                        TieBreak::CarryForward => last_directional.unwrap_or(Signal::Hold),
                    }
                };
                if signal != Signal::Hold {
                    last_directional = Some(signal);
                }
                Some(signal)
            })
            .collect();

        Ok(signals)
    }
}

/// Validate the windows and generate crossover signals in one call.
pub fn generate(
    prices: &[PricePoint],
    fast_window: usize,
    slow_window: usize,
    tie_break: TieBreak,
) -> Result<Vec<Option<Signal>>, SignalError> {
    MaCrossover::new(fast_window, slow_window, tie_break)?.generate(prices)
}
