//! Signal generation.
//!
//! A generator turns an ordered price series into a signal vector of the same
//! length. Indices inside the warm-up carry `None`; every later index carries
//! exactly one `Signal`.

pub mod ma_crossover;

pub use ma_crossover::{generate, MaCrossover};

use thiserror::Error;

/// Validation failures raised before any signal is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("invalid windows: fast={fast_window}, slow={slow_window} (need 0 < fast < slow)")]
    InvalidWindow {
        fast_window: usize,
        slow_window: usize,
    },

    #[error("insufficient data: {actual} prices, need at least {required}")]
    InsufficientData { required: usize, actual: usize },
}

/// Number of valid (non-`None`) entries in a signal vector.
pub fn valid_signal_count(signals: &[Option<crate::domain::Signal>]) -> usize {
    signals.iter().filter(|s| s.is_some()).count()
}
