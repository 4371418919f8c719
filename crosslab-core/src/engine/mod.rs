//! Execution simulator: replays (price, signal) pairs through a single-position
//! state machine and collects realized trade returns.
//!
//! The replay is an explicit fold in timestamp order: each step's decision
//! depends on the position opened earlier in the same scan, so steps are never
//! reordered or parallelized.

pub mod simulator;
pub mod state;
pub mod transition;

pub use simulator::{simulate, simulate_with_audit, SimulationOutput};
pub use state::{ExecutionConfig, ExecutionEvent, DEFAULT_STOP_LOSS_FRACTION};
pub use transition::step;

use thiserror::Error;

/// Validation failures raised before any step is taken.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    #[error("mismatched length: {prices} prices vs {signals} signals")]
    MismatchedLength { prices: usize, signals: usize },

    #[error("invalid stop-loss fraction {0}: must lie strictly between 0 and 1")]
    InvalidStopLoss(f64),
}
