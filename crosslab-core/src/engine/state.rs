//! Simulator configuration and audit events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ExecutionError;
use crate::domain::ExitReason;

/// Stop-loss distance used when none is configured: exit below 95% of entry.
pub const DEFAULT_STOP_LOSS_FRACTION: f64 = 0.05;

/// Parameters for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Exit when close < entry * (1 - stop_loss_fraction). Must be in (0, 1).
    pub stop_loss_fraction: f64,
    /// Close a still-open position on the final point (`ExitReason::EndOfData`).
    /// Off by default: dangling positions contribute no return.
    pub force_close_at_end: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            stop_loss_fraction: DEFAULT_STOP_LOSS_FRACTION,
            force_close_at_end: false,
        }
    }
}

impl ExecutionConfig {
    pub fn with_stop_loss(stop_loss_fraction: f64) -> Self {
        Self {
            stop_loss_fraction,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ExecutionError> {
        let f = self.stop_loss_fraction;
        // NaN fails both comparisons.
        if f > 0.0 && f < 1.0 {
            Ok(())
        } else {
            Err(ExecutionError::InvalidStopLoss(f))
        }
    }
}

/// One position transition, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExecutionEvent {
    Entered {
        index: usize,
        date: NaiveDate,
        price: f64,
    },
    Exited {
        index: usize,
        date: NaiveDate,
        price: f64,
        return_pct: f64,
        reason: ExitReason,
    },
}

impl ExecutionEvent {
    pub fn index(&self) -> usize {
        match self {
            ExecutionEvent::Entered { index, .. } | ExecutionEvent::Exited { index, .. } => *index,
        }
    }
}
