//! Position: the simulator's single piece of state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Either out of the market or holding one long unit.
///
/// Values are replaced, never mutated: each simulator step consumes the old
/// position and returns the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Flat,
    Long {
        entry_price: f64,
        entry_date: NaiveDate,
        entry_index: usize,
    },
}

impl Position {
    pub fn is_flat(&self) -> bool {
        matches!(self, Position::Flat)
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long { .. })
    }

    pub fn entry_price(&self) -> Option<f64> {
        match self {
            Position::Flat => None,
            Position::Long { entry_price, .. } => Some(*entry_price),
        }
    }
}
