//! Discrete trading signals and the crossover tie-break policy.

use serde::{Deserialize, Serialize};

/// Trading signal for one post-warm-up index.
///
/// Warm-up indices carry no signal at all (`None` in the signal vector);
/// `Hold` is an explicit "averages are equal" outcome, never a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// How a crossover generator resolves `fast == slow`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Equal averages emit `Hold`: no entry, no signal-driven exit.
    #[default]
    Hold,
    /// Equal averages repeat the last non-`Hold` signal (`Hold` if none yet).
    CarryForward,
}
