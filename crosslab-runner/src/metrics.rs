//! Performance metrics: pure functions over a realized-return series.
//!
//! Every metric takes the trade returns (fractions, in exit order) and an
//! `AnalysisConfig`. Degenerate inputs never produce NaN or infinity: the
//! ratio metrics return a typed `MetricError` instead, and the path metrics
//! define an explicit value for the empty series.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crosslab_core::domain::trade::returns_of;
use crosslab_core::domain::{PricePoint, TradeReturn};

use crate::monthly::{monthly_returns, MonthlyGrid};

/// Annualization factor for daily bars.
pub const DEFAULT_PERIODS_PER_YEAR: f64 = 252.0;

/// Standard deviations below this are treated as zero.
const ZERO_VARIANCE_EPSILON: f64 = 1e-15;

/// Sampling assumptions for the ratio metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Return observations per year, used as sqrt(periods_per_year).
    pub periods_per_year: f64,
    /// Risk-free rate per period, subtracted from every return.
    pub risk_free_rate: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
            risk_free_rate: 0.0,
        }
    }
}

/// Why a ratio metric has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MetricError {
    #[error("undefined: need at least {required} returns, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("undefined: standard deviation is zero")]
    ZeroVariance,

    #[error("undefined: no negative excess returns")]
    NoDownside,

    #[error("undefined: a single negative excess return has no sample deviation")]
    InsufficientDownside,
}

/// Immutable snapshot of a strategy's realized performance.
///
/// Built once by [`PerformanceSummary::compute`]; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    trade_count: usize,
    cumulative_returns: Vec<f64>,
    max_drawdown: f64,
    sharpe: Result<f64, MetricError>,
    sortino: Result<f64, MetricError>,
    hit_ratio: f64,
    monthly: MonthlyGrid,
}

impl PerformanceSummary {
    /// Compute every metric from the realized trades.
    ///
    /// Path metrics and ratio metrics are independent reductions over the
    /// same immutable slice and run on two rayon tasks.
    pub fn compute(trades: &[TradeReturn], config: &AnalysisConfig) -> Self {
        let returns = returns_of(trades);
        let r = returns.as_slice();

        let ((cumulative_returns, max_drawdown, hit_ratio), (sharpe, sortino)) = rayon::join(
            || (cumulative_returns(r), max_drawdown(r), hit_ratio(r)),
            || (sharpe_ratio(r, config), sortino_ratio(r, config)),
        );

        Self {
            trade_count: returns.len(),
            cumulative_returns,
            max_drawdown,
            sharpe,
            sortino,
            hit_ratio,
            monthly: monthly_returns(trades),
        }
    }

    pub fn trade_count(&self) -> usize {
        self.trade_count
    }

    pub fn cumulative_returns(&self) -> &[f64] {
        &self.cumulative_returns
    }

    /// Compounded return over all trades; 0.0 with no trades.
    pub fn total_return(&self) -> f64 {
        self.cumulative_returns.last().copied().unwrap_or(0.0)
    }

    pub fn max_drawdown(&self) -> f64 {
        self.max_drawdown
    }

    pub fn sharpe(&self) -> Result<f64, MetricError> {
        self.sharpe
    }

    pub fn sortino(&self) -> Result<f64, MetricError> {
        self.sortino
    }

    pub fn hit_ratio(&self) -> f64 {
        self.hit_ratio
    }

    pub fn monthly(&self) -> &MonthlyGrid {
        &self.monthly
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Running product of (1 + r), minus 1. Same length and order as the input.
pub fn cumulative_returns(returns: &[f64]) -> Vec<f64> {
    growth_path(returns).map(|g| g - 1.0).collect()
}

/// Deepest decline of the compounded growth path from its running peak.
///
/// The peak starts at the first compounded value, not at 1.0, so a losing
/// first trade alone is not a drawdown. Non-positive; 0.0 for empty input.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for growth in growth_path(returns) {
        if growth > peak {
            peak = growth;
        }
        if peak > 0.0 {
            let dd = (growth - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio.
///
/// Sharpe = mean(r - rf) / std(r - rf) * sqrt(periods_per_year), with the
/// sample (n - 1) standard deviation.
pub fn sharpe_ratio(returns: &[f64], config: &AnalysisConfig) -> Result<f64, MetricError> {
    require_observations(returns)?;
    let excess = excess_returns(returns, config.risk_free_rate);
    let std = std_dev(&excess);
    if std < ZERO_VARIANCE_EPSILON {
        return Err(MetricError::ZeroVariance);
    }
    Ok(mean_f64(&excess) / std * config.periods_per_year.sqrt())
}

/// Annualized Sortino ratio.
///
/// Sortino = mean(r - rf) / std(negative (r - rf)) * sqrt(periods_per_year).
/// The denominator is the sample standard deviation of the negative excess
/// returns only, so at least two of them are needed.
pub fn sortino_ratio(returns: &[f64], config: &AnalysisConfig) -> Result<f64, MetricError> {
    require_observations(returns)?;
    let excess = excess_returns(returns, config.risk_free_rate);
    let downside: Vec<f64> = excess.iter().copied().filter(|r| *r < 0.0).collect();

    match downside.len() {
        0 => return Err(MetricError::NoDownside),
        1 => return Err(MetricError::InsufficientDownside),
        _ => {}
    }
    let downside_std = std_dev(&downside);
    if downside_std < ZERO_VARIANCE_EPSILON {
        return Err(MetricError::ZeroVariance);
    }
    Ok(mean_f64(&excess) / downside_std * config.periods_per_year.sqrt())
}

/// Fraction of returns strictly above zero; 0.0 for an empty series.
pub fn hit_ratio(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let hits = returns.iter().filter(|r| **r > 0.0).count();
    hits as f64 / returns.len() as f64
}

/// Buy-and-hold cumulative return of the underlying, relative to the first close.
///
/// Benchmark for the strategy's own cumulative curve. Starts at 0.0.
pub fn price_cumulative_returns(prices: &[PricePoint]) -> Vec<f64> {
    let Some(first) = prices.first() else {
        return Vec::new();
    };
    prices.iter().map(|p| p.close / first.close - 1.0).collect()
}

// ─── Helpers ────────────────────────────────────────────────────────

fn growth_path(returns: &[f64]) -> impl Iterator<Item = f64> + '_ {
    returns.iter().scan(1.0_f64, |growth, r| {
        *growth *= 1.0 + r;
        Some(*growth)
    })
}

fn require_observations(returns: &[f64]) -> Result<(), MetricError> {
    if returns.len() < 2 {
        return Err(MetricError::InsufficientData {
            required: 2,
            actual: returns.len(),
        });
    }
    Ok(())
}

fn excess_returns(returns: &[f64], risk_free_rate: f64) -> Vec<f64> {
    returns.iter().map(|r| r - risk_free_rate).collect()
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
