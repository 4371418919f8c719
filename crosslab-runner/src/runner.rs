//! Backtest runner: wires together signals, execution, and metrics.
//!
//! Two entry points:
//! - `run_backtest()`: takes a prepared series. No I/O.
//! - `run_from_provider()`: fetches through a `PriceProvider`, applies the
//!   configured fill policy, then runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crosslab_core::data::{prepare, validate_series, DataError, DataSummary, PriceProvider};
use crosslab_core::domain::{Position, PricePoint, Signal, TradeReturn};
use crosslab_core::engine::{simulate_with_audit, ExecutionError, ExecutionEvent};
use crosslab_core::signals::SignalError;

use crate::config::{BacktestConfig, ConfigError};
use crate::metrics::{price_cumulative_returns, PerformanceSummary};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("signal error: {0}")]
    Signal(#[from] SignalError),
    #[error("execution error: {0}")]
    Execution(#[from] ExecutionError),
}

/// Current schema version for serialized results.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: String,
    pub config: BacktestConfig,
    pub bar_count: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// One entry per bar; `None` during the slow-window warm-up.
    pub signals: Vec<Option<Signal>>,
    pub trades: Vec<TradeReturn>,
    pub events: Vec<ExecutionEvent>,
    /// `Long` when the series ended mid-trade and no forced close was configured.
    pub open_position: Position,
    pub summary: PerformanceSummary,
    /// Buy-and-hold cumulative return of the underlying.
    pub benchmark: Vec<f64>,
    /// Raw-data statistics, present when the run went through a provider.
    pub data_summary: Option<DataSummary>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl BacktestResult {
    pub fn warmup_bars(&self) -> usize {
        self.signals.iter().take_while(|s| s.is_none()).count()
    }

    /// Strategy total return minus buy-and-hold total return.
    pub fn excess_over_benchmark(&self) -> f64 {
        let benchmark = self.benchmark.last().copied().unwrap_or(0.0);
        self.summary.total_return() - benchmark
    }
}

/// Run a backtest over an already prepared series.
///
/// The series must satisfy what `prepare` guarantees (positive closes,
/// strictly ascending dates); anything else is a `DataError`.
pub fn run_backtest(
    prices: &[PricePoint],
    config: &BacktestConfig,
) -> Result<BacktestResult, RunError> {
    config.validate()?;
    let (first, last) = match (prices.first(), prices.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return Err(DataError::Empty.into()),
    };
    validate_series(prices)?;

    let strategy = config.strategy.build()?;
    let signals = strategy.generate(prices)?;
    let sim = simulate_with_audit(prices, &signals, &config.execution)?;
    let summary = PerformanceSummary::compute(&sim.trades, &config.analysis);
    let benchmark = price_cumulative_returns(prices);

    if sim.final_position.is_long() {
        warn!(
            entry_price = sim.final_position.entry_price(),
            "series ended with an open position; it contributes no return"
        );
    }
    info!(
        bars = prices.len(),
        trades = summary.trade_count(),
        total_return = summary.total_return(),
        max_drawdown = summary.max_drawdown(),
        hit_ratio = summary.hit_ratio(),
        "backtest complete"
    );

    Ok(BacktestResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        config: *config,
        bar_count: prices.len(),
        start_date: first,
        end_date: last,
        signals,
        trades: sim.trades,
        events: sim.events,
        open_position: sim.final_position,
        summary,
        benchmark,
        data_summary: None,
    })
}

/// Fetch `symbol` over `[start, end]`, prepare it, and run.
pub fn run_from_provider(
    provider: &dyn PriceProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    config: &BacktestConfig,
) -> Result<BacktestResult, RunError> {
    config.validate()?;
    let raw = provider.fetch(symbol, start, end)?;
    let data_summary = DataSummary::from_raw(&raw);
    info!(
        provider = provider.name(),
        symbol,
        rows = data_summary.rows,
        missing = data_summary.missing,
        "fetched prices"
    );

    let prices = prepare(&raw, config.data.fill_policy)?;
    let mut result = run_backtest(&prices, config)?;
    result.data_summary = Some(data_summary);
    Ok(result)
}
