//! CrossLab Runner: performance analysis, configuration, and orchestration.
//!
//! This crate builds on `crosslab-core` to provide:
//! - Trade-level performance metrics and the monthly return grid
//! - TOML backtest configuration with a deterministic run id
//! - CSV and synthetic price providers
//! - End-to-end backtest runs from a series or a provider

pub mod config;
pub mod metrics;
pub mod monthly;
pub mod providers;
pub mod runner;

pub use config::{BacktestConfig, ConfigError, DataConfig, StrategyConfig};
pub use metrics::{
    cumulative_returns, hit_ratio, max_drawdown, price_cumulative_returns, sharpe_ratio,
    sortino_ratio, AnalysisConfig, MetricError, PerformanceSummary, DEFAULT_PERIODS_PER_YEAR,
};
pub use monthly::{monthly_returns, MonthlyGrid};
pub use providers::{CsvProvider, SyntheticProvider};
pub use runner::{run_backtest, run_from_provider, BacktestResult, RunError, SCHEMA_VERSION};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn performance_summary_is_send_sync() {
        assert_send::<PerformanceSummary>();
        assert_sync::<PerformanceSummary>();
    }

    #[test]
    fn backtest_result_is_send_sync() {
        assert_send::<BacktestResult>();
        assert_sync::<BacktestResult>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<BacktestConfig>();
        assert_sync::<BacktestConfig>();
        assert_send::<AnalysisConfig>();
        assert_sync::<AnalysisConfig>();
    }

    #[test]
    fn providers_are_send_sync() {
        assert_send::<CsvProvider>();
        assert_sync::<CsvProvider>();
        assert_send::<SyntheticProvider>();
        assert_sync::<SyntheticProvider>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
        assert_send::<MetricError>();
        assert_sync::<MetricError>();
    }
}
