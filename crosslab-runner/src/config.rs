//! Serializable backtest configuration, loaded from TOML.
//!
//! ```toml
//! [strategy]
//! fast_window = 9
//! slow_window = 20
//! tie_break = "hold"          # or "carry_forward"
//!
//! [execution]
//! stop_loss_fraction = 0.05
//! force_close_at_end = false
//!
//! [analysis]
//! periods_per_year = 252.0
//! risk_free_rate = 0.0
//!
//! [data]
//! fill_policy = "forward_fill" # or "backward_fill", "drop"
//! ```
//!
//! Every section and field is optional and falls back to the defaults above.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crosslab_core::data::FillPolicy;
use crosslab_core::domain::TieBreak;
use crosslab_core::engine::{ExecutionConfig, ExecutionError};
use crosslab_core::signals::{MaCrossover, SignalError};

use crate::metrics::AnalysisConfig;

/// Errors from loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid [strategy]: {0}")]
    Strategy(#[from] SignalError),

    #[error("invalid [execution]: {0}")]
    Execution(#[from] ExecutionError),

    #[error("invalid [analysis]: {0}")]
    Analysis(String),
}

/// Crossover parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub fast_window: usize,
    pub slow_window: usize,
    pub tie_break: TieBreak,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            fast_window: 9,
            slow_window: 20,
            tie_break: TieBreak::Hold,
        }
    }
}

impl StrategyConfig {
    pub fn build(&self) -> Result<MaCrossover, SignalError> {
        MaCrossover::new(self.fast_window, self.slow_window, self.tie_break)
    }
}

/// How provider gaps are handled before the core sees the series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub fill_policy: FillPolicy,
}

/// Full configuration of one backtest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub strategy: StrategyConfig,
    pub execution: ExecutionConfig,
    pub analysis: AnalysisConfig,
    pub data: DataConfig,
}

impl BacktestConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section; the first failure wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.strategy.build()?;
        self.execution.validate()?;

        let a = &self.analysis;
        if !(a.periods_per_year.is_finite() && a.periods_per_year > 0.0) {
            return Err(ConfigError::Analysis(format!(
                "periods_per_year must be positive, got {}",
                a.periods_per_year
            )));
        }
        if !a.risk_free_rate.is_finite() {
            return Err(ConfigError::Analysis(format!(
                "risk_free_rate must be finite, got {}",
                a.risk_free_rate
            )));
        }
        Ok(())
    }

    /// Deterministic BLAKE3 id of every parameter that affects results.
    ///
    /// Two runs with equal configs share an id, so results can be compared or
    /// cached by it.
    pub fn run_id(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.strategy.fast_window as u64).to_le_bytes());
        hasher.update(&(self.strategy.slow_window as u64).to_le_bytes());
        hasher.update(tie_break_tag(self.strategy.tie_break).as_bytes());
        hasher.update(&self.execution.stop_loss_fraction.to_le_bytes());
        hasher.update(&[self.execution.force_close_at_end as u8]);
        hasher.update(&self.analysis.periods_per_year.to_le_bytes());
        hasher.update(&self.analysis.risk_free_rate.to_le_bytes());
        hasher.update(self.data.fill_policy.as_str().as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

fn tie_break_tag(tie_break: TieBreak) -> &'static str {
    match tie_break {
        TieBreak::Hold => "hold",
        TieBreak::CarryForward => "carry_forward",
    }
}
