//! Backtest configuration — explicit values, loadable from TOML.
//!
//! All policy knobs the engine honors live here: which trade type opens
//! positions, the per-fill amount, the cost models, and whether a position
//! still open at the last bar is force-closed there.

use crate::costs::CostModel;
use crate::domain::TradeType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid backtest config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("trade amount must be positive and finite, got {0}")]
    BadTradeAmount(f64),

    #[error("cost coefficient must be non-negative and finite, got {0}")]
    BadCostCoefficient(f64),
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Trade type of every entry fill (BUY-first or SELL-first book).
    pub starting_type: TradeType,
    /// Units filled per entry and per exit.
    pub trade_amount: f64,
    /// Force-close a position still open at the final bar, at its close
    /// price. Off by default: the open position stays queryable instead.
    pub close_open_at_end: bool,
    pub transaction_costs: CostModel,
    pub holding_costs: CostModel,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            starting_type: TradeType::Buy,
            trade_amount: 1.0,
            close_open_at_end: false,
            transaction_costs: CostModel::Zero,
            holding_costs: CostModel::Zero,
        }
    }
}

impl BacktestConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.trade_amount.is_finite() && self.trade_amount > 0.0) {
            return Err(ConfigError::BadTradeAmount(self.trade_amount));
        }
        for model in [&self.transaction_costs, &self.holding_costs] {
            let coefficient = match *model {
                CostModel::Zero => continue,
                CostModel::FixedFee { fee_per_trade } => fee_per_trade,
                CostModel::LinearFee { fee_rate } => fee_rate,
                CostModel::LinearBorrowing { rate_per_period } => rate_per_period,
            };
            if !(coefficient.is_finite() && coefficient >= 0.0) {
                return Err(ConfigError::BadCostCoefficient(coefficient));
            }
        }
        Ok(())
    }
}
