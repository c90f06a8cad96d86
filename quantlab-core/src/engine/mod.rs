//! Backtest engine — replays a strategy over a bar series into a ledger.
//!
//! The loop runs from `begin_index + 1` to `end_index`: the first bar can
//! never trigger a signal, since crossings and most indicators need at
//! least one prior bar. At each index the strategy's exit rule is
//! consulted while a position is open, the entry rule while flat; fills
//! happen at the bar's close price for the configured amount.

pub mod config;

pub use config::{BacktestConfig, ConfigError};

use crate::domain::position::LedgerError;
use crate::domain::TradingRecord;
use crate::series::{SeriesError, SeriesHandle};
use crate::strategy::Strategy;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Bar-by-bar backtest driver.
#[derive(Debug, Clone)]
pub struct Backtest {
    series: SeriesHandle,
    config: BacktestConfig,
}

impl Backtest {
    pub fn new(series: SeriesHandle) -> Self {
        Self::with_config(series, BacktestConfig::default())
    }

    pub fn with_config(series: SeriesHandle, config: BacktestConfig) -> Self {
        Self { series, config }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    pub fn series(&self) -> &SeriesHandle {
        &self.series
    }

    /// Replay `strategy` over the whole series and return the ledger.
    ///
    /// An empty or single-bar series yields an empty record. When
    /// `close_open_at_end` is set, a position still open after the last
    /// bar is exited at that bar's close; otherwise it is left open in
    /// the record's current position for the caller to value.
    pub fn run(&self, strategy: &dyn Strategy) -> Result<TradingRecord, EngineError> {
        let mut record = TradingRecord::with_cost_models(
            self.config.starting_type,
            self.config.transaction_costs,
            self.config.holding_costs,
        );
        let begin = self.series.begin_index();
        let Some(end) = self.series.end_index() else {
            return Ok(record);
        };

        for index in (begin + 1)..=end {
            if record.has_open_position() {
                if strategy.should_exit(index, &record) {
                    let price = self.series.bar(index)?.close;
                    record.exit(index, price, self.config.trade_amount)?;
                }
            } else if strategy.should_enter(index, &record) {
                let price = self.series.bar(index)?.close;
                record.enter(index, price, self.config.trade_amount)?;
            }
        }

        if self.config.close_open_at_end && record.has_open_position() {
            let price = self.series.bar(end)?.close;
            record.exit(end, price, self.config.trade_amount)?;
        }

        tracing::debug!(
            series = %self.series.name(),
            closed_positions = record.position_count(),
            open = record.has_open_position(),
            "backtest run complete"
        );
        Ok(record)
    }
}
