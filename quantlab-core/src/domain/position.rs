//! Position — a paired entry/exit trade with open/closed lifecycle.
//!
//! State machine: NEW (no entry) → OPENED (entry filled) → CLOSED (exit
//! filled). Transitions happen only through [`Position::operate`]; once
//! closed, a position never changes again. P&L and cost queries are pure
//! functions of the recorded fills, recomputed on demand.

use crate::costs::CostModel;
use crate::domain::trade::{Trade, TradeType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State-machine violations in positions and the trading record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("position is already closed")]
    PositionClosed,

    #[error("a position is already open")]
    PositionAlreadyOpen,

    #[error("no open position to exit")]
    NoOpenPosition,

    #[error("position is still open")]
    PositionStillOpen,

    #[error("exit index {exit_index} must follow entry index {entry_index}")]
    ExitNotAfterEntry {
        entry_index: usize,
        exit_index: usize,
    },
}

/// One open-then-closed (or still-open) paired entry/exit trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    starting_type: TradeType,
    entry: Option<Trade>,
    exit: Option<Trade>,
    transaction_costs: CostModel,
    holding_costs: CostModel,
}

impl Position {
    /// New (empty) position. The first `operate` call fills an entry of
    /// `starting_type`; the second fills an exit of the complement type.
    pub fn new(
        starting_type: TradeType,
        transaction_costs: CostModel,
        holding_costs: CostModel,
    ) -> Self {
        Self {
            starting_type,
            entry: None,
            exit: None,
            transaction_costs,
            holding_costs,
        }
    }

    /// Record the next fill: entry if none exists, exit otherwise.
    ///
    /// The exit must land strictly after the entry — a position cannot be
    /// closed before (or at the instant) it opens. Operating on a closed
    /// position fails with [`LedgerError::PositionClosed`].
    pub fn operate(&mut self, index: usize, price: f64, amount: f64) -> Result<Trade, LedgerError> {
        if self.is_closed() {
            return Err(LedgerError::PositionClosed);
        }
        match self.entry {
            None => {
                let trade = Trade::new(
                    self.starting_type,
                    index,
                    price,
                    amount,
                    &self.transaction_costs,
                );
                self.entry = Some(trade);
                Ok(trade)
            }
            Some(entry) => {
                if index <= entry.index {
                    return Err(LedgerError::ExitNotAfterEntry {
                        entry_index: entry.index,
                        exit_index: index,
                    });
                }
                let trade = Trade::new(
                    self.starting_type.complement(),
                    index,
                    price,
                    amount,
                    &self.transaction_costs,
                );
                self.exit = Some(trade);
                Ok(trade)
            }
        }
    }

    pub fn is_new(&self) -> bool {
        self.entry.is_none()
    }

    pub fn is_opened(&self) -> bool {
        self.entry.is_some() && self.exit.is_none()
    }

    pub fn is_closed(&self) -> bool {
        self.entry.is_some() && self.exit.is_some()
    }

    pub fn entry(&self) -> Option<&Trade> {
        self.entry.as_ref()
    }

    pub fn exit(&self) -> Option<&Trade> {
        self.exit.as_ref()
    }

    pub fn starting_type(&self) -> TradeType {
        self.starting_type
    }

    pub fn transaction_costs(&self) -> &CostModel {
        &self.transaction_costs
    }

    pub fn holding_costs(&self) -> &CostModel {
        &self.holding_costs
    }

    /// Realized gross profit of a closed position, direction-aware:
    /// `(exit − entry) × amount` for a BUY entry, the negation for SELL.
    /// Zero while the position is not closed.
    pub fn profit(&self) -> f64 {
        match (self.entry, self.exit) {
            (Some(entry), Some(exit)) => directional(entry, exit.price),
            _ => 0.0,
        }
    }

    /// Unrealized gross profit, marking the open leg at `price`.
    ///
    /// For a closed position this is the realized [`profit`](Self::profit);
    /// for a new one it is zero.
    pub fn profit_at(&self, price: f64) -> f64 {
        match (self.entry, self.exit) {
            (Some(entry), None) => directional(entry, price),
            (Some(entry), Some(exit)) => directional(entry, exit.price),
            _ => 0.0,
        }
    }

    /// Gross return of a closed position: `exit / entry` for a BUY entry,
    /// `2 − exit / entry` for SELL. NaN while not closed.
    pub fn gross_return(&self) -> f64 {
        match (self.entry, self.exit) {
            (Some(entry), Some(exit)) => {
                let ratio = exit.price / entry.price;
                match entry.trade_type {
                    TradeType::Buy => ratio,
                    TradeType::Sell => 2.0 - ratio,
                }
            }
            _ => f64::NAN,
        }
    }

    /// Holding cost accrued up to `current_index`, per the configured
    /// holding cost model. The index is ignored once the position is closed.
    pub fn holding_cost(&self, current_index: usize) -> f64 {
        self.holding_costs.position_cost(self, current_index)
    }

    /// Total cost observed at `current_index`: both fill costs plus the
    /// accrued holding cost.
    pub fn total_cost(&self, current_index: usize) -> f64 {
        self.fill_costs() + self.holding_cost(current_index)
    }

    /// Total cost of a closed position, holding cost counted to the exit.
    ///
    /// Fails with [`LedgerError::PositionStillOpen`] when not closed.
    pub fn closed_total_cost(&self) -> Result<f64, LedgerError> {
        Ok(self.fill_costs() + self.holding_costs.closed_position_cost(self)?)
    }

    fn fill_costs(&self) -> f64 {
        self.entry.map_or(0.0, |t| t.cost) + self.exit.map_or(0.0, |t| t.cost)
    }
}

fn directional(entry: Trade, exit_price: f64) -> f64 {
    let raw = (exit_price - entry.price) * entry.amount;
    match entry.trade_type {
        TradeType::Buy => raw,
        TradeType::Sell => -raw,
    }
}
