//! Trading record — the ordered ledger of positions.
//!
//! Holds every closed position plus the one current (new or open) position.
//! The alternation invariant lives here: a new entry is only legal while no
//! position is open, and an exit is only legal on the currently open one.

use crate::costs::CostModel;
use crate::domain::position::{LedgerError, Position};
use crate::domain::trade::{Trade, TradeType};
use serde::{Deserialize, Serialize};

/// Ordered history of positions plus the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingRecord {
    starting_type: TradeType,
    transaction_costs: CostModel,
    holding_costs: CostModel,
    positions: Vec<Position>,
    current: Position,
}

impl TradingRecord {
    /// Cost-free record whose first entry is of `starting_type`.
    pub fn new(starting_type: TradeType) -> Self {
        Self::with_cost_models(starting_type, CostModel::Zero, CostModel::Zero)
    }

    /// Record applying the given cost models to every position it opens.
    pub fn with_cost_models(
        starting_type: TradeType,
        transaction_costs: CostModel,
        holding_costs: CostModel,
    ) -> Self {
        Self {
            starting_type,
            transaction_costs,
            holding_costs,
            positions: Vec::new(),
            current: Position::new(starting_type, transaction_costs, holding_costs),
        }
    }

    /// Open a new position with an entry fill.
    ///
    /// Fails with [`LedgerError::PositionAlreadyOpen`] while a position is
    /// open — entries and exits must alternate.
    pub fn enter(&mut self, index: usize, price: f64, amount: f64) -> Result<Trade, LedgerError> {
        if self.current.is_opened() {
            return Err(LedgerError::PositionAlreadyOpen);
        }
        let trade = self.current.operate(index, price, amount)?;
        tracing::debug!(index, price, amount, trade_type = ?trade.trade_type, "entry recorded");
        Ok(trade)
    }

    /// Close the open position with an exit fill and archive it.
    ///
    /// Fails with [`LedgerError::NoOpenPosition`] when nothing is open.
    pub fn exit(&mut self, index: usize, price: f64, amount: f64) -> Result<Trade, LedgerError> {
        if !self.current.is_opened() {
            return Err(LedgerError::NoOpenPosition);
        }
        let trade = self.current.operate(index, price, amount)?;
        let closed = std::mem::replace(
            &mut self.current,
            Position::new(
                self.starting_type,
                self.transaction_costs,
                self.holding_costs,
            ),
        );
        self.positions.push(closed);
        tracing::debug!(index, price, amount, trade_type = ?trade.trade_type, "exit recorded");
        Ok(trade)
    }

    /// Closed positions, oldest first.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// The current position: new while flat, opened while in the market.
    pub fn current_position(&self) -> &Position {
        &self.current
    }

    pub fn has_open_position(&self) -> bool {
        self.current.is_opened()
    }

    /// Most recently closed position, if any.
    pub fn last_position(&self) -> Option<&Position> {
        self.positions.last()
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Trade type the next entry will carry.
    pub fn starting_type(&self) -> TradeType {
        self.starting_type
    }

    pub fn transaction_costs(&self) -> &CostModel {
        &self.transaction_costs
    }

    pub fn holding_costs(&self) -> &CostModel {
        &self.holding_costs
    }
}
