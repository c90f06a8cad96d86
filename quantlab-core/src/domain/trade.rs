//! Trade — a single buy or sell fill.

use crate::costs::CostModel;
use serde::{Deserialize, Serialize};

/// Direction of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    /// The opposite direction — the type that closes a position this one opened.
    pub fn complement(self) -> Self {
        match self {
            TradeType::Buy => TradeType::Sell,
            TradeType::Sell => TradeType::Buy,
        }
    }
}

/// One order execution event: a fill at a given bar index, price, and amount.
///
/// Created once and never mutated. The transaction cost is computed by the
/// configured [`CostModel`] at creation time and stored with the fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_type: TradeType,
    pub index: usize,
    pub price: f64,
    pub amount: f64,
    pub cost: f64,
}

impl Trade {
    pub fn new(
        trade_type: TradeType,
        index: usize,
        price: f64,
        amount: f64,
        costs: &CostModel,
    ) -> Self {
        Self {
            trade_type,
            index,
            price,
            amount,
            cost: costs.trade_cost(price, amount),
        }
    }

    /// Traded notional: price × amount.
    pub fn notional(&self) -> f64 {
        self.price * self.amount
    }

    pub fn is_buy(&self) -> bool {
        self.trade_type == TradeType::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.trade_type == TradeType::Sell
    }
}
