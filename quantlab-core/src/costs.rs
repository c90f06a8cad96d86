//! Cost models — pluggable policies for transaction and holding costs.
//!
//! A cost model is a pure value: two models compare equal exactly when they
//! are the same variant with the same coefficients. Positions and trading
//! records receive their models explicitly at construction; there is no
//! process-wide default instance.

use crate::domain::position::{LedgerError, Position};
use crate::domain::trade::TradeType;
use serde::{Deserialize, Serialize};

/// Policy mapping a fill or a position to a monetary cost.
///
/// Three calculation forms exist:
/// - [`trade_cost`](CostModel::trade_cost) for a single fill,
/// - [`position_cost`](CostModel::position_cost) for a position observed at
///   a given bar index (open or closed),
/// - [`closed_position_cost`](CostModel::closed_position_cost) for a closed
///   position, using its exit index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostModel {
    /// No cost, ever.
    Zero,
    /// Flat fee per fill, regardless of price and amount.
    FixedFee { fee_per_trade: f64 },
    /// Fee proportional to traded notional: `fee_rate × price × amount`.
    LinearFee { fee_rate: f64 },
    /// Borrowing cost for short positions:
    /// `entry notional × rate × holding periods`. Long positions cost nothing.
    LinearBorrowing { rate_per_period: f64 },
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel::Zero
    }
}

impl CostModel {
    pub fn fixed(fee_per_trade: f64) -> Self {
        CostModel::FixedFee { fee_per_trade }
    }

    pub fn linear(fee_rate: f64) -> Self {
        CostModel::LinearFee { fee_rate }
    }

    pub fn borrowing(rate_per_period: f64) -> Self {
        CostModel::LinearBorrowing { rate_per_period }
    }

    /// Cost of one fill at `price` for `amount` units.
    ///
    /// The fixed-fee model ignores both arguments; the borrowing model is a
    /// holding cost and charges nothing per fill.
    pub fn trade_cost(&self, price: f64, amount: f64) -> f64 {
        match *self {
            CostModel::Zero | CostModel::LinearBorrowing { .. } => 0.0,
            CostModel::FixedFee { fee_per_trade } => fee_per_trade,
            CostModel::LinearFee { fee_rate } => fee_rate * price * amount,
        }
    }

    /// Cost accrued by `position` as observed at `current_index`.
    ///
    /// Transaction variants sum over the legs that exist and ignore the
    /// index. The borrowing variant charges per holding period, counting up
    /// to the exit index once the position is closed.
    pub fn position_cost(&self, position: &Position, current_index: usize) -> f64 {
        match *self {
            CostModel::Zero => 0.0,
            CostModel::FixedFee { fee_per_trade } => {
                let legs = position.entry().is_some() as usize + position.exit().is_some() as usize;
                fee_per_trade * legs as f64
            }
            CostModel::LinearFee { fee_rate } => {
                let entry = position
                    .entry()
                    .map_or(0.0, |t| fee_rate * t.notional());
                let exit = position.exit().map_or(0.0, |t| fee_rate * t.notional());
                entry + exit
            }
            CostModel::LinearBorrowing { rate_per_period } => {
                let Some(entry) = position.entry() else {
                    return 0.0;
                };
                if entry.trade_type != TradeType::Sell {
                    return 0.0;
                }
                let until = position.exit().map_or(current_index, |t| t.index);
                let periods = until.saturating_sub(entry.index);
                entry.notional() * rate_per_period * periods as f64
            }
        }
    }

    /// Cost of a closed position, using its exit index as the endpoint.
    ///
    /// Fails with [`LedgerError::PositionStillOpen`] when the position has
    /// no exit yet — an open position has no final holding period.
    pub fn closed_position_cost(&self, position: &Position) -> Result<f64, LedgerError> {
        let exit = position.exit().ok_or(LedgerError::PositionStillOpen)?;
        Ok(self.position_cost(position, exit.index))
    }
}
