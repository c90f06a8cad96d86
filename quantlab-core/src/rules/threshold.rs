//! Threshold rules — one indicator strictly above or below another.

use crate::domain::TradingRecord;
use crate::indicators::Indicator;
use crate::rules::Rule;

/// Satisfied while `left` is strictly above `right`.
#[derive(Debug, Clone)]
pub struct OverIndicatorRule<L, R> {
    left: L,
    right: R,
}

impl<L, R> OverIndicatorRule<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Rule for OverIndicatorRule<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    fn is_satisfied(&self, index: usize, _record: Option<&TradingRecord>) -> bool {
        self.left.value(index) > self.right.value(index)
    }
}

/// Satisfied while `left` is strictly below `right`.
#[derive(Debug, Clone)]
pub struct UnderIndicatorRule<L, R> {
    left: L,
    right: R,
}

impl<L, R> UnderIndicatorRule<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Rule for UnderIndicatorRule<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    fn is_satisfied(&self, index: usize, _record: Option<&TradingRecord>) -> bool {
        self.left.value(index) < self.right.value(index)
    }
}
