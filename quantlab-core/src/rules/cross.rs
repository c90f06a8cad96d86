//! Crossover rules — one indicator crossing another between two bars.

use crate::domain::TradingRecord;
use crate::indicators::Indicator;
use crate::rules::Rule;

/// Satisfied when `left` crosses above `right` at `index`: strictly above
/// now, at or below on the previous bar. Never satisfied at the series
/// begin index (there is no previous bar) or on NaN values.
#[derive(Debug, Clone)]
pub struct CrossedUpRule<L, R> {
    left: L,
    right: R,
}

impl<L, R> CrossedUpRule<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Rule for CrossedUpRule<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    fn is_satisfied(&self, index: usize, _record: Option<&TradingRecord>) -> bool {
        if index <= self.left.series().begin_index() {
            return false;
        }
        self.left.value(index) > self.right.value(index)
            && self.left.value(index - 1) <= self.right.value(index - 1)
    }
}

/// Satisfied when `left` crosses below `right` at `index`.
#[derive(Debug, Clone)]
pub struct CrossedDownRule<L, R> {
    left: L,
    right: R,
}

impl<L, R> CrossedDownRule<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Rule for CrossedDownRule<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    fn is_satisfied(&self, index: usize, _record: Option<&TradingRecord>) -> bool {
        if index <= self.left.series().begin_index() {
            return false;
        }
        self.left.value(index) < self.right.value(index)
            && self.left.value(index - 1) >= self.right.value(index - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{make_series, ClosePrice, Constant};

    #[test]
    fn crossed_up_fires_on_the_crossing_bar_only() {
        let series = make_series(&[10.0, 20.0, 30.0, 15.0]);
        let close = ClosePrice::new(&series);
        let limit = Constant::new(&series, 15.0);
        let rule = CrossedUpRule::new(close, limit);

        assert!(!rule.is_satisfied(0, None)); // no previous bar
        assert!(rule.is_satisfied(1, None)); // 10 ≤ 15 → 20 > 15
        assert!(!rule.is_satisfied(2, None)); // already above
        assert!(!rule.is_satisfied(3, None)); // crossing down, not up
    }

    #[test]
    fn crossed_down_mirrors_crossed_up() {
        let series = make_series(&[20.0, 10.0, 5.0]);
        let close = ClosePrice::new(&series);
        let limit = Constant::new(&series, 15.0);
        let rule = CrossedDownRule::new(close, limit);

        assert!(rule.is_satisfied(1, None));
        assert!(!rule.is_satisfied(2, None));
    }

    #[test]
    fn touch_without_cross_counts() {
        // Equality on the previous bar still counts as "from at-or-below".
        let series = make_series(&[15.0, 20.0]);
        let close = ClosePrice::new(&series);
        let limit = Constant::new(&series, 15.0);
        assert!(CrossedUpRule::new(close, limit).is_satisfied(1, None));
    }

    #[test]
    fn nan_never_crosses() {
        let series = make_series(&[10.0, 20.0]);
        let close = ClosePrice::new(&series);
        let limit = Constant::new(&series, 15.0);
        let rule = CrossedUpRule::new(close, limit);
        // Indices past the end read NaN; no crossing can be detected.
        assert!(!rule.is_satisfied(5, None));
    }
}
