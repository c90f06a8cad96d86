//! Trading rules — boolean predicates evaluated per index.
//!
//! Rules sit between indicators and the backtest loop: a rule reads
//! indicator values (and optionally the trading record) and answers
//! whether a condition holds at an index. Rules built on NaN indicator
//! values are simply never satisfied, since every comparison against NaN
//! is false.

pub mod cross;
pub mod threshold;

pub use cross::{CrossedDownRule, CrossedUpRule};
pub use threshold::{OverIndicatorRule, UnderIndicatorRule};

use crate::domain::TradingRecord;

/// A boolean predicate over a series index.
///
/// `record` carries the ledger state for rules that depend on trading
/// history (e.g. time-in-position stops); purely indicator-driven rules
/// ignore it.
pub trait Rule: Send + Sync {
    fn is_satisfied(&self, index: usize, record: Option<&TradingRecord>) -> bool;
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn is_satisfied(&self, index: usize, record: Option<&TradingRecord>) -> bool {
        (**self).is_satisfied(index, record)
    }
}

/// Both operand rules satisfied.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    left: A,
    right: B,
}

impl<A: Rule, B: Rule> Rule for And<A, B> {
    fn is_satisfied(&self, index: usize, record: Option<&TradingRecord>) -> bool {
        self.left.is_satisfied(index, record) && self.right.is_satisfied(index, record)
    }
}

/// Either operand rule satisfied.
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    left: A,
    right: B,
}

impl<A: Rule, B: Rule> Rule for Or<A, B> {
    fn is_satisfied(&self, index: usize, record: Option<&TradingRecord>) -> bool {
        self.left.is_satisfied(index, record) || self.right.is_satisfied(index, record)
    }
}

/// Operand rule not satisfied.
#[derive(Debug, Clone)]
pub struct Not<R> {
    inner: R,
}

impl<R: Rule> Rule for Not<R> {
    fn is_satisfied(&self, index: usize, record: Option<&TradingRecord>) -> bool {
        !self.inner.is_satisfied(index, record)
    }
}

/// Combinator methods available on every sized rule.
pub trait RuleExt: Rule + Sized {
    fn and<B: Rule>(self, other: B) -> And<Self, B> {
        And {
            left: self,
            right: other,
        }
    }

    fn or<B: Rule>(self, other: B) -> Or<Self, B> {
        Or {
            left: self,
            right: other,
        }
    }

    fn not(self) -> Not<Self> {
        Not { inner: self }
    }
}

impl<R: Rule + Sized> RuleExt for R {}

/// Satisfied exactly at a fixed set of indices. Test and scaffolding rule.
#[derive(Debug, Clone)]
pub struct FixedRule {
    indices: Vec<usize>,
}

impl FixedRule {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }
}

impl Rule for FixedRule {
    fn is_satisfied(&self, index: usize, _record: Option<&TradingRecord>) -> bool {
        self.indices.contains(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rule_matches_its_indices() {
        let rule = FixedRule::new([1, 4]);
        assert!(rule.is_satisfied(1, None));
        assert!(!rule.is_satisfied(2, None));
        assert!(rule.is_satisfied(4, None));
    }

    #[test]
    fn boolean_combinators() {
        let odd = FixedRule::new([1, 3]);
        let small = FixedRule::new([1, 2]);

        assert!(odd.clone().and(small.clone()).is_satisfied(1, None));
        assert!(!odd.clone().and(small.clone()).is_satisfied(3, None));
        assert!(odd.clone().or(small.clone()).is_satisfied(2, None));
        assert!(!odd.clone().or(small).is_satisfied(0, None));
        assert!(odd.not().is_satisfied(0, None));
    }

    #[test]
    fn boxed_rules_delegate() {
        let rule: Box<dyn Rule> = Box::new(FixedRule::new([2]));
        assert!(rule.is_satisfied(2, None));
        assert!(!rule.is_satisfied(3, None));
    }
}
