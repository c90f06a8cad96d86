//! Strategy — the entry/exit decision boundary consumed by the backtest.
//!
//! The engine only ever asks two questions per bar: should a flat book
//! enter, and should an open position exit. Anything that can answer them
//! is a strategy; [`BaseStrategy`] is the standard pairing of one entry
//! rule with one exit rule.

use crate::domain::TradingRecord;
use crate::rules::Rule;

/// Entry/exit decisions evaluated once per bar by the backtest loop.
pub trait Strategy: Send + Sync {
    fn should_enter(&self, index: usize, record: &TradingRecord) -> bool;
    fn should_exit(&self, index: usize, record: &TradingRecord) -> bool;
}

/// A named entry rule / exit rule pair.
pub struct BaseStrategy {
    name: String,
    entry_rule: Box<dyn Rule>,
    exit_rule: Box<dyn Rule>,
}

impl BaseStrategy {
    pub fn new(entry_rule: Box<dyn Rule>, exit_rule: Box<dyn Rule>) -> Self {
        Self::named("strategy", entry_rule, exit_rule)
    }

    pub fn named(
        name: impl Into<String>,
        entry_rule: Box<dyn Rule>,
        exit_rule: Box<dyn Rule>,
    ) -> Self {
        Self {
            name: name.into(),
            entry_rule,
            exit_rule,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Strategy for BaseStrategy {
    fn should_enter(&self, index: usize, record: &TradingRecord) -> bool {
        self.entry_rule.is_satisfied(index, Some(record))
    }

    fn should_exit(&self, index: usize, record: &TradingRecord) -> bool {
        self.exit_rule.is_satisfied(index, Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeType;
    use crate::rules::FixedRule;

    #[test]
    fn base_strategy_delegates_to_rules() {
        let strategy = BaseStrategy::named(
            "fixed",
            Box::new(FixedRule::new([1])),
            Box::new(FixedRule::new([3])),
        );
        let record = TradingRecord::new(TradeType::Buy);

        assert_eq!(strategy.name(), "fixed");
        assert!(strategy.should_enter(1, &record));
        assert!(!strategy.should_enter(2, &record));
        assert!(strategy.should_exit(3, &record));
        assert!(!strategy.should_exit(1, &record));
    }
}
