//! QuantLab Core — bar series store, memoized indicator graph, cost
//! models, position/ledger state machine, backtest loop.
//!
//! This crate contains the heart of the analysis engine:
//! - Domain types (bars, trades, positions, trading record)
//! - Append-only bar series store with an optional sliding window
//! - Indicator trait with per-index memoized evaluation (compute-once)
//! - Numeric composition combinators (arithmetic, comparisons)
//! - Pluggable cost models (zero, fixed, linear, borrowing)
//! - Rule and strategy boundary plus the bar-by-bar backtest driver

pub mod costs;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod rules;
pub mod series;
pub mod strategy;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the shared types are Send + Sync.
    ///
    /// Memoized indicators are designed to be read from several threads at
    /// once; if a field change ever breaks that, this fails to compile
    /// instead of surfacing as a late retrofit.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Trade>();
        require_sync::<domain::Trade>();
        require_send::<domain::TradeType>();
        require_sync::<domain::TradeType>();
        require_send::<domain::Position>();
        require_sync::<domain::Position>();
        require_send::<domain::TradingRecord>();
        require_sync::<domain::TradingRecord>();

        // Store and policies
        require_send::<series::BarSeries>();
        require_sync::<series::BarSeries>();
        require_send::<series::SeriesHandle>();
        require_sync::<series::SeriesHandle>();
        require_send::<costs::CostModel>();
        require_sync::<costs::CostModel>();

        // Indicator graph nodes
        require_send::<indicators::ClosePrice>();
        require_sync::<indicators::ClosePrice>();
        require_send::<indicators::Constant>();
        require_sync::<indicators::Constant>();
        require_send::<indicators::Cache<f64>>();
        require_sync::<indicators::Cache<f64>>();

        // Engine
        require_send::<engine::Backtest>();
        require_sync::<engine::Backtest>();
        require_send::<engine::BacktestConfig>();
        require_sync::<engine::BacktestConfig>();
    }

    /// Architecture contract: rules cannot mutate the trading record.
    ///
    /// The trait signature takes `Option<&TradingRecord>` — a shared
    /// reference — so no rule implementation can place trades. If the
    /// signature ever changes, this stops compiling and the contract is
    /// renegotiated explicitly.
    #[test]
    fn rules_observe_the_record_read_only() {
        fn _check_trait_object_builds(
            rule: &dyn rules::Rule,
            record: &domain::TradingRecord,
        ) -> bool {
            rule.is_satisfied(0, Some(record))
        }
    }
}
