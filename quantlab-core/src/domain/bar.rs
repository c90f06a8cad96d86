//! Bar — the fundamental market data unit.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// OHLCV observation for a fixed time period.
///
/// Price and volume columns may be `NaN` to represent unknown data; NaN
/// propagates through every indicator built on top of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub begin_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Traded notional over the period (price × volume aggregate).
    pub amount: f64,
}

impl Bar {
    /// Build a bar from its end time and period length.
    ///
    /// Panics if `period` is not positive: a bar must span a non-empty
    /// interval (`end_time > begin_time`).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        end_time: NaiveDateTime,
        period: Duration,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        amount: f64,
    ) -> Self {
        assert!(period > Duration::zero(), "bar period must be positive");
        Self {
            begin_time: end_time - period,
            end_time,
            open,
            high,
            low,
            close,
            volume,
            amount,
        }
    }

    /// One-day bar ending at midnight after `date`.
    pub fn daily(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        let end = date.and_time(chrono::NaiveTime::MIN) + Duration::days(1);
        Self::new(
            end,
            Duration::days(1),
            open,
            high,
            low,
            close,
            volume,
            close * volume,
        )
    }

    /// Length of the interval this bar covers.
    pub fn time_period(&self) -> Duration {
        self.end_time - self.begin_time
    }

    /// Returns true if any OHLC field is NaN (void bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check: high >= low, high bounds open/close, etc.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}
