//! Indicator framework and the built-in indicator set.
//!
//! An indicator is a pure function from a series index to a derived value,
//! generic over its output type (numeric indicators yield `f64`, predicates
//! yield `bool`, the forward-looking shift yields [`shift::Lookahead`]).
//! Indicators read the series store and each other, forming a DAG; sharing
//! a node between consumers is an `Arc` clone. Expensive calculations are
//! wrapped by [`cached::Cached`], which guarantees each index is computed
//! at most once; combinators in [`numeric`] hold no cache of their own and
//! lean on whatever caching sits beneath them.
//!
//! Undefined values are not errors: an indicator evaluated before enough
//! history exists yields NaN, and NaN propagates through composition per
//! IEEE-754 (any comparison against NaN is false).

pub mod cached;
pub mod constant;
pub mod ema;
pub mod numeric;
pub mod price;
pub mod range;
pub mod shift;
pub mod sma;

pub use cached::{Cache, Cached, Calculation, Memo};
pub use constant::Constant;
pub use ema::Ema;
pub use numeric::{BinaryOp, CmpOp, NumericExt, UnaryOp};
pub use price::{ClosePrice, HighPrice, LowPrice, Volume};
pub use range::{Highest, Lowest};
pub use shift::{FutureValue, Lookahead, PreviousValue};
pub use sma::Sma;

use crate::series::SeriesHandle;
use std::sync::Arc;

/// A derived value over a bar series, evaluated per index.
///
/// # Contract
/// `value(index)` must be a pure function of the series contents at and
/// before `index` — no look-ahead, except for indicators documented as
/// forward-shifted (which report "not yet available" past the series end
/// instead of peeking). Indices outside the series' valid range are a
/// usage error; numeric indicators yield NaN for them rather than
/// panicking, letting warmup reads before `begin_index` degrade gracefully.
pub trait Indicator: Send + Sync {
    type Output: Clone + Send + Sync;

    /// Evaluate at an absolute series index.
    fn value(&self, index: usize) -> Self::Output;

    /// The series this indicator is derived from.
    fn series(&self) -> &SeriesHandle;
}

impl<I: Indicator + ?Sized> Indicator for Arc<I> {
    type Output = I::Output;

    fn value(&self, index: usize) -> Self::Output {
        (**self).value(index)
    }

    fn series(&self) -> &SeriesHandle {
        (**self).series()
    }
}

/// Create a series handle over daily bars with the given closes, for tests.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> SeriesHandle {
    use crate::domain::Bar;
    use crate::series::BarSeries;

    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let handle = SeriesHandle::new(BarSeries::new("TEST"));
    for (i, &close) in closes.iter().enumerate() {
        let open = if i == 0 { close } else { closes[i - 1] };
        let high = open.max(close) + 1.0;
        let low = open.min(close) - 1.0;
        let date = base_date + chrono::Duration::days(i as i64);
        handle
            .append(Bar::daily(date, open, high, low, close, 1000.0))
            .expect("test bars are chronological");
    }
    handle
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
