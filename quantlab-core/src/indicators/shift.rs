//! Index shifts — lagged and forward-shifted views of a source.
//!
//! [`PreviousValue`] looks back and degrades to NaN before enough history
//! exists. [`FutureValue`] intentionally looks ahead; its output is the
//! tri-state [`Lookahead`], which keeps "the bar has not arrived yet"
//! distinct from "the datum is unknowable". FutureValue is deliberately
//! not memoized: a `Pending` result for an index becomes a `Value` once
//! the series grows past the target, and the cache layer never
//! invalidates, so caching here would freeze the answer.

use crate::indicators::Indicator;
use crate::series::SeriesHandle;
use serde::{Deserialize, Serialize};

/// Result of a forward-shifted read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Lookahead<T> {
    /// The target bar exists and carries a defined value.
    Value(T),
    /// The target index is past the series end; it may still arrive.
    Pending,
    /// The target bar exists but its datum is NaN — unknown by design.
    Undefined,
}

impl<T> Lookahead<T> {
    pub fn value_or(self, default: T) -> T {
        match self {
            Lookahead::Value(v) => v,
            _ => default,
        }
    }

    pub fn as_option(self) -> Option<T> {
        match self {
            Lookahead::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Lookahead::Pending)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Lookahead::Undefined)
    }
}

/// Source value `n` bars back; NaN while the lag reaches before the
/// series begin index.
#[derive(Debug, Clone)]
pub struct PreviousValue<I> {
    source: I,
    n: usize,
}

impl<I: Indicator<Output = f64>> PreviousValue<I> {
    pub fn new(source: I, n: usize) -> Self {
        assert!(n >= 1, "lag must be >= 1");
        Self { source, n }
    }
}

impl<I: Indicator<Output = f64>> Indicator for PreviousValue<I> {
    type Output = f64;

    fn value(&self, index: usize) -> f64 {
        let begin = self.source.series().begin_index();
        if index < begin + self.n {
            return f64::NAN;
        }
        self.source.value(index - self.n)
    }

    fn series(&self) -> &SeriesHandle {
        self.source.series()
    }
}

/// Source value `n` bars ahead, reported as a [`Lookahead`].
#[derive(Debug, Clone)]
pub struct FutureValue<I> {
    source: I,
    n: usize,
}

impl<I: Indicator<Output = f64>> FutureValue<I> {
    pub fn new(source: I, n: usize) -> Self {
        assert!(n >= 1, "lead must be >= 1");
        Self { source, n }
    }
}

impl<I: Indicator<Output = f64>> Indicator for FutureValue<I> {
    type Output = Lookahead<f64>;

    fn value(&self, index: usize) -> Lookahead<f64> {
        let target = index + self.n;
        match self.source.series().end_index() {
            Some(end) if target <= end => {
                let v = self.source.value(target);
                if v.is_nan() {
                    Lookahead::Undefined
                } else {
                    Lookahead::Value(v)
                }
            }
            _ => Lookahead::Pending,
        }
    }

    fn series(&self) -> &SeriesHandle {
        self.source.series()
    }
}
