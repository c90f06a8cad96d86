//! Window extrema — highest and lowest source value over a lookback.
//!
//! NaN entries in the window are skipped; a window with no defined value
//! yields NaN.

use crate::indicators::cached::{Cached, Calculation, Memo};
use crate::indicators::Indicator;
use crate::series::SeriesHandle;

fn window_fold<I: Indicator<Output = f64>>(
    source: &I,
    period: usize,
    index: usize,
    pick: fn(f64, f64) -> f64,
) -> f64 {
    let begin = source.series().begin_index();
    if index < begin {
        return f64::NAN;
    }
    let start = index.saturating_sub(period - 1).max(begin);
    let mut best = f64::NAN;
    for i in start..=index {
        let v = source.value(i);
        if v.is_nan() {
            continue;
        }
        best = if best.is_nan() { v } else { pick(best, v) };
    }
    best
}

/// Highest source value over the trailing `period` bars.
#[derive(Debug, Clone)]
pub struct Highest<I> {
    source: I,
    period: usize,
}

impl<I: Indicator<Output = f64>> Highest<I> {
    pub fn new(source: I, period: usize) -> Cached<Self> {
        assert!(period >= 1, "window period must be >= 1");
        Cached::new(Self { source, period })
    }
}

impl<I: Indicator<Output = f64>> Calculation for Highest<I> {
    type Output = f64;

    fn series(&self) -> &SeriesHandle {
        self.source.series()
    }

    fn calculate(&self, index: usize, _memo: Memo<'_, f64>) -> f64 {
        window_fold(&self.source, self.period, index, f64::max)
    }
}

/// Lowest source value over the trailing `period` bars.
#[derive(Debug, Clone)]
pub struct Lowest<I> {
    source: I,
    period: usize,
}

impl<I: Indicator<Output = f64>> Lowest<I> {
    pub fn new(source: I, period: usize) -> Cached<Self> {
        assert!(period >= 1, "window period must be >= 1");
        Cached::new(Self { source, period })
    }
}

impl<I: Indicator<Output = f64>> Calculation for Lowest<I> {
    type Output = f64;

    fn series(&self) -> &SeriesHandle {
        self.source.series()
    }

    fn calculate(&self, index: usize, _memo: Memo<'_, f64>) -> f64 {
        window_fold(&self.source, self.period, index, f64::min)
    }
}
