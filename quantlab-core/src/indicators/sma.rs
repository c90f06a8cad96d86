//! Simple Moving Average (SMA).
//!
//! Mean of the source over the trailing window. Before `period` bars of
//! history exist the window is clipped at the series begin index and the
//! mean is taken over the bars actually available, so the first value
//! equals the source itself.

use crate::indicators::cached::{Cached, Calculation, Memo};
use crate::indicators::Indicator;
use crate::series::SeriesHandle;

#[derive(Debug, Clone)]
pub struct Sma<I> {
    source: I,
    period: usize,
}

impl<I: Indicator<Output = f64>> Sma<I> {
    pub fn new(source: I, period: usize) -> Cached<Self> {
        assert!(period >= 1, "SMA period must be >= 1");
        Cached::new(Self { source, period })
    }
}

impl<I: Indicator<Output = f64>> Calculation for Sma<I> {
    type Output = f64;

    fn series(&self) -> &SeriesHandle {
        self.source.series()
    }

    fn calculate(&self, index: usize, _memo: Memo<'_, f64>) -> f64 {
        let begin = self.series().begin_index();
        if index < begin {
            return f64::NAN;
        }
        let start = index.saturating_sub(self.period - 1).max(begin);
        let mut sum = 0.0;
        for i in start..=index {
            sum += self.source.value(i);
        }
        sum / (index - start + 1) as f64
    }
}
