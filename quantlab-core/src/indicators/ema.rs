//! Exponential Moving Average (EMA).
//!
//! Classic recurrence `ema(i) = ema(i-1) + k × (source(i) − ema(i-1))`
//! with `k = 2 / (period + 1)`, seeded with the source value at the series
//! begin index. The recursion runs through the memo, so evaluating a late
//! index fills the cache for every earlier one exactly once.

use crate::indicators::cached::{Cached, Calculation, Memo};
use crate::indicators::Indicator;
use crate::series::SeriesHandle;

#[derive(Debug, Clone)]
pub struct Ema<I> {
    source: I,
    multiplier: f64,
}

impl<I: Indicator<Output = f64>> Ema<I> {
    pub fn new(source: I, period: usize) -> Cached<Self> {
        assert!(period >= 1, "EMA period must be >= 1");
        Cached::new(Self {
            source,
            multiplier: 2.0 / (period as f64 + 1.0),
        })
    }
}

impl<I: Indicator<Output = f64>> Calculation for Ema<I> {
    type Output = f64;

    fn series(&self) -> &SeriesHandle {
        self.source.series()
    }

    fn calculate(&self, index: usize, memo: Memo<'_, f64>) -> f64 {
        if index <= self.series().begin_index() {
            return self.source.value(index);
        }
        let prev = memo(index - 1);
        prev + self.multiplier * (self.source.value(index) - prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, ClosePrice, DEFAULT_EPSILON};

    #[test]
    fn ema_3_recurrence() {
        let series = make_series(&[10.0, 20.0, 20.0, 40.0]);
        let ema = Ema::new(ClosePrice::new(&series), 3);

        // k = 0.5: 10, 15, 17.5, 28.75.
        assert_approx(ema.value(0), 10.0, DEFAULT_EPSILON);
        assert_approx(ema.value(1), 15.0, DEFAULT_EPSILON);
        assert_approx(ema.value(2), 17.5, DEFAULT_EPSILON);
        assert_approx(ema.value(3), 28.75, DEFAULT_EPSILON);
    }

    #[test]
    fn late_read_seeds_from_series_begin() {
        let series = make_series(&[10.0, 20.0, 20.0, 40.0]);
        let ema = Ema::new(ClosePrice::new(&series), 3);

        // Reading the last index first must agree with incremental reads.
        assert_approx(ema.value(3), 28.75, DEFAULT_EPSILON);
        assert_approx(ema.value(1), 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_1_tracks_the_source() {
        let series = make_series(&[5.0, 7.0, 9.0]);
        let ema = Ema::new(ClosePrice::new(&series), 1);
        assert_approx(ema.value(2), 9.0, DEFAULT_EPSILON);
    }
}
