//! Constant-value indicator, for thresholds in compositions.

use crate::indicators::Indicator;
use crate::series::SeriesHandle;

/// Yields the same value at every index of its series.
#[derive(Debug, Clone)]
pub struct Constant {
    series: SeriesHandle,
    value: f64,
}

impl Constant {
    pub fn new(series: &SeriesHandle, value: f64) -> Self {
        Self {
            series: series.clone(),
            value,
        }
    }
}

impl Indicator for Constant {
    type Output = f64;

    fn value(&self, _index: usize) -> f64 {
        self.value
    }

    fn series(&self) -> &SeriesHandle {
        &self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_series;

    #[test]
    fn constant_everywhere() {
        let series = make_series(&[1.0, 2.0, 3.0]);
        let threshold = Constant::new(&series, 42.5);
        assert_eq!(threshold.value(0), 42.5);
        assert_eq!(threshold.value(2), 42.5);
    }
}
