//! Price and volume selectors — the leaves of most indicator graphs.
//!
//! Each selector is a direct O(1) read of one bar field; wrapping these in
//! the memoized layer would cache nothing worth caching, so they implement
//! [`Indicator`] directly. Reads outside the series' valid range yield NaN.

use crate::indicators::Indicator;
use crate::series::SeriesHandle;

macro_rules! field_indicator {
    ($(#[$doc:meta])* $name:ident, $field:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            series: SeriesHandle,
        }

        impl $name {
            pub fn new(series: &SeriesHandle) -> Self {
                Self {
                    series: series.clone(),
                }
            }
        }

        impl Indicator for $name {
            type Output = f64;

            fn value(&self, index: usize) -> f64 {
                self.series.bar(index).map_or(f64::NAN, |b| b.$field)
            }

            fn series(&self) -> &SeriesHandle {
                &self.series
            }
        }
    };
}

field_indicator!(
    /// Close price of the bar at each index.
    ClosePrice,
    close
);
field_indicator!(
    /// High price of the bar at each index.
    HighPrice,
    high
);
field_indicator!(
    /// Low price of the bar at each index.
    LowPrice,
    low
);
field_indicator!(
    /// Traded volume of the bar at each index.
    Volume,
    volume
);
