//! Memoized evaluation — each index computed at most once.
//!
//! [`Cached`] wraps a [`Calculation`] with a per-index cache. The cache is
//! a vector of once-cells keyed by absolute index: the first reader of an
//! index runs the calculation and publishes the result, every later reader
//! gets the stored value, and concurrent readers of the same index are
//! serialized by the cell so the calculation still runs exactly once. A
//! written entry is never invalidated; when a bounded series evicts bars,
//! the stale entries below `begin_index` are simply never addressed again.

use crate::indicators::Indicator;
use crate::series::SeriesHandle;
use std::sync::{Arc, OnceLock, RwLock};

/// Re-entry point handed to [`Calculation::calculate`], so a calculation
/// can request other indices of its own memoized self (e.g. `memo(index - 1)`
/// for a recurrence). Requests must be index-decreasing and bottom out at
/// the series begin index — the framework does not guard against a
/// calculation that recurses into its own index.
pub type Memo<'a, T> = &'a dyn Fn(usize) -> T;

/// The per-index calculation behind a [`Cached`] indicator.
pub trait Calculation: Send + Sync {
    type Output: Clone + Send + Sync;

    /// The series the calculation reads.
    fn series(&self) -> &SeriesHandle;

    /// Compute the value at `index`. Reads of other indicators go through
    /// their own `value` (and caches); reads of earlier indices of this
    /// same indicator go through `memo`.
    fn calculate(&self, index: usize, memo: Memo<'_, Self::Output>) -> Self::Output;
}

/// Sparse-growing store of computed values, one once-cell per index.
#[derive(Debug)]
pub struct Cache<T> {
    cells: RwLock<Vec<Arc<OnceLock<T>>>>,
}

impl<T: Clone> Default for Cache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Cache<T> {
    pub fn new() -> Self {
        Self {
            cells: RwLock::new(Vec::new()),
        }
    }

    /// The cell for `index`, growing the vector on first touch.
    ///
    /// The guard is dropped before the cell is returned, so a computation
    /// running inside the cell may grow the cache for recursive lookups
    /// without deadlocking.
    fn cell(&self, index: usize) -> Arc<OnceLock<T>> {
        {
            let cells = self.cells.read().expect("cache lock poisoned");
            if let Some(cell) = cells.get(index) {
                return Arc::clone(cell);
            }
        }
        let mut cells = self.cells.write().expect("cache lock poisoned");
        while cells.len() <= index {
            cells.push(Arc::new(OnceLock::new()));
        }
        Arc::clone(&cells[index])
    }

    /// Stored value at `index`, or run `compute` and store its result.
    ///
    /// At most one caller ever runs `compute` for a given index.
    pub fn get_or_compute(&self, index: usize, compute: impl FnOnce() -> T) -> T {
        self.cell(index).get_or_init(compute).clone()
    }

    /// Whether a value has been stored for `index`.
    pub fn is_cached(&self, index: usize) -> bool {
        let cells = self.cells.read().expect("cache lock poisoned");
        cells.get(index).is_some_and(|cell| cell.get().is_some())
    }
}

/// Memoizing wrapper: an [`Indicator`] that runs its [`Calculation`] at
/// most once per index.
pub struct Cached<C: Calculation> {
    calc: C,
    cache: Cache<C::Output>,
}

impl<C: Calculation + std::fmt::Debug> std::fmt::Debug for Cached<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cached").field("calc", &self.calc).finish_non_exhaustive()
    }
}

impl<C: Calculation> Cached<C> {
    pub fn new(calc: C) -> Self {
        Self {
            calc,
            cache: Cache::new(),
        }
    }

    /// The wrapped calculation.
    pub fn calculation(&self) -> &C {
        &self.calc
    }

    /// Whether `index` has been computed already.
    pub fn is_cached(&self, index: usize) -> bool {
        self.cache.is_cached(index)
    }

    fn value_at(&self, index: usize) -> C::Output {
        self.cache
            .get_or_compute(index, || self.calc.calculate(index, &|i| self.value_at(i)))
    }
}

impl<C: Calculation> Indicator for Cached<C> {
    type Output = C::Output;

    fn value(&self, index: usize) -> C::Output {
        self.value_at(index)
    }

    fn series(&self) -> &SeriesHandle {
        self.calc.series()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_series;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Close price with a calculation-invocation counter.
    struct CountingClose {
        series: SeriesHandle,
        calls: AtomicUsize,
    }

    impl CountingClose {
        fn new(series: SeriesHandle) -> Self {
            Self {
                series,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Calculation for CountingClose {
        type Output = f64;

        fn series(&self) -> &SeriesHandle {
            &self.series
        }

        fn calculate(&self, index: usize, _memo: Memo<'_, f64>) -> f64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.series.bar(index).map_or(f64::NAN, |b| b.close)
        }
    }

    /// Running total of closes, expressed as a recurrence through the memo.
    struct CumulativeClose {
        series: SeriesHandle,
        calls: AtomicUsize,
    }

    impl Calculation for CumulativeClose {
        type Output = f64;

        fn series(&self) -> &SeriesHandle {
            &self.series
        }

        fn calculate(&self, index: usize, memo: Memo<'_, f64>) -> f64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let close = self.series.bar(index).map_or(f64::NAN, |b| b.close);
            if index <= self.series.begin_index() {
                close
            } else {
                memo(index - 1) + close
            }
        }
    }

    #[test]
    fn calculation_runs_once_per_index() {
        let series = make_series(&[10.0, 11.0, 12.0]);
        let cached = Cached::new(CountingClose::new(series));

        let first = cached.value(1);
        let second = cached.value(1);
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(cached.calculation().calls.load(Ordering::SeqCst), 1);

        cached.value(2);
        assert_eq!(cached.calculation().calls.load(Ordering::SeqCst), 2);
        assert!(cached.is_cached(1));
        assert!(!cached.is_cached(0));
    }

    #[test]
    fn recurrence_through_memo_fills_all_lower_indices() {
        let series = make_series(&[1.0, 2.0, 3.0, 4.0]);
        let cached = Cached::new(CumulativeClose {
            series,
            calls: AtomicUsize::new(0),
        });

        assert_eq!(cached.value(3), 10.0);
        // One calculation per index, despite the recursion.
        assert_eq!(cached.calculation().calls.load(Ordering::SeqCst), 4);

        // Every intermediate index is now served from the cache.
        assert_eq!(cached.value(1), 3.0);
        assert_eq!(cached.calculation().calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn concurrent_readers_compute_once() {
        let series = make_series(&[5.0; 64]);
        let cached = Arc::new(Cached::new(CountingClose::new(series)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cached = Arc::clone(&cached);
                std::thread::spawn(move || {
                    for i in 0..64 {
                        assert_eq!(cached.value(i), 5.0);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 8 threads × 64 indices, but each index computed exactly once.
        assert_eq!(cached.calculation().calls.load(Ordering::SeqCst), 64);
    }

    #[test]
    fn boolean_calculations_memoize_the_same_way() {
        /// Predicate: close strictly above the previous close.
        struct RisingClose {
            series: SeriesHandle,
            calls: AtomicUsize,
        }

        impl Calculation for RisingClose {
            type Output = bool;

            fn series(&self) -> &SeriesHandle {
                &self.series
            }

            fn calculate(&self, index: usize, _memo: Memo<'_, bool>) -> bool {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if index <= self.series.begin_index() {
                    return false;
                }
                let now = self.series.bar(index).map_or(f64::NAN, |b| b.close);
                let before = self.series.bar(index - 1).map_or(f64::NAN, |b| b.close);
                now > before
            }
        }

        let series = make_series(&[10.0, 12.0, 11.0]);
        let rising = Cached::new(RisingClose {
            series,
            calls: AtomicUsize::new(0),
        });

        assert!(!rising.value(0));
        assert!(rising.value(1));
        assert!(!rising.value(2));
        assert!(rising.value(1));
        assert_eq!(rising.calculation().calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn nan_results_are_cached_too() {
        let series = make_series(&[10.0]);
        let cached = Cached::new(CountingClose::new(series));

        assert!(cached.value(5).is_nan());
        assert!(cached.value(5).is_nan());
        assert_eq!(cached.calculation().calls.load(Ordering::SeqCst), 1);
    }
}
