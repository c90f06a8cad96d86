//! Bar series store — append-only, optionally bounded.
//!
//! Indices are absolute: they keep counting up for the life of the series.
//! With a maximum bar count configured, appending past the limit evicts the
//! oldest bar and advances `begin_index`; evicted indices are never
//! re-addressable. Indicators hold a [`SeriesHandle`] — a cheap clone of a
//! shared, lock-guarded view — rather than owning any bars themselves.

use crate::domain::Bar;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("index {index} outside valid range {begin}..={end}")]
    OutOfBounds { index: usize, begin: usize, end: usize },

    #[error("series is empty")]
    Empty,

    #[error("bar beginning {bar_begin} precedes end of last bar {last_end}")]
    OutOfOrder {
        bar_begin: chrono::NaiveDateTime,
        last_end: chrono::NaiveDateTime,
    },
}

/// Ordered, append-only sequence of bars.
///
/// Mutated only by [`BarSeries::append`]; never reordered or spliced.
#[derive(Debug, Clone)]
pub struct BarSeries {
    name: String,
    bars: VecDeque<Bar>,
    /// Number of bars evicted from the front; equals the current begin index.
    removed: usize,
    max_bar_count: Option<usize>,
}

impl BarSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bars: VecDeque::new(),
            removed: 0,
            max_bar_count: None,
        }
    }

    /// Series that keeps at most `max_bar_count` bars, evicting from the front.
    pub fn with_max_bar_count(name: impl Into<String>, max_bar_count: usize) -> Self {
        assert!(max_bar_count >= 1, "max bar count must be >= 1");
        Self {
            name: name.into(),
            bars: VecDeque::new(),
            removed: 0,
            max_bar_count: Some(max_bar_count),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_bar_count(&self) -> Option<usize> {
        self.max_bar_count
    }

    /// Index of the oldest addressable bar.
    pub fn begin_index(&self) -> usize {
        self.removed
    }

    /// Index of the newest bar, or `None` while the series is empty.
    pub fn end_index(&self) -> Option<usize> {
        if self.bars.is_empty() {
            None
        } else {
            Some(self.removed + self.bars.len() - 1)
        }
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_bar(&self) -> Option<&Bar> {
        self.bars.front()
    }

    pub fn last_bar(&self) -> Option<&Bar> {
        self.bars.back()
    }

    /// Bar at an absolute index.
    pub fn get(&self, index: usize) -> Result<&Bar, SeriesError> {
        let end = self.end_index().ok_or(SeriesError::Empty)?;
        if index < self.removed || index > end {
            return Err(SeriesError::OutOfBounds {
                index,
                begin: self.removed,
                end,
            });
        }
        Ok(&self.bars[index - self.removed])
    }

    /// Append a bar, evicting the oldest one when the count limit is exceeded.
    ///
    /// The new bar must not begin before the last bar ends.
    pub fn append(&mut self, bar: Bar) -> Result<(), SeriesError> {
        if let Some(last) = self.bars.back() {
            if bar.begin_time < last.end_time {
                return Err(SeriesError::OutOfOrder {
                    bar_begin: bar.begin_time,
                    last_end: last.end_time,
                });
            }
        }
        self.bars.push_back(bar);
        if let Some(max) = self.max_bar_count {
            if self.bars.len() > max {
                self.bars.pop_front();
                self.removed += 1;
                tracing::trace!(
                    series = %self.name,
                    begin_index = self.removed,
                    "evicted oldest bar"
                );
            }
        }
        Ok(())
    }
}

/// Shared, clonable view over a [`BarSeries`].
///
/// Indicators store one of these instead of a series reference, which keeps
/// the dependency graph free of lifetimes while the series keeps growing.
/// The store is single-writer: appends and reads are serialized by the
/// inner lock, so an in-progress eviction can never be observed half-done.
#[derive(Debug, Clone)]
pub struct SeriesHandle {
    inner: Arc<RwLock<BarSeries>>,
}

impl SeriesHandle {
    pub fn new(series: BarSeries) -> Self {
        Self {
            inner: Arc::new(RwLock::new(series)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BarSeries> {
        self.inner.read().expect("series lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, BarSeries> {
        self.inner.write().expect("series lock poisoned")
    }

    pub fn append(&self, bar: Bar) -> Result<(), SeriesError> {
        self.write().append(bar)
    }

    /// Copy of the bar at an absolute index.
    pub fn bar(&self, index: usize) -> Result<Bar, SeriesError> {
        self.read().get(index).copied()
    }

    pub fn begin_index(&self) -> usize {
        self.read().begin_index()
    }

    pub fn end_index(&self) -> Option<usize> {
        self.read().end_index()
    }

    pub fn bar_count(&self) -> usize {
        self.read().bar_count()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn name(&self) -> String {
        self.read().name().to_string()
    }

    /// Run a closure against the locked series, for multi-field reads.
    pub fn with<R>(&self, f: impl FnOnce(&BarSeries) -> R) -> R {
        f(&self.read())
    }

    /// True when both handles view the same underlying store.
    pub fn same_series(&self, other: &SeriesHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
