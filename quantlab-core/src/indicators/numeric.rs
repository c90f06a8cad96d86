//! Numeric composition — arithmetic and comparison combinators.
//!
//! Combinators are indicators themselves but hold no cache: caching belongs
//! to the memoized layer composed beneath them. Arithmetic follows IEEE-754
//! throughout — division by zero yields ±Infinity, undefined inputs stay
//! NaN, and comparisons against NaN are false. The framework never traps
//! numeric edge cases.

use crate::indicators::Indicator;
use crate::series::SeriesHandle;

/// Elementwise combination of two numeric indicators.
#[derive(Debug, Clone)]
pub struct BinaryOp<L, R> {
    left: L,
    right: R,
    op: fn(f64, f64) -> f64,
}

impl<L, R> BinaryOp<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    pub fn new(left: L, right: R, op: fn(f64, f64) -> f64) -> Self {
        debug_assert!(
            left.series().same_series(right.series()),
            "combined indicators must read the same series"
        );
        Self { left, right, op }
    }
}

impl<L, R> Indicator for BinaryOp<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    type Output = f64;

    fn value(&self, index: usize) -> f64 {
        (self.op)(self.left.value(index), self.right.value(index))
    }

    fn series(&self) -> &SeriesHandle {
        self.left.series()
    }
}

/// Elementwise transform of one numeric indicator.
#[derive(Debug, Clone)]
pub struct UnaryOp<I> {
    source: I,
    op: fn(f64) -> f64,
}

impl<I: Indicator<Output = f64>> UnaryOp<I> {
    pub fn new(source: I, op: fn(f64) -> f64) -> Self {
        Self { source, op }
    }
}

impl<I: Indicator<Output = f64>> Indicator for UnaryOp<I> {
    type Output = f64;

    fn value(&self, index: usize) -> f64 {
        (self.op)(self.source.value(index))
    }

    fn series(&self) -> &SeriesHandle {
        self.source.series()
    }
}

/// Elementwise comparison of two numeric indicators, yielding a predicate.
#[derive(Debug, Clone)]
pub struct CmpOp<L, R> {
    left: L,
    right: R,
    op: fn(f64, f64) -> bool,
}

impl<L, R> CmpOp<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    pub fn new(left: L, right: R, op: fn(f64, f64) -> bool) -> Self {
        debug_assert!(
            left.series().same_series(right.series()),
            "compared indicators must read the same series"
        );
        Self { left, right, op }
    }
}

impl<L, R> Indicator for CmpOp<L, R>
where
    L: Indicator<Output = f64>,
    R: Indicator<Output = f64>,
{
    type Output = bool;

    fn value(&self, index: usize) -> bool {
        (self.op)(self.left.value(index), self.right.value(index))
    }

    fn series(&self) -> &SeriesHandle {
        self.left.series()
    }
}

/// Combinator methods for numeric indicators.
///
/// Share an operand between several combinators by wrapping it in an `Arc`
/// and cloning the `Arc` — the cache underneath is shared, not re-derived.
pub trait NumericExt: Indicator<Output = f64> + Sized {
    fn plus<R: Indicator<Output = f64>>(self, rhs: R) -> BinaryOp<Self, R> {
        BinaryOp::new(self, rhs, |a, b| a + b)
    }

    fn minus<R: Indicator<Output = f64>>(self, rhs: R) -> BinaryOp<Self, R> {
        BinaryOp::new(self, rhs, |a, b| a - b)
    }

    fn multiplied_by<R: Indicator<Output = f64>>(self, rhs: R) -> BinaryOp<Self, R> {
        BinaryOp::new(self, rhs, |a, b| a * b)
    }

    fn divided_by<R: Indicator<Output = f64>>(self, rhs: R) -> BinaryOp<Self, R> {
        BinaryOp::new(self, rhs, |a, b| a / b)
    }

    fn min<R: Indicator<Output = f64>>(self, rhs: R) -> BinaryOp<Self, R> {
        BinaryOp::new(self, rhs, f64::min)
    }

    fn max<R: Indicator<Output = f64>>(self, rhs: R) -> BinaryOp<Self, R> {
        BinaryOp::new(self, rhs, f64::max)
    }

    fn sqrt(self) -> UnaryOp<Self> {
        UnaryOp::new(self, f64::sqrt)
    }

    fn abs(self) -> UnaryOp<Self> {
        UnaryOp::new(self, f64::abs)
    }

    fn greater_than<R: Indicator<Output = f64>>(self, rhs: R) -> CmpOp<Self, R> {
        CmpOp::new(self, rhs, |a, b| a > b)
    }

    fn at_least<R: Indicator<Output = f64>>(self, rhs: R) -> CmpOp<Self, R> {
        CmpOp::new(self, rhs, |a, b| a >= b)
    }

    fn less_than<R: Indicator<Output = f64>>(self, rhs: R) -> CmpOp<Self, R> {
        CmpOp::new(self, rhs, |a, b| a < b)
    }

    fn at_most<R: Indicator<Output = f64>>(self, rhs: R) -> CmpOp<Self, R> {
        CmpOp::new(self, rhs, |a, b| a <= b)
    }
}

impl<I: Indicator<Output = f64> + Sized> NumericExt for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, ClosePrice, Constant, DEFAULT_EPSILON};
    use std::sync::Arc;

    #[test]
    fn arithmetic_combinators() {
        let series = make_series(&[10.0, 20.0, 30.0]);
        let close = Arc::new(ClosePrice::new(&series));
        let two = Constant::new(&series, 2.0);

        let doubled = Arc::clone(&close).multiplied_by(two);
        assert_approx(doubled.value(1), 40.0, DEFAULT_EPSILON);

        let spread = Arc::clone(&close).minus(Constant::new(&series, 5.0));
        assert_approx(spread.value(2), 25.0, DEFAULT_EPSILON);

        let rooted = Arc::clone(&close).sqrt();
        assert_approx(rooted.value(0), 10.0_f64.sqrt(), DEFAULT_EPSILON);

        let clamped = close.min(Constant::new(&series, 15.0));
        assert_approx(clamped.value(0), 10.0, DEFAULT_EPSILON);
        assert_approx(clamped.value(2), 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn division_by_zero_yields_infinity() {
        let series = make_series(&[10.0, -10.0]);
        let close = Arc::new(ClosePrice::new(&series));
        let quotient = Arc::clone(&close).divided_by(Constant::new(&series, 0.0));
        assert_eq!(quotient.value(0), f64::INFINITY);
        assert_eq!(quotient.value(1), f64::NEG_INFINITY);
    }

    #[test]
    fn nan_propagates_through_composition() {
        let series = make_series(&[10.0, 20.0]);
        let close = Arc::new(ClosePrice::new(&series));
        let sum = Arc::clone(&close).plus(Arc::clone(&close));

        // Index 5 is past the series end: NaN in, NaN out.
        assert!(sum.value(5).is_nan());
        // Comparisons against NaN are false, in both directions.
        let above = Arc::clone(&close).greater_than(Constant::new(&series, 0.0));
        let below = close.less_than(Constant::new(&series, 1e9));
        assert!(!above.value(5));
        assert!(!below.value(5));
    }

    #[test]
    fn comparison_combinators() {
        let series = make_series(&[10.0, 20.0, 20.0]);
        let close = Arc::new(ClosePrice::new(&series));
        let limit = Constant::new(&series, 20.0);

        let over = Arc::clone(&close).greater_than(limit.clone());
        assert!(!over.value(1));

        let at_least = close.at_least(limit);
        assert!(at_least.value(1));
        assert!(at_least.value(2));
    }
}
