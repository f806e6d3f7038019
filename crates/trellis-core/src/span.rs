// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::coord::Coordinate;
use num_traits::Zero;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::ops::BitAnd;

/// A closed extent `[lo, hi]` along one axis, defined by an inclusive lower
/// and an inclusive upper co-ordinate.
///
/// All bounds in the interval algebra are treated as closed: two spans
/// overlap iff `lo1 <= hi2 && lo2 <= hi1`, so spans that merely touch at an
/// end-point count as overlapping. Spans support geometric queries
/// (overlap, containment, gap) and set-style operations (hull, intersection,
/// difference, dilation).
///
/// # Invariants
/// `lo` must always be less than or equal to `hi`. A degenerate span with
/// `lo == hi` is legal and represents a single point.
#[derive(Clone, Copy, PartialEq)]
pub struct AxisSpan<C>
where
    C: Coordinate,
{
    lo: C,
    hi: C,
}

/// The error produced when a span is constructed with `lo > hi`.
///
/// Construction never silently swaps or clamps the co-ordinates; an invalid
/// extent is surfaced immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidSpanError<C>
where
    C: Coordinate,
{
    /// The offending lower co-ordinate.
    pub lo: C,
    /// The offending upper co-ordinate.
    pub hi: C,
}

impl<C> std::fmt::Display for InvalidSpanError<C>
where
    C: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid span: lo ({}) must be less than or equal to hi ({})",
            self.lo, self.hi
        )
    }
}

impl<C> std::error::Error for InvalidSpanError<C> where C: Coordinate {}

impl<C> AxisSpan<C>
where
    C: Coordinate,
{
    /// Creates a new `AxisSpan`.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::span::AxisSpan;
    ///
    /// let s = AxisSpan::new(0, 10);
    /// assert_eq!(s.length(), 10);
    /// ```
    #[inline]
    pub fn new(lo: C, hi: C) -> Self {
        assert!(
            lo <= hi,
            "called `AxisSpan::new` with lo ({}) greater than hi ({})",
            lo,
            hi
        );
        Self { lo, hi }
    }

    /// Creates a new `AxisSpan` if the inputs are valid.
    ///
    /// Returns `InvalidSpanError` if `lo > hi`. Note that a NaN end-point
    /// fails the `lo <= hi` comparison and is therefore rejected as well.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::span::AxisSpan;
    ///
    /// assert!(AxisSpan::try_new(0.0, 1.0).is_ok());
    /// assert!(AxisSpan::try_new(1.0, 0.0).is_err());
    /// ```
    #[inline]
    pub fn try_new(lo: C, hi: C) -> Result<Self, InvalidSpanError<C>> {
        if lo <= hi {
            Ok(Self { lo, hi })
        } else {
            Err(InvalidSpanError { lo, hi })
        }
    }

    /// Creates a new `AxisSpan` without checking invariants in release builds.
    ///
    /// # Safety
    ///
    /// The caller must ensure `lo <= hi`. This function contains a
    /// `debug_assert!` to catch errors during development.
    #[inline]
    pub fn new_unchecked(lo: C, hi: C) -> Self {
        debug_assert!(
            lo <= hi,
            "called `AxisSpan::new_unchecked` with lo greater than hi"
        );
        Self { lo, hi }
    }

    /// Creates a degenerate span covering a single point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::span::AxisSpan;
    ///
    /// let p = AxisSpan::point(4);
    /// assert_eq!(p.lo(), 4);
    /// assert_eq!(p.hi(), 4);
    /// ```
    #[inline]
    pub fn point(value: C) -> Self {
        Self {
            lo: value,
            hi: value,
        }
    }

    /// Returns the inclusive lower co-ordinate.
    #[inline]
    pub fn lo(&self) -> C {
        self.lo
    }

    /// Returns the inclusive upper co-ordinate.
    #[inline]
    pub fn hi(&self) -> C {
        self.hi
    }

    /// Returns the length of the span (`hi - lo`).
    ///
    /// A degenerate (single-point) span has length zero.
    #[inline]
    pub fn length(&self) -> C {
        self.hi - self.lo
    }

    /// Returns `true` if the span covers a single point (`lo == hi`).
    #[inline]
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    /// Returns `true` if this span overlaps `other`.
    ///
    /// Bounds are closed, so spans that touch at an end-point overlap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::span::AxisSpan;
    ///
    /// let a = AxisSpan::new(0, 10);
    /// assert!(a.overlaps(&AxisSpan::new(10, 20))); // touching counts
    /// assert!(a.overlaps(&AxisSpan::new(5, 15)));
    /// assert!(!a.overlaps(&AxisSpan::new(11, 20)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }

    /// Returns `true` if `value` lies inside the closed span.
    #[inline]
    pub fn contains_point(&self, value: C) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Returns `true` if `other` lies entirely inside `self`.
    #[inline]
    pub fn contains_span(&self, other: &Self) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    /// Returns the smallest span containing both `self` and `other`
    /// (per-end `min(lo)` / `max(hi)`).
    ///
    /// Unlike a set union, the hull always exists, even for disjoint spans.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::span::AxisSpan;
    ///
    /// let a = AxisSpan::new(0, 5);
    /// let b = AxisSpan::new(12, 20);
    /// assert_eq!(a.span(&b), AxisSpan::new(0, 20));
    /// ```
    #[inline]
    pub fn span(&self, other: &Self) -> Self {
        Self {
            lo: self.lo.min_of(other.lo),
            hi: self.hi.max_of(other.hi),
        }
    }

    /// Calculates the intersection of two spans.
    ///
    /// Returns `None` if the spans are disjoint. Touching spans intersect in
    /// a single point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::span::AxisSpan;
    ///
    /// let a = AxisSpan::new(0, 10);
    /// let b = AxisSpan::new(5, 15);
    /// assert_eq!(a.intersection(&b), Some(AxisSpan::new(5, 10)));
    /// ```
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let lo = self.lo.max_of(other.lo);
        let hi = self.hi.min_of(other.hi);
        if lo <= hi {
            Some(Self::new_unchecked(lo, hi))
        } else {
            None
        }
    }

    /// Calculates the set difference `self - other`.
    ///
    /// This removes the portion of `self` that is strictly interior to
    /// `other`. With closed bounds, the surviving fragments keep the shared
    /// end-points.
    ///
    /// # Returns
    ///
    /// A `SmallVec` containing:
    /// * 0 spans: if `other` fully covers `self`.
    /// * 1 span: if `other` clips one side of `self` or is disjoint.
    /// * 2 spans: if `other` is strictly contained within `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::span::AxisSpan;
    ///
    /// let a = AxisSpan::new(0, 10);
    /// let hole = AxisSpan::new(4, 6);
    ///
    /// let diff = a.difference(&hole);
    /// assert_eq!(diff.len(), 2);
    /// assert_eq!(diff[0], AxisSpan::new(0, 4));
    /// assert_eq!(diff[1], AxisSpan::new(6, 10));
    /// ```
    pub fn difference(&self, other: &Self) -> SmallVec<Self, 2> {
        if !self.overlaps(other) {
            return smallvec::smallvec![*self];
        }

        let mut result = SmallVec::new();
        if self.lo < other.lo {
            result.push(Self::new_unchecked(self.lo, other.lo));
        }
        if self.hi > other.hi {
            result.push(Self::new_unchecked(other.hi, self.hi));
        }
        result
    }

    /// Expands the span by `amount` at both end-points.
    ///
    /// A negative `amount` shrinks the span.
    ///
    /// # Panics
    ///
    /// Panics if shrinking collapses the span past a single point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::span::AxisSpan;
    ///
    /// let s = AxisSpan::new(5, 10);
    /// assert_eq!(s.dilate(2), AxisSpan::new(3, 12));
    /// ```
    #[inline]
    pub fn dilate(&self, amount: C) -> Self {
        Self::new(self.lo - amount, self.hi + amount)
    }

    /// Returns the gap between two strictly disjoint spans.
    ///
    /// Returns `None` if the spans overlap (including touching spans, whose
    /// gap would be empty).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::span::AxisSpan;
    ///
    /// let a = AxisSpan::new(0, 5);
    /// let b = AxisSpan::new(10, 15);
    /// assert_eq!(a.gap(&b), Some(AxisSpan::new(5, 10)));
    /// ```
    #[inline]
    pub fn gap(&self, other: &Self) -> Option<Self> {
        if self.hi < other.lo {
            Some(Self::new_unchecked(self.hi, other.lo))
        } else if other.hi < self.lo {
            Some(Self::new_unchecked(other.hi, self.lo))
        } else {
            None
        }
    }

    /// Returns the distance between two spans along their axis.
    ///
    /// Overlapping spans, touching spans included, are at distance zero.
    /// Disjoint spans are separated by the length of the gap between them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::span::AxisSpan;
    ///
    /// let a = AxisSpan::new(0, 5);
    /// assert_eq!(a.distance_to(&AxisSpan::new(3, 8)), 0);
    /// assert_eq!(a.distance_to(&AxisSpan::new(12, 20)), 7);
    /// ```
    #[inline]
    pub fn distance_to(&self, other: &Self) -> C {
        match self.gap(other) {
            Some(gap) => gap.length(),
            None => C::zero(),
        }
    }

    /// Returns a total ordering between two spans: by `lo`, then `hi`.
    ///
    /// This is the tie-break ordering the interval algebra uses along the
    /// primary axis.
    #[inline]
    pub fn cmp_span(&self, other: &Self) -> Ordering {
        self.lo
            .total_cmp(&other.lo)
            .then_with(|| self.hi.total_cmp(&other.hi))
    }
}

impl<C> BitAnd for AxisSpan<C>
where
    C: Coordinate,
{
    type Output = Option<Self>;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(&rhs)
    }
}

impl<C> std::fmt::Debug for AxisSpan<C>
where
    C: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisSpan")
            .field("lo", &self.lo)
            .field("hi", &self.hi)
            .finish()
    }
}

impl<C> std::fmt::Display for AxisSpan<C>
where
    C: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_valid() {
        let s = AxisSpan::new(10, 20);
        assert_eq!(s.lo(), 10);
        assert_eq!(s.hi(), 20);
        assert_eq!(s.length(), 10);
        assert!(!s.is_point());
    }

    #[test]
    fn test_construction_point() {
        let s = AxisSpan::new(10, 10);
        assert_eq!(s.length(), 0);
        assert!(s.is_point());
    }

    #[test]
    fn test_try_new() {
        assert!(AxisSpan::try_new(5, 10).is_ok());
        assert!(AxisSpan::try_new(5, 5).is_ok());

        let err = AxisSpan::try_new(10, 5).unwrap_err();
        assert_eq!(err, InvalidSpanError { lo: 10, hi: 5 });
        assert_eq!(
            format!("{}", err),
            "invalid span: lo (10) must be less than or equal to hi (5)"
        );
    }

    #[test]
    fn test_try_new_rejects_nan() {
        assert!(AxisSpan::try_new(f64::NAN, 1.0).is_err());
        assert!(AxisSpan::try_new(0.0, f64::NAN).is_err());
    }

    #[test]
    #[should_panic(expected = "called `AxisSpan::new`")]
    fn test_new_panic() {
        AxisSpan::new(10, 5);
    }

    #[test]
    fn test_overlaps() {
        let a = AxisSpan::new(0, 10);

        // Disjoint left
        assert!(!a.overlaps(&AxisSpan::new(-5, -1)));
        // Touching left (closed bounds: overlap)
        assert!(a.overlaps(&AxisSpan::new(-5, 0)));
        // Overlap left
        assert!(a.overlaps(&AxisSpan::new(-5, 5)));
        // Contained
        assert!(a.overlaps(&AxisSpan::new(2, 8)));
        // Identity
        assert!(a.overlaps(&a));
        // Touching right
        assert!(a.overlaps(&AxisSpan::new(10, 15)));
        // Disjoint right
        assert!(!a.overlaps(&AxisSpan::new(11, 15)));
    }

    #[test]
    fn test_contains() {
        let a = AxisSpan::new(0, 10);
        assert!(a.contains_point(0));
        assert!(a.contains_point(10)); // closed upper end
        assert!(!a.contains_point(11));

        assert!(a.contains_span(&AxisSpan::new(0, 10)));
        assert!(a.contains_span(&AxisSpan::new(2, 8)));
        assert!(!a.contains_span(&AxisSpan::new(-1, 5)));
        assert!(!a.contains_span(&AxisSpan::new(5, 11)));
    }

    #[test]
    fn test_span_hull() {
        let a = AxisSpan::new(0, 5);

        // Overlapping
        assert_eq!(a.span(&AxisSpan::new(3, 8)), AxisSpan::new(0, 8));
        // Disjoint: the hull covers the gap
        assert_eq!(a.span(&AxisSpan::new(12, 20)), AxisSpan::new(0, 20));
        // Contained
        assert_eq!(a.span(&AxisSpan::new(1, 2)), a);
    }

    #[test]
    fn test_intersection() {
        let a = AxisSpan::new(0, 10);

        assert_eq!(
            a.intersection(&AxisSpan::new(5, 15)),
            Some(AxisSpan::new(5, 10))
        );
        // Touching spans intersect in a point
        assert_eq!(
            a.intersection(&AxisSpan::new(10, 20)),
            Some(AxisSpan::new(10, 10))
        );
        assert_eq!(a.intersection(&AxisSpan::new(11, 20)), None);
        assert_eq!(a & AxisSpan::new(2, 4), Some(AxisSpan::new(2, 4)));
    }

    #[test]
    fn test_difference() {
        let base = AxisSpan::new(0, 10);

        // Disjoint: no effect
        let diff = base.difference(&AxisSpan::new(12, 15));
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0], base);

        // Full cover: empty result
        let diff = base.difference(&AxisSpan::new(-5, 15));
        assert!(diff.is_empty());

        // Clip right
        let diff = base.difference(&AxisSpan::new(8, 15));
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0], AxisSpan::new(0, 8));

        // Clip left
        let diff = base.difference(&AxisSpan::new(-5, 2));
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0], AxisSpan::new(2, 10));

        // Split (the "hole" case)
        let diff = base.difference(&AxisSpan::new(4, 6));
        assert_eq!(diff.len(), 2);
        assert_eq!(diff[0], AxisSpan::new(0, 4));
        assert_eq!(diff[1], AxisSpan::new(6, 10));
    }

    #[test]
    fn test_dilate() {
        let s = AxisSpan::new(5, 10);
        assert_eq!(s.dilate(3), AxisSpan::new(2, 13));
        assert_eq!(s.dilate(-2), AxisSpan::new(7, 8));
        assert_eq!(AxisSpan::new(0.25, 0.5).dilate(0.25), AxisSpan::new(0.0, 0.75));
    }

    #[test]
    #[should_panic(expected = "called `AxisSpan::new`")]
    fn test_dilate_collapse_panics() {
        AxisSpan::new(5, 10).dilate(-3);
    }

    #[test]
    fn test_gap() {
        let a = AxisSpan::new(0, 5);
        let b = AxisSpan::new(10, 15);

        assert_eq!(a.gap(&b), Some(AxisSpan::new(5, 10)));
        // Commutative
        assert_eq!(b.gap(&a), Some(AxisSpan::new(5, 10)));
        // Touching spans have no gap
        assert_eq!(a.gap(&AxisSpan::new(5, 10)), None);
        // Overlapping spans have no gap
        assert_eq!(a.gap(&AxisSpan::new(4, 6)), None);
    }

    #[test]
    fn test_distance_to() {
        let a = AxisSpan::new(0, 5);

        assert_eq!(a.distance_to(&AxisSpan::new(10, 15)), 5);
        // Commutative
        assert_eq!(AxisSpan::new(10, 15).distance_to(&a), 5);
        // Touching and overlapping spans are at distance zero
        assert_eq!(a.distance_to(&AxisSpan::new(5, 10)), 0);
        assert_eq!(a.distance_to(&AxisSpan::new(3, 8)), 0);
    }

    #[test]
    fn test_distance_to_float() {
        let a = AxisSpan::new(0.0_f64, 1.5);
        assert_eq!(a.distance_to(&AxisSpan::new(4.0, 6.0)), 2.5);
        assert_eq!(a.distance_to(&AxisSpan::new(1.0, 2.0)), 0.0);
    }

    #[test]
    fn test_cmp_span() {
        let a = AxisSpan::new(0, 10);
        assert_eq!(a.cmp_span(&AxisSpan::new(0, 10)), Ordering::Equal);
        assert_eq!(a.cmp_span(&AxisSpan::new(0, 11)), Ordering::Less);
        assert_eq!(a.cmp_span(&AxisSpan::new(1, 2)), Ordering::Less);
        assert_eq!(a.cmp_span(&AxisSpan::new(-1, 50)), Ordering::Greater);
    }

    #[test]
    fn test_display_debug() {
        let s = AxisSpan::new(10, 20);
        assert_eq!(format!("{}", s), "[10, 20]");
        assert_eq!(format!("{:?}", s), "AxisSpan { lo: 10, hi: 20 }");
    }
}
