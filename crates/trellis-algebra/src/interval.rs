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

//! # Payload-Carrying Interval
//!
//! An [`Interval`] pairs a multi-axis bound with an arbitrary payload.
//! The algebra never interprets the payload: all set operations thread it
//! through untouched (or through a caller-supplied merge function), so
//! detection metadata, scores, or nested interval sets can ride along.

use crate::bounds::Bounds;
use std::cmp::Ordering;

/// A bound together with its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval<B, P>
where
    B: Bounds,
{
    bounds: B,
    payload: P,
}

impl<B, P> Interval<B, P>
where
    B: Bounds,
{
    /// Creates a new interval.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_algebra::bounds::Bounds1D;
    /// # use trellis_algebra::interval::Interval;
    ///
    /// let iv = Interval::new(Bounds1D::new(0, 10), "walk");
    /// assert_eq!(*iv.payload(), "walk");
    /// ```
    #[inline]
    pub fn new(bounds: B, payload: P) -> Self {
        Self { bounds, payload }
    }

    /// Returns the bound of this interval.
    #[inline]
    pub fn bounds(&self) -> &B {
        &self.bounds
    }

    /// Returns the payload of this interval.
    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the interval and returns its parts.
    #[inline]
    pub fn into_parts(self) -> (B, P) {
        (self.bounds, self.payload)
    }

    /// Returns a copy of this interval with the payload replaced.
    #[inline]
    pub fn with_payload<Q>(&self, payload: Q) -> Interval<B, Q> {
        Interval {
            bounds: self.bounds.clone(),
            payload,
        }
    }

    /// Returns the length of this interval along `axis`.
    #[inline]
    pub fn size_on(&self, axis: crate::axis::Axis) -> B::Coord {
        self.bounds.project(axis).length()
    }

    /// Merges two intervals into one: the bound is the per-axis hull, the
    /// payload is produced by `merge`.
    #[inline]
    pub fn combine<F>(&self, other: &Self, merge: F) -> Self
    where
        F: FnOnce(&P, &P) -> P,
    {
        Self {
            bounds: self.bounds.span(&other.bounds),
            payload: merge(&self.payload, &other.payload),
        }
    }

    /// Merges two intervals into their per-axis hull, keeping this
    /// interval's payload.
    ///
    /// The other interval's payload type is unconstrained; only its bounds
    /// contribute.
    #[inline]
    pub fn span_with<Q>(&self, other: &Interval<B, Q>) -> Self
    where
        P: Clone,
    {
        Interval {
            bounds: self.bounds.span(other.bounds()),
            payload: self.payload.clone(),
        }
    }

    /// Orders two intervals by their bounds (payloads never participate).
    #[inline]
    pub fn cmp_by_bounds(&self, other: &Self) -> Ordering {
        self.bounds.cmp_bounds(&other.bounds)
    }
}

impl<B, P> std::fmt::Display for Interval<B, P>
where
    B: Bounds + std::fmt::Display,
    P: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} | {}>", self.bounds, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::bounds::{Bounds1D, Bounds3D};
    use trellis_core::span::AxisSpan;

    #[test]
    fn test_accessors() {
        let iv = Interval::new(Bounds3D::new(0, 10, 0, 1, 0, 1), 42);
        assert_eq!(iv.bounds().t(), AxisSpan::new(0, 10));
        assert_eq!(*iv.payload(), 42);
        let (b, p) = iv.into_parts();
        assert_eq!(b.t(), AxisSpan::new(0, 10));
        assert_eq!(p, 42);
    }

    #[test]
    fn test_with_payload_changes_type() {
        let iv = Interval::new(Bounds1D::new(0, 10), 42);
        let renamed = iv.with_payload("fortytwo");
        assert_eq!(renamed.bounds(), iv.bounds());
        assert_eq!(*renamed.payload(), "fortytwo");
    }

    #[test]
    fn test_size_on() {
        let iv = Interval::new(Bounds3D::new(0, 10, 2, 5, 0, 1), ());
        assert_eq!(iv.size_on(Axis::T), 10);
        assert_eq!(iv.size_on(Axis::X), 3);
        assert_eq!(iv.size_on(Axis::Y), 1);
    }

    #[test]
    fn test_combine_spans_bounds_and_merges_payload() {
        let a = Interval::new(Bounds1D::new(0, 5), 3);
        let b = Interval::new(Bounds1D::new(4, 10), 4);
        let merged = a.combine(&b, |x, y| x + y);
        assert_eq!(merged.bounds().t(), AxisSpan::new(0, 10));
        assert_eq!(*merged.payload(), 7);
    }

    #[test]
    fn test_span_with_keeps_own_payload() {
        let a = Interval::new(Bounds1D::new(0, 5), "walk");
        let b = Interval::new(Bounds1D::new(8, 12), 99);
        let hull = a.span_with(&b);
        assert_eq!(hull.bounds().t(), AxisSpan::new(0, 12));
        assert_eq!(*hull.payload(), "walk");
    }

    #[test]
    fn test_cmp_ignores_payload() {
        let a = Interval::new(Bounds1D::new(0, 5), 100);
        let b = Interval::new(Bounds1D::new(0, 5), -100);
        assert_eq!(a.cmp_by_bounds(&b), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        let iv = Interval::new(Bounds1D::new(0, 10), "walk");
        assert_eq!(format!("{}", iv), "<t:[0, 10] | walk>");
    }
}
