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

//! # Predicate Combinators
//!
//! Small functional helpers for composing the caller-supplied binary
//! predicates consumed by `join`, `minus`, and `coalesce`. All combinators
//! are pure: they capture their sub-predicates by value and hold no state.
//!
//! `and_pred`/`or_pred` short-circuit left to right, and [`on_axis`] lifts
//! a predicate over a pair of 1-D spans into a predicate over a pair of
//! intervals by projecting both onto one axis, so the same span-level
//! predicate works for any axis.

use crate::axis::Axis;
use crate::bounds::Bounds;
use crate::interval::Interval;
use trellis_core::span::AxisSpan;

/// True iff both sub-predicates are true; short-circuits on the first
/// false.
///
/// # Examples
///
/// ```rust
/// # use trellis_algebra::predicates::{and_pred, true_pred, false_pred};
/// # use trellis_algebra::bounds::Bounds1D;
/// # use trellis_algebra::interval::Interval;
///
/// let a = Interval::new(Bounds1D::new(0, 1), ());
/// let mut p = and_pred(true_pred(), false_pred());
/// assert!(!p(&a, &a));
/// ```
pub fn and_pred<A, B, F, G>(mut f: F, mut g: G) -> impl FnMut(&A, &B) -> bool
where
    F: FnMut(&A, &B) -> bool,
    G: FnMut(&A, &B) -> bool,
{
    move |a, b| f(a, b) && g(a, b)
}

/// True iff at least one sub-predicate is true; short-circuits on the
/// first true.
pub fn or_pred<A, B, F, G>(mut f: F, mut g: G) -> impl FnMut(&A, &B) -> bool
where
    F: FnMut(&A, &B) -> bool,
    G: FnMut(&A, &B) -> bool,
{
    move |a, b| f(a, b) || g(a, b)
}

/// Negates a predicate.
pub fn not_pred<A, B, F>(mut f: F) -> impl FnMut(&A, &B) -> bool
where
    F: FnMut(&A, &B) -> bool,
{
    move |a, b| !f(a, b)
}

/// Always true.
pub fn true_pred<A, B>() -> impl FnMut(&A, &B) -> bool {
    |_, _| true
}

/// Always false.
pub fn false_pred<A, B>() -> impl FnMut(&A, &B) -> bool {
    |_, _| false
}

/// Lifts a span-pair predicate to an interval-pair predicate by projecting
/// both intervals' bounds onto `axis`.
///
/// # Examples
///
/// ```rust
/// # use trellis_algebra::axis::Axis;
/// # use trellis_algebra::bounds::Bounds3D;
/// # use trellis_algebra::interval::Interval;
/// # use trellis_algebra::predicates::on_axis;
///
/// let mut x_overlap = on_axis(Axis::X, |a, b| a.overlaps(b));
/// let p = Interval::new(Bounds3D::new(0, 10, 0, 5, 0, 1), ());
/// let q = Interval::new(Bounds3D::new(0, 10, 4, 9, 0, 1), ());
/// assert!(x_overlap(&p, &q));
/// ```
pub fn on_axis<B, P1, P2, F>(
    axis: Axis,
    mut span_pred: F,
) -> impl FnMut(&Interval<B, P1>, &Interval<B, P2>) -> bool
where
    B: Bounds,
    F: FnMut(&AxisSpan<B::Coord>, &AxisSpan<B::Coord>) -> bool,
{
    move |a, b| {
        span_pred(
            &a.bounds().project(axis),
            &b.bounds().project(axis),
        )
    }
}
