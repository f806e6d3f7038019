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

//! # Multi-Axis Bounds
//!
//! The `Bounds` trait models an N-axis extent as "axis count + projection":
//! a bound is anything that can project each of its axes onto a closed
//! [`AxisSpan`] and rebuild itself with one axis replaced. Join, coalesce,
//! and the execution runtime only ever go through this interface, so new
//! axis sets can be added without touching any algebra logic.
//!
//! Two implementations are provided: `Bounds1D` (a purely temporal extent)
//! and `Bounds3D` (time plus two normalized spatial axes), matching the
//! common video-composition case of detector boxes over frame ranges.
//!
//! Axis 0 (`Axis::T`) is always the primary axis: it defines the default
//! ordering of interval sets (`cmp_bounds` compares axes lexicographically,
//! primary first) and is the axis the windowed sweep join prunes on.

use crate::axis::Axis;
use std::cmp::Ordering;
use trellis_core::coord::Coordinate;
use trellis_core::span::{AxisSpan, InvalidSpanError};

/// An N-axis extent addressable by [`Axis`].
///
/// Bounds are immutable value objects: `with_span` returns a new bound and
/// never aliases the original.
pub trait Bounds: Clone {
    /// The co-ordinate type shared by every axis.
    type Coord: Coordinate;

    /// The number of axes of this bound.
    const AXES: usize;

    /// Extracts the closed extent of one axis.
    ///
    /// # Panics
    ///
    /// Panics if `axis.index() >= Self::AXES`.
    fn project(&self, axis: Axis) -> AxisSpan<Self::Coord>;

    /// Returns a copy of this bound with the extent of one axis replaced.
    ///
    /// # Panics
    ///
    /// Panics if `axis.index() >= Self::AXES`.
    fn with_span(&self, axis: Axis, span: AxisSpan<Self::Coord>) -> Self;

    /// Extracts the primary-axis extent.
    #[inline]
    fn primary(&self) -> AxisSpan<Self::Coord> {
        self.project(Axis::T)
    }

    /// Returns the smallest bound containing both `self` and `other`
    /// (per-axis `min(lo)` / `max(hi)`).
    fn span(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for i in 0..Self::AXES {
            let axis = Axis::new(i);
            out = out.with_span(axis, self.project(axis).span(&other.project(axis)));
        }
        out
    }

    /// Returns the per-axis intersection of two bounds, or `None` if the
    /// bounds are disjoint on any axis.
    fn intersect(&self, other: &Self) -> Option<Self> {
        let mut out = self.clone();
        for i in 0..Self::AXES {
            let axis = Axis::new(i);
            out = out.with_span(axis, self.project(axis).intersection(&other.project(axis))?);
        }
        Some(out)
    }

    /// Returns `true` if the two bounds overlap on `axis`.
    #[inline]
    fn overlaps_on(&self, other: &Self, axis: Axis) -> bool {
        self.project(axis).overlaps(&other.project(axis))
    }

    /// Returns `true` if the two bounds have identical extents on `axis`.
    #[inline]
    fn equal_on(&self, other: &Self, axis: Axis) -> bool {
        self.project(axis) == other.project(axis)
    }

    /// Total lexicographic ordering over bounds: primary axis first, then
    /// the remaining axes in position order, each by `(lo, hi)`.
    ///
    /// This is the sort key that defines interval-set order.
    fn cmp_bounds(&self, other: &Self) -> Ordering {
        for i in 0..Self::AXES {
            let axis = Axis::new(i);
            let ord = self.project(axis).cmp_span(&other.project(axis));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// A one-dimensional (purely temporal) bound.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds1D<C>
where
    C: Coordinate,
{
    t: AxisSpan<C>,
}

impl<C> Bounds1D<C>
where
    C: Coordinate,
{
    /// Creates a new `Bounds1D`.
    ///
    /// # Panics
    ///
    /// Panics if `t1 > t2`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_algebra::bounds::Bounds1D;
    ///
    /// let b = Bounds1D::new(0, 10);
    /// assert_eq!(b.t().length(), 10);
    /// ```
    #[inline]
    pub fn new(t1: C, t2: C) -> Self {
        Self {
            t: AxisSpan::new(t1, t2),
        }
    }

    /// Creates a new `Bounds1D` if the extent is valid.
    #[inline]
    pub fn try_new(t1: C, t2: C) -> Result<Self, InvalidSpanError<C>> {
        Ok(Self {
            t: AxisSpan::try_new(t1, t2)?,
        })
    }

    /// Creates a `Bounds1D` from an existing span.
    #[inline]
    pub fn from_span(t: AxisSpan<C>) -> Self {
        Self { t }
    }

    /// Returns the temporal extent.
    #[inline]
    pub fn t(&self) -> AxisSpan<C> {
        self.t
    }
}

impl<C> Bounds for Bounds1D<C>
where
    C: Coordinate,
{
    type Coord = C;

    const AXES: usize = 1;

    #[inline]
    fn project(&self, axis: Axis) -> AxisSpan<C> {
        assert!(
            axis.index() < Self::AXES,
            "called `Bounds1D::project` with out-of-range {}",
            axis
        );
        self.t
    }

    #[inline]
    fn with_span(&self, axis: Axis, span: AxisSpan<C>) -> Self {
        assert!(
            axis.index() < Self::AXES,
            "called `Bounds1D::with_span` with out-of-range {}",
            axis
        );
        Self { t: span }
    }
}

impl<C> std::fmt::Display for Bounds1D<C>
where
    C: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t:{}", self.t)
    }
}

/// A three-dimensional bound: time plus two spatial axes.
///
/// The spatial axes commonly hold normalized screen co-ordinates in
/// `[0, 1]`; [`Bounds3D::temporal`] builds a bound covering the full
/// spatial extent so purely temporal data can live alongside boxes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds3D<C>
where
    C: Coordinate,
{
    t: AxisSpan<C>,
    x: AxisSpan<C>,
    y: AxisSpan<C>,
}

impl<C> Bounds3D<C>
where
    C: Coordinate,
{
    /// Creates a new `Bounds3D` from six co-ordinates.
    ///
    /// # Panics
    ///
    /// Panics if any axis has `lo > hi`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_algebra::bounds::Bounds3D;
    ///
    /// let b = Bounds3D::new(0.0, 10.0, 0.1, 0.4, 0.2, 0.8);
    /// assert_eq!(b.x().lo(), 0.1);
    /// assert_eq!(b.y().hi(), 0.8);
    /// ```
    #[inline]
    pub fn new(t1: C, t2: C, x1: C, x2: C, y1: C, y2: C) -> Self {
        Self {
            t: AxisSpan::new(t1, t2),
            x: AxisSpan::new(x1, x2),
            y: AxisSpan::new(y1, y2),
        }
    }

    /// Creates a new `Bounds3D` if every axis extent is valid.
    ///
    /// The first invalid axis, in `(t, x, y)` order, produces the error.
    #[inline]
    pub fn try_new(t1: C, t2: C, x1: C, x2: C, y1: C, y2: C) -> Result<Self, InvalidSpanError<C>> {
        Ok(Self {
            t: AxisSpan::try_new(t1, t2)?,
            x: AxisSpan::try_new(x1, x2)?,
            y: AxisSpan::try_new(y1, y2)?,
        })
    }

    /// Creates a purely temporal `Bounds3D` covering the full unit spatial
    /// extent `[0, 1]` on both spatial axes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_algebra::bounds::Bounds3D;
    ///
    /// let b = Bounds3D::temporal(0.0, 10.0);
    /// assert_eq!(b.x().lo(), 0.0);
    /// assert_eq!(b.x().hi(), 1.0);
    /// ```
    #[inline]
    pub fn temporal(t1: C, t2: C) -> Self {
        let unit = AxisSpan::new_unchecked(C::zero(), C::one());
        Self {
            t: AxisSpan::new(t1, t2),
            x: unit,
            y: unit,
        }
    }

    /// Creates a `Bounds3D` from existing spans.
    #[inline]
    pub fn from_spans(t: AxisSpan<C>, x: AxisSpan<C>, y: AxisSpan<C>) -> Self {
        Self { t, x, y }
    }

    /// Returns the temporal extent.
    #[inline]
    pub fn t(&self) -> AxisSpan<C> {
        self.t
    }

    /// Returns the X extent.
    #[inline]
    pub fn x(&self) -> AxisSpan<C> {
        self.x
    }

    /// Returns the Y extent.
    #[inline]
    pub fn y(&self) -> AxisSpan<C> {
        self.y
    }
}

impl<C> Bounds for Bounds3D<C>
where
    C: Coordinate,
{
    type Coord = C;

    const AXES: usize = 3;

    #[inline]
    fn project(&self, axis: Axis) -> AxisSpan<C> {
        match axis.index() {
            0 => self.t,
            1 => self.x,
            2 => self.y,
            _ => panic!("called `Bounds3D::project` with out-of-range {}", axis),
        }
    }

    #[inline]
    fn with_span(&self, axis: Axis, span: AxisSpan<C>) -> Self {
        let mut out = *self;
        match axis.index() {
            0 => out.t = span,
            1 => out.x = span,
            2 => out.y = span,
            _ => panic!("called `Bounds3D::with_span` with out-of-range {}", axis),
        }
        out
    }
}

impl<C> std::fmt::Display for Bounds3D<C>
where
    C: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t:{} x:{} y:{}", self.t, self.x, self.y)
    }
}
