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

//! # Coordinate Trait
//!
//! Unified numeric bounds for axis co-ordinates. `Coordinate` collects the
//! capabilities the interval algebra needs from a co-ordinate type into a
//! single trait: arithmetic (`Num`), casts to/from machine integers
//! (`NumCast`), and a *total* ordering that is well-defined even for float
//! types.
//!
//! ## Motivation
//!
//! Temporal axes are often integer frame numbers while spatial axes are
//! normalized floats; both must sort deterministically because every set
//! operation in the algebra relies on primary-axis order. Rust's float types
//! only implement `PartialOrd`, so the trait requires an explicit
//! `total_cmp` and provides macro-generated impls: integers go through
//! `Ord::cmp`, floats through the IEEE-754 `totalOrder` predicate.
//!
//! `Send + Sync + 'static` are included so co-ordinates can cross worker
//! thread boundaries in the chunked execution runtime.

use num_traits::{Num, NumCast};
use std::cmp::Ordering;
use std::fmt::{Debug, Display};

/// A numeric type usable as an axis co-ordinate.
///
/// All six co-ordinates of a three-dimensional bound share one `Coordinate`
/// type. The trait deliberately does not require `Ord`: float co-ordinates
/// are admitted and ordered through [`Coordinate::total_cmp`].
pub trait Coordinate:
    Num + NumCast + Copy + PartialOrd + Send + Sync + Debug + Display + 'static
{
    /// Returns a total ordering between `self` and `other`.
    ///
    /// For integer types this is `Ord::cmp`; for floats it is the IEEE-754
    /// `totalOrder` predicate, so NaN values order deterministically instead
    /// of poisoning a sort.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Returns the smaller of two co-ordinates under [`Coordinate::total_cmp`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::coord::Coordinate;
    ///
    /// assert_eq!(3i64.min_of(7), 3);
    /// assert_eq!(0.5f64.min_of(0.25), 0.25);
    /// ```
    #[inline]
    fn min_of(self, other: Self) -> Self {
        if other.total_cmp(&self) == Ordering::Less {
            other
        } else {
            self
        }
    }

    /// Returns the larger of two co-ordinates under [`Coordinate::total_cmp`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_core::coord::Coordinate;
    ///
    /// assert_eq!(3i64.max_of(7), 7);
    /// assert_eq!(0.5f64.max_of(0.25), 0.5);
    /// ```
    #[inline]
    fn max_of(self, other: Self) -> Self {
        if other.total_cmp(&self) == Ordering::Greater {
            other
        } else {
            self
        }
    }
}

macro_rules! impl_coordinate_for_int {
    ($t:ty) => {
        impl Coordinate for $t {
            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }
        }
    };
}

macro_rules! impl_coordinate_for_float {
    ($t:ty) => {
        impl Coordinate for $t {
            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                <$t>::total_cmp(self, other)
            }
        }
    };
}

impl_coordinate_for_int!(i8);
impl_coordinate_for_int!(i16);
impl_coordinate_for_int!(i32);
impl_coordinate_for_int!(i64);
impl_coordinate_for_int!(isize);
impl_coordinate_for_int!(u8);
impl_coordinate_for_int!(u16);
impl_coordinate_for_int!(u32);
impl_coordinate_for_int!(u64);
impl_coordinate_for_int!(usize);

impl_coordinate_for_float!(f32);
impl_coordinate_for_float!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_total_cmp() {
        assert_eq!(1i64.total_cmp(&2), Ordering::Less);
        assert_eq!(2i64.total_cmp(&2), Ordering::Equal);
        assert_eq!(3i64.total_cmp(&2), Ordering::Greater);
    }

    #[test]
    fn test_float_total_cmp() {
        assert_eq!(1.0f64.total_cmp(&2.0), Ordering::Less);
        assert_eq!(2.0f64.total_cmp(&2.0), Ordering::Equal);
        assert_eq!(3.0f64.total_cmp(&2.0), Ordering::Greater);
    }

    #[test]
    fn test_float_total_cmp_is_total() {
        // NaN sorts after +inf in IEEE-754 totalOrder; the exact position
        // does not matter, only that the ordering is stable and transitive.
        assert_eq!(f64::NAN.total_cmp(&f64::NAN), Ordering::Equal);
        assert_eq!(f64::INFINITY.total_cmp(&f64::NAN), Ordering::Less);
    }

    #[test]
    fn test_min_max_of() {
        assert_eq!(5u32.min_of(9), 5);
        assert_eq!(5u32.max_of(9), 9);
        assert_eq!((-1.5f32).min_of(1.5), -1.5);
        assert_eq!((-1.5f32).max_of(1.5), 1.5);
    }
}
