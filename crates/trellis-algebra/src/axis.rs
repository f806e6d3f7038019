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

//! # Axis Identifiers
//!
//! A zero-cost identifier for the axes of a bound. Axes are addressed by
//! position; `Axis::T` (position 0) is always the primary axis used for set
//! ordering and windowed pruning, with `Axis::X` and `Axis::Y` naming the
//! two spatial axes of the common three-dimensional bound.
//!
//! Keeping the identifier a plain index (rather than an enum tied to one
//! concrete bound type) lets new axis sets implement the `Bounds` trait
//! without touching any join or coalesce logic.

/// Identifies one axis of a bound by position.
///
/// # Examples
///
/// ```rust
/// # use trellis_algebra::axis::Axis;
///
/// assert_eq!(Axis::T.index(), 0);
/// assert_eq!(Axis::X.index(), 1);
/// assert_eq!(format!("{}", Axis::Y), "Axis(y)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Axis(usize);

impl Axis {
    /// The temporal axis. Always the primary axis.
    pub const T: Axis = Axis(0);
    /// The first spatial axis.
    pub const X: Axis = Axis(1);
    /// The second spatial axis.
    pub const Y: Axis = Axis(2);

    /// Creates an axis identifier from a raw position.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Axis(index)
    }

    /// Returns the raw position of this axis within a bound.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "Axis(t)"),
            1 => write!(f, "Axis(x)"),
            2 => write!(f, "Axis(y)"),
            n => write!(f, "Axis({})", n),
        }
    }
}

impl From<usize> for Axis {
    #[inline]
    fn from(index: usize) -> Self {
        Axis(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_axes() {
        assert_eq!(Axis::T, Axis::new(0));
        assert_eq!(Axis::X, Axis::new(1));
        assert_eq!(Axis::Y, Axis::new(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Axis::T), "Axis(t)");
        assert_eq!(format!("{}", Axis::new(5)), "Axis(5)");
    }
}
