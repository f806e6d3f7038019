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

//! # Trellis Core
//!
//! Numeric foundations and 1-D extent primitives for the Trellis interval
//! algebra. This crate consolidates the building blocks the higher-level
//! algebra and runtime crates share.
//!
//! ## Modules
//!
//! - `coord`: The `Coordinate` trait — arithmetic, casts, and a total
//!   ordering over integer and float co-ordinate types, with
//!   macro-generated impls.
//! - `span`: The closed extent `[lo, hi]` primitive (`AxisSpan`) with
//!   validation, geometric queries (overlap, containment, gap), and
//!   set-style operations (hull, intersection, difference, dilation).
//!
//! ## Purpose
//!
//! Every axis of a multi-dimensional bound projects onto an `AxisSpan`, so
//! predicates written against spans work for any axis, and the sweep-join
//! and coalesce algorithms in the algebra crate only ever reason about
//! spans along the primary axis.

pub mod coord;
pub mod span;
