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

//! # Primary-Axis Chunking
//!
//! The runtime partitions the input's primary-axis extent into contiguous
//! `chunk_size` windows and extends each window by the overlap margin on
//! both ends (clamped to the overall extent). A chunk's slice contains
//! every interval whose primary span intersects the extended window, so an
//! interval straddling a boundary appears in both neighboring slices; the
//! combiner's boundary de-duplication pass removes the resulting repeats.

use trellis_algebra::bounds::Bounds;
use trellis_algebra::set::IntervalSet;
use trellis_core::coord::Coordinate;
use trellis_core::span::AxisSpan;

/// Lifecycle of a chunk inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    /// Not yet claimed by a worker.
    Pending,
    /// Claimed and executing.
    Running,
    /// Batch invocation returned `Ok`.
    Completed,
    /// Batch invocation returned `Err`; the run aborts.
    Failed,
}

impl std::fmt::Display for ChunkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkState::Pending => write!(f, "Pending"),
            ChunkState::Running => write!(f, "Running"),
            ChunkState::Completed => write!(f, "Completed"),
            ChunkState::Failed => write!(f, "Failed"),
        }
    }
}

/// One partition of the primary-axis extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunk<C>
where
    C: Coordinate,
{
    index: usize,
    window: AxisSpan<C>,
    extended: AxisSpan<C>,
}

impl<C> Chunk<C>
where
    C: Coordinate,
{
    /// Returns the position of this chunk in the partition.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the bare partition window, without the margin.
    #[inline]
    pub fn window(&self) -> AxisSpan<C> {
        self.window
    }

    /// Returns the window extended by the overlap margin on both ends.
    #[inline]
    pub fn extended(&self) -> AxisSpan<C> {
        self.extended
    }
}

impl<C> std::fmt::Display for Chunk<C>
where
    C: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk(index: {}, window: {}, extended: {})",
            self.index, self.window, self.extended
        )
    }
}

/// Partitions `extent` into contiguous `chunk_size` windows, each extended
/// by `margin` on both ends and clamped to `extent`.
///
/// Consecutive bare windows share their boundary point (spans are closed);
/// any resulting double-processing is resolved by the combiner. A point
/// extent yields a single chunk.
pub fn partition<C>(extent: AxisSpan<C>, chunk_size: C, margin: C) -> Vec<Chunk<C>>
where
    C: Coordinate,
{
    let mut chunks = Vec::new();
    let mut start = extent.lo();
    let mut index = 0;
    loop {
        let end = {
            let e = start + chunk_size;
            if e > extent.hi() { extent.hi() } else { e }
        };
        // `start - margin` could underflow for unsigned co-ordinates, so
        // the clamp is decided by comparison first.
        let ext_lo = if start <= extent.lo() + margin {
            extent.lo()
        } else {
            start - margin
        };
        let ext_hi = {
            let h = end + margin;
            if h > extent.hi() { extent.hi() } else { h }
        };
        chunks.push(Chunk {
            index,
            window: AxisSpan::new_unchecked(start, end),
            extended: AxisSpan::new_unchecked(ext_lo, ext_hi),
        });
        if end >= extent.hi() {
            break;
        }
        start = end;
        index += 1;
    }
    chunks
}

/// Returns the primary-axis extent of a set: the smallest span covering
/// every interval's primary span. `None` for an empty set.
pub fn primary_extent<B, P>(set: &IntervalSet<B, P>) -> Option<AxisSpan<B::Coord>>
where
    B: Bounds,
{
    let mut iter = set.iter();
    let first = iter.next()?.bounds().primary();
    Some(iter.fold(first, |acc, iv| acc.span(&iv.bounds().primary())))
}

/// Selects the intervals whose primary span intersects `extended`.
pub fn slice<B, P>(set: &IntervalSet<B, P>, extended: AxisSpan<B::Coord>) -> IntervalSet<B, P>
where
    B: Bounds,
    P: Clone,
{
    set.filter(|iv| iv.bounds().primary().overlaps(&extended))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_algebra::bounds::Bounds1D;
    use trellis_algebra::interval::Interval;

    #[test]
    fn test_partition_exact_multiple() {
        let chunks = partition(AxisSpan::new(0, 100), 10, 0);
        assert_eq!(chunks.len(), 10);
        assert_eq!(chunks[0].window(), AxisSpan::new(0, 10));
        assert_eq!(chunks[9].window(), AxisSpan::new(90, 100));
        assert_eq!(chunks[4].index(), 4);
    }

    #[test]
    fn test_partition_ragged_tail() {
        let chunks = partition(AxisSpan::new(0, 25), 10, 0);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].window(), AxisSpan::new(20, 25));
    }

    #[test]
    fn test_partition_margin_clamped_to_extent() {
        let chunks = partition(AxisSpan::new(0, 30), 10, 3);
        assert_eq!(chunks[0].extended(), AxisSpan::new(0, 13));
        assert_eq!(chunks[1].extended(), AxisSpan::new(7, 23));
        assert_eq!(chunks[2].extended(), AxisSpan::new(17, 30));
    }

    #[test]
    fn test_partition_unsigned_coordinates() {
        // Margin larger than the first window start must not underflow.
        let chunks = partition(AxisSpan::new(0u32, 20), 10, 5);
        assert_eq!(chunks[0].extended(), AxisSpan::new(0, 15));
        assert_eq!(chunks[1].extended(), AxisSpan::new(5, 20));
    }

    #[test]
    fn test_partition_point_extent() {
        let chunks = partition(AxisSpan::point(7), 10, 2);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].window(), AxisSpan::point(7));
        assert_eq!(chunks[0].extended(), AxisSpan::point(7));
    }

    #[test]
    fn test_primary_extent() {
        let set: IntervalSet<Bounds1D<i64>, ()> = IntervalSet::new(vec![
            Interval::new(Bounds1D::new(5, 30), ()),
            Interval::new(Bounds1D::new(0, 3), ()),
            Interval::new(Bounds1D::new(10, 12), ()),
        ]);
        assert_eq!(primary_extent(&set), Some(AxisSpan::new(0, 30)));

        let empty: IntervalSet<Bounds1D<i64>, ()> = IntervalSet::empty();
        assert_eq!(primary_extent(&empty), None);
    }

    #[test]
    fn test_slice_keeps_straddlers() {
        let set: IntervalSet<Bounds1D<i64>, usize> = IntervalSet::new(vec![
            Interval::new(Bounds1D::new(0, 5), 0),
            Interval::new(Bounds1D::new(8, 12), 1),
            Interval::new(Bounds1D::new(14, 20), 2),
        ]);
        let sliced = slice(&set, AxisSpan::new(0, 10));
        assert_eq!(sliced.len(), 2);
        assert_eq!(*sliced.intervals()[1].payload(), 1);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(format!("{}", ChunkState::Pending), "Pending");
        assert_eq!(format!("{}", ChunkState::Failed), "Failed");
    }
}
