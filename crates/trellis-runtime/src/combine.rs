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

//! # Chunk Output Combining
//!
//! Because chunk slices overlap by the margin, an interval produced near a
//! boundary can be emitted by two neighboring chunks. The combiner
//! concatenates the per-chunk outputs in partition order, stably sorts by
//! bounds, and then drops every interval for which an identical-bounds,
//! payload-equal interval from a *different* chunk was already kept.
//! Repeats produced inside a single chunk are legitimate (duplicate
//! geometries are legal set content) and are never touched.
//!
//! The result is the set a fully sequential, unchunked execution would
//! have produced, regardless of worker completion order.

use fixedbitset::FixedBitSet;
use std::cmp::Ordering;
use trellis_algebra::bounds::Bounds;
use trellis_algebra::interval::Interval;
use trellis_algebra::set::IntervalSet;

/// Stitches per-chunk outputs (in partition order) into one set.
///
/// `payload_eq` decides whether two intervals with identical bounds are
/// the same logical result. Returns the combined set and the number of
/// boundary duplicates dropped.
pub fn stitch<B, Q, E>(
    chunks: Vec<IntervalSet<B, Q>>,
    mut payload_eq: E,
) -> (IntervalSet<B, Q>, usize)
where
    B: Bounds,
    E: FnMut(&Q, &Q) -> bool,
{
    let mut tagged: Vec<(Interval<B, Q>, usize)> = Vec::new();
    for (chunk_idx, chunk) in chunks.into_iter().enumerate() {
        for iv in chunk.into_intervals() {
            tagged.push((iv, chunk_idx));
        }
    }
    // Stable sort keeps partition order within runs of equal bounds.
    tagged.sort_by(|a, b| a.0.cmp_by_bounds(&b.0));

    let mut dropped = FixedBitSet::with_capacity(tagged.len());
    let mut drop_count = 0;
    let mut i = 0;
    while i < tagged.len() {
        let mut j = i + 1;
        while j < tagged.len() && tagged[i].0.cmp_by_bounds(&tagged[j].0) == Ordering::Equal {
            j += 1;
        }
        for k in (i + 1)..j {
            for l in i..k {
                if !dropped.contains(l)
                    && tagged[l].1 != tagged[k].1
                    && payload_eq(tagged[l].0.payload(), tagged[k].0.payload())
                {
                    dropped.insert(k);
                    drop_count += 1;
                    break;
                }
            }
        }
        i = j;
    }

    let kept: Vec<Interval<B, Q>> = tagged
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| !dropped.contains(*idx))
        .map(|(_, (iv, _))| iv)
        .collect();
    (IntervalSet::new(kept), drop_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_algebra::bounds::Bounds1D;

    fn chunk(items: &[(i64, i64, &'static str)]) -> IntervalSet<Bounds1D<i64>, &'static str> {
        IntervalSet::new(
            items
                .iter()
                .map(|&(lo, hi, p)| Interval::new(Bounds1D::new(lo, hi), p))
                .collect(),
        )
    }

    #[test]
    fn test_cross_chunk_duplicate_is_dropped() {
        let (out, dropped) = stitch(
            vec![
                chunk(&[(0, 5, "a"), (9, 11, "a")]),
                chunk(&[(9, 11, "a"), (12, 15, "b")]),
            ],
            |x, y| x == y,
        );
        assert_eq!(dropped, 1);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_same_chunk_duplicates_survive() {
        let (out, dropped) = stitch(
            vec![chunk(&[(0, 5, "a"), (0, 5, "a")])],
            |x, y| x == y,
        );
        assert_eq!(dropped, 0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_payload_inequality_keeps_both() {
        let (out, dropped) = stitch(
            vec![chunk(&[(0, 5, "a")]), chunk(&[(0, 5, "b")])],
            |x, y| x == y,
        );
        assert_eq!(dropped, 0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_triple_emission_keeps_one() {
        let (out, dropped) = stitch(
            vec![
                chunk(&[(9, 11, "a")]),
                chunk(&[(9, 11, "a")]),
                chunk(&[(9, 11, "a")]),
            ],
            |x, y| x == y,
        );
        assert_eq!(dropped, 2);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_output_is_sorted() {
        let (out, _) = stitch(
            vec![chunk(&[(20, 30, "late")]), chunk(&[(0, 10, "early")])],
            |x, y| x == y,
        );
        assert_eq!(*out.intervals()[0].payload(), "early");
        assert_eq!(*out.intervals()[1].payload(), "late");
    }
}
