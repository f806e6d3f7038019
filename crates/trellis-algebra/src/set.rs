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

//! # Ordered Interval Set
//!
//! An [`IntervalSet`] is a sequence of intervals kept sorted by their
//! bounds (primary axis first, lexicographically across the remaining
//! axes, via [`Bounds::cmp_bounds`]). Every operation returns a new,
//! sorted set; none mutates its inputs. Duplicate geometries are legal.
//!
//! The binary operations (`join`, `minus`, `filter_against`,
//! `collect_by_interval`, `subtract_along`) all share the same windowed
//! sweep: both operands are sorted on the primary axis, so for each
//! interval of `self` the admissible candidates in `other` form a
//! contiguous run `[lo - window, hi + window]` that a pair of monotone
//! cursors can track in O((n + m) * k) instead of O(n * m). Exactness is
//! the caller's contract: if `window` is smaller than the true
//! primary-axis distance at which the predicate can hold, those pairs are
//! silently missed. `window = 0` restricts matching to primary-axis
//! overlaps only.

use crate::axis::Axis;
use crate::bounds::Bounds;
use crate::interval::Interval;
use rustc_hash::FxHashMap;
use std::hash::Hash;
use trellis_core::coord::Coordinate;
use trellis_core::span::AxisSpan;

/// An ordered collection of intervals over a shared bound type.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalSet<B, P>
where
    B: Bounds,
{
    intervals: Vec<Interval<B, P>>,
}

impl<B, P> IntervalSet<B, P>
where
    B: Bounds,
{
    /// Creates a new interval set from an arbitrary sequence of intervals.
    ///
    /// The input is sorted (stably) by bounds; relative order of intervals
    /// with identical bounds is preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_algebra::bounds::Bounds1D;
    /// # use trellis_algebra::interval::Interval;
    /// # use trellis_algebra::set::IntervalSet;
    ///
    /// let set = IntervalSet::new(vec![
    ///     Interval::new(Bounds1D::new(20, 30), "b"),
    ///     Interval::new(Bounds1D::new(0, 10), "a"),
    /// ]);
    /// assert_eq!(*set.intervals()[0].payload(), "a");
    /// ```
    #[inline]
    pub fn new(mut intervals: Vec<Interval<B, P>>) -> Self {
        intervals.sort_by(|a, b| a.cmp_by_bounds(b));
        Self { intervals }
    }

    /// Creates an empty interval set.
    #[inline]
    pub fn empty() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Returns the number of intervals in this set.
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if this set contains no intervals.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns the intervals of this set, in sorted order.
    #[inline]
    pub fn intervals(&self) -> &[Interval<B, P>] {
        &self.intervals
    }

    /// Returns an iterator over the intervals in sorted order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Interval<B, P>> {
        self.intervals.iter()
    }

    /// Consumes the set and returns its intervals, in sorted order.
    #[inline]
    pub fn into_intervals(self) -> Vec<Interval<B, P>> {
        self.intervals
    }

    // ------------------------------------------------------------------
    // Unary operations
    // ------------------------------------------------------------------

    /// Applies `f` to every interval and collects the results into a new
    /// set. `f` may change both bounds and payload type; the result is
    /// re-sorted. Panics raised by `f` propagate.
    pub fn map<Q, F>(&self, mut f: F) -> IntervalSet<B, Q>
    where
        F: FnMut(&Interval<B, P>) -> Interval<B, Q>,
    {
        IntervalSet::new(self.intervals.iter().map(|iv| f(iv)).collect())
    }

    /// Applies `f` to every payload, keeping bounds untouched. Because
    /// bounds do not change, the existing order is preserved without a
    /// re-sort.
    pub fn map_payload<Q, F>(&self, mut f: F) -> IntervalSet<B, Q>
    where
        F: FnMut(&P) -> Q,
    {
        IntervalSet {
            intervals: self
                .intervals
                .iter()
                .map(|iv| iv.with_payload(f(iv.payload())))
                .collect(),
        }
    }

    /// Keeps the intervals for which `predicate` is true; order preserved.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Interval<B, P>) -> bool,
        P: Clone,
    {
        Self {
            intervals: self
                .intervals
                .iter()
                .filter(|iv| predicate(iv))
                .cloned()
                .collect(),
        }
    }

    /// Left-to-right reduction over the set in sorted order.
    pub fn fold<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, &Interval<B, P>) -> A,
    {
        self.intervals.iter().fold(init, |acc, iv| f(acc, iv))
    }

    /// Partitions the set by `key_fn` and emits one interval per group via
    /// `merge_fn`.
    ///
    /// Groups are emitted in order of the first occurrence of each key in
    /// the sorted set, so the output is deterministic regardless of hash
    /// state; the result is then re-sorted like any other construction.
    pub fn group_by<K, Q, F, G>(&self, mut key_fn: F, mut merge_fn: G) -> IntervalSet<B, Q>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&Interval<B, P>) -> K,
        G: FnMut(&K, &[Interval<B, P>]) -> Interval<B, Q>,
        P: Clone,
    {
        let mut index: FxHashMap<K, usize> = FxHashMap::default();
        let mut groups: Vec<(K, Vec<Interval<B, P>>)> = Vec::new();
        for iv in &self.intervals {
            let key = key_fn(iv);
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(iv.clone());
        }
        IntervalSet::new(
            groups
                .iter()
                .map(|(key, members)| merge_fn(key, members))
                .collect(),
        )
    }

    /// Merges intervals that are within `epsilon` of each other on `axis`
    /// and satisfy `predicate`, repeatedly, until no merge applies.
    ///
    /// The implementation sorts by `axis` once and keeps a small list of
    /// open merge targets, retiring a target as soon as the scan has moved
    /// more than `epsilon` past its end. Each candidate is merged into the
    /// first open target the predicate accepts, or becomes a new target.
    /// This is O(n log n) when `predicate` is monotonic in axis distance;
    /// if far-apart intervals can still satisfy it, correctness holds but
    /// the open-target list grows and efficiency degrades.
    pub fn coalesce<F, G>(
        &self,
        axis: Axis,
        epsilon: B::Coord,
        mut predicate: F,
        mut merge_op: G,
    ) -> Self
    where
        F: FnMut(&Interval<B, P>, &Interval<B, P>) -> bool,
        G: FnMut(&Interval<B, P>, &Interval<B, P>) -> Interval<B, P>,
        P: Clone,
    {
        let mut order: Vec<&Interval<B, P>> = self.intervals.iter().collect();
        order.sort_by(|a, b| {
            a.bounds()
                .project(axis)
                .cmp_span(&b.bounds().project(axis))
        });

        let mut active: Vec<Interval<B, P>> = Vec::new();
        let mut done: Vec<Interval<B, P>> = Vec::new();
        for cand in order {
            let cand_lo = cand.bounds().project(axis).lo();
            let mut i = 0;
            while i < active.len() {
                if active[i].bounds().project(axis).hi() + epsilon < cand_lo {
                    done.push(active.swap_remove(i));
                } else {
                    i += 1;
                }
            }
            match active.iter().position(|open| predicate(open, cand)) {
                Some(i) => active[i] = merge_op(&active[i], cand),
                None => active.push(cand.clone()),
            }
        }
        done.extend(active);
        Self::new(done)
    }

    /// Expands every interval into a whole set via `f` and flattens the
    /// results into one set.
    pub fn split<Q, F>(&self, mut f: F) -> IntervalSet<B, Q>
    where
        F: FnMut(&Interval<B, P>) -> IntervalSet<B, Q>,
    {
        IntervalSet::new(
            self.intervals
                .iter()
                .flat_map(|iv| f(iv).into_intervals())
                .collect(),
        )
    }

    /// Grows (or, for negative `amount`, shrinks) every interval by
    /// `amount` on each side of `axis`.
    ///
    /// # Panics
    ///
    /// Panics if shrinking collapses any interval past a point (see
    /// [`AxisSpan::dilate`]).
    pub fn dilate(&self, axis: Axis, amount: B::Coord) -> Self
    where
        P: Clone,
    {
        self.map(|iv| {
            let dilated = iv.bounds().project(axis).dilate(amount);
            Interval::new(iv.bounds().with_span(axis, dilated), iv.payload().clone())
        })
    }

    /// Keeps the intervals whose length on `axis` is at least `min` and,
    /// when `max` is given, at most `max`.
    pub fn filter_size(&self, axis: Axis, min: B::Coord, max: Option<B::Coord>) -> Self
    where
        P: Clone,
    {
        self.filter(|iv| {
            let len = iv.size_on(axis);
            len >= min && max.map_or(true, |m| len <= m)
        })
    }

    /// Groups intervals by their exact projection onto `axis`, producing
    /// one interval per distinct projection whose payload is the nested
    /// set of members and whose bounds are built by `make_bounds` from the
    /// shared projection.
    ///
    /// Grouping is a run scan over an axis-sorted copy, so it works for
    /// float co-ordinates that cannot be hashed.
    pub fn group_by_axis<F>(&self, axis: Axis, mut make_bounds: F) -> IntervalSet<B, IntervalSet<B, P>>
    where
        F: FnMut(AxisSpan<B::Coord>) -> B,
        P: Clone,
    {
        let mut order: Vec<&Interval<B, P>> = self.intervals.iter().collect();
        order.sort_by(|a, b| {
            a.bounds()
                .project(axis)
                .cmp_span(&b.bounds().project(axis))
        });

        let mut out: Vec<Interval<B, IntervalSet<B, P>>> = Vec::new();
        let mut run: Vec<Interval<B, P>> = Vec::new();
        let mut run_span: Option<AxisSpan<B::Coord>> = None;
        for iv in order {
            let span = iv.bounds().project(axis);
            if run_span.is_some_and(|cur| cur != span) {
                let cur = run_span.take().unwrap();
                out.push(Interval::new(
                    make_bounds(cur),
                    IntervalSet::new(std::mem::take(&mut run)),
                ));
            }
            run_span = Some(span);
            run.push(iv.clone());
        }
        if let Some(cur) = run_span {
            out.push(Interval::new(make_bounds(cur), IntervalSet::new(run)));
        }
        IntervalSet::new(out)
    }

    // ------------------------------------------------------------------
    // Binary operations
    // ------------------------------------------------------------------

    /// Concatenates two sets and re-sorts. No de-duplication is performed;
    /// duplicate geometries from both operands survive.
    pub fn union(&self, other: &Self) -> Self
    where
        P: Clone,
    {
        let mut intervals = self.intervals.clone();
        intervals.extend(other.intervals.iter().cloned());
        Self::new(intervals)
    }

    /// The windowed sweep join. For every pair whose primary-axis extents
    /// are within `window` of each other and for which `predicate` holds,
    /// emits `merge_op(i1, i2)`.
    ///
    /// Output order is bound order of the merged intervals, ties broken by
    /// `self` order then `other` order. Empty operands yield an empty
    /// result.
    pub fn join<P2, Q, F, G>(
        &self,
        other: &IntervalSet<B, P2>,
        mut predicate: F,
        mut merge_op: G,
        window: B::Coord,
    ) -> IntervalSet<B, Q>
    where
        F: FnMut(&Interval<B, P>, &Interval<B, P2>) -> bool,
        G: FnMut(&Interval<B, P>, &Interval<B, P2>) -> Interval<B, Q>,
    {
        let mut out: Vec<Interval<B, Q>> = Vec::new();
        self.sweep(other, window, |_, i1, i2| {
            if predicate(i1, i2) {
                out.push(merge_op(i1, i2));
            }
        });
        IntervalSet::new(out)
    }

    /// Removes from `self` every interval for which some interval in
    /// `other` within `window` on the primary axis satisfies `predicate`.
    /// Removal is whole-interval; for per-axis extent subtraction see
    /// [`IntervalSet::subtract_along`].
    pub fn minus<P2, F>(
        &self,
        other: &IntervalSet<B, P2>,
        mut predicate: F,
        window: B::Coord,
    ) -> Self
    where
        F: FnMut(&Interval<B, P>, &Interval<B, P2>) -> bool,
        P: Clone,
    {
        let matched = self.matched_flags(other, &mut predicate, window);
        Self {
            intervals: self
                .intervals
                .iter()
                .zip(matched)
                .filter(|(_, hit)| !hit)
                .map(|(iv, _)| iv.clone())
                .collect(),
        }
    }

    /// Keeps the intervals of `self` that match at least one interval in
    /// `other` within `window` on the primary axis.
    pub fn filter_against<P2, F>(
        &self,
        other: &IntervalSet<B, P2>,
        mut predicate: F,
        window: B::Coord,
    ) -> Self
    where
        F: FnMut(&Interval<B, P>, &Interval<B, P2>) -> bool,
        P: Clone,
    {
        let matched = self.matched_flags(other, &mut predicate, window);
        Self {
            intervals: self
                .intervals
                .iter()
                .zip(matched)
                .filter(|(_, hit)| *hit)
                .map(|(iv, _)| iv.clone())
                .collect(),
        }
    }

    /// For every interval of `self`, gathers the intervals of `other`
    /// within `window` that satisfy `predicate` and nests them into the
    /// payload alongside the original one. With `filter_empty`, intervals
    /// that collected nothing are dropped.
    pub fn collect_by_interval<P2, F>(
        &self,
        other: &IntervalSet<B, P2>,
        mut predicate: F,
        window: B::Coord,
        filter_empty: bool,
    ) -> IntervalSet<B, (P, IntervalSet<B, P2>)>
    where
        F: FnMut(&Interval<B, P>, &Interval<B, P2>) -> bool,
        P: Clone,
        P2: Clone,
    {
        let mut collected: Vec<Vec<Interval<B, P2>>> =
            (0..self.intervals.len()).map(|_| Vec::new()).collect();
        self.sweep(other, window, |idx, i1, i2| {
            if predicate(i1, i2) {
                collected[idx].push(i2.clone());
            }
        });
        let intervals: Vec<Interval<B, (P, IntervalSet<B, P2>)>> = self
            .intervals
            .iter()
            .zip(collected)
            .filter(|(_, hits)| !filter_empty || !hits.is_empty())
            .map(|(iv, hits)| iv.with_payload((iv.payload().clone(), IntervalSet::new(hits))))
            .collect();
        IntervalSet::new(intervals)
    }

    /// Subtracts, along `axis`, the extents of the `other`-intervals whose
    /// primary-axis spans are within `window` of each `self` interval.
    /// Each interval of `self` yields up to n+1 fragments carrying a clone
    /// of its payload; fragments that collapse to a point are discarded.
    pub fn subtract_along<P2>(
        &self,
        axis: Axis,
        other: &IntervalSet<B, P2>,
        window: B::Coord,
    ) -> Self
    where
        P: Clone,
    {
        let mut out: Vec<Interval<B, P>> = Vec::new();
        for iv in &self.intervals {
            let own = iv.bounds().project(axis);
            let primary = iv.bounds().primary();

            // Candidate spans on `axis`, clipped to this interval.
            let mut holes: Vec<AxisSpan<B::Coord>> = other
                .intervals
                .iter()
                .filter(|o| {
                    let op = o.bounds().primary();
                    op.hi() + window >= primary.lo() && primary.hi() + window >= op.lo()
                })
                .filter_map(|o| own.intersection(&o.bounds().project(axis)))
                .collect();
            if holes.is_empty() {
                out.push(iv.clone());
                continue;
            }
            holes.sort_by(|a, b| a.cmp_span(b));

            let mut cursor = own.lo();
            for hole in &holes {
                if cursor < hole.lo() {
                    out.push(Interval::new(
                        iv.bounds()
                            .with_span(axis, AxisSpan::new_unchecked(cursor, hole.lo())),
                        iv.payload().clone(),
                    ));
                }
                cursor = cursor.max_of(hole.hi());
            }
            if cursor < own.hi() {
                out.push(Interval::new(
                    iv.bounds()
                        .with_span(axis, AxisSpan::new_unchecked(cursor, own.hi())),
                    iv.payload().clone(),
                ));
            }
        }
        Self::new(out)
    }

    /// Visits every candidate pair of the windowed sweep in `(self order,
    /// other order)`, passing the index of the `self` interval. Both sets
    /// are sorted on the primary axis, so the admissible run of `other` is
    /// tracked by a monotone start cursor and an early break once
    /// candidates start past `hi + window`.
    fn sweep<P2, V>(&self, other: &IntervalSet<B, P2>, window: B::Coord, mut visit: V)
    where
        V: FnMut(usize, &Interval<B, P>, &Interval<B, P2>),
    {
        let mut start = 0;
        for (idx, i1) in self.intervals.iter().enumerate() {
            let p1 = i1.bounds().primary();
            // Comparisons are arranged as additions so unsigned
            // co-ordinates never underflow.
            while start < other.intervals.len()
                && other.intervals[start].bounds().primary().hi() + window < p1.lo()
            {
                start += 1;
            }
            for i2 in &other.intervals[start..] {
                if i2.bounds().primary().lo() > p1.hi() + window {
                    break;
                }
                visit(idx, i1, i2);
            }
        }
    }

    /// One flag per `self` interval: whether any `other` interval within
    /// `window` satisfies `predicate`.
    fn matched_flags<P2, F>(
        &self,
        other: &IntervalSet<B, P2>,
        predicate: &mut F,
        window: B::Coord,
    ) -> Vec<bool>
    where
        F: FnMut(&Interval<B, P>, &Interval<B, P2>) -> bool,
    {
        let mut flags = vec![false; self.intervals.len()];
        self.sweep(other, window, |idx, i1, i2| {
            if !flags[idx] && predicate(i1, i2) {
                flags[idx] = true;
            }
        });
        flags
    }
}

impl<B, P> Default for IntervalSet<B, P>
where
    B: Bounds,
{
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<B, P> FromIterator<Interval<B, P>> for IntervalSet<B, P>
where
    B: Bounds,
{
    #[inline]
    fn from_iter<T: IntoIterator<Item = Interval<B, P>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, B, P> IntoIterator for &'a IntervalSet<B, P>
where
    B: Bounds,
{
    type Item = &'a Interval<B, P>;
    type IntoIter = std::slice::Iter<'a, Interval<B, P>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{Bounds1D, Bounds3D};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn set1d(spans: &[(i64, i64)]) -> IntervalSet<Bounds1D<i64>, usize> {
        IntervalSet::new(
            spans
                .iter()
                .enumerate()
                .map(|(i, &(lo, hi))| Interval::new(Bounds1D::new(lo, hi), i))
                .collect(),
        )
    }

    fn spans_of<P>(set: &IntervalSet<Bounds1D<i64>, P>) -> Vec<(i64, i64)> {
        set.iter()
            .map(|iv| (iv.bounds().t().lo(), iv.bounds().t().hi()))
            .collect()
    }

    #[test]
    fn test_construction_sorts() {
        let set = set1d(&[(20, 30), (0, 10), (0, 5)]);
        assert_eq!(spans_of(&set), vec![(0, 5), (0, 10), (20, 30)]);
    }

    #[test]
    fn test_order_invariant_through_operations() {
        let set = set1d(&[(8, 9), (0, 10), (3, 4)]);
        let mapped = set.map(|iv| {
            Interval::new(
                Bounds1D::new(100 - iv.bounds().t().hi(), 100 - iv.bounds().t().lo()),
                *iv.payload(),
            )
        });
        assert_eq!(spans_of(&mapped), vec![(90, 100), (91, 92), (96, 97)]);
    }

    #[test]
    fn test_filter_bounds_threshold() {
        // Two detections of the same label; keep only early ones.
        let set = IntervalSet::new(vec![
            Interval::new(Bounds1D::new(0, 10), "car"),
            Interval::new(Bounds1D::new(20, 30), "car"),
        ]);
        let early = set.filter(|iv| iv.bounds().t().lo() < 15);
        assert_eq!(early.len(), 1);
        assert_eq!(early.intervals()[0].bounds().t(), AxisSpan::new(0, 10));
    }

    #[test]
    fn test_map_payload_preserves_order() {
        let set = set1d(&[(5, 6), (0, 1)]);
        let tagged = set.map_payload(|p| p * 10);
        assert_eq!(spans_of(&tagged), vec![(0, 1), (5, 6)]);
        assert_eq!(*tagged.intervals()[0].payload(), 10);
    }

    #[test]
    fn test_fold_runs_in_order() {
        let set = set1d(&[(20, 30), (0, 10)]);
        let order = set.fold(Vec::new(), |mut acc, iv| {
            acc.push(iv.bounds().t().lo());
            acc
        });
        assert_eq!(order, vec![0, 20]);
    }

    #[test]
    fn test_group_by_first_occurrence_order() {
        let set = IntervalSet::new(vec![
            Interval::new(Bounds1D::new(0, 1), "b"),
            Interval::new(Bounds1D::new(2, 3), "a"),
            Interval::new(Bounds1D::new(4, 5), "b"),
        ]);
        let mut seen = Vec::new();
        let grouped = set.group_by(
            |iv| *iv.payload(),
            |key, members| {
                seen.push(*key);
                let hull = members
                    .iter()
                    .skip(1)
                    .fold(members[0].bounds().t(), |acc, iv| {
                        acc.span(&iv.bounds().t())
                    });
                Interval::new(Bounds1D::from_span(hull), members.len())
            },
        );
        // "b" occurs first in sorted order.
        assert_eq!(seen, vec!["b", "a"]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(spans_of(&grouped), vec![(0, 5), (2, 3)]);
    }

    #[test]
    fn test_coalesce_merges_chains() {
        let set = set1d(&[(0, 3), (2, 5), (5, 8), (20, 25)]);
        let merged = set.coalesce(
            Axis::T,
            0,
            |_, _| true,
            |a, b| a.combine(b, |x, _| *x),
        );
        assert_eq!(spans_of(&merged), vec![(0, 8), (20, 25)]);
    }

    #[test]
    fn test_coalesce_epsilon_bridges_gaps() {
        let set = set1d(&[(0, 3), (5, 8)]);
        let tight = set.coalesce(Axis::T, 0, |_, _| true, |a, b| a.combine(b, |x, _| *x));
        assert_eq!(tight.len(), 2);
        let loose = set.coalesce(Axis::T, 2, |_, _| true, |a, b| a.combine(b, |x, _| *x));
        assert_eq!(spans_of(&loose), vec![(0, 8)]);
    }

    #[test]
    fn test_coalesce_predicate_keeps_groups_apart() {
        let set = IntervalSet::new(vec![
            Interval::new(Bounds1D::new(0, 4), "car"),
            Interval::new(Bounds1D::new(2, 6), "person"),
            Interval::new(Bounds1D::new(4, 9), "car"),
        ]);
        let merged = set.coalesce(
            Axis::T,
            0,
            |a, b| a.payload() == b.payload(),
            |a, b| a.combine(b, |x, _| *x),
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(spans_of(&merged), vec![(0, 9), (2, 6)]);
    }

    #[test]
    fn test_coalesce_is_idempotent() {
        let set = set1d(&[(0, 3), (1, 2), (2, 7), (9, 12), (11, 15), (30, 31)]);
        let once = set.coalesce(Axis::T, 0, |_, _| true, |a, b| a.combine(b, |x, _| *x));
        let twice = once.coalesce(Axis::T, 0, |_, _| true, |a, b| a.combine(b, |x, _| *x));
        assert_eq!(spans_of(&once), spans_of(&twice));
    }

    #[test]
    fn test_split_flattens() {
        let set = set1d(&[(0, 10)]);
        let halves = set.split(|iv| {
            let t = iv.bounds().t();
            let mid = (t.lo() + t.hi()) / 2;
            IntervalSet::new(vec![
                Interval::new(Bounds1D::new(t.lo(), mid), ()),
                Interval::new(Bounds1D::new(mid, t.hi()), ()),
            ])
        });
        assert_eq!(spans_of(&halves), vec![(0, 5), (5, 10)]);
    }

    #[test]
    fn test_dilate_and_filter_size() {
        let set = set1d(&[(2, 4), (10, 20)]);
        let grown = set.dilate(Axis::T, 1);
        assert_eq!(spans_of(&grown), vec![(1, 5), (9, 21)]);

        let long = set.filter_size(Axis::T, 5, None);
        assert_eq!(spans_of(&long), vec![(10, 20)]);
        let short = set.filter_size(Axis::T, 0, Some(4));
        assert_eq!(spans_of(&short), vec![(2, 4)]);
    }

    #[test]
    fn test_group_by_axis_runs() {
        let set = IntervalSet::new(vec![
            Interval::new(Bounds3D::new(0, 10, 0, 1, 0, 1), "a"),
            Interval::new(Bounds3D::new(0, 10, 2, 3, 0, 1), "b"),
            Interval::new(Bounds3D::new(5, 15, 0, 1, 0, 1), "c"),
        ]);
        let frames = set.group_by_axis(Axis::T, |span| {
            Bounds3D::from_spans(
                span,
                AxisSpan::new(0, 1),
                AxisSpan::new(0, 1),
            )
        });
        assert_eq!(frames.len(), 2);
        assert_eq!(frames.intervals()[0].payload().len(), 2);
        assert_eq!(frames.intervals()[1].payload().len(), 1);
    }

    #[test]
    fn test_union_no_dedup() {
        let a = set1d(&[(0, 10)]);
        let b = set1d(&[(0, 10), (20, 30)]);
        let u = a.union(&b);
        assert_eq!(spans_of(&u), vec![(0, 10), (0, 10), (20, 30)]);
    }

    #[test]
    fn test_join_spatial_overlap() {
        // A person track and a bike track overlapping on X.
        let person = IntervalSet::new(vec![Interval::new(
            Bounds3D::new(0.0, 10.0, 0.0, 0.5, 0.0, 1.0),
            "person",
        )]);
        let bikes = IntervalSet::new(vec![Interval::new(
            Bounds3D::new(0.0, 10.0, 0.4, 0.9, 0.0, 1.0),
            "bike",
        )]);
        let riding = person.join(
            &bikes,
            |a, b| a.bounds().overlaps_on(b.bounds(), Axis::X),
            |a, b| {
                Interval::new(
                    a.bounds().span(b.bounds()),
                    format!("{}+{}", a.payload(), b.payload()),
                )
            },
            0.0,
        );
        assert_eq!(riding.len(), 1);
        let iv = &riding.intervals()[0];
        assert_eq!(iv.bounds().t(), AxisSpan::new(0.0, 10.0));
        assert_eq!(iv.bounds().x(), AxisSpan::new(0.0, 0.9));
        assert_eq!(*iv.payload(), "person+bike");
    }

    #[test]
    fn test_join_window_prunes_distant_pairs() {
        let a = set1d(&[(0, 1)]);
        let b = set1d(&[(3, 4)]);
        let near = |x: &Interval<Bounds1D<i64>, usize>, y: &Interval<Bounds1D<i64>, usize>| {
            x.bounds().t().gap(&y.bounds().t()).is_none()
                || x.bounds().t().gap(&y.bounds().t()).unwrap().length() <= 5
        };
        let merge = |x: &Interval<Bounds1D<i64>, usize>, y: &Interval<Bounds1D<i64>, usize>| {
            x.combine(y, |p, _| *p)
        };
        // Window too small: the true pair is silently missed.
        assert_eq!(a.join(&b, near, merge, 1).len(), 0);
        assert_eq!(a.join(&b, near, merge, 2).len(), 1);
    }

    #[test]
    fn test_join_exactness_against_naive() {
        let mut rng = StdRng::seed_from_u64(7);
        let mk = |rng: &mut StdRng, n: usize| {
            IntervalSet::new(
                (0..n)
                    .map(|i| {
                        let lo = rng.gen_range(0..500);
                        let len = rng.gen_range(0..20);
                        Interval::new(Bounds1D::new(lo, lo + len), i)
                    })
                    .collect::<Vec<_>>(),
            )
        };
        let a = mk(&mut rng, 40);
        let b = mk(&mut rng, 30);

        let pred = |x: &Interval<Bounds1D<i64>, usize>, y: &Interval<Bounds1D<i64>, usize>| {
            x.bounds().t().overlaps(&y.bounds().t())
        };
        let merge = |x: &Interval<Bounds1D<i64>, usize>, y: &Interval<Bounds1D<i64>, usize>| {
            x.combine(y, |p, q| p * 1000 + q)
        };

        let swept = a.join(&b, pred, merge, 600);

        let mut naive = Vec::new();
        for i1 in a.iter() {
            for i2 in b.iter() {
                if pred(i1, i2) {
                    naive.push(merge(i1, i2));
                }
            }
        }
        let naive = IntervalSet::new(naive);
        assert_eq!(swept, naive);
    }

    #[test]
    fn test_minus_removes_whole_intervals() {
        let a = set1d(&[(0, 10)]);
        let b = set1d(&[(5, 6)]);
        let left = a.minus(
            &b,
            |x, y| x.bounds().t().overlaps(&y.bounds().t()),
            0,
        );
        assert!(left.is_empty());

        // Nothing overlapping: self untouched.
        let c = set1d(&[(50, 60)]);
        let kept = a.minus(&c, |x, y| x.bounds().t().overlaps(&y.bounds().t()), 0);
        assert_eq!(spans_of(&kept), vec![(0, 10)]);
    }

    #[test]
    fn test_filter_against() {
        let a = set1d(&[(0, 10), (20, 30)]);
        let b = set1d(&[(8, 12)]);
        let hit = a.filter_against(&b, |x, y| x.bounds().t().overlaps(&y.bounds().t()), 0);
        assert_eq!(spans_of(&hit), vec![(0, 10)]);
    }

    #[test]
    fn test_collect_by_interval() {
        let shots = set1d(&[(0, 10), (20, 30)]);
        let faces = set1d(&[(2, 3), (4, 5), (40, 41)]);
        let nested = shots.collect_by_interval(
            &faces,
            |s, f| s.bounds().t().contains_span(&f.bounds().t()),
            0,
            false,
        );
        assert_eq!(nested.len(), 2);
        assert_eq!(nested.intervals()[0].payload().1.len(), 2);
        assert_eq!(nested.intervals()[1].payload().1.len(), 0);

        let nonempty = shots.collect_by_interval(
            &faces,
            |s, f| s.bounds().t().contains_span(&f.bounds().t()),
            0,
            true,
        );
        assert_eq!(nonempty.len(), 1);
    }

    #[test]
    fn test_subtract_along_fragments() {
        let a = set1d(&[(0, 10)]);
        let holes = set1d(&[(2, 4), (6, 8)]);
        let frags = a.subtract_along(Axis::T, &holes, 0);
        assert_eq!(spans_of(&frags), vec![(0, 2), (4, 6), (8, 10)]);
        // Payload rides along on every fragment.
        assert!(frags.iter().all(|iv| *iv.payload() == 0));
    }

    #[test]
    fn test_subtract_along_full_cover_and_edges() {
        let a = set1d(&[(0, 10)]);
        let cover = set1d(&[(0, 10)]);
        assert!(a.subtract_along(Axis::T, &cover, 0).is_empty());

        let edge = set1d(&[(0, 3)]);
        assert_eq!(
            spans_of(&a.subtract_along(Axis::T, &edge, 0)),
            vec![(3, 10)]
        );
    }

    #[test]
    fn test_subtract_along_unsigned_overlapping_holes() {
        // Overlapping holes must not rewind the cursor, and the whole walk
        // must stay within unsigned arithmetic.
        let a = IntervalSet::new(vec![Interval::new(Bounds1D::new(0u64, 10), ())]);
        let holes = IntervalSet::new(vec![
            Interval::new(Bounds1D::new(2u64, 6), ()),
            Interval::new(Bounds1D::new(3u64, 4), ()),
        ]);
        let frags = a.subtract_along(Axis::T, &holes, 0);
        let spans: Vec<_> = frags
            .iter()
            .map(|iv| (iv.bounds().t().lo(), iv.bounds().t().hi()))
            .collect();
        assert_eq!(spans, vec![(0, 2), (6, 10)]);
    }

    #[test]
    fn test_empty_operands() {
        let empty: IntervalSet<Bounds1D<i64>, usize> = IntervalSet::empty();
        let a = set1d(&[(0, 10)]);
        assert!(empty
            .join(&a, |_, _| true, |x, y| x.combine(y, |p, _| *p), 0)
            .is_empty());
        assert!(a
            .join(&empty, |_, _| true, |x, y| x.combine(y, |p, _| *p), 0)
            .is_empty());
        assert_eq!(a.minus(&empty, |_, _| true, 0).len(), 1);
    }
}
