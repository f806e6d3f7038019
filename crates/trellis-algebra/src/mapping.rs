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

//! # Keyed Interval-Set Mapping
//!
//! An [`IntervalSetMapping`] groups interval sets under arbitrary hashable
//! keys (video ids being the typical case). Unary operations lift
//! per-value: the same transformation is applied to every set, keys are
//! kept. Binary operations are an inner join by key: only keys present in
//! both operands appear in the result, so cross-key interactions never
//! happen and per-key cost is independent of the total key count.
//!
//! Empty per-key results are kept rather than pruned; a key never maps to
//! "nothing", only possibly to an empty set.

use crate::bounds::Bounds;
use crate::interval::Interval;
use crate::set::IntervalSet;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// A mapping from keys to interval sets.
#[derive(Clone, Debug)]
pub struct IntervalSetMapping<K, B, P>
where
    K: Eq + Hash,
    B: Bounds,
{
    sets: FxHashMap<K, IntervalSet<B, P>>,
}

impl<K, B, P> IntervalSetMapping<K, B, P>
where
    K: Eq + Hash,
    B: Bounds,
{
    /// Creates an empty mapping.
    #[inline]
    pub fn new() -> Self {
        Self {
            sets: FxHashMap::default(),
        }
    }

    /// Creates a mapping from key/set pairs. Later pairs overwrite earlier
    /// ones with the same key.
    pub fn from_sets<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = (K, IntervalSet<B, P>)>,
    {
        Self {
            sets: sets.into_iter().collect(),
        }
    }

    /// Regroups one flat interval set into a mapping using `key_fn`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_algebra::bounds::Bounds1D;
    /// # use trellis_algebra::interval::Interval;
    /// # use trellis_algebra::mapping::IntervalSetMapping;
    /// # use trellis_algebra::set::IntervalSet;
    ///
    /// let flat = IntervalSet::new(vec![
    ///     Interval::new(Bounds1D::new(0, 10), ("vid-a", "car")),
    ///     Interval::new(Bounds1D::new(5, 15), ("vid-b", "car")),
    /// ]);
    /// let by_video = IntervalSetMapping::from_interval_set(&flat, |iv| iv.payload().0);
    /// assert_eq!(by_video.len(), 2);
    /// ```
    pub fn from_interval_set<F>(set: &IntervalSet<B, P>, mut key_fn: F) -> Self
    where
        F: FnMut(&Interval<B, P>) -> K,
        P: Clone,
    {
        let mut buckets: FxHashMap<K, Vec<Interval<B, P>>> = FxHashMap::default();
        for iv in set {
            buckets.entry(key_fn(iv)).or_default().push(iv.clone());
        }
        Self {
            sets: buckets
                .into_iter()
                .map(|(k, ivs)| (k, IntervalSet::new(ivs)))
                .collect(),
        }
    }

    /// Inserts a set under `key`, replacing any previous one.
    #[inline]
    pub fn insert(&mut self, key: K, set: IntervalSet<B, P>) {
        self.sets.insert(key, set);
    }

    /// Returns the set stored under `key`, if any.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&IntervalSet<B, P>> {
        self.sets.get(key)
    }

    /// Returns the number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if no key is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterates over key/set pairs in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&K, &IntervalSet<B, P>)> {
        self.sets.iter()
    }

    /// Returns the keys in sorted order. Hash-map iteration order is not
    /// deterministic; anything order-sensitive should go through this.
    pub fn keys_sorted(&self) -> Vec<&K>
    where
        K: Ord,
    {
        let mut keys: Vec<&K> = self.sets.keys().collect();
        keys.sort();
        keys
    }

    /// Applies `f` to every per-key set, keeping the keys. This is the
    /// generic unary lift; all named unary wrappers go through it.
    pub fn lift_unary<Q, F>(&self, mut f: F) -> IntervalSetMapping<K, B, Q>
    where
        F: FnMut(&IntervalSet<B, P>) -> IntervalSet<B, Q>,
        K: Clone,
    {
        IntervalSetMapping {
            sets: self.sets.iter().map(|(k, s)| (k.clone(), f(s))).collect(),
        }
    }

    /// Combines two mappings key-wise via `f`. Keys present in only one
    /// operand are dropped (inner join by key).
    pub fn lift_binary<P2, Q, F>(
        &self,
        other: &IntervalSetMapping<K, B, P2>,
        mut f: F,
    ) -> IntervalSetMapping<K, B, Q>
    where
        F: FnMut(&IntervalSet<B, P>, &IntervalSet<B, P2>) -> IntervalSet<B, Q>,
        K: Clone,
    {
        IntervalSetMapping {
            sets: self
                .sets
                .iter()
                .filter_map(|(k, s)| other.sets.get(k).map(|o| (k.clone(), f(s, o))))
                .collect(),
        }
    }

    /// Per-key [`IntervalSet::filter`].
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Interval<B, P>) -> bool,
        K: Clone,
        P: Clone,
    {
        self.lift_unary(|s| s.filter(&mut predicate))
    }

    /// Per-key [`IntervalSet::map_payload`].
    pub fn map_payload<Q, F>(&self, mut f: F) -> IntervalSetMapping<K, B, Q>
    where
        F: FnMut(&P) -> Q,
        K: Clone,
    {
        self.lift_unary(|s| s.map_payload(&mut f))
    }

    /// Per-key [`IntervalSet::coalesce`].
    pub fn coalesce<F, G>(
        &self,
        axis: crate::axis::Axis,
        epsilon: B::Coord,
        mut predicate: F,
        mut merge_op: G,
    ) -> Self
    where
        F: FnMut(&Interval<B, P>, &Interval<B, P>) -> bool,
        G: FnMut(&Interval<B, P>, &Interval<B, P>) -> Interval<B, P>,
        K: Clone,
        P: Clone,
    {
        self.lift_unary(|s| s.coalesce(axis, epsilon, &mut predicate, &mut merge_op))
    }

    /// Key-wise [`IntervalSet::join`]; keys missing from either operand are
    /// dropped.
    pub fn join<P2, Q, F, G>(
        &self,
        other: &IntervalSetMapping<K, B, P2>,
        mut predicate: F,
        mut merge_op: G,
        window: B::Coord,
    ) -> IntervalSetMapping<K, B, Q>
    where
        F: FnMut(&Interval<B, P>, &Interval<B, P2>) -> bool,
        G: FnMut(&Interval<B, P>, &Interval<B, P2>) -> Interval<B, Q>,
        K: Clone,
    {
        self.lift_binary(other, |a, b| a.join(b, &mut predicate, &mut merge_op, window))
    }

    /// Key-wise [`IntervalSet::union`]; keys missing from either operand
    /// are dropped.
    pub fn union(&self, other: &Self) -> Self
    where
        K: Clone,
        P: Clone,
    {
        self.lift_binary(other, |a, b| a.union(b))
    }

    /// Key-wise [`IntervalSet::minus`]; keys missing from either operand
    /// are dropped.
    pub fn minus<P2, F>(
        &self,
        other: &IntervalSetMapping<K, B, P2>,
        mut predicate: F,
        window: B::Coord,
    ) -> Self
    where
        F: FnMut(&Interval<B, P>, &Interval<B, P2>) -> bool,
        K: Clone,
        P: Clone,
    {
        self.lift_binary(other, |a, b| a.minus(b, &mut predicate, window))
    }

    /// Returns a mapping whose payloads carry their key alongside the
    /// original payload, ready for [`IntervalSetMapping::flatten`].
    pub fn add_key_to_payload(&self) -> IntervalSetMapping<K, B, (K, P)>
    where
        K: Clone,
        P: Clone,
    {
        IntervalSetMapping {
            sets: self
                .sets
                .iter()
                .map(|(k, s)| (k.clone(), s.map_payload(|p| (k.clone(), p.clone()))))
                .collect(),
        }
    }

    /// Flattens all per-key sets into one set. The result is sorted by
    /// bounds like any other set; key identity is lost unless it was first
    /// folded into the payload via [`IntervalSetMapping::add_key_to_payload`].
    pub fn flatten(&self) -> IntervalSet<B, P>
    where
        P: Clone,
    {
        IntervalSet::new(
            self.sets
                .values()
                .flat_map(|s| s.intervals().iter().cloned())
                .collect(),
        )
    }
}

impl<K, B, P> Default for IntervalSetMapping<K, B, P>
where
    K: Eq + Hash,
    B: Bounds,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
