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

//! # Runtime Configuration
//!
//! Three knobs govern a chunked run:
//!
//! - `chunk_size` bounds the primary-axis range each batch invocation
//!   sees.
//! - `overlap_margin` extends each chunk window on both ends; it must be
//!   at least as large as the largest join/minus `window` the batch
//!   function uses, or matches straddling a chunk boundary are missed.
//!   That requirement cannot be validated here (the batch function is
//!   opaque), so it stays a caller contract.
//! - `worker_count` is the degree of parallelism; 1 means sequential.
//!
//! `shuffle_seed` optionally randomizes chunk dispatch order, which evens
//! out load when interval density varies wildly along the timeline. The
//! final output never depends on dispatch order.

use trellis_core::coord::Coordinate;

/// Configuration for the chunked execution runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig<C>
where
    C: Coordinate,
{
    chunk_size: C,
    overlap_margin: C,
    worker_count: usize,
    shuffle_seed: Option<u64>,
}

impl<C> RuntimeConfig<C>
where
    C: Coordinate,
{
    /// Returns a builder with `chunk_size` set and everything else at its
    /// default (`overlap_margin = 0`, `worker_count = 1`, no shuffling).
    #[inline]
    pub fn builder(chunk_size: C) -> RuntimeConfigBuilder<C> {
        RuntimeConfigBuilder::new(chunk_size)
    }

    /// Returns the primary-axis range each chunk covers.
    #[inline]
    pub fn chunk_size(&self) -> C {
        self.chunk_size
    }

    /// Returns the margin added to both ends of each chunk window.
    #[inline]
    pub fn overlap_margin(&self) -> C {
        self.overlap_margin
    }

    /// Returns the number of workers; 1 means sequential execution.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Returns the dispatch shuffle seed, if randomized dispatch is on.
    #[inline]
    pub fn shuffle_seed(&self) -> Option<u64> {
        self.shuffle_seed
    }
}

impl<C> std::fmt::Display for RuntimeConfig<C>
where
    C: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RuntimeConfig(chunk_size: {}, overlap_margin: {}, worker_count: {})",
            self.chunk_size, self.overlap_margin, self.worker_count
        )
    }
}

/// Builder for [`RuntimeConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfigBuilder<C>
where
    C: Coordinate,
{
    chunk_size: C,
    overlap_margin: C,
    worker_count: usize,
    shuffle_seed: Option<u64>,
}

impl<C> RuntimeConfigBuilder<C>
where
    C: Coordinate,
{
    /// Creates a new builder.
    #[inline]
    pub fn new(chunk_size: C) -> Self {
        Self {
            chunk_size,
            overlap_margin: C::zero(),
            worker_count: 1,
            shuffle_seed: None,
        }
    }

    /// Sets the overlap margin.
    #[inline]
    pub fn overlap_margin(mut self, overlap_margin: C) -> Self {
        self.overlap_margin = overlap_margin;
        self
    }

    /// Sets the worker count.
    #[inline]
    pub fn worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Enables seeded shuffling of chunk dispatch order.
    #[inline]
    pub fn shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is not positive, `overlap_margin` is
    /// negative, or `worker_count` is zero.
    pub fn build(self) -> RuntimeConfig<C> {
        assert!(
            self.chunk_size > C::zero(),
            "called `RuntimeConfigBuilder::build` with non-positive chunk size ({})",
            self.chunk_size
        );
        assert!(
            self.overlap_margin >= C::zero(),
            "called `RuntimeConfigBuilder::build` with negative overlap margin ({})",
            self.overlap_margin
        );
        assert!(
            self.worker_count > 0,
            "called `RuntimeConfigBuilder::build` with zero workers"
        );
        RuntimeConfig {
            chunk_size: self.chunk_size,
            overlap_margin: self.overlap_margin,
            worker_count: self.worker_count,
            shuffle_seed: self.shuffle_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::builder(10).build();
        assert_eq!(config.chunk_size(), 10);
        assert_eq!(config.overlap_margin(), 0);
        assert_eq!(config.worker_count(), 1);
        assert_eq!(config.shuffle_seed(), None);
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let config = RuntimeConfig::builder(10)
            .overlap_margin(2)
            .worker_count(4)
            .shuffle_seed(42)
            .build();
        assert_eq!(config.overlap_margin(), 2);
        assert_eq!(config.worker_count(), 4);
        assert_eq!(config.shuffle_seed(), Some(42));
    }

    #[test]
    #[should_panic(expected = "non-positive chunk size")]
    fn test_zero_chunk_size_panics() {
        RuntimeConfig::builder(0).build();
    }

    #[test]
    #[should_panic(expected = "zero workers")]
    fn test_zero_workers_panics() {
        RuntimeConfig::builder(10).worker_count(0).build();
    }
}
