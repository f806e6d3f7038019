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

//! # Chunked Execution Runtime
//!
//! [`Runtime`] applies a caller-supplied batch function over a large
//! interval set by partitioning the primary-axis extent into chunks (see
//! the `chunk` module), dispatching the chunks to a pool of scoped worker
//! threads, and stitching the per-chunk outputs back together with
//! boundary de-duplication (see the `combine` module).
//!
//! Workers claim chunks from a shared atomic cursor, optionally over a
//! seed-shuffled dispatch order. A failing chunk raises the abort flag:
//! no new chunk is claimed afterwards, already-running chunks finish but
//! their results are discarded, and the failure with the lowest chunk
//! index is reported. The combined output of a successful run is
//! identical to what a sequential, single-chunk execution would produce,
//! whatever the worker count or dispatch order.

use crate::chunk::{self, Chunk, ChunkState};
use crate::combine;
use crate::config::RuntimeConfig;
use crate::error::{BatchError, RuntimeError};
use crate::monitor::RunMonitor;
use crate::stats::{RunStatistics, RunStatisticsBuilder};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;
use trellis_algebra::bounds::Bounds;
use trellis_algebra::set::IntervalSet;
use trellis_core::coord::Coordinate;
use trellis_core::span::AxisSpan;

/// Per-chunk outcome slot, written once by the worker that claimed the
/// chunk.
enum ChunkSlot<B, Q>
where
    B: Bounds,
{
    Pending,
    Running,
    Completed(IntervalSet<B, Q>),
    Failed(BatchError),
}

impl<B, Q> ChunkSlot<B, Q>
where
    B: Bounds,
{
    #[inline]
    fn state(&self) -> ChunkState {
        match self {
            ChunkSlot::Pending => ChunkState::Pending,
            ChunkSlot::Running => ChunkState::Running,
            ChunkSlot::Completed(_) => ChunkState::Completed,
            ChunkSlot::Failed(_) => ChunkState::Failed,
        }
    }
}

/// The chunked execution runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Runtime<C>
where
    C: Coordinate,
{
    config: RuntimeConfig<C>,
}

impl<C> Runtime<C>
where
    C: Coordinate,
{
    /// Creates a runtime with the given configuration.
    #[inline]
    pub fn new(config: RuntimeConfig<C>) -> Self {
        Self { config }
    }

    /// Returns the configuration of this runtime.
    #[inline]
    pub fn config(&self) -> &RuntimeConfig<C> {
        &self.config
    }

    /// Runs a unary batch function over `input`, chunk by chunk.
    ///
    /// `batch` must be pure: for the output to match an unchunked
    /// execution it may only depend on the slice it is given, and the
    /// overlap margin must cover the largest window it matches over.
    /// `payload_eq` identifies boundary duplicates during combining.
    pub fn run_unary<B, P, Q, F, E>(
        &self,
        input: &IntervalSet<B, P>,
        batch: F,
        payload_eq: E,
        monitor: &mut (dyn RunMonitor + Send),
    ) -> Result<(IntervalSet<B, Q>, RunStatistics), RuntimeError>
    where
        B: Bounds<Coord = C> + Send + Sync,
        P: Clone + Send + Sync,
        Q: Send,
        F: Fn(&IntervalSet<B, P>) -> Result<IntervalSet<B, Q>, BatchError> + Sync,
        E: FnMut(&Q, &Q) -> bool,
    {
        let started = Instant::now();
        let Some(extent) = chunk::primary_extent(input) else {
            return self.empty_run(started, 0, monitor);
        };
        self.run_over(
            started,
            extent,
            input.len(),
            |chunk| batch(&chunk::slice(input, chunk.extended())),
            payload_eq,
            monitor,
        )
    }

    /// Runs a binary batch function (a join-like operation) over two
    /// inputs, slicing both with the same chunk windows.
    pub fn run_binary<B, P1, P2, Q, F, E>(
        &self,
        left: &IntervalSet<B, P1>,
        right: &IntervalSet<B, P2>,
        batch: F,
        payload_eq: E,
        monitor: &mut (dyn RunMonitor + Send),
    ) -> Result<(IntervalSet<B, Q>, RunStatistics), RuntimeError>
    where
        B: Bounds<Coord = C> + Send + Sync,
        P1: Clone + Send + Sync,
        P2: Clone + Send + Sync,
        Q: Send,
        F: Fn(&IntervalSet<B, P1>, &IntervalSet<B, P2>) -> Result<IntervalSet<B, Q>, BatchError>
            + Sync,
        E: FnMut(&Q, &Q) -> bool,
    {
        let started = Instant::now();
        let extent = match (chunk::primary_extent(left), chunk::primary_extent(right)) {
            (Some(a), Some(b)) => a.span(&b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => {
                return self.empty_run(started, 0, monitor);
            }
        };
        self.run_over(
            started,
            extent,
            left.len() + right.len(),
            |chunk| {
                batch(
                    &chunk::slice(left, chunk.extended()),
                    &chunk::slice(right, chunk.extended()),
                )
            },
            payload_eq,
            monitor,
        )
    }

    /// The common run skeleton: partition, dispatch, stitch, account.
    fn run_over<B, Q, G, E>(
        &self,
        started: Instant,
        extent: AxisSpan<C>,
        intervals_in: usize,
        run_chunk: G,
        payload_eq: E,
        monitor: &mut (dyn RunMonitor + Send),
    ) -> Result<(IntervalSet<B, Q>, RunStatistics), RuntimeError>
    where
        B: Bounds<Coord = C> + Send,
        Q: Send,
        G: Fn(&Chunk<C>) -> Result<IntervalSet<B, Q>, BatchError> + Sync,
        E: FnMut(&Q, &Q) -> bool,
    {
        let chunks = chunk::partition(
            extent,
            self.config.chunk_size(),
            self.config.overlap_margin(),
        );
        monitor.on_run_start(chunks.len());

        let outputs = self.dispatch(&chunks, run_chunk, monitor)?;
        let completed = outputs.len();
        let (combined, dropped) = combine::stitch(outputs, payload_eq);

        let stats = RunStatisticsBuilder::new()
            .chunks_total(chunks.len())
            .chunks_completed(completed)
            .intervals_in(intervals_in)
            .intervals_out(combined.len())
            .duplicates_dropped(dropped)
            .worker_count(self.config.worker_count())
            .run_duration(started.elapsed())
            .build();
        monitor.on_run_end(&stats);
        Ok((combined, stats))
    }

    /// Claims chunks from a shared cursor across scoped workers and
    /// collects their outputs in partition order.
    fn dispatch<B, Q, G>(
        &self,
        chunks: &[Chunk<C>],
        run_chunk: G,
        monitor: &mut (dyn RunMonitor + Send),
    ) -> Result<Vec<IntervalSet<B, Q>>, RuntimeError>
    where
        B: Bounds + Send,
        Q: Send,
        G: Fn(&Chunk<C>) -> Result<IntervalSet<B, Q>, BatchError> + Sync,
    {
        let order: Vec<usize> = {
            let mut order: Vec<usize> = (0..chunks.len()).collect();
            if let Some(seed) = self.config.shuffle_seed() {
                order.shuffle(&mut StdRng::seed_from_u64(seed));
            }
            order
        };
        let next = AtomicUsize::new(0);
        let abort = AtomicBool::new(false);
        let slots: Vec<Mutex<ChunkSlot<B, Q>>> =
            chunks.iter().map(|_| Mutex::new(ChunkSlot::Pending)).collect();
        let monitor = Mutex::new(monitor);

        thread::scope(|s| {
            for _ in 0..self.config.worker_count() {
                s.spawn(|| {
                    loop {
                        if abort.load(Ordering::Relaxed) {
                            break;
                        }
                        let claim = next.fetch_add(1, Ordering::Relaxed);
                        if claim >= order.len() {
                            break;
                        }
                        let idx = order[claim];
                        *slots[idx].lock().expect("chunk slot lock poisoned") =
                            ChunkSlot::Running;
                        monitor
                            .lock()
                            .expect("monitor lock poisoned")
                            .on_chunk_start(idx);
                        match run_chunk(&chunks[idx]) {
                            Ok(out) => {
                                let len = out.len();
                                *slots[idx].lock().expect("chunk slot lock poisoned") =
                                    ChunkSlot::Completed(out);
                                monitor
                                    .lock()
                                    .expect("monitor lock poisoned")
                                    .on_chunk_completed(idx, len);
                            }
                            Err(err) => {
                                abort.store(true, Ordering::Relaxed);
                                *slots[idx].lock().expect("chunk slot lock poisoned") =
                                    ChunkSlot::Failed(err);
                                monitor
                                    .lock()
                                    .expect("monitor lock poisoned")
                                    .on_chunk_failed(idx);
                            }
                        }
                    }
                });
            }
        });

        // The lowest-index failure wins; everything else is discarded.
        let mut outputs = Vec::with_capacity(slots.len());
        for (index, slot) in slots.into_iter().enumerate() {
            let slot = slot.into_inner().expect("chunk slot lock poisoned");
            debug_assert!(
                slot.state() != ChunkState::Running,
                "chunk {} still running after workers joined",
                index
            );
            match slot {
                ChunkSlot::Failed(source) => {
                    return Err(RuntimeError::Chunk { index, source });
                }
                ChunkSlot::Completed(set) => outputs.push(set),
                ChunkSlot::Pending | ChunkSlot::Running => {}
            }
        }
        Ok(outputs)
    }

    fn empty_run<B, Q>(
        &self,
        started: Instant,
        intervals_in: usize,
        monitor: &mut (dyn RunMonitor + Send),
    ) -> Result<(IntervalSet<B, Q>, RunStatistics), RuntimeError>
    where
        B: Bounds<Coord = C>,
    {
        monitor.on_run_start(0);
        let stats = RunStatisticsBuilder::new()
            .intervals_in(intervals_in)
            .worker_count(self.config.worker_count())
            .run_duration(started.elapsed())
            .build();
        monitor.on_run_end(&stats);
        Ok((IntervalSet::empty(), stats))
    }
}

impl<C> std::fmt::Display for Runtime<C>
where
    C: Coordinate,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Runtime({})", self.config)
    }
}
