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

/// Statistics collected during a chunked run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatistics {
    /// Number of chunks the input was partitioned into.
    pub chunks_total: usize,
    /// Number of chunks whose batch invocation completed.
    pub chunks_completed: usize,
    /// Number of chunks whose batch invocation failed.
    pub chunks_failed: usize,
    /// Number of intervals across all inputs.
    pub intervals_in: usize,
    /// Number of intervals in the combined output.
    pub intervals_out: usize,
    /// Number of boundary duplicates dropped while combining.
    pub duplicates_dropped: usize,
    /// Number of workers used.
    pub worker_count: usize,
    /// Total wall-clock duration of the run.
    pub run_duration: std::time::Duration,
}

impl std::fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Run Statistics:")?;
        writeln!(
            f,
            "  Chunks (total/completed/failed): {}/{}/{}",
            self.chunks_total, self.chunks_completed, self.chunks_failed
        )?;
        writeln!(f, "  Intervals In: {}", self.intervals_in)?;
        writeln!(f, "  Intervals Out: {}", self.intervals_out)?;
        writeln!(f, "  Duplicates Dropped: {}", self.duplicates_dropped)?;
        writeln!(f, "  Workers: {}", self.worker_count)?;
        writeln!(
            f,
            "  Run Duration (secs): {:.3}",
            self.run_duration.as_secs_f64()
        )
    }
}

/// Builder for `RunStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatisticsBuilder {
    chunks_total: usize,
    chunks_completed: usize,
    chunks_failed: usize,
    intervals_in: usize,
    intervals_out: usize,
    duplicates_dropped: usize,
    worker_count: usize,
    run_duration: std::time::Duration,
}

impl Default for RunStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStatisticsBuilder {
    /// Creates a new `RunStatisticsBuilder` with default values.
    #[inline]
    pub fn new() -> Self {
        Self {
            chunks_total: 0,
            chunks_completed: 0,
            chunks_failed: 0,
            intervals_in: 0,
            intervals_out: 0,
            duplicates_dropped: 0,
            worker_count: 1,
            run_duration: std::time::Duration::ZERO,
        }
    }

    /// Sets the total chunk count.
    #[inline]
    pub fn chunks_total(mut self, chunks_total: usize) -> Self {
        self.chunks_total = chunks_total;
        self
    }

    /// Sets the completed chunk count.
    #[inline]
    pub fn chunks_completed(mut self, chunks_completed: usize) -> Self {
        self.chunks_completed = chunks_completed;
        self
    }

    /// Sets the failed chunk count.
    #[inline]
    pub fn chunks_failed(mut self, chunks_failed: usize) -> Self {
        self.chunks_failed = chunks_failed;
        self
    }

    /// Sets the input interval count.
    #[inline]
    pub fn intervals_in(mut self, intervals_in: usize) -> Self {
        self.intervals_in = intervals_in;
        self
    }

    /// Sets the output interval count.
    #[inline]
    pub fn intervals_out(mut self, intervals_out: usize) -> Self {
        self.intervals_out = intervals_out;
        self
    }

    /// Sets the number of dropped boundary duplicates.
    #[inline]
    pub fn duplicates_dropped(mut self, duplicates_dropped: usize) -> Self {
        self.duplicates_dropped = duplicates_dropped;
        self
    }

    /// Sets the worker count.
    #[inline]
    pub fn worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Sets the total run duration.
    #[inline]
    pub fn run_duration(mut self, run_duration: std::time::Duration) -> Self {
        self.run_duration = run_duration;
        self
    }

    /// Builds the `RunStatistics` instance.
    #[inline]
    pub fn build(self) -> RunStatistics {
        RunStatistics {
            chunks_total: self.chunks_total,
            chunks_completed: self.chunks_completed,
            chunks_failed: self.chunks_failed,
            intervals_in: self.intervals_in,
            intervals_out: self.intervals_out,
            duplicates_dropped: self.duplicates_dropped,
            worker_count: self.worker_count,
            run_duration: self.run_duration,
        }
    }
}
