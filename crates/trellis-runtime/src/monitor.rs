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

//! # Run Monitoring
//!
//! A [`RunMonitor`] observes the lifecycle of a chunked run. Events may
//! arrive from any worker thread (the runtime serializes the calls), so a
//! monitor only needs `&mut self`, not internal synchronization.

use crate::stats::RunStatistics;
use std::time::{Duration, Instant};

/// Observer of a chunked run.
pub trait RunMonitor {
    fn name(&self) -> &str;
    fn on_run_start(&mut self, total_chunks: usize);
    fn on_chunk_start(&mut self, index: usize);
    fn on_chunk_completed(&mut self, index: usize, output_len: usize);
    fn on_chunk_failed(&mut self, index: usize);
    fn on_run_end(&mut self, stats: &RunStatistics);
}

impl std::fmt::Debug for dyn RunMonitor + Send {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RunMonitor({})", self.name())
    }
}

/// A monitor that ignores every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpMonitor;

impl RunMonitor for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    fn on_run_start(&mut self, _total_chunks: usize) {}
    fn on_chunk_start(&mut self, _index: usize) {}
    fn on_chunk_completed(&mut self, _index: usize, _output_len: usize) {}
    fn on_chunk_failed(&mut self, _index: usize) {}
    fn on_run_end(&mut self, _stats: &RunStatistics) {}
}

/// A monitor printing a throttled progress table to stdout.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    total_chunks: usize,
    completed: usize,
    failed: usize,
    intervals_out: usize,
}

impl LogMonitor {
    pub fn new(log_interval: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            total_chunks: 0,
            completed: 0,
            failed: 0,
            intervals_out: 0,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<16} | {:<7} | {:<14}",
            "Elapsed", "Chunks Done", "Failed", "Intervals Out"
        );
        println!("{}", "-".repeat(54));
    }

    #[inline(always)]
    fn log_line(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let done_field = format!("{}/{}", self.completed, self.total_chunks);
        println!(
            "{:<9} | {:<16} | {:<7} | {:<14}",
            format!("{:.1}s", elapsed),
            done_field,
            self.failed,
            self.intervals_out
        );
        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl RunMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_run_start(&mut self, total_chunks: usize) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.total_chunks = total_chunks;
        self.completed = 0;
        self.failed = 0;
        self.intervals_out = 0;
        self.print_header();
    }

    fn on_chunk_start(&mut self, _index: usize) {}

    fn on_chunk_completed(&mut self, _index: usize, output_len: usize) {
        self.completed += 1;
        self.intervals_out += output_len;
        if self.last_log_time.elapsed() >= self.log_interval {
            self.log_line();
        }
    }

    fn on_chunk_failed(&mut self, index: usize) {
        self.failed += 1;
        println!("chunk {} failed, aborting run", index);
    }

    fn on_run_end(&mut self, stats: &RunStatistics) {
        self.log_line();
        println!("{}", stats);
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s)",
            self.log_interval.as_secs()
        )
    }
}

/// A monitor that forwards every event to a list of sub-monitors, in
/// order.
#[derive(Default)]
pub struct CompositeMonitor {
    monitors: Vec<Box<dyn RunMonitor + Send>>,
}

impl CompositeMonitor {
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Adds a sub-monitor.
    pub fn push(&mut self, monitor: Box<dyn RunMonitor + Send>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of sub-monitors.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if no sub-monitor is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl RunMonitor for CompositeMonitor {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_run_start(&mut self, total_chunks: usize) {
        for m in &mut self.monitors {
            m.on_run_start(total_chunks);
        }
    }

    fn on_chunk_start(&mut self, index: usize) {
        for m in &mut self.monitors {
            m.on_chunk_start(index);
        }
    }

    fn on_chunk_completed(&mut self, index: usize, output_len: usize) {
        for m in &mut self.monitors {
            m.on_chunk_completed(index, output_len);
        }
    }

    fn on_chunk_failed(&mut self, index: usize) {
        for m in &mut self.monitors {
            m.on_chunk_failed(index);
        }
    }

    fn on_run_end(&mut self, stats: &RunStatistics) {
        for m in &mut self.monitors {
            m.on_run_end(stats);
        }
    }
}

impl std::fmt::Debug for CompositeMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor({} monitors)", self.monitors.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::RunStatisticsBuilder;

    /// Records the order of events it sees.
    #[derive(Default)]
    struct RecordingMonitor {
        events: Vec<String>,
    }

    impl RunMonitor for RecordingMonitor {
        fn name(&self) -> &str {
            "RecordingMonitor"
        }

        fn on_run_start(&mut self, total_chunks: usize) {
            self.events.push(format!("start:{}", total_chunks));
        }

        fn on_chunk_start(&mut self, index: usize) {
            self.events.push(format!("chunk-start:{}", index));
        }

        fn on_chunk_completed(&mut self, index: usize, output_len: usize) {
            self.events.push(format!("chunk-done:{}:{}", index, output_len));
        }

        fn on_chunk_failed(&mut self, index: usize) {
            self.events.push(format!("chunk-failed:{}", index));
        }

        fn on_run_end(&mut self, _stats: &RunStatistics) {
            self.events.push("end".to_string());
        }
    }

    #[test]
    fn test_composite_forwards_in_order() {
        let mut composite = CompositeMonitor::new();
        composite.push(Box::new(NoOpMonitor));
        composite.push(Box::new(RecordingMonitor::default()));
        assert_eq!(composite.len(), 2);

        composite.on_run_start(4);
        composite.on_chunk_start(0);
        composite.on_chunk_completed(0, 12);
        composite.on_run_end(&RunStatisticsBuilder::new().build());
        // The recording monitor is boxed away; forwarding not panicking
        // and the composite keeping its count is what this checks.
        assert_eq!(composite.len(), 2);
    }

    #[test]
    fn test_recording_monitor_sees_lifecycle() {
        let mut m = RecordingMonitor::default();
        m.on_run_start(2);
        m.on_chunk_start(0);
        m.on_chunk_completed(0, 5);
        m.on_chunk_failed(1);
        m.on_run_end(&RunStatisticsBuilder::new().build());
        assert_eq!(
            m.events,
            vec!["start:2", "chunk-start:0", "chunk-done:0:5", "chunk-failed:1", "end"]
        );
    }
}
