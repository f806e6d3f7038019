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

//! # Trellis Runtime
//!
//! Chunked, optionally parallel execution of interval-algebra batch
//! functions over large ordered inputs: primary-axis partitioning with
//! overlap margins, scoped worker threads with fail-fast abort, boundary
//! de-duplication when stitching chunk outputs, and run monitoring /
//! statistics.

pub mod chunk;
pub mod combine;
pub mod config;
pub mod error;
pub mod monitor;
pub mod runtime;
pub mod stats;

pub use config::{RuntimeConfig, RuntimeConfigBuilder};
pub use error::{BatchError, RuntimeError};
pub use monitor::{CompositeMonitor, LogMonitor, NoOpMonitor, RunMonitor};
pub use runtime::Runtime;
pub use stats::{RunStatistics, RunStatisticsBuilder};
