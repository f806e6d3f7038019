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

//! # Runtime Errors
//!
//! Batch functions are fallible; everything else in the runtime is not.
//! Empty input is not an error (it produces an empty result), so the only
//! failure mode a run can surface is a chunk whose batch invocation
//! returned an error. The run is fail-fast: the first failing chunk (by
//! chunk index) wins, all partial results are discarded, and no retry is
//! attempted.

/// The error type batch functions return. Boxed so callers can use any
/// error type they like.
pub type BatchError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error produced by a chunked run.
#[derive(Debug)]
pub enum RuntimeError {
    /// A chunk's batch invocation failed. `index` is the partition index
    /// of the failing chunk; `source` is the batch function's error,
    /// unchanged.
    Chunk { index: usize, source: BatchError },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::Chunk { index, source } => {
                write!(f, "chunk {} failed: {}", index, source)
            }
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Chunk { source, .. } => Some(source.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_chunk_index_and_source() {
        let err = RuntimeError::Chunk {
            index: 3,
            source: "payload decode failed".into(),
        };
        assert_eq!(format!("{}", err), "chunk 3 failed: payload decode failed");
    }

    #[test]
    fn test_source_is_exposed() {
        use std::error::Error;
        let err = RuntimeError::Chunk {
            index: 0,
            source: "boom".into(),
        };
        assert_eq!(err.source().unwrap().to_string(), "boom");
    }
}
