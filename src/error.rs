//! Error types surfaced by the public sort entry points.
//!
//! Per the design's error model (§7): the engines are total on well-formed
//! input or they propagate a failure unchanged. The only caller-facing
//! failure modes are precondition violations on the public entry points and
//! a worker failure in the parallel bucket executor.

use thiserror::Error;

/// Errors that can occur during a sort call.
#[derive(Debug, Error)]
pub enum SortError {
    /// `lo`/`hi` do not describe a valid range over the input slice.
    #[error("invalid range [{lo}, {hi}) for a slice of length {len}")]
    InvalidRange { lo: usize, hi: usize, len: usize },

    /// A bucket job spawned by the parallel executor panicked.
    #[error("parallel bucket job failed: {reason}")]
    ParallelExecutionFailed { reason: String },

    /// `depth` passed to `mkq_sort` is absurdly large relative to `usize`,
    /// past any depth a real string could reach.
    #[error("comparison depth {depth} exceeds maximum supported depth of {max_depth}")]
    DepthTooLarge { depth: usize, max_depth: usize },
}

/// A specialized `Result` type for sorting operations.
pub type Result<T> = std::result::Result<T, SortError>;

impl SortError {
    pub(crate) fn invalid_range(lo: usize, hi: usize, len: usize) -> Self {
        Self::InvalidRange { lo, hi, len }
    }

    pub(crate) fn parallel_execution_failed(reason: impl std::fmt::Display) -> Self {
        Self::ParallelExecutionFailed {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn depth_too_large(depth: usize, max_depth: usize) -> Self {
        Self::DepthTooLarge { depth, max_depth }
    }
}
