//! Input-contract errors
//!
//! Every variant renders with the same user-facing prefix so callers can show
//! a single "invalid parameters" message regardless of which check failed.

use bisect_stats::StatsError;
use thiserror::Error;

/// Errors raised at the boundary of the measurement engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BenchError {
    /// Array size must be at least 1
    #[error("cannot run benchmark with invalid parameters: array size must be positive")]
    NonPositiveSize,

    /// No sizes were requested
    #[error("cannot run benchmark with invalid parameters: no array sizes given")]
    EmptySizes,

    /// Batch count must be at least 1
    #[error("cannot run benchmark with invalid parameters: batches must be at least 1")]
    ZeroBatches,

    /// Runs per batch must be at least 1
    #[error("cannot run benchmark with invalid parameters: runs per batch must be at least 1")]
    ZeroRunsPerBatch,

    /// Profiler iterations must be at least 1
    #[error("cannot run benchmark with invalid parameters: iterations must be at least 1")]
    ZeroIterations,

    /// Input array is not strictly ascending
    #[error(
        "cannot run benchmark with invalid parameters: array is not strictly ascending at index {index}"
    )]
    NotAscending {
        /// First index `i` where `a[i] >= a[i + 1]`
        index: usize,
    },

    /// Reducer rejected the collected samples
    #[error("statistics error: {0}")]
    Stats(#[from] StatsError),
}
