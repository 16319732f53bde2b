#![warn(missing_docs)]
//! Bisect Statistical Reducer
//!
//! Reduces timing and comparison-count samples into summary statistics:
//! - Arithmetic mean, extrema and sample standard deviation (n-1 denominator)
//! - Nearest-rank percentiles (median, p95, p99) for the detailed profiler
//!
//! Both the batch orchestrator and the detailed profiler go through this crate,
//! so their standard deviations are directly comparable.

mod percentiles;
mod summary;

pub use percentiles::{Percentiles, compute_percentile, compute_percentiles};
pub use summary::{DetailedSummary, StatsSummary, compute_detailed_summary, compute_summary};

use thiserror::Error;

/// Errors produced by the reducer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A reduction was requested over zero samples
    #[error("cannot reduce an empty sample set")]
    EmptySampleSet,
}
