//! Benchmark Orchestrator
//!
//! For each requested array size:
//!
//! ```text
//! generate 1..=size ──► warm-up (both fast kernels, untimed)
//!                            │
//!                            ▼
//!            batches × { iterative batch, recursive batch }
//!                            │
//!                            ▼
//!              reduce per-kernel batch samples
//!                            │
//!                            ▼
//!                    PerformanceRecord
//! ```
//!
//! Sizes run strictly one after another on the calling thread. A cooperative
//! hook is consulted before each size and can stop the run early.

use crate::array::{BYTES_PER_ELEMENT, SortedArray};
use crate::bencher::{
    BatchSampler, DEFAULT_BATCHES, DEFAULT_RUNS_PER_BATCH, DEFAULT_WARMUP_ROUNDS, warm_up,
};
use crate::error::BenchError;
use crate::kernels::{iterative_fast, recursive_fast};
use bisect_stats::compute_summary;
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::ops::ControlFlow;
use tracing::{debug, info};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Batch layout for one orchestrator run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Timed batches per kernel per size
    pub batches: usize,
    /// Calls inside each batch window
    pub runs_per_batch: usize,
    /// Untimed rounds of both kernels before the first batch
    pub warmup_rounds: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            batches: DEFAULT_BATCHES,
            runs_per_batch: DEFAULT_RUNS_PER_BATCH,
            warmup_rounds: DEFAULT_WARMUP_ROUNDS,
        }
    }
}

impl BenchmarkConfig {
    /// Config with the given batch layout and the default warm-up
    pub fn new(batches: usize, runs_per_batch: usize) -> Self {
        Self {
            batches,
            runs_per_batch,
            ..Self::default()
        }
    }

    /// Reject zero batches or zero runs per batch
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.batches == 0 {
            return Err(BenchError::ZeroBatches);
        }
        if self.runs_per_batch == 0 {
            return Err(BenchError::ZeroRunsPerBatch);
        }
        Ok(())
    }
}

/// Measured comparison of both kernels at one array size.
///
/// Times are per-call estimates in microseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub size: usize,
    pub iterative_time_avg: f64,
    pub recursive_time_avg: f64,
    pub iterative_comparisons: f64,
    pub recursive_comparisons: f64,
    pub iterative_time_std_dev: f64,
    pub recursive_time_std_dev: f64,
    pub iterative_min_time: f64,
    pub iterative_max_time: f64,
    pub recursive_min_time: f64,
    pub recursive_max_time: f64,
    pub theoretical_comparisons: u32,
    pub memory_estimate: String,
}

impl PerformanceRecord {
    /// Recursive average over iterative average (>1.0 means iterative is faster)
    pub fn recursive_overhead(&self) -> f64 {
        if self.iterative_time_avg > 0.0 {
            self.recursive_time_avg / self.iterative_time_avg
        } else {
            0.0
        }
    }
}

/// `ceil(log2(size))`, 0 for sizes below 2
pub fn theoretical_comparisons(size: usize) -> u32 {
    if size < 2 {
        return 0;
    }
    (size as f64).log2().ceil() as u32
}

/// Render a byte count as "x.xx KB" below one MiB, otherwise "x.xx MB"
pub fn format_memory_estimate(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes < MIB {
        format!("{:.2} KB", bytes / KIB)
    } else {
        format!("{:.2} MB", bytes / MIB)
    }
}

/// Reject an empty size list or any zero size
pub fn validate_sizes(sizes: &[usize]) -> Result<(), BenchError> {
    if sizes.is_empty() {
        return Err(BenchError::EmptySizes);
    }
    if sizes.iter().any(|&s| s == 0) {
        return Err(BenchError::NonPositiveSize);
    }
    Ok(())
}

/// Benchmark both kernels at every size, in order
pub fn run_benchmark(
    sizes: &[usize],
    config: &BenchmarkConfig,
) -> Result<Vec<PerformanceRecord>, BenchError> {
    run_benchmark_with(sizes, config, |_, _| ControlFlow::Continue(()))
}

/// Benchmark both kernels at every size, consulting `before_size` first.
///
/// `before_size(position, size)` runs before each size; returning
/// `ControlFlow::Break(())` stops the run and the records finished so far are
/// returned. All parameters are validated before any measurement starts.
pub fn run_benchmark_with<H>(
    sizes: &[usize],
    config: &BenchmarkConfig,
    mut before_size: H,
) -> Result<Vec<PerformanceRecord>, BenchError>
where
    H: FnMut(usize, usize) -> ControlFlow<()>,
{
    config.validate()?;
    validate_sizes(sizes)?;

    let mut records = Vec::with_capacity(sizes.len());
    for (position, &size) in sizes.iter().enumerate() {
        if before_size(position, size).is_break() {
            info!(completed = records.len(), "benchmark run stopped by caller");
            break;
        }
        records.push(benchmark_size(size, config)?);
    }
    Ok(records)
}

/// Measure one array size
fn benchmark_size(size: usize, config: &BenchmarkConfig) -> Result<PerformanceRecord, BenchError> {
    let array = SortedArray::generate(size)?;
    let values = array.as_slice();
    let target = values[size / 2];

    warm_up(config.warmup_rounds, || {
        (
            iterative_fast(black_box(values), black_box(target)),
            recursive_fast(black_box(values), black_box(target)),
        )
    });

    let mut iterative = BatchSampler::new(config.runs_per_batch, config.batches)?;
    let mut recursive = BatchSampler::new(config.runs_per_batch, config.batches)?;

    for batch in 0..config.batches {
        let it = iterative.iter_batched(|| iterative_fast(black_box(values), black_box(target)));
        let rec = recursive.iter_batched(|| recursive_fast(black_box(values), black_box(target)));
        debug!(
            size,
            batch,
            iterative_us = it.per_call_us,
            recursive_us = rec.per_call_us,
            "batch complete"
        );
    }

    let iterative = iterative.finish();
    let recursive = recursive.finish();

    let it_stats = compute_summary(&iterative.time_samples_us())?;
    let rec_stats = compute_summary(&recursive.time_samples_us())?;

    info!(
        size,
        iterative_avg_us = it_stats.avg,
        recursive_avg_us = rec_stats.avg,
        "completed benchmark for size"
    );

    Ok(PerformanceRecord {
        size,
        iterative_time_avg: it_stats.avg,
        recursive_time_avg: rec_stats.avg,
        iterative_comparisons: iterative.mean_comparisons(),
        recursive_comparisons: recursive.mean_comparisons(),
        iterative_time_std_dev: it_stats.std_dev,
        recursive_time_std_dev: rec_stats.std_dev,
        iterative_min_time: it_stats.min,
        iterative_max_time: it_stats.max,
        recursive_min_time: rec_stats.min,
        recursive_max_time: rec_stats.max,
        theoretical_comparisons: theoretical_comparisons(size),
        memory_estimate: format_memory_estimate(size as u64 * BYTES_PER_ELEMENT),
    })
}
