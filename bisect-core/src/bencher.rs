//! Batch Sampler
//!
//! Criterion-style batched sampling: many consecutive calls run inside one
//! timing window and the per-call average of that window becomes a single
//! statistical sample. A single search at 1e8 elements costs well under a
//! microsecond, which is close to the timer floor, so averaging over a batch
//! keeps quantization error small and lets the spread be estimated across
//! batches rather than across individual noisy calls.

use crate::error::BenchError;
use crate::measure::Timer;
use std::hint::black_box;

/// Default number of untimed warm-up rounds
pub const DEFAULT_WARMUP_ROUNDS: usize = 1_000;

/// Default number of batches per array size
pub const DEFAULT_BATCHES: usize = 20;

/// Default calls per batch
pub const DEFAULT_RUNS_PER_BATCH: usize = 1_000;

/// One batch reduced to a per-call estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchSample {
    /// Whole timing window in nanoseconds (clamped to at least 1)
    pub elapsed_ns: u64,
    /// Window divided by calls, in microseconds
    pub per_call_us: f64,
    /// Comparison counts summed over the batch, divided by calls
    pub avg_comparisons: f64,
}

/// Collected batches for one kernel
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// One entry per batch, in run order
    pub samples: Vec<BatchSample>,
}

impl BatchResult {
    /// Per-call time estimates, one per batch
    pub fn time_samples_us(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.per_call_us).collect()
    }

    /// Mean comparisons per call across batches
    pub fn mean_comparisons(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.avg_comparisons).sum::<f64>() / self.samples.len() as f64
    }
}

/// Runs fixed-size batches of a comparison-counting closure
#[derive(Debug)]
pub struct BatchSampler {
    runs_per_batch: u64,
    samples: Vec<BatchSample>,
}

impl BatchSampler {
    /// Create a sampler running `runs_per_batch` calls per timing window
    pub fn new(runs_per_batch: usize, expected_batches: usize) -> Result<Self, BenchError> {
        if runs_per_batch == 0 {
            return Err(BenchError::ZeroRunsPerBatch);
        }
        Ok(Self {
            runs_per_batch: runs_per_batch as u64,
            samples: Vec::with_capacity(expected_batches),
        })
    }

    /// Run one batch inside a single timing window and record it
    ///
    /// `f` returns the comparison count of one call.
    #[inline]
    pub fn iter_batched<F>(&mut self, mut f: F) -> BatchSample
    where
        F: FnMut() -> u32,
    {
        let mut comparisons: u64 = 0;

        let timer = Timer::start();
        for _ in 0..self.runs_per_batch {
            comparisons += u64::from(black_box(f()));
        }
        let elapsed_ns = timer.stop_nanos();

        let runs = self.runs_per_batch as f64;
        let sample = BatchSample {
            elapsed_ns,
            per_call_us: (elapsed_ns as f64 / runs) / 1_000.0,
            avg_comparisons: comparisons as f64 / runs,
        };

        self.samples.push(sample);
        sample
    }

    /// Batches recorded so far
    pub fn samples(&self) -> &[BatchSample] {
        &self.samples
    }

    /// Finalize and return results
    pub fn finish(self) -> BatchResult {
        BatchResult {
            samples: self.samples,
        }
    }
}

/// Run `f` for `rounds` untimed rounds, discarding its output
pub fn warm_up<T, F>(rounds: usize, mut f: F)
where
    F: FnMut() -> T,
{
    for _ in 0..rounds {
        black_box(f());
    }
}
