//! Detailed Profiler
//!
//! Times individual instrumented calls at a single array size across three
//! target regimes:
//! - 20% middle element (near best case)
//! - 20% `size + 1` (always absent, worst-case shaped)
//! - 60% uniform in `[1, size]`
//!
//! All trials are pooled per kernel before reduction.

use crate::array::{BYTES_PER_ELEMENT, SortedArray};
use crate::error::BenchError;
use crate::kernels::{search_iterative, search_recursive};
use crate::orchestrator::theoretical_comparisons;
use bisect_stats::{DetailedSummary, compute_detailed_summary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default number of profiled trials
pub const DEFAULT_PROFILE_ITERATIONS: usize = 1_000;

/// Profiler settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Total trials across all regimes
    pub iterations: usize,
    /// Seed for the random regime; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_PROFILE_ITERATIONS,
            seed: None,
        }
    }
}

impl ProfileConfig {
    /// Config with `iterations` trials and an entropy-seeded RNG
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            seed: None,
        }
    }

    /// Fix the random-regime seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// How a trial's target is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRegime {
    /// `a[size / 2]`
    Middle,
    /// `size + 1`
    Absent,
    /// Uniform in `[1, size]`
    Random,
}

/// Split `iterations` into (middle, absent, random) trial counts
pub fn regime_counts(iterations: usize) -> [(TargetRegime, usize); 3] {
    let fifth = iterations / 5;
    [
        (TargetRegime::Middle, fifth),
        (TargetRegime::Absent, fifth),
        (TargetRegime::Random, iterations - 2 * fifth),
    ]
}

/// Timing and comparison profile of one kernel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KernelProfile {
    /// Per-call time in microseconds
    pub time: DetailedSummary,
    pub avg_comparisons: f64,
    pub worst_case_comparisons: u32,
    pub best_case_comparisons: u32,
}

/// Reference values from complexity analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TheoreticalReference {
    /// `log2(size)`, not rounded
    #[serde(rename = "logN")]
    pub log_n: f64,
    /// `ceil(log2(size))`
    pub expected_comparisons: u32,
}

/// Memory footprint estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEstimate {
    pub array_bytes: u64,
    /// Always 1: the loop runs in a single frame
    pub iterative_stack_depth: u32,
    /// Deepest recursion observed across all trials
    pub recursive_stack_depth: u32,
}

/// Full profile at one array size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedMetrics {
    pub array_size: usize,
    pub iterations: usize,
    pub iterative: KernelProfile,
    pub recursive: KernelProfile,
    pub theoretical: TheoreticalReference,
    pub memory_estimate: MemoryEstimate,
}

/// Samples pooled for one kernel
#[derive(Default)]
struct TrialSamples {
    times_us: Vec<f64>,
    comparisons: Vec<u32>,
}

impl TrialSamples {
    fn with_capacity(n: usize) -> Self {
        Self {
            times_us: Vec::with_capacity(n),
            comparisons: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, time_us: f64, comparisons: u32) {
        self.times_us.push(time_us);
        self.comparisons.push(comparisons);
    }

    fn reduce(&self) -> Result<KernelProfile, BenchError> {
        let time = compute_detailed_summary(&self.times_us)?;
        let total: u64 = self.comparisons.iter().map(|&c| u64::from(c)).sum();
        Ok(KernelProfile {
            time,
            avg_comparisons: total as f64 / self.comparisons.len() as f64,
            worst_case_comparisons: self.comparisons.iter().copied().max().unwrap_or(0),
            best_case_comparisons: self.comparisons.iter().copied().min().unwrap_or(0),
        })
    }
}

/// Profile both instrumented kernels at `array_size`
pub fn run_detailed_profile(
    array_size: usize,
    config: &ProfileConfig,
) -> Result<DetailedMetrics, BenchError> {
    if config.iterations == 0 {
        return Err(BenchError::ZeroIterations);
    }
    let array = SortedArray::generate(array_size)?;
    let middle = array[array_size / 2];
    let absent = array_size as i64 + 1;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut iterative = TrialSamples::with_capacity(config.iterations);
    let mut recursive = TrialSamples::with_capacity(config.iterations);
    let mut max_depth = 0u32;

    for (regime, trials) in regime_counts(config.iterations) {
        debug!(array_size, ?regime, trials, "profiling regime");
        for _ in 0..trials {
            let target = match regime {
                TargetRegime::Middle => middle,
                TargetRegime::Absent => absent,
                TargetRegime::Random => rng.gen_range(1..=array_size as i64),
            };

            let it = search_iterative(&array, target);
            iterative.push(it.execution_time_us(), it.comparisons);

            let rec = search_recursive(&array, target);
            recursive.push(rec.execution_time_us(), rec.comparisons);
            max_depth = max_depth.max(rec.max_depth().unwrap_or(0));
        }
    }

    let metrics = DetailedMetrics {
        array_size,
        iterations: config.iterations,
        iterative: iterative.reduce()?,
        recursive: recursive.reduce()?,
        theoretical: TheoreticalReference {
            log_n: (array_size as f64).log2(),
            expected_comparisons: theoretical_comparisons(array_size),
        },
        memory_estimate: MemoryEstimate {
            array_bytes: array_size as u64 * BYTES_PER_ELEMENT,
            iterative_stack_depth: 1,
            recursive_stack_depth: max_depth,
        },
    };

    info!(
        array_size,
        iterations = config.iterations,
        max_depth,
        "completed detailed profile"
    );
    Ok(metrics)
}
