#![warn(missing_docs)]
//! Bisect Core - Measurement Engine
//!
//! This crate compares iterative and recursive binary search:
//! - Search kernels, instrumented (probe traces) and fast (comparison counts)
//! - `BatchSampler` for Criterion-style batched timing with warm-up
//! - The benchmark orchestrator (one `PerformanceRecord` per array size)
//! - The detailed profiler (percentiles, best/worst case, recursion depth)
//!
//! Everything runs synchronously on the calling thread.

mod array;
mod bencher;
mod error;
mod kernels;
mod measure;
mod orchestrator;
mod outcome;
mod profiler;

pub use array::{BYTES_PER_ELEMENT, SortedArray, check_ascending, generate_sorted_array};
pub use bencher::{
    BatchResult, BatchSample, BatchSampler, DEFAULT_BATCHES, DEFAULT_RUNS_PER_BATCH,
    DEFAULT_WARMUP_ROUNDS, warm_up,
};
pub use error::BenchError;
pub use kernels::{
    iterative_fast, max_probes, recursive_fast, run_search, search_iterative, search_recursive,
    search_with,
};
pub use measure::{MIN_ELAPSED_NS, Timer, clamp_elapsed_ns, pin_to_cpu};
pub use orchestrator::{
    BenchmarkConfig, PerformanceRecord, format_memory_estimate, run_benchmark,
    run_benchmark_with, theoretical_comparisons, validate_sizes,
};
pub use outcome::{KernelKind, RecursiveStep, SearchOutcome, SearchStep, SearchTrace};
pub use profiler::{
    DEFAULT_PROFILE_ITERATIONS, DetailedMetrics, KernelProfile, MemoryEstimate, ProfileConfig,
    TargetRegime, TheoreticalReference, regime_counts, run_detailed_profile,
};
