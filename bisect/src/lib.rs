#![warn(missing_docs)]
//! # Bisect
//!
//! Statistical comparison of iterative and recursive binary search.
//!
//! - **Search kernels**: instrumented (probe trace, timing, recursion depth)
//!   and fast (comparison count only) variants of both algorithms
//! - **Batched benchmarks**: warm-up, Criterion-style timing windows, and a
//!   mean/stddev/min/max reduction per kernel per array size
//! - **Detailed profile**: individually timed trials over middle, absent and
//!   random targets with nearest-rank percentiles
//! - **Remote substitute**: an HTTP backend can serve the same requests, with
//!   automatic local fallback
//!
//! ## Quick Start
//!
//! ```
//! use bisect::{BenchmarkConfig, KernelKind, generate_sorted_array, run_benchmark, run_search};
//!
//! let array = generate_sorted_array(1_000).unwrap();
//! let outcome = run_search(&array, 500, KernelKind::Recursive).unwrap();
//! assert_eq!(outcome.index, Some(499));
//!
//! let records = run_benchmark(&[100], &BenchmarkConfig::new(5, 50)).unwrap();
//! assert_eq!(records[0].theoretical_comparisons, 7);
//! ```

// Re-export core types
pub use bisect_core::{
    BenchError, BenchmarkConfig, DetailedMetrics, KernelKind, KernelProfile, MemoryEstimate,
    PerformanceRecord, ProfileConfig, RecursiveStep, SearchOutcome, SearchStep, SearchTrace,
    SortedArray, TheoreticalReference, generate_sorted_array, run_benchmark, run_benchmark_with,
    run_detailed_profile, run_search,
};

// Re-export stats
pub use bisect_stats::{
    DetailedSummary, Percentiles, StatsError, StatsSummary, compute_detailed_summary,
    compute_summary,
};

// Re-export remote
pub use bisect_remote::{
    HttpSubstitute, RemoteError, SearchService, SearchSubstitute, Served, Strategy,
    select_strategy,
};

// Re-export reporting
pub use bisect_report::{OutputFormat, Report, render_report};

// Re-export CLI entry points
pub use bisect_cli::{BisectConfig, Cli, run, run_with_cli};
