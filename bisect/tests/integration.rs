//! Integration tests for Bisect
//!
//! End-to-end behavior of the kernels, reducer, orchestrator, profiler and
//! remote fallback through the public facade.

use bisect::{
    BenchError, BenchmarkConfig, KernelKind, PerformanceRecord, ProfileConfig, RemoteError,
    SearchOutcome, SearchService, SearchSubstitute, StatsError, Strategy, compute_detailed_summary,
    compute_summary, generate_sorted_array, run_benchmark, run_detailed_profile, run_search,
};
use std::ops::ControlFlow;

fn ceil_log2_plus_one(n: usize) -> u32 {
    ((n + 1) as f64).log2().ceil() as u32
}

/// Present targets are found by both kernels at the right position
#[test]
fn test_present_targets_found() {
    let array = generate_sorted_array(10_000).unwrap();
    for target in [1, 2, 4999, 5000, 5001, 9999, 10_000] {
        for kind in KernelKind::ALL {
            let outcome = run_search(&array, target, kind).unwrap();
            assert!(outcome.found, "{kind} missed {target}");
            let index = outcome.index.unwrap();
            assert_eq!(array[index], target);
        }
    }
}

/// Absent targets report not found, with -1 on the wire
#[test]
fn test_absent_targets() {
    let array = generate_sorted_array(1000).unwrap();
    for target in [0, -7, 1001, i64::MAX, i64::MIN] {
        for kind in KernelKind::ALL {
            let outcome = run_search(&array, target, kind).unwrap();
            assert!(!outcome.found);
            assert_eq!(outcome.index, None);
            assert_eq!(outcome.index_or_sentinel(), -1);
        }
    }
}

/// Comparison counts are bounded and identical across kernels
#[test]
fn test_comparison_bounds_and_agreement() {
    for n in [1usize, 2, 3, 10, 100, 1023, 1024, 1025, 100_000] {
        let array = generate_sorted_array(n).unwrap();
        let bound = ceil_log2_plus_one(n);
        for target in [0, 1, (n / 2) as i64, n as i64, n as i64 + 1] {
            let it = run_search(&array, target, KernelKind::Iterative).unwrap();
            let rec = run_search(&array, target, KernelKind::Recursive).unwrap();
            assert!(it.comparisons <= bound, "n={n} t={target}");
            assert_eq!(it.comparisons, rec.comparisons, "n={n} t={target}");
            assert_eq!(it.comparisons as usize, it.step_count());
        }
    }
}

/// Recursive depth is one less than the step count when found, equal when not
#[test]
fn test_recursive_depth_relation() {
    let n = 100_000;
    let array = generate_sorted_array(n).unwrap();
    let bound = ceil_log2_plus_one(n) + 1;

    let found = run_search(&array, 12_345, KernelKind::Recursive).unwrap();
    assert_eq!(found.max_depth(), Some(found.step_count() as u32 - 1));

    let missing = run_search(&array, n as i64 + 10, KernelKind::Recursive).unwrap();
    assert_eq!(missing.max_depth(), Some(missing.step_count() as u32));
    assert!(missing.max_depth().unwrap() <= bound);

    let iterative = run_search(&array, 12_345, KernelKind::Iterative).unwrap();
    assert_eq!(iterative.max_depth(), None);
}

/// Repeated searches agree on everything but timing
#[test]
fn test_search_idempotent() {
    let array = generate_sorted_array(4096).unwrap();
    for kind in KernelKind::ALL {
        let a = run_search(&array, 3000, kind).unwrap();
        let b = run_search(&array, 3000, kind).unwrap();
        assert_eq!((a.found, a.index, a.comparisons), (b.found, b.index, b.comparisons));
    }
}

/// Empty input is a miss with zero comparisons
#[test]
fn test_empty_array() {
    for kind in KernelKind::ALL {
        let outcome = run_search(&[], 1, kind).unwrap();
        assert!(!outcome.found);
        assert_eq!(outcome.comparisons, 0);
        assert_eq!(outcome.step_count(), 0);
    }
}

/// Unsorted input is rejected before searching
#[test]
fn test_unsorted_rejected() {
    let err = run_search(&[1, 5, 5, 9], 5, KernelKind::Iterative).unwrap_err();
    assert_eq!(err, BenchError::NotAscending { index: 1 });
}

/// Reducer invariants
#[test]
fn test_reducer_properties() {
    let samples = [3.5, 1.25, 9.0, 4.0, 2.75];
    let s = compute_summary(&samples).unwrap();
    assert!(s.min <= s.avg && s.avg <= s.max);

    let constant = compute_summary(&[2.0; 16]).unwrap();
    assert_eq!(constant.std_dev, 0.0);

    let detailed = compute_detailed_summary(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    assert_eq!(detailed.percentiles.median, 3.0);

    assert_eq!(compute_summary(&[]), Err(StatsError::EmptySampleSet));
}

/// Orchestrator scenario: one size, small batches
#[test]
fn test_benchmark_single_size() {
    let records = run_benchmark(&[100], &BenchmarkConfig::new(5, 50)).unwrap();
    assert_eq!(records.len(), 1);

    let r = &records[0];
    assert_eq!(r.size, 100);
    assert_eq!(r.theoretical_comparisons, 7);
    assert!(r.iterative_time_avg > 0.0);
    assert!(r.recursive_time_avg > 0.0);
    assert_eq!(r.memory_estimate, "0.78 KB");
}

/// Cancellation between sizes keeps the finished records
#[test]
fn test_benchmark_cancellation() {
    let config = BenchmarkConfig {
        batches: 1,
        runs_per_batch: 1,
        warmup_rounds: 0,
    };
    let records = bisect::run_benchmark_with(&[10, 100, 1000], &config, |position, _| {
        if position < 1 {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    })
    .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].size, 10);
}

/// Profiler scenario: one million elements
#[test]
fn test_profile_million() {
    let metrics = run_detailed_profile(1_000_000, &ProfileConfig::new(1000)).unwrap();
    assert_eq!(metrics.theoretical.expected_comparisons, 20);
    assert_eq!(metrics.memory_estimate.array_bytes, 8_000_000);
    assert_eq!(metrics.memory_estimate.iterative_stack_depth, 1);
    assert!(metrics.memory_estimate.recursive_stack_depth <= 21);

    let time = &metrics.iterative.time;
    assert!(time.summary.min <= time.percentiles.median);
    assert!(time.percentiles.median <= time.percentiles.p95);
    assert!(time.percentiles.p95 <= time.percentiles.p99);
    assert!(time.percentiles.p99 <= time.summary.max);
}

/// Invalid parameters fail fast with the shared message prefix
#[test]
fn test_invalid_parameters() {
    let errors = [
        run_benchmark(&[], &BenchmarkConfig::default()).unwrap_err(),
        run_benchmark(&[0], &BenchmarkConfig::default()).unwrap_err(),
        run_benchmark(&[10], &BenchmarkConfig::new(0, 10)).unwrap_err(),
        run_detailed_profile(10, &ProfileConfig::new(0)).unwrap_err(),
        generate_sorted_array(0).unwrap_err(),
    ];
    for err in errors {
        assert!(
            err.to_string()
                .starts_with("cannot run benchmark with invalid parameters"),
            "{err}"
        );
    }
}

/// Substitute that reports healthy and then refuses every request
struct Unreachable;

impl SearchSubstitute for Unreachable {
    fn search(&self, _: KernelKind, _: &[i64], _: i64) -> Result<SearchOutcome, RemoteError> {
        Err(RemoteError::Transport("connection refused".into()))
    }

    fn performance(
        &self,
        _: &[usize],
        _: &BenchmarkConfig,
    ) -> Result<Vec<PerformanceRecord>, RemoteError> {
        Err(RemoteError::Transport("connection refused".into()))
    }

    fn is_healthy(&self) -> bool {
        true
    }
}

/// A failing substitute yields the local outcome
#[test]
fn test_remote_failure_falls_back() {
    let service = SearchService::with_substitute(Box::new(Unreachable));
    assert_eq!(service.strategy(), Strategy::Remote);

    let array = generate_sorted_array(500).unwrap();
    let local = run_search(&array, 321, KernelKind::Recursive).unwrap();
    let served = service.search(&array, 321, KernelKind::Recursive).unwrap();

    assert_eq!(served.via, Strategy::Local);
    assert_eq!(served.value.index, local.index);
    assert_eq!(served.value.comparisons, local.comparisons);
    assert_eq!(served.value.max_depth(), local.max_depth());
}

/// No probe means local-only
#[test]
fn test_no_probe_is_local() {
    assert_eq!(bisect::select_strategy(None), Strategy::Local);
    let service = SearchService::local();
    let records = service
        .run_benchmark(&[100], &BenchmarkConfig::new(2, 10))
        .unwrap();
    assert_eq!(records.via, Strategy::Local);
    assert_eq!(records.value.len(), 1);
}

/// A report renders in every output format
#[test]
fn test_report_formats() {
    use bisect::{OutputFormat, Report, render_report};

    let records = run_benchmark(&[100, 1000], &BenchmarkConfig::new(2, 10)).unwrap();
    let profile = run_detailed_profile(1000, &ProfileConfig::new(20).with_seed(9)).unwrap();
    let meta = bisect_cli::build_report_meta(bisect_report::ReportConfig::default());
    let report = Report::new(meta, records, Some(profile));

    let json: serde_json::Value =
        serde_json::from_str(&render_report(&report, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(json["benchmarks"].as_array().unwrap().len(), 2);
    assert_eq!(json["speedups"].as_array().unwrap().len(), 2);

    let csv = render_report(&report, OutputFormat::Csv).unwrap();
    assert!(csv.starts_with("size,"));

    let human = render_report(&report, OutputFormat::Human).unwrap();
    assert!(human.contains("Detailed profile: 1000 elements, 20 trials"));
}
