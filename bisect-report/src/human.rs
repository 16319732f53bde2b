//! Human-readable Output
//!
//! Terminal tables for benchmark records, the speedup summary, the detailed
//! profile and single search traces. All times are microseconds per call.

use crate::report::Report;
use bisect_core::{KernelProfile, SearchOutcome, SearchTrace};
use std::fmt::Write;

const RULE: usize = 78;

/// Format a report for terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Bisect Results\n");
    output.push_str(&"=".repeat(RULE));
    output.push_str("\n\n");

    if !report.benchmarks.is_empty() {
        output.push_str("Benchmark (µs per call)\n");
        output.push_str(&"-".repeat(RULE));
        output.push('\n');
        let _ = writeln!(
            output,
            "  {:>11}  {:>10}  {:>10}  {:>10}  {:>10}  {:>7}  {:>6}  {:>10}",
            "size", "iter avg", "rec avg", "iter sd", "rec sd", "comps", "log2", "memory"
        );
        for r in &report.benchmarks {
            let _ = writeln!(
                output,
                "  {:>11}  {:>10.4}  {:>10.4}  {:>10.4}  {:>10.4}  {:>7.1}  {:>6}  {:>10}",
                r.size,
                r.iterative_time_avg,
                r.recursive_time_avg,
                r.iterative_time_std_dev,
                r.recursive_time_std_dev,
                r.iterative_comparisons,
                r.theoretical_comparisons,
                r.memory_estimate
            );
            let _ = writeln!(
                output,
                "  {:>11}  min {:.4} / max {:.4} (iter)   min {:.4} / max {:.4} (rec)",
                "",
                r.iterative_min_time,
                r.iterative_max_time,
                r.recursive_min_time,
                r.recursive_max_time
            );
        }
        output.push('\n');
    }

    if !report.speedups.is_empty() {
        output.push_str("Speedup\n");
        output.push_str(&"-".repeat(RULE));
        output.push('\n');
        for s in &report.speedups {
            let verdict = match s.faster.as_str() {
                "tie" => "no measurable difference".to_string(),
                faster => format!("{} faster by {:.2}x", faster, s.factor()),
            };
            let _ = writeln!(output, "  {:>11}  {}", s.size, verdict);
        }
        output.push('\n');
    }

    if let Some(profile) = &report.profile {
        let _ = writeln!(
            output,
            "Detailed profile: {} elements, {} trials",
            profile.array_size, profile.iterations
        );
        output.push_str(&"-".repeat(RULE));
        output.push('\n');
        write_kernel_profile(&mut output, "iterative", &profile.iterative);
        write_kernel_profile(&mut output, "recursive", &profile.recursive);
        let _ = writeln!(
            output,
            "  theoretical: log2(n) = {:.2}, expected comparisons {}",
            profile.theoretical.log_n, profile.theoretical.expected_comparisons
        );
        let _ = writeln!(
            output,
            "  memory: array {} bytes, stack depth {} (iter) / {} (rec)",
            profile.memory_estimate.array_bytes,
            profile.memory_estimate.iterative_stack_depth,
            profile.memory_estimate.recursive_stack_depth
        );
        output.push('\n');
    }

    let _ = writeln!(
        output,
        "served by {}, bisect {} at {}",
        report.meta.config.served_by,
        report.meta.version,
        report.meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );

    output
}

fn write_kernel_profile(output: &mut String, name: &str, kp: &KernelProfile) {
    let s = &kp.time.summary;
    let p = &kp.time.percentiles;
    let _ = writeln!(output, "  {}", name);
    let _ = writeln!(
        output,
        "      mean: {:.4} µs  stddev: {:.4} µs  min: {:.4} µs  max: {:.4} µs",
        s.avg, s.std_dev, s.min, s.max
    );
    let _ = writeln!(
        output,
        "      median: {:.4} µs  p95: {:.4} µs  p99: {:.4} µs",
        p.median, p.p95, p.p99
    );
    let _ = writeln!(
        output,
        "      comparisons: avg {:.2}  best {}  worst {}",
        kp.avg_comparisons, kp.best_case_comparisons, kp.worst_case_comparisons
    );
}

/// Format search outcomes with their probe steps
pub fn format_search_output(outcomes: &[SearchOutcome]) -> String {
    let mut output = String::new();

    for outcome in outcomes {
        let kind = outcome.kind();
        output.push('\n');
        match outcome.index {
            Some(index) => {
                let _ = writeln!(output, "{}: found at index {}", kind, index);
            }
            None => {
                let _ = writeln!(output, "{}: not found", kind);
            }
        }
        output.push_str(&"-".repeat(RULE));
        output.push('\n');

        let depths: Vec<String> = match &outcome.trace {
            SearchTrace::Iterative { steps } => vec![String::new(); steps.len()],
            SearchTrace::Recursive { steps, .. } => steps
                .iter()
                .map(|s| format!("depth {}", s.depth))
                .collect(),
        };
        for (i, (step, depth)) in outcome.steps().iter().zip(depths).enumerate() {
            let _ = writeln!(
                output,
                "  {:>3}. left={:<10} right={:<10} mid={:<10} a[mid]={:<12} {}",
                i + 1,
                step.left,
                step.right,
                step.mid,
                step.comparing,
                depth
            );
        }

        let _ = write!(
            output,
            "  comparisons: {}  time: {:.3} µs",
            outcome.comparisons,
            outcome.execution_time_us()
        );
        if let Some(depth) = outcome.max_depth() {
            let _ = write!(output, "  max depth: {}", depth);
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{sample_profile, sample_record, sample_report};
    use bisect_core::{search_iterative, search_recursive};

    #[test]
    fn test_benchmark_section() {
        let report = sample_report(vec![sample_record(100)], None);
        let text = format_human_output(&report);

        assert!(text.contains("Bisect Results"));
        assert!(text.contains("Benchmark (µs per call)"));
        assert!(text.contains("0.78 KB"));
        assert!(text.contains("iterative faster by 1.50x"));
        assert!(!text.contains("Detailed profile"));
    }

    #[test]
    fn test_profile_section() {
        let report = sample_report(Vec::new(), Some(sample_profile()));
        let text = format_human_output(&report);

        assert!(text.contains("Detailed profile: 64 elements, 10 trials"));
        assert!(text.contains("expected comparisons 6"));
        assert!(text.contains("stack depth 1 (iter)"));
        assert!(!text.contains("Speedup"));
    }

    #[test]
    fn test_search_trace() {
        let a: Vec<i64> = (1..=10).collect();
        let text = format_search_output(&[search_iterative(&a, 11), search_recursive(&a, 4)]);

        assert!(text.contains("iterative: not found"));
        assert!(text.contains("recursive: found at index 3"));
        assert!(text.contains("depth 0"));
        assert!(text.contains("max depth:"));
    }
}
