//! CSV Output
//!
//! One row per benchmarked size. When a profile is present it follows as a
//! second table, separated by a blank line, with one row per kernel.

use crate::report::Report;
use bisect_core::{KernelProfile, SearchOutcome, SearchTrace};
use std::fmt::Write;

const BENCHMARK_HEADER: &str = "size,iterative_time_avg_us,recursive_time_avg_us,\
iterative_comparisons,recursive_comparisons,iterative_time_std_dev_us,\
recursive_time_std_dev_us,iterative_min_time_us,iterative_max_time_us,\
recursive_min_time_us,recursive_max_time_us,theoretical_comparisons,\
memory_estimate,speedup";

const PROFILE_HEADER: &str = "kernel,array_size,iterations,avg_us,std_dev_us,min_us,max_us,\
median_us,p95_us,p99_us,avg_comparisons,best_case_comparisons,worst_case_comparisons";

const SEARCH_HEADER: &str = "kernel,step,left,right,mid,comparing,depth";

/// Generate CSV for a report
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::new();

    if !report.benchmarks.is_empty() {
        output.push_str(BENCHMARK_HEADER);
        output.push('\n');
        for record in &report.benchmarks {
            let _ = writeln!(
                output,
                "{},{:.6},{:.6},{:.2},{:.2},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{},\"{}\",{:.4}",
                record.size,
                record.iterative_time_avg,
                record.recursive_time_avg,
                record.iterative_comparisons,
                record.recursive_comparisons,
                record.iterative_time_std_dev,
                record.recursive_time_std_dev,
                record.iterative_min_time,
                record.iterative_max_time,
                record.recursive_min_time,
                record.recursive_max_time,
                record.theoretical_comparisons,
                record.memory_estimate,
                record.recursive_overhead(),
            );
        }
    }

    if let Some(profile) = &report.profile {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(PROFILE_HEADER);
        output.push('\n');
        for (kernel, kp) in [
            ("iterative", &profile.iterative),
            ("recursive", &profile.recursive),
        ] {
            profile_row(&mut output, kernel, profile.array_size, profile.iterations, kp);
        }
    }

    output
}

fn profile_row(
    output: &mut String,
    kernel: &str,
    array_size: usize,
    iterations: usize,
    kp: &KernelProfile,
) {
    let s = &kp.time.summary;
    let p = &kp.time.percentiles;
    let _ = writeln!(
        output,
        "{},{},{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.2},{},{}",
        kernel,
        array_size,
        iterations,
        s.avg,
        s.std_dev,
        s.min,
        s.max,
        p.median,
        p.p95,
        p.p99,
        kp.avg_comparisons,
        kp.best_case_comparisons,
        kp.worst_case_comparisons,
    );
}

/// Generate CSV of the probe steps of one or more search outcomes
pub fn generate_search_csv(outcomes: &[SearchOutcome]) -> String {
    let mut output = String::from(SEARCH_HEADER);
    output.push('\n');

    for outcome in outcomes {
        let kind = outcome.kind();
        let depths: Vec<Option<u32>> = match &outcome.trace {
            SearchTrace::Iterative { steps } => vec![None; steps.len()],
            SearchTrace::Recursive { steps, .. } => {
                steps.iter().map(|s| Some(s.depth)).collect()
            }
        };
        for (i, (step, depth)) in outcome.steps().iter().zip(depths).enumerate() {
            let depth = depth.map(|d| d.to_string()).unwrap_or_default();
            let _ = writeln!(
                output,
                "{},{},{},{},{},{},{}",
                kind,
                i + 1,
                step.left,
                step.right,
                step.mid,
                step.comparing,
                depth
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{sample_profile, sample_record, sample_report};
    use bisect_core::{search_iterative, search_recursive};

    #[test]
    fn test_benchmark_rows() {
        let report = sample_report(vec![sample_record(100), sample_record(1000)], None);
        let csv = generate_csv_report(&report);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("size,"));
        assert_eq!(lines[0].split(',').count(), lines[1].split(',').count());
        assert!(lines[1].starts_with("100,"));
        assert!(lines[1].contains("\"0.78 KB\""));
    }

    #[test]
    fn test_profile_table_follows() {
        let report = sample_report(vec![sample_record(10)], Some(sample_profile()));
        let csv = generate_csv_report(&report);

        let tables: Vec<&str> = csv.split("\n\n").collect();
        assert_eq!(tables.len(), 2);
        assert!(tables[1].starts_with("kernel,"));
        assert!(tables[1].contains("\niterative,"));
        assert!(tables[1].contains("\nrecursive,"));
    }

    #[test]
    fn test_profile_only() {
        let report = sample_report(Vec::new(), Some(sample_profile()));
        let csv = generate_csv_report(&report);
        assert!(csv.starts_with("kernel,"));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_search_steps() {
        let a: Vec<i64> = (1..=10).collect();
        let csv = generate_search_csv(&[search_iterative(&a, 1), search_recursive(&a, 1)]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], SEARCH_HEADER);
        assert_eq!(lines[1], "iterative,1,0,9,4,5,");
        assert!(lines.iter().any(|l| *l == "recursive,1,0,9,4,5,0"));
    }
}
