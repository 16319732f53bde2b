#![warn(missing_docs)]
//! Bisect Report - Reporting
//!
//! Generates output formats for benchmark and profile results:
//! - JSON (machine-readable)
//! - CSV (spreadsheet-compatible)
//! - Human-readable terminal tables

mod csv;
mod human;
mod json;
mod report;

pub use csv::{generate_csv_report, generate_search_csv};
pub use human::{format_human_output, format_search_output};
pub use json::generate_json_report;
pub use report::{
    Report, ReportConfig, ReportMeta, SCHEMA_VERSION, SpeedupEntry, SystemInfo,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable terminal output
    #[default]
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Human => "human",
        };
        f.write_str(name)
    }
}

/// Render `report` in the requested format
pub fn render_report(report: &Report, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Csv => Ok(generate_csv_report(report)),
        OutputFormat::Human => Ok(format_human_output(report)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bisect_core::{
        DetailedMetrics, PerformanceRecord, ProfileConfig, format_memory_estimate,
        run_detailed_profile, theoretical_comparisons,
    };
    use chrono::{TimeZone, Utc};

    pub(crate) fn sample_record(size: usize) -> PerformanceRecord {
        PerformanceRecord {
            size,
            iterative_time_avg: 2.0,
            recursive_time_avg: 3.0,
            iterative_comparisons: 7.0,
            recursive_comparisons: 7.0,
            iterative_time_std_dev: 0.1,
            recursive_time_std_dev: 0.2,
            iterative_min_time: 1.9,
            iterative_max_time: 2.2,
            recursive_min_time: 2.8,
            recursive_max_time: 3.3,
            theoretical_comparisons: theoretical_comparisons(size),
            memory_estimate: format_memory_estimate(size as u64 * 8),
        }
    }

    pub(crate) fn sample_profile() -> DetailedMetrics {
        run_detailed_profile(64, &ProfileConfig::new(10).with_seed(11)).unwrap()
    }

    pub(crate) fn sample_report(
        benchmarks: Vec<PerformanceRecord>,
        profile: Option<DetailedMetrics>,
    ) -> Report {
        let meta = ReportMeta {
            schema_version: SCHEMA_VERSION,
            version: "0.1.0".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            git_commit: None,
            git_branch: None,
            system: SystemInfo {
                os: "linux".to_string(),
                arch: "x86_64".to_string(),
                cpu: "Test CPU".to_string(),
                cpu_cores: 4,
                memory_gb: 8.0,
            },
            config: ReportConfig {
                served_by: "local".to_string(),
                ..ReportConfig::default()
            },
        };
        Report::new(meta, benchmarks, profile)
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("html".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_speedups_derived() {
        let mut slow_rec = sample_record(100);
        let mut fast_rec = sample_record(1000);
        fast_rec.recursive_time_avg = 1.0;
        slow_rec.recursive_time_avg = 4.0;

        let report = sample_report(vec![slow_rec, fast_rec], None);
        assert_eq!(report.speedups.len(), 2);
        assert_eq!(report.speedups[0].faster, "iterative");
        assert!((report.speedups[0].factor() - 2.0).abs() < 1e-12);
        assert_eq!(report.speedups[1].faster, "recursive");
        assert!((report.speedups[1].factor() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_json_report() {
        let report = sample_report(vec![sample_record(100)], Some(sample_profile()));
        let json = render_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["meta"]["schema_version"], SCHEMA_VERSION);
        assert_eq!(value["benchmarks"][0]["theoreticalComparisons"], 7);
        assert_eq!(value["speedups"][0]["faster"], "iterative");
        assert_eq!(value["profile"]["arraySize"], 64);
    }
}
