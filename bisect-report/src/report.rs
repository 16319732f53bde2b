//! Report Data Structures

use bisect_core::{BenchmarkConfig, DetailedMetrics, PerformanceRecord, ProfileConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of the JSON layout below
pub const SCHEMA_VERSION: u32 = 1;

/// Complete measurement report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    /// One record per benchmarked size, in request order
    pub benchmarks: Vec<PerformanceRecord>,
    /// Iterative vs recursive ratio per benchmarked size
    pub speedups: Vec<SpeedupEntry>,
    pub profile: Option<DetailedMetrics>,
}

impl Report {
    /// Assemble a report and derive the speedup table from `benchmarks`
    pub fn new(
        meta: ReportMeta,
        benchmarks: Vec<PerformanceRecord>,
        profile: Option<DetailedMetrics>,
    ) -> Self {
        let speedups = benchmarks.iter().map(SpeedupEntry::from).collect();
        Self {
            meta,
            benchmarks,
            speedups,
            profile,
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub git_commit: Option<String>,
    pub git_branch: Option<String>,
    pub system: SystemInfo,
    pub config: ReportConfig,
}

/// Run configuration captured in report metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// `"local"` or `"remote"`
    pub served_by: String,
    pub benchmark: Option<BenchmarkConfig>,
    pub profile: Option<ProfileConfig>,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
    pub memory_gb: f64,
}

/// Which kernel was faster at one size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedupEntry {
    pub size: usize,
    /// Recursive average over iterative average; above 1.0 the loop wins
    pub ratio: f64,
    /// `"iterative"`, `"recursive"` or `"tie"`
    pub faster: String,
}

impl From<&PerformanceRecord> for SpeedupEntry {
    fn from(record: &PerformanceRecord) -> Self {
        let ratio = record.recursive_overhead();
        let faster = if ratio > 1.0 {
            "iterative"
        } else if ratio < 1.0 && ratio > 0.0 {
            "recursive"
        } else {
            "tie"
        };
        Self {
            size: record.size,
            ratio,
            faster: faster.to_string(),
        }
    }
}

impl SpeedupEntry {
    /// Ratio as seen from the faster kernel, always >= 1.0
    pub fn factor(&self) -> f64 {
        if self.ratio > 0.0 && self.ratio < 1.0 {
            1.0 / self.ratio
        } else {
            self.ratio.max(1.0)
        }
    }
}
