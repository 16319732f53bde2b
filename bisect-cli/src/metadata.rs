//! System Metadata Collection
//!
//! Collects system information for report metadata including CPU, memory,
//! OS details, and git information.
//!
//! Linux-specific data (CPU model, memory) degrades to "Unknown" or 0 on
//! other platforms.

use bisect_report::{ReportConfig, ReportMeta, SCHEMA_VERSION, SystemInfo};
use chrono::Utc;

/// Build report metadata including system info and git details
pub fn build_report_meta(config: ReportConfig) -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: get_cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: num_cpus(),
        memory_gb: get_memory_gb().unwrap_or(0.0),
    };

    ReportMeta {
        schema_version: SCHEMA_VERSION,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        git_commit: git(&["rev-parse", "HEAD"]),
        git_branch: git(&["rev-parse", "--abbrev-ref", "HEAD"]),
        system,
        config,
    }
}

/// Trimmed stdout of a successful git command
fn git(args: &[&str]) -> Option<String> {
    std::process::Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Get CPU model name from /proc/cpuinfo (Linux only)
fn get_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("model name"))
                    .and_then(|l| l.split(':').nth(1))
                    .map(|s| s.trim().to_string())
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

fn num_cpus() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}

/// Get total system memory in GB (Linux only)
fn get_memory_gb() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/meminfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("MemTotal"))
                    .and_then(|l| {
                        l.split_whitespace()
                            .nth(1)
                            .and_then(|s| s.parse::<u64>().ok())
                    })
                    .map(|kb| kb as f64 / 1024.0 / 1024.0)
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_fields() {
        let meta = build_report_meta(ReportConfig {
            served_by: "local".to_string(),
            ..ReportConfig::default()
        });
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert_eq!(meta.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(meta.system.os, std::env::consts::OS);
        assert!(meta.system.cpu_cores >= 1);
        assert_eq!(meta.config.served_by, "local");
    }
}
