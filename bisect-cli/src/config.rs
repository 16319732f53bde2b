//! Configuration loading from bisect.toml
//!
//! Bisect configuration can be specified in a `bisect.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.
//! Command-line flags override file values; the file overrides built-in defaults.

use bisect_core::{
    BenchmarkConfig, DEFAULT_BATCHES, DEFAULT_PROFILE_ITERATIONS, DEFAULT_RUNS_PER_BATCH,
    DEFAULT_WARMUP_ROUNDS, ProfileConfig,
};
use bisect_remote::DEFAULT_BASE_URL;
use bisect_report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File name looked up by [`BisectConfig::discover`]
pub const CONFIG_FILE: &str = "bisect.toml";

/// Bisect configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BisectConfig {
    /// Batched benchmark settings
    #[serde(default)]
    pub benchmark: BenchmarkSection,
    /// Detailed profiler settings
    #[serde(default)]
    pub profile: ProfileSection,
    /// Remote search substitute
    #[serde(default)]
    pub remote: RemoteSection,
    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// `[benchmark]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSection {
    /// Array sizes, benchmarked in order
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    /// Timed batches per kernel per size
    #[serde(default = "default_batches")]
    pub batches: usize,
    /// Calls per batch
    #[serde(default = "default_runs_per_batch")]
    pub runs_per_batch: usize,
    /// Untimed rounds before the first batch
    #[serde(default = "default_warmup_rounds")]
    pub warmup_rounds: usize,
}

impl Default for BenchmarkSection {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            batches: default_batches(),
            runs_per_batch: default_runs_per_batch(),
            warmup_rounds: default_warmup_rounds(),
        }
    }
}

impl BenchmarkSection {
    /// Orchestrator settings from this section
    pub fn to_config(&self) -> BenchmarkConfig {
        BenchmarkConfig {
            batches: self.batches,
            runs_per_batch: self.runs_per_batch,
            warmup_rounds: self.warmup_rounds,
        }
    }
}

fn default_sizes() -> Vec<usize> {
    vec![100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000, 100_000_000]
}
fn default_batches() -> usize {
    DEFAULT_BATCHES
}
fn default_runs_per_batch() -> usize {
    DEFAULT_RUNS_PER_BATCH
}
fn default_warmup_rounds() -> usize {
    DEFAULT_WARMUP_ROUNDS
}

/// `[profile]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSection {
    /// Array size to profile
    #[serde(default = "default_profile_size")]
    pub size: usize,
    /// Trials across all target regimes
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Seed for the random regime
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            size: default_profile_size(),
            iterations: default_iterations(),
            seed: None,
        }
    }
}

impl ProfileSection {
    /// Profiler settings from this section
    pub fn to_config(&self) -> ProfileConfig {
        ProfileConfig {
            iterations: self.iterations,
            seed: self.seed,
        }
    }
}

fn default_profile_size() -> usize {
    1_000_000
}
fn default_iterations() -> usize {
    DEFAULT_PROFILE_ITERATIONS
}

/// `[remote]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSection {
    /// Use the remote substitute when it reports healthy
    #[serde(default)]
    pub enabled: bool,
    /// Backend address
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout (e.g., "2s", "500ms")
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Timeout for a whole remote benchmark run
    #[serde(default = "default_benchmark_timeout")]
    pub benchmark_timeout: String,
}

impl Default for RemoteSection {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_base_url(),
            timeout: default_timeout(),
            benchmark_timeout: default_benchmark_timeout(),
        }
    }
}

impl RemoteSection {
    /// Parsed request timeout
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        BisectConfig::parse_duration(&self.timeout).map(Duration::from_nanos)
    }

    /// Parsed remote benchmark timeout
    pub fn benchmark_timeout(&self) -> anyhow::Result<Duration> {
        BisectConfig::parse_duration(&self.benchmark_timeout).map(Duration::from_nanos)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> String {
    "2s".to_string()
}
fn default_benchmark_timeout() -> String {
    "10m".to_string()
}

/// `[output]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Default output format: "human", "json" or "csv"
    #[serde(default)]
    pub format: OutputFormat,
    /// Directory for reports written with a relative `--output` path
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            directory: None,
        }
    }
}

impl BisectConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "ignoring unreadable config");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Bisect Configuration

[benchmark]
# Array sizes, benchmarked in order
sizes = [100, 1000, 10000, 100000, 1000000, 10000000, 100000000]
# Timed batches per kernel per size
batches = 20
# Calls inside each timing window
runs_per_batch = 1000
# Untimed rounds of both kernels before the first batch
warmup_rounds = 1000

[profile]
# Array size for the detailed profile
size = 1000000
# Trials: 20% middle target, 20% absent, 60% random
iterations = 1000
# Fix the random regime (uncomment to enable)
# seed = 42

[remote]
# Serve requests from the HTTP backend while it reports healthy
enabled = false
base_url = "http://localhost:5353"
# Per-request timeout
timeout = "2s"
# Remote benchmark runs build arrays of up to 1e8 elements
benchmark_timeout = "10m"

[output]
# Default output format: human, json, csv
format = "human"
# Directory for reports written with a relative --output path (uncomment to enable)
# directory = "target/bisect"
"#
        .to_string()
    }

    /// Parse duration string (e.g., "2s", "500ms", "1m") to nanoseconds
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
        if !value.is_finite() || value < 0.0 {
            return Err(anyhow::anyhow!("Invalid duration: {}", s));
        }

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BisectConfig::default();
        assert_eq!(config.benchmark.batches, 20);
        assert_eq!(config.benchmark.runs_per_batch, 1000);
        assert_eq!(config.benchmark.warmup_rounds, 1000);
        assert_eq!(config.benchmark.sizes.first(), Some(&100));
        assert_eq!(config.benchmark.sizes.last(), Some(&100_000_000));
        assert_eq!(config.profile.iterations, 1000);
        assert!(!config.remote.enabled);
        assert_eq!(config.remote.base_url, "http://localhost:5353");
        assert_eq!(config.output.format, OutputFormat::Human);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(BisectConfig::parse_duration("2s").unwrap(), 2_000_000_000);
        assert_eq!(BisectConfig::parse_duration("500ms").unwrap(), 500_000_000);
        assert_eq!(BisectConfig::parse_duration("100us").unwrap(), 100_000);
        assert_eq!(BisectConfig::parse_duration("1000ns").unwrap(), 1000);
        assert_eq!(BisectConfig::parse_duration("1m").unwrap(), 60_000_000_000);
        assert_eq!(BisectConfig::parse_duration("1.5s").unwrap(), 1_500_000_000);
        assert_eq!(BisectConfig::parse_duration("3").unwrap(), 3_000_000_000);
        assert!(BisectConfig::parse_duration("").is_err());
        assert!(BisectConfig::parse_duration("fast").is_err());
        assert!(BisectConfig::parse_duration("5h").is_err());
        assert!(BisectConfig::parse_duration("-1s").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [benchmark]
            sizes = [10, 20]
            batches = 5

            [remote]
            enabled = true
            timeout = "250ms"

            [output]
            format = "json"
        "#;

        let config: BisectConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.benchmark.sizes, vec![10, 20]);
        assert_eq!(config.benchmark.batches, 5);
        // Defaults should still apply
        assert_eq!(config.benchmark.runs_per_batch, 1000);
        assert!(config.remote.enabled);
        assert_eq!(config.remote.timeout().unwrap(), Duration::from_millis(250));
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.profile.size, 1_000_000);
    }

    #[test]
    fn test_default_toml_parses() {
        let config: BisectConfig = toml::from_str(&BisectConfig::default_toml()).unwrap();
        let defaults = BisectConfig::default();
        assert_eq!(config.benchmark.sizes, defaults.benchmark.sizes);
        assert_eq!(config.benchmark.to_config(), BenchmarkConfig::default());
        assert_eq!(config.profile.to_config(), ProfileConfig::default());
        assert_eq!(config.remote.timeout().unwrap(), Duration::from_secs(2));
        assert_eq!(
            config.remote.benchmark_timeout().unwrap(),
            bisect_remote::DEFAULT_BENCHMARK_TIMEOUT
        );
    }

    #[test]
    fn test_benchmark_timeout_section() {
        let toml_str = r#"
            [remote]
            benchmark_timeout = "90s"
        "#;
        let config: BisectConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.remote.benchmark_timeout().unwrap(), Duration::from_secs(90));
        assert_eq!(config.remote.timeout().unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let toml_str = r#"
            [output]
            format = "html"
        "#;
        assert!(toml::from_str::<BisectConfig>(toml_str).is_err());
    }
}
