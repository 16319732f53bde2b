#![warn(missing_docs)]
//! Bisect CLI Library
//!
//! Command-line front end for the measurement engine: single searches with
//! probe traces, batched benchmarks, the detailed profiler, array generation
//! and a remote health check.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     bisect_cli::run()
//! }
//! ```

mod config;
mod execution;
mod metadata;

pub use config::*;
pub use execution::{Budget, run_with_progress, spinner};
pub use metadata::build_report_meta;

use bisect_core::{KernelKind, SearchOutcome, generate_sorted_array, pin_to_cpu};
use bisect_remote::{HttpSubstitute, SearchResponse, SearchService, SearchSubstitute, Strategy};
use bisect_report::{
    OutputFormat, Report, ReportConfig, format_search_output, generate_search_csv, render_report,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Bisect CLI arguments
#[derive(Parser, Debug)]
#[command(name = "bisect")]
#[command(
    author,
    version,
    about = "Bisect - iterative vs recursive binary search measurements"
)]
pub struct Cli {
    /// What to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: human, json, csv (defaults to bisect.toml, then human)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Serve requests from the HTTP backend while it reports healthy
    #[arg(long, global = true)]
    pub remote: bool,

    /// Backend address (overrides bisect.toml)
    #[arg(long, global = true)]
    pub remote_url: Option<String>,

    /// Pin the measuring thread to this CPU (Linux only)
    #[arg(long, global = true)]
    pub pin_cpu: Option<usize>,

    /// Configuration file (skips discovery of bisect.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Kernel selection for `search`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Loop-based kernel
    Iterative,
    /// Call-stack based kernel
    Recursive,
    /// Both kernels, iterative first
    Both,
}

impl KindArg {
    /// Kernels to run
    pub fn kinds(self) -> &'static [KernelKind] {
        match self {
            KindArg::Iterative => &[KernelKind::Iterative],
            KindArg::Recursive => &[KernelKind::Recursive],
            KindArg::Both => &KernelKind::ALL,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the array 1..=SIZE for TARGET and show every probe
    Search {
        /// Array length
        size: usize,
        /// Value to look for
        #[arg(allow_hyphen_values = true)]
        target: i64,
        /// Kernel to run
        #[arg(long, value_enum, default_value_t = KindArg::Both)]
        kind: KindArg,
    },
    /// Batched benchmark of both kernels across array sizes
    Bench {
        /// Array sizes, comma separated
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<usize>,
        /// Timed batches per kernel per size
        #[arg(long)]
        batches: Option<usize>,
        /// Calls per batch
        #[arg(long)]
        runs: Option<usize>,
        /// Untimed warm-up rounds
        #[arg(long)]
        warmup: Option<usize>,
        /// Stop starting new sizes after this long (e.g., "30s", "5m")
        #[arg(long)]
        time_budget: Option<String>,
    },
    /// Individually timed trials at one size with percentiles
    Profile {
        /// Array length
        #[arg(long)]
        size: Option<usize>,
        /// Number of trials
        #[arg(long)]
        iterations: Option<usize>,
        /// Seed for the random target regime
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the sorted array 1..=SIZE
    Generate {
        /// Array length
        size: usize,
    },
    /// Probe the remote backend
    Health,
    /// Print a default bisect.toml
    Init,
}

/// Run the Bisect CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Bisect CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => BisectConfig::load(path)?,
        None => BisectConfig::discover().unwrap_or_default(),
    };
    let format = cli.format.unwrap_or(config.output.format);

    if let Some(cpu) = cli.pin_cpu {
        match pin_to_cpu(cpu) {
            Ok(()) => info!(cpu, "pinned measuring thread"),
            Err(e) => warn!(cpu, error = %e, "could not pin measuring thread"),
        }
    }

    let output = match &cli.command {
        Commands::Search { size, target, kind } => {
            search(&cli, &config, format, *size, *target, *kind)?
        }
        Commands::Bench {
            sizes,
            batches,
            runs,
            warmup,
            time_budget,
        } => {
            let mut section = config.benchmark.clone();
            if !sizes.is_empty() {
                section.sizes = sizes.clone();
            }
            section.batches = batches.unwrap_or(section.batches);
            section.runs_per_batch = runs.unwrap_or(section.runs_per_batch);
            section.warmup_rounds = warmup.unwrap_or(section.warmup_rounds);
            let budget = time_budget
                .as_deref()
                .map(BisectConfig::parse_duration)
                .transpose()?
                .map(Duration::from_nanos);
            bench(&cli, &config, format, &section, budget)?
        }
        Commands::Profile {
            size,
            iterations,
            seed,
        } => {
            let mut section = config.profile.clone();
            section.size = size.unwrap_or(section.size);
            section.iterations = iterations.unwrap_or(section.iterations);
            section.seed = seed.or(section.seed);
            profile(&cli, &config, format, &section)?
        }
        Commands::Generate { size } => generate(format, *size)?,
        Commands::Health => health(&cli, &config, format)?,
        Commands::Init => BisectConfig::default_toml(),
    };

    emit(&cli, &config, &output)
}

/// Install the fmt subscriber on stderr; repeated calls are ignored
fn init_logging(verbose: bool) {
    let filter = if verbose { "bisect=debug" } else { "bisect=info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn http_substitute(cli: &Cli, config: &BisectConfig) -> anyhow::Result<HttpSubstitute> {
    let base_url = cli
        .remote_url
        .clone()
        .unwrap_or_else(|| config.remote.base_url.clone());
    Ok(HttpSubstitute::new(base_url, config.remote.timeout()?)
        .with_benchmark_timeout(config.remote.benchmark_timeout()?))
}

/// Local-only unless remote use is requested on the command line or in bisect.toml
fn build_service(cli: &Cli, config: &BisectConfig) -> anyhow::Result<SearchService> {
    if cli.remote || config.remote.enabled {
        let substitute = http_substitute(cli, config)?;
        Ok(SearchService::with_substitute(Box::new(substitute)))
    } else {
        Ok(SearchService::local())
    }
}

fn search(
    cli: &Cli,
    config: &BisectConfig,
    format: OutputFormat,
    size: usize,
    target: i64,
    kind: KindArg,
) -> anyhow::Result<String> {
    let array = generate_sorted_array(size)?;
    let service = build_service(cli, config)?;

    let mut outcomes: Vec<SearchOutcome> = Vec::new();
    let mut served_by = Vec::new();
    for &k in kind.kinds() {
        let served = service.search(&array, target, k)?;
        served_by.push(served.via);
        outcomes.push(served.value);
    }

    let output = match format {
        OutputFormat::Json => {
            let body: BTreeMap<String, SearchResponse> = outcomes
                .iter()
                .map(|o| (o.kind().to_string(), SearchResponse::from(o)))
                .collect();
            serde_json::to_string_pretty(&body)? + "\n"
        }
        OutputFormat::Csv => generate_search_csv(&outcomes),
        OutputFormat::Human => {
            let mut text = format_search_output(&outcomes);
            let via: Vec<String> = served_by.iter().map(Strategy::to_string).collect();
            text.push_str(&format!("\nserved by {}\n", via.join(", ")));
            text
        }
    };
    Ok(output)
}

fn bench(
    cli: &Cli,
    config: &BisectConfig,
    format: OutputFormat,
    section: &BenchmarkSection,
    budget: Option<Duration>,
) -> anyhow::Result<String> {
    let bench_config = section.to_config();
    let service = build_service(cli, config)?;

    info!(
        sizes = section.sizes.len(),
        batches = bench_config.batches,
        runs_per_batch = bench_config.runs_per_batch,
        strategy = %service.strategy(),
        "starting benchmark"
    );

    let served = run_with_progress(&service, &section.sizes, &bench_config, Budget::start(budget))?;

    let meta = build_report_meta(ReportConfig {
        served_by: served.via.to_string(),
        benchmark: Some(bench_config),
        profile: None,
    });
    let report = Report::new(meta, served.value, None);
    Ok(render_report(&report, format)?)
}

fn profile(
    cli: &Cli,
    config: &BisectConfig,
    format: OutputFormat,
    section: &ProfileSection,
) -> anyhow::Result<String> {
    let profile_config = section.to_config();
    let service = build_service(cli, config)?;

    let pb = spinner(format!(
        "profiling {} trials at n = {}",
        profile_config.iterations, section.size
    ));
    let served = service.run_detailed_profile(section.size, &profile_config);
    pb.finish_and_clear();
    let served = served?;

    let meta = build_report_meta(ReportConfig {
        served_by: served.via.to_string(),
        benchmark: None,
        profile: Some(profile_config),
    });
    let report = Report::new(meta, Vec::new(), Some(served.value));
    Ok(render_report(&report, format)?)
}

fn generate(format: OutputFormat, size: usize) -> anyhow::Result<String> {
    let array = generate_sorted_array(size)?;
    let output = match format {
        OutputFormat::Json => {
            serde_json::to_string(&serde_json::json!({
                "array": array.as_slice(),
                "size": size,
            }))? + "\n"
        }
        OutputFormat::Csv | OutputFormat::Human => {
            let mut text = String::with_capacity(size * 8);
            for value in array.iter() {
                text.push_str(&value.to_string());
                text.push('\n');
            }
            text
        }
    };
    Ok(output)
}

fn health(cli: &Cli, config: &BisectConfig, format: OutputFormat) -> anyhow::Result<String> {
    let substitute = http_substitute(cli, config)?;
    let healthy = substitute.is_healthy();

    let output = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&serde_json::json!({
                "baseUrl": substitute.base_url(),
                "healthy": healthy,
            }))? + "\n"
        }
        OutputFormat::Csv => format!("base_url,healthy\n{},{}\n", substitute.base_url(), healthy),
        OutputFormat::Human => {
            let state = if healthy { "healthy" } else { "unreachable" };
            format!("{}: {}\n", substitute.base_url(), state)
        }
    };
    Ok(output)
}

/// Write `output` to `--output` (relative paths land in `[output].directory`) or stdout
fn emit(cli: &Cli, config: &BisectConfig, output: &str) -> anyhow::Result<()> {
    match &cli.output {
        Some(path) => {
            let path = match &config.output.directory {
                Some(dir) if path.is_relative() => PathBuf::from(dir).join(path),
                _ => path.clone(),
            };
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let mut file = std::fs::File::create(&path)?;
            file.write_all(output.as_bytes())?;
            eprintln!("Report written to: {}", path.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}
