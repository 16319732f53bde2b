//! Benchmark execution with terminal progress
//!
//! The orchestrator's per-size hook drives an indicatif bar and enforces an
//! optional wall-clock budget: once the budget is spent no further size is
//! started, and the records finished so far are kept. The same hook applies
//! when a failed remote run falls back to the local orchestrator.

use bisect_core::{BenchError, BenchmarkConfig, PerformanceRecord};
use bisect_remote::{SearchService, Served, Strategy};
use indicatif::{ProgressBar, ProgressStyle};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};
use tracing::warn;

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Decides, before each size, whether the run may continue
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    started: Instant,
    limit: Option<Duration>,
}

impl Budget {
    /// Start the clock; `None` never stops the run
    pub fn start(limit: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    /// Whether the limit has been reached
    pub fn exhausted(&self) -> bool {
        self.limit
            .is_some_and(|limit| self.started.elapsed() >= limit)
    }
}

/// Run the benchmark for every size through `service` with a progress bar on stderr
pub fn run_with_progress(
    service: &SearchService,
    sizes: &[usize],
    config: &BenchmarkConfig,
    budget: Budget,
) -> Result<Served<Vec<PerformanceRecord>>, BenchError> {
    let pb = ProgressBar::new(sizes.len() as u64);
    pb.set_style(progress_style());
    if service.strategy() == Strategy::Remote {
        pb.set_message("waiting for remote benchmark");
        pb.enable_steady_tick(Duration::from_millis(100));
    }

    let result = service.run_benchmark_with(sizes, config, |position, size| {
        pb.set_position(position as u64);
        if budget.exhausted() {
            warn!(
                completed = position,
                remaining = sizes.len() - position,
                "time budget spent, skipping remaining sizes"
            );
            return ControlFlow::Break(());
        }
        pb.set_message(format!("n = {}", size));
        ControlFlow::Continue(())
    });

    match &result {
        Ok(served) => {
            pb.set_position(served.value.len() as u64);
            pb.finish_with_message(format!("Complete ({})", served.via));
        }
        Err(_) => pb.abandon(),
    }
    result
}

/// Spinner for work that reports no intermediate progress
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
