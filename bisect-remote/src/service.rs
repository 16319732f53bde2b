//! Strategy selection and local fallback
//!
//! ```text
//! probe configured? ──no──► Local
//!        │yes
//!        ▼
//!   probe healthy? ──no──► Local
//!        │yes
//!        ▼
//!      Remote ──any RemoteError──► warn! ──► Local
//! ```
//!
//! Input-contract checks always run locally first, so a bad request is
//! reported as a `BenchError` and never sent over the wire.

use crate::client::SearchSubstitute;
use bisect_core::{
    BenchError, BenchmarkConfig, DetailedMetrics, KernelKind, PerformanceRecord, ProfileConfig,
    SearchOutcome, check_ascending, search_with, validate_sizes,
};
use std::fmt;
use std::ops::ControlFlow;
use tracing::{info, warn};

/// Where a request is served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The configured substitute
    Remote,
    /// The in-process engine
    Local,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Remote => write!(f, "remote"),
            Strategy::Local => write!(f, "local"),
        }
    }
}

/// Pick a strategy: remote only when a probe is configured and reports healthy
pub fn select_strategy(probe: Option<&dyn SearchSubstitute>) -> Strategy {
    match probe {
        Some(substitute) if substitute.is_healthy() => Strategy::Remote,
        _ => Strategy::Local,
    }
}

/// A result together with the strategy that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Served<T> {
    /// The result
    pub value: T,
    /// Who produced it
    pub via: Strategy,
}

impl<T> Served<T> {
    fn local(value: T) -> Self {
        Self {
            value,
            via: Strategy::Local,
        }
    }

    fn remote(value: T) -> Self {
        Self {
            value,
            via: Strategy::Remote,
        }
    }
}

/// Remote-aware front to the measurement engine
///
/// The health probe runs once on construction; [`SearchService::refresh`]
/// probes again.
pub struct SearchService {
    substitute: Option<Box<dyn SearchSubstitute>>,
    strategy: Strategy,
}

impl fmt::Debug for SearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchService")
            .field("has_substitute", &self.substitute.is_some())
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl SearchService {
    /// Local-only service
    pub fn local() -> Self {
        Self {
            substitute: None,
            strategy: Strategy::Local,
        }
    }

    /// Service that prefers `substitute` while it reports healthy
    pub fn with_substitute(substitute: Box<dyn SearchSubstitute>) -> Self {
        let strategy = select_strategy(Some(substitute.as_ref()));
        info!(%strategy, "selected search strategy");
        Self {
            substitute: Some(substitute),
            strategy,
        }
    }

    /// Strategy chosen by the last health probe
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Probe the substitute again and return the new strategy
    pub fn refresh(&mut self) -> Strategy {
        self.strategy = select_strategy(self.substitute.as_deref());
        self.strategy
    }

    fn remote(&self) -> Option<&dyn SearchSubstitute> {
        match self.strategy {
            Strategy::Remote => self.substitute.as_deref(),
            Strategy::Local => None,
        }
    }

    /// Validate `array` and run one kernel, remotely when selected
    pub fn search(
        &self,
        array: &[i64],
        target: i64,
        kind: KernelKind,
    ) -> Result<Served<SearchOutcome>, BenchError> {
        check_ascending(array)?;

        if let Some(substitute) = self.remote() {
            match substitute.search(kind, array, target) {
                Ok(outcome) => return Ok(Served::remote(outcome)),
                Err(err) => warn!(%kind, error = %err, "remote search failed, using local kernel"),
            }
        }
        Ok(Served::local(search_with(kind, array, target)))
    }

    /// Benchmark every size, remotely when selected
    pub fn run_benchmark(
        &self,
        sizes: &[usize],
        config: &BenchmarkConfig,
    ) -> Result<Served<Vec<PerformanceRecord>>, BenchError> {
        self.run_benchmark_with(sizes, config, |_, _| ControlFlow::Continue(()))
    }

    /// Benchmark every size, remotely when selected.
    ///
    /// `before_size` is handed to the local orchestrator whenever the run is
    /// served locally, including after a remote failure. A remote run reports
    /// no per-size progress.
    pub fn run_benchmark_with<H>(
        &self,
        sizes: &[usize],
        config: &BenchmarkConfig,
        before_size: H,
    ) -> Result<Served<Vec<PerformanceRecord>>, BenchError>
    where
        H: FnMut(usize, usize) -> ControlFlow<()>,
    {
        config.validate()?;
        validate_sizes(sizes)?;

        if let Some(substitute) = self.remote() {
            match substitute.performance(sizes, config) {
                Ok(records) => return Ok(Served::remote(records)),
                Err(err) => warn!(error = %err, "remote benchmark failed, running locally"),
            }
        }
        bisect_core::run_benchmark_with(sizes, config, before_size).map(Served::local)
    }

    /// Detailed profile; the backend has no profiling route, so this is always local
    pub fn run_detailed_profile(
        &self,
        array_size: usize,
        config: &ProfileConfig,
    ) -> Result<Served<DetailedMetrics>, BenchError> {
        bisect_core::run_detailed_profile(array_size, config).map(Served::local)
    }
}
