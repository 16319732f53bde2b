//! Search substitutes
//!
//! A substitute answers search and benchmark requests in place of the local
//! engine. [`HttpSubstitute`] talks to the backend over HTTP with JSON bodies.

use crate::error::RemoteError;
use crate::messages::{PerformanceRequest, SearchRequest, SearchResponse};
use bisect_core::{
    BenchmarkConfig, DEFAULT_WARMUP_ROUNDS, KernelKind, PerformanceRecord, SearchOutcome,
};
use std::time::Duration;
use tracing::{debug, warn};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:5353";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default timeout for `/api/performance`, which builds arrays of up to 1e8
/// elements before measuring
pub const DEFAULT_BENCHMARK_TIMEOUT: Duration = Duration::from_secs(600);

/// Warm-up rounds the backend runs regardless of the request
const BACKEND_WARMUP_ROUNDS: usize = DEFAULT_WARMUP_ROUNDS;

/// Something that can serve searches and benchmarks in place of the local engine
pub trait SearchSubstitute {
    /// Run one kernel on `array`
    fn search(
        &self,
        kind: KernelKind,
        array: &[i64],
        target: i64,
    ) -> Result<SearchOutcome, RemoteError>;

    /// Run the batched benchmark for every size
    fn performance(
        &self,
        sizes: &[usize],
        config: &BenchmarkConfig,
    ) -> Result<Vec<PerformanceRecord>, RemoteError>;

    /// Whether the substitute is reachable and ready
    fn is_healthy(&self) -> bool;
}

/// HTTP client for the search backend
#[derive(Debug, Clone)]
pub struct HttpSubstitute {
    agent: ureq::Agent,
    base_url: String,
    benchmark_timeout: Duration,
}

impl HttpSubstitute {
    /// Client for `base_url` with a per-request `timeout`.
    ///
    /// Benchmark requests use [`DEFAULT_BENCHMARK_TIMEOUT`] instead; see
    /// [`HttpSubstitute::with_benchmark_timeout`].
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent,
            base_url,
            benchmark_timeout: DEFAULT_BENCHMARK_TIMEOUT,
        }
    }

    /// Override the timeout for `/api/performance`
    pub fn with_benchmark_timeout(mut self, timeout: Duration) -> Self {
        self.benchmark_timeout = timeout;
        self
    }

    /// Timeout applied to benchmark requests
    pub fn benchmark_timeout(&self) -> Duration {
        self.benchmark_timeout
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for HttpSubstitute {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

impl SearchSubstitute for HttpSubstitute {
    fn search(
        &self,
        kind: KernelKind,
        array: &[i64],
        target: i64,
    ) -> Result<SearchOutcome, RemoteError> {
        let url = self.url(&format!("/api/search/{}", kind));
        debug!(%url, len = array.len(), target, "remote search");

        let response: SearchResponse = self
            .agent
            .post(&url)
            .send_json(SearchRequest { array, target })?
            .into_json()
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        response.into_outcome(kind)
    }

    fn performance(
        &self,
        sizes: &[usize],
        config: &BenchmarkConfig,
    ) -> Result<Vec<PerformanceRecord>, RemoteError> {
        let url = self.url("/api/performance");
        debug!(%url, sizes = sizes.len(), "remote benchmark");
        if config.warmup_rounds != BACKEND_WARMUP_ROUNDS {
            warn!(
                requested = config.warmup_rounds,
                backend = BACKEND_WARMUP_ROUNDS,
                "remote backend ignores the warm-up setting"
            );
        }

        let records: Vec<PerformanceRecord> = self
            .agent
            .post(&url)
            .timeout(self.benchmark_timeout)
            .send_json(PerformanceRequest {
                sizes,
                batches: config.batches,
                runs_per_batch: config.runs_per_batch,
            })?
            .into_json()
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        check_records(sizes, &records)?;
        Ok(records)
    }

    fn is_healthy(&self) -> bool {
        let url = self.url("/health");
        match self.agent.get(&url).call() {
            Ok(_) => true,
            Err(err) => {
                debug!(%url, error = %err, "health probe failed");
                false
            }
        }
    }
}

/// Records must answer the requested sizes one for one, in order
fn check_records(sizes: &[usize], records: &[PerformanceRecord]) -> Result<(), RemoteError> {
    if records.len() != sizes.len() {
        return Err(RemoteError::Malformed(format!(
            "expected {} records, got {}",
            sizes.len(),
            records.len()
        )));
    }
    for (position, (record, &size)) in records.iter().zip(sizes).enumerate() {
        if record.size != size {
            return Err(RemoteError::Malformed(format!(
                "record {} has size {}, requested {}",
                position, record.size, size
            )));
        }
    }
    Ok(())
}
