#![warn(missing_docs)]
//! Bisect Remote - Search Substitute
//!
//! Delegates searches and benchmarks to an HTTP backend when one is
//! configured and healthy, and falls back to the in-process engine on any
//! failure. Remote failures are logged, never returned.

mod client;
mod error;
mod messages;
mod service;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_BENCHMARK_TIMEOUT, DEFAULT_TIMEOUT, HttpSubstitute, SearchSubstitute,
};
pub use error::RemoteError;
pub use messages::{PerformanceRequest, SearchRequest, SearchResponse, WireStep};
pub use service::{SearchService, Served, Strategy, select_strategy};
