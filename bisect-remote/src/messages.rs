//! Wire Message Types
//!
//! JSON bodies exchanged with the search substitute. Field names are
//! camelCase. A missing target is reported as `index: -1`, execution time is
//! in nanoseconds, and depth fields are omitted when zero.

use crate::error::RemoteError;
use bisect_core::{KernelKind, RecursiveStep, SearchOutcome, SearchStep, SearchTrace};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body of `POST /api/search/{kind}`
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    /// Sorted input
    pub array: &'a [i64],
    /// Value to look for
    pub target: i64,
}

/// Body of `POST /api/performance`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRequest<'a> {
    /// Array sizes, benchmarked in order
    pub sizes: &'a [usize],
    /// Timed batches per kernel per size
    pub batches: usize,
    /// Calls per batch
    pub runs_per_batch: usize,
}

/// One probe on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStep {
    /// Inclusive lower bound
    pub left: usize,
    /// Inclusive upper bound
    pub right: usize,
    /// Probed index
    pub mid: usize,
    /// Value at `mid`
    pub comparing: i64,
    /// Recursive probes only; omitted at depth 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

/// Search result on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Whether the target was found
    pub found: bool,
    /// Position of the target, `-1` when absent
    pub index: i64,
    /// Midpoint evaluations
    pub comparisons: u32,
    /// Probes in order
    #[serde(default)]
    pub steps: Vec<WireStep>,
    /// Nanoseconds
    pub execution_time: f64,
    /// Recursive kernel only; omitted at depth 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
}

fn nonzero(depth: u32) -> Option<u32> {
    (depth > 0).then_some(depth)
}

impl From<SearchStep> for WireStep {
    fn from(step: SearchStep) -> Self {
        Self {
            left: step.left,
            right: step.right,
            mid: step.mid,
            comparing: step.comparing,
            depth: None,
        }
    }
}

impl From<RecursiveStep> for WireStep {
    fn from(step: RecursiveStep) -> Self {
        Self {
            depth: nonzero(step.depth),
            ..WireStep::from(step.step)
        }
    }
}

impl From<WireStep> for SearchStep {
    fn from(step: WireStep) -> Self {
        Self {
            left: step.left,
            right: step.right,
            mid: step.mid,
            comparing: step.comparing,
        }
    }
}

impl From<&SearchOutcome> for SearchResponse {
    fn from(outcome: &SearchOutcome) -> Self {
        let (steps, max_depth) = match &outcome.trace {
            SearchTrace::Iterative { steps } => {
                (steps.iter().copied().map(WireStep::from).collect(), None)
            }
            SearchTrace::Recursive { steps, max_depth } => (
                steps.iter().copied().map(WireStep::from).collect(),
                nonzero(*max_depth),
            ),
        };

        Self {
            found: outcome.found,
            index: outcome.index_or_sentinel(),
            comparisons: outcome.comparisons,
            steps,
            execution_time: outcome.execution_time.as_nanos() as f64,
            max_depth,
        }
    }
}

impl SearchResponse {
    /// Convert into an outcome for the kernel that was asked for.
    ///
    /// Rejects bodies whose `found` flag and `index` disagree, and negative or
    /// non-finite execution times.
    pub fn into_outcome(self, kind: KernelKind) -> Result<SearchOutcome, RemoteError> {
        let index = match (self.found, self.index) {
            (true, i) if i >= 0 => Some(i as usize),
            (false, -1) => None,
            (found, i) => {
                return Err(RemoteError::Malformed(format!(
                    "found={found} with index {i}"
                )));
            }
        };

        if !self.execution_time.is_finite() || self.execution_time < 0.0 {
            return Err(RemoteError::Malformed(format!(
                "execution time {} ns",
                self.execution_time
            )));
        }
        let execution_time = Duration::from_nanos(self.execution_time.round() as u64);

        let trace = match kind {
            KernelKind::Iterative => SearchTrace::Iterative {
                steps: self.steps.into_iter().map(SearchStep::from).collect(),
            },
            KernelKind::Recursive => SearchTrace::Recursive {
                steps: self
                    .steps
                    .into_iter()
                    .map(|s| RecursiveStep {
                        depth: s.depth.unwrap_or(0),
                        step: s.into(),
                    })
                    .collect(),
                max_depth: self.max_depth.unwrap_or(0),
            },
        };

        Ok(SearchOutcome {
            found: self.found,
            index,
            comparisons: self.comparisons,
            execution_time,
            trace,
        })
    }
}
