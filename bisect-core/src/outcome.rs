//! Search outcomes and probe traces
//!
//! The trace is tagged by kernel kind: only the recursive variant carries
//! per-step depth and the maximum depth reached.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which kernel produced (or should produce) an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// Loop-based binary search
    Iterative,
    /// Call-stack based binary search
    Recursive,
}

impl KernelKind {
    /// Both kernels, iterative first
    pub const ALL: [KernelKind; 2] = [KernelKind::Iterative, KernelKind::Recursive];

    /// Lowercase name, also used as the remote route segment
    pub fn as_str(self) -> &'static str {
        match self {
            KernelKind::Iterative => "iterative",
            KernelKind::Recursive => "recursive",
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iterative" | "iter" => Ok(KernelKind::Iterative),
            "recursive" | "rec" => Ok(KernelKind::Recursive),
            other => Err(format!("Unknown kernel kind: {}", other)),
        }
    }
}

/// One midpoint probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStep {
    /// Inclusive lower bound at the probe
    pub left: usize,
    /// Inclusive upper bound at the probe
    pub right: usize,
    /// Probed index
    pub mid: usize,
    /// Value found at `mid`
    pub comparing: i64,
}

/// A probe made by the recursive kernel, annotated with call depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursiveStep {
    /// The probe itself
    pub step: SearchStep,
    /// Call-stack nesting at the probe (0 = initial call)
    pub depth: u32,
}

/// Kernel-specific probe trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTrace {
    /// Steps recorded by the iterative kernel
    Iterative {
        /// Probes in order
        steps: Vec<SearchStep>,
    },
    /// Steps recorded by the recursive kernel
    Recursive {
        /// Probes in order
        steps: Vec<RecursiveStep>,
        /// Deepest call entered, including a terminating base-case call
        max_depth: u32,
    },
}

/// Result of one instrumented search call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Whether the target was found
    pub found: bool,
    /// Index of the target, if found
    pub index: Option<usize>,
    /// Number of midpoint evaluations
    pub comparisons: u32,
    /// Wall-clock time of the call
    pub execution_time: Duration,
    /// Probe trace
    pub trace: SearchTrace,
}

impl SearchOutcome {
    /// Kernel that produced this outcome
    pub fn kind(&self) -> KernelKind {
        match self.trace {
            SearchTrace::Iterative { .. } => KernelKind::Iterative,
            SearchTrace::Recursive { .. } => KernelKind::Recursive,
        }
    }

    /// Index, or `-1` when not found
    pub fn index_or_sentinel(&self) -> i64 {
        self.index.map_or(-1, |i| i as i64)
    }

    /// Number of recorded probes
    pub fn step_count(&self) -> usize {
        match &self.trace {
            SearchTrace::Iterative { steps } => steps.len(),
            SearchTrace::Recursive { steps, .. } => steps.len(),
        }
    }

    /// Probes without depth annotation, in order
    pub fn steps(&self) -> Vec<SearchStep> {
        match &self.trace {
            SearchTrace::Iterative { steps } => steps.clone(),
            SearchTrace::Recursive { steps, .. } => steps.iter().map(|s| s.step).collect(),
        }
    }

    /// Maximum recursion depth (recursive kernel only)
    pub fn max_depth(&self) -> Option<u32> {
        match self.trace {
            SearchTrace::Recursive { max_depth, .. } => Some(max_depth),
            SearchTrace::Iterative { .. } => None,
        }
    }

    /// Execution time in microseconds
    pub fn execution_time_us(&self) -> f64 {
        self.execution_time.as_secs_f64() * 1e6
    }
}
