//! Binary Search Kernels
//!
//! Iterative and recursive binary search, each in two flavours:
//! - instrumented (`search_iterative`, `search_recursive`): records every probe
//!   and times the call, for step-by-step display and the detailed profiler
//! - fast (`iterative_fast`, `recursive_fast`): returns only the comparison
//!   count, for high-repetition batch timing
//!
//! Both flavours share one generic control flow over a [`ProbeSink`]. The fast
//! flavour uses a zero-sized sink, so after monomorphization it carries no
//! recording cost at all.
//!
//! The midpoint is always `left + (right - left) / 2`.

use crate::array::check_ascending;
use crate::error::BenchError;
use crate::measure::Timer;
use crate::outcome::{KernelKind, RecursiveStep, SearchOutcome, SearchStep, SearchTrace};
use std::cmp::Ordering;

/// Upper bound on midpoint evaluations for an array of `n` elements: `ceil(log2(n + 1))`
pub fn max_probes(n: usize) -> u32 {
    usize::BITS - n.leading_zeros()
}

/// Receives each probe as it is made
trait ProbeSink {
    fn record(&mut self, left: usize, right: usize, mid: usize, comparing: i64, depth: u32);
}

/// Discards probes
struct NoProbes;

impl ProbeSink for NoProbes {
    #[inline(always)]
    fn record(&mut self, _: usize, _: usize, _: usize, _: i64, _: u32) {}
}

struct IterativeProbes(Vec<SearchStep>);

impl ProbeSink for IterativeProbes {
    #[inline]
    fn record(&mut self, left: usize, right: usize, mid: usize, comparing: i64, _depth: u32) {
        self.0.push(SearchStep {
            left,
            right,
            mid,
            comparing,
        });
    }
}

struct RecursiveProbes(Vec<RecursiveStep>);

impl ProbeSink for RecursiveProbes {
    #[inline]
    fn record(&mut self, left: usize, right: usize, mid: usize, comparing: i64, depth: u32) {
        self.0.push(RecursiveStep {
            step: SearchStep {
                left,
                right,
                mid,
                comparing,
            },
            depth,
        });
    }
}

/// Loop-based search. Returns `(index, comparisons)`.
#[inline(always)]
fn iterate<S: ProbeSink>(array: &[i64], target: i64, sink: &mut S) -> (Option<usize>, u32) {
    let mut comparisons = 0;
    if array.is_empty() {
        return (None, comparisons);
    }

    let mut left = 0usize;
    let mut right = array.len() - 1;

    while left <= right {
        let mid = left + (right - left) / 2;
        comparisons += 1;

        let value = array[mid];
        sink.record(left, right, mid, value, 0);

        match value.cmp(&target) {
            Ordering::Equal => return (Some(mid), comparisons),
            Ordering::Less => left = mid + 1,
            Ordering::Greater => {
                // mid == 0 means right would drop below left
                if mid == 0 {
                    break;
                }
                right = mid - 1;
            }
        }
    }

    (None, comparisons)
}

/// Per-call state for the recursive kernel.
///
/// Owned by exactly one top-level search and threaded through every nested
/// call by `&mut self`.
struct Recursion<'a, S> {
    array: &'a [i64],
    target: i64,
    comparisons: u32,
    max_depth: u32,
    sink: S,
}

impl<'a, S: ProbeSink> Recursion<'a, S> {
    fn new(array: &'a [i64], target: i64, sink: S) -> Self {
        Self {
            array,
            target,
            comparisons: 0,
            max_depth: 0,
            sink,
        }
    }

    /// Bounds are signed so the `right = -1` base case can be entered and
    /// counted towards `max_depth`. Slice lengths never exceed `isize::MAX`.
    fn descend(&mut self, left: isize, right: isize, depth: u32) -> Option<usize> {
        self.max_depth = self.max_depth.max(depth);

        if left > right {
            return None;
        }

        let mid = left + (right - left) / 2;
        self.comparisons += 1;

        let value = self.array[mid as usize];
        self.sink
            .record(left as usize, right as usize, mid as usize, value, depth);

        match value.cmp(&self.target) {
            Ordering::Equal => Some(mid as usize),
            Ordering::Less => self.descend(mid + 1, right, depth + 1),
            Ordering::Greater => self.descend(left, mid - 1, depth + 1),
        }
    }

    fn run(mut self) -> (Option<usize>, u32, u32, S) {
        let right = self.array.len() as isize - 1;
        let index = self.descend(0, right, 0);
        (index, self.comparisons, self.max_depth, self.sink)
    }
}

/// Iterative search, comparison count only
#[inline]
pub fn iterative_fast(array: &[i64], target: i64) -> u32 {
    iterate(array, target, &mut NoProbes).1
}

/// Recursive search, comparison count only
#[inline]
pub fn recursive_fast(array: &[i64], target: i64) -> u32 {
    Recursion::new(array, target, NoProbes).run().1
}

/// Instrumented iterative search
///
/// The array must be ascending; this is not re-checked here. Use
/// [`run_search`] for unvalidated input.
pub fn search_iterative(array: &[i64], target: i64) -> SearchOutcome {
    let mut probes = IterativeProbes(Vec::with_capacity(max_probes(array.len()) as usize));

    let timer = Timer::start();
    let (index, comparisons) = iterate(array, target, &mut probes);
    let execution_time = timer.elapsed();

    SearchOutcome {
        found: index.is_some(),
        index,
        comparisons,
        execution_time,
        trace: SearchTrace::Iterative { steps: probes.0 },
    }
}

/// Instrumented recursive search
///
/// The array must be ascending; this is not re-checked here. Use
/// [`run_search`] for unvalidated input.
pub fn search_recursive(array: &[i64], target: i64) -> SearchOutcome {
    let probes = RecursiveProbes(Vec::with_capacity(max_probes(array.len()) as usize));

    let timer = Timer::start();
    let (index, comparisons, max_depth, probes) = Recursion::new(array, target, probes).run();
    let execution_time = timer.elapsed();

    SearchOutcome {
        found: index.is_some(),
        index,
        comparisons,
        execution_time,
        trace: SearchTrace::Recursive {
            steps: probes.0,
            max_depth,
        },
    }
}

/// Run one instrumented kernel on a pre-validated array
pub fn search_with(kind: KernelKind, array: &[i64], target: i64) -> SearchOutcome {
    match kind {
        KernelKind::Iterative => search_iterative(array, target),
        KernelKind::Recursive => search_recursive(array, target),
    }
}

/// Validate `array` and run one instrumented kernel over it
pub fn run_search(array: &[i64], target: i64, kind: KernelKind) -> Result<SearchOutcome, BenchError> {
    check_ascending(array)?;
    Ok(search_with(kind, array, target))
}
