//! Percentile Computation
//!
//! Nearest-rank percentiles: sort ascending and index at `floor(len * p)`.
//! No interpolation, so every reported percentile is an observed sample.

use crate::StatsError;
use serde::{Deserialize, Serialize};

/// Percentiles reported by the detailed profiler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    /// 50th percentile
    pub median: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

/// Pick the nearest-rank percentile from an already sorted slice.
///
/// `fraction` is in `[0, 1]`; the index is clamped to the last element.
fn nearest_rank(sorted: &[f64], fraction: f64) -> f64 {
    let idx = ((sorted.len() as f64) * fraction).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Compute a single percentile (0-100) from unsorted samples
///
/// # Examples
///
/// ```
/// # use bisect_stats::compute_percentile;
/// let samples = vec![5.0, 1.0, 4.0, 2.0, 3.0];
/// assert_eq!(compute_percentile(&samples, 50.0).unwrap(), 3.0);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> Result<f64, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptySampleSet);
    }
    let sorted = sorted_copy(samples);
    Ok(nearest_rank(&sorted, (percentile / 100.0).clamp(0.0, 1.0)))
}

/// Compute median, p95 and p99 with a single sort
pub fn compute_percentiles(samples: &[f64]) -> Result<Percentiles, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptySampleSet);
    }
    let sorted = sorted_copy(samples);
    Ok(Percentiles {
        median: nearest_rank(&sorted, 0.5),
        p95: nearest_rank(&sorted, 0.95),
        p99: nearest_rank(&sorted, 0.99),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(compute_percentile(&samples, 50.0).unwrap(), 3.0);
    }

    #[test]
    fn test_median_even_takes_upper() {
        // floor(4 * 0.5) = 2 -> third element, no averaging
        let samples = vec![4.0, 1.0, 3.0, 2.0];
        assert_eq!(compute_percentile(&samples, 50.0).unwrap(), 3.0);
    }

    #[test]
    fn test_tail_percentiles() {
        let samples: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let p = compute_percentiles(&samples).unwrap();

        assert_eq!(p.median, 51.0);
        assert_eq!(p.p95, 96.0);
        assert_eq!(p.p99, 100.0);
    }

    #[test]
    fn test_single_sample() {
        let p = compute_percentiles(&[42.0]).unwrap();
        assert_eq!(p.median, 42.0);
        assert_eq!(p.p99, 42.0);
    }

    #[test]
    fn test_empty_samples() {
        assert_eq!(
            compute_percentiles(&[]).unwrap_err(),
            StatsError::EmptySampleSet
        );
        assert!(compute_percentile(&[], 99.0).is_err());
    }

    #[test]
    fn test_full_range_clamped() {
        let samples = vec![1.0, 2.0, 3.0];
        assert_eq!(compute_percentile(&samples, 100.0).unwrap(), 3.0);
        assert_eq!(compute_percentile(&samples, 0.0).unwrap(), 1.0);
    }
}
