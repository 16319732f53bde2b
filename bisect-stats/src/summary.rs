//! Summary Statistics
//!
//! Mean, extrema and standard deviation over a non-empty sample set.
//! Standard deviation always uses the sample (n-1) denominator; a single
//! sample has a standard deviation of zero.

use crate::StatsError;
use crate::percentiles::{Percentiles, compute_percentiles};
use serde::{Deserialize, Serialize};

/// Basic summary used by the batch orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Arithmetic mean
    pub avg: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Sample standard deviation (n-1)
    pub std_dev: f64,
    /// Number of samples reduced
    pub sample_count: usize,
}

/// Summary plus nearest-rank percentiles, used by the detailed profiler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetailedSummary {
    /// Mean, extrema, standard deviation
    #[serde(flatten)]
    pub summary: StatsSummary,
    /// Median, p95, p99
    #[serde(flatten)]
    pub percentiles: Percentiles,
}

/// Reduce samples into a [`StatsSummary`]
pub fn compute_summary(samples: &[f64]) -> Result<StatsSummary, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptySampleSet);
    }

    let n = samples.len();
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });

    // A rounded sum can drift outside the extrema for repeated values
    if min == max {
        return Ok(StatsSummary {
            avg: min,
            min,
            max,
            std_dev: 0.0,
            sample_count: n,
        });
    }
    let mean = samples.iter().sum::<f64>() / n as f64;
    // an all-NaN set leaves min > max
    let avg = if min < max { mean.clamp(min, max) } else { mean };

    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = samples.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    Ok(StatsSummary {
        avg,
        min,
        max,
        std_dev,
        sample_count: n,
    })
}

/// Reduce samples into a [`DetailedSummary`]
pub fn compute_detailed_summary(samples: &[f64]) -> Result<DetailedSummary, StatsError> {
    Ok(DetailedSummary {
        summary: compute_summary(samples)?,
        percentiles: compute_percentiles(samples)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let summary = compute_summary(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert!((summary.avg - 3.0).abs() < f64::EPSILON);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        // sample variance of 1..=5 is 2.5
        assert!((summary.std_dev - 2.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.sample_count, 5);
    }

    #[test]
    fn test_constant_samples_have_zero_std_dev() {
        let summary = compute_summary(&[7.5; 32]).unwrap();
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn test_repeated_inexact_values() {
        // 0.1 and 1.1 have no exact binary form, so sum / n rounds
        for (value, n) in [(0.1, 3), (0.1, 10), (1.1, 7), (0.041, 20)] {
            let summary = compute_summary(&vec![value; n]).unwrap();
            assert_eq!(summary.avg, value, "{value} x {n}");
            assert!(summary.min <= summary.avg && summary.avg <= summary.max);
            assert_eq!(summary.std_dev, 0.0, "{value} x {n}");
        }
    }

    #[test]
    fn test_avg_stays_within_extrema() {
        let samples = [0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.10000000000000002];
        let summary = compute_summary(&samples).unwrap();
        assert!(summary.min <= summary.avg);
        assert!(summary.avg <= summary.max);
        assert!(summary.std_dev >= 0.0);
    }

    #[test]
    fn test_single_sample() {
        let summary = compute_summary(&[0.25]).unwrap();
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.min, 0.25);
        assert_eq!(summary.max, 0.25);
    }

    #[test]
    fn test_min_avg_max_ordering() {
        let samples = [0.9, 0.01, 13.0, 2.2, 2.2, 7.0, 0.3];
        let summary = compute_summary(&samples).unwrap();
        assert!(summary.min <= summary.avg);
        assert!(summary.avg <= summary.max);
    }

    #[test]
    fn test_empty_samples() {
        assert_eq!(compute_summary(&[]), Err(StatsError::EmptySampleSet));
        assert!(compute_detailed_summary(&[]).is_err());
    }

    #[test]
    fn test_detailed_summary() {
        let detailed = compute_detailed_summary(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(detailed.percentiles.median, 3.0);
        assert_eq!(detailed.percentiles.p99, 5.0);
        assert!((detailed.summary.avg - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_detailed_summary_serializes_flat() {
        let detailed = compute_detailed_summary(&[2.0, 4.0]).unwrap();
        let json = serde_json::to_value(detailed).unwrap();
        assert!(json.get("stdDev").is_some());
        assert!(json.get("p95").is_some());
    }
}
