//! Summary Statistics
//!
//! - Mean, median, stddev computed from CLEANED data (outliers removed)
//! - Min, max, percentiles computed from ALL data (outliers preserved)

use crate::outliers::{OutlierMethod, detect_outliers};
use crate::percentiles::compute_percentile;

/// Summary of repeated elapsed-time samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p90: f64,
    pub sample_count: usize,
    pub outlier_count: usize,
}

/// Compute summary statistics with cleaned/raw separation
pub fn compute_summary(samples: &[f64], outlier_method: OutlierMethod) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::default();
    }

    let analysis = detect_outliers(samples, outlier_method);
    let cleaned = &analysis.cleaned_samples;
    let all = &analysis.all_samples;

    let mean = if cleaned.is_empty() {
        0.0
    } else {
        cleaned.iter().sum::<f64>() / cleaned.len() as f64
    };

    let median = compute_percentile(cleaned, 50.0);

    let std_dev = if cleaned.len() < 2 {
        0.0
    } else {
        let variance =
            cleaned.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (cleaned.len() - 1) as f64;
        variance.sqrt()
    };

    let min = all.iter().copied().fold(f64::INFINITY, f64::min);
    let max = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    SummaryStatistics {
        mean,
        median,
        std_dev,
        min,
        max,
        p90: compute_percentile(all, 90.0),
        sample_count: all.len(),
        outlier_count: analysis.outlier_indices.len(),
    }
}

impl SummaryStatistics {
    /// Coefficient of variation in percent
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }
}

/// Cycle-counter ticks per nanosecond across runs (≈ TSC frequency in GHz).
///
/// Returns 0.0 when no cycles were recorded.
pub fn cycles_per_ns(cycles: &[u64], nanos: &[u64]) -> f64 {
    let total_cycles: u64 = cycles.iter().sum();
    let total_nanos: u64 = nanos.iter().sum();
    if total_cycles == 0 || total_nanos == 0 {
        0.0
    } else {
        total_cycles as f64 / total_nanos as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let summary = compute_summary(&samples, OutlierMethod::tukey());

        assert!((summary.mean - 3.0).abs() < 1e-12);
        assert!((summary.median - 3.0).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.sample_count, 5);
        assert!((summary.std_dev - 2.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_outlier_handling() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let summary = compute_summary(&samples, OutlierMethod::tukey());

        // Mean from cleaned data, max from all data
        assert!(summary.mean < 10.0);
        assert_eq!(summary.max, 100.0);
        assert!(summary.p90 > 5.0);
        assert_eq!(summary.outlier_count, 1);
    }

    #[test]
    fn test_single_run() {
        let summary = compute_summary(&[0.25], OutlierMethod::tukey());
        assert_eq!(summary.mean, 0.25);
        assert_eq!(summary.median, 0.25);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.min, 0.25);
        assert_eq!(summary.max, 0.25);
    }

    #[test]
    fn test_coefficient_of_variation() {
        let summary = compute_summary(&[100.0; 5], OutlierMethod::None);
        assert_eq!(summary.coefficient_of_variation(), 0.0);
    }

    #[test]
    fn test_empty_samples() {
        let summary = compute_summary(&[], OutlierMethod::tukey());
        assert_eq!(summary.sample_count, 0);
        assert_eq!(summary.mean, 0.0);
    }

    #[test]
    fn test_cycles_per_ns() {
        let rate = cycles_per_ns(&[3_000, 3_100, 2_900], &[1_000, 1_033, 967]);
        assert!((rate - 3.0).abs() < 0.05);
        assert_eq!(cycles_per_ns(&[0, 0], &[10, 10]), 0.0);
        assert_eq!(cycles_per_ns(&[], &[]), 0.0);
    }
}
