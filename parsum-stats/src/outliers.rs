//! Outlier Detection
//!
//! Tukey fences over the interquartile range. Outliers are dropped only from
//! the central-tendency estimates (mean, median, stddev); min, max and
//! percentiles keep every run.

use crate::percentiles::compute_percentile;

/// Fence multiplier for the IQR method
pub const TUKEY_FENCE: f64 = 1.5;

/// Method for outlier detection
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutlierMethod {
    /// Samples outside `[Q1 - k*IQR, Q3 + k*IQR]` are outliers
    Iqr {
        /// Fence multiplier
        k: f64,
    },
    /// Keep every sample
    #[default]
    None,
}

impl OutlierMethod {
    /// IQR detection with the standard 1.5 fence
    pub fn tukey() -> Self {
        OutlierMethod::Iqr { k: TUKEY_FENCE }
    }
}

/// Result of outlier analysis
#[derive(Debug, Clone)]
pub struct OutlierAnalysis {
    /// Original samples, in input order
    pub all_samples: Vec<f64>,
    /// Samples inside the fences
    pub cleaned_samples: Vec<f64>,
    /// Indices of samples outside the fences
    pub outlier_indices: Vec<usize>,
    /// Lower fence
    pub lower_bound: f64,
    /// Upper fence
    pub upper_bound: f64,
}

/// Detect outliers in samples using the given method
pub fn detect_outliers(samples: &[f64], method: OutlierMethod) -> OutlierAnalysis {
    let (lower_bound, upper_bound) = match method {
        OutlierMethod::Iqr { k } if samples.len() >= 4 => {
            let q1 = compute_percentile(samples, 25.0);
            let q3 = compute_percentile(samples, 75.0);
            let iqr = q3 - q1;
            (q1 - k * iqr, q3 + k * iqr)
        }
        // Quartiles of fewer than four runs say nothing useful
        _ => (f64::NEG_INFINITY, f64::INFINITY),
    };

    let mut outlier_indices = Vec::new();
    let mut cleaned = Vec::with_capacity(samples.len());

    for (i, &sample) in samples.iter().enumerate() {
        if sample < lower_bound || sample > upper_bound {
            outlier_indices.push(i);
        } else {
            cleaned.push(sample);
        }
    }

    OutlierAnalysis {
        all_samples: samples.to_vec(),
        cleaned_samples: cleaned,
        outlier_indices,
        lower_bound,
        upper_bound,
    }
}
