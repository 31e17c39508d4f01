#![warn(missing_docs)]
//! parsum Statistics
//!
//! Turns repeated elapsed-time samples into something worth printing:
//! - Outlier detection via Tukey's IQR fences
//! - Percentiles over all samples
//! - Summary statistics (cleaned central tendency, raw extremes)
//! - Baseline vs candidate comparison with speedup and effect size

mod comparison;
mod outliers;
mod percentiles;
mod summary;

pub use comparison::{
    ComparisonError, ComparisonResult, EffectInterpretation, compare_distributions,
};
pub use outliers::{OutlierAnalysis, OutlierMethod, TUKEY_FENCE, detect_outliers};
pub use percentiles::compute_percentile;
pub use summary::{SummaryStatistics, compute_summary, cycles_per_ns};
