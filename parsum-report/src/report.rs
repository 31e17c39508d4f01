//! Report Data Structures

use chrono::{DateTime, Utc};
use parsum_core::{ParityCheck, Variant};
use parsum_stats::SummaryStatistics;
use serde::{Deserialize, Serialize};

/// Version of the JSON layout below
pub const SCHEMA_VERSION: u32 = 1;

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub workload: WorkloadInfo,
    pub results: Vec<VariantResult>,
    pub comparison: Option<Comparison>,
}

impl Report {
    /// Result for a given variant, if it ran
    pub fn result(&self, variant: Variant) -> Option<&VariantResult> {
        self.results.iter().find(|r| r.variant == variant)
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub system: SystemInfo,
}

/// Host the runs executed on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
}

/// What was summed and how often
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadInfo {
    /// Upper bound of `[1, n]`
    pub n: u64,
    /// Workers in the multi-threaded variant
    pub workers: usize,
    /// Measured runs per variant
    pub runs: usize,
    /// Unmeasured runs per variant
    pub warmup_runs: usize,
    /// Inclusive `(start, end)` per worker
    pub ranges: Vec<(u64, u64)>,
}

/// Sums and timings of one variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantResult {
    pub variant: Variant,
    pub label: String,
    pub float_sum: f64,
    pub int_sum: i64,
    /// Elapsed seconds of each measured run, in run order
    pub elapsed_secs: Vec<f64>,
    /// Cycle ticks of each measured run (all 0 without a cycle counter)
    pub cycles: Vec<u64>,
    pub metrics: RunMetrics,
}

/// Elapsed-time statistics over the measured runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunMetrics {
    pub runs: usize,
    pub mean_secs: f64,
    pub median_secs: f64,
    pub std_dev_secs: f64,
    pub min_secs: f64,
    pub max_secs: f64,
    pub p90_secs: f64,
    /// Standard deviation relative to the mean, in percent
    pub cv_percent: f64,
    pub outliers: usize,
    pub cycles_per_ns: f64,
}

impl From<&SummaryStatistics> for RunMetrics {
    fn from(stats: &SummaryStatistics) -> Self {
        Self {
            runs: stats.sample_count,
            mean_secs: stats.mean,
            median_secs: stats.median,
            std_dev_secs: stats.std_dev,
            min_secs: stats.min,
            max_secs: stats.max,
            p90_secs: stats.p90,
            cv_percent: stats.coefficient_of_variation(),
            outliers: stats.outlier_count,
            // Filled from the cycle samples
            cycles_per_ns: 0.0,
        }
    }
}

/// Baseline (single-threaded) vs candidate (multi-threaded)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub baseline: String,
    pub candidate: String,
    /// Baseline median / candidate median
    pub speedup: f64,
    /// Change of the mean in percent (negative = candidate faster)
    pub relative_change: f64,
    pub effect_size: f64,
    pub effect: String,
    pub parity: ParityCheck,
}
