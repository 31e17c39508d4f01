//! Statistics Computation
//!
//! Summaries for each variant's measured runs, computed in parallel with
//! Rayon. Runs finish before this stage starts, so the pool never competes
//! with the timed workers.

use super::execution::VariantExecution;
use parsum_core::Variant;
use parsum_stats::{OutlierMethod, SummaryStatistics, compute_summary, cycles_per_ns};
use rayon::prelude::*;

/// Summary of one variant's elapsed times
#[derive(Debug, Clone)]
pub struct VariantStatistics {
    pub variant: Variant,
    pub summary: SummaryStatistics,
    /// Cycle ticks per nanosecond over all runs (0.0 without a cycle counter)
    pub cycles_per_ns: f64,
}

/// Compute statistics for every variant, preserving input order
pub fn compute_statistics(executions: &[VariantExecution]) -> Vec<VariantStatistics> {
    executions
        .par_iter()
        .map(|exec| {
            let cycles: Vec<u64> = exec.runs.iter().map(|r| r.elapsed.cycles).collect();
            let nanos: Vec<u64> = exec.runs.iter().map(|r| r.elapsed.as_nanos()).collect();

            VariantStatistics {
                variant: exec.variant,
                summary: compute_summary(&exec.elapsed_secs(), OutlierMethod::tukey()),
                cycles_per_ns: cycles_per_ns(&cycles, &nanos),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsum_core::{CombinedResult, Elapsed};
    use std::time::Duration;

    fn execution(variant: Variant, millis: &[u64]) -> VariantExecution {
        VariantExecution {
            variant,
            runs: millis
                .iter()
                .map(|&ms| CombinedResult {
                    variant,
                    float_sum: 385.0,
                    int_sum: 385,
                    elapsed: Elapsed {
                        duration: Duration::from_millis(ms),
                        cycles: ms * 3_000_000,
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn test_statistics_per_variant() {
        let executions = vec![
            execution(Variant::SingleThreaded, &[200, 210, 190]),
            execution(Variant::MultiThreaded { workers: 2 }, &[100, 105, 95]),
        ];
        let stats = compute_statistics(&executions);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].variant, Variant::SingleThreaded);
        assert!((stats[0].summary.median - 0.2).abs() < 1e-9);
        assert!((stats[1].summary.median - 0.1).abs() < 1e-9);
        assert_eq!(stats[1].summary.sample_count, 3);
        assert!((stats[0].cycles_per_ns - 3.0).abs() < 1e-9);
    }
}
