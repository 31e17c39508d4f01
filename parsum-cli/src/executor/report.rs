//! Report Building
//!
//! Assembles the serializable [`Report`] from executions and their
//! statistics, including the single- vs multi-threaded comparison when both
//! variants ran.

use super::execution::{ExecutionConfig, VariantExecution};
use super::metadata::build_report_meta;
use super::statistics::VariantStatistics;
use parsum_core::{ParityCheck, Variant, partition};
use parsum_report::{Comparison, Report, RunMetrics, VariantResult, WorkloadInfo};
use parsum_stats::{OutlierMethod, compare_distributions};

/// Build a report from executions and matching statistics
///
/// `stats` must be in the same order as `executions`, as returned by
/// [`compute_statistics`](super::compute_statistics).
pub fn build_report(
    config: &ExecutionConfig,
    workers: usize,
    executions: &[VariantExecution],
    stats: &[VariantStatistics],
) -> Report {
    let results: Vec<VariantResult> = executions
        .iter()
        .zip(stats)
        .map(|(exec, stat)| {
            let first = exec.first();
            let mut metrics = RunMetrics::from(&stat.summary);
            metrics.cycles_per_ns = stat.cycles_per_ns;

            VariantResult {
                variant: exec.variant,
                label: exec.variant.label(),
                float_sum: first.float_sum,
                int_sum: first.int_sum,
                elapsed_secs: exec.elapsed_secs(),
                cycles: exec.runs.iter().map(|r| r.elapsed.cycles).collect(),
                metrics,
            }
        })
        .collect();

    // Only the multi-threaded variant splits the range
    let multi_ran = executions
        .iter()
        .any(|e| matches!(e.variant, Variant::MultiThreaded { .. }));
    let ranges = if multi_ran {
        partition(config.n, workers)
            .map(|ranges| ranges.iter().map(|r| (r.start(), r.end())).collect())
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    Report {
        meta: build_report_meta(),
        workload: WorkloadInfo {
            n: config.n,
            workers,
            runs: config.runs,
            warmup_runs: config.warmup_runs,
            ranges,
        },
        comparison: build_comparison(config.n, executions),
        results,
    }
}

fn build_comparison(n: u64, executions: &[VariantExecution]) -> Option<Comparison> {
    let baseline = executions
        .iter()
        .find(|e| e.variant == Variant::SingleThreaded)?;
    let candidate = executions
        .iter()
        .find(|e| matches!(e.variant, Variant::MultiThreaded { .. }))?;

    let result = match compare_distributions(
        &baseline.elapsed_secs(),
        &candidate.elapsed_secs(),
        OutlierMethod::tukey(),
    ) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("skipping comparison: {}", e);
            return None;
        }
    };

    Some(Comparison {
        baseline: baseline.variant.label(),
        candidate: candidate.variant.label(),
        speedup: result.speedup,
        relative_change: result.relative_change,
        effect_size: result.effect_size,
        effect: result.effect_interpretation.to_string(),
        parity: ParityCheck::new(n, baseline.first(), candidate.first()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{Executor, compute_statistics};

    fn run(config: &ExecutionConfig) -> Report {
        let executions = Executor::new(config.clone()).execute().unwrap();
        let stats = compute_statistics(&executions);
        build_report(config, 2, &executions, &stats)
    }

    #[test]
    fn test_report_for_both_variants() {
        let config = ExecutionConfig {
            n: 10,
            runs: 2,
            ..ExecutionConfig::default()
        };
        let report = run(&config);

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].label, "Single-threaded");
        assert_eq!(report.results[1].label, "Dual-threaded");
        assert_eq!(report.results[1].int_sum, 385);
        assert_eq!(report.results[1].elapsed_secs.len(), 2);
        assert_eq!(report.workload.ranges, vec![(1, 5), (6, 10)]);

        let comparison = report.comparison.expect("both variants ran");
        assert!(comparison.parity.passed());
        assert_eq!(comparison.baseline, "Single-threaded");
        assert_eq!(comparison.candidate, "Dual-threaded");
    }

    #[test]
    fn test_no_comparison_for_single_variant() {
        let config = ExecutionConfig {
            n: 10,
            variants: vec![Variant::SingleThreaded],
            ..ExecutionConfig::default()
        };
        let report = run(&config);

        assert_eq!(report.results.len(), 1);
        assert!(report.comparison.is_none());
        assert!(report.result(Variant::SingleThreaded).is_some());
        assert!(report.workload.ranges.is_empty());
    }
}
