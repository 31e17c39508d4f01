//! Output Formatting
//!
//! Human-readable report: one block per variant, then the comparison.
//!
//! ```text
//! Single-threaded Results:
//! Float sum: 3.3333333833333335e23
//! Integer sum: 672921401752298880
//! Time: 0.094510 seconds
//! ```
//!
//! Float sums use `{:?}` so they round-trip and switch to exponent form for
//! large magnitudes. Times are the median over measured runs.

use parsum_report::{Comparison, Report, VariantResult};

/// Format a report for terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    for (i, result) in report.results.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        push_variant(&mut output, result);
    }

    if let Some(comparison) = &report.comparison {
        output.push('\n');
        push_comparison(&mut output, comparison);
    }

    output
}

fn push_variant(output: &mut String, result: &VariantResult) {
    let metrics = &result.metrics;

    output.push_str(&format!("{} Results:\n", result.label));
    output.push_str(&format!("Float sum: {:?}\n", result.float_sum));
    output.push_str(&format!("Integer sum: {}\n", result.int_sum));
    output.push_str(&format!("Time: {:.6} seconds\n", metrics.median_secs));

    if metrics.runs > 1 {
        output.push_str(&format!(
            "  runs: {}  mean: {:.6} s  min: {:.6} s  max: {:.6} s  stddev: {:.6} s  cv: {:.1}%\n",
            metrics.runs,
            metrics.mean_secs,
            metrics.min_secs,
            metrics.max_secs,
            metrics.std_dev_secs,
            metrics.cv_percent
        ));
        if metrics.outliers > 0 {
            output.push_str(&format!("  outliers: {}\n", metrics.outliers));
        }
    }
}

fn push_comparison(output: &mut String, comparison: &Comparison) {
    let parity = &comparison.parity;

    output.push_str(&format!(
        "Comparison ({} vs {}):\n",
        comparison.candidate, comparison.baseline
    ));
    output.push_str(&format!("  speedup: {:.2}x\n", comparison.speedup));
    output.push_str(&format!(
        "  integer sums: {}\n",
        if parity.int_match { "match" } else { "MISMATCH" }
    ));
    output.push_str(&format!(
        "  float sums: relative difference {:.3e} (tolerance {:.3e}) {}\n",
        parity.float_relative_diff,
        parity.float_tolerance,
        if parity.passed() { "ok" } else { "FAILED" }
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parsum_core::{ParityCheck, Variant};
    use parsum_report::{ReportMeta, RunMetrics, SystemInfo, WorkloadInfo};

    fn result(variant: Variant, secs: &[f64]) -> VariantResult {
        let median = secs[secs.len() / 2];
        VariantResult {
            variant,
            label: variant.label(),
            float_sum: 385.0,
            int_sum: 385,
            elapsed_secs: secs.to_vec(),
            cycles: vec![0; secs.len()],
            metrics: RunMetrics {
                runs: secs.len(),
                mean_secs: median,
                median_secs: median,
                min_secs: secs[0],
                max_secs: secs[secs.len() - 1],
                ..RunMetrics::default()
            },
        }
    }

    fn report(results: Vec<VariantResult>, comparison: Option<Comparison>) -> Report {
        Report {
            meta: ReportMeta {
                schema_version: 1,
                version: "0.0.0".to_string(),
                timestamp: Utc::now(),
                system: SystemInfo {
                    os: "linux".to_string(),
                    arch: "x86_64".to_string(),
                    cpu: "Unknown".to_string(),
                    cpu_cores: 2,
                },
            },
            workload: WorkloadInfo {
                n: 10,
                workers: 2,
                runs: 1,
                warmup_runs: 0,
                ranges: vec![(1, 5), (6, 10)],
            },
            results,
            comparison,
        }
    }

    #[test]
    fn test_single_block_line_order() {
        let output = format_human_output(&report(
            vec![result(Variant::SingleThreaded, &[0.0125])],
            None,
        ));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Single-threaded Results:",
                "Float sum: 385.0",
                "Integer sum: 385",
                "Time: 0.012500 seconds",
            ]
        );
    }

    #[test]
    fn test_multiple_runs_add_stats_line() {
        let output = format_human_output(&report(
            vec![result(Variant::MultiThreaded { workers: 2 }, &[0.1, 0.2, 0.3])],
            None,
        ));

        assert!(output.starts_with("Dual-threaded Results:\n"));
        assert!(output.contains("Time: 0.200000 seconds"));
        assert!(output.contains("  runs: 3  mean: 0.200000 s  min: 0.100000 s  max: 0.300000 s"));
        assert!(output.contains("stddev: 0.000000 s  cv: 0.0%\n"));
    }

    #[test]
    fn test_comparison_block() {
        let comparison = Comparison {
            baseline: "Single-threaded".to_string(),
            candidate: "Dual-threaded".to_string(),
            speedup: 1.9,
            relative_change: -47.0,
            effect_size: -3.0,
            effect: "large".to_string(),
            parity: ParityCheck {
                int_match: true,
                float_relative_diff: 0.0,
                float_tolerance: 1e-9,
            },
        };
        let output = format_human_output(&report(
            vec![
                result(Variant::SingleThreaded, &[0.2]),
                result(Variant::MultiThreaded { workers: 2 }, &[0.1]),
            ],
            Some(comparison),
        ));

        let single = output.find("Single-threaded Results:").unwrap();
        let dual = output.find("Dual-threaded Results:").unwrap();
        let cmp = output.find("Comparison (Dual-threaded vs Single-threaded):").unwrap();
        assert!(single < dual && dual < cmp);
        assert!(output.contains("  speedup: 1.90x\n"));
        assert!(output.contains("  integer sums: match\n"));
        assert!(output.trim_end().ends_with("ok"));
    }
}
