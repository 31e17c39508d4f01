//! Variant Execution
//!
//! Runs each selected variant `warmup_runs + runs` times over the same
//! workload and keeps the measured runs.
//!
//! ```text
//! ExecutionConfig
//!        │
//!        ▼
//! ┌──────────────────┐
//! │     Executor     │  warmup runs (discarded) → measured runs
//! └────────┬─────────┘
//!          │
//!          ▼
//!  VariantExecution (one CombinedResult per measured run)
//! ```
//!
//! Every run of a variant must reproduce the first run's sums bit-for-bit;
//! anything else is reported as [`ExecutionError::NonDeterministic`].

use indicatif::{ProgressBar, ProgressStyle};
use parsum_core::{CombinedResult, RunError, Variant, run_variant};

/// Upper bound on warmup plus measured runs per variant
pub const MAX_RUNS: usize = 1_000_000;

/// Configuration for an execution
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    /// Upper bound of `[1, n]`
    pub n: u64,
    /// Variants to run, in order
    pub variants: Vec<Variant>,
    /// Measured runs per variant (at least 1)
    pub runs: usize,
    /// Unmeasured runs per variant
    pub warmup_runs: usize,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            n: parsum_core::DEFAULT_N,
            variants: vec![
                Variant::SingleThreaded,
                Variant::MultiThreaded {
                    workers: parsum_core::DEFAULT_WORKERS,
                },
            ],
            runs: 1,
            warmup_runs: 0,
            show_progress: false,
        }
    }
}

/// Measured runs of a single variant
#[derive(Debug, Clone)]
pub struct VariantExecution {
    pub variant: Variant,
    /// One entry per measured run, in run order. Never empty.
    pub runs: Vec<CombinedResult>,
}

impl VariantExecution {
    /// Sums of the first measured run (identical across runs)
    pub fn first(&self) -> &CombinedResult {
        &self.runs[0]
    }

    /// Elapsed seconds per run
    pub fn elapsed_secs(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.elapsed.as_secs_f64()).collect()
    }
}

/// Failure while executing variants
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("{variant} run failed: {source}")]
    Run {
        variant: Variant,
        #[source]
        source: RunError,
    },

    #[error(
        "{variant} run {run} produced different sums (float {got_float:?} vs {want_float:?}, integer {got_int} vs {want_int})"
    )]
    NonDeterministic {
        variant: Variant,
        run: usize,
        got_float: f64,
        want_float: f64,
        got_int: i64,
        want_int: i64,
    },

    #[error("at least one measured run is required")]
    NoRuns,

    #[error("{requested} runs per variant requested; at most {max} are supported")]
    TooManyRuns { requested: usize, max: usize },
}

/// Runs variants in order and collects their measured runs
pub struct Executor {
    config: ExecutionConfig,
}

impl Executor {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Execute every configured variant
    pub fn execute(&self) -> Result<Vec<VariantExecution>, ExecutionError> {
        if self.config.runs == 0 {
            return Err(ExecutionError::NoRuns);
        }

        let per_variant = self
            .config
            .warmup_runs
            .checked_add(self.config.runs)
            .filter(|&total| total <= MAX_RUNS)
            .ok_or(ExecutionError::TooManyRuns {
                requested: self.config.warmup_runs.saturating_add(self.config.runs),
                max: MAX_RUNS,
            })?;
        let pb = self.progress_bar(per_variant as u64 * self.config.variants.len() as u64);

        let mut executions = Vec::with_capacity(self.config.variants.len());
        for &variant in &self.config.variants {
            pb.set_message(variant.label());
            executions.push(self.execute_variant(variant, &pb)?);
        }

        pb.finish_and_clear();
        Ok(executions)
    }

    fn execute_variant(
        &self,
        variant: Variant,
        pb: &ProgressBar,
    ) -> Result<VariantExecution, ExecutionError> {
        let run = || {
            run_variant(variant, self.config.n)
                .map_err(|source| ExecutionError::Run { variant, source })
        };

        for i in 0..self.config.warmup_runs {
            let result = run()?;
            tracing::debug!(%variant, run = i, elapsed_ns = result.elapsed.as_nanos(), "warmup run");
            pb.inc(1);
        }

        let mut runs: Vec<CombinedResult> = Vec::with_capacity(self.config.runs);
        for i in 0..self.config.runs {
            let result = run()?;
            tracing::info!(
                %variant,
                run = i,
                elapsed_secs = result.elapsed.as_secs_f64(),
                "measured run"
            );

            if let Some(reference) = runs.first() {
                if !result.same_sums(reference) {
                    return Err(ExecutionError::NonDeterministic {
                        variant,
                        run: i,
                        got_float: result.float_sum,
                        want_float: reference.float_sum,
                        got_int: result.int_sum,
                        want_int: reference.int_sum,
                    });
                }
            }

            runs.push(result);
            pb.inc(1);
        }

        Ok(VariantExecution { variant, runs })
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(n: u64, runs: usize, warmup_runs: usize) -> ExecutionConfig {
        ExecutionConfig {
            n,
            variants: vec![Variant::SingleThreaded, Variant::MultiThreaded { workers: 2 }],
            runs,
            warmup_runs,
            show_progress: false,
        }
    }

    #[test]
    fn test_runs_every_variant_in_order() {
        let executions = Executor::new(config(10, 3, 1)).execute().unwrap();

        assert_eq!(executions.len(), 2);
        assert_eq!(executions[0].variant, Variant::SingleThreaded);
        assert_eq!(executions[1].variant, Variant::MultiThreaded { workers: 2 });
        for exec in &executions {
            assert_eq!(exec.runs.len(), 3);
            assert_eq!(exec.elapsed_secs().len(), 3);
            assert_eq!(exec.first().int_sum, 385);
            assert!(exec.runs.iter().all(|r| r.same_sums(exec.first())));
        }
    }

    #[test]
    fn test_zero_runs_rejected() {
        let err = Executor::new(config(10, 0, 0)).execute().unwrap_err();
        assert!(matches!(err, ExecutionError::NoRuns));
    }

    #[test]
    fn test_invalid_workload_surfaces_variant() {
        let mut cfg = config(0, 1, 0);
        cfg.variants = vec![Variant::MultiThreaded { workers: 2 }];
        let err = Executor::new(cfg).execute().unwrap_err();
        assert!(matches!(
            err,
            ExecutionError::Run {
                variant: Variant::MultiThreaded { workers: 2 },
                ..
            }
        ));
        assert!(err.to_string().starts_with("Dual-threaded run failed"));
    }

    #[test]
    fn test_run_count_overflow_rejected() {
        let err = Executor::new(config(10, usize::MAX, 1)).execute().unwrap_err();
        assert!(matches!(
            err,
            ExecutionError::TooManyRuns {
                requested: usize::MAX,
                max: MAX_RUNS
            }
        ));

        let err = Executor::new(config(10, MAX_RUNS, 1)).execute().unwrap_err();
        assert!(matches!(err, ExecutionError::TooManyRuns { .. }));
    }

    #[test]
    fn test_default_config() {
        let cfg = ExecutionConfig::default();
        assert_eq!(cfg.n, 100_000_000);
        assert_eq!(cfg.runs, 1);
        assert_eq!(cfg.variants.len(), 2);
    }
}
