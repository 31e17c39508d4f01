//! Benchmark Executor
//!
//! Runs the selected variants and turns their timings into a report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ExecutionConfig (CLI flags layered over parsum.toml)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Warmup, then measured runs per variant
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ statistics  │  Summary stats per variant (parallel)
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Build Report, speedup and sum parity
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Runs variants and checks run-to-run determinism
//! - [`statistics`] - Parallel statistics computation
//! - [`report`] - Report building with the baseline comparison
//! - [`formatting`] - Human-readable output formatting
//! - [`metadata`] - System metadata collection

mod execution;
mod formatting;
mod metadata;
mod report;
mod statistics;

pub use execution::{ExecutionConfig, ExecutionError, Executor, MAX_RUNS, VariantExecution};
pub use formatting::format_human_output;
pub use metadata::{build_report_meta, num_cpus};
pub use report::build_report;
pub use statistics::{VariantStatistics, compute_statistics};
