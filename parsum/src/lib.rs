#![warn(missing_docs)]
//! # parsum
//!
//! Sum-of-squares microbenchmark comparing one thread against several.
//!
//! Both variants compute, over every integer `i` in `[1, N]`:
//! - `Σ i²` as an `f64`, accumulated in increasing order per range
//! - `Σ i²` as an `i64` with wrapping (modulo 2^64) arithmetic
//!
//! The multi-threaded variant splits `[1, N]` into contiguous ranges, one per
//! scoped worker thread, each writing into its own cache-line-aligned slot.
//! The results are combined in worker order after the join.
//!
//! ## Quick Start
//!
//! ```
//! use parsum::{Variant, run_variant};
//!
//! let single = run_variant(Variant::SingleThreaded, 10)?;
//! let dual = run_variant(Variant::MultiThreaded { workers: 2 }, 10)?;
//! assert_eq!(single.int_sum, 385);
//! assert_eq!(dual.int_sum, 385);
//! # Ok::<(), parsum::RunError>(())
//! ```
//!
//! ## Command Line
//!
//! ```text
//! parsum                      # N = 100_000_000, single then dual-threaded
//! parsum -n 1000000 -w 4 -r 5 # four workers, five measured runs each
//! parsum plan -w 3            # show the partition without running
//! parsum --format json -o target/parsum/report.json
//! ```

// Re-export core types
pub use parsum_core::{
    CACHE_LINE_SIZE, CacheAligned, CombinedResult, DEFAULT_N, DEFAULT_WORKERS, Elapsed,
    ParityCheck, PartialResult, PartitionError, Range, RangeError, RunError, Timer, Variant,
    accumulate, combine, float_tolerance, partition, run_parallel, run_single, run_variant,
};

// Re-export stats
pub use parsum_stats::{
    ComparisonResult, OutlierMethod, SummaryStatistics, compare_distributions, compute_summary,
};

// Re-export report model
pub use parsum_report::{OutputFormat, Report, generate_json_report, parse_json_report};

// Re-export the CLI entry points
pub use parsum_cli::{Cli, ParsumConfig, run, run_with_cli};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CombinedResult, ParityCheck, Range, Variant, partition, run_parallel, run_single,
        run_variant,
    };
}
