#![warn(missing_docs)]
//! parsum Core - Partitioning, Accumulation and Runners
//!
//! This crate holds everything that sits inside the timed region:
//! - `Range` and the index-based partitioner
//! - The worker accumulator (`f64` and wrapping `i64` sums of squares)
//! - `CacheAligned` per-worker result slots
//! - Single- and multi-threaded runners built on `std::thread::scope`
//! - Wall-clock timing with cycle counters where the CPU exposes one

mod accumulate;
mod error;
mod measure;
mod range;
mod runner;

pub use accumulate::{CACHE_LINE_SIZE, CacheAligned, PartialResult, accumulate};
pub use error::{PartitionError, RangeError, RunError};
pub use measure::{Elapsed, HAS_CYCLE_COUNTER, Timer};
pub use range::{Range, partition};
pub use runner::{
    CombinedResult, ParityCheck, Variant, combine, float_tolerance, run_parallel, run_single,
    run_variant,
};

/// Default problem size, `[1, 100_000_000]`
pub const DEFAULT_N: u64 = 100_000_000;

/// Default number of workers in the multi-threaded variant
pub const DEFAULT_WORKERS: usize = 2;
