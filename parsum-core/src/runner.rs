//! Variant Runners
//!
//! Drives one measured run of a [`Variant`] over `[1, N]`:
//!
//! ```text
//! Idle ──► Dispatched ──► Joined ──► (combined, handed to the reporter)
//! ```
//!
//! The multi-threaded variant partitions the range, spawns one scoped thread
//! per sub-range, and has each worker write into its own [`CacheAligned`]
//! slot. The join is the only synchronization point. The timer spans from
//! just before the first spawn to just after the last join.

use crate::accumulate::{CacheAligned, PartialResult, accumulate};
use crate::error::RunError;
use crate::measure::{Elapsed, Timer};
use crate::range::Range;
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::thread;

/// Which implementation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Variant {
    /// One pass over the whole range on the calling thread
    SingleThreaded,
    /// `workers` scoped threads over contiguous sub-ranges
    MultiThreaded {
        /// Requested thread count; at most `n` of them get a range
        workers: usize,
    },
}

impl Variant {
    /// Label printed at the top of a result block
    pub fn label(&self) -> String {
        match self {
            Variant::SingleThreaded => "Single-threaded".to_string(),
            Variant::MultiThreaded { workers: 2 } => "Dual-threaded".to_string(),
            Variant::MultiThreaded { workers } => format!("{workers}-threaded"),
        }
    }

    /// Number of threads doing the arithmetic
    pub fn workers(&self) -> usize {
        match self {
            Variant::SingleThreaded => 1,
            Variant::MultiThreaded { workers } => *workers,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Final sums and timing of one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombinedResult {
    /// Which implementation produced the sums
    pub variant: Variant,
    /// Partial float sums added in worker order
    pub float_sum: f64,
    /// Partial integer sums added in worker order, wrapping
    pub int_sum: i64,
    /// From just before dispatch to just after the last join
    pub elapsed: Elapsed,
}

impl CombinedResult {
    /// Whether both sums are bit-identical to `other`'s
    pub fn same_sums(&self, other: &CombinedResult) -> bool {
        self.int_sum == other.int_sum && self.float_sum.to_bits() == other.float_sum.to_bits()
    }
}

/// Sum partials in worker index order
pub fn combine<I>(partials: I) -> PartialResult
where
    I: IntoIterator<Item = PartialResult>,
{
    partials
        .into_iter()
        .fold(PartialResult::default(), PartialResult::merge)
}

/// Run the single-threaded baseline over `[1, n]`
pub fn run_single(n: u64) -> Result<CombinedResult, RunError> {
    let range = Range::full(n).map_err(crate::error::PartitionError::from)?;

    tracing::debug!(n, "dispatching single-threaded run");
    let timer = Timer::start();
    let partial = accumulate(black_box(range));
    let elapsed = timer.stop();
    tracing::debug!(elapsed_ns = elapsed.as_nanos(), "single-threaded run joined");

    Ok(CombinedResult {
        variant: Variant::SingleThreaded,
        float_sum: partial.float_sum,
        int_sum: partial.int_sum,
        elapsed,
    })
}

/// Run `workers` threads over `[1, n]`, each on its own sub-range
///
/// With more workers than elements only `n` threads are spawned; the rest
/// would sum nothing.
pub fn run_parallel(n: u64, workers: usize) -> Result<CombinedResult, RunError> {
    let ranges = crate::range::partition(n, workers)?;
    let mut slots = vec![CacheAligned::new(PartialResult::default()); ranges.len()];

    if ranges.len() < workers {
        tracing::debug!(workers, busy = ranges.len(), "fewer elements than workers");
    }
    tracing::debug!(n, workers, "dispatching multi-threaded run");
    let timer = Timer::start();
    thread::scope(|scope| -> Result<(), RunError> {
        let mut handles = Vec::with_capacity(ranges.len());

        for (index, (slot, range)) in slots.iter_mut().zip(ranges.iter().copied()).enumerate() {
            let handle = thread::Builder::new()
                .name(format!("parsum-worker-{index}"))
                .spawn_scoped(scope, move || {
                    slot.0 = accumulate(black_box(range));
                })
                .map_err(|source| RunError::Spawn { index, source })?;
            handles.push(handle);
        }

        for (index, handle) in handles.into_iter().enumerate() {
            handle.join().map_err(|panic| RunError::WorkerPanicked {
                index,
                message: panic_message(panic.as_ref()),
            })?;
        }

        Ok(())
    })?;
    let elapsed = timer.stop();
    tracing::debug!(elapsed_ns = elapsed.as_nanos(), "multi-threaded run joined");

    for (range, slot) in ranges.iter().zip(&slots) {
        tracing::trace!(%range, float_sum = slot.float_sum, int_sum = slot.int_sum, "partial");
    }

    let combined = combine(slots.into_iter().map(CacheAligned::into_inner));

    Ok(CombinedResult {
        variant: Variant::MultiThreaded { workers },
        float_sum: combined.float_sum,
        int_sum: combined.int_sum,
        elapsed,
    })
}

/// Run one measured pass of `variant` over `[1, n]`
pub fn run_variant(variant: Variant, n: u64) -> Result<CombinedResult, RunError> {
    match variant {
        Variant::SingleThreaded => run_single(n),
        Variant::MultiThreaded { workers } => run_parallel(n, workers),
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Agreement between a baseline and a candidate run over the same range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParityCheck {
    /// Integer sums are identical
    pub int_match: bool,
    /// `|candidate - baseline| / |baseline|` for the float sums
    pub float_relative_diff: f64,
    /// Maximum accepted relative difference, `(n + 1) * f64::EPSILON`
    pub float_tolerance: f64,
}

impl ParityCheck {
    /// Compare two runs over `[1, n]`
    pub fn new(n: u64, baseline: &CombinedResult, candidate: &CombinedResult) -> Self {
        let float_relative_diff = if baseline.float_sum == 0.0 {
            (candidate.float_sum - baseline.float_sum).abs()
        } else {
            ((candidate.float_sum - baseline.float_sum) / baseline.float_sum).abs()
        };

        Self {
            int_match: baseline.int_sum == candidate.int_sum,
            float_relative_diff,
            float_tolerance: float_tolerance(n),
        }
    }

    /// Integer sums equal and float sums within tolerance
    pub fn passed(&self) -> bool {
        self.int_match && self.float_relative_diff <= self.float_tolerance
    }
}

/// Worst-case relative rounding error of summing `n` positive terms
pub fn float_tolerance(n: u64) -> f64 {
    (n as f64 + 1.0) * f64::EPSILON
}
