//! Error types for ranges, partitioning and runs.

use thiserror::Error;

/// Invalid inclusive range bounds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The problem size was zero, so `[1, N]` has no elements
    #[error("range [1, 0] is empty; N must be at least 1")]
    Empty,

    /// The lower bound was zero
    #[error("range must start at 1 or above, got start = 0")]
    ZeroStart,

    /// The lower bound exceeded the upper bound
    #[error("range start {start} exceeds end {end}")]
    Inverted {
        /// Requested lower bound
        start: u64,
        /// Requested upper bound
        end: u64,
    },
}

/// Invalid worker count for a range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// Zero workers were requested
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// The range being split is invalid
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Failure while dispatching or joining workers
#[derive(Debug, Error)]
pub enum RunError {
    /// The workload could not be split
    #[error(transparent)]
    Partition(#[from] PartitionError),

    /// The OS refused to start a worker thread
    #[error("failed to spawn worker {index}: {source}")]
    Spawn {
        /// Worker index
        index: usize,
        #[source]
        source: std::io::Error,
    },

    /// A worker panicked before writing its slot
    #[error("worker {index} panicked: {message}")]
    WorkerPanicked {
        /// Worker index
        index: usize,
        /// Panic payload, when it was a string
        message: String,
    },
}
