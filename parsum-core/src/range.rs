//! Inclusive Ranges and the Partitioner
//!
//! A [`Range`] is a non-empty inclusive span `[start, end]` with `start >= 1`.
//! [`Range::partition`] splits it into contiguous sub-ranges whose sizes
//! differ by at most one; the first `len % parts` sub-ranges carry the extra
//! element. Asking for more parts than there are elements yields one
//! single-element sub-range per element; the surplus workers stay idle and
//! contribute nothing to the sums.

use crate::error::{PartitionError, RangeError};
use serde::Serialize;

/// Inclusive range of positive integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    start: u64,
    end: u64,
}

impl Range {
    /// Build `[start, end]`, rejecting zero starts and inverted bounds
    pub fn new(start: u64, end: u64) -> Result<Self, RangeError> {
        if start == 0 {
            return Err(RangeError::ZeroStart);
        }
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// The full problem range `[1, n]`
    pub fn full(n: u64) -> Result<Self, RangeError> {
        if n == 0 {
            return Err(RangeError::Empty);
        }
        Self::new(1, n)
    }

    /// First integer in the range
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last integer in the range, inclusive
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of integers covered. Never zero; cannot overflow since `start >= 1`.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every integer in increasing order
    pub fn iter(&self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }

    /// Split into `min(parts, len)` disjoint contiguous sub-ranges covering `self`
    pub fn partition(&self, parts: usize) -> Result<Vec<Range>, PartitionError> {
        if parts == 0 {
            return Err(PartitionError::NoWorkers);
        }

        let len = self.len();
        let parts_u64 = u64::try_from(parts).unwrap_or(u64::MAX).min(len);

        let base = len / parts_u64;
        let rem = len % parts_u64;

        let ranges = (0..parts_u64)
            .map(|k| {
                let start = self.start + k * base + k.min(rem);
                let size = base + u64::from(k < rem);
                // size >= 1; subtract first so a sub-range ending at u64::MAX cannot overflow
                Range {
                    start,
                    end: start + (size - 1),
                }
            })
            .collect();

        Ok(ranges)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl IntoIterator for Range {
    type Item = u64;
    type IntoIter = std::ops::RangeInclusive<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Split `[1, n]` across `workers`
pub fn partition(n: u64, workers: usize) -> Result<Vec<Range>, PartitionError> {
    Range::full(n)?.partition(workers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_partition(n: u64, workers: usize) {
        let ranges = partition(n, workers).unwrap();
        let busy = (workers as u64).min(n) as usize;
        assert_eq!(ranges.len(), busy);

        // Contiguous, starting at 1 and ending at n
        assert_eq!(ranges[0].start(), 1);
        assert_eq!(ranges[busy - 1].end(), n);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end() + 1, pair[1].start(), "gap or overlap in {:?}", pair);
        }

        let total: u64 = ranges.iter().map(Range::len).sum();
        assert_eq!(total, n);

        let min = ranges.iter().map(Range::len).min().unwrap();
        let max = ranges.iter().map(Range::len).max().unwrap();
        assert!(max - min <= 1, "sizes differ by {} for n={n} w={workers}", max - min);
    }

    #[test]
    fn test_two_way_split() {
        let ranges = partition(10, 2).unwrap();
        assert_eq!(ranges, vec![Range::new(1, 5).unwrap(), Range::new(6, 10).unwrap()]);
    }

    #[test]
    fn test_single_element() {
        let ranges = partition(1, 1).unwrap();
        assert_eq!(ranges, vec![Range::new(1, 1).unwrap()]);
        assert_eq!(ranges[0].len(), 1);
    }

    #[test]
    fn test_uneven_split_front_loads_remainder() {
        let ranges = partition(11, 3).unwrap();
        let lens: Vec<u64> = ranges.iter().map(Range::len).collect();
        assert_eq!(lens, vec![4, 4, 3]);
        assert_eq!(ranges[2], Range::new(9, 11).unwrap());
    }

    #[test]
    fn test_partition_properties() {
        for n in 1..=64u64 {
            for workers in 1..=9 {
                check_partition(n, workers);
            }
        }
        check_partition(100_000_000, 2);
        check_partition(100_000_001, 2);
        check_partition(1_000_003, 7);
    }

    #[test]
    fn test_partition_is_deterministic() {
        assert_eq!(partition(977, 5).unwrap(), partition(977, 5).unwrap());
    }

    #[test]
    fn test_partition_of_offset_range() {
        let range = Range::new(6, 10).unwrap();
        let parts = range.partition(2).unwrap();
        assert_eq!(parts, vec![Range::new(6, 8).unwrap(), Range::new(9, 10).unwrap()]);
    }

    #[test]
    fn test_partition_near_u64_max() {
        let range = Range::new(u64::MAX - 9, u64::MAX).unwrap();
        let parts = range.partition(3).unwrap();
        assert_eq!(parts[2].end(), u64::MAX);
        assert_eq!(parts.iter().map(Range::len).sum::<u64>(), 10);
    }

    #[test]
    fn test_partition_ending_at_u64_max() {
        let whole = partition(u64::MAX, 1).unwrap();
        assert_eq!(whole, vec![Range::new(1, u64::MAX).unwrap()]);

        let halves = partition(u64::MAX, 2).unwrap();
        assert_eq!(halves[1].end(), u64::MAX);
        assert_eq!(halves[0].end() + 1, halves[1].start());

        let tail = Range::new(u64::MAX, u64::MAX).unwrap().partition(4).unwrap();
        assert_eq!(tail, vec![Range::new(u64::MAX, u64::MAX).unwrap()]);
    }

    #[test]
    fn test_more_workers_than_elements() {
        let ranges = partition(1, 2).unwrap();
        assert_eq!(ranges, vec![Range::new(1, 1).unwrap()]);

        let ranges = partition(3, 8).unwrap();
        assert_eq!(
            ranges,
            vec![
                Range::new(1, 1).unwrap(),
                Range::new(2, 2).unwrap(),
                Range::new(3, 3).unwrap(),
            ]
        );

        assert_eq!(partition(5, usize::MAX).unwrap().len(), 5);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(partition(0, 2), Err(PartitionError::Range(RangeError::Empty)));
        assert_eq!(partition(10, 0), Err(PartitionError::NoWorkers));
        assert_eq!(Range::new(0, 5), Err(RangeError::ZeroStart));
        assert_eq!(Range::new(5, 4), Err(RangeError::Inverted { start: 5, end: 4 }));
    }

    #[test]
    fn test_iteration_order() {
        let values: Vec<u64> = Range::new(3, 6).unwrap().into_iter().collect();
        assert_eq!(values, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::new(1, 5).unwrap().to_string(), "[1, 5]");
    }
}
