//! Worker Accumulator
//!
//! One pass over a [`Range`] producing two independent sums of squares: an
//! `f64` and a wrapping `i64`. Integer overflow wraps in every build profile
//! so single- and multi-threaded runs agree bit-for-bit on the integer sum.

use crate::range::Range;
use serde::Serialize;

/// Cache line size assumed for per-worker result slots
pub const CACHE_LINE_SIZE: usize = 64;

/// Value padded and aligned to its own cache line.
///
/// Each worker writes only to its own slot, so adjacent slots in a `Vec`
/// never share a line.
#[repr(align(64))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheAligned<T>(pub T);

impl<T> CacheAligned<T> {
    /// Wrap `value` in its own cache line
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Unwrap the slot value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for CacheAligned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> std::ops::DerefMut for CacheAligned<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

/// One worker's pair of accumulators
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PartialResult {
    /// Sum of `(i as f64)^2`
    pub float_sum: f64,
    /// Wrapping sum of `(i as i64)^2`
    pub int_sum: i64,
}

impl PartialResult {
    /// Fold another partial into this one (float add, wrapping integer add)
    #[inline]
    pub fn merge(self, other: PartialResult) -> PartialResult {
        PartialResult {
            float_sum: self.float_sum + other.float_sum,
            int_sum: self.int_sum.wrapping_add(other.int_sum),
        }
    }
}

/// Sum the squares of every integer in `range`, in increasing order.
#[inline]
pub fn accumulate(range: Range) -> PartialResult {
    let mut float_sum = 0.0_f64;
    let mut int_sum = 0_i64;

    for i in range {
        let f = i as f64;
        float_sum += f * f;

        let n = i as i64;
        int_sum = int_sum.wrapping_add(n.wrapping_mul(n));
    }

    PartialResult { float_sum, int_sum }
}
