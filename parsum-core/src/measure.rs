//! Wall-Clock Timing
//!
//! Wraps `std::time::Instant` and pairs it with the CPU's invariant cycle
//! counter (RDTSCP on x86_64, CNTVCT_EL0 on AArch64) so every run reports
//! both elapsed time and elapsed ticks.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles() -> u64 {
    // SAFETY: RDTSCP is available on every x86_64 CPU this crate targets and
    // waits for prior instructions to retire before sampling the counter.
    unsafe {
        let mut _aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut _aux)
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles() -> u64 {
    let cnt: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 on all AArch64 implementations.
    unsafe {
        std::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt, options(nostack, nomem));
    }
    cnt
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
fn read_cycles() -> u64 {
    0
}

/// Whether this platform provides a hardware cycle counter.
/// When `false`, [`Elapsed::cycles`] is always 0.
pub const HAS_CYCLE_COUNTER: bool = cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");

/// Elapsed wall-clock time and cycle ticks of one measured region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Elapsed {
    /// Wall-clock duration
    pub duration: Duration,
    /// Cycle counter ticks (0 where unavailable)
    pub cycles: u64,
}

impl Elapsed {
    /// Duration in fractional seconds
    pub fn as_secs_f64(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Duration in whole nanoseconds, saturating at `u64::MAX`
    pub fn as_nanos(&self) -> u64 {
        u64::try_from(self.duration.as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Timer started just before dispatch and stopped just after the last join.
#[derive(Debug)]
pub struct Timer {
    start: std::time::Instant,
    cycles_start: u64,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        let cycles_start = read_cycles();
        Self {
            start: std::time::Instant::now(),
            cycles_start,
        }
    }

    /// Read the elapsed time without consuming the timer
    #[inline(always)]
    pub fn stop(&self) -> Elapsed {
        let duration = self.start.elapsed();
        let cycles = read_cycles().saturating_sub(self.cycles_start);
        Elapsed { duration, cycles }
    }
}
