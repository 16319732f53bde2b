//! Timing primitives
//!
//! Wall-clock timing on top of `std::time::Instant`, plus a clamp for timing
//! windows that the host clock reports as zero (possible for very small
//! arrays on coarse timers).

use std::time::{Duration, Instant};

/// Smallest elapsed time a timing window may report, in nanoseconds
pub const MIN_ELAPSED_NS: u64 = 1;

/// Clamp a measured window to [`MIN_ELAPSED_NS`]
#[inline(always)]
pub fn clamp_elapsed_ns(nanos: u64) -> u64 {
    nanos.max(MIN_ELAPSED_NS)
}

/// Timer for a single measurement window
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Raw elapsed time, may be zero
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return elapsed nanoseconds, never below [`MIN_ELAPSED_NS`]
    #[inline(always)]
    pub fn stop_nanos(&self) -> u64 {
        let nanos = u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        clamp_elapsed_ns(nanos)
    }
}

/// Set CPU affinity to pin the current thread to a specific core
///
/// Keeps the whole measurement run on one core so batches are not split
/// across migrations.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    // SAFETY: the cpu_set_t is zero-initialised before use and only passed to
    // libc routines that expect exactly this type.
    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// CPU pinning is a no-op off Linux
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}
