// Monotonic nanosecond time source used for envelope stamps and job deadlines.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of monotonic nanosecond timestamps.
pub trait Clock {
    /// Current time in nanoseconds from an arbitrary, process-local epoch.
    /// Successive calls never go backwards.
    fn now_ns(&self) -> u64;
}

/// The OS monotonic clock. Unaffected by wall-clock adjustments.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now_ns(&self) -> u64 {
        mono_now_ns()
    }
}

/// A clock that only moves when told to. Useful for tests and simulations
/// that need reproducible timestamps.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ns: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ns),
        }
    }

    /// Move the clock forward by `delta_ns`, saturating at `u64::MAX`.
    /// Returns the new time.
    pub fn advance(&self, delta_ns: u64) -> u64 {
        let prev = self
            .now
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |now| {
                Some(now.saturating_add(delta_ns))
            })
            .unwrap_or_else(|now| now);
        prev.saturating_add(delta_ns)
    }

    /// Set the clock to `ns`. Values earlier than the current time are
    /// ignored so the clock stays monotonic.
    pub fn set(&self, ns: u64) {
        self.now.fetch_max(ns, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now_ns(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ns(&self) -> u64 {
        (**self).now_ns()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    #[inline]
    fn now_ns(&self) -> u64 {
        (**self).now_ns()
    }
}

/// Read the monotonic clock in nanoseconds.
#[cfg(target_os = "linux")]
pub fn mono_now_ns() -> u64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // CLOCK_MONOTONIC cannot fail with a valid timespec pointer.
    unsafe {
        libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts);
    }
    (ts.tv_sec as u64)
        .wrapping_mul(1_000_000_000)
        .wrapping_add(ts.tv_nsec as u64)
}

#[cfg(not(target_os = "linux"))]
lazy_static::lazy_static! {
    static ref PROCESS_EPOCH: std::time::Instant = std::time::Instant::now();
}

/// Read the monotonic clock in nanoseconds.
#[cfg(not(target_os = "linux"))]
pub fn mono_now_ns() -> u64 {
    // Fallback: Instant relative to the first read in this process
    PROCESS_EPOCH.elapsed().as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_now_never_decreases() {
        let mut last = mono_now_ns();
        for _ in 0..10_000 {
            let now = mono_now_ns();
            assert!(now >= last, "clock went backwards: {now} < {last}");
            last = now;
        }
    }

    #[test]
    fn manual_clock_ignores_rewind() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.advance(50), 150);
        clock.set(10);
        assert_eq!(clock.now_ns(), 150);
        clock.set(1_000);
        assert_eq!(clock.now_ns(), 1_000);
    }

    #[test]
    fn manual_clock_advance_saturates() {
        let clock = ManualClock::new(u64::MAX - 10);
        assert_eq!(clock.advance(100), u64::MAX);
        assert_eq!(clock.now_ns(), u64::MAX);
        assert_eq!(clock.advance(1), u64::MAX);
    }
}
