//! Time Sources
//!
//! The sampler never reads a system clock directly; it reads whatever
//! [`Clock`] the registry was built with. `MonotonicClock` is the real one,
//! `StepClock` a deterministic one for tests.

use std::cell::Cell;
use std::time::Duration;

/// A monotonic time source.
///
/// `now` returns the time elapsed since the clock's own epoch. Successive
/// readings must never decrease; the difference of two readings is the
/// duration between them.
pub trait Clock {
    /// Current reading
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline(always)]
    fn now(&self) -> Duration {
        (**self).now()
    }
}

// ─── MonotonicClock ──────────────────────────────────────────────────────────

/// Wall clock backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

impl MonotonicClock {
    /// Create a clock whose epoch is the moment of construction
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

// ─── StepClock ───────────────────────────────────────────────────────────────

/// Deterministic clock that advances by a fixed step on every reading.
///
/// The first reading is zero. With a sampler that reads the clock twice per
/// sample, every sample measures exactly one step.
#[derive(Debug)]
pub struct StepClock {
    step: Duration,
    next: Cell<Duration>,
    readings: Cell<u64>,
}

impl StepClock {
    /// Create a clock advancing by `step` per reading
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            next: Cell::new(Duration::ZERO),
            readings: Cell::new(0),
        }
    }

    /// Number of times `now` has been called
    pub fn readings(&self) -> u64 {
        self.readings.get()
    }
}

impl Clock for StepClock {
    fn now(&self) -> Duration {
        let current = self.next.get();
        self.next.set(current + self.step);
        self.readings.set(self.readings.get() + 1);
        current
    }
}
