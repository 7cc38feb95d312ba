//! Time sources for tick-driven animation.
//!
//! The framing session never reads wall-clock time itself; it is handed a
//! timestamp (seconds, monotonic) on every call. [`Clock`] is the seam the
//! controller reads from once per tick.

use std::cell::Cell;

use web_time::Instant;

/// Monotonic time source in seconds.
pub trait Clock {
    /// Current time in seconds since an arbitrary, fixed origin.
    fn now(&self) -> f64;
}

/// Wall-clock time measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is "now".
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for deterministic playback and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Clock starting at `start` seconds.
    #[must_use]
    pub fn starting_at(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    /// Move time forward by `dt` seconds.
    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
