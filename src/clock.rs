//! Frame timestamps for driving the engine.
//!
//! The engine never schedules itself: whoever owns the loop asks a [`FrameClock`] for the
//! current time and hands it to `Engine::advance`. Tests use [`ManualClock`] to feed exact
//! timestamps.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait FrameClock {
    /// Monotonic time since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall clock measured from the moment it was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance_by(&self, delta: Duration) -> Duration {
        let now = self.now.get() + delta;
        self.now.set(now);
        now
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
