use std::cell::Cell;
use std::time::Instant;

/// Monotonic millisecond time source consumed by the pipeline.
///
/// The host stamps pointer events with the same time base, so recency windows
/// measured against `now_ms()` line up with sample timestamps.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall-independent clock backed by `Instant`.
///
/// Clones share the same origin, so a host can hand one copy to its input
/// translation and another to the surface and get matching timestamps.
#[derive(Debug, Copy, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

/// Clock driven by hand.
///
/// Used for replaying recorded input and in tests. Interior mutability lets a
/// caller advance time while the surface holds the clock.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self { now: Cell::new(start_ms) }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}
