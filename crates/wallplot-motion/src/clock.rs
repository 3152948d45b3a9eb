//! Clock capability for the real-time stepping loop.
//!
//! The synchronizer busy-polls elapsed microseconds rather than
//! sleeping; isolating the time source behind a trait lets the same
//! loop run against wall time on hardware and against a simulated
//! clock in tests.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic microsecond time source.
pub trait Clock {
    /// Microseconds elapsed since an arbitrary reference instant.
    fn now_micros(&self) -> u64;
}

/// Wall-time clock backed by `std::time::Instant`.
#[derive(Debug)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }
}

/// Deterministic clock that advances by a fixed tick on every poll.
///
/// The stepping loop polls the clock at least once per iteration, so
/// an auto-advancing clock guarantees the loop makes progress without
/// consuming wall time. Used by tests and the host-side simulation
/// drivers.
#[derive(Debug)]
pub struct SimulatedClock {
    now: Cell<u64>,
    tick: u64,
}

impl SimulatedClock {
    /// Create a clock that advances `tick` microseconds per poll.
    pub fn new(tick: u64) -> Self {
        Self {
            now: Cell::new(0),
            tick,
        }
    }

    /// Jump forward by `micros` without a poll.
    pub fn advance(&self, micros: u64) {
        self.now.set(self.now.get() + micros);
    }
}

impl Clock for SimulatedClock {
    fn now_micros(&self) -> u64 {
        let now = self.now.get() + self.tick;
        self.now.set(now);
        now
    }
}

/// Busy-wait until `micros` have elapsed on `clock`.
///
/// This is the only suspension primitive in the engine; it matches the
/// polling structure of the stepping loop.
pub fn wait_micros(clock: &dyn Clock, micros: u64) {
    let start = clock.now_micros();
    while clock.now_micros() - start < micros {}
}
