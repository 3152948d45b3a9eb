//! Pen state: a guarded two-state actuator.
//!
//! Transitions are idempotent: asking for the state the pen is already
//! in does nothing, so only real transitions pay the settling delays.

use crate::clock::{wait_micros, Clock};
use crate::driver::PenActuator;
use tracing::trace;

/// Current pen state with its configured settling delays.
#[derive(Debug)]
pub struct PenState {
    engaged: bool,
    pre_settle_us: u64,
    post_settle_us: u64,
}

impl PenState {
    /// Create a pen believed to be engaged, so that the first
    /// disengage request is not skipped as a no-op.
    ///
    /// The physical pen position at boot is unknown; assuming engaged
    /// forces an actuator transition before the first travel move.
    pub fn new(pre_settle_ms: u64, post_settle_ms: u64) -> Self {
        Self {
            engaged: true,
            pre_settle_us: pre_settle_ms * 1000,
            post_settle_us: post_settle_ms * 1000,
        }
    }

    /// True when the pen is on the sheet.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Drive the pen to the requested state. No-op when already there.
    ///
    /// Returns true when an actuator transition happened.
    pub fn apply(
        &mut self,
        engage: bool,
        actuator: &mut dyn PenActuator,
        clock: &dyn Clock,
    ) -> bool {
        if engage == self.engaged {
            return false;
        }
        trace!(engage, "pen transition");
        wait_micros(clock, self.pre_settle_us);
        if engage {
            actuator.engage();
        } else {
            actuator.disengage();
        }
        wait_micros(clock, self.post_settle_us);
        self.engaged = engage;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use crate::driver::{PenEvent, RecordingPen};

    #[test]
    fn test_transitions_are_idempotent() {
        let clock = SimulatedClock::new(10);
        let mut actuator = RecordingPen::new();
        let events = actuator.events();
        let mut pen = PenState::new(1, 1);

        assert!(pen.apply(false, &mut actuator, &clock));
        assert!(!pen.apply(false, &mut actuator, &clock));
        assert!(pen.apply(true, &mut actuator, &clock));
        assert!(!pen.apply(true, &mut actuator, &clock));

        assert_eq!(
            *events.borrow(),
            vec![PenEvent::Disengaged, PenEvent::Engaged]
        );
    }

    #[test]
    fn test_settle_delays_elapse_around_transition() {
        let clock = SimulatedClock::new(100);
        let mut actuator = RecordingPen::new();
        let mut pen = PenState::new(5, 7);

        let before = clock.now_micros();
        pen.apply(false, &mut actuator, &clock);
        let after = clock.now_micros();
        // At least pre (5000us) + post (7000us) must have elapsed.
        assert!(after - before >= 12_000);
    }
}
