//! Hardware capability traits and simulation drivers.
//!
//! Physical pulse generation is a black box behind `MotorDriver`:
//! "emit one step pulse in direction D". The engine decides when to
//! pulse and in which logical direction; polarity encoding and channel
//! swapping are applied by `MotorChannel` from the frame
//! configuration.

use std::cell::RefCell;
use std::rc::Rc;

/// Logical stepping direction for a cable motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// Wind cable in, shortening it.
    Pull,
    /// Pay cable out, lengthening it.
    Release,
}

impl StepDirection {
    /// The opposite direction.
    pub fn flipped(self) -> StepDirection {
        match self {
            StepDirection::Pull => StepDirection::Release,
            StepDirection::Release => StepDirection::Pull,
        }
    }
}

/// One motor's pulse sink.
pub trait MotorDriver {
    /// Emit a single step pulse in the given direction.
    ///
    /// Assumed to always succeed: the hardware is open-loop and a
    /// stall cannot be detected here.
    fn pulse(&mut self, direction: StepDirection);
}

/// Pen actuator sink. Settling delays are the engine's concern, not
/// the actuator's.
pub trait PenActuator {
    /// Lower the pen onto the sheet.
    fn engage(&mut self);
    /// Lift the pen off the sheet.
    fn disengage(&mut self);
}

/// A motor channel with its configured direction polarity.
///
/// `invert` flips the direction encoding for motors mounted mirrored;
/// the `reverse_motors` swap is handled when the engine picks which
/// channel is left and which is right.
pub(crate) struct MotorChannel {
    driver: Box<dyn MotorDriver>,
    invert: bool,
}

impl MotorChannel {
    pub(crate) fn new(driver: Box<dyn MotorDriver>, invert: bool) -> Self {
        Self { driver, invert }
    }

    pub(crate) fn pulse(&mut self, direction: StepDirection) {
        let encoded = if self.invert {
            direction.flipped()
        } else {
            direction
        };
        self.driver.pulse(encoded);
    }
}

/// Pulse counts recorded by a `CountingMotor`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepLog {
    pub pulls: u64,
    pub releases: u64,
}

impl StepLog {
    /// Total pulses in either direction.
    pub fn total(&self) -> u64 {
        self.pulls + self.releases
    }
}

/// Simulation motor that counts the pulses it receives.
///
/// The log handle is shared: keep a clone and read it after the engine
/// has consumed the boxed driver.
#[derive(Debug, Default)]
pub struct CountingMotor {
    log: Rc<RefCell<StepLog>>,
}

impl CountingMotor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to this motor's pulse counts.
    pub fn log(&self) -> Rc<RefCell<StepLog>> {
        Rc::clone(&self.log)
    }
}

impl MotorDriver for CountingMotor {
    fn pulse(&mut self, direction: StepDirection) {
        let mut log = self.log.borrow_mut();
        match direction {
            StepDirection::Pull => log.pulls += 1,
            StepDirection::Release => log.releases += 1,
        }
    }
}

/// One observable pen actuator transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenEvent {
    Engaged,
    Disengaged,
}

/// Simulation pen that records every actuator transition.
#[derive(Debug, Default)]
pub struct RecordingPen {
    events: Rc<RefCell<Vec<PenEvent>>>,
}

impl RecordingPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded transitions.
    pub fn events(&self) -> Rc<RefCell<Vec<PenEvent>>> {
        Rc::clone(&self.events)
    }
}

impl PenActuator for RecordingPen {
    fn engage(&mut self) {
        self.events.borrow_mut().push(PenEvent::Engaged);
    }

    fn disengage(&mut self) {
        self.events.borrow_mut().push(PenEvent::Disengaged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_motor_splits_directions() {
        let motor = CountingMotor::new();
        let log = motor.log();
        let mut boxed: Box<dyn MotorDriver> = Box::new(motor);
        boxed.pulse(StepDirection::Pull);
        boxed.pulse(StepDirection::Pull);
        boxed.pulse(StepDirection::Release);
        assert_eq!(
            *log.borrow(),
            StepLog {
                pulls: 2,
                releases: 1
            }
        );
        assert_eq!(log.borrow().total(), 3);
    }

    #[test]
    fn test_channel_inverts_encoding() {
        let motor = CountingMotor::new();
        let log = motor.log();
        let mut channel = MotorChannel::new(Box::new(motor), true);
        channel.pulse(StepDirection::Pull);
        // Inverted polarity: the driver sees a release.
        assert_eq!(
            *log.borrow(),
            StepLog {
                pulls: 0,
                releases: 1
            }
        );
    }
}
