//! # Wallplot Motion
//!
//! The motion-control half of the plotter: the kinematic transform
//! from surface coordinates to cable lengths, the dual-motor step
//! synchronizer, the pen actuator state machine, and the
//! `MotionEngine` that owns all mutable device state.
//!
//! Hardware is reached only through capability traits (`Clock`,
//! `MotorDriver`, `PenActuator`), so everything here runs unchanged
//! against simulation drivers.

pub mod clock;
pub mod config;
pub mod driver;
pub mod engine;
pub mod kinematics;
pub mod pen;

pub use clock::{wait_micros, Clock, MonotonicClock, SimulatedClock};
pub use config::{CardinalPoint, FrameConfig};
pub use driver::{CountingMotor, MotorDriver, PenActuator, PenEvent, RecordingPen, StepDirection, StepLog};
pub use engine::{Cursor, MotionEngine, MotorState};
pub use kinematics::{Kinematics, Side};
pub use pen::PenState;
