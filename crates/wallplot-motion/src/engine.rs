//! The motion engine: owner of all mutable device state.
//!
//! One `MotionEngine` instance holds the frame configuration, the live
//! cable lengths, the cursor, and the pen, and is the only code that
//! emits motor pulses. Execution is single-threaded and cooperative:
//! the stepping loop busy-polls the clock and nothing else runs until
//! a segment finishes, so segment boundaries are the only preemption
//! points.

use crate::clock::{wait_micros, Clock};
use crate::config::FrameConfig;
use crate::driver::{MotorChannel, MotorDriver, PenActuator, StepDirection};
use crate::kinematics::Kinematics;
use crate::pen::PenState;
use std::rc::Rc;
use tracing::{debug, trace};
use wallplot_core::{CurveFamily, DiagnosticsSink, Point, Result};

/// Live cable lengths in whole steps.
///
/// Authoritative-by-computation: after each segment both fields are
/// assigned the computed target lengths rather than accumulated from
/// emitted pulses. The open-loop hardware cannot observe a dropped
/// step either way, and direct assignment avoids truncation drift
/// between the two derivations. Never reset after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorState {
    /// Left cable length in steps.
    pub left: i64,
    /// Right cable length in steps.
    pub right: i64,
}

/// Pen location and path-continuation state.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    /// Current pen position in surface units (post-clamp).
    pub position: Point,
    /// Last requested target before boundary clamping. Smooth-curve
    /// reflection uses this so that continuation math follows the
    /// intended path, not the clamped one.
    pub fictive: Point,
    /// Position at the last explicit move; ClosePath returns here.
    pub subpath_start: Point,
    /// Last curve control point, tagged by family. `None` means no
    /// curve of either family is eligible for smooth continuation.
    pub last_control: Option<(CurveFamily, Point)>,
}

/// Per-segment step plan for one axis.
struct AxisPlan {
    direction: StepDirection,
    remaining: i64,
    delay_us: f64,
}

/// The motion engine.
pub struct MotionEngine {
    config: FrameConfig,
    kinematics: Kinematics,
    motors: MotorState,
    cursor: Cursor,
    pen: PenState,
    left: MotorChannel,
    right: MotorChannel,
    actuator: Box<dyn PenActuator>,
    clock: Box<dyn Clock>,
    diagnostics: Rc<dyn DiagnosticsSink>,
    base_delay_us: f64,
}

impl MotionEngine {
    /// Build an engine for a validated frame, positioned at `start`.
    ///
    /// The initial cable lengths are computed from `start`; the frame
    /// must already hold the pen there. Fails if the configuration
    /// describes an impossible geometry.
    pub fn new(
        config: FrameConfig,
        start: Point,
        clock: Box<dyn Clock>,
        left_motor: Box<dyn MotorDriver>,
        right_motor: Box<dyn MotorDriver>,
        actuator: Box<dyn PenActuator>,
        diagnostics: Rc<dyn DiagnosticsSink>,
    ) -> Result<Self> {
        config.validate()?;
        let kinematics = Kinematics::new(&config);
        let (left_length, right_length) = kinematics.cable_lengths(start);

        // reverse_motors means the cables are crossed: the physical
        // driver wired as "left" actually moves the right cable.
        let (left, right) = if config.reverse_motors {
            (
                MotorChannel::new(right_motor, !config.left_direction),
                MotorChannel::new(left_motor, !config.right_direction),
            )
        } else {
            (
                MotorChannel::new(left_motor, !config.left_direction),
                MotorChannel::new(right_motor, !config.right_direction),
            )
        };

        let base_delay_us = config.base_delay_micros();
        let pen = PenState::new(config.pre_settle_ms, config.post_settle_ms);
        debug!(
            left_length,
            right_length,
            base_delay_us,
            "motion engine initialized"
        );

        Ok(Self {
            config,
            kinematics,
            motors: MotorState {
                left: left_length,
                right: right_length,
            },
            cursor: Cursor {
                position: start,
                fictive: start,
                subpath_start: start,
                last_control: None,
            },
            pen,
            left,
            right,
            actuator,
            clock,
            diagnostics,
            base_delay_us,
        })
    }

    /// The frame this engine drives.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Current cursor state.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Current cable lengths.
    pub fn motor_state(&self) -> &MotorState {
        &self.motors
    }

    /// True when the pen is on the sheet.
    pub fn pen_engaged(&self) -> bool {
        self.pen.is_engaged()
    }

    /// Shared handle to the diagnostics sink.
    pub fn diagnostics(&self) -> Rc<dyn DiagnosticsSink> {
        Rc::clone(&self.diagnostics)
    }

    /// Record or clear the curve-continuation control point.
    pub fn set_last_control(&mut self, control: Option<(CurveFamily, Point)>) {
        self.cursor.last_control = control;
    }

    /// Travel to `target` with the pen lifted and start a new subpath.
    pub fn move_to(&mut self, target: Point) {
        self.cursor.last_control = None;
        self.segment(target, false);
        self.cursor.subpath_start = self.cursor.position;
    }

    /// Draw a straight line to `target`.
    ///
    /// Long draws are subdivided so the chords between cable-length
    /// targets stay close to the intended straight line; a final exact
    /// segment lands on the endpoint.
    pub fn line_to(&mut self, target: Point) {
        self.cursor.last_control = None;
        let max = self.config.max_segment_length;
        let span_x = (target.x - self.cursor.position.x).abs();
        let span_y = (target.y - self.cursor.position.y).abs();
        if span_x > max || span_y > max {
            let chunks = (span_x.max(span_y) / max).ceil() as u32;
            let step = (target - self.cursor.position) * (1.0 / chunks as f64);
            for _ in 0..chunks {
                let next = self.cursor.position + step;
                self.segment(next, true);
            }
        }
        self.segment(target, true);
    }

    /// Draw one flattened curve sample with the pen engaged.
    ///
    /// Unlike `line_to` this neither subdivides (samples are already
    /// short) nor clears the curve-continuation memory.
    pub fn trace_to(&mut self, target: Point) {
        self.segment(target, true);
    }

    /// Draw a line back to the start of the current subpath.
    pub fn close_path(&mut self) {
        let start = self.cursor.subpath_start;
        self.line_to(start);
    }

    /// Busy-wait for `seconds` without moving.
    pub fn dwell(&mut self, seconds: f64) {
        if seconds > 0.0 {
            wait_micros(&*self.clock, (seconds * 1_000_000.0) as u64);
        }
    }

    /// Disengage the pen. Called on the fatal path before motion halts
    /// permanently, so an abandoned plot does not leave ink on the
    /// sheet.
    pub fn halt(&mut self) {
        self.pen.apply(false, &mut *self.actuator, &*self.clock);
    }

    /// Execute one straight segment toward `target`.
    ///
    /// Applies the boundary policy: the unclamped target is recorded
    /// as the fictive position, each axis is clamped to the sheet
    /// independently, and any clamping forces the pen off for this
    /// segment regardless of `pen_down`.
    fn segment(&mut self, target: Point, pen_down: bool) {
        self.cursor.fictive = target;

        let clamped = Point::new(
            target.x.clamp(0.0, self.config.sheet_width),
            target.y.clamp(0.0, self.config.sheet_height),
        );
        let was_clamped = clamped != target;
        self.pen
            .apply(pen_down && !was_clamped, &mut *self.actuator, &*self.clock);

        let (target_left, target_right) = self.kinematics.cable_lengths(clamped);
        let delta_left = target_left - self.motors.left;
        let delta_right = target_right - self.motors.right;

        trace!(
            ?clamped,
            delta_left,
            delta_right,
            pen = self.pen.is_engaged(),
            "segment"
        );

        self.run_step_trains(delta_left, delta_right);

        // Assigned, not accumulated: see MotorState.
        self.motors.left = target_left;
        self.motors.right = target_right;
        self.cursor.position = clamped;
    }

    /// Drive both motors through their deltas with linear
    /// co-termination: the axis with more steps runs at the base
    /// delay, the other is slowed by the step-count ratio so both
    /// finish at the same wall-clock time.
    fn run_step_trains(&mut self, delta_left: i64, delta_right: i64) {
        let steps_left = delta_left.abs();
        let steps_right = delta_right.abs();

        // A negative delta shortens the cable: pull.
        let dir_left = if delta_left < 0 {
            StepDirection::Pull
        } else {
            StepDirection::Release
        };
        let dir_right = if delta_right < 0 {
            StepDirection::Pull
        } else {
            StepDirection::Release
        };

        // When one count is zero the ratio is infinite (or NaN for
        // 0/0); that axis never pulses, so its delay is never read.
        let (delay_left, delay_right) = if steps_left > steps_right {
            (
                self.base_delay_us,
                self.base_delay_us * steps_left as f64 / steps_right as f64,
            )
        } else {
            (
                self.base_delay_us * steps_right as f64 / steps_left as f64,
                self.base_delay_us,
            )
        };

        let mut left = AxisPlan {
            direction: dir_left,
            remaining: steps_left,
            delay_us: delay_left,
        };
        let mut right = AxisPlan {
            direction: dir_right,
            remaining: steps_right,
            delay_us: delay_right,
        };

        let mut last_left = self.clock.now_micros();
        let mut last_right = last_left;

        // Both axes are serviced independently in the same loop; there
        // is no pulse-alternation guarantee, only co-termination.
        while left.remaining > 0 || right.remaining > 0 {
            if left.remaining > 0 {
                let now = self.clock.now_micros();
                if (now - last_left) as f64 >= left.delay_us {
                    last_left = now;
                    self.left.pulse(left.direction);
                    left.remaining -= 1;
                }
            }
            if right.remaining > 0 {
                let now = self.clock.now_micros();
                if (now - last_right) as f64 >= right.delay_us {
                    last_right = now;
                    self.right.pulse(right.direction);
                    right.remaining -= 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use crate::driver::{CountingMotor, PenEvent, RecordingPen, StepLog};
    use crate::kinematics::Side;
    use std::cell::RefCell;
    use wallplot_core::RecordingDiagnostics;

    struct Harness {
        engine: MotionEngine,
        left_log: Rc<RefCell<StepLog>>,
        right_log: Rc<RefCell<StepLog>>,
        pen_events: Rc<RefCell<Vec<PenEvent>>>,
        diagnostics: RecordingDiagnostics,
    }

    fn harness_with(config: FrameConfig, start: Point) -> Harness {
        let left = CountingMotor::new();
        let right = CountingMotor::new();
        let pen = RecordingPen::new();
        let left_log = left.log();
        let right_log = right.log();
        let pen_events = pen.events();
        let diagnostics = RecordingDiagnostics::new();
        let engine = MotionEngine::new(
            config,
            start,
            Box::new(SimulatedClock::new(100)),
            Box::new(left),
            Box::new(right),
            Box::new(pen),
            Rc::new(diagnostics.clone()),
        )
        .expect("valid config");
        Harness {
            engine,
            left_log,
            right_log,
            pen_events,
            diagnostics,
        }
    }

    fn reference_config() -> FrameConfig {
        FrameConfig {
            span: 1000.0,
            sheet_width: 600.0,
            sheet_height: 400.0,
            sheet_offset_x: 200.0,
            sheet_offset_y: 50.0,
            steps_per_unit: 10.0,
            pre_settle_ms: 0,
            post_settle_ms: 0,
            ..FrameConfig::default()
        }
    }

    fn harness() -> Harness {
        harness_with(reference_config(), Point::ORIGIN)
    }

    #[test]
    fn test_invalid_geometry_rejected_at_construction() {
        let config = FrameConfig {
            span: 100.0,
            ..reference_config()
        };
        let diagnostics = RecordingDiagnostics::new();
        let result = MotionEngine::new(
            config,
            Point::ORIGIN,
            Box::new(SimulatedClock::new(100)),
            Box::new(CountingMotor::new()),
            Box::new(CountingMotor::new()),
            Box::new(RecordingPen::new()),
            Rc::new(diagnostics),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_co_termination_pulse_counts_match_deltas() {
        let mut h = harness();
        let kin = Kinematics::new(h.engine.config());
        let start = h.engine.motor_state().clone();
        let target = Point::new(300.0, 200.0);
        let (left_target, right_target) = kin.cable_lengths(target);

        h.engine.move_to(target);

        assert_eq!(
            h.left_log.borrow().total(),
            (left_target - start.left).unsigned_abs()
        );
        assert_eq!(
            h.right_log.borrow().total(),
            (right_target - start.right).unsigned_abs()
        );
        assert_eq!(h.engine.motor_state().left, left_target);
        assert_eq!(h.engine.motor_state().right, right_target);
    }

    #[test]
    fn test_scenario_move_then_line_updates_exact_lengths() {
        // From (0,0), MoveTo(300,200) then LineTo(300,0): MotorState
        // must equal cable_length at each target, pen off for the
        // move and on for the line.
        let mut h = harness();
        let kin = Kinematics::new(h.engine.config());

        h.engine.move_to(Point::new(300.0, 200.0));
        assert_eq!(
            (h.engine.motor_state().left, h.engine.motor_state().right),
            kin.cable_lengths(Point::new(300.0, 200.0))
        );
        assert!(!h.engine.pen_engaged());

        h.engine.line_to(Point::new(300.0, 0.0));
        assert_eq!(
            (h.engine.motor_state().left, h.engine.motor_state().right),
            kin.cable_lengths(Point::new(300.0, 0.0))
        );
        assert!(h.engine.pen_engaged());
        assert!(h.diagnostics.is_empty());
    }

    #[test]
    fn test_pull_direction_when_cable_shortens() {
        let mut h = harness_with(reference_config(), Point::new(0.0, 0.0));
        // Moving toward the left anchor shortens the left cable.
        h.engine.move_to(Point::new(0.0, 400.0));
        let log = h.left_log.borrow();
        assert!(log.pulls > 0);
        assert_eq!(log.releases, 0);
    }

    #[test]
    fn test_boundary_clamp_forces_pen_off_and_clamps_cursor() {
        let mut h = harness();
        h.engine.move_to(Point::new(300.0, 200.0));
        h.engine
            .line_to(Point::new(650.0, 450.0));

        let cursor = h.engine.cursor();
        assert_eq!(cursor.position, Point::new(600.0, 400.0));
        // Fictive position keeps the unclamped target for
        // continuation math.
        assert_eq!(cursor.fictive, Point::new(650.0, 450.0));
        assert!(!h.engine.pen_engaged());
    }

    #[test]
    fn test_line_inside_sheet_engages_pen_once() {
        let mut h = harness();
        h.engine.move_to(Point::new(100.0, 100.0));
        h.engine.line_to(Point::new(110.0, 110.0));
        h.engine.line_to(Point::new(120.0, 100.0));

        let events = h.pen_events.borrow();
        // Boot state assumes engaged, so the move disengages, then the
        // first line engages; the second line is a no-op transition.
        assert_eq!(*events, vec![PenEvent::Disengaged, PenEvent::Engaged]);
    }

    #[test]
    fn test_long_line_subdivision_reaches_exact_target() {
        let mut h = harness();
        h.engine.move_to(Point::new(0.0, 0.0));
        h.engine.line_to(Point::new(400.0, 300.0));
        let kin = Kinematics::new(h.engine.config());
        assert_eq!(h.engine.cursor().position, Point::new(400.0, 300.0));
        assert_eq!(
            h.engine.motor_state().left,
            kin.cable_length(Side::Left, Point::new(400.0, 300.0))
        );
    }

    #[test]
    fn test_close_path_returns_to_subpath_start() {
        let mut h = harness();
        h.engine.move_to(Point::new(50.0, 60.0));
        h.engine.line_to(Point::new(70.0, 60.0));
        h.engine.line_to(Point::new(70.0, 80.0));
        h.engine.close_path();
        assert_eq!(h.engine.cursor().position, Point::new(50.0, 60.0));
    }

    #[test]
    fn test_move_clears_continuation_memory() {
        let mut h = harness();
        h.engine
            .set_last_control(Some((CurveFamily::Cubic, Point::new(1.0, 2.0))));
        h.engine.move_to(Point::new(10.0, 10.0));
        assert!(h.engine.cursor().last_control.is_none());
    }

    #[test]
    fn test_halt_disengages_pen() {
        let mut h = harness();
        h.engine.move_to(Point::new(10.0, 10.0));
        h.engine.line_to(Point::new(20.0, 10.0));
        assert!(h.engine.pen_engaged());
        h.engine.halt();
        assert!(!h.engine.pen_engaged());
    }

    #[test]
    fn test_reverse_motors_swaps_channels() {
        let config = FrameConfig {
            reverse_motors: true,
            ..reference_config()
        };
        let mut h = harness_with(config, Point::ORIGIN);
        let plain = harness();
        let mut plain_engine = plain.engine;

        let target = Point::new(100.0, 50.0);
        h.engine.move_to(target);
        plain_engine.move_to(target);

        // The driver wired as "left" receives what the right channel
        // would get on an uncrossed frame.
        assert_eq!(
            h.left_log.borrow().total(),
            plain.right_log.borrow().total()
        );
        assert_eq!(
            h.right_log.borrow().total(),
            plain.left_log.borrow().total()
        );
    }

    #[test]
    fn test_zero_length_segment_emits_no_pulses() {
        let mut h = harness();
        h.engine.move_to(Point::ORIGIN);
        assert_eq!(h.left_log.borrow().total(), 0);
        assert_eq!(h.right_log.borrow().total(), 0);
    }
}
