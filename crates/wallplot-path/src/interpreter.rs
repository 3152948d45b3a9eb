//! Path interpreter: executes parsed commands against the motion
//! engine.
//!
//! Resolves relative coordinates against the current cursor, infers
//! smooth-curve control points from the continuation memory, flattens
//! curves, and dispatches straight segments. Arcs are surfaced as an
//! explicit unsupported-operation warning, never silently dropped.

use crate::command::{CoordMode, PathCommand};
use crate::flatten::{flatten_cubic, flatten_quadratic};
use crate::parser::PathScanner;
use crate::source::PeekableSource;
use std::io::Read;
use tracing::debug;
use wallplot_core::{CurveFamily, Point, Result, Warning};
use wallplot_motion::MotionEngine;

/// How a run of path data ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTermination {
    /// Consume the source to end of stream.
    EndOfStream,
    /// Stop at the closing `"` of an SVG attribute; end of stream
    /// before the quote is fatal.
    ClosingQuote,
}

/// Interpret path data from `source`, driving `engine`.
pub fn run_path<R: Read>(
    engine: &mut MotionEngine,
    source: &mut PeekableSource<R>,
    termination: PathTermination,
) -> Result<()> {
    let diagnostics = engine.diagnostics();
    let stop_at_quote = termination == PathTermination::ClosingQuote;
    let mut scanner = PathScanner::new(source, stop_at_quote);
    let mut executed = 0u32;
    while let Some(command) = scanner.next_command(&*diagnostics)? {
        execute(engine, command);
        executed += 1;
    }
    debug!(executed, "path data interpreted");
    Ok(())
}

/// Resolve an operand point against the cursor for relative commands.
fn resolve(mode: CoordMode, position: Point, operand: Point) -> Point {
    match mode {
        CoordMode::Absolute => operand,
        CoordMode::Relative => position + operand,
    }
}

/// Execute one command against the engine.
fn execute(engine: &mut MotionEngine, command: PathCommand) {
    let position = engine.cursor().position;
    match command {
        PathCommand::MoveTo { mode, target } => {
            engine.move_to(resolve(mode, position, target));
        }
        PathCommand::LineTo { mode, target } => {
            engine.line_to(resolve(mode, position, target));
        }
        PathCommand::HorizontalTo { mode, x } => {
            let x = match mode {
                CoordMode::Absolute => x,
                CoordMode::Relative => position.x + x,
            };
            engine.line_to(Point::new(x, position.y));
        }
        PathCommand::VerticalTo { mode, y } => {
            let y = match mode {
                CoordMode::Absolute => y,
                CoordMode::Relative => position.y + y,
            };
            engine.line_to(Point::new(position.x, y));
        }
        PathCommand::CubicCurveTo {
            mode,
            control1,
            control2,
            target,
        } => {
            let control1 = resolve(mode, position, control1);
            let control2 = resolve(mode, position, control2);
            let target = resolve(mode, position, target);
            trace_cubic(engine, control1, control2, target);
        }
        PathCommand::CubicCurveSmoothTo {
            mode,
            control2,
            target,
        } => {
            let control2 = resolve(mode, position, control2);
            let target = resolve(mode, position, target);
            let control1 = match engine.cursor().last_control {
                Some((CurveFamily::Cubic, previous)) => {
                    engine.cursor().fictive.reflect(previous)
                }
                // No cubic to continue: degenerate control point at
                // the target, effectively a line.
                _ => target,
            };
            trace_cubic(engine, control1, control2, target);
        }
        PathCommand::QuadraticCurveTo {
            mode,
            control,
            target,
        } => {
            let control = resolve(mode, position, control);
            let target = resolve(mode, position, target);
            trace_quadratic(engine, control, target);
        }
        PathCommand::QuadraticCurveSmoothTo { mode, target } => {
            let target = resolve(mode, position, target);
            let control = match engine.cursor().last_control {
                Some((CurveFamily::Quadratic, previous)) => {
                    engine.cursor().fictive.reflect(previous)
                }
                _ => target,
            };
            trace_quadratic(engine, control, target);
        }
        PathCommand::ArcTo { .. } => {
            engine.diagnostics().warning(&Warning::UnsupportedArc);
        }
        PathCommand::ClosePath => {
            engine.close_path();
        }
    }
}

/// Flatten and draw a cubic curve, then record its last control point
/// for smooth continuation.
fn trace_cubic(engine: &mut MotionEngine, control1: Point, control2: Point, target: Point) {
    let start = engine.cursor().position;
    for sample in flatten_cubic(start, control1, control2, target) {
        engine.trace_to(sample);
    }
    engine.set_last_control(Some((CurveFamily::Cubic, control2)));
}

/// Flatten and draw a quadratic curve, then record its control point
/// for smooth continuation.
fn trace_quadratic(engine: &mut MotionEngine, control: Point, target: Point) {
    let start = engine.cursor().position;
    for sample in flatten_quadratic(start, control, target) {
        engine.trace_to(sample);
    }
    engine.set_last_control(Some((CurveFamily::Quadratic, control)));
}
