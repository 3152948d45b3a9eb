//! Strict-subset G-code dialect.
//!
//! The plotter accepts the same motion semantics through a minimal
//! G-code vocabulary: `G00` travel, `G01` draw, `G04` dwell, with
//! `G21` and `M30` recognized as no-ops. Anything else is reported to
//! the diagnostics sink and skipped; the interpreter never halts on an
//! unknown word.

use std::io::BufRead;
use tracing::debug;
use wallplot_core::{DiagnosticsSink, Point, Result, Warning};
use wallplot_motion::MotionEngine;

/// Interpret a G-code stream line by line.
pub fn run_gcode<R: BufRead>(engine: &mut MotionEngine, reader: R) -> Result<()> {
    let diagnostics = engine.diagnostics();
    let mut lines = 0u32;
    for line in reader.lines() {
        let line = line?;
        process_line(engine, &*diagnostics, line.trim());
        lines += 1;
    }
    debug!(lines, "G-code stream interpreted");
    Ok(())
}

fn process_line(engine: &mut MotionEngine, diagnostics: &dyn DiagnosticsSink, line: &str) {
    if line.is_empty() {
        return;
    }
    let mut words = line.split_whitespace();
    let code = match words.next() {
        Some(code) => code,
        None => return,
    };
    match code {
        "G00" => {
            if let Some(target) = xy_target(diagnostics, words.next(), words.next()) {
                engine.move_to(target);
            }
        }
        "G01" => {
            if let Some(target) = xy_target(diagnostics, words.next(), words.next()) {
                engine.line_to(target);
            }
        }
        "G04" => {
            if let Some(seconds) = operand_value(diagnostics, words.next()) {
                engine.dwell(seconds);
            }
        }
        // Recognized but carrying no behavior here: units are fixed
        // and end-of-program needs no action.
        "G21" | "M30" => {}
        _ => {
            diagnostics.warning(&Warning::UnknownGcodeWord {
                word: code.to_string(),
            });
        }
    }
}

/// Parse two positional coordinate words (`X…` `Y…`).
fn xy_target(
    diagnostics: &dyn DiagnosticsSink,
    x: Option<&str>,
    y: Option<&str>,
) -> Option<Point> {
    let x = operand_value(diagnostics, x)?;
    let y = operand_value(diagnostics, y)?;
    Some(Point::new(x, y))
}

/// Strip the leading axis letter from a word and parse the rest.
fn operand_value(diagnostics: &dyn DiagnosticsSink, word: Option<&str>) -> Option<f64> {
    let word = match word {
        Some(word) => word,
        None => {
            diagnostics.warning(&Warning::MalformedOperand {
                text: String::new(),
            });
            return None;
        }
    };
    match word.get(1..).and_then(|rest| rest.parse::<f64>().ok()) {
        Some(value) => Some(value),
        None => {
            diagnostics.warning(&Warning::MalformedOperand {
                text: word.to_string(),
            });
            None
        }
    }
}
