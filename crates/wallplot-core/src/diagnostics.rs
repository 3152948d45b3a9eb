//! Diagnostics sink for non-fatal conditions.
//!
//! Parse problems and unsupported operations do not stop a plot: the
//! offending unit is skipped and the condition is surfaced here so a
//! host or telemetry layer can report it. Fatal conditions never pass
//! through this sink; they are `PlotterError`s.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::warn;

/// A non-fatal condition encountered while interpreting a drawing or
/// configuration source.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// An unrecognized path command letter was skipped.
    UnknownPathCommand {
        /// The unrecognized command character.
        token: char,
    },
    /// An elliptical-arc command was encountered. Arcs are not
    /// reproduced; the artwork will be incomplete.
    UnsupportedArc,
    /// An operand could not be parsed as a number; its command group
    /// was skipped.
    MalformedOperand {
        /// The text that failed to parse.
        text: String,
    },
    /// An unrecognized G-code word was skipped.
    UnknownGcodeWord {
        /// The word as it appeared in the stream.
        word: String,
    },
    /// A configuration line exceeded the line buffer and was skipped.
    OverlongConfigLine {
        /// 1-based line number in the configuration file.
        line: u32,
    },
    /// A configuration line had no `key value` structure and was
    /// skipped.
    MalformedConfigLine {
        /// 1-based line number in the configuration file.
        line: u32,
    },
    /// A configuration key was not recognized.
    UnknownConfigKey {
        /// The unrecognized key.
        key: String,
    },
}

impl Warning {
    /// Short stable code for telemetry consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Warning::UnknownPathCommand { .. } => "unknown-path-command",
            Warning::UnsupportedArc => "unsupported-arc",
            Warning::MalformedOperand { .. } => "malformed-operand",
            Warning::UnknownGcodeWord { .. } => "unknown-gcode-word",
            Warning::OverlongConfigLine { .. } => "overlong-config-line",
            Warning::MalformedConfigLine { .. } => "malformed-config-line",
            Warning::UnknownConfigKey { .. } => "unknown-config-key",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownPathCommand { token } => {
                write!(f, "unknown path command '{}'", token)
            }
            Warning::UnsupportedArc => write!(f, "elliptical arc is not supported"),
            Warning::MalformedOperand { text } => write!(f, "malformed operand '{}'", text),
            Warning::UnknownGcodeWord { word } => write!(f, "unknown G-code word '{}'", word),
            Warning::OverlongConfigLine { line } => {
                write!(f, "configuration line {} is too long", line)
            }
            Warning::MalformedConfigLine { line } => {
                write!(f, "configuration line {} is malformed", line)
            }
            Warning::UnknownConfigKey { key } => write!(f, "unknown configuration key '{}'", key),
        }
    }
}

/// Receiver for warnings raised during a plot.
///
/// Implementations must tolerate being called mid-segment; the engine
/// is single-threaded, so `&self` with interior mutability is enough.
pub trait DiagnosticsSink {
    /// Report one warning.
    fn warning(&self, warning: &Warning);
}

/// Default sink: forwards every warning to `tracing`.
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn warning(&self, warning: &Warning) {
        warn!(code = warning.code(), "{}", warning);
    }
}

/// Test sink that records every warning it receives.
///
/// Clones share the same underlying buffer, so a test can keep one
/// handle and hand another to the engine.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    warnings: Rc<RefCell<Vec<Warning>>>,
}

impl RecordingDiagnostics {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all warnings received so far.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }

    /// Number of warnings received so far.
    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    /// True when no warning has been received.
    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn warning(&self, warning: &Warning) {
        self.warnings.borrow_mut().push(warning.clone());
    }
}
