//! # Wallplot Core
//!
//! Shared types for the wallplot cable-plotter engine:
//! surface geometry, the crate-wide error taxonomy, and the
//! diagnostics sink that non-fatal conditions are reported through.

pub mod diagnostics;
pub mod error;
pub mod geometry;

pub use diagnostics::{DiagnosticsSink, RecordingDiagnostics, TracingDiagnostics, Warning};
pub use error::{PlotterError, Result};
pub use geometry::{CurveFamily, Point};
