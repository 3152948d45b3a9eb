//! Error handling for wallplot.
//!
//! Fatal conditions follow the taxonomy of the machine: configuration
//! errors (impossible geometry, incomplete parameter set) and resource
//! errors (unreadable drawing source) halt all motion permanently;
//! everything recoverable travels through the diagnostics sink as a
//! warning instead of an error.
//!
//! All error types use `thiserror`.

use std::io;
use thiserror::Error;

/// Top-level error type for the plotter engine.
#[derive(Error, Debug)]
pub enum PlotterError {
    /// The motor span cannot accommodate the sheet: the geometry is
    /// physically impossible and no motion is safe.
    #[error("span {span} is shorter than sheet width {sheet_width} plus offset {sheet_offset_x}")]
    SpanTooShort {
        /// Distance between the two motor anchors, in surface units.
        span: f64,
        /// Sheet width, in surface units.
        sheet_width: f64,
        /// Horizontal offset of the sheet from the left anchor.
        sheet_offset_x: f64,
    },

    /// A configuration parameter is missing or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The drawing source is not an SVG document (no `<svg` tag found).
    #[error("drawing source is not an SVG document")]
    NotSvg,

    /// The SVG document contains no `<path>` drawing data.
    #[error("SVG document contains no path data")]
    NoPathData,

    /// Path data ended before its closing quote.
    #[error("path data ended before the closing quote")]
    UnterminatedPath,

    /// The requested drawing speed is not usable.
    #[error("invalid drawing speed: {speed}")]
    InvalidSpeed {
        /// The rejected speed value, in surface units per second.
        speed: f64,
    },

    /// I/O failure while reading a drawing or configuration source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience result alias used across the workspace.
pub type Result<T> = std::result::Result<T, PlotterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_error_message_names_values() {
        let err = PlotterError::SpanTooShort {
            span: 500.0,
            sheet_width: 600.0,
            sheet_offset_x: 200.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("600"));
        assert!(msg.contains("200"));
    }
}
