//! # Wallplot Path
//!
//! Path interpretation for the plotter: a byte-stream command source
//! with one-byte peek, the closed path-command model, the fixed
//! resolution Bézier flattener, the SVG path interpreter, the strict
//! subset G-code dialect, and the SVG document scanner that feeds the
//! interpreter.

pub mod command;
pub mod flatten;
pub mod gcode;
pub mod interpreter;
pub mod parser;
pub mod source;
pub mod svg;

pub use command::{CoordMode, PathCommand};
pub use flatten::{flatten_cubic, flatten_quadratic};
pub use gcode::run_gcode;
pub use interpreter::{run_path, PathTermination};
pub use parser::PathScanner;
pub use source::PeekableSource;
pub use svg::plot_svg;
