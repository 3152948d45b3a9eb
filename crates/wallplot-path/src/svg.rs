//! SVG document scanner.
//!
//! The plotter does not parse XML. It scans the byte stream for the
//! `<svg` tag, then for `<path`, then for each `d="` attribute, and
//! hands the attribute payload to the path interpreter, which stops at
//! the closing quote. This is deliberately tolerant of everything
//! around the path data and deliberately strict about the two tags
//! that prove the stream is artwork at all.

use crate::interpreter::{run_path, PathTermination};
use crate::source::PeekableSource;
use std::io::Read;
use tracing::{debug, info};
use wallplot_core::{PlotterError, Result};
use wallplot_motion::MotionEngine;

/// Plot every path in an SVG byte stream.
pub fn plot_svg<R: Read>(engine: &mut MotionEngine, source: &mut PeekableSource<R>) -> Result<()> {
    if !find(source, b"<svg")? {
        return Err(PlotterError::NotSvg);
    }
    if !find(source, b"<path")? {
        return Err(PlotterError::NoPathData);
    }
    let mut paths = 0u32;
    while find(source, b"d=\"")? {
        run_path(engine, source, PathTermination::ClosingQuote)?;
        paths += 1;
        debug!(paths, "path plotted");
    }
    info!(paths, "SVG document plotted");
    Ok(())
}

/// Advance the source just past the next occurrence of `pattern`.
fn find<R: Read>(source: &mut PeekableSource<R>, pattern: &[u8]) -> Result<bool> {
    let mut matched = 0;
    while let Some(byte) = source.next_byte()? {
        if byte == pattern[matched] {
            matched += 1;
            if matched == pattern.len() {
                return Ok(true);
            }
        } else if byte == pattern[0] {
            matched = 1;
        } else {
            matched = 0;
        }
    }
    Ok(false)
}
