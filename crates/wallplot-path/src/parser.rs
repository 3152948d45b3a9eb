//! Tokenizer for SVG path data.
//!
//! Consumes a `PeekableSource` and produces `PathCommand`s. A command
//! letter may be followed by several operand groups; the scanner keeps
//! the letter pending and uses one byte of lookahead to decide whether
//! the next characters are another group or a new command.
//!
//! Unknown letters and malformed operands are reported to the
//! diagnostics sink and skipped; only I/O failures and a missing
//! closing quote are errors.

use crate::command::PathCommand;
use crate::source::PeekableSource;
use std::io::Read;
use wallplot_core::{DiagnosticsSink, PlotterError, Result, Warning};

/// True for bytes that can start or continue a numeric operand.
fn is_number_byte(byte: u8) -> bool {
    matches!(byte, b'-' | b'.' | b'0'..=b'9')
}

/// True for bytes separating tokens: whitespace and commas.
fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | b',')
}

/// Streaming scanner over path data.
pub struct PathScanner<'a, R: Read> {
    source: &'a mut PeekableSource<R>,
    stop_at_quote: bool,
    pending: Option<char>,
    ended_at_quote: bool,
}

impl<'a, R: Read> PathScanner<'a, R> {
    /// Scan `source` until end of stream, or until an unescaped `"`
    /// when `stop_at_quote` is set (path data embedded in an SVG
    /// attribute). In quote mode, end of stream before the quote is a
    /// fatal `UnterminatedPath`.
    pub fn new(source: &'a mut PeekableSource<R>, stop_at_quote: bool) -> Self {
        Self {
            source,
            stop_at_quote,
            pending: None,
            ended_at_quote: false,
        }
    }

    /// True once scanning stopped at the closing quote.
    pub fn ended_at_quote(&self) -> bool {
        self.ended_at_quote
    }

    /// Produce the next command, or `None` at the end of the data.
    pub fn next_command(
        &mut self,
        diagnostics: &dyn DiagnosticsSink,
    ) -> Result<Option<PathCommand>> {
        loop {
            // Implicit repetition: a pending letter absorbs further
            // operand groups as long as the next token is numeric.
            if let Some(letter) = self.pending {
                self.skip_separators()?;
                if self.peek_is_number()? {
                    match self.read_group(letter, diagnostics)? {
                        Some(command) => return Ok(Some(command)),
                        None => continue,
                    }
                }
                self.pending = None;
            }

            self.skip_separators()?;
            let byte = match self.source.next_byte()? {
                Some(byte) => byte,
                None => {
                    if self.stop_at_quote {
                        return Err(PlotterError::UnterminatedPath);
                    }
                    return Ok(None);
                }
            };

            if byte == b'"' && self.stop_at_quote {
                self.ended_at_quote = true;
                return Ok(None);
            }

            let letter = byte as char;
            match PathCommand::operand_count(letter) {
                Some(0) => {
                    self.pending = None;
                    return Ok(Some(PathCommand::ClosePath));
                }
                Some(_) => {
                    match self.read_group(letter, diagnostics)? {
                        Some(command) => {
                            self.pending = Some(letter);
                            return Ok(Some(command));
                        }
                        None => continue,
                    }
                }
                None => {
                    diagnostics.warning(&Warning::UnknownPathCommand { token: letter });
                    // Swallow the operands that belonged to the
                    // unknown command so they are not misread as
                    // further command letters.
                    self.skip_operand_bytes()?;
                }
            }
        }
    }

    /// Read one full operand group for `letter`. Returns `None` after
    /// reporting a malformed operand.
    fn read_group(
        &mut self,
        letter: char,
        diagnostics: &dyn DiagnosticsSink,
    ) -> Result<Option<PathCommand>> {
        let count = PathCommand::operand_count(letter).unwrap_or(0);
        let mut operands = [0.0f64; 7];
        for slot in operands.iter_mut().take(count) {
            match self.read_operand(diagnostics)? {
                Some(value) => *slot = value,
                None => {
                    self.pending = None;
                    // Swallow whatever remains of the broken group.
                    self.skip_operand_bytes()?;
                    return Ok(None);
                }
            }
        }
        Ok(PathCommand::from_letter(letter, &operands[..count]))
    }

    /// Read one numeric operand. Returns `None` after reporting a
    /// malformed operand.
    fn read_operand(&mut self, diagnostics: &dyn DiagnosticsSink) -> Result<Option<f64>> {
        self.skip_separators()?;
        let mut text = String::new();
        while let Some(byte) = self.source.peek_byte()? {
            if !is_number_byte(byte) {
                break;
            }
            text.push(byte as char);
            self.source.next_byte()?;
        }
        if text.is_empty() {
            let next = self.source.peek_byte()?.map(|b| b as char);
            diagnostics.warning(&Warning::MalformedOperand {
                text: next.map(String::from).unwrap_or_default(),
            });
            return Ok(None);
        }
        match text.parse::<f64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                diagnostics.warning(&Warning::MalformedOperand { text });
                Ok(None)
            }
        }
    }

    fn skip_separators(&mut self) -> Result<()> {
        while let Some(byte) = self.source.peek_byte()? {
            if !is_separator(byte) {
                break;
            }
            self.source.next_byte()?;
        }
        Ok(())
    }

    /// Consume separators and numeric bytes following an unknown
    /// command letter.
    fn skip_operand_bytes(&mut self) -> Result<()> {
        while let Some(byte) = self.source.peek_byte()? {
            if !is_separator(byte) && !is_number_byte(byte) {
                break;
            }
            self.source.next_byte()?;
        }
        Ok(())
    }

    fn peek_is_number(&mut self) -> Result<bool> {
        Ok(self.source.peek_byte()?.map(is_number_byte).unwrap_or(false))
    }
}
