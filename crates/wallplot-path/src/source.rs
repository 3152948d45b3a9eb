//! Byte-stream command source with single-byte peek.
//!
//! The path grammar needs to test "is the next character part of
//! another operand group" without consuming it, to support implicit
//! repetition of a command letter. One byte of pushback is exactly
//! enough.

use std::io::{self, Read};

/// A sequential byte source with one byte of lookahead.
pub struct PeekableSource<R: Read> {
    inner: R,
    peeked: Option<u8>,
}

impl<R: Read> PeekableSource<R> {
    /// Wrap a reader. Callers reading from files should pass a
    /// buffered reader; this type reads one byte at a time.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            peeked: None,
        }
    }

    /// Consume and return the next byte, or `None` at end of stream.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.peeked.take() {
            return Ok(Some(byte));
        }
        self.read_inner()
    }

    /// Return the next byte without consuming it.
    pub fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.read_inner()?;
        }
        Ok(self.peeked)
    }

    fn read_inner(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let mut source = PeekableSource::new("ab".as_bytes());
        assert_eq!(source.peek_byte().unwrap(), Some(b'a'));
        assert_eq!(source.peek_byte().unwrap(), Some(b'a'));
        assert_eq!(source.next_byte().unwrap(), Some(b'a'));
        assert_eq!(source.next_byte().unwrap(), Some(b'b'));
        assert_eq!(source.next_byte().unwrap(), None);
    }

    #[test]
    fn test_peek_at_end_of_stream() {
        let mut source = PeekableSource::new("".as_bytes());
        assert_eq!(source.peek_byte().unwrap(), None);
        assert_eq!(source.next_byte().unwrap(), None);
    }
}
