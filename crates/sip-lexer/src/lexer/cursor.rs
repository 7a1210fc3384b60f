//! Read position over an immutable input buffer
//!
//! The cursor knows nothing about SIP grammar. It offers bounded lookahead,
//! single-byte consumption and line-oriented scanning; everything else is
//! built on top of it by the [`Lexer`](super::Lexer).

use bytes::Bytes;

use crate::error::{Error, Result};

/// ASCII letter
pub fn is_alpha(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

/// ASCII decimal digit
pub fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// ASCII hexadecimal digit, either case
pub fn is_hex_digit(ch: u8) -> bool {
    ch.is_ascii_hexdigit()
}

/// An input buffer and a read position into it
///
/// `position` never exceeds the buffer length. Reads past the end fail with
/// [`Error::EndOfInput`] and leave the position untouched.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Bytes,
    position: usize,
    saved_position: usize,
}

impl Cursor {
    /// Create a cursor at the start of `buffer`
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Cursor {
            buffer: buffer.into(),
            position: 0,
            saved_position: 0,
        }
    }

    /// The whole input buffer
    pub fn buffer(&self) -> &Bytes {
        &self.buffer
    }

    /// Index of the next unread byte
    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position.min(self.buffer.len());
    }

    pub(crate) fn save_position(&mut self) {
        self.saved_position = self.position;
    }

    /// Length of the input buffer in bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True if the input buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Unread bytes
    pub fn remaining(&self) -> &[u8] {
        &self.buffer[self.position..]
    }

    /// True while unread bytes remain
    pub fn has_more(&self) -> bool {
        self.position < self.buffer.len()
    }

    /// The byte `k` positions ahead of the cursor, without moving it
    pub fn lookahead(&self, k: usize) -> Result<u8> {
        self.position
            .checked_add(k)
            .and_then(|i| self.buffer.get(i))
            .copied()
            .ok_or(Error::EndOfInput {
                position: self.position.saturating_add(k),
            })
    }

    /// Shorthand for `lookahead(0)`
    pub fn peek(&self) -> Result<u8> {
        self.lookahead(0)
    }

    /// Advance by `k` bytes, clamped to the end of the buffer
    pub fn consume(&mut self, k: usize) {
        self.set_position(self.position.saturating_add(k));
    }

    /// Advance to the position recorded by the last peek operation
    pub fn consume_saved(&mut self) {
        self.set_position(self.saved_position);
    }

    /// Read and consume one byte
    pub fn next_byte(&mut self) -> Result<u8> {
        let ch = self.lookahead(0)?;
        self.position += 1;
        Ok(ch)
    }

    /// Consume up to and including the next `'\n'`, or to the end of input
    pub fn rest_of_line(&mut self) -> String {
        let start = self.position;
        let end = match self.remaining().iter().position(|&b| b == b'\n') {
            Some(offset) => start + offset + 1,
            None => self.buffer.len(),
        };
        self.position = end;
        self.slice_to_string(start, end)
    }

    /// Same as [`rest_of_line`](Self::rest_of_line) without consuming anything
    pub fn peek_line(&mut self) -> String {
        let saved = self.position;
        let line = self.rest_of_line();
        self.position = saved;
        line
    }

    /// Split the unread input into lines, each keeping its `'\n'`
    pub fn lines(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while self.has_more() {
            lines.push(self.rest_of_line());
        }
        lines
    }

    /// Consume bytes up to, but not including, `delim`
    ///
    /// Fails without moving the cursor if `delim` never appears.
    pub fn next_token_by_delim(&mut self, delim: u8) -> Result<String> {
        let start = self.position;
        match self.remaining().iter().position(|&b| b == delim) {
            Some(offset) => {
                self.position = start + offset;
                Ok(self.slice_to_string(start, self.position))
            }
            None => Err(Error::UnterminatedString {
                delimiter: delim as char,
                start,
            }),
        }
    }

    /// Text of `buffer[start..end]`, invalid UTF-8 replaced with U+FFFD
    pub(crate) fn slice_to_string(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.buffer[start..end]).into_owned()
    }
}
