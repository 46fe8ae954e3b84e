//! Line reader for the tokenizer.
//!
//! Splits input into physical lines with 1-based numbering for
//! diagnostics. Uses `memchr` for fast newline detection (SIMD on
//! supported platforms); lines borrow directly from the input.

use memchr::memchr;

/// A single line from the input with its physical line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text (without trailing newline).
    pub text: &'a str,
    /// 1-based physical line number.
    pub number: u32,
}

/// Line reader feeding the tokenizer one physical line at a time.
pub struct Lexer<'a> {
    /// The complete input text.
    input: &'a str,
    /// Input as bytes for efficient scanning.
    bytes: &'a [u8],
    /// Current byte offset.
    offset: usize,
    /// Number of the next line to be read (1-based).
    next_number: u32,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            next_number: 1,
        }
    }

    /// Consume and return the next line.
    ///
    /// Returns `None` at end of input. Uses SIMD-accelerated newline
    /// scanning via `memchr`; a CR before the newline is stripped.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if self.offset >= self.bytes.len() {
            return None;
        }

        let start = self.offset;

        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => self.bytes.len(),
        };

        // Handle CRLF: check byte before newline is CR
        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        // Advance past newline
        self.offset = if end < self.bytes.len() { end + 1 } else { end };

        let number = self.next_number;
        self.next_number += 1;

        Some(Line {
            text: &self.input[start..text_end],
            number,
        })
    }
}
