//! A character cursor over term text.
//!
//! The [`Scanner`] tracks a byte offset into a borrowed `&str` and hands out
//! characters one at a time.  It knows nothing about the term grammar
//! beyond what counts as whitespace and comments.

use crate::TermParserError;

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at byte offset `pos`.  An offset past
    /// the end or inside a multi-byte character reads as end of input.
    pub fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    /// Returns the current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the whole text, independent of the position.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Returns the text between `start` and the current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.text.get(start..self.pos).unwrap_or("")
    }

    #[inline]
    fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or("")
    }

    /// Returns the current character without consuming it.
    #[inline]
    pub fn read(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the character after the current one.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rest().is_empty()
    }

    /// Moves past the current character.
    #[inline]
    pub fn advance(&mut self) {
        if let Some(c) = self.read() {
            self.pos += c.len_utf8();
        }
    }

    /// Consumes and returns the current character with its offset.
    #[inline]
    pub fn pop(&mut self) -> Option<(usize, char)> {
        let pos = self.pos;
        let c = self.read()?;
        self.pos += c.len_utf8();
        Some((pos, c))
    }

    /// Returns `true` if the remaining input starts with `s`.
    #[inline]
    pub fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consumes `s` if the remaining input starts with it.
    pub fn eat(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes `s` or fails naming what was expected.
    pub fn expect(&mut self, s: &'static str) -> Result<(), TermParserError> {
        if self.eat(s) {
            return Ok(());
        }
        Err(self.unexpected(s))
    }

    /// Consumes characters while `pred` holds and returns them.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Skips whitespace and `%` comments, which run to the end of the line.
    pub fn skip_ws(&mut self) {
        loop {
            self.take_while(char::is_whitespace);
            if self.read() == Some('%') {
                self.take_while(|c| c != '\n');
            } else {
                break;
            }
        }
    }

    /// Builds the error for finding something other than `expected` here.
    pub fn unexpected(&self, expected: &'static str) -> TermParserError {
        match self.read() {
            Some(found) => TermParserError::Unexpected {
                pos: self.pos,
                found,
                expected,
            },
            None => TermParserError::UnexpectedEnd {
                pos: self.pos,
                expected,
            },
        }
    }
}
