use core::str::FromStr;

use log::trace;
use yuri_core::Shape;

use crate::{DecodeError, DecodeErrorKind, Span};

/// How many objects, arrays and pairs may be open at once while decoding
/// into a type or into a [`Value`](crate::Value). Skipped values are not
/// limited.
pub const MAX_DEPTH: usize = 128;

/// A cursor over the input text, shared by every step of a decode.
///
/// Every token reader skips leading whitespace first. After a failed step
/// the position and nesting depth are unspecified.
#[derive(Debug, Clone)]
pub struct Decoder<'input> {
    input: &'input str,
    pos: usize,
    depth: usize,
}

impl<'input> Decoder<'input> {
    /// Creates a decoder positioned at the start of `input`
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    /// Current position, in bytes
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The whole input
    #[inline]
    pub fn input(&self) -> &'input str {
        self.input
    }

    fn bytes(&self) -> &'input [u8] {
        self.input.as_bytes()
    }

    pub(crate) fn remaining(&self) -> &'input [u8] {
        &self.bytes()[self.pos..]
    }

    /// An error starting at the current position
    pub fn error(&self, kind: DecodeErrorKind, len: usize) -> DecodeError {
        DecodeError::new(kind, Span::new(self.pos, len))
    }

    /// An error describing whatever sits at the current position
    pub fn unexpected(&self, wanted: &'static str) -> DecodeError {
        match self.input.get(self.pos..).and_then(|rest| rest.chars().next()) {
            Some(got) => {
                let kind = DecodeErrorKind::UnexpectedChar { got, wanted };
                self.error(kind, got.len_utf8())
            }
            None => self.error(DecodeErrorKind::UnexpectedEnd { wanted }, 0),
        }
    }

    /// Moves past any whitespace
    pub fn skip_whitespace(&mut self) {
        let skipped = self
            .remaining()
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        self.pos += skipped;
    }

    /// Returns the next significant byte without consuming it
    pub fn peek(&mut self, wanted: &'static str) -> Result<u8, DecodeError> {
        self.skip_whitespace();
        match self.remaining().first() {
            Some(&b) => Ok(b),
            None => Err(self.error(DecodeErrorKind::UnexpectedEnd { wanted }, 0)),
        }
    }

    /// Consumes `byte` if it is the next significant byte
    pub fn eat(&mut self, byte: u8) -> bool {
        self.skip_whitespace();
        if self.remaining().first() == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `byte`, which must be the next significant byte
    pub fn expect(&mut self, byte: u8, wanted: &'static str) -> Result<(), DecodeError> {
        if self.peek(wanted)? == byte {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(wanted))
        }
    }

    /// Consumes the opening bracket of a nested value. Fails with
    /// [`TooDeep`](DecodeErrorKind::TooDeep) once [`MAX_DEPTH`] values are
    /// already open.
    pub fn open(&mut self, byte: u8, wanted: &'static str) -> Result<(), DecodeError> {
        self.expect(byte, wanted)?;
        if self.depth >= MAX_DEPTH {
            let kind = DecodeErrorKind::TooDeep { limit: MAX_DEPTH };
            return Err(DecodeError::new(kind, Span::new(self.pos - 1, 1)));
        }
        self.depth += 1;
        Ok(())
    }

    /// Consumes `byte` if it is next, closing the innermost open value
    pub fn eat_close(&mut self, byte: u8) -> bool {
        let closed = self.eat(byte);
        if closed {
            self.depth = self.depth.saturating_sub(1);
        }
        closed
    }

    /// Consumes `byte`, which must close the innermost open value
    pub fn close(&mut self, byte: u8, wanted: &'static str) -> Result<(), DecodeError> {
        self.expect(byte, wanted)?;
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    /// Consumes the exact literal `lit`
    pub fn eat_literal(&mut self, lit: &'static str) -> Result<(), DecodeError> {
        self.skip_whitespace();
        if self.remaining().starts_with(lit.as_bytes()) {
            self.pos += lit.len();
            Ok(())
        } else {
            let len = lit.len().min(self.remaining().len());
            Err(self.error(DecodeErrorKind::InvalidLiteral { wanted: lit }, len))
        }
    }

    /// Reads a quoted string and returns what is between the quotes.
    ///
    /// Escapes are not interpreted: a backslash only keeps the byte after
    /// it from closing the string, and both stay in the result.
    pub fn parse_str(&mut self) -> Result<&'input str, DecodeError> {
        if self.peek("a string")? != b'"' {
            return Err(self.unexpected("a string"));
        }
        let start = self.pos;
        let bytes = self.bytes();
        let unterminated = || {
            DecodeError::new(
                DecodeErrorKind::UnterminatedString,
                Span::new(start, bytes.len() - start),
            )
        };
        if bytes.len() - start < 2 {
            return Err(unterminated());
        }

        let mut i = start + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'"' => {
                    let payload = self.input.get(start + 1..i).ok_or_else(unterminated)?;
                    self.pos = i + 1;
                    trace!("string {payload:?} at byte {start}");
                    return Ok(payload);
                }
                _ => i += 1,
            }
        }
        Err(unterminated())
    }

    /// Whether a `null` (or a misspelling of it) comes next, as opposed to
    /// some other value. `nan` is a number.
    pub fn null_next(&mut self, wanted: &'static str) -> Result<bool, DecodeError> {
        if self.peek(wanted)? != b'n' {
            return Ok(false);
        }
        let nan = self
            .remaining()
            .get(..3)
            .is_some_and(|word| word.eq_ignore_ascii_case(b"nan"));
        Ok(!nan)
    }

    /// Reads `true` or `false`
    pub fn parse_bool(&mut self) -> Result<bool, DecodeError> {
        match self.peek("a boolean")? {
            b't' => self.eat_literal("true").map(|()| true),
            b'f' => self.eat_literal("false").map(|()| false),
            _ => Err(self.unexpected("a boolean")),
        }
    }

    /// Length of the number token at the current position. Besides digits,
    /// signs, dots and exponents this takes `inf`, `infinity` and `NaN` in
    /// any case, optionally signed, which is how non-finite floats are
    /// written.
    fn number_len(&self) -> usize {
        let rest = self.remaining();
        let sign = usize::from(matches!(rest.first(), Some(b'+' | b'-')));
        let word = rest[sign..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        let named = &rest[sign..sign + word];
        if ["inf", "infinity", "nan"]
            .iter()
            .any(|name| named.eq_ignore_ascii_case(name.as_bytes()))
        {
            return sign + word;
        }
        rest.iter()
            .take_while(|b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E'))
            .count()
    }

    /// Reads a number as `T`, the type described by `target`. A token that
    /// doesn't parse, or doesn't fit, is an error.
    pub fn parse_number<T: FromStr>(
        &mut self,
        target: &'static Shape,
    ) -> Result<T, DecodeError> {
        self.skip_whitespace();
        let len = self.number_len();
        if len == 0 {
            return Err(self.unexpected("a number"));
        }

        let text = self.input.get(self.pos..self.pos + len).unwrap_or_default();
        match text.parse() {
            Ok(value) => {
                trace!("number {text} as {target} at byte {}", self.pos);
                self.pos += len;
                Ok(value)
            }
            Err(_) => Err(self.error(
                DecodeErrorKind::InvalidNumber {
                    text: text.to_owned(),
                    target,
                },
                len,
            )),
        }
    }

    /// Fails unless only whitespace is left
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        self.skip_whitespace();
        match self.remaining().len() {
            0 => Ok(()),
            rest => Err(self.error(DecodeErrorKind::TrailingInput, rest)),
        }
    }
}
