//! Grammar primitives over an immutable source and an explicit cursor.
//!
//! The format is line oriented:
//!
//! ```text
//! # comment
//! name=Gray
//! len=2
//! colors=
//! 0 0 0
//! 255 255 255
//! ```
//!
//! Items are `key=value` lines, grids are rows of whitespace separated
//! tokens where `.` is the empty sentinel.

use log::trace;

use super::location::Location;
use super::{SyntaxError, SyntaxErrorKind};

/// Raw grid value for a `.` cell. Only ever seen inside this module and
/// by the code converting grids into the model.
pub const NONE: i64 = -1;

/// A single `key=value` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'a> {
    pub key: &'a str,
    /// Everything after `=` up to the newline, untrimmed.
    pub value: &'a str,
    /// Location of the first character of the key.
    pub location: Location,
}

/// A read position inside a source string.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn location(&self) -> Location {
        Location::from_offset(self.source, self.pos)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The unread remainder of the source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn advance_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.pos += 1;
        }
        &self.source[start..self.pos]
    }

    /// Consume the rest of the current line and its newline, returning the
    /// line without the newline.
    fn take_line(&mut self) -> &'a str {
        let line = self.advance_while(|c| c != b'\n');
        if self.peek() == Some(b'\n') {
            self.pos += 1;
        }
        line
    }

    /// Skip whitespace and, optionally, `#` comments and newlines.
    ///
    /// Without `eat_newlines` the cursor stops in front of the first
    /// newline, so callers can tell where a line ends.
    pub fn skip_insignificant(&mut self, eat_comments: bool, eat_newlines: bool) {
        loop {
            self.advance_while(|c| c.is_ascii_whitespace() && (eat_newlines || c != b'\n'));

            if eat_comments && self.peek() == Some(b'#') {
                self.advance_while(|c| c != b'\n');
            }

            if !(eat_newlines && self.peek() == Some(b'\n')) {
                break;
            }
        }
    }

    /// Read the next `key=value` item.
    ///
    /// Returns `Ok(None)` when no key can be read: at end of input, or in
    /// front of a character that cannot start a key. Callers decide whether
    /// that is the end they expected.
    pub fn read_item(&mut self) -> Result<Option<Item<'a>>, SyntaxError> {
        self.skip_insignificant(true, true);

        let location = self.location();
        let key = self.advance_while(|c| c == b'_' || c.is_ascii_alphabetic());
        if key.is_empty() {
            return Ok(None);
        }

        if self.peek() != Some(b'=') {
            return Err(SyntaxError::new(
                SyntaxErrorKind::Malformed,
                self.location(),
                format!("expected '=' after key \"{}\"", key),
            ));
        }
        self.pos += 1;

        let value = self.take_line();
        trace!("parsed item {}={}", key, value);

        Ok(Some(Item {
            key,
            value,
            location,
        }))
    }

    /// Read the next significant line verbatim, skipping blank lines and
    /// comments in front of it.
    pub fn read_rest_of_line(&mut self) -> &'a str {
        self.skip_insignificant(true, true);
        self.take_line()
    }

    /// Read a `width` x `height` grid of integers in the given base.
    ///
    /// Rows may be separated by blank lines and comment lines, and a row may
    /// end with a comment, but every row must sit on one line with exactly
    /// `width` tokens. Cells are returned row-major with `.` as [`NONE`].
    pub fn read_int_grid(
        &mut self,
        width: usize,
        height: usize,
        base: u32,
    ) -> Result<Vec<i64>, SyntaxError> {
        debug_assert!((2..=36).contains(&base), "unsupported base {}", base);

        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let total = width.checked_mul(height).ok_or_else(|| {
            SyntaxError::new(
                SyntaxErrorKind::Shape,
                self.location(),
                format!("grid of {}x{} cells is too large", width, height),
            )
        })?;

        // every cell takes at least one digit and one separator
        let mut cells = Vec::with_capacity(total.min(self.rest().len() / 2 + 1));
        self.skip_insignificant(true, true);

        for row in 0..height {
            if self.is_at_end() {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::Shape,
                    self.location(),
                    format!("grid ended after {} of {} rows", row, height),
                ));
            }

            for col in 0..width {
                self.skip_insignificant(false, false);

                if matches!(self.peek(), None | Some(b'\n') | Some(b'#')) {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::Shape,
                        self.location(),
                        format!("row {} has {} cells, expected {}", row, col, width),
                    ));
                }

                let location = self.location();
                let token = self.advance_while(|c| !c.is_ascii_whitespace());
                let cell = parse_cell(token, base).map_err(|message| {
                    SyntaxError::new(SyntaxErrorKind::Malformed, location, message)
                })?;
                cells.push(cell);
            }

            self.skip_insignificant(true, false);
            if !matches!(self.peek(), None | Some(b'\n')) {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::Shape,
                    self.location(),
                    format!("row {} has more than {} cells", row, width),
                ));
            }
            self.skip_insignificant(true, true);
        }

        Ok(cells)
    }
}

/// Parse one grid token: `.` or digits `0-9A-Z` in `base`.
fn parse_cell(token: &str, base: u32) -> Result<i64, String> {
    if token == "." {
        return Ok(NONE);
    }

    let mut value: i64 = 0;
    for c in token.chars() {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            _ => return Err(format!("expected [.0-9A-Z], found '{}'", c)),
        };
        if digit >= base {
            return Err(format!("digit '{}' is out of range for base {}", c, base));
        }
        value = value
            .checked_mul(base as i64)
            .and_then(|v| v.checked_add(digit as i64))
            .ok_or_else(|| format!("cell value {} is too large", token))?;
    }

    Ok(value)
}
