//! Source location tracking for error messages.

use std::fmt;

/// A location in source text (byte offset, line, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Byte offset from start of file
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in characters not bytes)
    pub column: u32,
}

impl Location {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }

    /// Resolve a byte offset into `source` to a line/column location.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];

        let line = before.bytes().filter(|&b| b == b'\n').count() as u32 + 1;
        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() as u32 + 1;

        Self { offset, line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_offset_simple() {
        let source = "len=2\ncolors=";

        assert_eq!(Location::from_offset(source, 0), Location::new(0, 1, 1));
        assert_eq!(Location::from_offset(source, 5), Location::new(5, 1, 6));
        assert_eq!(Location::from_offset(source, 6), Location::new(6, 2, 1));
        assert_eq!(Location::from_offset(source, 13), Location::new(13, 2, 8));
    }

    #[test]
    fn test_from_offset_clamps_past_end() {
        assert_eq!(Location::from_offset("ab", 10), Location::new(2, 1, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Location::new(7, 3, 4).to_string(), "3:4");
    }
}
