//! Text span and position types for source location tracking.
//!
//! Offsets used by tokens and AST nodes count Unicode scalar values (chars)
//! from the start of the source, so a CJK keyword advances the column by its
//! visible width in characters rather than its UTF-8 byte length. Reporting
//! layers that need byte offsets convert with [`LineMap::byte_range`].

use std::fmt;
use std::ops::Range;

/// A position in source text, measured in chars from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    /// The char offset where this span starts.
    pub start: TextPos,
    /// The length of this span in chars.
    pub length: TextPos,
}

impl TextSpan {
    /// Create a new text span.
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    /// Whether this span is empty (zero-length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether this span contains the given position.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }

    /// Return a new span covering both this span and the other.
    pub fn union(&self, other: &TextSpan) -> TextSpan {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        TextSpan::from_bounds(start, end)
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A 1-based line and column, as shown to users.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A map from char offsets to line numbers, built from source text.
///
/// Only `\n` starts a new line; a `\r` before it belongs to the previous line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Char offsets of the start of each line.
    line_starts: Vec<TextPos>,
    /// Byte offset of every char, plus the total byte length at the end.
    byte_offsets: Vec<usize>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);
        for (i, (byte_pos, ch)) in text.char_indices().enumerate() {
            byte_offsets.push(byte_pos);
            if ch == '\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        byte_offsets.push(text.len());
        Self {
            line_starts,
            byte_offsets,
        }
    }

    /// Get the line number (0-based) for a char offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Get the 1-based line and column for a char offset.
    pub fn position_of(&self, pos: TextPos) -> Position {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        Position {
            line: line + 1,
            column: pos - line_start + 1,
        }
    }

    /// Get the char offset of the start of a 0-based line.
    pub fn line_start(&self, line: u32) -> TextPos {
        self.line_starts[line as usize]
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Number of chars in the mapped text.
    pub fn char_len(&self) -> usize {
        self.byte_offsets.len() - 1
    }

    /// Convert a char offset to a byte offset, clamping past the end.
    pub fn byte_offset(&self, pos: TextPos) -> usize {
        let idx = (pos as usize).min(self.char_len());
        self.byte_offsets[idx]
    }

    /// Convert a char span to a byte range into the original text.
    pub fn byte_range(&self, span: TextSpan) -> Range<usize> {
        self.byte_offset(span.start)..self.byte_offset(span.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.start, 5);
        assert_eq!(span.length, 10);
        assert_eq!(span.end(), 15);
        assert!(span.contains(5));
        assert!(span.contains(14));
        assert!(!span.contains(15));
    }

    #[test]
    fn test_text_span_union() {
        let a = TextSpan::from_bounds(2, 4);
        let b = TextSpan::from_bounds(8, 9);
        assert_eq!(a.union(&b), TextSpan::from_bounds(2, 9));
        assert!(TextSpan::empty(3).is_empty());
    }

    #[test]
    fn test_line_map() {
        let text = "line1\nline2\nline3";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0); // newline char
        assert_eq!(map.line_of(6), 1); // start of line2
        assert_eq!(map.line_of(12), 2);

        let p = map.position_of(8);
        assert_eq!(p, Position::new(2, 3));
    }

    #[test]
    fn test_line_map_counts_chars_not_bytes() {
        let text = "令 x\n函数";
        let map = LineMap::new(text);
        assert_eq!(map.char_len(), 6);
        assert_eq!(map.position_of(2), Position::new(1, 3));
        assert_eq!(map.position_of(5), Position::new(2, 2));
        // '函' starts after "令 x\n" = 3 + 1 + 1 + 1 bytes
        assert_eq!(map.byte_offset(4), 6);
        assert_eq!(map.byte_range(TextSpan::new(4, 2)), 6..12);
        assert_eq!(map.byte_offset(99), text.len());
    }
}
