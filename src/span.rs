//! Byte spans and position conversion.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A half-open range `[from, to)` of UTF-8 byte offsets into the source text.
///
/// Every token, document node, and diagnostic carries a span. Spans produced by this crate
/// always fall on char boundaries of the text they were computed from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    #[inline]
    pub const fn new(from: usize, to: usize) -> Self {
        debug_assert!(from <= to);
        Self { from, to }
    }

    /// A zero-width span at `offset`.
    #[inline]
    pub const fn empty(offset: usize) -> Self {
        Self {
            from: offset,
            to: offset,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.to - self.from
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Whether `offset` lies within the span. The end offset is included, so that a cursor
    /// placed directly after a word still counts as touching it.
    #[inline]
    pub const fn touches(&self, offset: usize) -> bool {
        self.from <= offset && offset <= self.to
    }

    /// The smallest span covering both `self` and `other`.
    #[inline]
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.from.min(other.from), self.to.max(other.to))
    }

    /// The text covered by this span.
    #[inline]
    pub fn slice<'r>(&self, source: &'r str) -> &'r str {
        &source[self.from..self.to]
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.from..span.to
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

/// Converts byte offsets into line/column positions and UTF-16 offsets.
///
/// Editors built on UTF-16 strings address text by code units; use
/// [`LineIndex::utf16_offset`] to translate spans for them.
#[derive(Debug, Clone)]
pub struct LineIndex<'r> {
    source: &'r str,
    line_starts: Vec<usize>,
}

impl<'r> LineIndex<'r> {
    pub fn new(source: &'r str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', source.as_bytes()).map(|idx| idx + 1));
        Self {
            source,
            line_starts,
        }
    }

    /// The 1-based line and column of `offset`. Columns count chars, not bytes.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let column = self.source[start..offset].chars().count();
        (line + 1, column + 1)
    }

    /// The number of UTF-16 code units preceding `offset`.
    pub fn utf16_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.source.len());
        self.source[..offset].chars().map(char::len_utf16).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span() {
        let span = Span::new(2, 5);
        assert_eq!(span.len(), 3);
        assert!(span.touches(2));
        assert!(span.touches(5));
        assert!(!span.touches(6));
        assert_eq!(span.slice("abcdefg"), "cde");
        assert_eq!(span.cover(Span::new(4, 9)), Span::new(2, 9));
        assert!(Span::empty(3).is_empty());
    }

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("ab\ncd\n\nü!");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(1), (1, 2));
        assert_eq!(index.line_col(3), (2, 1));
        assert_eq!(index.line_col(6), (3, 1));
        assert_eq!(index.line_col(7), (4, 1));
        // 'ü' is two bytes wide
        assert_eq!(index.line_col(9), (4, 2));
    }

    #[test]
    fn test_utf16_offset() {
        let index = LineIndex::new("a😀b");
        assert_eq!(index.utf16_offset(1), 1);
        assert_eq!(index.utf16_offset(5), 3);
        assert_eq!(index.utf16_offset(6), 4);
    }
}
