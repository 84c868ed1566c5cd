//! Span and byte offset types for source positions.

use text_size::{TextRange, TextSize};

/// A byte offset into a source string.
pub type ByteOffset = TextSize;

/// A span representing a range in source code.
///
/// Spans are half-open intervals `[start, end)` represented as byte offsets.
/// Nodes synthesized by a transform have no span at all, which is how the
/// transforms tell hand-written nodes from generated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The start byte offset (inclusive).
    pub start: ByteOffset,
    /// The end byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[inline]
    pub fn new(start: impl Into<ByteOffset>, end: impl Into<ByteOffset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Returns true if this span is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns a span covering both this span and another.
    #[inline]
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: std::cmp::min(self.start, other.start),
            end: std::cmp::max(self.end, other.end),
        }
    }
}

impl From<TextRange> for Span {
    fn from(range: TextRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(0u32, 10u32);
        assert_eq!(span.start, TextSize::from(0));
        assert_eq!(span.end, TextSize::from(10));
        assert!(!span.is_empty());
    }

    #[test]
    fn test_span_cover() {
        let a = Span::new(5u32, 10u32);
        let b = Span::new(8u32, 20u32);
        let covered = a.cover(b);
        assert_eq!(covered.start, TextSize::from(5));
        assert_eq!(covered.end, TextSize::from(20));
    }

    #[test]
    fn test_span_from_range() {
        let span = Span::from(TextRange::new(3.into(), 3.into()));
        assert!(span.is_empty());
    }
}
