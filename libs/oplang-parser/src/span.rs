//! # Source Spans
//!
//! Positions and ranges in OPLang source text, used by tokens, CST nodes and
//! error messages.
//!
//! ## Example
//!
//! ```rust
//! use oplang_parser::span::{Position, Span};
//!
//! let span = Span::new(Position::new(0, 0, 0), Position::new(5, 0, 5));
//! assert_eq!(span.len(), 5);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// POSITION
// =============================================================================

/// A point in the source text.
///
/// `line` and `column` are zero-based; `Display` prints them one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub byte: usize,
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based column, counted in characters.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// A half-open range `[start, end)` in the source text.
///
/// ## Example
///
/// ```rust
/// use oplang_parser::Span;
///
/// let span = Span::from_bytes(3, 7);
/// assert_eq!(span.start.byte, 3);
/// assert!(!span.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Span {
    /// Create a span between two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty span at the start of the source.
    pub const fn zero() -> Self {
        Self::new(Position::new(0, 0, 0), Position::new(0, 0, 0))
    }

    /// Span on the first line, from byte offsets.
    ///
    /// Columns are set equal to the byte offsets, which is exact for
    /// single-line ASCII input and good enough for hand-built test trees.
    pub const fn from_bytes(start: usize, end: usize) -> Self {
        Self::new(Position::new(start, 0, start), Position::new(end, 0, end))
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.byte.saturating_sub(self.start.byte)
    }

    /// True when the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start.byte >= self.end.byte
    }

    /// Smallest span covering both `self` and `other`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use oplang_parser::Span;
    ///
    /// let merged = Span::from_bytes(0, 4).merge(&Span::from_bytes(10, 12));
    /// assert_eq!((merged.start.byte, merged.end.byte), (0, 12));
    /// ```
    pub fn merge(&self, other: &Span) -> Span {
        let start = if self.start.byte <= other.start.byte { self.start } else { other.start };
        let end = if self.end.byte >= other.end.byte { self.end } else { other.end };
        Span::new(start, end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

/// Anything that knows where it came from in the source.
pub trait Spanned {
    /// Source range of this item.
    fn span(&self) -> Span;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        assert_eq!(Span::from_bytes(5, 15).len(), 10);
        assert_eq!(Span::from_bytes(15, 5).len(), 0);
    }

    #[test]
    fn test_span_is_empty() {
        assert!(Span::zero().is_empty());
        assert!(!Span::from_bytes(0, 1).is_empty());
    }

    #[test]
    fn test_span_merge_overlapping() {
        let merged = Span::from_bytes(0, 10).merge(&Span::from_bytes(5, 20));
        assert_eq!(merged.start.byte, 0);
        assert_eq!(merged.end.byte, 20);
    }

    #[test]
    fn test_position_display_is_one_based() {
        assert_eq!(Position::new(12, 2, 4).to_string(), "3:5");
        assert_eq!(Span::zero().to_string(), "1:1");
    }
}
