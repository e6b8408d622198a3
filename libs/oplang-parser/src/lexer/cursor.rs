//! # Character Cursor
//!
//! Forward-only reader over the source text for the lexer. It keeps the
//! current [`Position`] up to date as characters are consumed.
//!
//! ## Example
//!
//! ```rust
//! use oplang_parser::lexer::Cursor;
//!
//! let mut cursor = Cursor::new("x := 1");
//! assert_eq!(cursor.bump(), Some('x'));
//! cursor.eat_while(char::is_whitespace);
//! assert!(cursor.eat_str(":="));
//! assert_eq!(cursor.position().column, 4);
//! ```

use crate::span::Position;

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with position tracking.
///
/// Columns count characters, not bytes; a newline starts a new line at
/// column 0.
pub struct Cursor<'a> {
    source: &'a str,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: Position::default(),
        }
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos.byte >= self.source.len()
    }

    /// Unread input.
    fn rest(&self) -> &'a str {
        &self.source[self.pos.byte..]
    }

    /// Next character, not consumed.
    pub fn first(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character after [`Cursor::first`].
    pub fn second(&self) -> Option<char> {
        self.nth(1)
    }

    /// Character `n` places ahead; `nth(0)` is [`Cursor::first`].
    ///
    /// ## Example
    ///
    /// ```rust
    /// use oplang_parser::lexer::Cursor;
    ///
    /// let cursor = Cursor::new("e-5");
    /// assert_eq!(cursor.nth(2), Some('5'));
    /// assert_eq!(cursor.nth(3), None);
    /// ```
    pub fn nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Consume one character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.first()?;
        self.pos.byte += c.len_utf8();
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 0;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    /// Consume `expected` if it is next.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.first() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `expected` if the input continues with it.
    pub fn eat_str(&mut self, expected: &str) -> bool {
        if !self.rest().starts_with(expected) {
            return false;
        }
        for _ in expected.chars() {
            self.bump();
        }
        true
    }

    /// Consume characters while `predicate` holds.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.first().map_or(false, &predicate) {
            self.bump();
        }
    }

    /// Consume up to and including the next `terminator`, or to EOF when
    /// there is none.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use oplang_parser::lexer::Cursor;
    ///
    /// let mut cursor = Cursor::new("note */ class");
    /// cursor.skip_past("*/");
    /// assert_eq!(cursor.first(), Some(' '));
    /// ```
    pub fn skip_past(&mut self, terminator: &str) {
        while !self.is_eof() && !self.eat_str(terminator) {
            self.bump();
        }
    }

    /// Source text from byte offset `start` up to the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.pos.byte]
    }
}

// =============================================================================
// TESTS
// =============================================================================
