//! # Parse Errors
//!
//! Lexical and syntax errors found while building the CST. The parser keeps
//! going after an error, so a single run can report several of them.
//!
//! ## Example
//!
//! ```rust
//! use oplang_parser::parse;
//!
//! let cst = parse("class A { int 5; }");
//! assert_eq!(
//!     cst.errors[0].to_string(),
//!     "unexpected token '5', expected identifier at 1:15"
//! );
//! ```

use crate::lexer::Token;
use crate::span::Span;
use std::fmt;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// What went wrong, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// `token` is not what the grammar allows here.
    ///
    /// Reports end of file rather than an empty token text when `token` is
    /// the EOF marker.
    ///
    /// ## Parameters
    ///
    /// - `token`: the offending token
    /// - `expected`: what the grammar needed, e.g. `"';'"` or `"statement"`
    pub fn unexpected(token: &Token, expected: &str) -> Self {
        let expected = expected.to_string();
        let kind = if token.is_eof() {
            ParseErrorKind::UnexpectedEof { expected }
        } else {
            ParseErrorKind::UnexpectedToken {
                found: token.text.clone(),
                expected,
            }
        };
        Self::new(kind, token.span)
    }

    /// Text already consumed at `span` turned out not to fit, like `final`
    /// on a method.
    pub fn misplaced(found: &str, expected: &str, span: Span) -> Self {
        let kind = ParseErrorKind::UnexpectedToken {
            found: found.to_string(),
            expected: expected.to_string(),
        };
        Self::new(kind, span)
    }

    /// Error for a lexer `Error` token.
    ///
    /// The lexer marks an unterminated string by keeping its opening quote
    /// as the first character of the token text.
    pub fn from_error_token(token: Token) -> Self {
        let kind = if token.text.starts_with('"') {
            ParseErrorKind::UnterminatedString
        } else {
            ParseErrorKind::InvalidCharacter { text: token.text }
        };
        Self::new(kind, token.span)
    }

    /// Integer literal `text` at `span` does not fit its 64-bit slot.
    pub fn out_of_range(text: &str, span: Span) -> Self {
        let kind = ParseErrorKind::IntegerOutOfRange {
            text: text.to_string(),
        };
        Self::new(kind, span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// PARSE ERROR KIND
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A token the grammar does not allow at this point.
    UnexpectedToken { found: String, expected: String },

    /// The source ended in the middle of a construct.
    UnexpectedEof { expected: String },

    /// Character that starts no token, like `@` or a lone `:`.
    InvalidCharacter { text: String },

    /// String literal without a closing quote on the same line.
    UnterminatedString,

    /// Integer literal too large for `i64`, or for `u64` as an array size.
    IntegerOutOfRange { text: String },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                write!(f, "unexpected token '{}', expected {}", found, expected)
            }
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of file, expected {}", expected)
            }
            Self::InvalidCharacter { text } => write!(f, "invalid character '{}'", text),
            Self::UnterminatedString => f.write_str("unterminated string literal"),
            Self::IntegerOutOfRange { text } => {
                write!(f, "integer literal '{}' is out of range", text)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
