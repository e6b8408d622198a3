//! # Tokens
//!
//! Token types for the OPLang lexer.
//!
//! ## Example
//!
//! ```rust
//! use oplang_parser::lexer::{Token, TokenKind};
//! use oplang_parser::Span;
//!
//! let token = Token::new(TokenKind::IntLiteral, Span::from_bytes(0, 2), "10".to_string());
//! assert_eq!(token.kind, TokenKind::IntLiteral);
//! ```

use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Source span.
    pub span: Span,
    /// Token text, exactly as written in the source.
    pub text: String,
}

impl Token {
    /// Create a new token.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Token type
    /// - `span`: Source location
    /// - `text`: Token text
    pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
        Self { kind, span, text }
    }

    /// Check if token is EOF.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Check if token is an error.
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens.
///
/// Serialized in snake_case so that CST leaves read naturally in JSON
/// (`{"token": "colon_eq"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // Literals
    /// Integer literal like `42` or `002`
    IntLiteral,
    /// Float literal like `3.14`, `1.` or `2e10`
    FloatLiteral,
    /// String literal like `"hello"` (text keeps the quotes)
    StringLiteral,
    /// `true`
    True,
    /// `false`
    False,
    /// `nil`
    Nil,

    // Identifiers
    /// Identifier like `Shape` or `count`
    Identifier,

    // Type keywords
    /// `int`
    IntType,
    /// `float`
    FloatType,
    /// `boolean`
    BooleanType,
    /// `string`
    StringType,
    /// `void`
    VoidType,

    // Keywords
    /// `break`
    Break,
    /// `class`
    Class,
    /// `continue`
    Continue,
    /// `do`
    Do,
    /// `downto`
    Downto,
    /// `else`
    Else,
    /// `extends`
    Extends,
    /// `final`
    Final,
    /// `for`
    For,
    /// `if`
    If,
    /// `new`
    New,
    /// `return`
    Return,
    /// `static`
    Static,
    /// `then`
    Then,
    /// `this`
    This,
    /// `to`
    To,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `\` (integer division)
    Backslash,
    /// `%`
    Percent,
    /// `^` (string concatenation)
    Caret,
    /// `!`
    Bang,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `:=`
    ColonEq,
    /// `=`
    Eq,
    /// `&` (reference marker)
    Amp,
    /// `~` (destructor marker)
    Tilde,

    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,

    // Meta
    /// End of file
    Eof,
    /// Error token
    Error,
}

impl TokenKind {
    /// Look up the keyword for an identifier-shaped word.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use oplang_parser::lexer::TokenKind;
    ///
    /// assert_eq!(TokenKind::keyword("downto"), Some(TokenKind::Downto));
    /// assert_eq!(TokenKind::keyword("Shape"), None);
    /// ```
    pub fn keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "boolean" => Self::BooleanType,
            "break" => Self::Break,
            "class" => Self::Class,
            "continue" => Self::Continue,
            "do" => Self::Do,
            "downto" => Self::Downto,
            "else" => Self::Else,
            "extends" => Self::Extends,
            "false" => Self::False,
            "final" => Self::Final,
            "float" => Self::FloatType,
            "for" => Self::For,
            "if" => Self::If,
            "int" => Self::IntType,
            "new" => Self::New,
            "nil" => Self::Nil,
            "return" => Self::Return,
            "static" => Self::Static,
            "string" => Self::StringType,
            "then" => Self::Then,
            "this" => Self::This,
            "to" => Self::To,
            "true" => Self::True,
            "void" => Self::VoidType,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this is a literal token.
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::IntLiteral
                | Self::FloatLiteral
                | Self::StringLiteral
                | Self::True
                | Self::False
                | Self::Nil
        )
    }

    /// Check if this is one of the primitive type keywords usable in a
    /// declaration (`void` is excluded; it only appears as a return type).
    pub const fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            Self::IntType | Self::FloatType | Self::BooleanType | Self::StringType
        )
    }

    /// Check if this token can stand alone as an expression leaf.
    pub const fn is_expression_leaf(&self) -> bool {
        self.is_literal() || matches!(self, Self::Identifier | Self::This)
    }

    /// Get display string for error messages.
    pub const fn display(&self) -> &'static str {
        match self {
            Self::IntLiteral => "integer literal",
            Self::FloatLiteral => "float literal",
            Self::StringLiteral => "string literal",
            Self::True => "true",
            Self::False => "false",
            Self::Nil => "nil",
            Self::Identifier => "identifier",
            Self::IntType => "int",
            Self::FloatType => "float",
            Self::BooleanType => "boolean",
            Self::StringType => "string",
            Self::VoidType => "void",
            Self::Break => "break",
            Self::Class => "class",
            Self::Continue => "continue",
            Self::Do => "do",
            Self::Downto => "downto",
            Self::Else => "else",
            Self::Extends => "extends",
            Self::Final => "final",
            Self::For => "for",
            Self::If => "if",
            Self::New => "new",
            Self::Return => "return",
            Self::Static => "static",
            Self::Then => "then",
            Self::This => "this",
            Self::To => "to",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Backslash => "\\",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Bang => "!",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::EqEq => "==",
            Self::BangEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::ColonEq => ":=",
            Self::Eq => "=",
            Self::Amp => "&",
            Self::Tilde => "~",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Eof => "end of file",
            Self::Error => "error",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
