//! # OPLang Lexer
//!
//! Tokenizes OPLang source code into tokens.
//!
//! Comments are `## ...` to end of line and `/* ... */`. Malformed input never
//! stops the lexer: unknown characters and unterminated strings become
//! [`TokenKind::Error`] tokens that the parser turns into errors.
//!
//! ## Example
//!
//! ```rust
//! use oplang_parser::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("class A {}").tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Class);
//! assert_eq!(tokens[1].kind, TokenKind::Identifier);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::{Position, Span};

// =============================================================================
// LEXER
// =============================================================================

/// OPLang lexer.
///
/// Converts source text into a stream of tokens ending with
/// [`TokenKind::Eof`].
pub struct Lexer<'a> {
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    ///
    /// ## Parameters
    ///
    /// - `source`: OPLang source code
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens including EOF token.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use oplang_parser::lexer::{Lexer, TokenKind};
    ///
    /// let tokens = Lexer::new("x := 1;").tokenize();
    /// assert_eq!(tokens.len(), 5);
    /// assert!(tokens.last().map(|t| t.kind == TokenKind::Eof).unwrap_or(false));
    /// ```
    pub fn tokenize(mut self) -> Vec<Token> {
        while !self.cursor.is_eof() {
            self.skip_whitespace_and_comments();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token();
        }

        let eof_pos = self.cursor.position();
        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(eof_pos, eof_pos),
            String::new(),
        ));

        self.tokens
    }

    /// Skip whitespace, `## line` comments and `/* block */` comments.
    ///
    /// An unterminated block comment runs to EOF.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.cursor.eat_while(char::is_whitespace);
            if self.cursor.eat_str("##") {
                self.cursor.eat_while(|c| c != '\n');
            } else if self.cursor.eat_str("/*") {
                self.cursor.skip_past("*/");
            } else {
                break;
            }
        }
    }

    /// Scan a single token.
    fn scan_token(&mut self) {
        let start = self.cursor.position();
        let c = match self.cursor.bump() {
            Some(c) => c,
            None => return,
        };

        let kind = match c {
            // Single-character tokens
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '\\' => TokenKind::Backslash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '~' => TokenKind::Tilde,

            // One- or two-character tokens
            '=' => self.pick('=', TokenKind::EqEq, TokenKind::Eq),
            '!' => self.pick('=', TokenKind::BangEq, TokenKind::Bang),
            '<' => self.pick('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.pick('=', TokenKind::GtEq, TokenKind::Gt),
            '&' => self.pick('&', TokenKind::AmpAmp, TokenKind::Amp),
            '|' => self.pick('|', TokenKind::PipePipe, TokenKind::Error),
            ':' => self.pick('=', TokenKind::ColonEq, TokenKind::Error),

            '"' => return self.scan_string(start),
            '0'..='9' => return self.scan_number(start),
            c if is_ident_start(c) => return self.scan_identifier(start),

            _ => TokenKind::Error,
        };

        self.push(kind, start);
    }

    /// Consume `next` if present and return `matched`, else `single`.
    fn pick(&mut self, next: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.cursor.eat(next) {
            matched
        } else {
            single
        }
    }

    /// Push a token covering `start..current`.
    fn push(&mut self, kind: TokenKind, start: Position) {
        let end = self.cursor.position();
        let text = self.cursor.slice_from(start.byte).to_string();
        self.tokens.push(Token::new(kind, Span::new(start, end), text));
    }

    /// Scan a string literal (opening quote already consumed).
    ///
    /// Strings may not span lines. A newline or EOF before the closing quote
    /// yields an `Error` token whose text starts with `"`.
    fn scan_string(&mut self, start: Position) {
        loop {
            match self.cursor.first() {
                None | Some('\n') => return self.push(TokenKind::Error, start),
                Some('"') => {
                    self.cursor.bump();
                    return self.push(TokenKind::StringLiteral, start);
                }
                Some('\\') => {
                    self.cursor.bump();
                    if matches!(self.cursor.first(), None | Some('\n')) {
                        return self.push(TokenKind::Error, start);
                    }
                    self.cursor.bump();
                }
                Some(_) => {
                    self.cursor.bump();
                }
            }
        }
    }

    /// Scan an integer or float literal (first digit already consumed).
    ///
    /// Accepted forms: `42`, `007`, `1.5`, `1.`, `1e3`, `1.5E-2`. A `.` that
    /// is directly followed by an identifier character is left alone so that
    /// `arr[1].x`-style input still lexes as member access.
    fn scan_number(&mut self, start: Position) {
        let mut is_float = false;
        self.cursor.eat_while(|c| c.is_ascii_digit());

        if self.cursor.first() == Some('.') {
            let after = self.cursor.second();
            let member_access =
                matches!(after, Some(c) if is_ident_start(c) && c != 'e' && c != 'E');
            if !member_access {
                is_float = true;
                self.cursor.bump();
                self.cursor.eat_while(|c| c.is_ascii_digit());
            }
        }

        if matches!(self.cursor.first(), Some('e' | 'E')) {
            let digits_at = match self.cursor.second() {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.cursor.nth(digits_at).map_or(false, |c| c.is_ascii_digit()) {
                is_float = true;
                for _ in 0..digits_at {
                    self.cursor.bump();
                }
                self.cursor.eat_while(|c| c.is_ascii_digit());
            }
        }

        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        self.push(kind, start);
    }

    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self, start: Position) {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(start.byte);
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        self.push(kind, start);
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// =============================================================================
// TESTS
// =============================================================================
