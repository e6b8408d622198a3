//! # OPLang Parser
//!
//! Recursive descent parser for OPLang.
//! Produces a Concrete Syntax Tree (CST).
//!
//! ## Module Structure
//!
//! - `declarations` - classes, members, parameter lists
//! - `types` - `int`, `Shape`, `int[5]`, return types
//! - `statements` - blocks, local declarations, control flow
//! - `expressions` - operators by precedence, primaries
//! - `postfix` - `.name`, `.name(args)`, `[index]` chains and assignment targets
//!
//! ## Example
//!
//! ```rust
//! use oplang_parser::parser::Parser;
//! use oplang_parser::lexer::Lexer;
//!
//! let tokens = Lexer::new("class A {}").tokenize();
//! let cst = Parser::new(tokens).parse();
//! assert!(cst.is_ok());
//! ```

mod declarations;
mod expressions;
mod postfix;
mod statements;
mod types;

use crate::cst::{Cst, CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::span::Span;

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for OPLang.
pub struct Parser {
    /// Token stream, lexer error tokens removed, always ending in EOF.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Collected parse errors.
    errors: Vec<ParseError>,
}

impl Parser {
    /// Create a new parser.
    ///
    /// Lexer `Error` tokens are reported immediately and dropped from the
    /// stream, so the grammar rules never see them.
    ///
    /// ## Parameters
    ///
    /// - `tokens`: Tokens from lexer
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut errors = Vec::new();
        let mut kept = Vec::with_capacity(tokens.len());
        for token in tokens {
            if token.is_error() {
                errors.push(ParseError::from_error_token(token));
            } else {
                kept.push(token);
            }
        }
        if !kept.last().map_or(false, Token::is_eof) {
            let end = kept.last().map(|t| t.span.end).unwrap_or_default();
            kept.push(Token::new(TokenKind::Eof, Span::new(end, end), String::new()));
        }

        Self {
            tokens: kept,
            current: 0,
            errors,
        }
    }

    /// Parse the entire source into a CST.
    ///
    /// A program is one or more class declarations. After an error the parser
    /// skips to the next `class` keyword and carries on, so every broken class
    /// in a file is reported.
    ///
    /// ## Returns
    ///
    /// CST with root node and any parse errors
    pub fn parse(&mut self) -> Cst {
        let mut children = Vec::new();

        if self.is_at_end() {
            self.errors.push(self.error_here("class declaration"));
        }

        while !self.is_at_end() {
            match self.parse_class_decl() {
                Ok(node) => children.push(node),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        let root = CstNode::with_children(NodeKind::Program, children);
        Cst::new(root, std::mem::take(&mut self.errors))
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Get current token.
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Get the token `offset` positions ahead, clamped to EOF.
    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.current + offset).min(last)]
    }

    /// Get current token kind.
    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Check if current token matches kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Check if the token `offset` ahead matches kind.
    fn check_at(&self, offset: usize, kind: TokenKind) -> bool {
        self.peek_at(offset).kind == kind
    }

    /// Check if at end of file.
    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Consume the current token and return it as a CST leaf.
    fn advance_leaf(&mut self) -> CstNode {
        let leaf = CstNode::token(self.peek());
        if !self.is_at_end() {
            self.current += 1;
        }
        leaf
    }

    /// Consume token if it matches expected kind.
    ///
    /// ## Returns
    ///
    /// Ok with the consumed token as a leaf, or Err with parse error
    fn expect(&mut self, kind: TokenKind) -> Result<CstNode, ParseError> {
        if self.check(kind) {
            Ok(self.advance_leaf())
        } else {
            Err(self.error_here(&format!("'{}'", kind.display())))
        }
    }

    /// Consume an integer literal whose value fits `N`.
    ///
    /// The lexer accepts digit runs of any length; the range is checked here
    /// so an oversized literal is reported as a syntax error.
    fn expect_int<N: std::str::FromStr>(&mut self) -> Result<CstNode, ParseError> {
        let token = self.peek();
        if token.kind == TokenKind::IntLiteral && token.text.parse::<N>().is_err() {
            return Err(ParseError::out_of_range(&token.text, token.span));
        }
        self.expect(TokenKind::IntLiteral)
    }

    /// Consume the token as a leaf if it matches.
    fn match_leaf(&mut self, kind: TokenKind) -> Option<CstNode> {
        if self.check(kind) {
            Some(self.advance_leaf())
        } else {
            None
        }
    }

    /// Error describing the current token as unexpected.
    fn error_here(&self, expected: &str) -> ParseError {
        ParseError::unexpected(self.peek(), expected)
    }

    // =========================================================================
    // ERROR RECOVERY
    // =========================================================================

    /// Synchronize parser state after an error.
    ///
    /// Skips at least one token, then stops at the next `class` keyword.
    fn synchronize(&mut self) {
        self.advance_leaf();
        while !self.is_at_end() && !self.check(TokenKind::Class) {
            self.advance_leaf();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::lexer::Lexer;

    pub(super) fn parse(source: &str) -> Cst {
        Parser::new(Lexer::new(source).tokenize()).parse()
    }

    /// Parse `body` as the statements of a method and return the block node.
    pub(super) fn parse_block(body: &str) -> CstNode {
        let source = format!("class T {{ void m() {{ {} }} }}", body);
        let cst = parse(&source);
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        let method = &cst.root.children[0].children[3];
        assert_eq!(method.kind, NodeKind::MethodDecl);
        method.children.last().cloned().unwrap_or_else(|| panic!("no block"))
    }

    /// Direct children of `node` with the given kind.
    pub(super) fn children_of(node: &CstNode, kind: NodeKind) -> Vec<&CstNode> {
        node.children.iter().filter(|c| c.kind == kind).collect()
    }

    /// Parse `expr` as the value of `x := expr;` and return the value node.
    pub(super) fn parse_expr(expr: &str) -> CstNode {
        let block = parse_block(&format!("x := {};", expr));
        let assign = &block.children[1];
        assert_eq!(assign.kind, NodeKind::AssignStmt);
        assign.children[2].clone()
    }

    #[test]
    fn test_parse_empty_is_error() {
        let cst = parse("");
        assert_eq!(cst.root.kind, NodeKind::Program);
        assert!(cst.root.children.is_empty());
        assert!(matches!(
            cst.errors[0].kind,
            ParseErrorKind::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn test_parse_simple_class() {
        let cst = parse("class A { int x; }");
        assert!(cst.errors.is_empty(), "Errors: {:?}", cst.errors);
        assert_eq!(cst.root.children.len(), 1);
        assert_eq!(cst.root.children[0].kind, NodeKind::ClassDecl);
    }

    #[test]
    fn test_parse_multiple_classes() {
        let cst = parse("class A {} class B extends A {}");
        assert!(cst.errors.is_empty(), "Errors: {:?}", cst.errors);
        assert_eq!(cst.root.children.len(), 2);
    }

    #[test]
    fn test_parse_recovers_at_next_class() {
        let cst = parse("class A { int ; } class B { int y; }");
        assert_eq!(cst.errors.len(), 1);
        assert_eq!(cst.root.children.len(), 1);
        assert!(cst.root.children[0].children[1].is_token(TokenKind::Identifier));
        assert_eq!(cst.root.children[0].children[1].text_or_empty(), "B");
    }

    #[test]
    fn test_lexer_errors_are_reported() {
        let cst = parse("class A { int @x; string s := \"open\n; }");
        let kinds: Vec<_> = cst.errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ParseErrorKind::InvalidCharacter { text: "@".to_string() }));
        assert!(kinds.contains(&ParseErrorKind::UnterminatedString));
    }

    #[test]
    fn test_error_position_is_reported() {
        let cst = parse("class A {\n  int 5;\n}");
        assert_eq!(cst.errors.len(), 1);
        assert_eq!(cst.errors[0].span.start.line, 1);
        assert!(cst.errors[0].to_string().contains("unexpected token '5'"));
    }
}
