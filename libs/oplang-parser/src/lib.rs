//! # OPLang Parser (Pure Rust)
//!
//! A pure Rust lexer and recursive descent parser for OPLang source code.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → CST
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oplang_parser::parse;
//!
//! let result = parse("class A { int x; }");
//! assert!(result.errors.is_empty());
//! ```
//!
//! ## Pipeline Integration
//!
//! This crate is the first layer of the OPLang front end:
//!
//! ```text
//! oplang-parser → oplang-ast
//! ```

pub mod cst;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

// Re-export public API
pub use cst::{Cst, CstNode, NodeKind};
pub use error::{ParseError, ParseErrorKind};
pub use lexer::TokenKind;
pub use span::{Position, Span, Spanned};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse OPLang source code into a Concrete Syntax Tree.
///
/// This is the main entry point for the parser.
///
/// ## Parameters
///
/// - `source`: OPLang source code string
///
/// ## Returns
///
/// `Cst` containing the root node and any parse errors
///
/// ## Example
///
/// ```rust
/// use oplang_parser::{parse, NodeKind};
///
/// let cst = parse("class A {}");
/// assert!(cst.is_ok());
/// assert_eq!(cst.root.kind, NodeKind::Program);
/// ```
///
/// ## Error Handling
///
/// The parser recovers at the next `class` keyword and continues.
/// Errors are collected in `cst.errors`. Check `cst.is_ok()` for success.
///
/// ```rust
/// use oplang_parser::parse;
///
/// let cst = parse("class A { int ; }"); // Syntax error
/// assert!(!cst.is_ok());
/// ```
pub fn parse(source: &str) -> Cst {
    let tokens = lexer::Lexer::new(source).tokenize();
    parser::Parser::new(tokens).parse()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPES: &str = r#"
        class Shape {
            static final int numOfShape := 0;
            final int immuAttribute := 0;
            float length, width;
            static int getNumOfShape() { return numOfShape; }
        }

        class Rectangle extends Shape {
            Rectangle(float length, width) {
                this.length := length;
                this.width := width;
            }
            ~Rectangle() {}
            float getArea() { return this.length * this.width; }
        }

        class Main {
            static void main() {
                Rectangle r := new Rectangle(5.0, 3.0);
                io.writeFloatLn(r.getArea());  ## 15.0
            }
        }
    "#;

    /// Test parsing a complete multi-class program.
    #[test]
    fn test_parse_program() {
        let cst = parse(SHAPES);
        assert!(cst.is_ok(), "Expected no errors, got: {:?}", cst.errors);
        assert_eq!(cst.root.kind, NodeKind::Program);
        assert_eq!(cst.root.children.len(), 3);
    }

    /// Test parsing a class with every kind of member.
    #[test]
    fn test_parse_all_member_kinds() {
        let cst = parse(SHAPES);
        let rectangle = &cst.root.children[1];
        let kinds: Vec<_> = rectangle
            .children
            .iter()
            .filter(|c| !c.kind.is_token())
            .map(|c| c.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::ConstructorDecl, NodeKind::DestructorDecl, NodeKind::MethodDecl]
        );
    }

    /// Test the CST survives a JSON round trip.
    #[test]
    fn test_cst_serializes() {
        let cst = parse("class A { int x := 1; }");
        let json = serde_json::to_string(&cst.root).unwrap_or_default();
        assert!(json.contains(r#""kind":{"token":"int_literal"}"#));
        let back: CstNode = serde_json::from_str(&json).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(back, cst.root);
    }

    /// Test error recovery.
    #[test]
    fn test_error_recovery() {
        let cst = parse("class A { int x } class B { }");
        assert_eq!(cst.errors.len(), 1);
        assert_eq!(cst.root.children.len(), 1);
    }

    /// Test that comments anywhere are ignored.
    #[test]
    fn test_comments() {
        let cst = parse("## leading\nclass /* inline */ A { ## trailing\n }");
        assert!(cst.is_ok(), "Expected no errors, got: {:?}", cst.errors);
    }
}
