//! # OPLang AST Crate
//!
//! Converts an OPLang CST (Concrete Syntax Tree) into a typed AST (Abstract
//! Syntax Tree). Postfix chains come out flat and assignment targets are
//! classified as plain names or postfix targets.
//!
//! ## Architecture
//!
//! ```text
//! OPLang Source → oplang-parser (CST) → oplang-ast (AST)
//! ```
//!
//! A CST produced elsewhere can be handed over as JSON: `oplang_parser::CstNode`
//! implements serde, and [`generate`] accepts any [`ParseTree`].
//!
//! ## Usage
//!
//! ```rust
//! use oplang_ast::parse_to_ast;
//!
//! let program = parse_to_ast("class T { void m() { arr[0] := 42; } }").unwrap();
//! assert_eq!(program.classes[0].name, "T");
//! ```
//!
//! ## Design Principles
//!
//! - **Typed AST**: all nodes are strongly typed Rust enums/structs
//! - **Flat Chains**: a `PostfixExpression` never has a chained base
//! - **No Semantics**: pure syntax transformation, no name or type checking
//! - **Fail Fast**: the first malformed node aborts with a `StructuralError`

pub mod ast;
pub mod batch;
pub mod cst;
pub mod diagnostic;
pub mod error;
mod printer;
pub mod visitor;

// Re-exports for convenience
pub use ast::*;
pub use cst::ParseTree;
pub use diagnostic::Diagnostic;
pub use error::{AstError, StructuralError};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Build the AST for a parse tree.
///
/// ## Parameters
///
/// - `root`: `Program` node of a complete parse tree
///
/// ## Returns
///
/// `Result<Program, StructuralError>` - the first structural mismatch aborts
/// the conversion
///
/// ## Example
///
/// ```rust
/// use oplang_ast::generate;
///
/// let cst = oplang_parser::parse("class T { int x; }");
/// let program = generate(&cst.root).unwrap();
/// assert_eq!(
///     program.to_string(),
///     "Program([ClassDecl(T, [AttributeDecl(PrimitiveType(int), [Attribute(x)])])])"
/// );
/// ```
pub fn generate<T: ParseTree>(root: &T) -> Result<Program, StructuralError> {
    visitor::cst_to_ast::transform_program(root)
}

/// Parse source text and build its AST.
///
/// Syntax errors are reported as diagnostics and stop before the transform
/// runs.
///
/// ## Example
///
/// ```rust
/// use oplang_ast::{parse_to_ast, AstError};
///
/// let err = parse_to_ast("class T { int ; }").unwrap_err();
/// assert!(matches!(err, AstError::Syntax(diagnostics) if diagnostics.len() == 1));
/// ```
pub fn parse_to_ast(source: &str) -> Result<Program, AstError> {
    let cst = oplang_parser::parse(source);
    if !cst.is_ok() {
        let diagnostics = cst.errors.iter().map(Diagnostic::from).collect();
        return Err(AstError::Syntax(diagnostics));
    }
    Ok(generate(&cst.root)?)
}
