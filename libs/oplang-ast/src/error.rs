//! # AST Errors
//!
//! [`StructuralError`] is the single failure of the tree-to-AST transform: the
//! input tree does not have the shape of the production being converted.
//! [`AstError`] adds syntax errors for callers that start from source text.

use crate::cst::ParseTree;
use crate::diagnostic::Diagnostic;
use config::constants::snippet;
use oplang_parser::Span;
use thiserror::Error;

/// The parse tree does not match the grammar the transform expects.
///
/// The first mismatch aborts the conversion; no partial AST is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed parse tree: expected {expected}, found {found} at {span}")]
pub struct StructuralError {
    /// What the production needed at this point.
    pub expected: String,
    /// What the tree held instead.
    pub found: String,
    /// Where in the source.
    pub span: Span,
}

impl StructuralError {
    pub fn new(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        Self {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    /// `node` is present but is not what the production needed.
    pub fn unexpected<T: ParseTree>(expected: &str, node: &T) -> Self {
        Self::new(expected, describe(node), node.span())
    }

    /// `parent` ran out of children before the production was complete.
    pub fn missing<T: ParseTree>(expected: &str, parent: &T) -> Self {
        Self::new(expected, format!("end of {:?}", parent.kind()), parent.span())
    }
}

/// Short human description of a node: quoted text for terminals, the node
/// kind otherwise.
pub fn describe<T: ParseTree>(node: &T) -> String {
    match node.text() {
        Some(text) if node.kind().is_token() => format!("'{}'", snippet(text)),
        _ => format!("{:?}", node.kind()),
    }
}

/// Failure of [`crate::parse_to_ast`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AstError {
    /// The source did not parse; the transform was not run.
    #[error("{} syntax error(s) in source", .0.len())]
    Syntax(Vec<Diagnostic>),

    /// The parse tree could not be converted.
    #[error(transparent)]
    Structural(#[from] StructuralError),
}
