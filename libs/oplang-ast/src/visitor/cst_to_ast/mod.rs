//! # Parse Tree to AST Transformation
//!
//! Converts a complete OPLang parse tree into a [`Program`].
//!
//! Each production converts mechanically into its AST node. The interesting
//! parts live in `postfix` (chain flattening and assignment targets) and in
//! `statements` (block partitioning).
//!
//! ## Example
//!
//! ```rust
//! use oplang_ast::visitor::cst_to_ast::transform_program;
//!
//! let cst = oplang_parser::parse("class A { int x; }");
//! let program = transform_program(&cst.root).unwrap();
//! assert_eq!(program.classes[0].name, "A");
//! ```

mod declarations;
mod expressions;
mod literals;
mod postfix;
mod statements;
mod types;

use crate::ast::Program;
use crate::cst::{ChildCursor, ParseTree};
use crate::error::StructuralError;
use oplang_parser::NodeKind;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Transform a `Program` node.
///
/// ## Parameters
///
/// - `root`: parse tree root; must be a `Program` node
///
/// ## Returns
///
/// The program with its classes in source order, or the first structural
/// mismatch found.
pub fn transform_program<T: ParseTree>(root: &T) -> Result<Program, StructuralError> {
    if root.kind() != NodeKind::Program {
        return Err(StructuralError::unexpected("Program", root));
    }

    let mut cursor = ChildCursor::new(root);
    let mut classes = Vec::new();
    while !cursor.is_done() {
        let class = cursor.expect_node(NodeKind::ClassDecl)?;
        classes.push(declarations::transform_class(class)?);
    }
    Ok(Program { classes })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use oplang_parser::{parse, CstNode, Span};

    #[test]
    fn test_transform_empty_program_node() {
        let root = CstNode::new(NodeKind::Program, Span::zero());
        assert_eq!(transform_program(&root), Ok(Program::default()));
    }

    #[test]
    fn test_transform_two_classes() {
        let cst = parse("class A {} class B extends A {}");
        let program = transform_program(&cst.root).unwrap();
        assert_eq!(program.classes.len(), 2);
        assert_eq!(program.classes[1].superclass.as_deref(), Some("A"));
    }

    #[test]
    fn test_rejects_non_program_root() {
        let root = CstNode::new(NodeKind::Block, Span::zero());
        let err = transform_program(&root).unwrap_err();
        assert_eq!(err.expected, "Program");
        assert_eq!(err.found, "Block");
    }

    #[test]
    fn test_rejects_stray_root_child() {
        let mut root = CstNode::new(NodeKind::Program, Span::zero());
        root.add_child(CstNode::new(NodeKind::Block, Span::zero()));
        let err = transform_program(&root).unwrap_err();
        assert_eq!(err.expected, "ClassDecl");
    }
}
