//! # Parse-Tree View
//!
//! The transform reads its input only through [`ParseTree`], a narrow view of
//! a concrete syntax tree: a tag, ordered children, the text of terminals and
//! a source span. [`oplang_parser::CstNode`] implements it, so trees from the
//! bundled parser and trees deserialized from JSON convert the same way.
//!
//! [`ChildCursor`] walks a node's children in order for the productions whose
//! shape is fixed.

use crate::error::StructuralError;
use oplang_parser::{CstNode, NodeKind, Span, TokenKind};

// =============================================================================
// PARSE TREE
// =============================================================================

/// Read-only view of a concrete syntax tree node.
pub trait ParseTree: Sized {
    /// Production or terminal tag.
    fn kind(&self) -> NodeKind;

    /// Ordered children; empty for terminals.
    fn children(&self) -> &[Self];

    /// Source text of a terminal.
    fn text(&self) -> Option<&str>;

    /// Source range, used in error messages.
    fn span(&self) -> Span;

    /// True when this is a terminal of the given token kind.
    fn is_token(&self, kind: TokenKind) -> bool {
        self.kind() == NodeKind::Token(kind)
    }
}

impl ParseTree for CstNode {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// CHILD CURSOR
// =============================================================================

/// In-order reader over the children of one node.
///
/// Every `expect_*` call reports a [`StructuralError`] naming what was
/// expected and what was found instead.
pub struct ChildCursor<'a, T: ParseTree> {
    parent: &'a T,
    children: &'a [T],
    pos: usize,
}

impl<'a, T: ParseTree> ChildCursor<'a, T> {
    pub fn new(parent: &'a T) -> Self {
        Self {
            parent,
            children: parent.children(),
            pos: 0,
        }
    }

    /// Next child without consuming it.
    pub fn peek(&self) -> Option<&'a T> {
        self.children.get(self.pos)
    }

    /// True when the next child is the given token.
    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek().map_or(false, |c| c.is_token(kind))
    }

    /// True when every child has been consumed.
    pub fn is_done(&self) -> bool {
        self.pos >= self.children.len()
    }

    /// Consume the next child, whatever it is.
    pub fn next_any(&mut self, expected: &str) -> Result<&'a T, StructuralError> {
        match self.peek() {
            Some(child) => {
                self.pos += 1;
                Ok(child)
            }
            None => Err(self.mismatch(expected)),
        }
    }

    /// Consume the next child if it is the given token.
    pub fn eat(&mut self, kind: TokenKind) -> Option<&'a T> {
        if self.at(kind) {
            self.pos += 1;
            self.children.get(self.pos - 1)
        } else {
            None
        }
    }

    /// Consume the next child if it has the given node kind.
    pub fn eat_node(&mut self, kind: NodeKind) -> Option<&'a T> {
        match self.peek() {
            Some(child) if child.kind() == kind => {
                self.pos += 1;
                Some(child)
            }
            _ => None,
        }
    }

    /// Consume the given token or fail.
    pub fn expect_token(&mut self, kind: TokenKind) -> Result<&'a T, StructuralError> {
        self.eat(kind)
            .ok_or_else(|| self.mismatch(&format!("'{}'", kind.display())))
    }

    /// Consume a child of the given node kind or fail.
    pub fn expect_node(&mut self, kind: NodeKind) -> Result<&'a T, StructuralError> {
        self.eat_node(kind)
            .ok_or_else(|| self.mismatch(&format!("{:?}", kind)))
    }

    /// Consume an identifier token and return its text.
    pub fn expect_ident(&mut self) -> Result<String, StructuralError> {
        match self.eat(TokenKind::Identifier) {
            Some(node) => Ok(node.text().unwrap_or_default().to_string()),
            None => Err(self.mismatch("identifier")),
        }
    }

    /// Fail if any child is left over.
    pub fn finish(&self) -> Result<(), StructuralError> {
        if self.is_done() {
            Ok(())
        } else {
            Err(self.mismatch(&format!("end of {:?}", self.parent.kind())))
        }
    }

    /// Error describing the next child (or its absence) as unexpected.
    pub fn mismatch(&self, expected: &str) -> StructuralError {
        match self.peek() {
            Some(child) => StructuralError::unexpected(expected, child),
            None => StructuralError::missing(expected, self.parent),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: TokenKind, text: &str) -> CstNode {
        CstNode::with_text(NodeKind::Token(kind), Span::zero(), text)
    }

    fn break_stmt() -> CstNode {
        CstNode::with_children(
            NodeKind::BreakStmt,
            vec![leaf(TokenKind::Break, "break"), leaf(TokenKind::Semicolon, ";")],
        )
    }

    #[test]
    fn test_cst_node_view() {
        let node = break_stmt();
        assert_eq!(ParseTree::kind(&node), NodeKind::BreakStmt);
        assert_eq!(ParseTree::children(&node).len(), 2);
        assert!(ParseTree::text(&node).is_none());
        assert!(node.children[0].is_token(TokenKind::Break));
    }

    #[test]
    fn test_cursor_walks_children() {
        let node = break_stmt();
        let mut c = ChildCursor::new(&node);
        assert!(c.expect_token(TokenKind::Break).is_ok());
        assert!(c.eat(TokenKind::Comma).is_none());
        assert!(c.expect_token(TokenKind::Semicolon).is_ok());
        assert!(c.finish().is_ok());
    }

    #[test]
    fn test_cursor_reports_missing_child() {
        let node = CstNode::with_children(NodeKind::BreakStmt, vec![leaf(TokenKind::Break, "break")]);
        let mut c = ChildCursor::new(&node);
        let _ = c.next_any("keyword");
        let err = c.expect_token(TokenKind::Semicolon).err().unwrap_or_else(|| panic!("no error"));
        assert_eq!(err.expected, "';'");
        assert_eq!(err.found, "end of BreakStmt");
    }

    #[test]
    fn test_cursor_reports_leftover_child() {
        let node = break_stmt();
        let mut c = ChildCursor::new(&node);
        let _ = c.next_any("keyword");
        let err = c.finish().err().unwrap_or_else(|| panic!("no error"));
        assert_eq!(err.found, "';'");
    }

    #[test]
    fn test_expect_ident_returns_text() {
        let node = CstNode::with_children(NodeKind::Lhs, vec![leaf(TokenKind::Identifier, "total")]);
        let mut c = ChildCursor::new(&node);
        assert_eq!(c.expect_ident().ok().as_deref(), Some("total"));
    }
}
