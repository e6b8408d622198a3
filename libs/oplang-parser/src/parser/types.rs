//! # Type Parsing
//!
//! ```text
//! op_type     = (primitive | ID) ("[" INT_LIT "]")?
//! return_type = "void" | op_type
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse `int`, `Shape`, `int[5]` or `Shape[3]`.
    pub(super) fn parse_op_type(&mut self) -> Result<CstNode, ParseError> {
        let kind = self.peek_kind();
        if !kind.is_primitive_type() && kind != TokenKind::Identifier {
            return Err(self.error_here("type"));
        }

        let mut children = vec![self.advance_leaf()];
        if let Some(open) = self.match_leaf(TokenKind::LBracket) {
            children.push(open);
            children.push(self.expect_int::<u64>()?);
            children.push(self.expect(TokenKind::RBracket)?);
        }
        Ok(CstNode::with_children(NodeKind::OpType, children))
    }

    /// Parse `void` or an op type.
    pub(super) fn parse_return_type(&mut self) -> Result<CstNode, ParseError> {
        let inner = match self.match_leaf(TokenKind::VoidType) {
            Some(void) => void,
            None => self.parse_op_type()?,
        };
        Ok(CstNode::with_children(NodeKind::ReturnType, vec![inner]))
    }

    /// Number of tokens a type would span at the current position, without
    /// consuming anything. `None` when no type starts here.
    pub(super) fn type_lookahead(&self) -> Option<usize> {
        let kind = self.peek_kind();
        if !kind.is_primitive_type() && kind != TokenKind::Identifier && kind != TokenKind::VoidType {
            return None;
        }
        let is_array = self.check_at(1, TokenKind::LBracket)
            && self.check_at(2, TokenKind::IntLiteral)
            && self.check_at(3, TokenKind::RBracket);
        Some(if is_array { 4 } else { 1 })
    }

    /// True when a local variable declaration starts here.
    ///
    /// `final` and primitive keywords always do. A class name only does when
    /// the type is followed by a name or `&`, which tells `Shape s;` apart
    /// from `shape.draw();` and `arr[0] := 1;`.
    pub(super) fn at_var_decl(&self) -> bool {
        match self.peek_kind() {
            TokenKind::Final => true,
            kind if kind.is_primitive_type() => true,
            TokenKind::Identifier => match self.type_lookahead() {
                Some(len) => {
                    self.check_at(len, TokenKind::Identifier) || self.check_at(len, TokenKind::Amp)
                }
                None => false,
            },
            _ => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
