//! # Statement Parsing
//!
//! Parses blocks, local declarations and statements.
//!
//! ## Grammar
//!
//! ```text
//! block      = "{" (var_decl | statement)* "}"
//! var_decl   = "final"? op_type "&"? var_item ("," var_item)* ";"
//! var_item   = "&"? ID ((":=" | "=") expression)?
//! statement  = block | if_stmt | for_stmt | "break" ";" | "continue" ";"
//!            | "return" expression? ";" | assign_stmt | call_stmt
//! if_stmt    = "if" expression "then" statement ("else" statement)?
//! for_stmt   = "for" ID ":=" expression ("to" | "downto") expression "do" statement
//! ```
//!
//! Assignments and call statements are handled in `postfix`.

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

impl Parser {
    /// Parse a block. Declarations and statements may interleave.
    pub(super) fn parse_block(&mut self) -> Result<CstNode, ParseError> {
        let mut children = vec![self.expect(TokenKind::LBrace)?];
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let item = if self.at_var_decl() {
                self.parse_var_decl()?
            } else {
                self.parse_statement()?
            };
            children.push(item);
        }
        children.push(self.expect(TokenKind::RBrace)?);
        Ok(CstNode::with_children(NodeKind::Block, children))
    }

    /// `final int a := 1, &b;`
    fn parse_var_decl(&mut self) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        if let Some(final_kw) = self.match_leaf(TokenKind::Final) {
            children.push(final_kw);
        }
        children.push(self.parse_op_type()?);
        self.parse_declarators_into(&mut children, NodeKind::VarItem)?;
        Ok(CstNode::with_children(NodeKind::VarDecl, children))
    }

    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> Result<CstNode, ParseError> {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.parse_statement_inner()
        })
    }

    fn parse_statement_inner(&mut self) -> Result<CstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::Break => self.parse_keyword_statement(NodeKind::BreakStmt),
            TokenKind::Continue => self.parse_keyword_statement(NodeKind::ContinueStmt),
            TokenKind::Return => self.parse_return(),
            kind if starts_primary(kind) => self.parse_assign_or_call(),
            _ => Err(self.error_here("statement")),
        }
    }

    /// `if c then s else s`; `else` binds to the nearest `if`.
    fn parse_if(&mut self) -> Result<CstNode, ParseError> {
        let mut children = vec![
            self.expect(TokenKind::If)?,
            self.parse_expression()?,
            self.expect(TokenKind::Then)?,
            self.parse_statement()?,
        ];
        if let Some(else_kw) = self.match_leaf(TokenKind::Else) {
            children.push(else_kw);
            children.push(self.parse_statement()?);
        }
        Ok(CstNode::with_children(NodeKind::IfStmt, children))
    }

    /// `for i := 1 to 10 do s`
    fn parse_for(&mut self) -> Result<CstNode, ParseError> {
        let mut children = vec![
            self.expect(TokenKind::For)?,
            self.expect(TokenKind::Identifier)?,
            self.expect(TokenKind::ColonEq)?,
            self.parse_expression()?,
        ];
        match self.peek_kind() {
            TokenKind::To | TokenKind::Downto => children.push(self.advance_leaf()),
            _ => return Err(self.error_here("'to' or 'downto'")),
        }
        children.push(self.parse_expression()?);
        children.push(self.expect(TokenKind::Do)?);
        children.push(self.parse_statement()?);
        Ok(CstNode::with_children(NodeKind::ForStmt, children))
    }

    /// `break;` and `continue;`
    fn parse_keyword_statement(&mut self, kind: NodeKind) -> Result<CstNode, ParseError> {
        let children = vec![self.advance_leaf(), self.expect(TokenKind::Semicolon)?];
        Ok(CstNode::with_children(kind, children))
    }

    /// `return;` or `return e;`
    fn parse_return(&mut self) -> Result<CstNode, ParseError> {
        let mut children = vec![self.expect(TokenKind::Return)?];
        if !self.check(TokenKind::Semicolon) {
            children.push(self.parse_expression()?);
        }
        children.push(self.expect(TokenKind::Semicolon)?);
        Ok(CstNode::with_children(NodeKind::ReturnStmt, children))
    }
}

/// Tokens that can begin a primary expression.
pub(super) fn starts_primary(kind: TokenKind) -> bool {
    kind.is_expression_leaf() || matches!(kind, TokenKind::LParen | TokenKind::New)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::super::tests::{children_of, parse, parse_block};
    use crate::cst::NodeKind;
    use crate::lexer::TokenKind;

    #[test]
    fn test_block_keeps_source_order() {
        let block = parse_block("x := 1; int y; y := x;");
        let kinds: Vec<_> = block.children[1..block.children.len() - 1]
            .iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::AssignStmt, NodeKind::VarDecl, NodeKind::AssignStmt]
        );
    }

    #[test]
    fn test_final_local_declaration() {
        let block = parse_block("final int& a, b := 2, c;");
        let decl = &block.children[1];
        assert!(decl.children[0].is_token(TokenKind::Final));
        assert!(decl.children[2].is_token(TokenKind::Amp));
        assert_eq!(children_of(decl, NodeKind::VarItem).len(), 3);
    }

    #[test]
    fn test_if_else() {
        let block = parse_block("if x > 0 then return x; else { return 0; }");
        let stmt = &block.children[1];
        assert_eq!(stmt.kind, NodeKind::IfStmt);
        assert_eq!(stmt.children.len(), 6);
        assert_eq!(stmt.children[1].kind, NodeKind::BinaryExpr);
        assert_eq!(stmt.children[3].kind, NodeKind::ReturnStmt);
        assert_eq!(stmt.children[5].kind, NodeKind::Block);
    }

    #[test]
    fn test_dangling_else_binds_inner() {
        let block = parse_block("if a then if b then break; else continue;");
        let outer = &block.children[1];
        assert_eq!(outer.children.len(), 4);
        assert_eq!(outer.children[3].children.len(), 6);
    }

    #[test]
    fn test_for_downto() {
        let block = parse_block("for i := 10 downto 1 do sum := sum + i;");
        let stmt = &block.children[1];
        assert_eq!(stmt.kind, NodeKind::ForStmt);
        assert!(stmt.children[4].is_token(TokenKind::Downto));
        assert_eq!(stmt.children[7].kind, NodeKind::AssignStmt);
    }

    #[test]
    fn test_return_without_value() {
        let block = parse_block("return;");
        assert_eq!(block.children[1].kind, NodeKind::ReturnStmt);
        assert_eq!(block.children[1].children.len(), 2);
    }

    #[test]
    fn test_break_continue() {
        let block = parse_block("break; continue;");
        assert_eq!(block.children[1].kind, NodeKind::BreakStmt);
        assert_eq!(block.children[2].kind, NodeKind::ContinueStmt);
    }

    #[test]
    fn test_deep_blocks_do_not_overflow() {
        let depth = 10_000;
        let source = format!("class T {{ void m() {{ {}{} }} }}", "{".repeat(depth), "}".repeat(depth));
        let cst = parse(&source);
        assert!(cst.is_ok(), "{:?}", cst.errors);
    }

    #[test]
    fn test_declaration_as_branch_is_error() {
        let cst = parse("class T { void m() { if a then int x; } }");
        assert!(!cst.is_ok());
    }

    #[test]
    fn test_missing_semicolon() {
        let cst = parse("class T { void m() { break } }");
        assert!(cst.errors[0].to_string().contains("expected ';'"));
    }
}
