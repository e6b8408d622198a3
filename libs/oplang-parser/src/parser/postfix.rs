//! # Postfix Expression Parsing
//!
//! Parses postfix chains and the two statements built on them.
//!
//! ## Grammar
//!
//! ```text
//! postfix     = primary suffix*
//! suffix      = "." ID | "." ID "(" args? ")" | "[" expression "]"
//! assign_stmt = lhs ":=" expression ";"
//! lhs         = ID | postfix_prefix (member_suffix | index_suffix)
//! call_stmt   = postfix_prefix "." ID "(" args? ")" ";"
//! ```
//!
//! Suffix tokens are kept flat as siblings of the primary inside a
//! `PostfixExpr` node. Assignment targets and call statements keep their last
//! suffix outside that node, next to a `PostfixExpr` holding everything
//! before it.

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

/// Tokens of one suffix plus whether it was a method call.
struct Suffix {
    tokens: Vec<CstNode>,
    is_call: bool,
}

impl Parser {
    /// Parse a primary followed by any number of suffixes.
    ///
    /// The result is always a `PostfixExpr` node, even without suffixes.
    pub(super) fn parse_postfix(&mut self) -> Result<CstNode, ParseError> {
        let mut children = vec![self.parse_primary()?];
        while let Some(suffix) = self.parse_suffix()? {
            children.extend(suffix.tokens);
        }
        Ok(CstNode::with_children(NodeKind::PostfixExpr, children))
    }

    /// Parse one `.name`, `.name(args)` or `[index]` suffix, if present.
    fn parse_suffix(&mut self) -> Result<Option<Suffix>, ParseError> {
        match self.peek_kind() {
            TokenKind::Dot => {
                let mut tokens = vec![self.advance_leaf(), self.expect(TokenKind::Identifier)?];
                let is_call = self.check(TokenKind::LParen);
                if is_call {
                    self.parse_call_args_into(&mut tokens)?;
                }
                Ok(Some(Suffix { tokens, is_call }))
            }
            TokenKind::LBracket => {
                let tokens = vec![
                    self.advance_leaf(),
                    self.parse_expression()?,
                    self.expect(TokenKind::RBracket)?,
                ];
                Ok(Some(Suffix {
                    tokens,
                    is_call: false,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Parse a statement that starts with an expression: an assignment
    /// (`target := value;`) or a method call statement (`obj.m(args);`).
    pub(super) fn parse_assign_or_call(&mut self) -> Result<CstNode, ParseError> {
        let primary = self.parse_primary()?;
        let primary_span = primary.span;
        let mut suffixes = Vec::new();
        while let Some(suffix) = self.parse_suffix()? {
            suffixes.push(suffix);
        }

        if self.check(TokenKind::ColonEq) {
            let lhs = match suffixes.pop() {
                None if primary.is_token(TokenKind::Identifier) => {
                    CstNode::with_children(NodeKind::Lhs, vec![primary])
                }
                None => {
                    let found = first_text(&primary);
                    return Err(ParseError::misplaced(found, "assignable target", primary_span));
                }
                Some(last) if last.is_call => {
                    return Err(self.error_here("';' after method call"));
                }
                Some(last) => {
                    let mut children = vec![prefix_node(primary, suffixes)];
                    children.extend(last.tokens);
                    CstNode::with_children(NodeKind::Lhs, children)
                }
            };
            let children = vec![
                lhs,
                self.advance_leaf(),
                self.parse_expression()?,
                self.expect(TokenKind::Semicolon)?,
            ];
            return Ok(CstNode::with_children(NodeKind::AssignStmt, children));
        }

        match suffixes.pop() {
            Some(last) if last.is_call && self.check(TokenKind::Semicolon) => {
                let mut children = vec![prefix_node(primary, suffixes)];
                children.extend(last.tokens);
                children.push(self.advance_leaf());
                Ok(CstNode::with_children(NodeKind::CallStmt, children))
            }
            Some(last) if last.is_call => Err(self.error_here("';'")),
            _ => Err(self.error_here("':='")),
        }
    }
}

/// Text of the leftmost leaf under `node`.
fn first_text(mut node: &CstNode) -> &str {
    while let Some(child) = node.children.first() {
        node = child;
    }
    node.text_or_empty()
}

/// Wrap a primary and all but the last suffix as a `PostfixExpr`.
fn prefix_node(primary: CstNode, suffixes: Vec<Suffix>) -> CstNode {
    let mut children = vec![primary];
    for suffix in suffixes {
        children.extend(suffix.tokens);
    }
    CstNode::with_children(NodeKind::PostfixExpr, children)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::super::tests::{parse, parse_block, parse_expr};
    use crate::cst::NodeKind;
    use crate::lexer::TokenKind;

    fn token_kinds(node: &crate::cst::CstNode) -> Vec<NodeKind> {
        node.children.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_chain_is_flat() {
        let expr = parse_expr("a.b().c.d(1, 2)[3]");
        assert_eq!(expr.kind, NodeKind::PostfixExpr);
        assert_eq!(
            token_kinds(&expr),
            vec![
                NodeKind::Token(TokenKind::Identifier),
                NodeKind::Token(TokenKind::Dot),
                NodeKind::Token(TokenKind::Identifier),
                NodeKind::Token(TokenKind::LParen),
                NodeKind::Token(TokenKind::RParen),
                NodeKind::Token(TokenKind::Dot),
                NodeKind::Token(TokenKind::Identifier),
                NodeKind::Token(TokenKind::Dot),
                NodeKind::Token(TokenKind::Identifier),
                NodeKind::Token(TokenKind::LParen),
                NodeKind::ArgList,
                NodeKind::Token(TokenKind::RParen),
                NodeKind::Token(TokenKind::LBracket),
                NodeKind::PostfixExpr,
                NodeKind::Token(TokenKind::RBracket),
            ]
        );
    }

    #[test]
    fn test_bare_identifier_target() {
        let block = parse_block("sum := 0;");
        let lhs = &block.children[1].children[0];
        assert_eq!(lhs.kind, NodeKind::Lhs);
        assert_eq!(lhs.children.len(), 1);
        assert!(lhs.children[0].is_token(TokenKind::Identifier));
    }

    #[test]
    fn test_member_target_splits_last_suffix() {
        let block = parse_block("this.items[i].x := 1;");
        let lhs = &block.children[1].children[0];
        assert_eq!(
            token_kinds(lhs),
            vec![
                NodeKind::PostfixExpr,
                NodeKind::Token(TokenKind::Dot),
                NodeKind::Token(TokenKind::Identifier)
            ]
        );
        let prefix = &lhs.children[0];
        assert!(prefix.children[0].is_token(TokenKind::This));
        assert_eq!(prefix.children.len(), 6);
    }

    #[test]
    fn test_index_target() {
        let block = parse_block("arr[0] := 42;");
        let lhs = &block.children[1].children[0];
        assert_eq!(
            token_kinds(lhs),
            vec![
                NodeKind::PostfixExpr,
                NodeKind::Token(TokenKind::LBracket),
                NodeKind::PostfixExpr,
                NodeKind::Token(TokenKind::RBracket)
            ]
        );
        assert_eq!(lhs.children[0].children.len(), 1);
    }

    #[test]
    fn test_call_statement() {
        let block = parse_block("io.writeFloatLn(r1.getArea());");
        let stmt = &block.children[1];
        assert_eq!(stmt.kind, NodeKind::CallStmt);
        assert_eq!(
            token_kinds(stmt),
            vec![
                NodeKind::PostfixExpr,
                NodeKind::Token(TokenKind::Dot),
                NodeKind::Token(TokenKind::Identifier),
                NodeKind::Token(TokenKind::LParen),
                NodeKind::ArgList,
                NodeKind::Token(TokenKind::RParen),
                NodeKind::Token(TokenKind::Semicolon)
            ]
        );
    }

    #[test]
    fn test_call_on_new_object() {
        let block = parse_block("new Counter().tick();");
        assert_eq!(block.children[1].kind, NodeKind::CallStmt);
    }

    #[test]
    fn test_assigning_to_call_is_error() {
        assert!(!parse("class T { void m() { a.f() := 1; } }").is_ok());
    }

    #[test]
    fn test_assigning_to_this_is_error() {
        let cst = parse("class T { void m() { this := nil; } }");
        assert!(cst.errors[0].to_string().contains("assignable target"));
    }

    #[test]
    fn test_expression_statement_without_call_is_error() {
        assert!(!parse("class T { void m() { a.b; } }").is_ok());
        assert!(!parse("class T { void m() { a; } }").is_ok());
    }
}
