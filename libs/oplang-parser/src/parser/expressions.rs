//! # Expression Parsing
//!
//! Binary operators use precedence climbing; prefix operators and primaries
//! are parsed by descent.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | `< <= > >= == !=` | None |
//! | 2 | `&& \|\|` | Left |
//! | 3 | `+ -` | Left |
//! | 4 | `* / \ %` | Left |
//! | 5 | `^` | Left |
//! | 6 | `!` (prefix) | Right |
//! | 7 | `- +` (prefix) | Right |
//! | 8 | `.name` `.name(args)` `[index]` | Left |
//!
//! `!` binds looser than unary minus, so `!-a` parses but `-!a` does not.

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Binary operator precedence levels.
///
/// Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    /// Relational and equality: `< <= > >= == !=`
    Relational = 1,
    /// Logical: `&& ||`
    Logical = 2,
    /// Additive: `+ -`
    Additive = 3,
    /// Multiplicative: `* / \ %`
    Multiplicative = 4,
    /// String concatenation: `^`
    Concat = 5,
}

impl Precedence {
    /// Get precedence for binary operator.
    fn of_binary(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
            | TokenKind::EqEq
            | TokenKind::BangEq => Some(Self::Relational),
            TokenKind::AmpAmp | TokenKind::PipePipe => Some(Self::Logical),
            TokenKind::Plus | TokenKind::Minus => Some(Self::Additive),
            TokenKind::Star | TokenKind::Slash | TokenKind::Backslash | TokenKind::Percent => {
                Some(Self::Multiplicative)
            }
            TokenKind::Caret => Some(Self::Concat),
            _ => None,
        }
    }

    /// Minimum precedence for the right operand of a left-associative
    /// operator at this level. `None` past the tightest binary level.
    fn next(self) -> Option<Self> {
        match self {
            Self::Relational => Some(Self::Logical),
            Self::Logical => Some(Self::Additive),
            Self::Additive => Some(Self::Multiplicative),
            Self::Multiplicative => Some(Self::Concat),
            Self::Concat => None,
        }
    }
}

// =============================================================================
// EXPRESSION PARSING
// =============================================================================

impl Parser {
    /// Parse an expression.
    ///
    /// Parentheses, arguments and array literals recurse through here, so
    /// the stack is grown on demand.
    pub(super) fn parse_expression(&mut self) -> Result<CstNode, ParseError> {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.parse_precedence(Precedence::Relational)
        })
    }

    /// Parse binary operators at `min_prec` and above.
    ///
    /// Relational operators are non-associative: `a < b < c` is an error.
    fn parse_precedence(&mut self, min_prec: Precedence) -> Result<CstNode, ParseError> {
        let mut left = self.parse_not()?;
        let mut seen_relational = false;

        while let Some(prec) = Precedence::of_binary(self.peek_kind()) {
            if prec < min_prec {
                break;
            }
            if prec == Precedence::Relational {
                if seen_relational {
                    return Err(self.error_here("end of comparison"));
                }
                seen_relational = true;
            }

            let op = self.advance_leaf();
            let right = match prec.next() {
                Some(tighter) => self.parse_precedence(tighter)?,
                None => self.parse_not()?,
            };
            left = CstNode::with_children(NodeKind::BinaryExpr, vec![left, op, right]);
        }

        Ok(left)
    }

    /// `!e`
    fn parse_not(&mut self) -> Result<CstNode, ParseError> {
        let mut ops = Vec::new();
        while let Some(op) = self.match_leaf(TokenKind::Bang) {
            ops.push(op);
        }
        let operand = self.parse_sign()?;
        Ok(wrap_prefix(ops, operand))
    }

    /// `-e` and `+e`
    fn parse_sign(&mut self) -> Result<CstNode, ParseError> {
        let mut ops = Vec::new();
        while matches!(self.peek_kind(), TokenKind::Minus | TokenKind::Plus) {
            ops.push(self.advance_leaf());
        }
        let operand = self.parse_postfix()?;
        Ok(wrap_prefix(ops, operand))
    }

    /// Parse a primary expression.
    ///
    /// ```text
    /// primary = literal | ID | "this" | "(" expression ")"
    ///         | "new" ID "(" args? ")" | "{" (expression ("," expression)*)? "}"
    /// ```
    pub(super) fn parse_primary(&mut self) -> Result<CstNode, ParseError> {
        let kind = self.peek_kind();
        if kind == TokenKind::IntLiteral {
            return self.expect_int::<i64>();
        }
        if kind.is_expression_leaf() {
            return Ok(self.advance_leaf());
        }
        match kind {
            TokenKind::LParen => {
                let children = vec![
                    self.advance_leaf(),
                    self.parse_expression()?,
                    self.expect(TokenKind::RParen)?,
                ];
                Ok(CstNode::with_children(NodeKind::ParenExpr, children))
            }
            TokenKind::New => {
                let mut children = vec![self.advance_leaf(), self.expect(TokenKind::Identifier)?];
                self.parse_call_args_into(&mut children)?;
                Ok(CstNode::with_children(NodeKind::NewExpr, children))
            }
            TokenKind::LBrace => self.parse_array_literal(),
            _ => Err(self.error_here("expression")),
        }
    }

    /// `{1, 2, 3}`
    fn parse_array_literal(&mut self) -> Result<CstNode, ParseError> {
        let mut children = vec![self.expect(TokenKind::LBrace)?];
        if !self.check(TokenKind::RBrace) {
            children.push(self.parse_expression()?);
            while let Some(comma) = self.match_leaf(TokenKind::Comma) {
                children.push(comma);
                children.push(self.parse_expression()?);
            }
        }
        children.push(self.expect(TokenKind::RBrace)?);
        Ok(CstNode::with_children(NodeKind::ArrayLiteral, children))
    }

    /// Parse `( args? )` and append the tokens and argument list.
    pub(super) fn parse_call_args_into(
        &mut self,
        children: &mut Vec<CstNode>,
    ) -> Result<(), ParseError> {
        children.push(self.expect(TokenKind::LParen)?);
        if !self.check(TokenKind::RParen) {
            let mut args = CstNode::with_children(NodeKind::ArgList, vec![self.parse_expression()?]);
            while let Some(comma) = self.match_leaf(TokenKind::Comma) {
                args.add_child(comma);
                args.add_child(self.parse_expression()?);
            }
            children.push(args);
        }
        children.push(self.expect(TokenKind::RParen)?);
        Ok(())
    }
}

/// Nest `operand` in one `UnaryExpr` per prefix operator, innermost last.
fn wrap_prefix(ops: Vec<CstNode>, operand: CstNode) -> CstNode {
    ops.into_iter()
        .rev()
        .fold(operand, |inner, op| CstNode::with_children(NodeKind::UnaryExpr, vec![op, inner]))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::super::tests::{parse, parse_expr};
    use crate::cst::{CstNode, NodeKind};
    use crate::error::ParseErrorKind;
    use crate::lexer::TokenKind;

    /// Render a CST expression with explicit grouping, for shape checks.
    fn shape(node: &CstNode) -> String {
        match node.kind {
            NodeKind::BinaryExpr => format!(
                "({} {} {})",
                shape(&node.children[0]),
                node.children[1].text_or_empty(),
                shape(&node.children[2])
            ),
            NodeKind::UnaryExpr => {
                format!("({}{})", node.children[0].text_or_empty(), shape(&node.children[1]))
            }
            NodeKind::PostfixExpr if node.children.len() == 1 => shape(&node.children[0]),
            NodeKind::ParenExpr => shape(&node.children[1]),
            _ if node.kind.is_token() => node.text_or_empty().to_string(),
            _ => format!("{:?}", node.kind),
        }
    }

    #[test]
    fn test_multiplicative_binds_tighter() {
        assert_eq!(shape(&parse_expr("1 + 2 * 3")), "(1 + (2 * 3))");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(shape(&parse_expr("a - b - c")), "((a - b) - c)");
        assert_eq!(shape(&parse_expr("a \\ b % c")), "((a \\ b) % c)");
    }

    #[test]
    fn test_logical_binds_tighter_than_relational() {
        assert_eq!(shape(&parse_expr("a && b == c || d")), "((a && b) == (c || d))");
    }

    #[test]
    fn test_concat_binds_tighter_than_multiplicative() {
        assert_eq!(shape(&parse_expr("a * b ^ c")), "(a * (b ^ c))");
    }

    #[test]
    fn test_prefix_operators() {
        assert_eq!(shape(&parse_expr("-+-a")), "(-(+(-a)))");
        assert_eq!(shape(&parse_expr("!-a + b")), "((!(-a)) + b)");
    }

    #[test]
    fn test_unary_minus_cannot_wrap_not() {
        assert!(!parse("class T { void m() { x := -!a; } }").is_ok());
    }

    #[test]
    fn test_relational_is_non_associative() {
        let cst = parse("class T { void m() { x := a < b < c; } }");
        assert_eq!(cst.errors.len(), 1);
        assert!(cst.errors[0].to_string().contains("end of comparison"));
    }

    #[test]
    fn test_every_primary_is_wrapped() {
        let expr = parse_expr("42");
        assert_eq!(expr.kind, NodeKind::PostfixExpr);
        assert!(expr.children[0].is_token(TokenKind::IntLiteral));
    }

    #[test]
    fn test_object_creation() {
        let expr = parse_expr("new Rectangle(5.0, 3.0)");
        let new_expr = &expr.children[0];
        assert_eq!(new_expr.kind, NodeKind::NewExpr);
        let args = new_expr.find_child(NodeKind::ArgList).cloned().unwrap_or_else(|| panic!("no args"));
        assert_eq!(args.children.len(), 3);
    }

    #[test]
    fn test_array_literal() {
        let expr = parse_expr("{1, 2, 3}");
        assert_eq!(expr.children[0].kind, NodeKind::ArrayLiteral);
        assert_eq!(expr.children[0].children.len(), 7);
        assert_eq!(parse_expr("{}").children[0].children.len(), 2);
    }

    #[test]
    fn test_long_prefix_run() {
        let cst = parse(&format!("class T {{ int x := !!{}a; }}", "-".repeat(10_000)));
        assert!(cst.is_ok(), "{:?}", cst.errors);
        // ClassDecl [class T { AttributeDecl }] -> AttributeItem [x := value]
        let item = &cst.root.children[0].children[3].children[1];
        let mut current = &item.children[2];
        let mut depth = 0;
        while current.kind == NodeKind::UnaryExpr {
            depth += 1;
            current = &current.children[1];
        }
        assert_eq!(depth, 10_002);
        assert!(current.children[0].is_token(TokenKind::Identifier));
    }

    #[test]
    fn test_deep_parentheses_do_not_overflow() {
        let depth = 10_000;
        let source = format!("class T {{ int x := {}1{}; }}", "(".repeat(depth), ")".repeat(depth));
        let cst = parse(&source);
        assert!(cst.is_ok(), "{:?}", cst.errors);
    }

    #[test]
    fn test_integer_range() {
        assert_eq!(parse_expr("9223372036854775807").children[0].text_or_empty(), "9223372036854775807");
        let cst = parse("class T { void m() { z := 9223372036854775808; } }");
        assert_eq!(cst.errors.len(), 1);
        assert!(matches!(cst.errors[0].kind, ParseErrorKind::IntegerOutOfRange { .. }));
    }

    #[test]
    fn test_parenthesized() {
        assert_eq!(shape(&parse_expr("(a + b) * c")), "((a + b) * c)");
        assert_eq!(parse_expr("(a)").children[0].kind, NodeKind::ParenExpr);
    }
}
