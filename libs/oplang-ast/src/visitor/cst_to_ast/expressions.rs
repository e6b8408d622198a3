//! # Expression Transformation
//!
//! Transforms expression nodes and leaf tokens to AST expressions.

use super::literals::{transform_float, transform_int, transform_string};
use super::postfix::transform_postfix;
use crate::ast::{BinaryOperator, Expression, ObjectCreation, UnaryOperator};
use crate::cst::{ChildCursor, ParseTree};
use crate::error::StructuralError;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use oplang_parser::{NodeKind, TokenKind};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Transform a node to an AST expression.
///
/// ## Parameters
///
/// - `node`: expression node or leaf token
///
/// ## Returns
///
/// AST expression
pub(super) fn transform_expression<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
        transform_expression_inner(node)
    })
}

fn transform_expression_inner<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    match node.kind() {
        // Compound expressions
        NodeKind::BinaryExpr => transform_binary(node),
        NodeKind::UnaryExpr => transform_unary(node),
        NodeKind::PostfixExpr => transform_postfix(node),
        NodeKind::ParenExpr => transform_paren(node),
        NodeKind::NewExpr => transform_new(node),
        NodeKind::ArrayLiteral => transform_array_literal(node),

        // Leaves
        NodeKind::Token(TokenKind::IntLiteral) => transform_int(node),
        NodeKind::Token(TokenKind::FloatLiteral) => transform_float(node),
        NodeKind::Token(TokenKind::StringLiteral) => transform_string(node),
        NodeKind::Token(TokenKind::True) => Ok(Expression::BoolLiteral(true)),
        NodeKind::Token(TokenKind::False) => Ok(Expression::BoolLiteral(false)),
        NodeKind::Token(TokenKind::Nil) => Ok(Expression::NilLiteral),
        NodeKind::Token(TokenKind::This) => Ok(Expression::This),
        NodeKind::Token(TokenKind::Identifier) => {
            Ok(Expression::identifier(node.text().unwrap_or_default()))
        }

        _ => Err(StructuralError::unexpected("expression", node)),
    }
}

/// Transform an `ArgList` node: `expression (, expression)*`.
pub(super) fn transform_args<T: ParseTree>(node: &T) -> Result<Vec<Expression>, StructuralError> {
    let mut c = ChildCursor::new(node);
    let mut args = Vec::new();
    loop {
        args.push(transform_expression(c.next_any("argument")?)?);
        if c.eat(TokenKind::Comma).is_none() {
            break;
        }
    }
    c.finish()?;
    Ok(args)
}

// =============================================================================
// OPERATORS
// =============================================================================

/// `left op right`
fn transform_binary<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    let mut c = ChildCursor::new(node);
    let left = transform_expression(c.next_any("left operand")?)?;
    let op_node = c.next_any("binary operator")?;
    let operator = op_node
        .text()
        .filter(|_| op_node.kind().is_token())
        .and_then(BinaryOperator::from_symbol)
        .ok_or_else(|| StructuralError::unexpected("binary operator", op_node))?;
    let right = transform_expression(c.next_any("right operand")?)?;
    c.finish()?;
    Ok(Expression::binary(left, operator, right))
}

/// `op operand`
fn transform_unary<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    let mut c = ChildCursor::new(node);
    let op_node = c.next_any("unary operator")?;
    let operator = op_node
        .text()
        .filter(|_| op_node.kind().is_token())
        .and_then(UnaryOperator::from_symbol)
        .ok_or_else(|| StructuralError::unexpected("unary operator", op_node))?;
    let operand = transform_expression(c.next_any("operand")?)?;
    c.finish()?;
    Ok(Expression::unary(operator, operand))
}

// =============================================================================
// PRIMARIES
// =============================================================================

/// `( expression )`
fn transform_paren<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    let mut c = ChildCursor::new(node);
    c.expect_token(TokenKind::LParen)?;
    let inner = transform_expression(c.next_any("expression")?)?;
    c.expect_token(TokenKind::RParen)?;
    c.finish()?;
    Ok(Expression::Parenthesized(Box::new(inner)))
}

/// `new ID ( args? )`
fn transform_new<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    let mut c = ChildCursor::new(node);
    c.expect_token(TokenKind::New)?;
    let class_name = c.expect_ident()?;
    c.expect_token(TokenKind::LParen)?;
    let args = match c.eat_node(NodeKind::ArgList) {
        Some(list) => transform_args(list)?,
        None => Vec::new(),
    };
    c.expect_token(TokenKind::RParen)?;
    c.finish()?;
    Ok(Expression::ObjectCreation(ObjectCreation { class_name, args }))
}

/// `{ (expression (, expression)*)? }`
fn transform_array_literal<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    let mut c = ChildCursor::new(node);
    c.expect_token(TokenKind::LBrace)?;
    let mut elements = Vec::new();
    if !c.at(TokenKind::RBrace) {
        loop {
            elements.push(transform_expression(c.next_any("element")?)?);
            if c.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
    }
    c.expect_token(TokenKind::RBrace)?;
    c.finish()?;
    Ok(Expression::ArrayLiteral(elements))
}

// =============================================================================
// TESTS
// =============================================================================
