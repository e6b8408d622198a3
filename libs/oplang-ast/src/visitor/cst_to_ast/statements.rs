//! # Statement Transformation
//!
//! Transforms blocks, local declarations and statements.
//!
//! Blocks may interleave declarations and statements in the source; the AST
//! keeps every declaration ahead of every statement, each group in source
//! order.

use super::declarations::transform_declarators;
use super::expressions::transform_expression;
use super::postfix::{resolve_call, resolve_lhs};
use super::types::transform_op_type;
use crate::ast::{
    AssignmentStatement, BlockStatement, ForDirection, ForStatement, IfStatement,
    MethodInvocationStatement, ReturnStatement, Statement, Variable, VariableDecl,
};
use crate::cst::{ChildCursor, ParseTree};
use crate::error::StructuralError;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use oplang_parser::{NodeKind, TokenKind};

// =============================================================================
// BLOCKS
// =============================================================================

/// `{ (var_decl | statement)* }`
///
/// ## Parameters
///
/// - `node`: `Block` node
///
/// ## Returns
///
/// Block with declarations partitioned ahead of statements.
pub(super) fn transform_block<T: ParseTree>(node: &T) -> Result<BlockStatement, StructuralError> {
    if node.kind() != NodeKind::Block {
        return Err(StructuralError::unexpected("Block", node));
    }

    let mut c = ChildCursor::new(node);
    c.expect_token(TokenKind::LBrace)?;
    let mut block = BlockStatement::default();
    while !c.at(TokenKind::RBrace) {
        let item = c.next_any("'}'")?;
        if item.kind() == NodeKind::VarDecl {
            block.var_decls.push(transform_var_decl(item)?);
        } else {
            block.statements.push(transform_statement(item)?);
        }
    }
    c.expect_token(TokenKind::RBrace)?;
    c.finish()?;
    Ok(block)
}

/// `final? type &? item (, item)* ;`
fn transform_var_decl<T: ParseTree>(node: &T) -> Result<VariableDecl, StructuralError> {
    let mut c = ChildCursor::new(node);
    let is_final = c.eat(TokenKind::Final).is_some();
    let base = transform_op_type(c.expect_node(NodeKind::OpType)?)?;
    let (var_type, declarators) = transform_declarators(&mut c, base, NodeKind::VarItem)?;
    c.finish()?;

    Ok(VariableDecl {
        is_final,
        var_type,
        variables: declarators
            .into_iter()
            .map(|(name, init)| Variable { name, init })
            .collect(),
    })
}

// =============================================================================
// STATEMENTS
// =============================================================================

/// Transform a statement node.
///
/// Nested statements recurse through here, so the stack is grown on demand.
pub(super) fn transform_statement<T: ParseTree>(node: &T) -> Result<Statement, StructuralError> {
    stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
        transform_statement_inner(node)
    })
}

fn transform_statement_inner<T: ParseTree>(node: &T) -> Result<Statement, StructuralError> {
    match node.kind() {
        NodeKind::Block => transform_block(node).map(Statement::Block),
        NodeKind::AssignStmt => transform_assignment(node).map(Statement::Assignment),
        NodeKind::IfStmt => transform_if(node).map(Statement::If),
        NodeKind::ForStmt => transform_for(node).map(Statement::For),
        NodeKind::BreakStmt => {
            transform_keyword_statement(node, TokenKind::Break)?;
            Ok(Statement::Break)
        }
        NodeKind::ContinueStmt => {
            transform_keyword_statement(node, TokenKind::Continue)?;
            Ok(Statement::Continue)
        }
        NodeKind::ReturnStmt => transform_return(node).map(Statement::Return),
        NodeKind::CallStmt => {
            let call = resolve_call(node)?;
            Ok(Statement::MethodInvocation(MethodInvocationStatement { call }))
        }
        _ => Err(StructuralError::unexpected("statement", node)),
    }
}

/// `lhs := expression ;`
fn transform_assignment<T: ParseTree>(node: &T) -> Result<AssignmentStatement, StructuralError> {
    let mut c = ChildCursor::new(node);
    let lhs = resolve_lhs(c.expect_node(NodeKind::Lhs)?)?;
    c.expect_token(TokenKind::ColonEq)?;
    let rhs = transform_expression(c.next_any("expression")?)?;
    c.expect_token(TokenKind::Semicolon)?;
    c.finish()?;
    Ok(AssignmentStatement { lhs, rhs })
}

/// `if expression then statement (else statement)?`
fn transform_if<T: ParseTree>(node: &T) -> Result<IfStatement, StructuralError> {
    let mut c = ChildCursor::new(node);
    c.expect_token(TokenKind::If)?;
    let condition = transform_expression(c.next_any("condition")?)?;
    c.expect_token(TokenKind::Then)?;
    let then_branch = Box::new(transform_statement(c.next_any("statement")?)?);
    let else_branch = match c.eat(TokenKind::Else) {
        Some(_) => Some(Box::new(transform_statement(c.next_any("statement")?)?)),
        None => None,
    };
    c.finish()?;

    Ok(IfStatement {
        condition,
        then_branch,
        else_branch,
    })
}

/// `for ID := expression (to | downto) expression do statement`
fn transform_for<T: ParseTree>(node: &T) -> Result<ForStatement, StructuralError> {
    let mut c = ChildCursor::new(node);
    c.expect_token(TokenKind::For)?;
    let variable = c.expect_ident()?;
    c.expect_token(TokenKind::ColonEq)?;
    let start = transform_expression(c.next_any("expression")?)?;
    let direction = if c.eat(TokenKind::To).is_some() {
        ForDirection::To
    } else if c.eat(TokenKind::Downto).is_some() {
        ForDirection::Downto
    } else {
        return Err(c.mismatch("'to' or 'downto'"));
    };
    let end = transform_expression(c.next_any("expression")?)?;
    c.expect_token(TokenKind::Do)?;
    let body = Box::new(transform_statement(c.next_any("statement")?)?);
    c.finish()?;

    Ok(ForStatement {
        variable,
        start,
        direction,
        end,
        body,
    })
}

/// `break ;` and `continue ;`
fn transform_keyword_statement<T: ParseTree>(node: &T, keyword: TokenKind) -> Result<(), StructuralError> {
    let mut c = ChildCursor::new(node);
    c.expect_token(keyword)?;
    c.expect_token(TokenKind::Semicolon)?;
    c.finish()
}

/// `return expression? ;`
fn transform_return<T: ParseTree>(node: &T) -> Result<ReturnStatement, StructuralError> {
    let mut c = ChildCursor::new(node);
    c.expect_token(TokenKind::Return)?;
    let value = if c.at(TokenKind::Semicolon) {
        None
    } else {
        Some(transform_expression(c.next_any("expression")?)?)
    };
    c.expect_token(TokenKind::Semicolon)?;
    c.finish()?;
    Ok(ReturnStatement { value })
}

// =============================================================================
// TESTS
// =============================================================================
