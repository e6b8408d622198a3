//! # Declaration Transformation
//!
//! Classes, their members and parameter lists.

use super::expressions::transform_expression;
use super::statements::transform_block;
use super::types::{transform_op_type, transform_return_type};
use crate::ast::{
    Attribute, AttributeDecl, ClassDecl, ConstructorDecl, DestructorDecl, Expression, Member,
    MethodDecl, Parameter, Type,
};
use crate::cst::{ChildCursor, ParseTree};
use crate::error::StructuralError;
use oplang_parser::{NodeKind, TokenKind};

// =============================================================================
// CLASSES
// =============================================================================

/// `class Name (extends Super)? { member* }`
pub(super) fn transform_class<T: ParseTree>(node: &T) -> Result<ClassDecl, StructuralError> {
    let mut c = ChildCursor::new(node);
    c.expect_token(TokenKind::Class)?;
    let name = c.expect_ident()?;
    let superclass = match c.eat(TokenKind::Extends) {
        Some(_) => Some(c.expect_ident()?),
        None => None,
    };

    c.expect_token(TokenKind::LBrace)?;
    let mut members = Vec::new();
    while !c.at(TokenKind::RBrace) {
        let member = c.next_any("'}'")?;
        members.push(transform_member(member)?);
    }
    c.expect_token(TokenKind::RBrace)?;
    c.finish()?;

    Ok(ClassDecl {
        name,
        superclass,
        members,
    })
}

fn transform_member<T: ParseTree>(node: &T) -> Result<Member, StructuralError> {
    match node.kind() {
        NodeKind::AttributeDecl => transform_attribute_decl(node).map(Member::Attribute),
        NodeKind::MethodDecl => transform_method(node).map(Member::Method),
        NodeKind::ConstructorDecl => transform_constructor(node).map(Member::Constructor),
        NodeKind::DestructorDecl => transform_destructor(node).map(Member::Destructor),
        _ => Err(StructuralError::unexpected("class member", node)),
    }
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

/// `static? final? type &? item (, item)* ;`
fn transform_attribute_decl<T: ParseTree>(node: &T) -> Result<AttributeDecl, StructuralError> {
    let mut c = ChildCursor::new(node);
    let mut is_static = false;
    let mut is_final = false;
    loop {
        if c.eat(TokenKind::Static).is_some() {
            is_static = true;
        } else if c.eat(TokenKind::Final).is_some() {
            is_final = true;
        } else {
            break;
        }
    }

    let base = transform_op_type(c.expect_node(NodeKind::OpType)?)?;
    let (attr_type, declarators) = transform_declarators(&mut c, base, NodeKind::AttributeItem)?;
    c.finish()?;

    Ok(AttributeDecl {
        is_static,
        is_final,
        attr_type,
        attributes: declarators
            .into_iter()
            .map(|(name, init)| Attribute { name, init })
            .collect(),
    })
}

/// Read `&? item (, item)* ;` for an attribute or local declaration.
///
/// Returns the shared type, wrapped in a reference when the declaration or
/// any single item carries `&`, and each item's name and initializer.
pub(super) fn transform_declarators<T: ParseTree>(
    c: &mut ChildCursor<'_, T>,
    base: Type,
    item_kind: NodeKind,
) -> Result<(Type, Vec<(String, Option<Expression>)>), StructuralError> {
    let mut is_reference = c.eat(TokenKind::Amp).is_some();
    let mut items = Vec::new();
    loop {
        let item = c.expect_node(item_kind)?;
        let (item_reference, name, init) = transform_declarator(item)?;
        is_reference |= item_reference;
        items.push((name, init));
        if c.eat(TokenKind::Comma).is_none() {
            break;
        }
    }
    c.expect_token(TokenKind::Semicolon)?;

    let ty = if is_reference { base.into_reference() } else { base };
    Ok((ty, items))
}

/// `&? ID ((:= | =) expression)?`
fn transform_declarator<T: ParseTree>(
    node: &T,
) -> Result<(bool, String, Option<Expression>), StructuralError> {
    let mut c = ChildCursor::new(node);
    let is_reference = c.eat(TokenKind::Amp).is_some();
    let name = c.expect_ident()?;
    let has_init = c.eat(TokenKind::ColonEq).is_some() || c.eat(TokenKind::Eq).is_some();
    let init = if has_init {
        Some(transform_expression(c.next_any("initializer")?)?)
    } else {
        None
    };
    c.finish()?;
    Ok((is_reference, name, init))
}

// =============================================================================
// METHODS, CONSTRUCTORS, DESTRUCTORS
// =============================================================================

/// `static? return_type &? ID ( params? ) block`
fn transform_method<T: ParseTree>(node: &T) -> Result<MethodDecl, StructuralError> {
    let mut c = ChildCursor::new(node);
    let is_static = c.eat(TokenKind::Static).is_some();
    let mut return_type = transform_return_type(c.expect_node(NodeKind::ReturnType)?)?;
    if c.eat(TokenKind::Amp).is_some() {
        return_type = return_type.into_reference();
    }
    let name = c.expect_ident()?;
    let params = transform_params(&mut c)?;
    let body = transform_block(c.expect_node(NodeKind::Block)?)?;
    c.finish()?;

    Ok(MethodDecl {
        is_static,
        return_type,
        name,
        params,
        body,
    })
}

/// `ID ( params? ) block`
fn transform_constructor<T: ParseTree>(node: &T) -> Result<ConstructorDecl, StructuralError> {
    let mut c = ChildCursor::new(node);
    let name = c.expect_ident()?;
    let params = transform_params(&mut c)?;
    let body = transform_block(c.expect_node(NodeKind::Block)?)?;
    c.finish()?;
    Ok(ConstructorDecl { name, params, body })
}

/// `~ ID ( ) block`
fn transform_destructor<T: ParseTree>(node: &T) -> Result<DestructorDecl, StructuralError> {
    let mut c = ChildCursor::new(node);
    c.expect_token(TokenKind::Tilde)?;
    let name = c.expect_ident()?;
    c.expect_token(TokenKind::LParen)?;
    c.expect_token(TokenKind::RParen)?;
    let body = transform_block(c.expect_node(NodeKind::Block)?)?;
    c.finish()?;
    Ok(DestructorDecl { name, body })
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// `( param_list? )`
fn transform_params<T: ParseTree>(c: &mut ChildCursor<'_, T>) -> Result<Vec<Parameter>, StructuralError> {
    c.expect_token(TokenKind::LParen)?;
    let mut params = Vec::new();
    if let Some(list) = c.eat_node(NodeKind::ParamList) {
        let mut groups = ChildCursor::new(list);
        loop {
            transform_param_group(groups.expect_node(NodeKind::ParamGroup)?, &mut params)?;
            if groups.eat(TokenKind::Semicolon).is_none() {
                break;
            }
        }
        groups.finish()?;
    }
    c.expect_token(TokenKind::RParen)?;
    Ok(params)
}

/// `type &? ID (, ID)*`, one parameter per name.
fn transform_param_group<T: ParseTree>(
    node: &T,
    params: &mut Vec<Parameter>,
) -> Result<(), StructuralError> {
    let mut c = ChildCursor::new(node);
    let mut param_type = transform_op_type(c.expect_node(NodeKind::OpType)?)?;
    if c.eat(TokenKind::Amp).is_some() {
        param_type = param_type.into_reference();
    }
    loop {
        params.push(Parameter {
            param_type: param_type.clone(),
            name: c.expect_ident()?,
        });
        if c.eat(TokenKind::Comma).is_none() {
            break;
        }
    }
    c.finish()
}

// =============================================================================
// TESTS
// =============================================================================
