//! # Type Transformation

use crate::ast::{PrimitiveType, Type};
use crate::cst::{ChildCursor, ParseTree};
use crate::error::StructuralError;
use oplang_parser::{NodeKind, TokenKind};

/// `(primitive | ID) ([ INT_LIT ])?`
///
/// The array size is taken as written (`002` is 2) and never bounds-checked.
pub(super) fn transform_op_type<T: ParseTree>(node: &T) -> Result<Type, StructuralError> {
    let mut c = ChildCursor::new(node);
    let head = c.next_any("type")?;
    let element = match head.kind() {
        NodeKind::Token(TokenKind::IntType) => Type::Primitive(PrimitiveType::Int),
        NodeKind::Token(TokenKind::FloatType) => Type::Primitive(PrimitiveType::Float),
        NodeKind::Token(TokenKind::BooleanType) => Type::Primitive(PrimitiveType::Boolean),
        NodeKind::Token(TokenKind::StringType) => Type::Primitive(PrimitiveType::String),
        NodeKind::Token(TokenKind::Identifier) => Type::class(head.text().unwrap_or_default()),
        _ => return Err(StructuralError::unexpected("type", head)),
    };

    if c.eat(TokenKind::LBracket).is_none() {
        c.finish()?;
        return Ok(element);
    }
    let size_node = c.expect_token(TokenKind::IntLiteral)?;
    let size = size_node
        .text()
        .unwrap_or_default()
        .parse::<u64>()
        .map_err(|_| StructuralError::unexpected("array size", size_node))?;
    c.expect_token(TokenKind::RBracket)?;
    c.finish()?;
    Ok(Type::array(element, size))
}

/// `void | op_type`
pub(super) fn transform_return_type<T: ParseTree>(node: &T) -> Result<Type, StructuralError> {
    let mut c = ChildCursor::new(node);
    let ty = match c.eat(TokenKind::VoidType) {
        Some(_) => Type::Primitive(PrimitiveType::Void),
        None => transform_op_type(c.expect_node(NodeKind::OpType)?)?,
    };
    c.finish()?;
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oplang_parser::{CstNode, Span};

    fn leaf(kind: TokenKind, text: &str) -> CstNode {
        CstNode::with_text(NodeKind::Token(kind), Span::zero(), text)
    }

    fn op_type(children: Vec<CstNode>) -> CstNode {
        CstNode::with_children(NodeKind::OpType, children)
    }

    #[test]
    fn test_primitive_and_class() {
        let int = op_type(vec![leaf(TokenKind::IntType, "int")]);
        let shape = op_type(vec![leaf(TokenKind::Identifier, "Shape")]);
        assert_eq!(transform_op_type(&int), Ok(Type::Primitive(PrimitiveType::Int)));
        assert_eq!(transform_op_type(&shape), Ok(Type::class("Shape")));
    }

    #[test]
    fn test_array_size_with_leading_zeros() {
        let node = op_type(vec![
            leaf(TokenKind::FloatType, "float"),
            leaf(TokenKind::LBracket, "["),
            leaf(TokenKind::IntLiteral, "002"),
            leaf(TokenKind::RBracket, "]"),
        ]);
        assert_eq!(
            transform_op_type(&node),
            Ok(Type::array(Type::Primitive(PrimitiveType::Float), 2))
        );
    }

    #[test]
    fn test_void_return_type() {
        let node = CstNode::with_children(NodeKind::ReturnType, vec![leaf(TokenKind::VoidType, "void")]);
        assert_eq!(transform_return_type(&node), Ok(Type::Primitive(PrimitiveType::Void)));
    }

    #[test]
    fn test_rejects_void_op_type() {
        let node = op_type(vec![leaf(TokenKind::VoidType, "void")]);
        let err = transform_op_type(&node).unwrap_err();
        assert_eq!(err.expected, "type");
        assert_eq!(err.found, "'void'");
    }

    #[test]
    fn test_rejects_unclosed_array_type() {
        let node = op_type(vec![
            leaf(TokenKind::IntType, "int"),
            leaf(TokenKind::LBracket, "["),
            leaf(TokenKind::IntLiteral, "3"),
        ]);
        let err = transform_op_type(&node).unwrap_err();
        assert_eq!(err.expected, "']'");
    }
}
