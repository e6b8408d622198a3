//! # Literal Transformation
//!
//! Transforms literal tokens to AST expressions.
//!
//! ## Supported Literals
//!
//! - Integers: `42`, `007`
//! - Floats: `3.14`, `1.`, `1e3`, `1.5E-2`
//! - Strings: `"hello"` (escapes kept as written)
//! - Booleans: `true`, `false`
//! - Nil: `nil`

use crate::ast::Expression;
use crate::cst::ParseTree;
use crate::error::StructuralError;

// =============================================================================
// NUMBERS
// =============================================================================

/// Integer literal as `i64`.
///
/// ## Example
///
/// ```text
/// 42   -> Expression::IntLiteral(42)
/// 007  -> Expression::IntLiteral(7)
/// ```
pub(super) fn transform_int<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    node.text()
        .unwrap_or_default()
        .parse::<i64>()
        .map(Expression::IntLiteral)
        .map_err(|_| StructuralError::unexpected("integer literal", node))
}

/// Float literal as `f64`.
///
/// ## Example
///
/// ```text
/// 3.14   -> Expression::FloatLiteral(3.14)
/// 1.     -> Expression::FloatLiteral(1.0)
/// 1.5E-2 -> Expression::FloatLiteral(0.015)
/// ```
pub(super) fn transform_float<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    node.text()
        .unwrap_or_default()
        .parse::<f64>()
        .map(Expression::FloatLiteral)
        .map_err(|_| StructuralError::unexpected("float literal", node))
}

// =============================================================================
// STRING
// =============================================================================

/// String literal with its surrounding quotes removed.
pub(super) fn transform_string<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    let text = node.text().unwrap_or_default();
    let content = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| StructuralError::unexpected("string literal", node))?;
    Ok(Expression::StringLiteral(content.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================
