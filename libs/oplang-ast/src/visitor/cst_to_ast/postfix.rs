//! # Postfix Chain Resolution
//!
//! A postfix chain is a primary followed by suffix tokens kept flat as
//! siblings in the parse tree:
//!
//! ```text
//! PostfixExpr [ a  .  b  (  )  .  c  [  Expr  ] ]
//!             -> PostfixExpression(Identifier(a).b().c[...])
//! ```
//!
//! The suffix children are scanned left to right by [`Scan`]. Children that
//! start no suffix are skipped. The resulting operations are appended to the
//! converted primary; a primary that is itself a chain is spliced in so the
//! result stays flat.
//!
//! Assignment targets (`Lhs`) and call statements (`CallStmt`) hold a
//! `PostfixExpr` prefix followed by the tokens of one final suffix. They run
//! through the same scan.

use super::expressions::{transform_args, transform_expression};
use crate::ast::{Expression, Lhs, PostfixExpression, PostfixOp};
use crate::cst::ParseTree;
use crate::error::{describe, StructuralError};
use oplang_parser::{NodeKind, Span, TokenKind};

// =============================================================================
// SUFFIX SCANNER
// =============================================================================

/// Position inside the suffix currently being read.
enum Scan {
    /// Between suffixes.
    Ready,
    /// After `.`
    Dot,
    /// After `.name`; becomes a call if `(` follows.
    Member(String),
    /// After `.name (`, with the arguments once seen.
    Call(String, Option<Vec<Expression>>),
    /// After `[`
    Bracket,
    /// After `[ expression`
    Index(Expression),
}

/// Collect the postfix operations spelled by `suffixes`.
///
/// `parent` is used for the span of errors at the end of the children.
fn scan_operations<T: ParseTree>(parent: &T, suffixes: &[T]) -> Result<Vec<PostfixOp>, StructuralError> {
    let mut operations = Vec::new();
    let mut state = Scan::Ready;

    for child in suffixes {
        state = match state {
            Scan::Member(name) if child.is_token(TokenKind::LParen) => Scan::Call(name, None),
            Scan::Member(name) => {
                operations.push(PostfixOp::MemberAccess(name));
                start_suffix(child)
            }
            Scan::Ready => start_suffix(child),
            Scan::Dot if child.is_token(TokenKind::Identifier) => {
                Scan::Member(child.text().unwrap_or_default().to_string())
            }
            Scan::Dot => return Err(StructuralError::unexpected("member name", child)),
            Scan::Call(name, None) if child.kind() == NodeKind::ArgList => {
                Scan::Call(name, Some(transform_args(child)?))
            }
            Scan::Call(name, args) if child.is_token(TokenKind::RParen) => {
                operations.push(PostfixOp::method_call(name, args.unwrap_or_default()));
                Scan::Ready
            }
            Scan::Call(..) => return Err(StructuralError::unexpected("')'", child)),
            Scan::Bracket if child.is_token(TokenKind::RBracket) => {
                return Err(StructuralError::unexpected("index expression", child));
            }
            Scan::Bracket => Scan::Index(transform_expression(child)?),
            Scan::Index(index) if child.is_token(TokenKind::RBracket) => {
                operations.push(PostfixOp::index(index));
                Scan::Ready
            }
            Scan::Index(_) => return Err(StructuralError::unexpected("']'", child)),
        };
    }

    match state {
        Scan::Ready => {}
        Scan::Member(name) => operations.push(PostfixOp::MemberAccess(name)),
        Scan::Dot => return Err(StructuralError::missing("member name", parent)),
        Scan::Call(..) => return Err(StructuralError::missing("')'", parent)),
        Scan::Bracket => return Err(StructuralError::missing("index expression", parent)),
        Scan::Index(_) => return Err(StructuralError::missing("']'", parent)),
    }
    Ok(operations)
}

/// State after reading `child` between suffixes.
fn start_suffix<T: ParseTree>(child: &T) -> Scan {
    if child.is_token(TokenKind::Dot) {
        Scan::Dot
    } else if child.is_token(TokenKind::LBracket) {
        Scan::Bracket
    } else {
        Scan::Ready
    }
}

/// Convert `children[0]` as the base and scan the rest as suffixes.
fn resolve_chain<T: ParseTree>(parent: &T, children: &[T]) -> Result<Expression, StructuralError> {
    let (first, suffixes) = children
        .split_first()
        .ok_or_else(|| StructuralError::missing("expression", parent))?;
    let base = transform_expression(first)?;
    let operations = scan_operations(parent, suffixes)?;
    Ok(Expression::postfix(base, operations))
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Transform a `PostfixExpr` node.
///
/// ## Returns
///
/// The converted primary when there are no suffixes, otherwise a flat
/// `PostfixExpression`.
pub(super) fn transform_postfix<T: ParseTree>(node: &T) -> Result<Expression, StructuralError> {
    resolve_chain(node, node.children())
}

/// Resolve an `Lhs` node to an assignment target.
///
/// A bare identifier becomes [`Lhs::Id`]; anything with a suffix becomes
/// [`Lhs::Postfix`]. A target that is neither (`this`, a literal) or that
/// ends in a method call is rejected.
///
/// ## Example
///
/// ```text
/// Lhs [ x ]                              -> IdLHS(x)
/// Lhs [ PostfixExpr [ arr ]  [  0  ] ]   -> PostfixLHS(Identifier(arr)[IntLiteral(0)])
/// ```
pub(super) fn resolve_lhs<T: ParseTree>(node: &T) -> Result<Lhs, StructuralError> {
    match resolve_chain(node, node.children())? {
        Expression::Identifier(name) => Ok(Lhs::Id(name)),
        Expression::Postfix(chain) if !chain.ends_in_call() => Ok(Lhs::Postfix(chain)),
        _ => Err(StructuralError::new("assignable target", target_text(node), node.span())),
    }
}

/// Resolve a `CallStmt` node: a chain ending in a method call, then `;`.
pub(super) fn resolve_call<T: ParseTree>(node: &T) -> Result<PostfixExpression, StructuralError> {
    let children = node.children();
    let (last, chain) = children
        .split_last()
        .ok_or_else(|| StructuralError::missing("method call", node))?;
    if !last.is_token(TokenKind::Semicolon) {
        return Err(StructuralError::unexpected("';'", last));
    }

    match resolve_chain(node, chain)? {
        Expression::Postfix(call) if call.ends_in_call() => Ok(call),
        _ => Err(StructuralError::new("method call", "statement without call", span_of(chain, node))),
    }
}

/// Short description of an assignment target for error messages.
fn target_text<T: ParseTree>(node: &T) -> String {
    let mut current = node;
    while let Some(first) = current.children().first() {
        current = first;
    }
    describe(current)
}

fn span_of<T: ParseTree>(children: &[T], parent: &T) -> Span {
    match (children.first(), children.last()) {
        (Some(first), Some(last)) => first.span().merge(&last.span()),
        _ => parent.span(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
