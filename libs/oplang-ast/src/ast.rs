//! # AST Node Model
//!
//! Typed, immutable OPLang syntax tree. Every node owns its children; there is
//! no sharing and no cycles. Structural equality comes from `PartialEq`, the
//! canonical text form from `Display` (see `printer`).
//!
//! ## Example
//!
//! ```rust
//! use oplang_ast::ast::{Expression, PostfixExpression, PostfixOp};
//!
//! let chain = PostfixExpression::new(
//!     Expression::identifier("shape"),
//!     vec![PostfixOp::method_call("area", vec![])],
//! );
//! assert_eq!(chain.to_string(), "PostfixExpression(Identifier(shape).area())");
//! ```

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use serde::{Deserialize, Serialize};

// =============================================================================
// PROGRAM & CLASSES
// =============================================================================

/// Root of the tree: every class in the source, in order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub classes: Vec<ClassDecl>,
}

/// `class Name extends Super { members }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub superclass: Option<String>,
    pub members: Vec<Member>,
}

/// Anything declared directly inside a class body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Attribute(AttributeDecl),
    Constructor(ConstructorDecl),
    Destructor(DestructorDecl),
    Method(MethodDecl),
}

/// `static final int a, b := 1;`. All attributes share `attr_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDecl {
    pub is_static: bool,
    pub is_final: bool,
    pub attr_type: Type,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub init: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestructorDecl {
    pub name: String,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub is_static: bool,
    pub return_type: Type,
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub param_type: Type,
    pub name: String,
}

// =============================================================================
// TYPES
// =============================================================================

/// A declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(ArrayType),
    Reference(ReferenceType),
}

impl Type {
    /// Class type by name.
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(ClassType { name: name.into() })
    }

    /// Fixed-size array of `element`.
    pub fn array(element: Type, size: u64) -> Self {
        Self::Array(ArrayType {
            element: Box::new(element),
            size,
        })
    }

    /// Wrap in a reference.
    ///
    /// Idempotent: a type that is already a reference is returned unchanged,
    /// so references never nest.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use oplang_ast::ast::{PrimitiveType, Type};
    ///
    /// let once = Type::Primitive(PrimitiveType::Int).into_reference();
    /// assert_eq!(once.clone().into_reference(), once);
    /// ```
    pub fn into_reference(self) -> Self {
        match self {
            Self::Reference(_) => self,
            other => Self::Reference(ReferenceType {
                referenced: Box::new(other),
            }),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Int,
    Float,
    Boolean,
    String,
    Void,
}

impl PrimitiveType {
    /// Keyword spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Void => "void",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassType {
    pub name: String,
}

/// `element[size]`. The size is not bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrayType {
    pub element: Box<Type>,
    pub size: u64,
}

/// `T &`. Build through [`Type::into_reference`] to keep it un-nested.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceType {
    pub referenced: Box<Type>,
}

// =============================================================================
// STATEMENTS
// =============================================================================

/// Local declaration inside a block: `final int a := 1, b;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub is_final: bool,
    pub var_type: Type,
    pub variables: Vec<Variable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub init: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Block(BlockStatement),
    Assignment(AssignmentStatement),
    If(IfStatement),
    For(ForStatement),
    Break,
    Continue,
    Return(ReturnStatement),
    MethodInvocation(MethodInvocationStatement),
}

/// `{ ... }` with every declaration ahead of every statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockStatement {
    pub var_decls: Vec<VariableDecl>,
    pub statements: Vec<Statement>,
}

/// Blocks nest without bound, so the nested statements are released on a
/// stack grown on demand.
impl Drop for BlockStatement {
    fn drop(&mut self) {
        let statements = std::mem::take(&mut self.statements);
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, move || {
            drop(statements)
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStatement {
    pub lhs: Lhs,
    pub rhs: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStatement {
    pub variable: String,
    pub start: Expression,
    pub direction: ForDirection,
    pub end: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForDirection {
    To,
    Downto,
}

impl ForDirection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::To => "to",
            Self::Downto => "downto",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
}

/// `obj.method(args);`. The chain always ends in a method call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodInvocationStatement {
    pub call: PostfixExpression,
}

/// Assignment target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Lhs {
    /// Bare name: `x := ...`
    Id(String),
    /// Member or element: `this.x := ...`, `arr[0] := ...`
    Postfix(PostfixExpression),
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Postfix(PostfixExpression),
    Identifier(String),
    This,
    ObjectCreation(ObjectCreation),
    Parenthesized(Box<Expression>),
    ArrayLiteral(Vec<Expression>),
    IntLiteral(i64),
    FloatLiteral(f64),
    /// Text between the quotes, escapes left as written.
    StringLiteral(String),
    BoolLiteral(bool),
    NilLiteral,
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Self::Binary(BinaryOp {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    pub fn unary(operator: UnaryOperator, operand: Expression) -> Self {
        Self::Unary(UnaryOp {
            operator,
            operand: Box::new(operand),
        })
    }

    /// Postfix chain over `base`; returns `base` itself when `operations` is
    /// empty.
    pub fn postfix(base: Expression, operations: Vec<PostfixOp>) -> Self {
        if operations.is_empty() {
            base
        } else {
            Self::Postfix(PostfixExpression::new(base, operations))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOp {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryOp {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    /// `\`
    IntDiv,
    Mod,
    /// `^`
    Concat,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOperator {
    /// Look up an operator by its source spelling.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "\\" => Self::IntDiv,
            "%" => Self::Mod,
            "^" => Self::Concat,
            "&&" => Self::And,
            "||" => Self::Or,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            _ => return None,
        };
        Some(op)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "\\",
            Self::Mod => "%",
            Self::Concat => "^",
            Self::And => "&&",
            Self::Or => "||",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Neg,
    Pos,
    Not,
}

impl UnaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Self::Neg),
            "+" => Some(Self::Pos),
            "!" => Some(Self::Not),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Pos => "+",
            Self::Not => "!",
        }
    }
}

/// A base expression followed by member accesses, method calls and
/// indexing, applied left to right.
///
/// `base` is never itself a `PostfixExpression`: [`PostfixExpression::new`]
/// splices a chained base into one flat operation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostfixExpression {
    pub base: Box<Expression>,
    pub operations: Vec<PostfixOp>,
}

impl PostfixExpression {
    /// Build a flat chain.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use oplang_ast::ast::{Expression, PostfixExpression, PostfixOp};
    ///
    /// let inner = PostfixExpression::new(Expression::identifier("a"), vec![PostfixOp::member("b")]);
    /// let outer = PostfixExpression::new(Expression::Postfix(inner), vec![PostfixOp::member("c")]);
    /// assert_eq!(*outer.base, Expression::identifier("a"));
    /// assert_eq!(outer.operations.len(), 2);
    /// ```
    pub fn new(base: Expression, operations: Vec<PostfixOp>) -> Self {
        match base {
            Expression::Postfix(mut inner) => {
                inner.operations.extend(operations);
                inner
            }
            base => Self {
                base: Box::new(base),
                operations,
            },
        }
    }

    /// True when the last operation is a method call.
    pub fn ends_in_call(&self) -> bool {
        matches!(self.operations.last(), Some(PostfixOp::MethodCall { .. }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PostfixOp {
    /// `.name`
    MemberAccess(String),
    /// `.name(args)`
    MethodCall { name: String, args: Vec<Expression> },
    /// `[index]`
    ArrayAccess(Box<Expression>),
}

impl PostfixOp {
    pub fn member(name: impl Into<String>) -> Self {
        Self::MemberAccess(name.into())
    }

    pub fn method_call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self::MethodCall {
            name: name.into(),
            args,
        }
    }

    pub fn index(index: Expression) -> Self {
        Self::ArrayAccess(Box::new(index))
    }
}

/// `new ClassName(args)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCreation {
    pub class_name: String,
    pub args: Vec<Expression>,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_never_nests() {
        let ty = Type::array(Type::class("ID"), 3).into_reference().into_reference();
        match ty {
            Type::Reference(ReferenceType { referenced }) => assert!(!referenced.is_reference()),
            other => panic!("expected reference, got {other:?}"),
        }
    }

    #[test]
    fn test_postfix_with_no_operations_returns_base() {
        let expr = Expression::postfix(Expression::This, vec![]);
        assert_eq!(expr, Expression::This);
    }

    #[test]
    fn test_postfix_new_flattens_nested_base() {
        let inner = PostfixExpression::new(
            Expression::identifier("a"),
            vec![PostfixOp::method_call("b", vec![])],
        );
        let outer = PostfixExpression::new(
            Expression::Postfix(inner),
            vec![PostfixOp::index(Expression::IntLiteral(3))],
        );
        assert_eq!(*outer.base, Expression::identifier("a"));
        assert_eq!(
            outer.operations,
            vec![
                PostfixOp::method_call("b", vec![]),
                PostfixOp::index(Expression::IntLiteral(3))
            ]
        );
    }

    #[test]
    fn test_ends_in_call() {
        let call = PostfixExpression::new(Expression::identifier("io"), vec![PostfixOp::method_call("write", vec![])]);
        let field = PostfixExpression::new(Expression::This, vec![PostfixOp::member("x")]);
        assert!(call.ends_in_call());
        assert!(!field.ends_in_call());
    }

    #[test]
    fn test_drop_deeply_nested_blocks() {
        let mut block = BlockStatement::default();
        for _ in 0..100_000 {
            block = BlockStatement {
                var_decls: Vec::new(),
                statements: vec![Statement::Block(block)],
            };
        }
        drop(block);
    }

    #[test]
    fn test_operator_symbols() {
        for symbol in ["+", "-", "*", "/", "\\", "%", "^", "&&", "||", "==", "!=", "<", "<=", ">", ">="] {
            let op = BinaryOperator::from_symbol(symbol).unwrap_or_else(|| panic!("{symbol}"));
            assert_eq!(op.as_str(), symbol);
        }
        assert_eq!(UnaryOperator::from_symbol("!"), Some(UnaryOperator::Not));
        assert_eq!(UnaryOperator::from_symbol("~"), None);
    }
}
