//! Canonical text form of the AST.
//!
//! Every node prints as its label followed by its fields in declaration
//! order. Two trees are equal exactly when their printed forms are equal,
//! which makes the rendering convenient for golden tests.

use crate::ast::*;
use std::fmt::{self, Display, Formatter};

/// Write `items` separated by `", "`.
fn join<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// `name` or `name = init`
fn named_init(f: &mut Formatter<'_>, label: &str, name: &str, init: &Option<Expression>) -> fmt::Result {
    match init {
        Some(value) => write!(f, "{}({} = {})", label, name, value),
        None => write!(f, "{}({})", label, name),
    }
}

/// Shortest float text that reads back to the same value.
///
/// Magnitudes from `1e-4` up to `1e16` print positionally with a fractional
/// part (`5.0`, `0.015`); anything outside prints in exponent form with a
/// signed, two-digit exponent (`1e+20`, `1.5e-05`).
fn float_text(value: f64) -> String {
    let magnitude = value.abs();
    if !value.is_finite() || value == 0.0 || (1e-4..1e16).contains(&magnitude) {
        let text = value.to_string();
        return if !value.is_finite() || text.contains('.') {
            text
        } else {
            format!("{}.0", text)
        };
    }

    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

// =============================================================================
// PROGRAM & CLASSES
// =============================================================================

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Program([")?;
        join(f, &self.classes)?;
        f.write_str("])")
    }
}

impl Display for ClassDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ClassDecl({}, ", self.name)?;
        if let Some(superclass) = &self.superclass {
            write!(f, "extends {}, ", superclass)?;
        }
        f.write_str("[")?;
        join(f, &self.members)?;
        f.write_str("])")
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(decl) => decl.fmt(f),
            Self::Constructor(decl) => decl.fmt(f),
            Self::Destructor(decl) => decl.fmt(f),
            Self::Method(decl) => decl.fmt(f),
        }
    }
}

impl Display for AttributeDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("AttributeDecl(")?;
        if self.is_static {
            f.write_str("static ")?;
        }
        if self.is_final {
            f.write_str("final ")?;
        }
        write!(f, "{}, [", self.attr_type)?;
        join(f, &self.attributes)?;
        f.write_str("])")
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        named_init(f, "Attribute", &self.name, &self.init)
    }
}

impl Display for ConstructorDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConstructorDecl({}([", self.name)?;
        join(f, &self.params)?;
        write!(f, "]), {})", self.body)
    }
}

impl Display for DestructorDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DestructorDecl(~{}(), {})", self.name, self.body)
    }
}

impl Display for MethodDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("MethodDecl(")?;
        if self.is_static {
            f.write_str("static ")?;
        }
        write!(f, "{} {}([", self.return_type, self.name)?;
        join(f, &self.params)?;
        write!(f, "]), {})", self.body)
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({} {})", self.param_type, self.name)
    }
}

// =============================================================================
// TYPES
// =============================================================================

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "PrimitiveType({})", p.as_str()),
            Self::Class(c) => write!(f, "ClassType({})", c.name),
            Self::Array(a) => write!(f, "ArrayType({}[{}])", a.element, a.size),
            Self::Reference(r) => write!(f, "ReferenceType({} &)", r.referenced),
        }
    }
}

// =============================================================================
// STATEMENTS
// =============================================================================

impl Display for VariableDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("VariableDecl(")?;
        if self.is_final {
            f.write_str("final ")?;
        }
        write!(f, "{}, [", self.var_type)?;
        join(f, &self.variables)?;
        f.write_str("])")
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        named_init(f, "Variable", &self.name, &self.init)
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("BlockStatement(")?;
        if !self.var_decls.is_empty() {
            f.write_str("vars=[")?;
            join(f, &self.var_decls)?;
            f.write_str("], ")?;
        }
        f.write_str("stmts=[")?;
        join(f, &self.statements)?;
        f.write_str("])")
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(block) => block.fmt(f),
            Self::Assignment(s) => write!(f, "AssignmentStatement({} := {})", s.lhs, s.rhs),
            Self::If(s) => {
                write!(f, "IfStatement(if {} then {}", s.condition, s.then_branch)?;
                if let Some(else_branch) = &s.else_branch {
                    write!(f, ", else {}", else_branch)?;
                }
                f.write_str(")")
            }
            Self::For(s) => write!(
                f,
                "ForStatement(for {} := {} {} {} do {})",
                s.variable,
                s.start,
                s.direction.as_str(),
                s.end,
                s.body
            ),
            Self::Break => f.write_str("BreakStatement()"),
            Self::Continue => f.write_str("ContinueStatement()"),
            Self::Return(s) => match &s.value {
                Some(value) => write!(f, "ReturnStatement(return {})", value),
                None => f.write_str("ReturnStatement(return)"),
            },
            Self::MethodInvocation(s) => write!(f, "MethodInvocationStatement({})", s.call),
        }
    }
}

impl Display for Lhs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(name) => write!(f, "IdLHS({})", name),
            Self::Postfix(chain) => write!(f, "PostfixLHS({})", chain),
        }
    }
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary(b) => write!(f, "BinaryOp({}, {}, {})", b.left, b.operator.as_str(), b.right),
            Self::Unary(u) => write!(f, "UnaryOp({}, {})", u.operator.as_str(), u.operand),
            Self::Postfix(chain) => chain.fmt(f),
            Self::Identifier(name) => write!(f, "Identifier({})", name),
            Self::This => f.write_str("ThisExpression(this)"),
            Self::ObjectCreation(o) => {
                write!(f, "ObjectCreation(new {}(", o.class_name)?;
                join(f, &o.args)?;
                f.write_str("))")
            }
            Self::Parenthesized(inner) => write!(f, "ParenthesizedExpression({})", inner),
            Self::ArrayLiteral(elements) => {
                f.write_str("ArrayLiteral({")?;
                join(f, elements)?;
                f.write_str("})")
            }
            Self::IntLiteral(v) => write!(f, "IntLiteral({})", v),
            Self::FloatLiteral(v) => write!(f, "FloatLiteral({})", float_text(*v)),
            Self::StringLiteral(s) => write!(f, "StringLiteral(\"{}\")", s),
            Self::BoolLiteral(v) => write!(f, "BoolLiteral({})", v),
            Self::NilLiteral => f.write_str("NilLiteral(nil)"),
        }
    }
}

impl Display for PostfixExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PostfixExpression({}", self.base)?;
        for op in &self.operations {
            write!(f, "{}", op)?;
        }
        f.write_str(")")
    }
}

impl Display for PostfixOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MemberAccess(name) => write!(f, ".{}", name),
            Self::MethodCall { name, args } => {
                write!(f, ".{}(", name)?;
                join(f, args)?;
                f.write_str(")")
            }
            Self::ArrayAccess(index) => write!(f, "[{}]", index),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> Type {
        Type::Primitive(PrimitiveType::Int)
    }

    #[test]
    fn test_attribute_decl_rendering() {
        let decl = AttributeDecl {
            is_static: true,
            is_final: true,
            attr_type: int(),
            attributes: vec![Attribute {
                name: "MAX_SIZE".into(),
                init: Some(Expression::IntLiteral(100)),
            }],
        };
        assert_eq!(
            decl.to_string(),
            "AttributeDecl(static final PrimitiveType(int), [Attribute(MAX_SIZE = IntLiteral(100))])"
        );
    }

    #[test]
    fn test_type_rendering() {
        assert_eq!(
            Type::array(Type::class("ID"), 3).into_reference().to_string(),
            "ReferenceType(ArrayType(ClassType(ID)[3]) &)"
        );
    }

    #[test]
    fn test_block_rendering_omits_empty_vars() {
        assert_eq!(BlockStatement::default().to_string(), "BlockStatement(stmts=[])");
        let block = BlockStatement {
            var_decls: vec![VariableDecl {
                is_final: false,
                var_type: int(),
                variables: vec![Variable {
                    name: "sum".into(),
                    init: Some(Expression::IntLiteral(0)),
                }],
            }],
            statements: vec![Statement::Break],
        };
        assert_eq!(
            block.to_string(),
            "BlockStatement(vars=[VariableDecl(PrimitiveType(int), [Variable(sum = IntLiteral(0))])], stmts=[BreakStatement()])"
        );
    }

    #[test]
    fn test_if_rendering() {
        let stmt = Statement::If(IfStatement {
            condition: Expression::binary(Expression::identifier("x"), BinaryOperator::Gt, Expression::IntLiteral(0)),
            then_branch: Box::new(Statement::Return(ReturnStatement {
                value: Some(Expression::identifier("x")),
            })),
            else_branch: Some(Box::new(Statement::Return(ReturnStatement { value: None }))),
        });
        assert_eq!(
            stmt.to_string(),
            "IfStatement(if BinaryOp(Identifier(x), >, IntLiteral(0)) then ReturnStatement(return Identifier(x)), else ReturnStatement(return))"
        );
    }

    #[test]
    fn test_float_keeps_fraction() {
        assert_eq!(Expression::FloatLiteral(5.0).to_string(), "FloatLiteral(5.0)");
        assert_eq!(Expression::FloatLiteral(3.14).to_string(), "FloatLiteral(3.14)");
        assert_eq!(Expression::FloatLiteral(0.015).to_string(), "FloatLiteral(0.015)");
    }

    #[test]
    fn test_float_exponent_form() {
        assert_eq!(Expression::FloatLiteral(1e20).to_string(), "FloatLiteral(1e+20)");
        assert_eq!(Expression::FloatLiteral(1.5e-5).to_string(), "FloatLiteral(1.5e-05)");
        assert_eq!(Expression::FloatLiteral(2.5e300).to_string(), "FloatLiteral(2.5e+300)");
        assert_eq!(Expression::FloatLiteral(1e15).to_string(), "FloatLiteral(1000000000000000.0)");
        assert_eq!(Expression::FloatLiteral(0.0001).to_string(), "FloatLiteral(0.0001)");
        assert_eq!(Expression::FloatLiteral(0.0).to_string(), "FloatLiteral(0.0)");
    }

    #[test]
    fn test_leaf_rendering() {
        let cases = [
            (Expression::This, "ThisExpression(this)"),
            (Expression::NilLiteral, "NilLiteral(nil)"),
            (Expression::BoolLiteral(false), "BoolLiteral(false)"),
            (Expression::StringLiteral("s".into()), "StringLiteral(\"s\")"),
            (
                Expression::ArrayLiteral(vec![Expression::IntLiteral(1), Expression::IntLiteral(2)]),
                "ArrayLiteral({IntLiteral(1), IntLiteral(2)})",
            ),
            (
                Expression::Parenthesized(Box::new(Expression::unary(UnaryOperator::Not, Expression::identifier("a")))),
                "ParenthesizedExpression(UnaryOp(!, Identifier(a)))",
            ),
        ];
        for (expr, expected) in cases {
            assert_eq!(expr.to_string(), expected);
        }
    }

    #[test]
    fn test_chain_rendering() {
        let chain = PostfixExpression::new(
            Expression::identifier("a"),
            vec![
                PostfixOp::method_call("b", vec![]),
                PostfixOp::member("c"),
                PostfixOp::method_call("d", vec![Expression::IntLiteral(1), Expression::IntLiteral(2)]),
                PostfixOp::index(Expression::IntLiteral(3)),
            ],
        );
        assert_eq!(
            chain.to_string(),
            "PostfixExpression(Identifier(a).b().c.d(IntLiteral(1), IntLiteral(2))[IntLiteral(3)])"
        );
        assert_eq!(Lhs::Postfix(chain).to_string().get(..11), Some("PostfixLHS("));
    }
}
