//! Edge cases of the source-to-AST pipeline.

use oplang_ast::batch::{generate_all, parse_all};
use oplang_ast::{parse_to_ast, AstError, Expression, Lhs, Member, Statement, Type};

fn method_statements(source: &str) -> Vec<Statement> {
    let program = parse_to_ast(source).unwrap();
    match &program.classes[0].members[0] {
        Member::Method(method) => method.body.statements.clone(),
        other => panic!("Expected method, got {other:?}"),
    }
}

#[test]
fn test_bare_this_assignment_is_rejected() {
    let err = parse_to_ast("class T { void m() { this := 1; } }").unwrap_err();
    assert!(matches!(err, AstError::Syntax(_)), "{err:?}");
}

#[test]
fn test_lhs_with_parenthesized_base() {
    let statements = method_statements("class T { void m() { (a).b := 1; } }");
    let Statement::Assignment(stmt) = &statements[0] else { panic!() };
    let Lhs::Postfix(chain) = &stmt.lhs else { panic!() };
    assert!(matches!(*chain.base, Expression::Parenthesized(_)));
}

#[test]
fn test_dangling_else_binds_inner_if() {
    let statements = method_statements("class T { void m() { if a then if b then x := 1; else x := 2; } }");
    let Statement::If(outer) = &statements[0] else { panic!() };
    assert!(outer.else_branch.is_none());
    let Statement::If(inner) = outer.then_branch.as_ref() else { panic!() };
    assert!(inner.else_branch.is_some());
}

#[test]
fn test_string_escapes_are_kept() {
    let program = parse_to_ast(r#"class T { string s := "a\"b\n"; }"#).unwrap();
    let Member::Attribute(decl) = &program.classes[0].members[0] else { panic!() };
    assert_eq!(
        decl.attributes[0].init,
        Some(Expression::StringLiteral(r#"a\"b\n"#.to_string()))
    );
}

#[test]
fn test_array_of_class_reference_parameter() {
    let program = parse_to_ast("class T { void f(Shape[4] & shapes) {} }").unwrap();
    let Member::Method(method) = &program.classes[0].members[0] else { panic!() };
    assert_eq!(
        method.params[0].param_type,
        Type::array(Type::class("Shape"), 4).into_reference()
    );
}

#[test]
fn test_concat_and_comparison() {
    let program = parse_to_ast(r#"class T { boolean b := "a" ^ "b" == "ab"; }"#).unwrap();
    assert_eq!(
        program.to_string(),
        "Program([ClassDecl(T, [AttributeDecl(PrimitiveType(boolean), [Attribute(b = \
         BinaryOp(BinaryOp(StringLiteral(\"a\"), ^, StringLiteral(\"b\")), ==, StringLiteral(\"ab\")))])])])"
    );
}

#[test]
fn test_chained_comparison_is_a_syntax_error() {
    assert!(matches!(
        parse_to_ast("class T { boolean b := 1 < 2 < 3; }"),
        Err(AstError::Syntax(_))
    ));
}

#[test]
fn test_unterminated_string_diagnostic() {
    let err = parse_to_ast("class T { string s := \"abc\n; }").unwrap_err();
    let AstError::Syntax(diagnostics) = err else { panic!() };
    assert!(diagnostics.iter().any(|d| d.hint.is_some()));
}

#[test]
fn test_oversized_integer_is_a_syntax_error() {
    let err = parse_to_ast("class V { void m() { z := 9223372036854775808; } }").unwrap_err();
    let AstError::Syntax(diagnostics) = err else { panic!("{err:?}") };
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("out of range"));

    let program = parse_to_ast("class V { int z := 9223372036854775807; }").unwrap();
    let Member::Attribute(decl) = &program.classes[0].members[0] else { panic!() };
    assert_eq!(decl.attributes[0].init, Some(Expression::IntLiteral(i64::MAX)));
}

#[test]
fn test_deep_parentheses_through_pipeline() {
    let depth = 10_000;
    let source = format!("class T {{ int x := {}1{}; }}", "(".repeat(depth), ")".repeat(depth));
    let program = parse_to_ast(&source).unwrap();
    let Member::Attribute(decl) = &program.classes[0].members[0] else { panic!() };
    let mut current = decl.attributes[0].init.as_ref().unwrap();
    let mut levels = 0;
    while let Expression::Parenthesized(inner) = current {
        levels += 1;
        current = &**inner;
    }
    assert_eq!(levels, depth);
    assert_eq!(*current, Expression::IntLiteral(1));
}

#[test]
fn test_deep_blocks_through_pipeline() {
    let depth = 10_000;
    let source = format!("class T {{ void m() {{ {}{} }} }}", "{".repeat(depth), "}".repeat(depth));
    let program = parse_to_ast(&source).unwrap();
    let Member::Method(method) = &program.classes[0].members[0] else { panic!() };
    let mut block = &method.body;
    let mut levels = 0;
    while let Some(Statement::Block(inner)) = block.statements.first() {
        levels += 1;
        block = inner;
    }
    assert_eq!(levels, depth);
}

#[test]
fn test_batch_mixes_success_and_failure() {
    let sources = ["class A { int x; }", "class B { int ; }", "class C extends A {}"];
    let results = parse_all(&sources);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(AstError::Syntax(_))));
    assert_eq!(results[2].as_ref().unwrap().classes[0].superclass.as_deref(), Some("A"));
}

#[test]
fn test_generate_all_on_parser_trees() {
    let roots: Vec<_> = (0..16)
        .map(|i| oplang_parser::parse(&format!("class K{i} {{ int v := {i}; }}")).root)
        .collect();
    for (i, result) in generate_all(&roots).into_iter().enumerate() {
        let program = result.unwrap();
        assert_eq!(program.classes[0].name, format!("K{i}"));
    }
}
