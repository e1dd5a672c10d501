//! Automatic semicolon insertion.

use scope_ir::NodeKind;

use super::{parse_err, parse_ok};

#[test]
fn test_newline_terminates_statement() {
    let parsed = parse_ok("var a = 1\nvar b = 2\na + b");
    assert_eq!(parsed.body().len(), 3);
}

#[test]
fn test_closing_brace_terminates_statement() {
    let parsed = parse_ok("function f() { return 1 }");
    assert_eq!(parsed.body().len(), 1);
}

#[test]
fn test_return_argument_must_share_line() {
    let parsed = parse_ok("function f() {\n  return\n  42\n}");
    let NodeKind::FunctionDeclaration(function) = parsed.kind(parsed.body()[0]) else {
        panic!("expected function");
    };
    let NodeKind::BlockStatement { body } = parsed.kind(function.body) else {
        panic!("expected block");
    };
    assert_eq!(body.len(), 2);
    assert!(matches!(
        parsed.kind(body[0]),
        NodeKind::ReturnStatement { argument: None }
    ));
}

#[test]
fn test_postfix_update_does_not_cross_lines() {
    let parsed = parse_ok("a\n++b");
    assert_eq!(parsed.body().len(), 2);
    assert!(matches!(
        parsed.kind(parsed.expression(1)),
        NodeKind::UpdateExpression { prefix: true, .. }
    ));
}

#[test]
fn test_same_line_statements_need_semicolon() {
    let error = parse_err("var a = 1 var b = 2");
    assert_eq!(error.message, "Unexpected token 'var'");
}
