use super::*;
use crate::{LineCol, StringInterner};

fn loc(start: u32, end: u32) -> Location {
    Location::new(LineCol::new(1, start), LineCol::new(1, end), Span::new(start, end))
}

#[test]
fn test_alloc_and_lookup() {
    let mut interner = StringInterner::new();
    let mut ast = Ast::new();
    let name = interner.intern("total");
    let id = ast.alloc(NodeKind::Identifier { name }, loc(0, 5));
    assert_eq!(ast.len(), 1);
    assert_eq!(ast.identifier_name(id), Some(name));
    assert_eq!(ast.location(id).span, Span::new(0, 5));
    assert_eq!(ast.kind(id).type_name(), "Identifier");
}

#[test]
fn test_identifier_name_of_other_kind() {
    let mut ast = Ast::new();
    let id = ast.alloc(NodeKind::Literal(Literal::Null), loc(0, 4));
    assert_eq!(ast.identifier_name(id), None);
}

#[test]
fn test_merge_programs_appends_statements() {
    let mut ast = Ast::new();
    let a = ast.alloc(NodeKind::EmptyStatement, loc(0, 1));
    let first = ast.alloc(NodeKind::Program { body: vec![a] }, loc(0, 1));
    let b = ast.alloc(NodeKind::DebuggerStatement, loc(0, 9));
    let second = ast.alloc(NodeKind::Program { body: vec![b] }, loc(0, 9));

    assert!(ast.merge_programs(first, second));
    assert_eq!(ast.kind(first), &NodeKind::Program { body: vec![a, b] });
    assert_eq!(ast.location(first).span, Span::new(0, 9));
}

#[test]
fn test_merge_rejects_non_program() {
    let mut ast = Ast::new();
    let stmt = ast.alloc(NodeKind::EmptyStatement, loc(0, 1));
    let program = ast.alloc(NodeKind::Program { body: vec![] }, loc(0, 0));
    assert!(!ast.merge_programs(stmt, program));
    assert!(!ast.merge_programs(program, stmt));
}

#[test]
fn test_operator_spelling() {
    assert_eq!(BinaryOp::StrictNotEq.as_symbol(), "!==");
    assert_eq!(AssignOp::DivAssign.binary(), Some(BinaryOp::Div));
    assert_eq!(AssignOp::Assign.binary(), None);
    assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
    assert!(BinaryOp::Exp.is_right_associative());
    assert!(LogicalOp::And.precedence() > LogicalOp::Or.precedence());
}
