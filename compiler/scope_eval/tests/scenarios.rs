// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end analysis scenarios driven through the public engine surface.

mod common;

use common::{analyze, findings, global, number};
use pretty_assertions::assert_eq;
use scope_diagnostic::Severity;
use scope_eval::{
    Engine, EngineError, EngineOptions, HostValue, QueryRange, ReservedSymbol, SymbolKind, Value,
    ValueType,
};

fn offsets(start: usize, len: usize) -> Option<QueryRange> {
    Some(QueryRange::Offsets {
        start: u32::try_from(start).unwrap(),
        end: u32::try_from(start + len).unwrap(),
    })
}

#[test]
fn test_global_read_from_function_body() {
    let options = EngineOptions::default().always_evaluate_values(true);
    let engine = analyze(
        "var x = 1; function f(a) { return a + x; } var r = f(2);",
        options,
    );
    assert_eq!(findings(&engine), vec![]);
    let r = global(&engine, "r");
    assert_eq!(r.ty, Some(ValueType::Number));
    assert_eq!(r.value, Value::Number(3.0));
}

#[test]
fn test_assignment_to_constant() {
    let engine = analyze("const c = 1; c = 2;", EngineOptions::default());
    assert_eq!(
        findings(&engine),
        vec![(Severity::Error, "Cannot change the constant c".to_string())]
    );
    let c = global(&engine, "c");
    assert_eq!(c.kind, Some(SymbolKind::Const));
    assert_eq!(c.value, Value::Number(1.0));
}

#[test]
fn test_call_to_undeclared_function() {
    let engine = analyze("f();", EngineOptions::default());
    assert_eq!(
        findings(&engine),
        vec![(Severity::Warning, "f is not found in current scope".to_string())]
    );
    assert!(engine.find_symbol("f", None).is_none());
}

#[test]
fn test_build_is_idempotent() {
    let source = "
        var a = 1;
        var a = 2;
        undefinedCall();
        function g(x, y) { return x * y; }
        g(1);
    ";
    let mut engine = Engine::new(EngineOptions::default());
    assert!(engine.parse(source, false));
    assert!(engine.build());
    let first = findings(&engine);
    assert!(engine.build());
    assert_eq!(findings(&engine), first);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_inner_block_resolves_inner_declaration() {
    let source = "let a = 1;\n{ let a = 2; a; }\n{ a; }\n";
    let engine = analyze(source, EngineOptions::default());

    let inner = engine
        .find_symbol("a", offsets(source.find("a; }").unwrap(), 1))
        .unwrap();
    assert_eq!(inner.value, Value::Number(2.0));

    let sibling = engine
        .find_symbol("a", offsets(source.rfind("a; }").unwrap(), 1))
        .unwrap();
    assert_eq!(sibling.value, Value::Number(1.0));

    let outside = engine.find_symbol("a", None).unwrap();
    assert_eq!(outside.value, Value::Number(1.0));
}

#[test]
fn test_line_query_picks_innermost_frame() {
    let source = "let a = 1;\n{\n  let a = 2;\n}\n";
    let engine = analyze(source, EngineOptions::default());
    let inner = engine
        .find_symbol("a", Some(QueryRange::Lines { start: 3, end: 3 }))
        .unwrap();
    assert_eq!(inner.value, Value::Number(2.0));
}

#[test]
fn test_redeclaration_in_same_scope_warns() {
    let engine = analyze("var x = 1; var x = 2;", EngineOptions::default());
    assert_eq!(
        findings(&engine),
        vec![(Severity::Warning, "x is already declared".to_string())]
    );
}

#[test]
fn test_redeclaration_through_global_fallback_is_info() {
    let engine = analyze(
        "var x = 1; function f() { var x = 2; }",
        EngineOptions::default(),
    );
    assert_eq!(
        findings(&engine),
        vec![(Severity::Info, "The x would be the shadow variable".to_string())]
    );
}

#[test]
fn test_wrong_argument_count() {
    let engine = analyze("function f(a, b) { } f(1);", EngineOptions::default());
    assert_eq!(
        findings(&engine),
        vec![(Severity::Warning, "f requires 2 parameters".to_string())]
    );
}

#[test]
fn test_default_and_rest_parameters() {
    let engine = analyze(
        "function f(a, b = 5, ...rest) { return b; } var r = f(1);",
        EngineOptions::default(),
    );
    assert_eq!(number(&engine, "r"), 5.0);
}

#[test]
fn test_read_materializes_property() {
    let engine = analyze("var o = null; o.k;", EngineOptions::default());
    assert_eq!(findings(&engine), vec![]);

    let k = engine.interner().get("k").unwrap();
    let o = global(&engine, "o");
    assert_eq!(o.ty, Some(ValueType::Object));
    let Value::Object(map) = &o.value else {
        panic!("o should be an object");
    };
    let property = engine.symbol_table().symbol(map[&k]);
    assert_eq!(property.kind, Some(SymbolKind::Property));
    assert_eq!(property.ty, None);
}

#[test]
fn test_materialized_property_is_written_through() {
    let engine = analyze("var o = null; o.k = 5; var v = o.k;", EngineOptions::default());
    assert_eq!(findings(&engine), vec![]);
    assert_eq!(number(&engine, "v"), 5.0);
}

#[test]
fn test_access_on_undefined() {
    let engine = analyze("var u; u.k;", EngineOptions::default());
    assert_eq!(
        findings(&engine),
        vec![(Severity::Error, "cannot access k of undefined".to_string())]
    );
}

#[test]
fn test_calling_a_number() {
    let engine = analyze("var n = 1; n();", EngineOptions::default());
    assert_eq!(
        findings(&engine),
        vec![(Severity::Error, "n is not a function".to_string())]
    );
}

#[test]
fn test_implicit_global_from_assignment() {
    let engine = analyze("function f() { y = 1; } f(); var z = y;", EngineOptions::default());
    assert_eq!(findings(&engine), vec![]);
    let y = global(&engine, "y");
    assert_eq!(y.kind, Some(SymbolKind::Var));
    assert_eq!(number(&engine, "z"), 1.0);
}

#[test]
fn test_arithmetic_on_unresolved_operand() {
    let engine = analyze("var r = q - 1;", EngineOptions::default());
    assert_eq!(
        findings(&engine),
        vec![
            (Severity::Warning, "q is undefined (binary)".to_string()),
            (
                Severity::Warning,
                "Trying to do a subtract operation on the undefined | number".to_string()
            ),
        ]
    );
}

#[test]
fn test_values_follow_coercion_rules() {
    let engine = analyze(
        "var s = \"a\" + 1; var b = 1 < 2; var e = 1 == \"1\"; var t = typeof s; var c = true ? 1 : 2;",
        EngineOptions::default(),
    );
    assert_eq!(global(&engine, "s").value, Value::String("a1".to_string()));
    assert_eq!(global(&engine, "b").value, Value::Boolean(true));
    assert_eq!(global(&engine, "e").value, Value::Boolean(true));
    assert_eq!(global(&engine, "t").value, Value::String("string".to_string()));
    assert_eq!(number(&engine, "c"), 1.0);
}

#[test]
fn test_update_and_compound_assignment() {
    let engine = analyze(
        "var i = 1; i++; var j = i++; var k = 10; k -= 4; k *= 2;",
        EngineOptions::default(),
    );
    assert_eq!(number(&engine, "i"), 3.0);
    assert_eq!(number(&engine, "j"), 2.0);
    assert_eq!(number(&engine, "k"), 12.0);
}

#[test]
fn test_reserved_symbols() {
    let mut engine = Engine::new(EngineOptions::default());
    engine.add_reserved_symbol(ReservedSymbol::function("now", HostValue::Number(5.0)));
    engine.add_reserved_symbol(ReservedSymbol::namespace(
        "config",
        vec![ReservedSymbol::value("answer", HostValue::Number(42.0))],
    ));
    assert_eq!(engine.reserved_symbols().len(), 2);

    assert!(engine.parse("var t = now(); var a = config.answer;", false));
    assert!(engine.build());
    assert_eq!(findings(&engine), vec![]);
    assert_eq!(number(&engine, "t"), 5.0);
    assert_eq!(number(&engine, "a"), 42.0);
}

#[test]
fn test_reserved_names_cannot_be_rebound() {
    let mut engine = Engine::new(EngineOptions::default());
    engine.set_reserved_symbols(vec![ReservedSymbol::function("print", HostValue::Undefined)]);
    assert!(engine.parse("var print = 1;\nprint = 2;", false));
    assert!(engine.build());
    assert_eq!(
        findings(&engine),
        vec![
            (Severity::Error, "print is a reserved as the function".to_string()),
            (
                Severity::Error,
                "Cannot assign a value to the reserved function print".to_string()
            ),
        ]
    );
}

#[test]
fn test_merged_sources_share_one_program() {
    let mut engine = Engine::new(EngineOptions::default());
    assert!(engine.parse("var a = 1;", false));
    assert!(engine.parse("var b = a;", true));
    assert!(engine.build());
    assert_eq!(findings(&engine), vec![]);
    assert_eq!(number(&engine, "b"), 1.0);

    // Parsing without merge replaces the program.
    assert!(engine.parse("var c = 2;", false));
    assert!(engine.build());
    assert!(engine.find_symbol("a", None).is_none());
    assert_eq!(number(&engine, "c"), 2.0);
}

#[test]
fn test_syntax_error_is_reported() {
    let mut engine = Engine::new(EngineOptions::default());
    assert!(!engine.parse("var = ;", false));
    let all = findings(&engine);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].0, Severity::Error);
    assert!(all[0].1.starts_with("SyntaxError: "));
    assert!(engine.has_errors());

    assert_eq!(engine.try_build(), Err(EngineError::NoProgram));
    assert!(!engine.build());

    engine.reset_diagnostics();
    assert_eq!(engine.diagnostics().count(), 0);
}

#[test]
fn test_syntax_error_is_cleared_by_next_parse() {
    let mut engine = Engine::new(EngineOptions::default());
    assert!(!engine.parse("var = ;", false));
    assert!(engine.has_errors());

    assert!(engine.parse("var a = 1;", false));
    assert!(engine.build());
    assert!(findings(&engine).is_empty());
    assert!(!engine.has_errors());
}

#[test]
fn test_failed_parse_keeps_previous_program() {
    let mut engine = Engine::new(EngineOptions::default());
    assert!(engine.parse("var a = 1;", false));
    assert!(!engine.parse("var = ;", false));

    assert!(engine.build());
    assert_eq!(number(&engine, "a"), 1.0);
    let all = findings(&engine);
    assert_eq!(all.len(), 1);
    assert!(all[0].1.starts_with("SyntaxError: "));
}

#[test]
fn test_completion_by_prefix() {
    let engine = analyze(
        "var apple = 1; var apricot = 2; var banana = 3;",
        EngineOptions::default(),
    );
    let mut names: Vec<&str> = engine
        .find_symbols_with_prefix("ap", None)
        .into_iter()
        .filter_map(|entry| engine.name_of(entry))
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["apple", "apricot"]);
}
