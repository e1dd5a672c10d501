// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Native methods reached through member access.

mod common;

use common::{analyze, findings, global, number};
use pretty_assertions::assert_eq;
use scope_diagnostic::Severity;
use scope_eval::{
    Engine, EngineOptions, HostValue, NativeCall, NativeError, NativeMethod, Value, ValueType,
};

fn text(engine: &Engine, name: &str) -> String {
    match &global(engine, name).value {
        Value::String(s) => s.clone(),
        other => panic!("{name} should hold a string, found {other:?}"),
    }
}

#[test]
fn test_push_writes_back_to_the_receiver() {
    let engine = analyze(
        "var xs = [1, 2]; xs.push(3); var n = xs.length;",
        EngineOptions::default(),
    );
    assert_eq!(findings(&engine), vec![]);
    assert_eq!(number(&engine, "n"), 3.0);
}

#[test]
fn test_pop_returns_the_last_item() {
    let engine = analyze(
        "var xs = [1, 2]; var last = xs.pop(); var n = xs.length;",
        EngineOptions::default(),
    );
    assert_eq!(number(&engine, "last"), 2.0);
    assert_eq!(number(&engine, "n"), 1.0);
}

#[test]
fn test_map_calls_back_into_analyzed_function() {
    let engine = analyze(
        "var ys = [1, 2].map(function (v) { return v * 10; }); var y = ys[1];",
        EngineOptions::default(),
    );
    assert_eq!(findings(&engine), vec![]);
    assert_eq!(global(&engine, "ys").ty, Some(ValueType::Array));
    assert_eq!(number(&engine, "y"), 20.0);
}

#[test]
fn test_callback_arity_is_checked_on_request() {
    let source = "var ys = [1, 2].map(function (v) { return v; });";

    let quiet = analyze(source, EngineOptions::default());
    assert_eq!(findings(&quiet), vec![]);

    let strict = analyze(source, EngineOptions::default().check_native_arity(true));
    assert_eq!(
        findings(&strict),
        vec![(
            Severity::Warning,
            "function requires 1 but given 2 (callback call)".to_string()
        )]
    );
}

#[test]
fn test_native_failure_becomes_a_warning() {
    let engine = analyze("var r = [1].map(5);", EngineOptions::default());
    assert_eq!(
        findings(&engine),
        vec![(Severity::Warning, "map expects a function".to_string())]
    );
}

#[test]
fn test_string_methods_and_length() {
    let engine = analyze(
        "var s = \"ab\".toUpperCase(); var n = s.length; var c = s[1];",
        EngineOptions::default(),
    );
    assert_eq!(text(&engine, "s"), "AB");
    assert_eq!(number(&engine, "n"), 2.0);
    assert_eq!(text(&engine, "c"), "B");
}

#[test]
fn test_number_methods() {
    let engine = analyze(
        "var pi = 3.14159; var t = pi.toFixed(2);",
        EngineOptions::default(),
    );
    assert_eq!(text(&engine, "t"), "3.14");
}

#[test]
fn test_function_length_and_name() {
    let engine = analyze(
        "function f(a, b) { } var l = f.length; var m = f.name;",
        EngineOptions::default(),
    );
    assert_eq!(findings(&engine), vec![]);
    assert_eq!(number(&engine, "l"), 2.0);
    assert_eq!(text(&engine, "m"), "f");
}

#[test]
fn test_unknown_property_on_a_number() {
    let engine = analyze("var n = 1; n.foo;", EngineOptions::default());
    assert_eq!(
        findings(&engine),
        vec![(
            Severity::Error,
            "cannot create property foo on the number".to_string()
        )]
    );
}

fn shout(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let text = call.receiver.as_str().ok_or(NativeError::WrongArgument {
        method: "shout",
        expected: "a string receiver",
    })?;
    Ok(format!("{text}!").into())
}

#[test]
fn test_registered_native_is_reachable() {
    let mut engine = Engine::new(EngineOptions::default());
    engine
        .natives_mut()
        .register(ValueType::String, "shout", NativeMethod::pure(0, shout));
    assert!(engine.parse("var s = \"hi\".shout();", false));
    assert!(engine.build());
    assert_eq!(findings(&engine), vec![]);
    assert_eq!(text(&engine, "s"), "hi!");
}
