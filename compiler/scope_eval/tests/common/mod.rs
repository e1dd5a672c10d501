//! Shared helpers for engine tests.

#![allow(dead_code)]

use scope_diagnostic::Severity;
use scope_eval::{Engine, EngineOptions, SymbolEntry, Value};

/// Parse and build `source`, failing the test on a syntax error.
pub fn analyze(source: &str, options: EngineOptions) -> Engine {
    let mut engine = Engine::new(options);
    assert!(engine.parse(source, false), "source should parse");
    assert!(engine.build(), "build should succeed");
    engine
}

/// Every diagnostic as `(severity, message)`.
pub fn findings(engine: &Engine) -> Vec<(Severity, String)> {
    engine
        .diagnostics()
        .map(|d| (d.severity, d.message.clone()))
        .collect()
}

pub fn global<'e>(engine: &'e Engine, name: &str) -> &'e SymbolEntry {
    engine
        .find_symbol(name, None)
        .unwrap_or_else(|| panic!("{name} should be declared"))
}

pub fn number(engine: &Engine, name: &str) -> f64 {
    match global(engine, name).value {
        Value::Number(n) => n,
        ref other => panic!("{name} should hold a number, found {other:?}"),
    }
}
