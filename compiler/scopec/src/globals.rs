//! Names every script can use without declaring them.

use scope_eval::{HostValue, ReservedSymbol, ValueType};

fn number() -> HostValue {
    HostValue::Number(0.0)
}

fn string() -> HostValue {
    HostValue::String(String::new())
}

fn functions(names: &[&str], returns: fn() -> HostValue) -> Vec<ReservedSymbol> {
    names
        .iter()
        .map(|name| ReservedSymbol::function(*name, returns()))
        .collect()
}

/// The catalogue the CLI registers before analysis.
pub fn default_reserved() -> Vec<ReservedSymbol> {
    let mut math = functions(
        &[
            "abs", "ceil", "floor", "round", "trunc", "sqrt", "pow", "min", "max", "random",
            "sin", "cos", "tan", "log", "exp",
        ],
        number,
    );
    math.push(ReservedSymbol::value("PI", HostValue::Number(std::f64::consts::PI)));
    math.push(ReservedSymbol::value("E", HostValue::Number(std::f64::consts::E)));

    let console = functions(&["log", "info", "warn", "error", "debug"], || {
        HostValue::Undefined
    });

    let json = vec![
        ReservedSymbol::function("stringify", string()),
        ReservedSymbol::declared("parse", ValueType::Function),
    ];

    let mut reserved = vec![
        ReservedSymbol::namespace("Math", math),
        ReservedSymbol::namespace("console", console),
        ReservedSymbol::namespace("JSON", json),
        ReservedSymbol::value("NaN", HostValue::Number(f64::NAN)),
        ReservedSymbol::value("Infinity", HostValue::Number(f64::INFINITY)),
        ReservedSymbol::value("undefined", HostValue::Undefined),
    ];
    reserved.extend(functions(&["parseInt", "parseFloat", "Number"], number));
    reserved.extend(functions(&["String"], string));
    reserved.push(ReservedSymbol::function("isNaN", HostValue::Bool(false)));
    reserved.push(ReservedSymbol::function("isFinite", HostValue::Bool(true)));
    reserved.push(ReservedSymbol::declared("setTimeout", ValueType::Function));
    reserved
}
