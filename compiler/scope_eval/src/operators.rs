//! Coercion rules of the analyzed language.
//!
//! Operators are folded on [`HostValue`]s so the evaluator and the native
//! built-ins share one set of conversions. Aggregates and callbacks only
//! take part through their string form.

use std::cmp::Ordering;

use scope_ir::{BinaryOp, UnaryOp};

use crate::host::HostValue;

pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

pub fn to_number(value: &HostValue) -> f64 {
    match value {
        HostValue::Undefined | HostValue::Callback(_) | HostValue::Object(_) => f64::NAN,
        HostValue::Null => 0.0,
        HostValue::Bool(b) => f64::from(u8::from(*b)),
        HostValue::Number(n) => *n,
        HostValue::String(s) => string_to_number(s),
        HostValue::Array(_) => string_to_number(&to_js_string(value)),
    }
}

fn string_to_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    if text
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

pub fn to_boolean(value: &HostValue) -> bool {
    match value {
        HostValue::Undefined | HostValue::Null => false,
        HostValue::Bool(b) => *b,
        HostValue::Number(n) => *n != 0.0 && !n.is_nan(),
        HostValue::String(s) => !s.is_empty(),
        HostValue::Array(_) | HostValue::Object(_) | HostValue::Callback(_) => true,
    }
}

pub fn to_js_string(value: &HostValue) -> String {
    match value {
        HostValue::Undefined => "undefined".to_string(),
        HostValue::Null => "null".to_string(),
        HostValue::Bool(b) => b.to_string(),
        HostValue::Number(n) => number_to_string(*n),
        HostValue::String(s) => s.clone(),
        HostValue::Array(items) => items
            .iter()
            .map(|item| match item {
                HostValue::Undefined | HostValue::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        HostValue::Object(_) => "[object Object]".to_string(),
        HostValue::Callback(_) => "function".to_string(),
    }
}

/// ToInt32: modulo 2^32, reinterpreted as signed.
pub fn to_int32(n: f64) -> i32 {
    to_uint32(n) as i32
}

pub fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(4_294_967_296.0) as u32
}

fn is_aggregate(value: &HostValue) -> bool {
    matches!(
        value,
        HostValue::Array(_) | HostValue::Object(_) | HostValue::Callback(_)
    )
}

fn to_primitive(value: &HostValue) -> HostValue {
    if is_aggregate(value) {
        HostValue::String(to_js_string(value))
    } else {
        value.clone()
    }
}

/// `===`. Aggregates compare unequal: identity is not tracked here.
pub fn strict_equals(left: &HostValue, right: &HostValue) -> bool {
    match (left, right) {
        (HostValue::Undefined, HostValue::Undefined) | (HostValue::Null, HostValue::Null) => true,
        (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
        (HostValue::Number(a), HostValue::Number(b)) => a == b,
        (HostValue::String(a), HostValue::String(b)) => a == b,
        _ => false,
    }
}

/// `==`.
pub fn loose_equals(left: &HostValue, right: &HostValue) -> bool {
    use HostValue::{Bool, Null, Number, String, Undefined};

    match (left, right) {
        (Undefined | Null, Undefined | Null) => true,
        (Undefined | Null, _) | (_, Undefined | Null) => false,
        (Number(a), String(_)) => *a == to_number(right),
        (String(_), Number(b)) => to_number(left) == *b,
        (Bool(_), _) => loose_equals(&Number(to_number(left)), right),
        (_, Bool(_)) => loose_equals(left, &Number(to_number(right))),
        _ if is_aggregate(left) && !is_aggregate(right) => loose_equals(&to_primitive(left), right),
        _ if is_aggregate(right) && !is_aggregate(left) => loose_equals(left, &to_primitive(right)),
        _ => strict_equals(left, right),
    }
}

fn compare(left: &HostValue, right: &HostValue) -> Option<Ordering> {
    let (left, right) = (to_primitive(left), to_primitive(right));
    if let (HostValue::String(a), HostValue::String(b)) = (&left, &right) {
        return Some(a.cmp(b));
    }
    to_number(&left).partial_cmp(&to_number(&right))
}

/// Fold a binary operator. `None` for operators that are not evaluated.
pub fn evaluate_binary(op: BinaryOp, left: &HostValue, right: &HostValue) -> Option<HostValue> {
    let number = |f: fn(f64, f64) -> f64| Some(HostValue::Number(f(to_number(left), to_number(right))));
    let int32 = |f: fn(i32, i32) -> i32| {
        Some(HostValue::Number(f64::from(f(
            to_int32(to_number(left)),
            to_int32(to_number(right)),
        ))))
    };
    let ordered = |f: fn(Ordering) -> bool| Some(HostValue::Bool(compare(left, right).is_some_and(f)));

    match op {
        BinaryOp::Add => {
            let (l, r) = (to_primitive(left), to_primitive(right));
            if matches!(l, HostValue::String(_)) || matches!(r, HostValue::String(_)) {
                Some(HostValue::String(to_js_string(&l) + &to_js_string(&r)))
            } else {
                Some(HostValue::Number(to_number(&l) + to_number(&r)))
            }
        }
        BinaryOp::Sub => number(|a, b| a - b),
        BinaryOp::Mul => number(|a, b| a * b),
        BinaryOp::Div => number(|a, b| a / b),
        BinaryOp::Mod => number(|a, b| a % b),
        BinaryOp::Exp => number(f64::powf),
        BinaryOp::Lt => ordered(Ordering::is_lt),
        BinaryOp::LtEq => ordered(Ordering::is_le),
        BinaryOp::Gt => ordered(Ordering::is_gt),
        BinaryOp::GtEq => ordered(Ordering::is_ge),
        BinaryOp::LooseEq => Some(HostValue::Bool(loose_equals(left, right))),
        BinaryOp::LooseNotEq => Some(HostValue::Bool(!loose_equals(left, right))),
        BinaryOp::StrictEq => Some(HostValue::Bool(strict_equals(left, right))),
        BinaryOp::StrictNotEq => Some(HostValue::Bool(!strict_equals(left, right))),
        BinaryOp::BitAnd => int32(|a, b| a & b),
        BinaryOp::BitOr => int32(|a, b| a | b),
        BinaryOp::BitXor => int32(|a, b| a ^ b),
        BinaryOp::Shl => int32(|a, b| a.wrapping_shl(b as u32 & 31)),
        BinaryOp::Shr => int32(|a, b| a.wrapping_shr(b as u32 & 31)),
        BinaryOp::UShr => {
            let shift = to_uint32(to_number(right)) & 31;
            Some(HostValue::Number(f64::from(
                to_uint32(to_number(left)) >> shift,
            )))
        }
        BinaryOp::In | BinaryOp::InstanceOf => None,
    }
}

/// Fold a value-producing unary operator. `typeof`, `void` and `delete`
/// depend on the operand's entry and are handled by the evaluator.
pub fn evaluate_unary(op: UnaryOp, operand: &HostValue) -> Option<HostValue> {
    match op {
        UnaryOp::Neg => Some(HostValue::Number(-to_number(operand))),
        UnaryOp::Plus => Some(HostValue::Number(to_number(operand))),
        UnaryOp::Not => Some(HostValue::Bool(!to_boolean(operand))),
        UnaryOp::BitNot => Some(HostValue::Number(f64::from(!to_int32(to_number(operand))))),
        UnaryOp::TypeOf | UnaryOp::Void | UnaryOp::Delete => None,
    }
}
