//! Default native method catalogue.
//!
//! Each method works on plain [`HostValue`]s. Array methods that take a
//! function receive a [`Callback`](crate::host::Callback) and call back into
//! the evaluator through [`NativeCall::invoke`].

use crate::errors::NativeError;
use crate::host::{HostValue, NativeCall, NativeMethod, NativeRegistry};
use crate::operators::{number_to_string, strict_equals, to_boolean, to_js_string, to_number};
use crate::value::ValueType;

impl NativeRegistry {
    /// Registry preloaded with the common string, array, number and object
    /// methods.
    pub fn with_builtins() -> Self {
        let mut registry = NativeRegistry::new();

        let strings: [(&str, NativeMethod); 9] = [
            ("toUpperCase", NativeMethod::pure(0, string_to_upper_case)),
            ("toLowerCase", NativeMethod::pure(0, string_to_lower_case)),
            ("trim", NativeMethod::pure(0, string_trim)),
            ("charAt", NativeMethod::pure(1, string_char_at)),
            ("indexOf", NativeMethod::pure(1, string_index_of)),
            ("concat", NativeMethod::pure(1, string_concat)),
            ("slice", NativeMethod::pure(2, string_slice)),
            ("split", NativeMethod::pure(1, string_split)),
            ("includes", NativeMethod::pure(1, string_includes)),
        ];
        for (name, method) in strings {
            registry.register(ValueType::String, name, method);
        }

        let arrays: [(&str, NativeMethod); 11] = [
            ("push", NativeMethod::mutating(1, array_push)),
            ("pop", NativeMethod::mutating(0, array_pop)),
            ("indexOf", NativeMethod::pure(1, array_index_of)),
            ("includes", NativeMethod::pure(1, array_includes)),
            ("join", NativeMethod::pure(1, array_join)),
            ("slice", NativeMethod::pure(2, array_slice)),
            ("concat", NativeMethod::pure(1, array_concat)),
            ("map", NativeMethod::pure(1, array_map)),
            ("filter", NativeMethod::pure(1, array_filter)),
            ("forEach", NativeMethod::pure(1, array_for_each)),
            ("reduce", NativeMethod::pure(2, array_reduce)),
        ];
        for (name, method) in arrays {
            registry.register(ValueType::Array, name, method);
        }

        registry.register(ValueType::Number, "toFixed", NativeMethod::pure(1, number_to_fixed));
        registry.register(ValueType::Number, "toString", NativeMethod::pure(0, number_to_js_string));
        registry.register(
            ValueType::Object,
            "hasOwnProperty",
            NativeMethod::pure(1, object_has_own_property),
        );

        registry
    }
}

// Helpers

fn receiver_str<'a>(call: &'a NativeCall<'_>, method: &'static str) -> Result<&'a str, NativeError> {
    call.receiver.as_str().ok_or(NativeError::WrongArgument {
        method,
        expected: "a string receiver",
    })
}

fn receiver_items(
    call: &NativeCall<'_>,
    method: &'static str,
) -> Result<Vec<HostValue>, NativeError> {
    match &*call.receiver {
        HostValue::Array(items) => Ok(items.clone()),
        _ => Err(NativeError::WrongArgument {
            method,
            expected: "an array receiver",
        }),
    }
}

fn callback_arg(
    call: &NativeCall<'_>,
    method: &'static str,
) -> Result<crate::host::Callback, NativeError> {
    match call.arg(0) {
        HostValue::Callback(callback) => Ok(*callback),
        _ => Err(NativeError::WrongArgument {
            method,
            expected: "a function",
        }),
    }
}

/// Resolve a relative index the way `slice` does.
fn relative_index(value: &HostValue, len: usize, default: usize) -> usize {
    if matches!(value, HostValue::Undefined) {
        return default;
    }
    let n = to_number(value);
    if n.is_nan() {
        return 0;
    }
    let n = n.trunc();
    let len_f = len as f64;
    let index = if n < 0.0 { (len_f + n).max(0.0) } else { n.min(len_f) };
    index as usize
}

fn index_of(items: &[HostValue], needle: &HostValue) -> f64 {
    items
        .iter()
        .position(|item| strict_equals(item, needle))
        .map_or(-1.0, |i| i as f64)
}

// String methods

fn string_to_upper_case(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    Ok(receiver_str(call, "toUpperCase")?.to_uppercase().into())
}

fn string_to_lower_case(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    Ok(receiver_str(call, "toLowerCase")?.to_lowercase().into())
}

fn string_trim(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    Ok(receiver_str(call, "trim")?.trim().into())
}

fn string_char_at(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let text = receiver_str(call, "charAt")?;
    let index = to_number(call.arg(0));
    let index = if index.is_nan() { 0.0 } else { index.trunc() };
    if index < 0.0 {
        return Ok(HostValue::from(""));
    }
    Ok(text
        .chars()
        .nth(index as usize)
        .map_or_else(String::new, String::from)
        .into())
}

fn string_index_of(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let text = receiver_str(call, "indexOf")?;
    let needle = to_js_string(call.arg(0));
    Ok(HostValue::Number(text.find(&needle).map_or(-1.0, |byte| {
        text[..byte].chars().count() as f64
    })))
}

fn string_concat(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let mut text = receiver_str(call, "concat")?.to_string();
    for arg in call.args {
        text.push_str(&to_js_string(arg));
    }
    Ok(text.into())
}

fn string_slice(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let chars: Vec<char> = receiver_str(call, "slice")?.chars().collect();
    let start = relative_index(call.arg(0), chars.len(), 0);
    let end = relative_index(call.arg(1), chars.len(), chars.len());
    if start >= end {
        return Ok(HostValue::from(""));
    }
    Ok(chars[start..end].iter().collect::<String>().into())
}

fn string_split(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let text = receiver_str(call, "split")?;
    let parts = match call.arg(0) {
        HostValue::Undefined => vec![HostValue::from(text)],
        separator => {
            let separator = to_js_string(separator);
            if separator.is_empty() {
                text.chars().map(|c| HostValue::String(c.to_string())).collect()
            } else {
                text.split(separator.as_str()).map(HostValue::from).collect()
            }
        }
    };
    Ok(HostValue::Array(parts))
}

fn string_includes(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let text = receiver_str(call, "includes")?;
    Ok(text.contains(to_js_string(call.arg(0)).as_str()).into())
}

// Array methods

fn array_push(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let args = call.args.to_vec();
    match &mut *call.receiver {
        HostValue::Array(items) => {
            items.extend(args);
            Ok(HostValue::Number(items.len() as f64))
        }
        _ => Err(NativeError::WrongArgument {
            method: "push",
            expected: "an array receiver",
        }),
    }
}

fn array_pop(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    match &mut *call.receiver {
        HostValue::Array(items) => Ok(items.pop().unwrap_or_default()),
        _ => Err(NativeError::WrongArgument {
            method: "pop",
            expected: "an array receiver",
        }),
    }
}

fn array_index_of(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let items = receiver_items(call, "indexOf")?;
    Ok(HostValue::Number(index_of(&items, call.arg(0))))
}

fn array_includes(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let items = receiver_items(call, "includes")?;
    Ok((index_of(&items, call.arg(0)) >= 0.0).into())
}

fn array_join(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let items = receiver_items(call, "join")?;
    let separator = match call.arg(0) {
        HostValue::Undefined => ",".to_string(),
        other => to_js_string(other),
    };
    let parts: Vec<String> = items
        .iter()
        .map(|item| match item {
            HostValue::Undefined | HostValue::Null => String::new(),
            other => to_js_string(other),
        })
        .collect();
    Ok(parts.join(&separator).into())
}

fn array_slice(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let items = receiver_items(call, "slice")?;
    let start = relative_index(call.arg(0), items.len(), 0);
    let end = relative_index(call.arg(1), items.len(), items.len());
    if start >= end {
        return Ok(HostValue::Array(Vec::new()));
    }
    Ok(HostValue::Array(items[start..end].to_vec()))
}

fn array_concat(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let mut items = receiver_items(call, "concat")?;
    for arg in call.args {
        match arg {
            HostValue::Array(more) => items.extend(more.iter().cloned()),
            other => items.push(other.clone()),
        }
    }
    Ok(HostValue::Array(items))
}

fn array_map(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let items = receiver_items(call, "map")?;
    let callback = callback_arg(call, "map")?;
    let mapped = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| call.invoke(callback, vec![item, HostValue::Number(i as f64)]))
        .collect();
    Ok(HostValue::Array(mapped))
}

fn array_filter(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let items = receiver_items(call, "filter")?;
    let callback = callback_arg(call, "filter")?;
    let mut kept = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        let keep = call.invoke(callback, vec![item.clone(), HostValue::Number(i as f64)]);
        if to_boolean(&keep) {
            kept.push(item);
        }
    }
    Ok(HostValue::Array(kept))
}

fn array_for_each(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let items = receiver_items(call, "forEach")?;
    let callback = callback_arg(call, "forEach")?;
    for (i, item) in items.into_iter().enumerate() {
        call.invoke(callback, vec![item, HostValue::Number(i as f64)]);
    }
    Ok(HostValue::Undefined)
}

fn array_reduce(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let items = receiver_items(call, "reduce")?;
    let callback = callback_arg(call, "reduce")?;
    let mut items = items.into_iter().enumerate();
    let mut accumulator = if call.args.len() > 1 {
        call.arg(1).clone()
    } else {
        match items.next() {
            Some((_, first)) => first,
            None => {
                return Err(NativeError::WrongArgument {
                    method: "reduce",
                    expected: "an initial value for an empty array",
                })
            }
        }
    };
    for (i, item) in items {
        accumulator = call.invoke(callback, vec![accumulator, item, HostValue::Number(i as f64)]);
    }
    Ok(accumulator)
}

// Number methods

fn number_to_fixed(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let n = call.receiver.as_number().ok_or(NativeError::WrongArgument {
        method: "toFixed",
        expected: "a number receiver",
    })?;
    let digits = to_number(call.arg(0));
    let digits = if digits.is_nan() { 0.0 } else { digits.trunc() };
    if !(0.0..=100.0).contains(&digits) {
        return Err(NativeError::WrongArgument {
            method: "toFixed",
            expected: "between 0 and 100 digits",
        });
    }
    Ok(format!("{n:.precision$}", precision = digits as usize).into())
}

fn number_to_js_string(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let n = call.receiver.as_number().ok_or(NativeError::WrongArgument {
        method: "toString",
        expected: "a number receiver",
    })?;
    Ok(number_to_string(n).into())
}

// Object methods

fn object_has_own_property(call: &mut NativeCall<'_>) -> Result<HostValue, NativeError> {
    let key = to_js_string(call.arg(0));
    match &*call.receiver {
        HostValue::Object(map) => Ok(map.contains_key(&key).into()),
        HostValue::Null => Ok(false.into()),
        _ => Err(NativeError::WrongArgument {
            method: "hasOwnProperty",
            expected: "an object receiver",
        }),
    }
}
