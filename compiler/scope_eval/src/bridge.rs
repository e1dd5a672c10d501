//! Conversion between symbol entries and host values.
//!
//! Entries become [`HostValue`] trees before a native call and the result is
//! turned back into fresh entries afterwards. Function entries cross as
//! [`Callback`] handles indexing the `callbacks` list, so a callback the
//! native returns maps back to the very entry that was passed in.

use rustc_hash::{FxHashMap, FxHashSet};
use scope_ir::StringInterner;

use crate::host::{Callback, HostValue};
use crate::symbols::{SymbolEntry, SymbolId, SymbolTable};
use crate::value::{SymbolKind, Value};

/// Convert the entry `id` into a host value.
pub(crate) fn to_host(
    table: &SymbolTable,
    interner: &StringInterner,
    id: SymbolId,
    callbacks: &mut Vec<SymbolId>,
) -> HostValue {
    let mut path = FxHashSet::default();
    to_host_inner(table, interner, id, callbacks, &mut path)
}

fn to_host_inner(
    table: &SymbolTable,
    interner: &StringInterner,
    id: SymbolId,
    callbacks: &mut Vec<SymbolId>,
    path: &mut FxHashSet<SymbolId>,
) -> HostValue {
    // Objects may contain themselves through a property.
    if !path.insert(id) {
        return HostValue::Undefined;
    }
    let entry = table.symbol(id);
    let host = match &entry.value {
        Value::Undefined | Value::Label(_) | Value::Name(_) => HostValue::Undefined,
        Value::Null => HostValue::Null,
        Value::Boolean(b) => HostValue::Bool(*b),
        Value::Number(n) => HostValue::Number(*n),
        Value::String(s) => HostValue::String(s.clone()),
        Value::Array(items) => HostValue::Array(
            items
                .iter()
                .map(|&item| to_host_inner(table, interner, item, callbacks, path))
                .collect(),
        ),
        Value::Object(map) => HostValue::Object(
            map.iter()
                .map(|(&key, &child)| {
                    (
                        interner.lookup(key).to_string(),
                        to_host_inner(table, interner, child, callbacks, path),
                    )
                })
                .collect(),
        ),
        Value::Function(_) => {
            let index = callbacks.iter().position(|&known| known == id).unwrap_or_else(|| {
                callbacks.push(id);
                callbacks.len() - 1
            });
            HostValue::Callback(Callback::new(u32::try_from(index).unwrap_or(u32::MAX)))
        }
    };
    path.remove(&id);
    host
}

/// Allocate fresh entries holding `host`. The top entry gets `kind`.
pub(crate) fn from_host(
    table: &mut SymbolTable,
    interner: &mut StringInterner,
    host: &HostValue,
    kind: Option<SymbolKind>,
    callbacks: &[SymbolId],
) -> SymbolId {
    let value = match host {
        HostValue::Undefined => Value::Undefined,
        HostValue::Null => Value::Null,
        HostValue::Bool(b) => Value::Boolean(*b),
        HostValue::Number(n) => Value::Number(*n),
        HostValue::String(s) => Value::String(s.clone()),
        HostValue::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| from_host(table, interner, item, Some(SymbolKind::Let), callbacks))
                .collect(),
        ),
        HostValue::Object(map) => {
            let mut properties = FxHashMap::default();
            for (key, child) in map {
                let name = interner.intern(key);
                let child = from_host(table, interner, child, Some(SymbolKind::Property), callbacks);
                table.symbol_mut(child).id = Some(name);
                properties.insert(name, child);
            }
            Value::Object(properties)
        }
        HostValue::Callback(callback) => {
            return match callbacks.get(callback.index()) {
                Some(&original) => original,
                None => table.alloc_symbol(SymbolEntry::unresolved(None)),
            };
        }
    };
    table.alloc_symbol(SymbolEntry::computed(value, kind))
}
