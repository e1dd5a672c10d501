//! Names, literals, aggregates and member access.

use rustc_hash::FxHashMap;
use scope_ir::{Literal, Name, NodeId};

use super::{EvalState, Evaluator, Mode};
use crate::errors;
use crate::operators::to_boolean;
use crate::resolver::{find_symbol, QueryRange};
use crate::symbols::{SymbolEntry, SymbolId};
use crate::value::{type_label, FunctionBody, FunctionValue, SymbolKind, Value, ValueType};

/// Indices past this are read as unstored properties instead of growing
/// the array.
const MAX_ARRAY_GROWTH: usize = 1 << 16;

impl Evaluator<'_> {
    pub(super) fn eval_identifier(
        &mut self,
        node: NodeId,
        name: Name,
        mode: Mode,
        state: &EvalState,
    ) -> SymbolId {
        if mode == Mode::Lvalue {
            return self.alloc(SymbolEntry {
                id: Some(name),
                ty: Some(ValueType::Identifier),
                value: Value::Name(name),
                ..SymbolEntry::default()
            });
        }

        let range = QueryRange::from(self.ast.location(node));
        if let Some(found) = find_symbol(self.table, name, Some(range), state.frame) {
            return found;
        }

        // Speculated bodies may reach globals declared after them.
        if !state.is_active {
            if let Some(global) = self
                .table
                .main_frame()
                .and_then(|main| find_symbol(self.table, name, None, main))
            {
                let copy = self.table.duplicate(global);
                self.table.symbol_mut(copy).is_global = true;
                return copy;
            }
        }

        let text = self.interner.lookup(name).to_string();
        if let Some(reserved) = self.reserved.materialize(self.table, self.interner, &text) {
            return reserved;
        }

        self.alloc(SymbolEntry::unresolved(Some(name)))
    }

    pub(super) fn eval_literal(&mut self, literal: &Literal) -> SymbolId {
        let value = match literal {
            Literal::Null => Value::Null,
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::String(text) => Value::String(self.interner.lookup(*text).to_string()),
        };
        self.alloc_computed(value, None)
    }

    pub(super) fn eval_template(&mut self, raw: Name) -> SymbolId {
        let text = self.interner.lookup(raw).to_string();
        self.alloc_computed(Value::String(text), None)
    }

    pub(super) fn eval_array(&mut self, elements: &[Option<NodeId>], state: &mut EvalState) -> SymbolId {
        let items = elements
            .iter()
            .map(|element| match element {
                Some(element) => {
                    let item = self.eval(*element, Mode::Rvalue, state);
                    self.table.duplicate(item)
                }
                None => self.empty(),
            })
            .collect();
        self.alloc_computed(Value::Array(items), Some(SymbolKind::Let))
    }

    pub(super) fn eval_object(&mut self, properties: &[NodeId], state: &mut EvalState) -> SymbolId {
        let mut map = FxHashMap::default();
        for &property in properties {
            let entry = self.eval(property, Mode::Rvalue, state);
            if let Some(key) = self.entry(entry).id {
                map.insert(key, entry);
            }
        }
        self.alloc_computed(Value::Object(map), None)
    }

    /// One `key: value` pair. The result is a property entry named by the
    /// key and holding a copy of the value.
    pub(super) fn eval_property(
        &mut self,
        key: NodeId,
        value: NodeId,
        computed: bool,
        state: &mut EvalState,
    ) -> SymbolId {
        let mode = if computed { Mode::Rvalue } else { Mode::Lvalue };
        let left = self.eval(key, mode, state);
        let right = self.eval(value, Mode::Rvalue, state);

        let left_type = self.type_of(left);
        if matches!(left_type, None | Some(ValueType::Object)) && self.reports(left) {
            let message =
                errors::property_side(&self.display_name(left), type_label(left_type), "left");
            self.warning(message, key);
        }
        if self.is_reportable_undefined(right, state) {
            let message = errors::property_side(&self.display_name(right), "undefined", "right");
            self.warning(message, value);
        }

        let name = self.key_name(left);
        let source = self.entry(right).clone();
        self.alloc(SymbolEntry {
            id: name,
            kind: Some(SymbolKind::Property),
            ..source
        })
    }

    pub(super) fn eval_member(
        &mut self,
        object: NodeId,
        property: NodeId,
        computed: bool,
        state: &mut EvalState,
    ) -> SymbolId {
        let obj = self.eval(object, Mode::Rvalue, state);
        let mode = if computed { Mode::Rvalue } else { Mode::Lvalue };
        let prop = self.eval(property, mode, state);
        let key = self.key_name(prop);
        let key_text = key.map_or_else(|| "undefined".to_string(), |key| self.interner.lookup(key).to_string());

        let object_type = self.type_of(obj);
        if object_type.is_none() && !self.is_placeholder(obj, state) {
            self.error(errors::access_on_undefined(&key_text), object);
            return obj;
        }

        let Some(key) = key else {
            if self.reports(prop) {
                let message = errors::undefined_property(&self.display_name(obj), type_label(object_type));
                self.error(message, property);
            }
            return self.empty();
        };

        if self.entry(obj).value.is_empty() {
            return self.materialize_object(obj, object, key);
        }

        let value = self.entry(obj).value.clone();
        match value {
            Value::Object(map) => {
                if let Some(&found) = map.get(&key) {
                    return found;
                }
                if let Some(method) = self.native_method(obj, ValueType::Object, key) {
                    return method;
                }
                let created = self.new_property(key);
                if let Value::Object(map) = &mut self.table.symbol_mut(obj).value {
                    map.insert(key, created);
                }
                created
            }
            Value::Function(function) => {
                if key == self.names.length {
                    let length = function.param_count() as f64;
                    return self.native_value(key, Value::Number(length));
                }
                if key == self.names.name {
                    let name = self.display_name(obj);
                    return self.native_value(key, Value::String(name));
                }
                if let Some(method) = self.native_method(obj, ValueType::Function, key) {
                    return method;
                }
                self.error(errors::cannot_create_property(&key_text, "function"), object);
                obj
            }
            Value::Array(items) => {
                if let Some(index) = array_index(&key_text) {
                    return self.array_element(obj, items, index, key);
                }
                if key == self.names.length {
                    return self.native_value(key, Value::Number(items.len() as f64));
                }
                if let Some(method) = self.native_method(obj, ValueType::Array, key) {
                    return method;
                }
                self.new_property(key)
            }
            Value::String(text) => {
                if key == self.names.length {
                    return self.native_value(key, Value::Number(text.chars().count() as f64));
                }
                if let Some(index) = array_index(&key_text) {
                    let value = text
                        .chars()
                        .nth(index)
                        .map_or(Value::Undefined, |c| Value::String(c.to_string()));
                    return self.native_value(key, value);
                }
                if let Some(method) = self.native_method(obj, ValueType::String, key) {
                    return method;
                }
                self.error(errors::cannot_create_property(&key_text, "string"), object);
                obj
            }
            Value::Number(_) | Value::Boolean(_) | Value::Label(_) | Value::Name(_) => {
                let receiver = object_type.unwrap_or(ValueType::Undefined);
                if let Some(method) = self.native_method(obj, receiver, key) {
                    return method;
                }
                self.error(
                    errors::cannot_create_property(&key_text, type_label(object_type)),
                    object,
                );
                obj
            }
            Value::Undefined | Value::Null => self.empty(),
        }
    }

    /// Give an empty-valued entry an object shape holding `key`.
    pub(super) fn materialize_object(&mut self, obj: SymbolId, object: NodeId, key: Name) -> SymbolId {
        let entry = self.entry(obj);
        if entry.kind == Some(SymbolKind::Reserved) && entry.ty != Some(ValueType::Object) {
            let message = errors::reserved_property_write(type_label(entry.ty));
            self.warning(message, object);
        }

        let created = self.new_property(key);
        let target = self.table.symbol_mut(obj);
        target.ty = Some(ValueType::Object);
        let mut map = FxHashMap::default();
        map.insert(key, created);
        target.value = Value::Object(map);
        created
    }

    fn array_element(
        &mut self,
        array: SymbolId,
        mut items: Vec<SymbolId>,
        index: usize,
        key: Name,
    ) -> SymbolId {
        if let Some(&item) = items.get(index) {
            return item;
        }
        if index >= MAX_ARRAY_GROWTH {
            return self.new_property(key);
        }
        while items.len() <= index {
            let hole = self.alloc(SymbolEntry {
                kind: Some(SymbolKind::Let),
                ..SymbolEntry::default()
            });
            items.push(hole);
        }
        let element = items[index];
        self.table.symbol_mut(array).value = Value::Array(items);
        element
    }

    fn new_property(&mut self, key: Name) -> SymbolId {
        self.alloc(SymbolEntry {
            id: Some(key),
            kind: Some(SymbolKind::Property),
            ..SymbolEntry::default()
        })
    }

    fn native_value(&mut self, key: Name, value: Value) -> SymbolId {
        let mut entry = SymbolEntry::computed(value, Some(SymbolKind::Native));
        entry.id = Some(key);
        self.alloc(entry)
    }

    /// Descriptor for a registered native method bound to `receiver`.
    fn native_method(&mut self, receiver: SymbolId, ty: ValueType, key: Name) -> Option<SymbolId> {
        let method = self.natives.lookup(ty, self.interner.lookup(key))?;
        let arity = method.arity;
        Some(self.alloc(SymbolEntry {
            id: Some(key),
            kind: Some(SymbolKind::Native),
            ty: Some(ValueType::Function),
            value: Value::Function(Box::new(FunctionValue {
                params: Vec::new(),
                body: FunctionBody::Native {
                    receiver,
                    method: key,
                    arity,
                },
                defining_frame: None,
                is_expression_body: false,
            })),
            location: None,
            is_global: false,
        }))
    }

    /// Both branches are evaluated; the result follows the test's value.
    pub(super) fn eval_conditional(
        &mut self,
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
        state: &mut EvalState,
    ) -> SymbolId {
        let test = self.eval(test, Mode::Rvalue, state);
        let when_true = self.eval(consequent, Mode::Rvalue, state);
        let when_false = self.eval(alternate, Mode::Rvalue, state);
        if to_boolean(&self.host_value(test)) {
            when_true
        } else {
            when_false
        }
    }
}

/// Canonical array index spelled by a property key.
fn array_index(key: &str) -> Option<usize> {
    let index: usize = key.parse().ok()?;
    (index.to_string() == key).then_some(index)
}
