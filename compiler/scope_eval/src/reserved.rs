//! Predeclared names supplied by the embedder.
//!
//! The registry is consulted only when a name resolves to nothing in any
//! frame. Lookup is by exact name; there is no scoping.

use rustc_hash::FxHashMap;
use scope_ir::StringInterner;

use crate::bridge::from_host;
use crate::host::HostValue;
use crate::symbols::{SymbolEntry, SymbolId, SymbolTable};
use crate::value::{FunctionBody, FunctionValue, SymbolKind, Value, ValueType};

/// Payload of a reserved name.
#[derive(Clone, Debug, PartialEq)]
pub enum ReservedValue {
    /// A plain value.
    Host(HostValue),
    /// A function; calling it yields the value.
    Returns(HostValue),
    /// An object whose properties are themselves reserved.
    Members(Vec<ReservedSymbol>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReservedSymbol {
    pub id: String,
    pub ty: Option<ValueType>,
    pub value: ReservedValue,
}

impl ReservedSymbol {
    /// A function returning `returns` whenever it is called.
    pub fn function(id: impl Into<String>, returns: HostValue) -> Self {
        ReservedSymbol {
            id: id.into(),
            ty: Some(ValueType::Function),
            value: ReservedValue::Returns(returns),
        }
    }

    pub fn value(id: impl Into<String>, value: HostValue) -> Self {
        ReservedSymbol {
            id: id.into(),
            ty: value.value_type(),
            value: ReservedValue::Host(value),
        }
    }

    /// An object such as `console` or `Math`.
    pub fn namespace(id: impl Into<String>, members: Vec<ReservedSymbol>) -> Self {
        ReservedSymbol {
            id: id.into(),
            ty: Some(ValueType::Object),
            value: ReservedValue::Members(members),
        }
    }

    /// A name known only by its type.
    pub fn declared(id: impl Into<String>, ty: ValueType) -> Self {
        let value = if ty == ValueType::Function {
            ReservedValue::Returns(HostValue::Undefined)
        } else {
            ReservedValue::Host(HostValue::Undefined)
        };
        ReservedSymbol {
            id: id.into(),
            ty: Some(ty),
            value,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ReservedRegistry {
    symbols: Vec<ReservedSymbol>,
}

impl ReservedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, symbol: ReservedSymbol) {
        self.symbols.push(symbol);
    }

    pub fn replace_all(&mut self, symbols: Vec<ReservedSymbol>) {
        self.symbols = symbols;
    }

    pub fn list(&self) -> &[ReservedSymbol] {
        &self.symbols
    }

    /// First registered entry named `name`.
    pub fn lookup(&self, name: &str) -> Option<&ReservedSymbol> {
        self.symbols.iter().find(|symbol| symbol.id == name)
    }

    /// Allocate an entry for the reserved `name`, or `None` if it is not
    /// registered.
    ///
    /// The entry's id is the registered id when it is non-empty and
    /// `"Returns of the {name}"` otherwise. Its kind is always
    /// [`SymbolKind::Reserved`].
    pub fn materialize(
        &self,
        table: &mut SymbolTable,
        interner: &mut StringInterner,
        name: &str,
    ) -> Option<SymbolId> {
        let symbol = self.lookup(name)?;
        let id = if symbol.id.is_empty() {
            format!("Returns of the {name}")
        } else {
            symbol.id.clone()
        };
        Some(alloc_reserved(table, interner, symbol, &id))
    }
}

fn alloc_reserved(
    table: &mut SymbolTable,
    interner: &mut StringInterner,
    symbol: &ReservedSymbol,
    id: &str,
) -> SymbolId {
    let value = match &symbol.value {
        ReservedValue::Host(host) => {
            let source = from_host(table, interner, host, None, &[]);
            table.symbol(source).value.clone()
        }
        ReservedValue::Returns(returns) => Value::Function(Box::new(FunctionValue {
            params: Vec::new(),
            body: FunctionBody::Reserved {
                returns: returns.clone(),
            },
            defining_frame: None,
            is_expression_body: false,
        })),
        ReservedValue::Members(members) => {
            let mut properties = FxHashMap::default();
            for member in members {
                let child = alloc_reserved(table, interner, member, &member.id);
                properties.insert(interner.intern(&member.id), child);
            }
            Value::Object(properties)
        }
    };
    let name = interner.intern(id);
    table.alloc_symbol(SymbolEntry {
        id: Some(name),
        kind: Some(SymbolKind::Reserved),
        ty: symbol.ty,
        value,
        location: None,
        is_global: false,
    })
}
