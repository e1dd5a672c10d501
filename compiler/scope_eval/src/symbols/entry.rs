use std::fmt;

use scope_ir::{Location, Name};

use crate::value::{SymbolKind, Value, ValueType};

/// Index into the symbol arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        SymbolId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// A declaration, or the result of evaluating a node.
///
/// `kind == None` marks a descriptor that resolved to nothing; `ty == None`
/// marks a value whose type is not known.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolEntry {
    pub id: Option<Name>,
    pub kind: Option<SymbolKind>,
    pub ty: Option<ValueType>,
    pub value: Value,
    pub location: Option<Location>,
    /// Found only through the global fallback while speculating.
    pub is_global: bool,
}

impl SymbolEntry {
    /// Descriptor for a name that resolved to nothing.
    pub fn unresolved(id: Option<Name>) -> Self {
        SymbolEntry {
            id,
            ..SymbolEntry::default()
        }
    }

    /// Declared entry with the type and value of `source`.
    pub fn declared(
        id: Option<Name>,
        kind: SymbolKind,
        source: &SymbolEntry,
        location: Location,
    ) -> Self {
        SymbolEntry {
            id,
            kind: Some(kind),
            ty: source.ty,
            value: source.value.clone(),
            location: Some(location),
            is_global: false,
        }
    }

    /// Computed result whose type follows the value.
    pub fn computed(value: Value, kind: Option<SymbolKind>) -> Self {
        SymbolEntry {
            ty: value.inferred_type(),
            value,
            kind,
            ..SymbolEntry::default()
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.kind.is_some()
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        self.ty == Some(ValueType::Function)
    }
}
