//! Values carried by symbol entries.

use std::fmt;

use rustc_hash::FxHashMap;
use scope_ir::{DeclKind, Name, NodeId};

use crate::host::HostValue;
use crate::symbols::{FrameId, SymbolId};

/// Statically inferred type of an entry.
///
/// An entry whose type is not known yet carries `None` rather than
/// [`ValueType::Undefined`]; the latter is the type of the `undefined` value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Undefined,
    Object,
    Label,
    Function,
    String,
    Number,
    Array,
    Block,
    Boolean,
    /// A bare name in binding position (property keys, member names).
    Identifier,
}

impl ValueType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueType::Undefined => "undefined",
            ValueType::Object => "object",
            ValueType::Label => "label",
            ValueType::Function => "function",
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Array => "array",
            ValueType::Block => "block",
            ValueType::Boolean => "boolean",
            ValueType::Identifier => "identifier",
        }
    }

    /// Parse a type name as written on the command line.
    pub fn from_name(name: &str) -> Option<ValueType> {
        Some(match name {
            "undefined" => ValueType::Undefined,
            "object" => ValueType::Object,
            "label" => ValueType::Label,
            "function" => ValueType::Function,
            "string" => ValueType::String,
            "number" => ValueType::Number,
            "array" => ValueType::Array,
            "block" => ValueType::Block,
            "boolean" => ValueType::Boolean,
            _ => return None,
        })
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render an optional type the way messages spell it.
pub(crate) fn type_label(ty: Option<ValueType>) -> &'static str {
    ty.map_or("undefined", ValueType::as_str)
}

/// Where an entry came from. Provenance, not type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Let,
    Var,
    Const,
    Frame,
    /// Bound for the duration of one call body.
    Argument,
    Reserved,
    Native,
    Property,
}

impl SymbolKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Let => "let",
            SymbolKind::Var => "var",
            SymbolKind::Const => "const",
            SymbolKind::Frame => "frame",
            SymbolKind::Argument => "argument",
            SymbolKind::Reserved => "reserved",
            SymbolKind::Native => "native",
            SymbolKind::Property => "property",
        }
    }
}

impl From<DeclKind> for SymbolKind {
    fn from(kind: DeclKind) -> Self {
        match kind {
            DeclKind::Var => SymbolKind::Var,
            DeclKind::Let => SymbolKind::Let,
            DeclKind::Const => SymbolKind::Const,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of an entry.
///
/// Aggregates hold symbol ids, so an element or property can be resolved
/// and written through like any other entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<SymbolId>),
    Object(FxHashMap<Name, SymbolId>),
    Function(Box<FunctionValue>),
    /// Body of a labelled statement.
    Label(NodeId),
    /// Unresolved name in binding position.
    Name(Name),
}

impl Value {
    /// `undefined` or `null`: an object with no shape yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Type a freshly computed value would be given.
    pub fn inferred_type(&self) -> Option<ValueType> {
        match self {
            Value::Undefined => None,
            Value::Null | Value::Object(_) => Some(ValueType::Object),
            Value::Boolean(_) => Some(ValueType::Boolean),
            Value::Number(_) => Some(ValueType::Number),
            Value::String(_) => Some(ValueType::String),
            Value::Array(_) => Some(ValueType::Array),
            Value::Function(_) => Some(ValueType::Function),
            Value::Label(_) => Some(ValueType::Label),
            Value::Name(_) => Some(ValueType::Identifier),
        }
    }
}

/// What runs when a function value is called.
#[derive(Clone, Debug, PartialEq)]
pub enum FunctionBody {
    /// A function written in the analyzed source.
    Node(NodeId),
    /// A method from the native registry bound to its receiver.
    Native {
        receiver: SymbolId,
        method: Name,
        arity: usize,
    },
    /// A reserved function; calls yield `returns`.
    Reserved { returns: HostValue },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionValue {
    pub params: Vec<NodeId>,
    pub body: FunctionBody,
    /// Frame that was current where the function literal was analyzed.
    pub defining_frame: Option<FrameId>,
    pub is_expression_body: bool,
}

impl FunctionValue {
    /// Declared parameter count (`f.length`).
    pub fn param_count(&self) -> usize {
        match &self.body {
            FunctionBody::Native { arity, .. } => *arity,
            FunctionBody::Node(_) | FunctionBody::Reserved { .. } => self.params.len(),
        }
    }

    #[inline]
    pub fn is_user_defined(&self) -> bool {
        matches!(self.body, FunctionBody::Node(_))
    }
}
