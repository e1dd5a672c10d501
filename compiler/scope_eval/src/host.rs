//! Native interop types.
//!
//! Native built-ins never see symbol entries. The bridge converts entries to
//! [`HostValue`] trees, calls the [`NativeMethod`] registered for the
//! receiver's type, and converts the result back. Function arguments become
//! [`Callback`] handles that the method can invoke through its
//! [`NativeContext`], which re-enters the evaluator.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::errors::NativeError;
use crate::value::ValueType;

/// Handle to a function value passed into native code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Callback(u32);

impl Callback {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Callback(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Plain value exchanged with native methods.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HostValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<HostValue>),
    Object(BTreeMap<String, HostValue>),
    Callback(Callback),
}

impl HostValue {
    /// Type an entry holding this value is given; `None` for `undefined`.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            HostValue::Undefined => None,
            HostValue::Null | HostValue::Object(_) => Some(ValueType::Object),
            HostValue::Bool(_) => Some(ValueType::Boolean),
            HostValue::Number(_) => Some(ValueType::Number),
            HostValue::String(_) => Some(ValueType::String),
            HostValue::Array(_) => Some(ValueType::Array),
            HostValue::Callback(_) => Some(ValueType::Function),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            HostValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::Number(n)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::String(s)
    }
}

/// Services the bridge offers to a running native method.
pub trait NativeContext {
    /// Call an analyzed function passed as an argument.
    fn invoke(&mut self, callback: Callback, args: Vec<HostValue>) -> HostValue;
}

static UNDEFINED: HostValue = HostValue::Undefined;

/// One native method invocation.
pub struct NativeCall<'a> {
    pub receiver: &'a mut HostValue,
    pub args: &'a [HostValue],
    context: &'a mut dyn NativeContext,
}

impl<'a> NativeCall<'a> {
    pub fn new(
        receiver: &'a mut HostValue,
        args: &'a [HostValue],
        context: &'a mut dyn NativeContext,
    ) -> Self {
        NativeCall {
            receiver,
            args,
            context,
        }
    }

    /// Argument `index`, or `undefined` when it was not passed.
    pub fn arg(&self, index: usize) -> &HostValue {
        self.args.get(index).unwrap_or(&UNDEFINED)
    }

    pub fn invoke(&mut self, callback: Callback, args: Vec<HostValue>) -> HostValue {
        self.context.invoke(callback, args)
    }
}

pub type NativeFn = fn(&mut NativeCall<'_>) -> Result<HostValue, NativeError>;

/// Whether a method writes its receiver back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NativeEffect {
    Pure,
    MutatesReceiver,
}

#[derive(Copy, Clone)]
pub struct NativeMethod {
    pub arity: usize,
    pub effect: NativeEffect,
    pub func: NativeFn,
}

impl NativeMethod {
    pub const fn pure(arity: usize, func: NativeFn) -> Self {
        NativeMethod {
            arity,
            effect: NativeEffect::Pure,
            func,
        }
    }

    pub const fn mutating(arity: usize, func: NativeFn) -> Self {
        NativeMethod {
            arity,
            effect: NativeEffect::MutatesReceiver,
            func,
        }
    }
}

impl fmt::Debug for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeMethod")
            .field("arity", &self.arity)
            .field("effect", &self.effect)
            .finish_non_exhaustive()
    }
}

/// Native methods by receiver type and name.
#[derive(Clone, Debug, Default)]
pub struct NativeRegistry {
    methods: FxHashMap<ValueType, FxHashMap<String, NativeMethod>>,
}

impl NativeRegistry {
    /// Registry with no methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a method.
    pub fn register(&mut self, receiver: ValueType, name: impl Into<String>, method: NativeMethod) {
        self.methods
            .entry(receiver)
            .or_default()
            .insert(name.into(), method);
    }

    pub fn lookup(&self, receiver: ValueType, name: &str) -> Option<&NativeMethod> {
        self.methods.get(&receiver)?.get(name)
    }

    pub fn len(&self) -> usize {
        self.methods.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
