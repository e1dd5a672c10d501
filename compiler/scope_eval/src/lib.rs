//! Scopewise Eval - symbol tables and static evaluation.
//!
//! Builds a scope-aware symbol table from a parsed program, resolves every
//! identifier and property access to a best-effort value and type, and
//! reports what looks wrong. Nothing is executed: loops run their body once,
//! both branches of every conditional are visited, and function bodies are
//! analyzed when declared and again at each call.
//!
//! # Architecture
//!
//! - [`Engine`]: parse, build and query; the only entry point most users need
//! - [`SymbolTable`]: arenas of frames and symbol entries produced by a build
//! - [`resolver`]: location-based lookup over the frame graph
//! - [`ReservedRegistry`]: predeclared names consulted when lookup fails
//! - [`NativeRegistry`]: native methods reached through member access, with
//!   callbacks into analyzed functions

mod bridge;
mod builtins;
mod engine;
pub mod errors;
mod eval;
pub mod host;
pub mod operators;
mod options;
pub mod reserved;
pub mod resolver;
pub mod symbols;
pub mod value;

pub use engine::Engine;
pub use errors::{EngineError, NativeError};
pub use host::{
    Callback, HostValue, NativeCall, NativeContext, NativeEffect, NativeFn, NativeMethod,
    NativeRegistry,
};
pub use options::EngineOptions;
pub use reserved::{ReservedRegistry, ReservedSymbol, ReservedValue};
pub use resolver::QueryRange;
pub use symbols::{Frame, FrameId, StackEntry, SymbolEntry, SymbolId, SymbolTable};
pub use value::{FunctionBody, FunctionValue, SymbolKind, Value, ValueType};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
