//! Scopewise IR - Syntax Tree Representation
//!
//! Core data structures shared by the lexer, parser and evaluator:
//! - Spans and line/column locations
//! - Names for interned identifiers
//! - A flat arena of ESTree-shaped syntax nodes
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifier and string text becomes `Name(u32)`
//! - **Flatten Everything**: children are `NodeId(u32)` indices, never boxes
//! - **Locate Everything**: every node records both its byte span and its
//!   line/column range, so trees parsed from several sources stay addressable

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod location;
mod name;
mod span;

pub use ast::{
    AssignOp, Ast, BinaryOp, Class, DeclKind, Function, Literal, LogicalOp, Node, NodeId,
    NodeKind, PropertyKind, UnaryOp, UpdateOp,
};
pub use location::{LineCol, LineIndex, Location};
pub use name::{Name, StringInterner};
pub use span::Span;
