//! Engine faults and diagnostic message text.
//!
//! Analysis findings are never Rust errors; they are pushed to the
//! diagnostic bag with the messages built here. [`EngineError`] covers the
//! cases where analysis cannot run at all.

use scope_parse::ParseError;

/// Why `parse` or `build` failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Internal error: The type of the root node is not the Program")]
    NotAProgram,
    #[error("no program has been parsed")]
    NoProgram,
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure reported by a native method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NativeError {
    #[error("{method} expects {expected}")]
    WrongArgument {
        method: &'static str,
        expected: &'static str,
    },
    #[error("{0} is not supported on this receiver")]
    Unsupported(String),
}

// Declarations

pub(crate) fn reserved_binding(name: &str, ty: &str) -> String {
    format!("{name} is a reserved as the {ty}")
}

pub(crate) fn reserved_function_name(name: &str, ty: &str) -> String {
    format!("{name} is reserved as a {ty}")
}

pub(crate) fn already_declared(name: &str) -> String {
    format!("{name} is already declared")
}

pub(crate) fn already_declared_as(name: &str, ty: &str) -> String {
    format!("{name} is already declared as {ty}")
}

pub(crate) fn shadow_variable(name: &str) -> String {
    format!("The {name} would be the shadow variable")
}

// Assignment

pub(crate) fn assign_to_reserved_function(name: &str) -> String {
    format!("Cannot assign a value to the reserved function {name}")
}

pub(crate) fn assign_to_constant(name: &str) -> String {
    format!("Cannot change the constant {name}")
}

// Operands

pub(crate) fn undefined_operand(name: &str, context: &str) -> String {
    format!("{name} is undefined ({context})")
}

pub(crate) fn binary_operand_types(operation: &str, left: &str, right: &str) -> String {
    format!("Trying to do a {operation} operation on the {left} | {right}")
}

pub(crate) fn compound_operand_types(operator: &str, right: &str, left: &str) -> String {
    format!("Trying to do a {operator} operation on the {right}/{left}")
}

pub(crate) fn unary_on_function(name: &str) -> String {
    format!("trying to unary operation on a function {name}")
}

pub(crate) fn unary_operand_type(ty: &str, name: &str) -> String {
    format!("trying to unary operation on a {ty} {name}")
}

pub(crate) fn not_a_number(name: &str) -> String {
    format!("{name} is not a number type")
}

pub(crate) fn not_a_boolean(value: &str) -> String {
    format!("{value} is not a boolean type")
}

// Objects

pub(crate) fn property_side(name: &str, ty: &str, side: &str) -> String {
    format!("{name} is {ty} ({side})")
}

pub(crate) fn access_on_undefined(property: &str) -> String {
    format!("cannot access {property} of undefined")
}

pub(crate) fn undefined_property(object: &str, ty: &str) -> String {
    format!("property on the {object}({ty}) is undefined")
}

pub(crate) fn cannot_create_property(property: &str, ty: &str) -> String {
    format!("cannot create property {property} on the {ty}")
}

pub(crate) fn reserved_property_write(ty: &str) -> String {
    format!("trying to change the property of a reserved {ty}")
}

// Calls

pub(crate) fn undefined_argument(position: usize, name: &str) -> String {
    format!("{position}th parameter ({name}) is undefined (call)")
}

pub(crate) fn not_in_scope(name: &str) -> String {
    format!("{name} is not found in current scope")
}

pub(crate) fn wrong_arity(name: &str, expected: usize) -> String {
    format!("{name} requires {expected} parameters")
}

pub(crate) fn wrong_callback_arity(expected: usize, given: usize) -> String {
    format!("function requires {expected} but given {given} (callback call)")
}

pub(crate) fn not_a_function(name: &str) -> String {
    format!("{name} is not a function")
}

// Labels

pub(crate) fn label_not_found(name: &str) -> String {
    format!("label {name} is not found")
}
