//! Diagnostics for the scopewise analyzer.
//!
//! - [`Diagnostic`]: one message with a severity and a source range
//! - [`DiagnosticBag`]: ordered collection that drops repeats at the same site
//! - [`emitter`]: terminal and JSON renderers

mod bag;
mod diagnostic;
pub mod emitter;

pub use bag::DiagnosticBag;
pub use diagnostic::{Diagnostic, Severity};
