//! Rendering diagnostics for people and tools.
//!
//! [`TerminalEmitter`] prints one block per diagnostic, coloured when the
//! output is a terminal. [`JsonEmitter`] prints a single JSON array for
//! editors and scripts.

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit in iteration order.
    fn emit_all<'d, I>(&mut self, diagnostics: I)
    where
        I: IntoIterator<Item = &'d Diagnostic>,
        Self: Sized,
    {
        diagnostics.into_iter().for_each(|d| self.emit(d));
    }

    fn flush(&mut self);

    /// Closing line with per-severity counts. Emitters without a summary
    /// ignore it.
    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize, _info_count: usize) {}
}
