//! Deduplicating diagnostics collector.
//!
//! Analysis revisits the same source more than once (a function body is
//! checked speculatively and again at every call), so identical findings
//! are reported once per site.

use rustc_hash::FxHashSet;

use crate::diagnostic::SiteKey;
use crate::{Diagnostic, Severity};

/// Ordered diagnostics with one entry per severity and line/column range.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<SiteKey>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `diagnostic` unless one already occupies its site.
    ///
    /// Returns `true` if the diagnostic was stored.
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        if !self.seen.insert(diagnostic.site_key()) {
            return false;
        }
        self.diagnostics.push(diagnostic);
        true
    }

    pub fn reset(&mut self) {
        self.diagnostics.clear();
        self.seen.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests;
