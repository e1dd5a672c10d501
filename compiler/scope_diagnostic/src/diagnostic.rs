//! Diagnostic record.

use std::fmt;

use scope_ir::Location;

/// How serious a finding is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding, located by line/column range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Location,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, location: Location) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            location,
        }
    }

    pub fn error(message: impl Into<String>, location: Location) -> Self {
        Self::new(Severity::Error, message, location)
    }

    pub fn warning(message: impl Into<String>, location: Location) -> Self {
        Self::new(Severity::Warning, message, location)
    }

    pub fn info(message: impl Into<String>, location: Location) -> Self {
        Self::new(Severity::Info, message, location)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Two diagnostics occupy the same site when severity and the
    /// line/column range agree; the message is not compared.
    pub fn same_site(&self, other: &Diagnostic) -> bool {
        self.site_key() == other.site_key()
    }

    pub(crate) fn site_key(&self) -> SiteKey {
        SiteKey {
            severity: self.severity,
            start: (self.location.start.line, self.location.start.column),
            end: (self.location.end.line, self.location.end.column),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.severity, self.message, self.location.start
        )
    }
}

/// Deduplication key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SiteKey {
    severity: Severity,
    start: (u32, u32),
    end: (u32, u32),
}

#[cfg(test)]
mod tests;
