//! Human-readable output.
//!
//! ```text
//! warning: x is undefined (binary)
//!   --> input.js:3:4
//! ```

use std::io::Write;

use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

const RESET: &str = "\x1b[0m";
const FILE_NAME: &str = "\x1b[1m";

/// ANSI style for a severity label: bold red, yellow or cyan.
fn style(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[1;31m",
        Severity::Warning => "\x1b[1;33m",
        Severity::Info => "\x1b[1;36m",
    }
}

/// When to emit ANSI escapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Only when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

pub struct TerminalEmitter<W: Write> {
    out: W,
    color: bool,
    file: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(out: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            out,
            color: mode.enabled(is_tty),
            file: None,
        }
    }

    /// Print `name:` before every position.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.file = Some(name.into());
        self
    }

    fn paint(&mut self, text: &str, style: &str) {
        let _ = if self.color {
            write!(self.out, "{style}{text}{RESET}")
        } else {
            write!(self.out, "{text}")
        };
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.paint(diagnostic.severity.as_str(), style(diagnostic.severity));
        let _ = write!(self.out, ": {}\n  --> ", diagnostic.message);
        if let Some(file) = self.file.take() {
            self.paint(&file, FILE_NAME);
            let _ = write!(self.out, ":");
            self.file = Some(file);
        }
        let start = diagnostic.location.start;
        let _ = writeln!(self.out, "{}:{}", start.line, start.column);
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize, info_count: usize) {
        let worst = if error_count > 0 {
            Severity::Error
        } else if warning_count > 0 {
            Severity::Warning
        } else if info_count > 0 {
            Severity::Info
        } else {
            return;
        };
        let counted = |count: usize, noun: &str| {
            if count == 1 {
                format!("{count} {noun}")
            } else {
                format!("{count} {noun}s")
            }
        };
        self.paint(worst.as_str(), style(worst));
        let _ = writeln!(
            self.out,
            ": {}, {}, {} emitted",
            counted(error_count, "error"),
            counted(warning_count, "warning"),
            counted(info_count, "note"),
        );
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
