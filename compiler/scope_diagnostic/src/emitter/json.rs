//! JSON emitter.
//!
//! Output is a single array of objects with `severity`, `message`,
//! `start` and `end` (`{"line", "column"}`) fields.

use std::fmt::Write as _;
use std::io::Write;

use scope_ir::LineCol;

use crate::Diagnostic;

use super::DiagnosticEmitter;

pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    pub fn begin(&mut self) {
        let _ = write!(self.writer, "[");
    }

    pub fn end(&mut self) {
        if self.first {
            let _ = writeln!(self.writer, "]");
        } else {
            let _ = writeln!(self.writer, "\n]");
        }
    }

    fn write_position(&mut self, key: &str, pos: LineCol) {
        let _ = write!(
            self.writer,
            "\"{key}\": {{\"line\": {}, \"column\": {}}}",
            pos.line, pos.column
        );
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = write!(self.writer, ",");
        }
        self.first = false;

        let _ = write!(
            self.writer,
            "\n  {{\"severity\": \"{}\", \"message\": \"{}\", ",
            diagnostic.severity,
            escape(&diagnostic.message)
        );
        self.write_position("start", diagnostic.location.start);
        let _ = write!(self.writer, ", ");
        self.write_position("end", diagnostic.location.end);
        let _ = write!(self.writer, "}}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

/// JSON string body for `text`: quotes, backslashes and control
/// characters escaped.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(escaped, "\\u{:04x}", u32::from(c));
            }
            c => escaped.push(c),
        }
    }
    escaped
}
