//! Parse error type.
//!
//! Parsing stops at the first syntax error; the error carries the message
//! and the location of the offending token.

use scope_ir::Location;
use scope_lexer::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({}:{})", .location.start.line, .location.start.column)]
pub struct ParseError {
    pub message: String,
    pub location: Location,
}

impl ParseError {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        ParseError {
            message: message.into(),
            location,
        }
    }

    /// Error for a token that cannot start or continue the current construct.
    pub(crate) fn unexpected(kind: TokenKind, text: &str, location: Location) -> Self {
        let message = match kind {
            TokenKind::Eof => "Unexpected end of input".to_string(),
            TokenKind::Error => format!("Unexpected character '{text}'"),
            _ => format!("Unexpected token '{text}'"),
        };
        ParseError::new(message, location)
    }
}
