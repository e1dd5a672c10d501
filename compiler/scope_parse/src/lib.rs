//! Recursive descent parser for the scopewise analyzer.
//!
//! Parses a script into the ESTree-shaped arena in [`scope_ir::Ast`].
//! Parsing stops at the first syntax error. Semicolons are inserted
//! automatically before a line break, a closing brace or the end of input.

mod cursor;
mod error;
mod grammar;

use scope_ir::{Ast, LineIndex, Location, Name, NodeId, NodeKind, Span, StringInterner};
use scope_lexer::{Token, TokenKind};
use tracing::debug;

pub use cursor::Cursor;
pub use error::ParseError;

/// Contextual keywords that lex as identifiers.
struct ContextualNames {
    of: Name,
    r#async: Name,
    get: Name,
    set: Name,
    r#static: Name,
    constructor: Name,
}

impl ContextualNames {
    fn new(interner: &mut StringInterner) -> Self {
        ContextualNames {
            of: interner.intern("of"),
            r#async: interner.intern("async"),
            get: interner.intern("get"),
            set: interner.intern("set"),
            r#static: interner.intern("static"),
            constructor: interner.intern("constructor"),
        }
    }
}

/// Parser state.
pub struct Parser<'a> {
    source: &'a str,
    cursor: Cursor<'a>,
    lines: LineIndex<'a>,
    ast: &'a mut Ast,
    interner: &'a mut StringInterner,
    names: ContextualNames,
    /// Set while parsing the head of a `for` statement, where `in` ends
    /// the expression instead of acting as an operator.
    no_in: bool,
}

/// Lex and parse `source`, allocating nodes into `ast`.
///
/// Returns the id of the new `Program` node.
pub fn parse(
    source: &str,
    ast: &mut Ast,
    interner: &mut StringInterner,
) -> Result<NodeId, ParseError> {
    let tokens = scope_lexer::lex(source, interner);
    Parser::new(source, &tokens, ast, interner).parse_program()
}

impl<'a> Parser<'a> {
    pub fn new(
        source: &'a str,
        tokens: &'a [Token],
        ast: &'a mut Ast,
        interner: &'a mut StringInterner,
    ) -> Self {
        let names = ContextualNames::new(interner);
        Parser {
            source,
            cursor: Cursor::new(tokens),
            lines: LineIndex::new(source),
            ast,
            interner,
            names,
            no_in: false,
        }
    }

    /// Parse a whole script.
    pub fn parse_program(mut self) -> Result<NodeId, ParseError> {
        let mut body = Vec::new();
        while !self.is_at_end() {
            body.push(self.parse_statement()?);
        }
        debug!(statements = body.len(), "parsed program");
        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        let location = self.lines.location(Span::new(0, end));
        Ok(self.ast.alloc(NodeKind::Program { body }, location))
    }

    // Cursor delegation

    #[inline]
    fn current(&self) -> &'a Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_start(&self) -> u32 {
        self.cursor.current_span().start
    }

    #[inline]
    fn peek(&self, offset: usize) -> &'a Token {
        self.cursor.peek(offset)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn check_ident(&self) -> bool {
        self.cursor.check_ident()
    }

    #[inline]
    fn check_contextual(&self, name: Name) -> bool {
        self.cursor.check_contextual(name)
    }

    #[inline]
    fn advance(&mut self) -> &'a Token {
        self.cursor.advance()
    }

    /// Consume `kind` or fail with an unexpected-token error.
    fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected())
        }
    }

    /// Consume `kind` if present.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> ParseError {
        let token = self.current();
        let text = self.source.get(token.span.to_range()).unwrap_or_default();
        ParseError::unexpected(token.kind, text, self.lines.location(token.span))
    }

    fn error_here(&self, message: &str) -> ParseError {
        ParseError::new(message, self.lines.location(self.cursor.current_span()))
    }

    /// Location from `start` to the end of the last consumed token.
    fn location_from(&self, start: u32) -> Location {
        let end = self.cursor.previous_span().end.max(start);
        self.lines.location(Span::new(start, end))
    }

    /// Allocate a node spanning from `start` to the last consumed token.
    fn finish(&mut self, kind: NodeKind, start: u32) -> NodeId {
        let location = self.location_from(start);
        self.ast.alloc(kind, location)
    }

    /// Run `f` with the `in`-operator restriction set to `no_in`.
    fn with_no_in<T>(&mut self, no_in: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.no_in, no_in);
        let result = f(self);
        self.no_in = saved;
        result
    }

    /// Statement terminator, with automatic insertion.
    fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat(&TokenKind::Semicolon)
            || self.check(&TokenKind::RBrace)
            || self.is_at_end()
            || self.current().newline_before
        {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }
}

#[cfg(test)]
mod tests;
