//! Token cursor for navigating the token stream.

use std::mem::discriminant;

use scope_ir::{Name, Span};
use scope_lexer::{Token, TokenKind};

/// Position in a token slice whose last token is always `Eof`.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.peek(0)
    }

    /// Token `offset` positions ahead, clamped to `Eof`.
    #[inline]
    pub fn peek(&self, offset: usize) -> &'a Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Compare token kinds by variant, ignoring payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        discriminant(&self.current().kind) == discriminant(kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Whether the current token is the identifier `name`.
    #[inline]
    pub fn check_contextual(&self, name: Name) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(n) if n == name)
    }

    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    /// Scan from a `(` at `offset` to its matching `)` and report whether
    /// an arrow on the same line follows.
    pub fn arrow_follows_parens(&self, offset: usize) -> bool {
        if !matches!(self.peek(offset).kind, TokenKind::LParen) {
            return false;
        }
        let mut depth = 0usize;
        let mut index = self.pos + offset;
        while let Some(token) = self.tokens.get(index) {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.tokens.get(index + 1).is_some_and(|next| {
                            matches!(next.kind, TokenKind::Arrow) && !next.newline_before
                        });
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            index += 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_ir::StringInterner;

    #[test]
    fn test_advance_stops_at_eof() {
        let mut interner = StringInterner::new();
        let tokens = scope_lexer::lex("a", &mut interner);
        let mut cursor = Cursor::new(&tokens);
        cursor.advance();
        assert!(cursor.is_at_end());
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_arrow_follows_parens() {
        let mut interner = StringInterner::new();
        let arrow = scope_lexer::lex("(a, [b, c]) => a", &mut interner);
        assert!(Cursor::new(&arrow).arrow_follows_parens(0));

        let call = scope_lexer::lex("(a, b) + c", &mut interner);
        assert!(!Cursor::new(&call).arrow_follows_parens(0));

        let broken = scope_lexer::lex("(a, b)\n=> c", &mut interner);
        assert!(!Cursor::new(&broken).arrow_follows_parens(0));
    }
}
