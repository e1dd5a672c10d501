//! Lexer for the scopewise analyzer using logos with string interning.
//!
//! Whitespace and comments are dropped, but every token remembers whether a
//! line terminator preceded it so the parser can apply automatic semicolon
//! insertion. Regular expression literals are not recognised; a `/` is
//! always a division operator.

mod escape;
mod token;

use logos::Logos;
use scope_ir::{Span, StringInterner};

pub use escape::unescape_string;
pub use token::{Token, TokenKind};

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[token("\n")]
    #[token("\u{2028}")]
    #[token("\u{2029}")]
    Newline,

    // Keywords
    #[token("var")]
    Var,
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("function")]
    Function,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("new")]
    New,
    #[token("delete")]
    Delete,
    #[token("typeof")]
    TypeOf,
    #[token("void")]
    Void,
    #[token("in")]
    In,
    #[token("instanceof")]
    InstanceOf,
    #[token("this")]
    This,
    #[token("null")]
    Null,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("throw")]
    Throw,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("class")]
    Class,
    #[token("extends")]
    Extends,
    #[token("super")]
    Super,
    #[token("debugger")]
    Debugger,
    #[token("with")]
    With,
    #[token("yield")]
    Yield,
    #[token("await")]
    Await,

    // Punctuation
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("=>")]
    Arrow,

    // Operators
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    NotEqEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token(">>>")]
    UShr,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // Assignment
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("**=")]
    StarStarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token(">>>=")]
    UShrEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,

    // Numbers
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| parse_radix(lex.slice(), 16))]
    #[regex(r"0[oO][0-7]+", |lex| parse_radix(lex.slice(), 8))]
    #[regex(r"0[bB][01]+", |lex| parse_radix(lex.slice(), 2))]
    Number(f64),

    #[regex(r#""([^"\\\n\r]|\\[^\r]|\\\r\n?)*""#)]
    #[regex(r"'([^'\\\n\r]|\\[^\r]|\\\r\n?)*'")]
    String,

    #[regex(r"`([^`\\]|\\(.|\n))*`")]
    Template,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,
}

/// Parse a prefixed integer literal (`0x`, `0o`, `0b`).
fn parse_radix(slice: &str, radix: u32) -> Option<f64> {
    u64::from_str_radix(&slice[2..], radix)
        .ok()
        .map(|value| value as f64)
}

/// Lex source text into tokens, terminated by a single `Eof` token.
pub fn lex(source: &str, interner: &mut StringInterner) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);
    let mut newline_before = false;

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::Newline) => newline_before = true,
            Ok(RawToken::LineComment) => {}
            Ok(RawToken::BlockComment) => newline_before |= slice.contains('\n'),
            Ok(raw) => {
                let kind = convert_token(raw, slice, interner);
                tokens.push(Token::new(kind, span, newline_before));
                newline_before = false;
            }
            Err(()) => {
                tokens.push(Token::new(TokenKind::Error, span, newline_before));
                newline_before = false;
            }
        }
    }

    let eof = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::point(eof), newline_before));
    tokens
}

/// Convert a raw token to a `TokenKind`, interning text.
fn convert_token(raw: RawToken, slice: &str, interner: &mut StringInterner) -> TokenKind {
    match raw {
        RawToken::Number(n) => TokenKind::Number(n),
        RawToken::String => {
            let body = &slice[1..slice.len() - 1];
            TokenKind::String(interner.intern(&unescape_string(body)))
        }
        RawToken::Template => {
            let body = &slice[1..slice.len() - 1];
            TokenKind::Template {
                raw: interner.intern(body),
                has_substitutions: body.contains("${"),
            }
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        RawToken::Var => TokenKind::Var,
        RawToken::Let => TokenKind::Let,
        RawToken::Const => TokenKind::Const,
        RawToken::Function => TokenKind::Function,
        RawToken::Return => TokenKind::Return,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::For => TokenKind::For,
        RawToken::While => TokenKind::While,
        RawToken::Do => TokenKind::Do,
        RawToken::Switch => TokenKind::Switch,
        RawToken::Case => TokenKind::Case,
        RawToken::Default => TokenKind::Default,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::New => TokenKind::New,
        RawToken::Delete => TokenKind::Delete,
        RawToken::TypeOf => TokenKind::TypeOf,
        RawToken::Void => TokenKind::Void,
        RawToken::In => TokenKind::In,
        RawToken::InstanceOf => TokenKind::InstanceOf,
        RawToken::This => TokenKind::This,
        RawToken::Null => TokenKind::Null,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Throw => TokenKind::Throw,
        RawToken::Try => TokenKind::Try,
        RawToken::Catch => TokenKind::Catch,
        RawToken::Finally => TokenKind::Finally,
        RawToken::Class => TokenKind::Class,
        RawToken::Extends => TokenKind::Extends,
        RawToken::Super => TokenKind::Super,
        RawToken::Debugger => TokenKind::Debugger,
        RawToken::With => TokenKind::With,
        RawToken::Yield => TokenKind::Yield,
        RawToken::Await => TokenKind::Await,

        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Question => TokenKind::Question,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Arrow => TokenKind::Arrow,

        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::EqEqEq => TokenKind::EqEqEq,
        RawToken::NotEqEq => TokenKind::NotEqEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::UShr => TokenKind::UShr,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,

        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::StarStarEq => TokenKind::StarStarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::ShlEq => TokenKind::ShlEq,
        RawToken::ShrEq => TokenKind::ShrEq,
        RawToken::UShrEq => TokenKind::UShrEq,
        RawToken::AmpEq => TokenKind::AmpEq,
        RawToken::PipeEq => TokenKind::PipeEq,
        RawToken::CaretEq => TokenKind::CaretEq,

        // Trivia is consumed by `lex` before conversion.
        RawToken::LineComment | RawToken::BlockComment | RawToken::Newline => TokenKind::Error,
    }
}

#[cfg(test)]
mod tests;
