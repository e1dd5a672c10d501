use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut interner = StringInterner::new();
    lex(source, &mut interner)
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_declaration_tokens() {
    let mut interner = StringInterner::new();
    let tokens = lex("var x = 1;", &mut interner);
    let x = interner.intern("x");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Var,
            TokenKind::Ident(x),
            TokenKind::Eq,
            TokenKind::Number(1.0),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[1].span, Span::new(4, 5));
}

#[test]
fn test_keywords_win_over_identifiers() {
    let mut interner = StringInterner::new();
    let tokens = lex("return returned", &mut interner);
    assert_eq!(tokens[0].kind, TokenKind::Return);
    assert_eq!(
        tokens[1].kind,
        TokenKind::Ident(interner.intern("returned"))
    );
}

#[test]
fn test_longest_operator_match() {
    assert_eq!(
        kinds("a >>>= b !== c ** d"),
        {
            let mut interner = StringInterner::new();
            let a = interner.intern("a");
            let b = interner.intern("b");
            let c = interner.intern("c");
            let d = interner.intern("d");
            vec![
                TokenKind::Ident(a),
                TokenKind::UShrEq,
                TokenKind::Ident(b),
                TokenKind::NotEqEq,
                TokenKind::Ident(c),
                TokenKind::StarStar,
                TokenKind::Ident(d),
                TokenKind::Eof,
            ]
        }
    );
}

#[test]
fn test_number_forms() {
    assert_eq!(
        kinds("0x1F 0b101 0o17 1.5e3 .25 7"),
        vec![
            TokenKind::Number(31.0),
            TokenKind::Number(5.0),
            TokenKind::Number(15.0),
            TokenKind::Number(1500.0),
            TokenKind::Number(0.25),
            TokenKind::Number(7.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_string_literals_are_cooked() {
    let mut interner = StringInterner::new();
    let tokens = lex(r#"'it\'s' "a\tb""#, &mut interner);
    let TokenKind::String(first) = tokens[0].kind else {
        panic!("expected string, got {:?}", tokens[0].kind);
    };
    let TokenKind::String(second) = tokens[1].kind else {
        panic!("expected string, got {:?}", tokens[1].kind);
    };
    assert_eq!(interner.lookup(first), "it's");
    assert_eq!(interner.lookup(second), "a\tb");
}

#[test]
fn test_template_substitution_flag() {
    let mut interner = StringInterner::new();
    let tokens = lex("`plain` `x is ${x}`", &mut interner);
    assert!(matches!(
        tokens[0].kind,
        TokenKind::Template {
            has_substitutions: false,
            ..
        }
    ));
    assert!(matches!(
        tokens[1].kind,
        TokenKind::Template {
            has_substitutions: true,
            ..
        }
    ));
}

#[test]
fn test_newline_flags() {
    let mut interner = StringInterner::new();
    let tokens = lex("a\nb /* one\ntwo */ c // tail\nd", &mut interner);
    let flags: Vec<_> = tokens.iter().map(|t| t.newline_before).collect();
    assert_eq!(flags, vec![false, true, true, true, false]);
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("// only a comment\n/* and a block */"),
        vec![TokenKind::Eof]
    );
}

#[test]
fn test_unknown_character_is_error_token() {
    let tokens = kinds("a # b");
    assert!(tokens.contains(&TokenKind::Error));
    assert_eq!(tokens.last(), Some(&TokenKind::Eof));
}

proptest! {
    #[test]
    fn prop_lexing_never_panics_and_ends_with_eof(source in "\\PC{0,64}") {
        let mut interner = StringInterner::new();
        let tokens = lex(&source, &mut interner);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        let mut previous_end = 0;
        for token in &tokens {
            prop_assert!(token.span.start >= previous_end);
            previous_end = token.span.end;
        }
    }
}
