use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_simple_escapes() {
    assert_eq!(unescape_string(r"a\nb\tc"), "a\nb\tc");
    assert_eq!(unescape_string(r#"say \"hi\""#), "say \"hi\"");
    assert_eq!(unescape_string(r"it\'s"), "it's");
}

#[test]
fn test_hex_and_unicode_escapes() {
    assert_eq!(unescape_string(r"\x41"), "A");
    assert_eq!(unescape_string(r"\u0042"), "B");
    assert_eq!(unescape_string(r"\u{1F600}"), "\u{1F600}");
}

#[test]
fn test_line_continuation_is_removed() {
    assert_eq!(unescape_string("one \\\ntwo"), "one two");
    assert_eq!(unescape_string("one \\\r\ntwo"), "one two");
}

#[test]
fn test_identity_escape_and_trailing_backslash() {
    assert_eq!(unescape_string(r"\q"), "q");
    assert_eq!(unescape_string("end\\"), "end\\");
}

#[test]
fn test_malformed_hex_is_kept() {
    assert_eq!(unescape_string(r"\xZZ"), "xZZ");
}
