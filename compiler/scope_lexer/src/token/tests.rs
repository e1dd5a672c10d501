use super::*;

#[test]
fn test_keyword_text() {
    assert_eq!(TokenKind::Default.keyword_text(), Some("default"));
    assert_eq!(TokenKind::InstanceOf.keyword_text(), Some("instanceof"));
    assert_eq!(TokenKind::Plus.keyword_text(), None);
}

#[test]
fn test_display_name() {
    assert_eq!(TokenKind::UShrEq.to_string(), ">>>=");
    assert_eq!(TokenKind::Eof.to_string(), "end of input");
    assert_eq!(TokenKind::Return.to_string(), "return");
}
