use super::*;
use scope_ir::{LineCol, Span};

fn at(line: u32, start: u32, end: u32) -> Location {
    Location::new(
        LineCol::new(line, start),
        LineCol::new(line, end),
        Span::new(start, end),
    )
}

#[test]
fn test_constructors_set_severity() {
    assert_eq!(Diagnostic::error("e", at(1, 0, 1)).severity, Severity::Error);
    assert_eq!(
        Diagnostic::warning("w", at(1, 0, 1)).severity,
        Severity::Warning
    );
    assert_eq!(Diagnostic::info("i", at(1, 0, 1)).severity, Severity::Info);
    assert!(Diagnostic::error("e", at(1, 0, 1)).is_error());
}

#[test]
fn test_same_site_ignores_message() {
    let a = Diagnostic::warning("first", at(2, 4, 9));
    let b = Diagnostic::warning("second", at(2, 4, 9));
    assert!(a.same_site(&b));
}

#[test]
fn test_same_site_requires_same_severity_and_range() {
    let warning = Diagnostic::warning("x", at(2, 4, 9));
    assert!(!warning.same_site(&Diagnostic::error("x", at(2, 4, 9))));
    assert!(!warning.same_site(&Diagnostic::warning("x", at(2, 4, 10))));
    assert!(!warning.same_site(&Diagnostic::warning("x", at(3, 4, 9))));
}

#[test]
fn test_display() {
    let diagnostic = Diagnostic::info("x is not a number type", at(4, 2, 5));
    assert_eq!(
        diagnostic.to_string(),
        "info: x is not a number type (4:2)"
    );
}
