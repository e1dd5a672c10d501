use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scope_ir::{LineCol, Location, Span};

fn at(line: u32, column: u32) -> Location {
    Location::new(
        LineCol::new(line, column),
        LineCol::new(line, column + 1),
        Span::new(column, column + 1),
    )
}

#[test]
fn test_push_keeps_order() {
    let mut bag = DiagnosticBag::new();
    assert!(bag.push(Diagnostic::warning("b", at(2, 0))));
    assert!(bag.push(Diagnostic::error("a", at(1, 0))));
    let messages: Vec<_> = bag.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["b", "a"]);
}

#[test]
fn test_duplicate_site_is_dropped() {
    let mut bag = DiagnosticBag::new();
    assert!(bag.push(Diagnostic::warning("x is undefined", at(3, 4))));
    assert!(!bag.push(Diagnostic::warning("another message", at(3, 4))));
    assert_eq!(bag.len(), 1);
    assert_eq!(bag.as_slice()[0].message, "x is undefined");
}

#[test]
fn test_different_severity_same_site_is_kept() {
    let mut bag = DiagnosticBag::new();
    assert!(bag.push(Diagnostic::warning("w", at(3, 4))));
    assert!(bag.push(Diagnostic::info("i", at(3, 4))));
    assert_eq!(bag.len(), 2);
    assert_eq!(bag.count(Severity::Info), 1);
    assert!(!bag.has_errors());
}

#[test]
fn test_reset_forgets_sites() {
    let mut bag = DiagnosticBag::new();
    bag.push(Diagnostic::error("e", at(1, 1)));
    bag.reset();
    assert!(bag.is_empty());
    assert!(bag.push(Diagnostic::error("e", at(1, 1))));
}

proptest! {
    #[test]
    fn prop_no_two_entries_share_a_site(
        sites in proptest::collection::vec((0u8..3, 1u32..4, 0u32..4), 0..40)
    ) {
        let mut bag = DiagnosticBag::new();
        for (severity, line, column) in &sites {
            let severity = match severity {
                0 => Severity::Error,
                1 => Severity::Warning,
                _ => Severity::Info,
            };
            bag.push(Diagnostic::new(severity, "m", at(*line, *column)));
        }
        let stored = bag.as_slice();
        for (i, a) in stored.iter().enumerate() {
            for b in &stored[i + 1..] {
                prop_assert!(!a.same_site(b));
            }
        }

        // Pushing everything again changes nothing.
        let before = bag.len();
        for d in stored.to_vec() {
            prop_assert!(!bag.push(d));
        }
        prop_assert_eq!(bag.len(), before);
    }
}
