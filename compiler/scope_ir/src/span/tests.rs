use super::*;

#[test]
fn test_span_len() {
    let span = Span::new(4, 12);
    assert_eq!(span.len(), 8);
    assert!(!span.is_empty());
    assert!(Span::point(9).is_empty());
}

#[test]
fn test_span_covers() {
    let outer = Span::new(0, 40);
    assert!(outer.covers(Span::new(3, 9)));
    assert!(outer.covers(outer));
    assert!(!outer.covers(Span::new(30, 41)));
}

#[test]
fn test_span_merge_covers_both() {
    let merged = Span::new(10, 20).merge(Span::new(2, 14));
    assert_eq!(merged, Span::new(2, 20));
}

#[test]
fn test_span_from_lexer_range() {
    assert_eq!(Span::from_range(3..7), Span::new(3, 7));
    let too_big = u32::MAX as usize + 1;
    assert_eq!(Span::from_range(0..too_big), Span::new(0, u32::MAX));
    assert_eq!(Span::new(3, 7).to_range(), 3..7);
}
