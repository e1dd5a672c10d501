use super::*;

#[test]
fn test_intern_deduplicates() {
    let mut interner = StringInterner::new();
    let a = interner.intern("counter");
    let b = interner.intern("counter");
    let c = interner.intern("count");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.lookup(a), "counter");
    assert_eq!(interner.lookup(c), "count");
}

#[test]
fn test_empty_is_preinterned() {
    let mut interner = StringInterner::new();
    assert!(interner.is_empty());
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_get_does_not_intern() {
    let mut interner = StringInterner::new();
    assert_eq!(interner.get("missing"), None);
    let before = interner.len();
    let name = interner.intern("present");
    assert_eq!(interner.get("present"), Some(name));
    assert_eq!(interner.len(), before + 1);
}
