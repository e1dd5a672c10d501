use super::*;
use crate::value::{SymbolKind, Value, ValueType};
use pretty_assertions::assert_eq;
use scope_ir::{LineCol, Location, Span};

fn loc(start: u32, end: u32) -> Location {
    Location::new(LineCol::new(1, start), LineCol::new(1, end), Span::new(start, end))
}

fn number(n: f64) -> SymbolEntry {
    SymbolEntry::computed(Value::Number(n), Some(SymbolKind::Let))
}

#[test]
fn test_alloc_and_mutate_symbol() {
    let mut table = SymbolTable::new();
    let id = table.alloc_symbol(number(1.0));
    table.symbol_mut(id).value = Value::Number(2.0);
    assert_eq!(table.symbol(id).value, Value::Number(2.0));
    assert_eq!(table.symbol(id).ty, Some(ValueType::Number));
    assert_eq!(table.symbol_count(), 1);
}

#[test]
fn test_duplicate_is_independent() {
    let mut table = SymbolTable::new();
    let original = table.alloc_symbol(number(1.0));
    let copy = table.duplicate(original);
    table.symbol_mut(copy).value = Value::Number(5.0);
    assert_ne!(original, copy);
    assert_eq!(table.symbol(original).value, Value::Number(1.0));
}

#[test]
fn test_frame_stack_keeps_order() {
    let mut table = SymbolTable::new();
    let main = table.alloc_frame(Frame::new(None, None, None, loc(0, 100)));
    let a = table.alloc_symbol(number(1.0));
    let child = table.alloc_frame(Frame::new(None, Some(main), None, loc(10, 20)));
    let b = table.alloc_symbol(number(2.0));
    table.push_symbol(main, a);
    table.push_frame(main, child);
    table.push_symbol(main, b);

    let frame = table.frame(main);
    assert_eq!(frame.symbols().collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(frame.children().collect::<Vec<_>>(), vec![child]);
    assert_eq!(
        frame.stack,
        vec![
            StackEntry::Symbol(a),
            StackEntry::Frame(child),
            StackEntry::Symbol(b)
        ]
    );
}

#[test]
fn test_snapshot_does_not_touch_original() {
    let mut table = SymbolTable::new();
    let main = table.alloc_frame(Frame::new(None, None, None, loc(0, 100)));
    let a = table.alloc_symbol(number(1.0));
    table.push_symbol(main, a);

    let copy = table.snapshot_frame(main, None);
    let arg = table.alloc_symbol(number(2.0));
    table.push_symbol(copy, arg);

    assert_eq!(table.frame(main).symbols().collect::<Vec<_>>(), vec![a]);
    assert_eq!(table.frame(copy).symbols().collect::<Vec<_>>(), vec![a, arg]);
    assert_eq!(table.frame(copy).parent, table.frame(main).parent);
}

#[test]
fn test_snapshot_leaves_nested_frames_out() {
    let mut table = SymbolTable::new();
    let main = table.alloc_frame(Frame::new(None, None, None, loc(0, 100)));
    let defining = table.alloc_frame(Frame::new(None, Some(main), None, loc(10, 40)));
    let a = table.alloc_symbol(number(1.0));
    table.push_symbol(main, a);
    table.push_frame(main, defining);

    let copy = table.snapshot_frame(main, Some(defining));

    assert_eq!(table.frame(copy).stack, vec![StackEntry::Symbol(a)]);
    assert_eq!(table.frame(copy).capture, Some(defining));
    assert_eq!(table.frames_below(copy), vec![copy]);
}

#[test]
fn test_frames_below_is_breadth_first() {
    let mut table = SymbolTable::new();
    let root = table.alloc_frame(Frame::new(None, None, None, loc(0, 100)));
    let left = table.alloc_frame(Frame::new(None, Some(root), None, loc(0, 40)));
    let right = table.alloc_frame(Frame::new(None, Some(root), None, loc(50, 90)));
    let nested = table.alloc_frame(Frame::new(None, Some(left), None, loc(10, 20)));
    table.push_frame(root, left);
    table.push_frame(left, nested);
    table.push_frame(root, right);

    assert_eq!(table.frames_below(root), vec![root, left, right, nested]);
    assert_eq!(table.frames_below(right), vec![right]);
}
