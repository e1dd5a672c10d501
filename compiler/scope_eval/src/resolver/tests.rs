use super::*;
use crate::symbols::{Frame, SymbolEntry};
use crate::value::{SymbolKind, Value};
use pretty_assertions::assert_eq;
use scope_ir::{LineCol, Span};

fn loc(line_start: u32, line_end: u32, start: u32, end: u32) -> Location {
    Location::new(
        LineCol::new(line_start, 0),
        LineCol::new(line_end, 0),
        Span::new(start, end),
    )
}

struct Fixture {
    table: SymbolTable,
    interner: StringInterner,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            table: SymbolTable::new(),
            interner: StringInterner::new(),
        }
    }

    fn frame(&mut self, parent: Option<FrameId>, location: Location) -> FrameId {
        let frame = self.table.alloc_frame(Frame::new(None, parent, None, location));
        if let Some(parent) = parent {
            self.table.push_frame(parent, frame);
        }
        frame
    }

    fn declare(&mut self, frame: FrameId, name: &str, value: f64) -> SymbolId {
        let name = self.interner.intern(name);
        let symbol = self.table.alloc_symbol(SymbolEntry {
            id: Some(name),
            ..SymbolEntry::computed(Value::Number(value), Some(SymbolKind::Let))
        });
        self.table.push_symbol(frame, symbol);
        symbol
    }

    fn find(&self, name: &str, range: Option<QueryRange>, start: FrameId) -> Option<SymbolId> {
        let name = self.interner.get(name)?;
        find_symbol(&self.table, name, range, start)
    }
}

fn offsets(start: u32, end: u32) -> Option<QueryRange> {
    Some(QueryRange::Offsets { start, end })
}

#[test]
fn test_without_range_searches_start_frame() {
    let mut fx = Fixture::new();
    let main = fx.frame(None, loc(1, 10, 0, 100));
    let x = fx.declare(main, "x", 1.0);
    assert_eq!(fx.find("x", None, main), Some(x));
    assert_eq!(fx.find("y", None, main), None);
}

#[test]
fn test_innermost_frame_wins() {
    let mut fx = Fixture::new();
    let main = fx.frame(None, loc(1, 10, 0, 100));
    let outer_x = fx.declare(main, "x", 1.0);
    let inner = fx.frame(Some(main), loc(2, 4, 10, 40));
    let inner_x = fx.declare(inner, "x", 2.0);
    let sibling = fx.frame(Some(main), loc(5, 7, 50, 80));

    assert_eq!(fx.find("x", offsets(20, 21), main), Some(inner_x));
    assert_eq!(fx.find("x", offsets(60, 61), main), Some(outer_x));
    assert_eq!(fx.find("x", offsets(60, 61), sibling), Some(outer_x));
}

#[test]
fn test_line_queries_use_line_slack() {
    let mut fx = Fixture::new();
    let main = fx.frame(None, loc(1, 10, 0, 100));
    fx.declare(main, "x", 1.0);
    let inner = fx.frame(Some(main), loc(2, 4, 10, 40));
    let inner_x = fx.declare(inner, "x", 2.0);

    let range = Some(QueryRange::Lines { start: 3, end: 3 });
    assert_eq!(fx.find("x", range, main), Some(inner_x));
}

#[test]
fn test_uncontained_range_falls_back_to_start() {
    let mut fx = Fixture::new();
    let main = fx.frame(None, loc(1, 10, 0, 100));
    let x = fx.declare(main, "x", 1.0);
    assert_eq!(fx.find("x", offsets(500, 510), main), Some(x));
}

#[test]
fn test_first_declaration_in_a_frame_wins() {
    let mut fx = Fixture::new();
    let main = fx.frame(None, loc(1, 10, 0, 100));
    let first = fx.declare(main, "x", 1.0);
    fx.declare(main, "x", 2.0);
    assert_eq!(fx.find("x", None, main), Some(first));
}

#[test]
fn test_capture_edge_searched_after_parents() {
    let mut fx = Fixture::new();
    let main = fx.frame(None, loc(1, 10, 0, 100));
    let home = fx.frame(Some(main), loc(2, 3, 10, 30));
    let captured = fx.declare(home, "c", 1.0);

    // Detached local frame whose block captures `home`.
    let local = fx.table.alloc_frame(Frame::new(None, None, None, loc(5, 6, 50, 60)));
    let block = fx
        .table
        .alloc_frame(Frame::new(None, Some(local), Some(home), loc(5, 6, 52, 60)));
    fx.table.push_frame(local, block);

    assert_eq!(fx.find("c", offsets(55, 56), block), Some(captured));
}

#[test]
fn test_capture_cycle_terminates() {
    let mut fx = Fixture::new();
    // `a` captures `b` and `b` captures `a`.
    let a = fx.table.alloc_frame(Frame::new(
        None,
        None,
        Some(FrameId::new(1)),
        loc(1, 1, 0, 10),
    ));
    let b = fx.table.alloc_frame(Frame::new(None, None, Some(a), loc(1, 1, 0, 10)));
    assert_eq!(b, FrameId::new(1));

    fx.interner.intern("missing");
    assert_eq!(fx.find("missing", None, a), None);
    assert_eq!(fx.find("missing", None, b), None);
}

#[test]
fn test_prefix_search_collects_outwards() {
    let mut fx = Fixture::new();
    let main = fx.frame(None, loc(1, 10, 0, 100));
    let outer = fx.declare(main, "count", 1.0);
    fx.declare(main, "total", 1.0);
    let inner = fx.frame(Some(main), loc(2, 4, 10, 40));
    let inner_counter = fx.declare(inner, "counter", 2.0);
    let inner_count = fx.declare(inner, "count", 3.0);

    let found = find_symbols_with_prefix(&fx.table, &fx.interner, "coun", offsets(20, 21), main);
    assert_eq!(found, vec![inner_counter, inner_count, outer]);
}

#[test]
fn test_slack() {
    let frame = loc(2, 8, 10, 50);
    assert_eq!(
        QueryRange::Offsets { start: 20, end: 30 }.slack(&frame),
        Some(30)
    );
    assert_eq!(QueryRange::Lines { start: 3, end: 4 }.slack(&frame), Some(5));
    assert_eq!(QueryRange::Offsets { start: 5, end: 30 }.slack(&frame), None);
}
