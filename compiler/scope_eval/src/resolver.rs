//! Scope resolution.
//!
//! A lookup first picks the innermost frame whose range contains the query,
//! then walks outwards: parent edges first, then any capture edges seen on
//! the way. Each frame is searched at most once per lookup, so a lookup is
//! linear in the number of frames even when capture edges form cycles.

use rustc_hash::FxHashSet;
use scope_ir::{Location, Name, StringInterner};
use tracing::trace;

use crate::symbols::{FrameId, SymbolId, SymbolTable};

/// Source range a lookup is made from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueryRange {
    /// Byte offsets.
    Offsets { start: u32, end: u32 },
    /// Whole lines, 1-based.
    Lines { start: u32, end: u32 },
}

impl QueryRange {
    /// Slack of `frame` around this range, in the unit of the query.
    ///
    /// `None` if the frame does not contain the range.
    pub fn slack(self, frame: &Location) -> Option<u32> {
        match self {
            QueryRange::Offsets { start, end } => frame
                .contains_offsets(start, end)
                .then(|| (start - frame.span.start) + (frame.span.end - end)),
            QueryRange::Lines { start, end } => frame
                .contains_lines(start, end)
                .then(|| (start - frame.start.line) + (frame.end.line - end)),
        }
    }
}

impl From<Location> for QueryRange {
    fn from(location: Location) -> Self {
        QueryRange::Offsets {
            start: location.span.start,
            end: location.span.end,
        }
    }
}

/// Innermost frame below `start` containing `range`.
///
/// Ties keep the frame found first; with no containing frame the lookup
/// starts from `start` itself.
pub fn target_frame(table: &SymbolTable, range: Option<QueryRange>, start: FrameId) -> FrameId {
    let Some(range) = range else {
        return start;
    };
    let mut best: Option<(FrameId, u32)> = None;
    for frame in table.frames_below(start) {
        if let Some(slack) = range.slack(&table.frame(frame).location) {
            let closer = match best {
                Some((_, current)) => slack < current,
                None => true,
            };
            if closer {
                best = Some((frame, slack));
            }
        }
    }
    best.map_or(start, |(frame, _)| frame)
}

/// Visit frames outwards from `target`, stopping when `visit` returns `true`.
fn walk_frames(
    table: &SymbolTable,
    start: FrameId,
    target: FrameId,
    mut visit: impl FnMut(FrameId) -> bool,
) {
    let mut captured: Vec<FrameId> = table.frame(start).parent.into_iter().collect();
    let mut searched: FxHashSet<FrameId> = FxHashSet::default();
    let mut current = Some(target);

    while let Some(frame_id) = current {
        searched.insert(frame_id);
        if visit(frame_id) {
            return;
        }

        let frame = table.frame(frame_id);
        if let Some(capture) = frame.capture {
            if !captured.contains(&capture) {
                captured.push(capture);
            }
        }

        current = frame.parent.or_else(|| captured.pop());
        while let Some(next) = current {
            if !searched.contains(&next) {
                break;
            }
            current = captured.pop();
        }
    }
}

/// Best declaration of `name` visible from `range` below `start`.
pub fn find_symbol(
    table: &SymbolTable,
    name: Name,
    range: Option<QueryRange>,
    start: FrameId,
) -> Option<SymbolId> {
    let target = target_frame(table, range, start);
    let mut found = None;
    walk_frames(table, start, target, |frame| {
        found = table
            .frame(frame)
            .symbols()
            .find(|&symbol| table.symbol(symbol).id == Some(name));
        found.is_some()
    });
    trace!(?name, ?found, "find_symbol");
    found
}

/// Every entry whose name starts with `prefix`, innermost frames first.
///
/// Shadowed declarations in outer frames are included.
pub fn find_symbols_with_prefix(
    table: &SymbolTable,
    interner: &StringInterner,
    prefix: &str,
    range: Option<QueryRange>,
    start: FrameId,
) -> Vec<SymbolId> {
    let target = target_frame(table, range, start);
    let mut found = Vec::new();
    walk_frames(table, start, target, |frame| {
        found.extend(table.frame(frame).symbols().filter(|&symbol| {
            table
                .symbol(symbol)
                .id
                .is_some_and(|id| interner.lookup(id).starts_with(prefix))
        }));
        false
    });
    found
}

#[cfg(test)]
mod tests;
