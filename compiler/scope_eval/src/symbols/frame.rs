use std::fmt;

use scope_ir::{Location, Name};

use super::SymbolId;

/// Index into the frame arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct FrameId(u32);

impl FrameId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        FrameId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameId({})", self.0)
    }
}

/// One slot of a frame's declaration log.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StackEntry {
    Symbol(SymbolId),
    Frame(FrameId),
}

/// A lexical scope.
///
/// `stack` is append-only: redeclaring a name adds a second entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub id: Option<Name>,
    /// Enclosing frame as written in the source.
    pub parent: Option<FrameId>,
    /// Frame active where a closure was defined; searched only after the
    /// parent chain is exhausted.
    pub capture: Option<FrameId>,
    pub location: Location,
    pub stack: Vec<StackEntry>,
}

impl Frame {
    pub fn new(
        id: Option<Name>,
        parent: Option<FrameId>,
        capture: Option<FrameId>,
        location: Location,
    ) -> Self {
        Frame {
            id,
            parent,
            capture,
            location,
            stack: Vec::new(),
        }
    }

    /// Symbols declared directly in this frame, in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.stack.iter().filter_map(|entry| match entry {
            StackEntry::Symbol(id) => Some(*id),
            StackEntry::Frame(_) => None,
        })
    }

    /// Child frames, in creation order.
    pub fn children(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.stack.iter().filter_map(|entry| match entry {
            StackEntry::Frame(id) => Some(*id),
            StackEntry::Symbol(_) => None,
        })
    }
}
