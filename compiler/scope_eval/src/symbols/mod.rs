//! Frame and symbol arenas.
//!
//! Frames form a tree through `parent` edges and a second graph through
//! `capture` edges. Both are plain ids, so traversals carry their own
//! visited sets.

mod entry;
mod frame;

use std::collections::VecDeque;

pub use entry::{SymbolEntry, SymbolId};
pub use frame::{Frame, FrameId, StackEntry};

/// Every frame and symbol created by one build.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<SymbolEntry>,
    frames: Vec<Frame>,
    main: Option<FrameId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root frame of the last analyzed program.
    #[inline]
    pub fn main_frame(&self) -> Option<FrameId> {
        self.main
    }

    pub(crate) fn set_main_frame(&mut self, frame: FrameId) {
        self.main = Some(frame);
    }

    pub fn alloc_symbol(&mut self, entry: SymbolEntry) -> SymbolId {
        let id = SymbolId::new(u32::try_from(self.symbols.len()).unwrap_or(u32::MAX));
        self.symbols.push(entry);
        id
    }

    #[inline]
    pub fn symbol(&self, id: SymbolId) -> &SymbolEntry {
        &self.symbols[id.index()]
    }

    #[inline]
    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut SymbolEntry {
        &mut self.symbols[id.index()]
    }

    /// Copy an entry into a fresh slot. Aggregate children stay shared.
    pub fn duplicate(&mut self, id: SymbolId) -> SymbolId {
        let entry = self.symbol(id).clone();
        self.alloc_symbol(entry)
    }

    pub fn alloc_frame(&mut self, frame: Frame) -> FrameId {
        let id = FrameId::new(u32::try_from(self.frames.len()).unwrap_or(u32::MAX));
        self.frames.push(frame);
        id
    }

    #[inline]
    pub fn frame(&self, id: FrameId) -> &Frame {
        &self.frames[id.index()]
    }

    /// Append a symbol to a frame's declaration log.
    pub fn push_symbol(&mut self, frame: FrameId, symbol: SymbolId) {
        self.frames[frame.index()].stack.push(StackEntry::Symbol(symbol));
    }

    /// Attach `child` to `frame` as a nested scope.
    pub fn push_frame(&mut self, frame: FrameId, child: FrameId) {
        self.frames[frame.index()].stack.push(StackEntry::Frame(child));
    }

    /// Detached copy of a frame sharing its parent and declarations, with
    /// `capture` replacing the capture edge when given. Nested frames are
    /// left out, so lookups made from the copy start at the copy. Pushing
    /// into the copy leaves the original untouched.
    pub fn snapshot_frame(&mut self, id: FrameId, capture: Option<FrameId>) -> FrameId {
        let original = self.frame(id);
        let mut copy = Frame::new(
            original.id,
            original.parent,
            capture.or(original.capture),
            original.location,
        );
        copy.stack = original.symbols().map(StackEntry::Symbol).collect();
        self.alloc_frame(copy)
    }

    /// `start` and every frame nested below it, breadth first.
    pub fn frames_below(&self, start: FrameId) -> Vec<FrameId> {
        let mut found = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(frame) = queue.pop_front() {
            found.push(frame);
            queue.extend(self.frame(frame).children());
        }
        found
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests;
