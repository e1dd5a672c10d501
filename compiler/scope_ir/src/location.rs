//! Line/column locations.
//!
//! Lines are 1-based and columns are 0-based character offsets within the
//! line. A [`Location`] carries both the line/column range and the byte span
//! so consumers can pick whichever granularity they need.

use std::fmt;

use crate::Span;

/// A single line/column position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        LineCol { line, column }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range of a node, frame or diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Location {
    pub start: LineCol,
    pub end: LineCol,
    pub span: Span,
}

impl Location {
    #[inline]
    pub const fn new(start: LineCol, end: LineCol, span: Span) -> Self {
        Location { start, end, span }
    }

    /// Location covering both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Location) -> Location {
        Location {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            span: self.span.merge(other.span),
        }
    }

    /// Whether the byte range of `other` lies inside this location.
    #[inline]
    pub fn contains_offsets(&self, start: u32, end: u32) -> bool {
        self.span.start <= start && end <= self.span.end
    }

    /// Whether the line range `start..=end` lies inside this location.
    #[inline]
    pub fn contains_lines(&self, start: u32, end: u32) -> bool {
        self.start.line <= start && end <= self.end.line
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Maps byte offsets of one source text to line/column positions.
pub struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<u32>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(u32::try_from(offset + 1).unwrap_or(u32::MAX));
            }
        }
        LineIndex {
            source,
            line_starts,
        }
    }

    /// Number of lines in the source (at least one).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line/column of a byte offset. Offsets past the end clamp to the end.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let offset = offset.min(u32::try_from(self.source.len()).unwrap_or(u32::MAX));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let column = self
            .source
            .get(line_start..offset as usize)
            .map_or(offset as usize - line_start, |text| text.chars().count());
        LineCol::new(
            u32::try_from(line + 1).unwrap_or(u32::MAX),
            u32::try_from(column).unwrap_or(u32::MAX),
        )
    }

    pub fn location(&self, span: Span) -> Location {
        Location::new(self.line_col(span.start), self.line_col(span.end), span)
    }
}
