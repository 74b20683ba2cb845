//! Position and location tracking for OPN source
//!
//! The lexer produces byte ranges into the source buffer; AST nodes and
//! diagnostics carry line/column locations. [`SourceMap`] bridges the two
//! with a one-time scan of line starts followed by O(log n) binary-search
//! lookups per conversion.
//!
//! Lines and columns are 1-based, matching what editors and CLI output
//! expect. Byte ranges stay 0-based half-open, as produced by logos.
//!
//! Location assignment is bottom-up: leaf nodes take their token's range,
//! parents take the bounding box of their children. Every node's location
//! is contained within its parent's, and the root compilation unit covers
//! the entire input.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A 1-based line/column position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// A start/end position pair bounding one syntactic element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Check if a position falls within this location
    pub fn contains_position(&self, pos: Position) -> bool {
        (self.start.line < pos.line
            || (self.start.line == pos.line && self.start.column <= pos.column))
            && (self.end.line > pos.line
                || (self.end.line == pos.line && self.end.column >= pos.column))
    }

    /// Check if another location is fully contained within this one
    pub fn contains(&self, other: Location) -> bool {
        self.contains_position(other.start) && self.contains_position(other.end)
    }

    /// Bounding box of two locations
    pub fn merge(&self, other: Location) -> Location {
        Location::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(Position::default(), Position::default())
    }
}

/// Bounding box over a list of locations; the default location if empty
pub fn merge_all(locations: &[Location]) -> Location {
    locations
        .iter()
        .copied()
        .reduce(|a, b| a.merge(b))
        .unwrap_or_default()
}

/// Fast conversion from byte offsets to line/column positions
pub struct SourceMap {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    /// Total length of the source in bytes
    len: usize,
}

impl SourceMap {
    /// Scan the source once, recording where each line begins
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Convert a byte offset to a 1-based line/column position
    pub fn position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(line + 1, column + 1)
    }

    /// Convert a byte range to a location
    pub fn location(&self, range: &Range<usize>) -> Location {
        Location::new(self.position(range.start), self.position(range.end))
    }

    /// Location covering the entire source
    pub fn whole(&self) -> Location {
        Location::new(self.position(0), self.position(self.len))
    }

    /// Total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
