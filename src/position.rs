//! Coordinate spaces and range types
//!
//! The grammar parser reports 1-indexed line/column positions with byte
//! offsets; the host editor addresses text with 0-indexed lines and columns.
//! The conversion between the two spaces lives here and nowhere else, so
//! every component applies the identical transform.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Cursor position in editor space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,

    /// Column/byte offset within the line (0-indexed)
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Get 1-indexed line number for display
    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    /// Get 1-indexed column for display
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ln {}, Col {}", self.display_line(), self.display_column())
    }
}

/// Text selection in editor space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Start of selection (anchor point)
    pub start: Position,

    /// End of selection (active point, where the cursor sits)
    pub end: Position,
}

impl Selection {
    /// Create a new selection
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a collapsed selection (cursor with no text selected)
    pub fn collapsed(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Check if the selection is collapsed
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// The cursor position of this selection (the active point)
    pub fn cursor(&self) -> Position {
        self.end
    }

    /// Get the selection in normalized order (start before end)
    pub fn normalized(&self) -> (Position, Position) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// Check if a position is within the selection
    pub fn contains(&self, pos: Position) -> bool {
        let (start, end) = self.normalized();
        pos >= start && pos <= end
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::collapsed(Position::default())
    }
}

/// A point in parser space
///
/// Lines and columns are 1-indexed; `offset` is a byte offset into the
/// document and is the authoritative coordinate. Line and column are derived
/// from it and must stay consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    /// Line number (1-indexed)
    pub line: usize,

    /// Byte column within the line (1-indexed)
    pub column: usize,

    /// Byte offset from the start of the document
    pub offset: usize,
}

impl SourcePosition {
    /// Create a new source position
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        debug_assert!(line >= 1 && column >= 1, "source coordinates are 1-indexed");
        Self { line, column, offset }
    }

    /// Convert to editor space (0-indexed)
    pub fn to_editor(self) -> Position {
        debug_assert!(self.line >= 1 && self.column >= 1, "source coordinates are 1-indexed");
        Position::new(self.line.saturating_sub(1), self.column.saturating_sub(1))
    }
}

/// A span of source text
///
/// Half-open in offset terms: `end.offset` is exclusive. The same convention
/// applies to every element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    /// First position of the span
    pub start: SourcePosition,

    /// One past the last position of the span (exclusive)
    pub end: SourcePosition,
}

impl SourceRange {
    /// Create a new range
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        debug_assert!(start.offset <= end.offset, "range start must not exceed end");
        Self { start, end }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Check if the span covers no text
    pub fn is_empty(&self) -> bool {
        self.end.offset <= self.start.offset
    }

    /// First spanned line in editor space (0-indexed)
    pub fn start_line(&self) -> usize {
        self.start.line.saturating_sub(1)
    }

    /// Last spanned line in editor space (0-indexed)
    pub fn end_line(&self) -> usize {
        self.end.line.saturating_sub(1)
    }

    /// Check if a byte offset falls within the span
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start.offset && offset < self.end.offset
    }

    /// Check if another range lies entirely within this one
    pub fn contains_range(&self, other: &SourceRange) -> bool {
        other.start.offset >= self.start.offset && other.end.offset <= self.end.offset
    }

    /// Check if the span overlaps another in offset terms
    pub fn overlaps(&self, other: &SourceRange) -> bool {
        self.start.offset < other.end.offset && other.start.offset < self.end.offset
    }

    /// Check if the span touches any line of a 0-indexed line range
    pub fn intersects_lines(&self, lines: &Range<usize>) -> bool {
        self.start_line() < lines.end && self.end_line() >= lines.start
    }

    /// Convert to an editor-space range
    pub fn to_editor(self) -> EditorRange {
        EditorRange::new(self.start.to_editor(), self.end.to_editor())
    }

    /// Constrain this range to lie within `outer`
    ///
    /// A sub-range escaping its element's outer range is an extraction bug;
    /// debug builds assert, release builds clamp and carry on.
    pub fn clamped_to(self, outer: SourceRange) -> SourceRange {
        debug_assert!(
            outer.contains_range(&self),
            "sub-range {:?} escapes outer range {:?}",
            self,
            outer
        );
        let start = if self.start.offset < outer.start.offset {
            outer.start
        } else {
            self.start
        };
        let end = if self.end.offset > outer.end.offset {
            outer.end
        } else {
            self.end
        };
        SourceRange { start, end }
    }
}

/// A decoration target range in editor space
///
/// `end` is exclusive, matching the half-open source convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorRange {
    /// First position of the range
    pub start: Position,

    /// Exclusive end position of the range
    pub end: Position,
}

impl EditorRange {
    /// Create a new editor range
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create an empty range at a position (overlay anchor)
    pub fn caret(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Check if the range covers no text
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if a position falls within the range (end exclusive)
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position < self.end
    }
}
