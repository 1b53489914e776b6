//! Cursor-relative visibility for parsed elements
//!
//! Every element is in one of three states each pass. With no cursor on the
//! element it renders fully styled with syntax hidden. With a cursor on the
//! element's lines but outside its content, markers come back dimmed so the
//! user can aim at them. With a cursor inside the content, the element shows
//! raw source for editing.
//!
//! All comparisons run in parser space (1-indexed lines and byte columns);
//! editor cursors are lifted into that space here, keeping the offset
//! conversion in one direction only.

use crate::position::{Position, SourceRange};

/// How an element is displayed relative to the cursors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// No cursor on the element: fully styled, syntax hidden
    Rendered,
    /// Cursor on the element's lines but outside its content: syntax dimmed
    Ghost,
    /// Cursor inside the content: plain source, no concealment
    Raw,
}

/// Classify an element against the current cursor set
///
/// Any cursor inside the content makes the element raw, regardless of
/// where the other cursors sit. Cursors on the element's lines without
/// entering the content produce ghost. Elements with no content range
/// (`content` is `None`) can never be raw; a cursor on their lines ghosts
/// them.
pub fn classify(
    cursors: &[Position],
    outer: SourceRange,
    content: Option<SourceRange>,
) -> Visibility {
    let mut on_element = false;
    let last_line = last_covered_line(outer);

    for cursor in cursors {
        let line = cursor.display_line();
        if line < outer.start.line || line > last_line {
            continue;
        }
        match content {
            Some(content) if cursor_in_content(cursor, content) => return Visibility::Raw,
            _ => on_element = true,
        }
    }

    if on_element {
        Visibility::Ghost
    } else {
        Visibility::Rendered
    }
}

/// Last parser line a range actually covers
///
/// Ranges that swallow a trailing newline end exclusively at the first
/// column of the next line; they cover nothing there, so a cursor on that
/// line is off the element.
fn last_covered_line(outer: SourceRange) -> usize {
    if outer.end.line > outer.start.line && outer.end.column == 1 {
        outer.end.line - 1
    } else {
        outer.end.line
    }
}

/// Precise containment of a cursor within a content range
///
/// Column checks are inclusive at both ends: a cursor sitting immediately
/// after the last content character still counts as inside, so the element
/// stays raw while the user types at its edge. For multi-line content that
/// swallows its trailing newline the end sits at the first column of the
/// next line, so the start of a closing fence line is still at the edge.
fn cursor_in_content(cursor: &Position, content: SourceRange) -> bool {
    let line = cursor.display_line();
    let column = cursor.display_column();
    let start = content.start;
    let end = content.end;

    if line < start.line || line > end.line {
        return false;
    }
    if start.line == end.line {
        column >= start.column && column <= end.column
    } else if line == start.line {
        column >= start.column
    } else if line == end.line {
        column <= end.column
    } else {
        true
    }
}
