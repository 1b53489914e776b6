//! Editing actions over parsed elements
//!
//! Actions compute text edits; the host applies them to its buffer and
//! synchronizes the document, which bumps the version and invalidates the
//! cached parse. Nothing here mutates the document directly.

use crate::document::{Document, TextEdit};
use crate::parser::ParsedDocument;
use crate::position::{EditorRange, Position, Selection};
use regex::Regex;
use std::sync::LazyLock;

/// Bracketed checkbox token on a task line
static CHECKBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*(\[[ xX]\])").expect("checkbox pattern compiles"));

/// Compute the edit that flips the task checkbox on a line
///
/// `[ ]` becomes `[x]`, `[x]` or `[X]` becomes `[ ]`. The replacement is
/// always exactly three characters, so toggling twice restores the original
/// text. Lines without a checkbox produce no edit.
pub fn toggle_checkbox(document: &Document, line: usize) -> Option<TextEdit> {
    let text = document.line_without_newline(line)?;
    let token = CHECKBOX_RE.captures(&text)?.get(1)?;

    let new_text = match token.as_str() {
        "[ ]" => "[x]",
        _ => "[ ]",
    };
    Some(TextEdit {
        range: EditorRange::new(
            Position::new(line, token.start()),
            Position::new(line, token.end()),
        ),
        new_text: new_text.to_string(),
    })
}

/// Find the task line whose checkbox a click landed on
///
/// A click is a single collapsed selection; anything else (multiple
/// selections, an actual range) is a drag or a multi-cursor edit, not a
/// checkbox hit. Returns the 0-indexed editor line, ready to hand to
/// [`toggle_checkbox`].
pub fn clicked_checkbox(parsed: &ParsedDocument, selections: &[Selection]) -> Option<usize> {
    let [selection] = selections else {
        return None;
    };
    if !selection.is_collapsed() {
        return None;
    }

    let cursor = selection.cursor();
    let line = cursor.display_line();
    let column = cursor.display_column();
    parsed
        .task_items
        .iter()
        .find(|task| {
            let checkbox = task.checkbox_range;
            line == checkbox.start.line
                && column >= checkbox.start.column
                && column < checkbox.end.column
        })
        .map(|task| task.checkbox_range.start_line())
}
