//! Editor host interface
//!
//! The engine is host-agnostic: the editor supplies its view state each
//! pass and receives decoration batches through [`DecorationSink`]. Apply
//! semantics are replace-per-style, which is why the engine sends every
//! style every pass, empty or not.

use crate::decorations::{Decoration, StyleId};
use crate::position::{Position, Selection};
use std::ops::Range;

/// Editor state the engine needs for one pass
#[derive(Debug, Clone)]
pub struct ViewState {
    /// All selections, possibly more than one
    pub selections: Vec<Selection>,

    /// Visible line window, 0-indexed and end-exclusive
    pub visible_lines: Range<usize>,

    /// Whether the host renders a dark theme
    pub dark_theme: bool,
}

impl ViewState {
    pub fn new(selections: Vec<Selection>, visible_lines: Range<usize>, dark_theme: bool) -> Self {
        Self {
            selections,
            visible_lines,
            dark_theme,
        }
    }

    /// Single collapsed cursor with an unbounded window
    pub fn with_cursor(position: Position) -> Self {
        Self {
            selections: vec![Selection::collapsed(position)],
            ..Default::default()
        }
    }

    /// Active cursor position of each selection
    pub fn cursors(&self) -> Vec<Position> {
        self.selections.iter().map(Selection::cursor).collect()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selections: Vec::new(),
            visible_lines: 0..usize::MAX,
            dark_theme: false,
        }
    }
}

/// Receiver for decoration batches
///
/// Each call replaces all previous decorations of that style. An error
/// from one style does not stop the pass; the engine logs it and applies
/// the remaining styles.
pub trait DecorationSink {
    fn apply(&mut self, style: StyleId, decorations: &[Decoration]) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursors_take_active_ends() {
        let view = ViewState::new(
            vec![
                Selection::new(Position::new(0, 0), Position::new(0, 4)),
                Selection::collapsed(Position::new(3, 2)),
            ],
            0..100,
            false,
        );
        assert_eq!(
            view.cursors(),
            vec![Position::new(0, 4), Position::new(3, 2)]
        );
    }

    #[test]
    fn test_with_cursor_is_collapsed() {
        let view = ViewState::with_cursor(Position::new(5, 1));
        assert_eq!(view.selections.len(), 1);
        assert!(view.selections[0].is_collapsed());
    }
}
