//! Table decoration
//!
//! Tables never conceal or collapse anything: every dim is opacity-only,
//! so column widths are identical in every state and the grid does not
//! shimmer as the cursor moves. Suppression is per row rather than per
//! element, letting the user edit one row while the rest stays styled.

use crate::decorations::{Decoration, DecorationSet, Decorator, Overlay, PassContext, StyleId};
use crate::parser::{TableAlignment, TableElement};
use crate::visibility::Visibility;
use std::collections::HashSet;

pub struct TableDecorator;

fn alignment_glyph(alignment: TableAlignment) -> &'static str {
    match alignment {
        TableAlignment::Left => " ◁",
        TableAlignment::Center => " ◇",
        TableAlignment::Right => " ▷",
    }
}

impl Decorator for TableDecorator {
    type Element = TableElement;

    fn decorate(
        &self,
        element: &TableElement,
        _visibility: Visibility,
        ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        // Row-level cursor handling replaces the element-level state
        let cursor_lines: HashSet<usize> =
            ctx.cursors.iter().map(|cursor| cursor.display_line()).collect();

        for row in &element.rows {
            if cursor_lines.contains(&row.range.start.line) {
                continue;
            }
            for (column, cell) in row.cells.iter().enumerate() {
                if row.is_header && !cell.content_range.is_empty() {
                    let mut decoration = Decoration::new(cell.content_range.to_editor());
                    if let Some(Some(alignment)) = element.alignments.get(column) {
                        decoration =
                            decoration.with_overlay(Overlay::after(alignment_glyph(*alignment)));
                    }
                    out.push(StyleId::TableHeader, decoration);
                }
                out.push_range(StyleId::TablePipe, cell.pipe_range);
            }
            if let Some(pipe) = row.trailing_pipe {
                out.push_range(StyleId::TablePipe, pipe);
            }
        }

        if !cursor_lines.contains(&element.separator_range.start.line) {
            out.push_range(StyleId::TableSeparator, element.separator_range);
        }
    }
}
