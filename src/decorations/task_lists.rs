//! Task list decoration
//!
//! The `- [ ]` source checkbox is concealed and a glyph overlay takes its
//! place. Completed tasks strike their content in every state; the glyph
//! disappears only while the item is raw.

use crate::decorations::{
    route_marker, Decoration, DecorationSet, Decorator, Overlay, PassContext, StyleId,
};
use crate::parser::TaskItemElement;
use crate::position::EditorRange;
use crate::visibility::Visibility;

const GLYPH_UNCHECKED: &str = "☐ ";
const GLYPH_CHECKED: &str = "☑ ";

pub struct TaskListDecorator;

impl Decorator for TaskListDecorator {
    type Element = TaskItemElement;

    fn decorate(
        &self,
        element: &TaskItemElement,
        visibility: Visibility,
        _ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        route_marker(out, visibility, element.checkbox_range, element.range);

        if element.checked && !element.content_range.is_empty() {
            out.push_range(StyleId::TaskDoneContent, element.content_range);
        }

        if visibility != Visibility::Raw {
            let (style, glyph) = if element.checked {
                (StyleId::TaskGlyphDone, GLYPH_CHECKED)
            } else {
                (StyleId::TaskGlyph, GLYPH_UNCHECKED)
            };
            let anchor = EditorRange::caret(element.checkbox_range.start.to_editor());
            out.push(style, Decoration::new(anchor).with_overlay(Overlay::before(glyph)));
        }
    }
}
