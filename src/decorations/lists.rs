//! List item decoration
//!
//! Source markers are concealed and replaced by glyph overlays: a bullet
//! for unordered items, the computed ordinal for ordered ones. Leading
//! indentation is real text and stays put, so nesting depth survives.

use crate::decorations::{
    route_marker, Decoration, DecorationSet, Decorator, Overlay, PassContext, StyleId,
};
use crate::parser::ListItemElement;
use crate::position::EditorRange;
use crate::visibility::Visibility;

const BULLET: &str = "• ";

pub struct ListDecorator;

impl Decorator for ListDecorator {
    type Element = ListItemElement;

    fn decorate(
        &self,
        element: &ListItemElement,
        visibility: Visibility,
        _ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        route_marker(out, visibility, element.marker_range, element.range);

        if visibility != Visibility::Raw {
            let anchor = EditorRange::caret(element.marker_range.start.to_editor());
            match element.index {
                Some(index) => out.push(
                    StyleId::ListNumber,
                    Decoration::new(anchor).with_overlay(Overlay::before(format!("{index}. "))),
                ),
                None => out.push(
                    StyleId::ListBullet,
                    Decoration::new(anchor).with_overlay(Overlay::before(BULLET)),
                ),
            }
        }
    }
}
