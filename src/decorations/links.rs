//! Link decoration
//!
//! Brackets and the `(url)` tail are syntax; the link text stays styled
//! in every state and carries the target as hover text.

use crate::decorations::{route_marker, Decoration, DecorationSet, Decorator, PassContext, StyleId};
use crate::parser::LinkElement;
use crate::visibility::Visibility;

pub struct LinkDecorator;

impl Decorator for LinkDecorator {
    type Element = LinkElement;

    fn decorate(
        &self,
        element: &LinkElement,
        visibility: Visibility,
        _ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        route_marker(out, visibility, element.open_bracket_range, element.range);
        route_marker(out, visibility, element.close_bracket_range, element.range);
        route_marker(out, visibility, element.url_part_range, element.range);

        if !element.text_range.is_empty() {
            out.push(
                StyleId::LinkText,
                Decoration::new(element.text_range.to_editor()).with_hover(element.url.clone()),
            );
        }
    }
}
