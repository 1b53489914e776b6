//! Header decoration
//!
//! Content keeps its level style in every visibility state; only the
//! marker run (or setext underline) is routed by cursor position.

use crate::decorations::{route_marker, DecorationSet, Decorator, PassContext, StyleId};
use crate::parser::HeaderElement;
use crate::visibility::Visibility;

pub struct HeaderDecorator;

impl Decorator for HeaderDecorator {
    type Element = HeaderElement;

    fn decorate(
        &self,
        element: &HeaderElement,
        visibility: Visibility,
        _ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        route_marker(out, visibility, element.syntax_range, element.range);
        if !element.content_range.is_empty() {
            out.push_range(StyleId::Header(element.level), element.content_range);
        }
    }
}
