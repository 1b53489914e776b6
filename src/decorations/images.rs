//! Image decoration
//!
//! The `![alt](url)` source is concealed and an inline preview overlay is
//! anchored after it. Images have no content range, so the syntax comes
//! back dimmed, preview intact, when the cursor reaches the line.

use crate::decorations::{
    route_marker, Decoration, DecorationSet, Decorator, Overlay, PassContext, Placement, StyleId,
};
use crate::parser::ImageElement;
use crate::position::EditorRange;
use crate::visibility::Visibility;

pub struct ImageDecorator;

impl Decorator for ImageDecorator {
    type Element = ImageElement;

    fn decorate(
        &self,
        element: &ImageElement,
        visibility: Visibility,
        _ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        route_marker(out, visibility, element.syntax_range, element.range);

        if visibility != Visibility::Raw {
            let hover = if element.alt.is_empty() {
                element.url.clone()
            } else {
                element.alt.clone()
            };
            let anchor = EditorRange::caret(element.range.end.to_editor());
            out.push(
                StyleId::ImagePreview,
                Decoration::new(anchor)
                    .with_overlay(Overlay::image(Placement::After, element.url.clone(), None, None))
                    .with_hover(hover),
            );
        }
    }
}
