//! Diagram block decoration
//!
//! A diagram fence whose render has resolved conceals its whole source
//! and shows the artifact as an overlay. Anything short of a resolved
//! artifact, including a failed render, falls back to the same fence
//! dimming ordinary code blocks get, so a broken renderer degrades to a
//! working editor instead of an error in the document.

use crate::decorations::code_blocks::dim_fences;
use crate::decorations::{
    route_marker, Decoration, DecorationSet, Decorator, Overlay, PassContext, Placement, StyleId,
};
use crate::diagram::{content_key, DiagramState};
use crate::parser::FencedCodeElement;
use crate::position::EditorRange;
use crate::visibility::Visibility;

pub struct DiagramDecorator;

impl Decorator for DiagramDecorator {
    type Element = FencedCodeElement;

    fn decorate(
        &self,
        element: &FencedCodeElement,
        visibility: Visibility,
        ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        if !element.is_diagram() {
            return;
        }
        let source = ctx
            .text
            .get(element.content_range.start.offset..element.content_range.end.offset)
            .unwrap_or("");
        let key = content_key(source, ctx.dark_theme);

        match ctx.diagrams.state(key) {
            Some(DiagramState::Ready(artifact)) => {
                route_marker(out, visibility, element.range, element.range);
                if visibility != Visibility::Raw {
                    let anchor = EditorRange::caret(element.range.start.to_editor());
                    out.push(
                        StyleId::DiagramImage,
                        Decoration::new(anchor).with_overlay(Overlay::image(
                            Placement::Before,
                            artifact.uri.clone(),
                            artifact.width,
                            artifact.height,
                        )),
                    );
                }
            }
            // Pending, failed, or never dispatched: plain code styling
            _ => dim_fences(element, visibility, out),
        }
    }
}
