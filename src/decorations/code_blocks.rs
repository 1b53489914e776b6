//! Fenced code block decoration
//!
//! Fences dim rather than hide: concealing them would merge the block
//! visually with surrounding prose and swallow the language tag. Content
//! lines are left to the host's own syntax highlighting. Diagram blocks
//! belong to the diagram decorator when diagram rendering is on.

use crate::decorations::{DecorationSet, Decorator, PassContext, StyleId};
use crate::parser::FencedCodeElement;
use crate::visibility::Visibility;

pub struct CodeBlockDecorator;

impl Decorator for CodeBlockDecorator {
    type Element = FencedCodeElement;

    fn decorate(
        &self,
        element: &FencedCodeElement,
        visibility: Visibility,
        ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        if element.is_diagram() && ctx.config.render_diagrams {
            return;
        }
        dim_fences(element, visibility, out);
    }
}

/// Dim both fence lines unless the block is raw
///
/// Shared with the diagram decorator, which falls back to plain fence
/// styling for pending and failed renders.
pub(crate) fn dim_fences(
    element: &FencedCodeElement,
    visibility: Visibility,
    out: &mut DecorationSet,
) {
    if visibility == Visibility::Raw {
        return;
    }
    out.push_range(StyleId::CodeFence, element.open_fence_range);
    out.push_range(StyleId::CodeFence, element.close_fence_range);
}
