//! Decoration construction from parsed elements
//!
//! One decorator per element kind maps `(element, visibility)` to styled
//! ranges and overlays. Decorators are pure: the same elements, cursors,
//! and configuration always produce the same [`DecorationSet`], which is
//! what lets the engine re-apply passes without visual churn.

pub mod batch;
pub mod blockquotes;
pub mod code_blocks;
pub mod diagrams;
pub mod emphasis;
pub mod headers;
pub mod images;
pub mod inline_code;
pub mod links;
pub mod lists;
pub mod metadata;
pub mod rules;
pub mod style;
pub mod tables;
pub mod task_lists;

pub use batch::{Decoration, DecorationSet, Overlay, OverlayContent, Placement};
pub use style::{StyleId, StyleSheet, StyleSpec, ThemeColor};

use crate::config::PreviewConfig;
use crate::diagram::DiagramCache;
use crate::parser::elements::Element;
use crate::position::{Position, SourceRange};
use crate::visibility::{classify, Visibility};
use std::ops::Range;

/// Shared inputs of one decoration pass
pub struct PassContext<'a> {
    pub config: &'a PreviewConfig,
    /// Active cursor positions, one per selection
    pub cursors: &'a [Position],
    /// Visible line window (0-indexed), already padded with the scroll buffer
    pub visible: Range<usize>,
    pub dark_theme: bool,
    /// Full document text, for decorators that re-read source bytes
    pub text: &'a str,
    pub diagrams: &'a DiagramCache,
}

/// Maps one element kind to decorations
pub trait Decorator {
    type Element: Element;

    fn decorate(
        &self,
        element: &Self::Element,
        visibility: Visibility,
        ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    );
}

/// Run a decorator over every element inside the visible window
///
/// Elements outside the window are skipped before classification, so a
/// large document costs proportional to what is on screen.
pub fn run_decorator<D: Decorator>(
    decorator: &D,
    elements: &[D::Element],
    ctx: &PassContext<'_>,
    out: &mut DecorationSet,
) {
    for element in elements {
        let range = element.range();
        if !range.intersects_lines(&ctx.visible) {
            continue;
        }
        let visibility = classify(ctx.cursors, range, element.content_range());
        decorator.decorate(element, visibility, ctx, out);
    }
}

/// Route a marker range by visibility
///
/// Rendered conceals the marker, ghost dims it, raw leaves it untouched.
/// The marker is clamped into the element's outer range first.
pub(crate) fn route_marker(
    out: &mut DecorationSet,
    visibility: Visibility,
    marker: SourceRange,
    outer: SourceRange,
) {
    let marker = marker.clamped_to(outer);
    if marker.is_empty() {
        return;
    }
    match visibility {
        Visibility::Rendered => out.push_range(StyleId::SyntaxHidden, marker),
        Visibility::Ghost => out.push_range(StyleId::SyntaxGhost, marker),
        Visibility::Raw => {}
    }
}
