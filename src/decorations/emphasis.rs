//! Emphasis decoration (bold, italic, bold-italic, strikethrough)

use crate::decorations::{route_marker, DecorationSet, Decorator, PassContext, StyleId};
use crate::parser::{EmphasisElement, EmphasisVariant};
use crate::visibility::Visibility;

pub struct EmphasisDecorator;

fn content_style(variant: EmphasisVariant) -> StyleId {
    match variant {
        EmphasisVariant::Bold => StyleId::Bold,
        EmphasisVariant::Italic => StyleId::Italic,
        EmphasisVariant::BoldItalic => StyleId::BoldItalic,
        EmphasisVariant::Strikethrough => StyleId::Strikethrough,
    }
}

impl Decorator for EmphasisDecorator {
    type Element = EmphasisElement;

    fn decorate(
        &self,
        element: &EmphasisElement,
        visibility: Visibility,
        _ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        route_marker(out, visibility, element.open_marker_range, element.range);
        route_marker(out, visibility, element.close_marker_range, element.range);
        if !element.content_range.is_empty() {
            out.push_range(content_style(element.variant), element.content_range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreviewConfig;
    use crate::decorations::{run_decorator, testing};
    use crate::diagram::DiagramCache;
    use crate::parser::extract;
    use crate::position::Position;

    fn decorate(text: &str, cursors: &[Position]) -> DecorationSet {
        let doc = extract(text);
        let config = PreviewConfig::default();
        let diagrams = DiagramCache::new();
        let ctx = testing::pass_context(&config, cursors, text, &diagrams);
        let mut out = DecorationSet::new();
        run_decorator(&EmphasisDecorator, &doc.emphasis, &ctx, &mut out);
        out
    }

    #[test]
    fn test_rendered_bold_hides_both_markers() {
        let out = decorate("**bold**", &[]);
        assert_eq!(out.get(StyleId::SyntaxHidden).len(), 2);
        let content = out.get(StyleId::Bold);
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].range.start.column, 2);
        assert_eq!(content[0].range.end.column, 6);
    }

    #[test]
    fn test_each_variant_styles_its_content() {
        let out = decorate("*i* **b** ***bi*** ~~s~~", &[]);
        assert_eq!(out.get(StyleId::Italic).len(), 1);
        assert_eq!(out.get(StyleId::Bold).len(), 1);
        assert_eq!(out.get(StyleId::BoldItalic).len(), 1);
        assert_eq!(out.get(StyleId::Strikethrough).len(), 1);
        // Two markers per element
        assert_eq!(out.get(StyleId::SyntaxHidden).len(), 8);
    }

    #[test]
    fn test_cursor_inside_content_reveals_markers() {
        let out = decorate("**bold**", &[Position::new(0, 4)]);
        assert!(out.get(StyleId::SyntaxHidden).is_empty());
        assert!(out.get(StyleId::SyntaxGhost).is_empty());
        assert_eq!(out.get(StyleId::Bold).len(), 1);
    }

    #[test]
    fn test_cursor_on_line_ghosts_markers() {
        let out = decorate("**bold** tail", &[Position::new(0, 10)]);
        assert_eq!(out.get(StyleId::SyntaxGhost).len(), 2);
        assert_eq!(out.get(StyleId::Bold).len(), 1);
    }
}
