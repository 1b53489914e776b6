//! Inline code decoration
//!
//! Backtick markers route by visibility; a recognized language prefix
//! (`` `ts:...` ``) is tinted separately unless the span is raw.

use crate::decorations::{route_marker, DecorationSet, Decorator, PassContext, StyleId};
use crate::parser::InlineCodeElement;
use crate::visibility::Visibility;

pub struct InlineCodeDecorator;

impl Decorator for InlineCodeDecorator {
    type Element = InlineCodeElement;

    fn decorate(
        &self,
        element: &InlineCodeElement,
        visibility: Visibility,
        _ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        route_marker(out, visibility, element.open_marker_range, element.range);
        route_marker(out, visibility, element.close_marker_range, element.range);

        if let Some(prefix) = element.prefix_range {
            if visibility != Visibility::Raw {
                out.push_range(StyleId::InlineCodePrefix, prefix);
            }
        }
        if !element.content_range.is_empty() {
            out.push_range(StyleId::InlineCode, element.content_range);
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
        run_decorator(&InlineCodeDecorator, &doc.inline_code, &ctx, &mut out);
        out
    }

    #[test]
    fn test_rendered_code_hides_backticks() {
        let out = decorate("see `code`", &[]);
        assert_eq!(out.get(StyleId::SyntaxHidden).len(), 2);
        let content = out.get(StyleId::InlineCode);
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].range.start.column, 5);
        assert_eq!(content[0].range.end.column, 9);
    }

    #[test]
    fn test_language_prefix_tinted() {
        let out = decorate("`rust:let x = 1;`", &[]);
        let prefix = out.get(StyleId::InlineCodePrefix);
        assert_eq!(prefix.len(), 1);
        assert_eq!(prefix[0].range.start.column, 1);
        assert_eq!(prefix[0].range.end.column, 6);
        // Content starts after the prefix
        assert_eq!(out.get(StyleId::InlineCode)[0].range.start.column, 6);
    }

    #[test]
    fn test_raw_span_drops_prefix_tint() {
        let out = decorate("`rust:let x = 1;`", &[Position::new(0, 8)]);
        assert!(out.get(StyleId::InlineCodePrefix).is_empty());
        assert_eq!(out.get(StyleId::InlineCode).len(), 1);
    }
}
