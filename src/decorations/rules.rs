//! Horizontal rule decoration
//!
//! A rendered rule conceals the dash run and draws a full-width line in
//! its place. Rules have no content range, so the element ghosts rather
//! than going raw when the cursor reaches its line.

use crate::decorations::{DecorationSet, Decorator, PassContext, StyleId};
use crate::parser::HorizontalRuleElement;
use crate::visibility::Visibility;

pub struct HorizontalRuleDecorator;

impl Decorator for HorizontalRuleDecorator {
    type Element = HorizontalRuleElement;

    fn decorate(
        &self,
        element: &HorizontalRuleElement,
        visibility: Visibility,
        _ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        match visibility {
            Visibility::Rendered => {
                out.push_range(StyleId::SyntaxHidden, element.syntax_range);
                out.push_range(StyleId::RuleLine, element.range);
            }
            Visibility::Ghost => {
                out.push_range(StyleId::SyntaxGhost, element.syntax_range);
            }
            Visibility::Raw => {}
        }
    }
}
