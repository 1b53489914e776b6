//! Blockquote decoration
//!
//! Quotes are containers: nested elements decorate themselves, and the
//! quote contributes a bordered line style plus dimmed `>` markers. The
//! markers are never concealed; removing them would shift every quoted
//! line left and make nesting depth illegible.

use crate::decorations::{DecorationSet, Decorator, PassContext, StyleId};
use crate::parser::BlockquoteElement;
use crate::visibility::Visibility;

pub struct BlockquoteDecorator;

impl Decorator for BlockquoteDecorator {
    type Element = BlockquoteElement;

    fn decorate(
        &self,
        element: &BlockquoteElement,
        visibility: Visibility,
        _ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        if visibility == Visibility::Raw {
            return;
        }
        for marker in &element.marker_ranges {
            out.push_range(StyleId::BlockquoteMarker, marker.clamped_to(element.range));
        }
        out.push_range(StyleId::BlockquoteLine, element.range);
    }
}
