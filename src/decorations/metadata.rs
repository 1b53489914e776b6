//! Frontmatter decoration
//!
//! The whole block dims as a unit. A cursor inside the content reveals
//! plain source; the delimiters alone never collapse, since the block is
//! only metadata when both are present.

use crate::decorations::{DecorationSet, Decorator, PassContext, StyleId};
use crate::parser::MetadataElement;
use crate::visibility::Visibility;

pub struct MetadataDecorator;

impl Decorator for MetadataDecorator {
    type Element = MetadataElement;

    fn decorate(
        &self,
        element: &MetadataElement,
        visibility: Visibility,
        _ctx: &PassContext<'_>,
        out: &mut DecorationSet,
    ) {
        if visibility == Visibility::Raw {
            return;
        }
        out.push_range(StyleId::MetadataBlock, element.range);
    }
}
