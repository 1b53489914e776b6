//! Markdown parsing subsystem
//!
//! This module handles turning raw document text into ranged elements:
//! - `elements`: the typed element records and their range invariants
//! - `extract`: the single-pass walk over the grammar parser's output
//! - `cache`: version-keyed memoization of parse results
//!
//! The grammar parser itself (pulldown-cmark) is treated as a black box
//! producing events with byte spans; everything range-shaped is computed
//! here from the raw text.

pub mod cache;
pub mod elements;
pub mod extract;

pub use cache::ParseCache;
pub use elements::{
    BlockquoteElement, Element, EmphasisElement, EmphasisVariant, FencedCodeElement,
    HeaderElement, HeaderStyle, HorizontalRuleElement, ImageElement, InlineCodeElement,
    LinkElement, ListItemElement, MetadataElement, TableAlignment, TableCell, TableElement,
    TableRow, TaskItemElement, DIAGRAM_LANGUAGES,
};
pub use extract::extract;

use crate::position::{Position, SourceRange};

/// All elements extracted from one parse of a document
///
/// One ordered collection per element kind, each sorted by document
/// position. A parsed document is immutable once built: a new parse
/// supersedes it, nothing mutates it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub headers: Vec<HeaderElement>,
    pub emphasis: Vec<EmphasisElement>,
    pub task_items: Vec<TaskItemElement>,
    pub inline_code: Vec<InlineCodeElement>,
    pub links: Vec<LinkElement>,
    pub blockquotes: Vec<BlockquoteElement>,
    pub horizontal_rules: Vec<HorizontalRuleElement>,
    pub fenced_code: Vec<FencedCodeElement>,
    pub images: Vec<ImageElement>,
    pub list_items: Vec<ListItemElement>,
    pub metadata: Vec<MetadataElement>,
    pub tables: Vec<TableElement>,
}

/// A borrowed reference to an element of any kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementRef<'a> {
    Header(&'a HeaderElement),
    Emphasis(&'a EmphasisElement),
    TaskItem(&'a TaskItemElement),
    InlineCode(&'a InlineCodeElement),
    Link(&'a LinkElement),
    Blockquote(&'a BlockquoteElement),
    HorizontalRule(&'a HorizontalRuleElement),
    FencedCode(&'a FencedCodeElement),
    Image(&'a ImageElement),
    ListItem(&'a ListItemElement),
    Metadata(&'a MetadataElement),
    Table(&'a TableElement),
}

impl ElementRef<'_> {
    /// Outer range of the referenced element
    pub fn range(&self) -> SourceRange {
        match self {
            ElementRef::Header(e) => e.range,
            ElementRef::Emphasis(e) => e.range,
            ElementRef::TaskItem(e) => e.range,
            ElementRef::InlineCode(e) => e.range,
            ElementRef::Link(e) => e.range,
            ElementRef::Blockquote(e) => e.range,
            ElementRef::HorizontalRule(e) => e.range,
            ElementRef::FencedCode(e) => e.range,
            ElementRef::Image(e) => e.range,
            ElementRef::ListItem(e) => e.range,
            ElementRef::Metadata(e) => e.range,
            ElementRef::Table(e) => e.range,
        }
    }
}

impl ParsedDocument {
    /// A parse with no elements
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if no elements were extracted
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Total number of extracted elements across all kinds
    pub fn element_count(&self) -> usize {
        self.headers.len()
            + self.emphasis.len()
            + self.task_items.len()
            + self.inline_code.len()
            + self.links.len()
            + self.blockquotes.len()
            + self.horizontal_rules.len()
            + self.fenced_code.len()
            + self.images.len()
            + self.list_items.len()
            + self.metadata.len()
            + self.tables.len()
    }

    /// Fenced code blocks routed to the diagram renderer
    pub fn diagram_blocks(&self) -> impl Iterator<Item = &FencedCodeElement> {
        self.fenced_code.iter().filter(|block| block.is_diagram())
    }

    /// Find the innermost element covering an editor position
    ///
    /// The range-lookup contract for hover and navigation providers. When
    /// ranges nest (a link inside a blockquote), the element with the
    /// smallest span wins.
    pub fn element_at(&self, position: Position) -> Option<ElementRef<'_>> {
        fn consider<'a, E: Element>(
            best: &mut Option<(usize, ElementRef<'a>)>,
            items: &'a [E],
            position: Position,
            wrap: impl Fn(&'a E) -> ElementRef<'a>,
        ) {
            for item in items {
                let range = item.range();
                if !range.to_editor().contains(position) {
                    continue;
                }
                let len = range.len();
                if best.as_ref().map_or(true, |(best_len, _)| len < *best_len) {
                    *best = Some((len, wrap(item)));
                }
            }
        }

        let mut best = None;
        consider(&mut best, &self.headers, position, ElementRef::Header);
        consider(&mut best, &self.emphasis, position, ElementRef::Emphasis);
        consider(&mut best, &self.task_items, position, ElementRef::TaskItem);
        consider(&mut best, &self.inline_code, position, ElementRef::InlineCode);
        consider(&mut best, &self.links, position, ElementRef::Link);
        consider(&mut best, &self.blockquotes, position, ElementRef::Blockquote);
        consider(
            &mut best,
            &self.horizontal_rules,
            position,
            ElementRef::HorizontalRule,
        );
        consider(&mut best, &self.fenced_code, position, ElementRef::FencedCode);
        consider(&mut best, &self.images, position, ElementRef::Image);
        consider(&mut best, &self.list_items, position, ElementRef::ListItem);
        consider(&mut best, &self.metadata, position, ElementRef::Metadata);
        consider(&mut best, &self.tables, position, ElementRef::Table);
        best.map(|(_, element)| element)
    }

    /// Drop every element whose range overlaps `cut`
    ///
    /// The frontmatter pre-pass and the grammar parser read the same text
    /// independently; elements the grammar reported inside a detected
    /// metadata block are double-reports and get filtered here.
    pub(crate) fn retain_outside(&mut self, cut: SourceRange) {
        self.headers.retain(|e| !e.range.overlaps(&cut));
        self.emphasis.retain(|e| !e.range.overlaps(&cut));
        self.task_items.retain(|e| !e.range.overlaps(&cut));
        self.inline_code.retain(|e| !e.range.overlaps(&cut));
        self.links.retain(|e| !e.range.overlaps(&cut));
        self.blockquotes.retain(|e| !e.range.overlaps(&cut));
        self.horizontal_rules.retain(|e| !e.range.overlaps(&cut));
        self.fenced_code.retain(|e| !e.range.overlaps(&cut));
        self.images.retain(|e| !e.range.overlaps(&cut));
        self.list_items.retain(|e| !e.range.overlaps(&cut));
        self.tables.retain(|e| !e.range.overlaps(&cut));
    }

    /// Restore per-kind document order after out-of-order finalization
    pub(crate) fn sort_by_position(&mut self) {
        self.headers.sort_by_key(|e| e.range.start.offset);
        self.emphasis.sort_by_key(|e| e.range.start.offset);
        self.task_items.sort_by_key(|e| e.range.start.offset);
        self.inline_code.sort_by_key(|e| e.range.start.offset);
        self.links.sort_by_key(|e| e.range.start.offset);
        self.blockquotes.sort_by_key(|e| e.range.start.offset);
        self.horizontal_rules.sort_by_key(|e| e.range.start.offset);
        self.fenced_code.sort_by_key(|e| e.range.start.offset);
        self.images.sort_by_key(|e| e.range.start.offset);
        self.list_items.sort_by_key(|e| e.range.start.offset);
        self.tables.sort_by_key(|e| e.range.start.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_at_prefers_innermost() {
        let doc = extract("> see [docs](https://example.com) here");

        let hit = doc.element_at(Position::new(0, 8));
        assert!(matches!(
            hit,
            Some(ElementRef::Link(link)) if link.url == "https://example.com"
        ));

        // Outside the link but inside the quote
        let hit = doc.element_at(Position::new(0, 2));
        assert!(matches!(hit, Some(ElementRef::Blockquote(_))));
    }

    #[test]
    fn test_element_at_misses_plain_text() {
        let doc = extract("# Title\n\nplain body");
        assert!(doc.element_at(Position::new(2, 3)).is_none());
        assert!(matches!(
            doc.element_at(Position::new(0, 1)),
            Some(ElementRef::Header(_))
        ));
    }
}
