//! Typed element records produced by the extractor
//!
//! Every element carries an outer `range` covering its full syntactic span,
//! markers included. Marker sub-ranges and the content range are disjoint
//! and, concatenated in document order, reconstruct the outer range exactly.
//! The two container kinds (blockquote, table) are exempt: their content is
//! a nested sub-tree rather than a flat payload.

use crate::position::SourceRange;

/// Languages whose fenced code blocks are routed to the diagram renderer
pub const DIAGRAM_LANGUAGES: &[&str] = &["mermaid"];

/// Common range accessors for visibility classification
pub trait Element {
    /// Full syntactic span of the element, markers included
    fn range(&self) -> SourceRange;

    /// Semantic payload span, markers excluded
    ///
    /// `None` for elements that are all syntax (images, horizontal rules):
    /// those can never classify as raw.
    fn content_range(&self) -> Option<SourceRange> {
        None
    }
}

/// Header marker style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// `# Heading` with leading hash marks
    Atx,
    /// Heading text underlined with `===` or `---`
    Setext,
}

/// An ATX or Setext header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderElement {
    /// Header level, 1 through 6
    pub level: u8,
    pub style: HeaderStyle,
    pub range: SourceRange,
    /// ATX: the `#` run plus separator space; Setext: the underline line
    pub syntax_range: SourceRange,
    pub content_range: SourceRange,
}

impl Element for HeaderElement {
    fn range(&self) -> SourceRange {
        self.range
    }

    fn content_range(&self) -> Option<SourceRange> {
        Some(self.content_range)
    }
}

/// Emphasis flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisVariant {
    Bold,
    Italic,
    /// `***text***`, synthesized from the grammar's nested strong+emphasis
    BoldItalic,
    Strikethrough,
}

impl EmphasisVariant {
    /// Width of the opening/closing marker run in bytes
    pub fn marker_len(&self) -> usize {
        match self {
            EmphasisVariant::Italic => 1,
            EmphasisVariant::Bold | EmphasisVariant::Strikethrough => 2,
            EmphasisVariant::BoldItalic => 3,
        }
    }
}

/// Inline emphasis: bold, italic, bold-italic, or strikethrough
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmphasisElement {
    pub variant: EmphasisVariant,
    pub range: SourceRange,
    pub open_marker_range: SourceRange,
    pub close_marker_range: SourceRange,
    pub content_range: SourceRange,
}

impl Element for EmphasisElement {
    fn range(&self) -> SourceRange {
        self.range
    }

    fn content_range(&self) -> Option<SourceRange> {
        Some(self.content_range)
    }
}

/// A task list item (`- [ ]` / `- [x]`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItemElement {
    pub checked: bool,
    pub range: SourceRange,
    /// The `- [x]` token including trailing whitespace
    pub checkbox_range: SourceRange,
    pub content_range: SourceRange,
}

impl Element for TaskItemElement {
    fn range(&self) -> SourceRange {
        self.range
    }

    fn content_range(&self) -> Option<SourceRange> {
        Some(self.content_range)
    }
}

/// Inline code span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineCodeElement {
    /// Recognized language prefix (the `ts` of `` `ts:code` ``), if any
    pub language: Option<String>,
    pub range: SourceRange,
    pub open_marker_range: SourceRange,
    pub close_marker_range: SourceRange,
    /// Span of the `lang:` prefix text, excluded from the content range
    pub prefix_range: Option<SourceRange>,
    pub content_range: SourceRange,
}

impl Element for InlineCodeElement {
    fn range(&self) -> SourceRange {
        self.range
    }

    /// Everything between the markers, prefix included
    fn content_range(&self) -> Option<SourceRange> {
        Some(SourceRange::new(
            self.open_marker_range.end,
            self.close_marker_range.start,
        ))
    }
}

/// An inline-style link `[text](url)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub url: String,
    pub range: SourceRange,
    /// The opening `[`
    pub open_bracket_range: SourceRange,
    pub text_range: SourceRange,
    /// The closing `]`
    pub close_bracket_range: SourceRange,
    /// The `(url)` part
    pub url_part_range: SourceRange,
}

impl Element for LinkElement {
    fn range(&self) -> SourceRange {
        self.range
    }

    fn content_range(&self) -> Option<SourceRange> {
        Some(self.text_range)
    }
}

/// A blockquote (container kind)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockquoteElement {
    pub range: SourceRange,
    /// One marker span per `>` occurrence, leading whitespace included
    pub marker_ranges: Vec<SourceRange>,
    /// Equals the outer range; quotes are containers
    pub content_range: SourceRange,
}

impl Element for BlockquoteElement {
    fn range(&self) -> SourceRange {
        self.range
    }

    fn content_range(&self) -> Option<SourceRange> {
        Some(self.content_range)
    }
}

/// A thematic break (`---`, `***`, `___`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizontalRuleElement {
    pub range: SourceRange,
    /// Equals the outer range; the rule is all syntax
    pub syntax_range: SourceRange,
}

impl Element for HorizontalRuleElement {
    fn range(&self) -> SourceRange {
        self.range
    }
}

/// A fenced code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedCodeElement {
    pub language: Option<String>,
    pub range: SourceRange,
    /// Opening fence line, its newline included
    pub open_fence_range: SourceRange,
    /// Closing fence line, without trailing newline
    pub close_fence_range: SourceRange,
    /// Interior lines, empty when the block has none
    pub content_range: SourceRange,
}

impl FencedCodeElement {
    /// Check if this block's language routes to the diagram renderer
    pub fn is_diagram(&self) -> bool {
        self.language
            .as_deref()
            .map(|lang| {
                DIAGRAM_LANGUAGES
                    .iter()
                    .any(|known| lang.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }
}

impl Element for FencedCodeElement {
    fn range(&self) -> SourceRange {
        self.range
    }

    fn content_range(&self) -> Option<SourceRange> {
        Some(self.content_range)
    }
}

/// An image reference `![alt](url)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageElement {
    pub url: String,
    pub alt: String,
    /// Equals the outer range; the whole reference is syntax
    pub syntax_range: SourceRange,
    pub range: SourceRange,
}

impl Element for ImageElement {
    fn range(&self) -> SourceRange {
        self.range
    }
}

/// A plain (non-task) list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemElement {
    pub ordered: bool,
    /// Ordinal for ordered items: list start + position within the list
    pub index: Option<u64>,
    /// Nesting depth approximated from leading whitespace width
    pub depth: usize,
    pub range: SourceRange,
    /// The `-`/`*`/`+` or `N.` marker plus one separator space
    pub marker_range: SourceRange,
    pub content_range: SourceRange,
}

impl Element for ListItemElement {
    fn range(&self) -> SourceRange {
        self.range
    }

    fn content_range(&self) -> Option<SourceRange> {
        Some(self.content_range)
    }
}

/// A frontmatter metadata block delimited by `---` lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataElement {
    /// Both delimiter lines included
    pub range: SourceRange,
    /// The lines between the delimiters
    pub content_range: SourceRange,
}

impl Element for MetadataElement {
    fn range(&self) -> SourceRange {
        self.range
    }

    fn content_range(&self) -> Option<SourceRange> {
        Some(self.content_range)
    }
}

/// Column alignment requested by a table's separator row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAlignment {
    Left,
    Center,
    Right,
}

/// One cell of a table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Trimmed cell text
    pub content: String,
    /// Trimmed cell text span
    pub content_range: SourceRange,
    /// The cell's leading `|`
    pub pipe_range: SourceRange,
}

/// One row of a table (header or body; the separator is not a row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub is_header: bool,
    /// Full line span of the row
    pub range: SourceRange,
    pub cells: Vec<TableCell>,
    /// The row's trailing `|`, when present
    pub trailing_pipe: Option<SourceRange>,
}

/// A pipe table (container kind)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableElement {
    pub range: SourceRange,
    /// The alignment delimiter line below the header, computed by line
    /// arithmetic since the grammar elides it
    pub separator_range: SourceRange,
    /// Per-column alignment, indexed by cell position; `None` means default
    pub alignments: Vec<Option<TableAlignment>>,
    /// Header row first, then body rows
    pub rows: Vec<TableRow>,
}

impl Element for TableElement {
    fn range(&self) -> SourceRange {
        self.range
    }

    fn content_range(&self) -> Option<SourceRange> {
        Some(self.range)
    }
}
