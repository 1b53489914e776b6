//! Element extraction from raw Markdown text
//!
//! A single pass over pulldown-cmark's offset iterator produces the typed,
//! ranged element records. The grammar only reports byte spans per event;
//! every marker/content sub-range is recomputed here from the raw text so
//! that sub-ranges tile each element's outer range exactly.
//!
//! Malformed constructs (an unclosed fence, a table row without pipes, a
//! non-inline link) are skipped: the element is omitted from its collection
//! and extraction continues.

use crate::parser::elements::*;
use crate::parser::ParsedDocument;
use crate::position::{SourcePosition, SourceRange};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser, Tag};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Inline-code prefixes recognized as language tags (`` `ts:code` ``)
const LANGUAGE_PREFIXES: &[&str] = &[
    "ts", "typescript", "js", "javascript", "rust", "rs", "python", "py", "go", "java", "c",
    "cpp", "sh", "bash", "sql", "html", "css", "json", "yaml", "toml",
];

static TASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(-\s*\[[ xX]\])(\s*)").expect("task pattern compiles"));

static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*+]|\d+\.)\s").expect("list pattern compiles"));

static CODE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+#-]*):").expect("prefix pattern compiles"));

/// Byte offsets of every line start, for offset-to-position conversion
///
/// The extractor works on plain `&str` input, so it carries its own line
/// table instead of borrowing the document rope. Offsets are bytes; the
/// derived positions are 1-indexed like the rest of parser space.
pub(crate) struct LineMap {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self {
            line_starts,
            len: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 0-indexed line containing a byte offset
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset) - 1
    }

    /// Byte offset of a line's first character
    pub fn line_start(&self, line: usize) -> usize {
        self.line_starts.get(line).copied().unwrap_or(self.len)
    }

    /// Byte offset just past a line's last character, newline excluded
    pub fn line_end(&self, line: usize) -> usize {
        if line + 1 < self.line_starts.len() {
            self.line_starts[line + 1] - 1
        } else {
            self.len
        }
    }

    /// Source position (1-indexed) for a byte offset
    pub fn position(&self, offset: usize) -> SourcePosition {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        SourcePosition::new(line + 1, offset - self.line_start(line) + 1, offset)
    }

    /// Source range between two byte offsets
    pub fn range(&self, start: usize, end: usize) -> SourceRange {
        SourceRange::new(self.position(start), self.position(end))
    }
}

/// Extract all elements from Markdown text
///
/// The input is expected to use LF line endings ([`crate::Document`]
/// normalizes on construction).
pub fn extract(text: &str) -> ParsedDocument {
    let map = LineMap::new(text);
    let metadata = detect_frontmatter(text, &map);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut walker = Walker::new(text, &map);
    for (event, span) in Parser::new_ext(text, options).into_offset_iter() {
        walker.handle(event, span);
    }
    let mut doc = walker.finish();

    if let Some(meta) = metadata {
        doc.retain_outside(meta.range);
        doc.metadata.push(meta);
    }
    doc.sort_by_position();
    doc
}

/// Detect a frontmatter block with a structural pre-pass
///
/// Requires a literal `---` line at offset 0 and a matching closing `---`
/// line. Without the closing delimiter the text is not metadata and falls
/// through to the grammar parser, which reads the leading `---` as a
/// thematic break or setext underline.
fn detect_frontmatter(text: &str, map: &LineMap) -> Option<MetadataElement> {
    if map.line_count() < 2 {
        return None;
    }
    if &text[map.line_start(0)..map.line_end(0)] != "---" {
        return None;
    }
    for line in 1..map.line_count() {
        if &text[map.line_start(line)..map.line_end(line)] == "---" {
            let range = map.range(0, map.line_end(line));
            let content_range = map.range(map.line_start(1), map.line_start(line));
            return Some(MetadataElement {
                range,
                content_range,
            });
        }
    }
    None
}

/// Open list container state
struct ListContext {
    ordered: bool,
    start: u64,
    item_count: u64,
}

/// Open list item state; resolved to a task or plain item at `End(Item)`
struct ItemContext {
    span: Range<usize>,
    ordered: bool,
    index: u64,
    checked: Option<bool>,
}

/// Open inline link state
struct LinkContext {
    span: Range<usize>,
    url: String,
    inline: bool,
    /// Byte offset just past the last child node, anchor for the `](` scan
    last_child_end: Option<usize>,
}

/// Open image state, accumulating alt text
struct ImageContext {
    span: Range<usize>,
    url: String,
    alt: String,
}

struct Walker<'a> {
    text: &'a str,
    map: &'a LineMap,
    doc: ParsedDocument,
    list_stack: Vec<ListContext>,
    item_stack: Vec<ItemContext>,
    link_stack: Vec<LinkContext>,
    image_stack: Vec<ImageContext>,
    /// Raw emphasis spans; bold-italic pairs are merged in `finish`
    emphasis_spans: Vec<(Range<usize>, EmphasisVariant)>,
}

impl<'a> Walker<'a> {
    fn new(text: &'a str, map: &'a LineMap) -> Self {
        Self {
            text,
            map,
            doc: ParsedDocument::default(),
            list_stack: Vec::new(),
            item_stack: Vec::new(),
            link_stack: Vec::new(),
            image_stack: Vec::new(),
            emphasis_spans: Vec::new(),
        }
    }

    fn handle(&mut self, event: Event<'_>, span: Range<usize>) {
        self.note_link_child(&span);

        match event {
            Event::Start(Tag::Heading(level, _id, _classes)) => self.heading(level, span),
            Event::Start(Tag::BlockQuote) => self.blockquote(span),
            Event::Start(Tag::CodeBlock(kind)) => self.code_block(kind, span),
            Event::Start(Tag::List(start)) => self.list_stack.push(ListContext {
                ordered: start.is_some(),
                start: start.unwrap_or(1),
                item_count: 0,
            }),
            Event::End(Tag::List(_)) => {
                self.list_stack.pop();
            }
            Event::Start(Tag::Item) => {
                let (ordered, index) = match self.list_stack.last_mut() {
                    Some(list) => {
                        let index = list.start + list.item_count;
                        list.item_count += 1;
                        (list.ordered, index)
                    }
                    None => (false, 0),
                };
                self.item_stack.push(ItemContext {
                    span,
                    ordered,
                    index,
                    checked: None,
                });
            }
            Event::TaskListMarker(checked) => {
                if let Some(item) = self.item_stack.last_mut() {
                    item.checked = Some(checked);
                }
            }
            Event::End(Tag::Item) => {
                if let Some(item) = self.item_stack.pop() {
                    self.finish_item(item);
                }
            }
            Event::Start(Tag::Emphasis) => {
                self.emphasis_spans.push((span, EmphasisVariant::Italic));
            }
            Event::Start(Tag::Strong) => {
                self.emphasis_spans.push((span, EmphasisVariant::Bold));
            }
            Event::Start(Tag::Strikethrough) => {
                self.emphasis_spans
                    .push((span, EmphasisVariant::Strikethrough));
            }
            Event::Code(_) => self.inline_code(span),
            Event::Start(Tag::Link(link_type, url, _title)) => {
                self.link_stack.push(LinkContext {
                    span,
                    url: url.to_string(),
                    inline: link_type == LinkType::Inline,
                    last_child_end: None,
                });
            }
            Event::End(Tag::Link(..)) => {
                if let Some(link) = self.link_stack.pop() {
                    self.finish_link(link);
                }
            }
            Event::Start(Tag::Image(_link_type, url, _title)) => {
                self.image_stack.push(ImageContext {
                    span,
                    url: url.to_string(),
                    alt: String::new(),
                });
            }
            Event::End(Tag::Image(..)) => {
                if let Some(image) = self.image_stack.pop() {
                    let range = self.map.range(image.span.start, image.span.end);
                    self.doc.images.push(ImageElement {
                        url: image.url,
                        alt: image.alt,
                        syntax_range: range,
                        range,
                    });
                }
            }
            Event::Text(text) => {
                if let Some(image) = self.image_stack.last_mut() {
                    image.alt.push_str(&text);
                }
            }
            Event::Rule => {
                let span = self.trim_newlines(span);
                if !span.is_empty() {
                    let range = self.map.range(span.start, span.end);
                    self.doc.horizontal_rules.push(HorizontalRuleElement {
                        range,
                        syntax_range: range,
                    });
                }
            }
            Event::Start(Tag::Table(alignments)) => self.table(&alignments, span),
            _ => {}
        }
    }

    fn finish(mut self) -> ParsedDocument {
        self.merge_emphasis();
        self.doc
    }

    /// Track the furthest child span end inside the innermost open link
    fn note_link_child(&mut self, span: &Range<usize>) {
        if let Some(link) = self.link_stack.last_mut() {
            if span.start >= link.span.start && span.end < link.span.end {
                link.last_child_end = Some(link.last_child_end.unwrap_or(0).max(span.end));
            }
        }
    }

    /// Strip trailing newlines the grammar includes in block spans
    fn trim_newlines(&self, mut span: Range<usize>) -> Range<usize> {
        let bytes = self.text.as_bytes();
        while span.end > span.start && bytes[span.end - 1] == b'\n' {
            span.end -= 1;
        }
        span
    }

    fn heading(&mut self, level: HeadingLevel, span: Range<usize>) {
        let level_num = match level {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        };
        let span = self.trim_newlines(span);
        if span.is_empty() {
            return;
        }

        if self.text[span.clone()].starts_with('#') {
            // ATX: hash run plus one separator space, anchored at the marker
            let syntax_end = (span.start + level_num as usize + 1).min(span.end);
            self.doc.headers.push(HeaderElement {
                level: level_num,
                style: HeaderStyle::Atx,
                range: self.map.range(span.start, span.end),
                syntax_range: self.map.range(span.start, syntax_end),
                content_range: self.map.range(syntax_end, span.end),
            });
            return;
        }

        // Setext: the underline is the last line of the span
        let first_line = self.map.line_of(span.start);
        let last_line = self.map.line_of(span.end - 1);
        if last_line <= first_line {
            return;
        }
        let underline_start = self.map.line_start(last_line);
        let underline = self.text[underline_start..span.end].trim();
        let valid = !underline.is_empty()
            && (underline.bytes().all(|b| b == b'=') || underline.bytes().all(|b| b == b'-'));
        if !valid {
            return;
        }
        self.doc.headers.push(HeaderElement {
            level: level_num,
            style: HeaderStyle::Setext,
            range: self.map.range(span.start, span.end),
            syntax_range: self.map.range(underline_start, span.end),
            content_range: self.map.range(span.start, underline_start),
        });
    }

    fn blockquote(&mut self, span: Range<usize>) {
        let span = self.trim_newlines(span);
        if span.is_empty() {
            return;
        }
        let first_line = self.map.line_of(span.start);
        let last_line = self.map.line_of(span.end - 1);

        // One marker per `>` occurrence so nested quotes dim every angle
        let mut marker_ranges = Vec::new();
        for line in first_line..=last_line {
            let line_start = self.map.line_start(line);
            let bytes = self.text[line_start..self.map.line_end(line)].as_bytes();
            let mut pos = 0;
            loop {
                let ws_start = pos;
                while pos < bytes.len() && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
                    pos += 1;
                }
                if pos < bytes.len() && bytes[pos] == b'>' {
                    pos += 1;
                    marker_ranges.push(self.map.range(line_start + ws_start, line_start + pos));
                } else {
                    break;
                }
            }
        }

        // Outer range extends to the line start so markers stay contained
        let range = self.map.range(self.map.line_start(first_line), span.end);
        self.doc.blockquotes.push(BlockquoteElement {
            range,
            marker_ranges,
            content_range: range,
        });
    }

    fn code_block(&mut self, kind: CodeBlockKind<'_>, span: Range<usize>) {
        let language = match kind {
            CodeBlockKind::Fenced(info) => info
                .split_whitespace()
                .next()
                .filter(|token| !token.is_empty())
                .map(|token| token.to_string()),
            // Indented code blocks have no fences to decorate
            CodeBlockKind::Indented => return,
        };

        let span = self.trim_newlines(span);
        if span.is_empty() {
            return;
        }
        let open_line = self.map.line_of(span.start);
        let last_line = self.map.line_of(span.end - 1);
        if last_line == open_line {
            // No room for a closing fence
            return;
        }
        let close_start = self.map.line_start(last_line);
        let close_text = self.text[close_start..self.map.line_end(last_line)].trim_start();
        if !close_text.starts_with("```") && !close_text.starts_with("~~~") {
            // Unclosed fence, runs to end of document
            return;
        }

        let open_start = self.map.line_start(open_line);
        let content_start = self.map.line_start(open_line + 1);
        self.doc.fenced_code.push(FencedCodeElement {
            language,
            range: self.map.range(open_start, span.end),
            open_fence_range: self.map.range(open_start, content_start),
            content_range: self.map.range(content_start, close_start),
            close_fence_range: self.map.range(close_start, span.end),
        });
    }

    fn inline_code(&mut self, span: Range<usize>) {
        let code = &self.text[span.clone()];
        let marker_len = code.bytes().take_while(|&b| b == b'`').count();
        if marker_len == 0 || span.len() < marker_len * 2 {
            return;
        }
        let content_start = span.start + marker_len;
        let content_end = span.end - marker_len;

        // Recognized `lang:` prefix is split out of the content range
        let mut language = None;
        let mut prefix_range = None;
        let mut body_start = content_start;
        if let Some(caps) = CODE_PREFIX_RE.captures(&self.text[content_start..content_end]) {
            let token = &caps[1];
            if LANGUAGE_PREFIXES
                .iter()
                .any(|known| token.eq_ignore_ascii_case(known))
            {
                language = Some(token.to_string());
                let prefix_end = content_start + caps[0].len();
                prefix_range = Some(self.map.range(content_start, prefix_end));
                body_start = prefix_end;
            }
        }

        self.doc.inline_code.push(InlineCodeElement {
            language,
            range: self.map.range(span.start, span.end),
            open_marker_range: self.map.range(span.start, content_start),
            close_marker_range: self.map.range(content_end, span.end),
            prefix_range,
            content_range: self.map.range(body_start, content_end),
        });
    }

    fn finish_link(&mut self, link: LinkContext) {
        if !link.inline {
            // Reference links and autolinks have no `](url)` to decorate
            return;
        }
        let span = link.span;
        if span.len() < 4 {
            return;
        }
        // Anchored scan: start at the end of the last text child, never
        // from the beginning of the document
        let scan_from = link
            .last_child_end
            .unwrap_or(span.start + 1)
            .clamp(span.start + 1, span.end);
        let Some(rel) = self.text[scan_from..span.end].find("](") else {
            return;
        };
        let close_bracket = scan_from + rel;

        self.doc.links.push(LinkElement {
            url: link.url,
            range: self.map.range(span.start, span.end),
            open_bracket_range: self.map.range(span.start, span.start + 1),
            text_range: self.map.range(span.start + 1, close_bracket),
            close_bracket_range: self.map.range(close_bracket, close_bracket + 1),
            url_part_range: self.map.range(close_bracket + 1, span.end),
        });
    }

    fn finish_item(&mut self, item: ItemContext) {
        let span = self.trim_newlines(item.span);
        if span.is_empty() {
            return;
        }
        let first_line = self.map.line_of(span.start);
        let line_start = self.map.line_start(first_line);
        let line_text = &self.text[line_start..self.map.line_end(first_line)];

        // The grammar emits no TaskListMarker for a checkbox with nothing
        // after it; recover the checked state from the line text so a bare
        // `- [ ]` still extracts as a task instead of a bulleted `[ ]`.
        let checked = item.checked.or_else(|| {
            let caps = TASK_RE.captures(line_text)?;
            let token_len = caps[1].len() + caps[2].len();
            line_text[token_len..]
                .trim()
                .is_empty()
                .then(|| caps[2].contains(['x', 'X']))
        });

        match checked {
            Some(checked) => {
                let Some(caps) = TASK_RE.captures(line_text) else {
                    return;
                };
                let token_start = line_start + caps[1].len();
                let token_end = token_start + caps[2].len() + caps[3].len();
                let end = span.end.max(token_end);
                self.doc.task_items.push(TaskItemElement {
                    checked,
                    range: self.map.range(token_start, end),
                    checkbox_range: self.map.range(token_start, token_end),
                    content_range: self.map.range(token_end, end),
                });
            }
            None => {
                let Some(caps) = LIST_RE.captures(line_text) else {
                    return;
                };
                let indent = caps[1].len();
                let marker_start = line_start + indent;
                let content_start = line_start + caps[0].len();
                let end = span.end.max(content_start);
                self.doc.list_items.push(ListItemElement {
                    ordered: item.ordered,
                    index: item.ordered.then_some(item.index),
                    depth: indent / 2,
                    range: self.map.range(marker_start, end),
                    marker_range: self.map.range(marker_start, content_start),
                    content_range: self.map.range(content_start, end),
                });
            }
        }
    }

    fn table(&mut self, alignments: &[pulldown_cmark::Alignment], span: Range<usize>) {
        let span = self.trim_newlines(span);
        if span.is_empty() {
            return;
        }
        let first_line = self.map.line_of(span.start);
        let last_line = self.map.line_of(span.end - 1);
        if last_line < first_line + 1 {
            // A table is at least a header and a separator line
            return;
        }

        let Some(header) = self.parse_table_row(first_line, true) else {
            return;
        };
        let mut rows = vec![header];
        for line in (first_line + 2)..=last_line {
            if let Some(row) = self.parse_table_row(line, false) {
                rows.push(row);
            }
        }

        let separator_line = first_line + 1;
        let aligns = alignments
            .iter()
            .map(|alignment| match alignment {
                pulldown_cmark::Alignment::None => None,
                pulldown_cmark::Alignment::Left => Some(TableAlignment::Left),
                pulldown_cmark::Alignment::Center => Some(TableAlignment::Center),
                pulldown_cmark::Alignment::Right => Some(TableAlignment::Right),
            })
            .collect();

        self.doc.tables.push(TableElement {
            range: self
                .map
                .range(self.map.line_start(first_line), self.map.line_end(last_line)),
            separator_range: self
                .map
                .range(self.map.line_start(separator_line), self.map.line_end(separator_line)),
            alignments: aligns,
            rows,
        });
    }

    /// Parse one table row from its raw line text
    ///
    /// Rows whose pipe positions cannot be resolved are skipped.
    fn parse_table_row(&self, line: usize, is_header: bool) -> Option<TableRow> {
        let line_start = self.map.line_start(line);
        let line_end = self.map.line_end(line);
        let line_text = &self.text[line_start..line_end];
        if !line_text.trim_start().starts_with('|') {
            return None;
        }

        let mut pipes = Vec::new();
        let mut prev = '\0';
        for (idx, ch) in line_text.char_indices() {
            if ch == '|' && prev != '\\' {
                pipes.push(line_start + idx);
            }
            prev = ch;
        }
        if pipes.is_empty() {
            return None;
        }

        let mut cells = Vec::new();
        let mut trailing_pipe = None;
        for (i, &pipe) in pipes.iter().enumerate() {
            let seg_start = pipe + 1;
            let seg_end = pipes.get(i + 1).copied().unwrap_or(line_end);
            let segment = &self.text[seg_start..seg_end];
            if i == pipes.len() - 1 && segment.trim().is_empty() {
                trailing_pipe = Some(self.map.range(pipe, pipe + 1));
                break;
            }
            let lead = segment.len() - segment.trim_start().len();
            let trimmed = segment.trim();
            let content_start = seg_start + lead;
            cells.push(TableCell {
                content: trimmed.to_string(),
                content_range: self.map.range(content_start, content_start + trimmed.len()),
                pipe_range: self.map.range(pipe, pipe + 1),
            });
        }

        Some(TableRow {
            is_header,
            range: self.map.range(line_start, line_end),
            cells,
            trailing_pipe,
        })
    }

    /// Collapse the grammar's nested strong+emphasis pairs into bold-italic
    ///
    /// `***text***` arrives as two nested spans one marker apart with the
    /// same delimiter character; mixed-delimiter nesting like `**_text_**`
    /// stays two separate elements.
    fn merge_emphasis(&mut self) {
        let spans = std::mem::take(&mut self.emphasis_spans);
        let mut consumed = vec![false; spans.len()];

        for i in 0..spans.len() {
            if consumed[i] {
                continue;
            }
            let (ref outer, outer_variant) = spans[i];
            let shell = match outer_variant {
                EmphasisVariant::Italic => 1,
                EmphasisVariant::Bold => 2,
                _ => continue,
            };
            let want_inner = match outer_variant {
                EmphasisVariant::Italic => EmphasisVariant::Bold,
                _ => EmphasisVariant::Italic,
            };
            if !self.uniform_delimiter(outer.start, 3) {
                continue;
            }
            for j in 0..spans.len() {
                if i == j || consumed[j] {
                    continue;
                }
                let (ref inner, inner_variant) = spans[j];
                if inner_variant == want_inner
                    && inner.start == outer.start + shell
                    && inner.end + shell == outer.end
                {
                    consumed[i] = true;
                    consumed[j] = true;
                    self.push_emphasis(outer.clone(), EmphasisVariant::BoldItalic, 3);
                    break;
                }
            }
        }

        for (i, (span, variant)) in spans.into_iter().enumerate() {
            if consumed[i] {
                continue;
            }
            let marker_len = match variant {
                // The grammar accepts both `~x~` and `~~x~~`
                EmphasisVariant::Strikethrough => self.delimiter_run(span.start).min(2),
                other => other.marker_len(),
            };
            self.push_emphasis(span, variant, marker_len);
        }
    }

    fn push_emphasis(&mut self, span: Range<usize>, variant: EmphasisVariant, marker_len: usize) {
        if span.len() < marker_len * 2 {
            return;
        }
        self.doc.emphasis.push(EmphasisElement {
            variant,
            range: self.map.range(span.start, span.end),
            open_marker_range: self.map.range(span.start, span.start + marker_len),
            close_marker_range: self.map.range(span.end - marker_len, span.end),
            content_range: self.map.range(span.start + marker_len, span.end - marker_len),
        });
    }

    /// Length of the run of identical delimiter bytes at `offset`
    fn delimiter_run(&self, offset: usize) -> usize {
        let bytes = self.text.as_bytes();
        let Some(&first) = bytes.get(offset) else {
            return 0;
        };
        bytes[offset..].iter().take_while(|&&b| b == first).count()
    }

    /// Check the first `len` bytes at `offset` are the same delimiter
    fn uniform_delimiter(&self, offset: usize, len: usize) -> bool {
        self.delimiter_run(offset) >= len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsedDocument;

    fn parse(text: &str) -> ParsedDocument {
        extract(text)
    }

    /// Assert that sub-ranges tile the outer range: same start, same end,
    /// contiguous in document order, no gaps, no overlaps.
    fn assert_tiles(outer: SourceRange, pieces: &[SourceRange]) {
        let mut sorted: Vec<SourceRange> = pieces.to_vec();
        sorted.sort_by_key(|piece| piece.start.offset);
        assert!(!sorted.is_empty());
        assert_eq!(
            sorted[0].start.offset, outer.start.offset,
            "first piece must start where the outer range starts"
        );
        for pair in sorted.windows(2) {
            assert_eq!(
                pair[0].end.offset, pair[1].start.offset,
                "pieces must be contiguous: {:?} then {:?}",
                pair[0], pair[1]
            );
        }
        assert_eq!(
            sorted.last().map(|piece| piece.end.offset),
            Some(outer.end.offset),
            "last piece must end where the outer range ends"
        );
    }

    #[test]
    fn test_line_map_positions() {
        let map = LineMap::new("ab\ncd\n");
        assert_eq!(map.line_count(), 3);
        let pos = map.position(0);
        assert_eq!((pos.line, pos.column), (1, 1));
        let pos = map.position(3);
        assert_eq!((pos.line, pos.column), (2, 1));
        let pos = map.position(4);
        assert_eq!((pos.line, pos.column), (2, 2));
        assert_eq!(map.line_end(0), 2);
        assert_eq!(map.line_end(2), 6);
    }

    #[test]
    fn test_atx_header() {
        let doc = parse("# Title");
        assert_eq!(doc.headers.len(), 1);
        let header = &doc.headers[0];
        assert_eq!(header.level, 1);
        assert_eq!(header.style, HeaderStyle::Atx);
        assert_eq!(header.syntax_range.start.offset, 0);
        assert_eq!(header.syntax_range.end.offset, 2);
        assert_eq!(header.content_range.start.offset, 2);
        assert_eq!(header.content_range.end.offset, 7);
        assert_tiles(header.range, &[header.syntax_range, header.content_range]);
    }

    #[test]
    fn test_atx_header_levels() {
        let doc = parse("### Three\n###### Six");
        assert_eq!(doc.headers.len(), 2);
        assert_eq!(doc.headers[0].level, 3);
        assert_eq!(doc.headers[0].syntax_range.len(), 4);
        assert_eq!(doc.headers[1].level, 6);
        assert_eq!(doc.headers[1].syntax_range.len(), 7);
    }

    #[test]
    fn test_empty_atx_header() {
        let doc = parse("#");
        assert_eq!(doc.headers.len(), 1);
        let header = &doc.headers[0];
        assert_eq!(header.syntax_range.len(), 1);
        assert!(header.content_range.is_empty());
    }

    #[test]
    fn test_setext_header() {
        let doc = parse("Title\n=====\n");
        assert_eq!(doc.headers.len(), 1);
        let header = &doc.headers[0];
        assert_eq!(header.level, 1);
        assert_eq!(header.style, HeaderStyle::Setext);
        assert_eq!(header.content_range.start.offset, 0);
        // Content runs up to the underline line start; the underline is syntax
        assert_eq!(header.syntax_range.start.offset, 6);
        assert_eq!(header.syntax_range.end.offset, 11);
        assert_tiles(header.range, &[header.content_range, header.syntax_range]);
    }

    #[test]
    fn test_bold_and_italic() {
        let doc = parse("**bold** and *italic*");
        assert_eq!(doc.emphasis.len(), 2);
        let bold = &doc.emphasis[0];
        assert_eq!(bold.variant, EmphasisVariant::Bold);
        assert_eq!(bold.open_marker_range.len(), 2);
        assert_eq!(bold.content_range.start.offset, 2);
        assert_eq!(bold.content_range.end.offset, 6);
        assert_tiles(
            bold.range,
            &[bold.open_marker_range, bold.content_range, bold.close_marker_range],
        );
        let italic = &doc.emphasis[1];
        assert_eq!(italic.variant, EmphasisVariant::Italic);
        assert_eq!(italic.open_marker_range.len(), 1);
    }

    #[test]
    fn test_bold_italic_merged() {
        let doc = parse("***both***");
        assert_eq!(doc.emphasis.len(), 1);
        let both = &doc.emphasis[0];
        assert_eq!(both.variant, EmphasisVariant::BoldItalic);
        assert_eq!(both.range.start.offset, 0);
        assert_eq!(both.range.end.offset, 10);
        assert_eq!(both.open_marker_range.len(), 3);
        assert_eq!(both.content_range.start.offset, 3);
        assert_eq!(both.content_range.end.offset, 7);
        assert_tiles(
            both.range,
            &[both.open_marker_range, both.content_range, both.close_marker_range],
        );
    }

    #[test]
    fn test_mixed_delimiters_not_merged() {
        let doc = parse("**_text_**");
        assert_eq!(doc.emphasis.len(), 2);
        assert!(doc
            .emphasis
            .iter()
            .all(|e| e.variant != EmphasisVariant::BoldItalic));
    }

    #[test]
    fn test_strikethrough() {
        let doc = parse("~~gone~~");
        assert_eq!(doc.emphasis.len(), 1);
        let strike = &doc.emphasis[0];
        assert_eq!(strike.variant, EmphasisVariant::Strikethrough);
        assert_eq!(strike.open_marker_range.len(), 2);
    }

    #[test]
    fn test_task_items() {
        let doc = parse("- [ ] open\n- [x] done");
        assert_eq!(doc.task_items.len(), 2);
        assert_eq!(doc.list_items.len(), 0);

        let open = &doc.task_items[0];
        assert!(!open.checked);
        assert_eq!(open.checkbox_range.start.offset, 0);
        // `- [ ] ` including the trailing space
        assert_eq!(open.checkbox_range.len(), 6);
        assert_eq!(open.content_range.start.offset, 6);
        assert_tiles(open.range, &[open.checkbox_range, open.content_range]);

        assert!(doc.task_items[1].checked);
    }

    #[test]
    fn test_task_item_indented() {
        let doc = parse("- [ ] a\n  - [x] nested");
        assert_eq!(doc.task_items.len(), 2);
        let nested = &doc.task_items[1];
        assert!(nested.checked);
        // The checkbox starts at the `-`, not at the line start
        assert_eq!(nested.checkbox_range.start.offset, 10);
        assert_tiles(nested.range, &[nested.checkbox_range, nested.content_range]);
    }

    #[test]
    fn test_task_item_without_content() {
        let doc = parse("- [ ]");
        assert_eq!(doc.task_items.len(), 1);
        assert!(doc.task_items[0].content_range.is_empty());
        // The bare checkbox must not double-report as a plain list item
        assert!(doc.list_items.is_empty());
    }

    #[test]
    fn test_bare_checkbox_keeps_checked_state() {
        let doc = parse("- [x]");
        assert_eq!(doc.task_items.len(), 1);
        assert!(doc.task_items[0].checked);
        assert!(doc.list_items.is_empty());

        let doc = parse("- [ ]   ");
        assert_eq!(doc.task_items.len(), 1);
        assert!(!doc.task_items[0].checked);
    }

    #[test]
    fn test_unordered_list_items() {
        let doc = parse("- one\n* two\n");
        // Different bullets open separate lists, both unordered
        assert_eq!(doc.list_items.len(), 2);
        let first = &doc.list_items[0];
        assert!(!first.ordered);
        assert_eq!(first.index, None);
        assert_eq!(first.depth, 0);
        assert_eq!(first.marker_range.len(), 2); // `- `
        assert_tiles(first.range, &[first.marker_range, first.content_range]);
    }

    #[test]
    fn test_ordered_list_indices() {
        let doc = parse("3. three\n4. four");
        assert_eq!(doc.list_items.len(), 2);
        assert_eq!(doc.list_items[0].index, Some(3));
        assert_eq!(doc.list_items[1].index, Some(4));
        assert!(doc.list_items[0].ordered);
        assert_eq!(doc.list_items[0].marker_range.len(), 3); // `3. `
    }

    #[test]
    fn test_nested_list_depth() {
        let doc = parse("- top\n  - deep\n    - deeper");
        assert_eq!(doc.list_items.len(), 3);
        assert_eq!(doc.list_items[0].depth, 0);
        assert_eq!(doc.list_items[1].depth, 1);
        assert_eq!(doc.list_items[2].depth, 2);
    }

    #[test]
    fn test_inline_code() {
        let doc = parse("see `code` here");
        assert_eq!(doc.inline_code.len(), 1);
        let code = &doc.inline_code[0];
        assert_eq!(code.language, None);
        assert_eq!(code.open_marker_range.len(), 1);
        assert_eq!(code.content_range.start.offset, 5);
        assert_eq!(code.content_range.end.offset, 9);
        assert_tiles(
            code.range,
            &[code.open_marker_range, code.content_range, code.close_marker_range],
        );
    }

    #[test]
    fn test_inline_code_language_prefix() {
        let doc = parse("`ts:const x = 1`");
        assert_eq!(doc.inline_code.len(), 1);
        let code = &doc.inline_code[0];
        assert_eq!(code.language.as_deref(), Some("ts"));
        let prefix = code.prefix_range.expect("prefix range");
        assert_eq!(prefix.start.offset, 1);
        assert_eq!(prefix.end.offset, 4); // `ts:`
        assert_eq!(code.content_range.start.offset, 4);
        assert_tiles(
            code.range,
            &[code.open_marker_range, prefix, code.content_range, code.close_marker_range],
        );
    }

    #[test]
    fn test_inline_code_unknown_prefix() {
        let doc = parse("`zzz:not a language`");
        assert_eq!(doc.inline_code.len(), 1);
        let code = &doc.inline_code[0];
        assert_eq!(code.language, None);
        assert!(code.prefix_range.is_none());
        assert_eq!(code.content_range.start.offset, 1);
    }

    #[test]
    fn test_inline_code_double_backtick() {
        let doc = parse("``a ` b``");
        assert_eq!(doc.inline_code.len(), 1);
        let code = &doc.inline_code[0];
        assert_eq!(code.open_marker_range.len(), 2);
        assert_eq!(code.close_marker_range.len(), 2);
    }

    #[test]
    fn test_inline_link() {
        let doc = parse("go [home](https://example.com) now");
        assert_eq!(doc.links.len(), 1);
        let link = &doc.links[0];
        assert_eq!(link.url, "https://example.com");
        assert_eq!(link.open_bracket_range.start.offset, 3);
        assert_eq!(link.text_range.start.offset, 4);
        assert_eq!(link.text_range.end.offset, 8);
        assert_eq!(link.close_bracket_range.start.offset, 8);
        assert_eq!(link.url_part_range.start.offset, 9);
        assert_eq!(link.url_part_range.end.offset, 30);
        assert_tiles(
            link.range,
            &[
                link.open_bracket_range,
                link.text_range,
                link.close_bracket_range,
                link.url_part_range,
            ],
        );
    }

    #[test]
    fn test_link_with_emphasis_text() {
        let doc = parse("[**bold** link](https://example.com)");
        assert_eq!(doc.links.len(), 1);
        let link = &doc.links[0];
        assert_eq!(link.text_range.end.offset, 14);
        // The emphasis inside the link text is extracted too
        assert_eq!(doc.emphasis.len(), 1);
    }

    #[test]
    fn test_autolink_skipped() {
        let doc = parse("<https://example.com>");
        assert!(doc.links.is_empty());
    }

    #[test]
    fn test_reference_link_skipped() {
        let doc = parse("[text][ref]\n\n[ref]: https://example.com");
        assert!(doc.links.is_empty());
    }

    #[test]
    fn test_image() {
        let doc = parse("![a chart](chart.png)");
        assert_eq!(doc.images.len(), 1);
        let image = &doc.images[0];
        assert_eq!(image.url, "chart.png");
        assert_eq!(image.alt, "a chart");
        assert_eq!(image.syntax_range, image.range);
        assert_eq!(image.range.start.offset, 0);
        assert_eq!(image.range.end.offset, 21);
    }

    #[test]
    fn test_blockquote_markers() {
        let doc = parse("> one\n> two");
        assert_eq!(doc.blockquotes.len(), 1);
        let quote = &doc.blockquotes[0];
        assert_eq!(quote.marker_ranges.len(), 2);
        assert_eq!(quote.marker_ranges[0].start.offset, 0);
        assert_eq!(quote.marker_ranges[0].len(), 1);
        assert_eq!(quote.marker_ranges[1].start.offset, 6);
        assert_eq!(quote.content_range, quote.range);
    }

    #[test]
    fn test_horizontal_rule() {
        let doc = parse("above\n\n---\n\nbelow");
        assert_eq!(doc.horizontal_rules.len(), 1);
        let rule = &doc.horizontal_rules[0];
        assert_eq!(rule.range.start.offset, 7);
        assert_eq!(rule.range.end.offset, 10);
        assert_eq!(rule.syntax_range, rule.range);
    }

    #[test]
    fn test_fenced_code_block() {
        let doc = parse("```rust\nlet x = 1;\n```\n");
        assert_eq!(doc.fenced_code.len(), 1);
        let block = &doc.fenced_code[0];
        assert_eq!(block.language.as_deref(), Some("rust"));
        assert_eq!(block.open_fence_range.start.offset, 0);
        assert_eq!(block.open_fence_range.end.offset, 8);
        assert_eq!(block.content_range.start.offset, 8);
        assert_eq!(block.content_range.end.offset, 19);
        assert_eq!(block.close_fence_range.start.offset, 19);
        assert_eq!(block.close_fence_range.end.offset, 22);
        assert!(!block.is_diagram());
        assert_tiles(
            block.range,
            &[block.open_fence_range, block.content_range, block.close_fence_range],
        );
    }

    #[test]
    fn test_fenced_code_without_close_skipped() {
        let doc = parse("```rust\nlet x = 1;");
        assert!(doc.fenced_code.is_empty());
    }

    #[test]
    fn test_indented_code_ignored() {
        let doc = parse("text\n\n    indented code\n");
        assert!(doc.fenced_code.is_empty());
    }

    #[test]
    fn test_diagram_block_detected() {
        let doc = parse("```mermaid\ngraph TD\n```\n");
        assert_eq!(doc.fenced_code.len(), 1);
        assert!(doc.fenced_code[0].is_diagram());
        assert_eq!(doc.diagram_blocks().count(), 1);
    }

    #[test]
    fn test_empty_fenced_block() {
        let doc = parse("```\n```\n");
        assert_eq!(doc.fenced_code.len(), 1);
        let block = &doc.fenced_code[0];
        assert_eq!(block.language, None);
        assert!(block.content_range.is_empty());
    }

    #[test]
    fn test_table_shape() {
        let doc = parse("|A|B|\n|---|---|\n|1|2|\n");
        assert_eq!(doc.tables.len(), 1);
        let table = &doc.tables[0];
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows[0].is_header);
        assert!(!table.rows[1].is_header);
        assert_eq!(table.separator_range.start.offset, 6);
        assert_eq!(table.separator_range.end.offset, 15);
        assert_eq!(table.alignments, vec![None, None]);

        let header = &table.rows[0];
        assert_eq!(header.cells.len(), 2);
        assert_eq!(header.cells[0].content, "A");
        assert_eq!(header.cells[0].pipe_range.start.offset, 0);
        assert_eq!(header.cells[0].content_range.start.offset, 1);
        assert_eq!(header.cells[1].content, "B");
        assert!(header.trailing_pipe.is_some());
    }

    #[test]
    fn test_table_alignment_columns() {
        let doc = parse("| L | C | R |\n|:--|:-:|--:|\n| a | b | c |\n");
        assert_eq!(doc.tables.len(), 1);
        let table = &doc.tables[0];
        assert_eq!(
            table.alignments,
            vec![
                Some(TableAlignment::Left),
                Some(TableAlignment::Center),
                Some(TableAlignment::Right)
            ]
        );
    }

    #[test]
    fn test_table_row_without_trailing_pipe() {
        let doc = parse("|A|B\n|---|---\n|1|2\n");
        assert_eq!(doc.tables.len(), 1);
        let header = &doc.tables[0].rows[0];
        assert_eq!(header.cells.len(), 2);
        assert!(header.trailing_pipe.is_none());
    }

    #[test]
    fn test_frontmatter_detected() {
        let doc = parse("---\ntitle: Test\n---\n\n# Body");
        assert_eq!(doc.metadata.len(), 1);
        let meta = &doc.metadata[0];
        assert_eq!(meta.range.start.offset, 0);
        assert_eq!(meta.range.end.offset, 19);
        assert_eq!(meta.content_range.start.offset, 4);
        assert_eq!(meta.content_range.end.offset, 16);
        // The grammar's reading of `---` as rules inside the block is filtered
        assert!(doc.horizontal_rules.is_empty());
        assert_eq!(doc.headers.len(), 1);
    }

    #[test]
    fn test_unclosed_frontmatter_is_not_metadata() {
        let doc = parse("---\ntitle: Test");
        assert!(doc.metadata.is_empty());
        // Falls through to the grammar: leading `---` reads as a setext
        // underline or thematic break, never as metadata
        assert!(doc.headers.len() + doc.horizontal_rules.len() >= 1);
    }

    #[test]
    fn test_frontmatter_filters_overlapping_elements() {
        let doc = parse("---\ntitle: **not bold**\n---\n\n**real**");
        assert_eq!(doc.metadata.len(), 1);
        assert_eq!(doc.emphasis.len(), 1);
        assert_eq!(doc.emphasis[0].range.start.offset, 29);
    }

    #[test]
    fn test_collections_sorted_by_position() {
        let doc = parse("# One\n\n**a**\n\n# Two\n\n**b**\n");
        assert!(doc.headers[0].range.start.offset < doc.headers[1].range.start.offset);
        assert!(doc.emphasis[0].range.start.offset < doc.emphasis[1].range.start.offset);
    }

    #[test]
    fn test_element_count_across_kinds() {
        let doc = parse(
            "---\nkey: value\n---\n\n# Title\n\n**bold** `code` [l](u) ![i](p)\n\n> quote\n\n---\n\n- item\n- [ ] task\n\n```rust\nx\n```\n",
        );
        assert_eq!(doc.metadata.len(), 1);
        assert_eq!(doc.headers.len(), 1);
        assert_eq!(doc.emphasis.len(), 1);
        assert_eq!(doc.inline_code.len(), 1);
        assert_eq!(doc.links.len(), 1);
        assert_eq!(doc.images.len(), 1);
        assert_eq!(doc.blockquotes.len(), 1);
        assert_eq!(doc.horizontal_rules.len(), 1);
        assert_eq!(doc.list_items.len(), 1);
        assert_eq!(doc.task_items.len(), 1);
        assert_eq!(doc.fenced_code.len(), 1);
    }
}
