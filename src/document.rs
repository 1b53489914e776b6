//! Document text model
//!
//! Wraps ropey::Rope with a document identity and a version counter that is
//! incremented on every change. The version is what keys the parse cache:
//! any edit invalidates the whole cached parse for that document.
//!
//! Offsets are byte offsets throughout, matching the spans the grammar
//! parser reports. Editor columns are byte columns within a line.

use crate::position::{EditorRange, Position, SourcePosition};
use ropey::Rope;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

/// Unique identifier for documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Create a new unique document ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Line ending style of the text the host handed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style line endings (LF: \n)
    #[default]
    Lf,
    /// Windows-style line endings (CRLF: \r\n)
    Crlf,
}

impl LineEnding {
    /// Get the string representation of the line ending
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// Detect line ending from text
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::Crlf
        } else {
            LineEnding::Lf
        }
    }
}

/// A text replacement the host should apply to its buffer
///
/// Produced by editing actions such as the checkbox toggle; the host applies
/// it and feeds the change back through [`Document::apply_edit`] (or its own
/// synchronization path), which bumps the version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Editor-space range to replace
    pub range: EditorRange,

    /// Replacement text
    pub new_text: String,
}

/// Markdown document mirrored from the host editor
#[derive(Debug, Clone)]
pub struct Document {
    /// Unique identifier for this document
    id: DocumentId,

    /// The underlying rope data structure
    rope: Rope,

    /// Line ending style of the original text
    line_ending: LineEnding,

    /// Version number, incremented on each change
    version: u64,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            id: DocumentId::new(),
            rope: Rope::new(),
            line_ending: LineEnding::default(),
            version: 0,
        }
    }

    /// Create a document from a string
    pub fn from_text(text: &str) -> Self {
        let line_ending = LineEnding::detect(text);
        // Normalize to LF internally
        let normalized = text.replace("\r\n", "\n");
        Self {
            id: DocumentId::new(),
            rope: Rope::from_str(&normalized),
            line_ending,
            version: 0,
        }
    }

    /// Get the document identifier
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Get the current version number
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the line ending style the host text used
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Get total byte count
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Get total line count
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Check if the document is empty
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Get the entire contents for parsing
    ///
    /// Borrowed when the rope is contiguous, owned otherwise.
    pub fn contents(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Get a specific line as a string (0-indexed)
    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        Some(self.rope.line(line_idx).to_string())
    }

    /// Get a line without the trailing newline
    pub fn line_without_newline(&self, line_idx: usize) -> Option<String> {
        self.line(line_idx)
            .map(|s| s.trim_end_matches('\n').to_string())
    }

    /// Convert a byte offset to a source position (1-indexed line/column)
    pub fn position_at(&self, offset: usize) -> SourcePosition {
        let offset = offset.min(self.rope.len_bytes());
        let line = self.rope.byte_to_line(offset);
        let line_start = self.rope.line_to_byte(line);
        SourcePosition::new(line + 1, offset - line_start + 1, offset)
    }

    /// Convert an editor position to a byte offset
    ///
    /// Positions past the end of a line clamp to the line's content length;
    /// positions past the last line clamp to the end of the document.
    pub fn offset_at(&self, position: Position) -> usize {
        let line_count = self.rope.len_lines();
        if position.line >= line_count {
            return self.rope.len_bytes();
        }
        let line_start = self.rope.line_to_byte(position.line);
        let line_end = if position.line + 1 < line_count {
            self.rope.line_to_byte(position.line + 1)
        } else {
            self.rope.len_bytes()
        };
        let content_len = self
            .rope
            .line(position.line)
            .to_string()
            .trim_end_matches('\n')
            .len();
        let column = position.column.min(content_len);
        (line_start + column).min(line_end)
    }

    /// Replace the entire contents
    pub fn set_text(&mut self, text: &str) {
        self.line_ending = LineEnding::detect(text);
        let normalized = text.replace("\r\n", "\n");
        self.rope = Rope::from_str(&normalized);
        self.version += 1;
    }

    /// Replace an editor-space range with new text
    pub fn replace_range(&mut self, range: EditorRange, text: &str) {
        let start = self.rope.byte_to_char(self.offset_at(range.start));
        let end = self.rope.byte_to_char(self.offset_at(range.end));
        if start < end {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start.min(self.rope.len_chars()), text);
        }
        self.version += 1;
    }

    /// Apply a text edit produced by an editing action
    pub fn apply_edit(&mut self, edit: &TextEdit) {
        self.replace_range(edit.range, &edit.new_text);
    }

    /// Get the contents with the original line endings restored
    pub fn to_text(&self) -> String {
        let content = self.rope.to_string();
        match self.line_ending {
            LineEnding::Lf => content,
            LineEnding::Crlf => content.replace('\n', "\r\n"),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
