//! Decoration values and per-style batches
//!
//! A pass produces one [`DecorationSet`]: every style's complete list of
//! ranges for the current document state. The host replaces each style's
//! previous ranges wholesale, so producing an identical set twice is a
//! visual no-op.

use crate::decorations::style::StyleId;
use crate::position::{EditorRange, SourceRange};
use std::collections::BTreeMap;

/// Where an overlay sits relative to its anchor range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// What an overlay shows
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayContent {
    /// Glyph text such as a bullet or checkbox
    Text(String),
    /// An image shown inline, identified by URI
    Image {
        uri: String,
        width: Option<u32>,
        height: Option<u32>,
    },
}

/// Content injected next to a range without entering the document text
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub placement: Placement,
    pub content: OverlayContent,
}

impl Overlay {
    pub fn before(text: impl Into<String>) -> Self {
        Self {
            placement: Placement::Before,
            content: OverlayContent::Text(text.into()),
        }
    }

    pub fn after(text: impl Into<String>) -> Self {
        Self {
            placement: Placement::After,
            content: OverlayContent::Text(text.into()),
        }
    }

    pub fn image(
        placement: Placement,
        uri: impl Into<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        Self {
            placement,
            content: OverlayContent::Image {
                uri: uri.into(),
                width,
                height,
            },
        }
    }
}

/// One styled range in editor coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub range: EditorRange,
    pub overlay: Option<Overlay>,
    /// Tooltip text shown on hover
    pub hover: Option<String>,
}

impl Decoration {
    pub fn new(range: EditorRange) -> Self {
        Self {
            range,
            overlay: None,
            hover: None,
        }
    }

    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn with_hover(mut self, hover: impl Into<String>) -> Self {
        self.hover = Some(hover.into());
        self
    }
}

/// All decorations of one pass, grouped by style
///
/// Batches iterate in a fixed style order, so two passes over the same
/// document state produce identical output.
#[derive(Debug, Default)]
pub struct DecorationSet {
    batches: BTreeMap<StyleId, Vec<Decoration>>,
}

impl DecorationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, style: StyleId, decoration: Decoration) {
        self.batches.entry(style).or_default().push(decoration);
    }

    /// Convenience for a plain range decoration from parser space
    pub fn push_range(&mut self, style: StyleId, range: SourceRange) {
        self.push(style, Decoration::new(range.to_editor()));
    }

    /// Batch for a style; empty when the pass produced none
    pub fn get(&self, style: StyleId) -> &[Decoration] {
        self.batches.get(&style).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.batches.values().all(Vec::is_empty)
    }

    /// Total decorations across all styles
    pub fn total(&self) -> usize {
        self.batches.values().map(Vec::len).sum()
    }
}
