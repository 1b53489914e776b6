//! livemark - cursor-aware inline rendering core for Markdown editors
//!
//! The engine turns document text into per-style decoration batches the host
//! editor renders natively: headings sized, emphasis styled, markers hidden
//! or dimmed depending on where the cursors sit, checkboxes and bullets
//! replaced by glyphs, diagram blocks swapped for rendered artifacts. The
//! host owns text, selections, viewport, and the actual drawing; this crate
//! owns parsing, caching, visibility classification, scheduling policy, and
//! decoration emission.
//!
//! A pass is synchronous and pure over document version, cursor set,
//! viewport, configuration, and resolved diagram state. The host drives it:
//!
//! ```
//! use livemark::{Decoration, DecorationSink, Document, PreviewConfig, PreviewEngine, StyleId, ViewState};
//!
//! struct NullSink;
//!
//! impl DecorationSink for NullSink {
//!     fn apply(&mut self, _style: StyleId, _decorations: &[Decoration]) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), livemark::ConfigError> {
//! let mut engine = PreviewEngine::new(PreviewConfig::default())?;
//! let document = Document::from_text("# Title\n\nSome **bold** text.");
//! let summary = engine.run_pass(&document, &ViewState::default(), &mut NullSink);
//! assert!(summary.ok());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod position;

// Parsing: element extraction and the version-keyed cache
pub mod parser;

// Rendering: visibility classification and per-kind decorators
pub mod decorations;
pub mod visibility;

// Orchestration: update policy, diagram cache, the engine itself
pub mod diagram;
pub mod engine;
pub mod host;
pub mod scheduler;

// Editing actions computed from parsed elements
pub mod actions;

pub use actions::{clicked_checkbox, toggle_checkbox};
pub use config::{DiagramMode, PreviewConfig};
pub use decorations::{
    Decoration, DecorationSet, Overlay, OverlayContent, Placement, StyleId, StyleSheet, StyleSpec,
    ThemeColor,
};
pub use diagram::{
    DiagramArtifact, DiagramCache, DiagramEvent, DiagramEventSender, DiagramRenderService,
    DiagramState, RenderOutcome, RenderRequest,
};
pub use document::{Document, DocumentId, LineEnding, TextEdit};
pub use engine::{PassSummary, PreviewEngine};
pub use error::{ConfigError, ConfigResult, HostError, PreviewError};
pub use host::{DecorationSink, ViewState};
pub use parser::{ElementRef, ParseCache, ParsedDocument};
pub use position::{EditorRange, Position, Selection, SourcePosition, SourceRange};
pub use scheduler::{UpdateDirective, UpdatePolicy, UpdateScheduler, UpdateTrigger};
pub use visibility::{classify, Visibility};
