//! Engine configuration
//!
//! The host editor owns configuration storage; the engine only consumes a
//! flat set of per-element toggles plus the ghost opacity and the diagram
//! render mode. Every style resource is derived from these values, so a
//! configuration change rebuilds the style sheet.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Quiet period for debounced update passes, in milliseconds
pub const DEBOUNCE_DELAY_MS: u64 = 150;

/// Extra lines decorated above and below the visible viewport
pub const VIEWPORT_BUFFER_LINES: usize = 50;

/// Default opacity for dimmed ("ghost") syntax markers
pub const DEFAULT_GHOST_OPACITY: f32 = 0.3;

/// Backend selection for the external diagram render service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DiagramMode {
    /// Render diagrams to SVG images
    Svg,
    /// Render diagrams to ASCII art
    Ascii,
    /// Let the render service pick the best available backend
    #[default]
    Auto,
}

/// Rendering engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Master switch for inline rendering
    pub enabled: bool,

    /// Style headers and hide/dim their marker prefix
    pub render_headers: bool,

    /// Style bold/italic/strikethrough and hide/dim their markers
    pub render_emphasis: bool,

    /// Replace task checkboxes with check glyphs
    pub render_task_lists: bool,

    /// Style link text and hide/dim bracket/url parts
    pub render_links: bool,

    /// Style inline code and hide/dim backticks
    pub render_inline_code: bool,

    /// Draw blockquote borders and dim quote markers
    pub render_blockquotes: bool,

    /// Replace horizontal rule syntax with a separator line
    pub render_horizontal_rules: bool,

    /// Dim fenced code block fences
    pub render_code_blocks: bool,

    /// Hide/dim image syntax and attach inline previews
    pub render_images: bool,

    /// Replace list markers with bullet/number glyphs
    pub render_lists: bool,

    /// Render diagram code blocks through the external render service.
    /// Render failures degrade silently: the block keeps its ordinary
    /// fenced-code styling and the failure is only logged.
    pub render_diagrams: bool,

    /// Dim frontmatter metadata blocks
    pub render_metadata: bool,

    /// Style table headers and dim pipes/separators (opacity only)
    pub render_tables: bool,

    /// Opacity for dimmed syntax markers, in `[0.0, 1.0]`
    pub ghost_opacity: f32,

    /// Diagram render backend selection
    pub diagram_mode: DiagramMode,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            render_headers: true,
            render_emphasis: true,
            render_task_lists: true,
            render_links: true,
            render_inline_code: true,
            render_blockquotes: true,
            render_horizontal_rules: true,
            render_code_blocks: true,
            render_images: true,
            render_lists: true,
            render_diagrams: false,
            render_metadata: true,
            render_tables: false,
            ghost_opacity: DEFAULT_GHOST_OPACITY,
            diagram_mode: DiagramMode::Auto,
        }
    }
}

impl PreviewConfig {
    /// Check that every value can back a style resource
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.ghost_opacity.is_finite() {
            return Err(ConfigError::InvalidOpacity {
                value: self.ghost_opacity,
            });
        }
        Ok(())
    }

    /// Ghost opacity clamped into `[0.0, 1.0]`
    ///
    /// Out-of-range finite values are accepted and clamped; only non-finite
    /// values are rejected by [`PreviewConfig::validate`].
    pub fn clamped_ghost_opacity(&self) -> f32 {
        self.ghost_opacity.clamp(0.0, 1.0)
    }
}
