//! Style identifiers and their visual specifications
//!
//! Every decoration batch is keyed by a [`StyleId`]. The editor host owns
//! one persistent style per identifier and re-applies ranges under it, so
//! identifiers must be stable across passes. Visual attributes live in
//! [`StyleSpec`]; colors are semantic and resolved by the host theme.

use crate::config::PreviewConfig;
use crate::error::ConfigResult;
use std::collections::HashMap;

/// Letter spacing that collapses concealed syntax to zero width
const CONCEAL_LETTER_SPACING: f32 = -1000.0;

/// Stable identifier for one host-side decoration style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleId {
    /// Header content, by level 1-6
    Header(u8),
    /// Fully concealed syntax: zero opacity, collapsed width
    SyntaxHidden,
    /// Dimmed syntax shown while the cursor is on the element
    SyntaxGhost,
    Bold,
    Italic,
    BoldItalic,
    Strikethrough,
    /// Unchecked task checkbox glyph
    TaskGlyph,
    /// Checked task checkbox glyph
    TaskGlyphDone,
    /// Content of a completed task
    TaskDoneContent,
    InlineCode,
    /// Language tag inside inline code, like `` `ts:` ``
    InlineCodePrefix,
    LinkText,
    /// Blockquote body line with a left border
    BlockquoteLine,
    /// The `>` prefix, dimmed while the quote renders
    BlockquoteMarker,
    /// Thematic break drawn as a full-width line
    RuleLine,
    /// Fence lines of a code block
    CodeFence,
    /// Image source line hosting an inline preview
    ImagePreview,
    /// Bullet glyph replacing `-`/`*`/`+`
    ListBullet,
    /// Number glyph replacing `1.`
    ListNumber,
    /// Frontmatter block, dimmed as a unit
    MetadataBlock,
    TableHeader,
    /// Alignment row of a table, dimmed without changing width
    TableSeparator,
    /// Cell delimiter pipes, dimmed without changing width
    TablePipe,
    /// Fence lines of a resolved diagram block
    DiagramImage,
}

impl StyleId {
    /// Every style the engine may emit, in application order
    ///
    /// A pass applies all of these, including the ones that produced no
    /// decorations, so stale host state from the previous pass is cleared.
    pub const ALL: [StyleId; 30] = [
        StyleId::Header(1),
        StyleId::Header(2),
        StyleId::Header(3),
        StyleId::Header(4),
        StyleId::Header(5),
        StyleId::Header(6),
        StyleId::SyntaxHidden,
        StyleId::SyntaxGhost,
        StyleId::Bold,
        StyleId::Italic,
        StyleId::BoldItalic,
        StyleId::Strikethrough,
        StyleId::TaskGlyph,
        StyleId::TaskGlyphDone,
        StyleId::TaskDoneContent,
        StyleId::InlineCode,
        StyleId::InlineCodePrefix,
        StyleId::LinkText,
        StyleId::BlockquoteLine,
        StyleId::BlockquoteMarker,
        StyleId::RuleLine,
        StyleId::CodeFence,
        StyleId::ImagePreview,
        StyleId::ListBullet,
        StyleId::ListNumber,
        StyleId::MetadataBlock,
        StyleId::TableHeader,
        StyleId::TableSeparator,
        StyleId::TablePipe,
        StyleId::DiagramImage,
    ];

    /// Stable key the host uses to register the style
    pub fn name(&self) -> &'static str {
        match self {
            StyleId::Header(1) => "header_1",
            StyleId::Header(2) => "header_2",
            StyleId::Header(3) => "header_3",
            StyleId::Header(4) => "header_4",
            StyleId::Header(5) => "header_5",
            StyleId::Header(_) => "header_6",
            StyleId::SyntaxHidden => "syntax_hidden",
            StyleId::SyntaxGhost => "syntax_ghost",
            StyleId::Bold => "bold",
            StyleId::Italic => "italic",
            StyleId::BoldItalic => "bold_italic",
            StyleId::Strikethrough => "strikethrough",
            StyleId::TaskGlyph => "task_glyph",
            StyleId::TaskGlyphDone => "task_glyph_done",
            StyleId::TaskDoneContent => "task_done_content",
            StyleId::InlineCode => "inline_code",
            StyleId::InlineCodePrefix => "inline_code_prefix",
            StyleId::LinkText => "link_text",
            StyleId::BlockquoteLine => "blockquote_line",
            StyleId::BlockquoteMarker => "blockquote_marker",
            StyleId::RuleLine => "rule_line",
            StyleId::CodeFence => "code_fence",
            StyleId::ImagePreview => "image_preview",
            StyleId::ListBullet => "list_bullet",
            StyleId::ListNumber => "list_number",
            StyleId::MetadataBlock => "metadata_block",
            StyleId::TableHeader => "table_header",
            StyleId::TableSeparator => "table_separator",
            StyleId::TablePipe => "table_pipe",
            StyleId::DiagramImage => "diagram_image",
        }
    }
}

/// Semantic color resolved against the host theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    Accent,
    Link,
    Success,
    Muted,
    Code,
}

/// Visual attributes of one style
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleSpec {
    pub opacity: Option<f32>,
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    /// Relative font size, 1.0 when unset
    pub font_scale: Option<f32>,
    pub foreground: Option<ThemeColor>,
    pub background: Option<ThemeColor>,
    /// Negative spacing collapses text width; never used for table styles
    pub letter_spacing: Option<f32>,
    pub left_border: bool,
    pub whole_line: bool,
}

/// The full style table for one configuration
#[derive(Debug, Clone)]
pub struct StyleSheet {
    styles: HashMap<StyleId, StyleSpec>,
}

impl StyleSheet {
    /// Build the style table from a validated configuration
    pub fn build(config: &PreviewConfig) -> ConfigResult<Self> {
        config.validate()?;
        let ghost = config.clamped_ghost_opacity();
        let mut styles = HashMap::new();

        styles.insert(
            StyleId::SyntaxHidden,
            StyleSpec {
                opacity: Some(0.0),
                letter_spacing: Some(CONCEAL_LETTER_SPACING),
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::SyntaxGhost,
            StyleSpec {
                opacity: Some(ghost),
                ..Default::default()
            },
        );

        // Headers shrink toward body size; the lower levels keep only weight
        for (level, scale, bold) in [
            (1, Some(1.15), true),
            (2, Some(1.1), true),
            (3, Some(1.05), true),
            (4, None, true),
            (5, None, true),
            (6, None, true),
        ] {
            styles.insert(
                StyleId::Header(level),
                StyleSpec {
                    font_scale: scale,
                    bold,
                    foreground: Some(ThemeColor::Accent),
                    ..Default::default()
                },
            );
        }

        styles.insert(
            StyleId::Bold,
            StyleSpec {
                bold: true,
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::Italic,
            StyleSpec {
                italic: true,
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::BoldItalic,
            StyleSpec {
                bold: true,
                italic: true,
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::Strikethrough,
            StyleSpec {
                strikethrough: true,
                foreground: Some(ThemeColor::Muted),
                ..Default::default()
            },
        );

        styles.insert(
            StyleId::TaskGlyph,
            StyleSpec {
                foreground: Some(ThemeColor::Muted),
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::TaskGlyphDone,
            StyleSpec {
                foreground: Some(ThemeColor::Success),
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::TaskDoneContent,
            StyleSpec {
                strikethrough: true,
                opacity: Some(0.6),
                ..Default::default()
            },
        );

        styles.insert(
            StyleId::InlineCode,
            StyleSpec {
                foreground: Some(ThemeColor::Code),
                background: Some(ThemeColor::Muted),
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::InlineCodePrefix,
            StyleSpec {
                foreground: Some(ThemeColor::Accent),
                opacity: Some(0.7),
                ..Default::default()
            },
        );

        styles.insert(
            StyleId::LinkText,
            StyleSpec {
                foreground: Some(ThemeColor::Link),
                underline: true,
                ..Default::default()
            },
        );

        styles.insert(
            StyleId::BlockquoteLine,
            StyleSpec {
                italic: true,
                foreground: Some(ThemeColor::Muted),
                background: Some(ThemeColor::Muted),
                left_border: true,
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::BlockquoteMarker,
            StyleSpec {
                opacity: Some(0.4),
                ..Default::default()
            },
        );

        styles.insert(
            StyleId::RuleLine,
            StyleSpec {
                foreground: Some(ThemeColor::Muted),
                whole_line: true,
                ..Default::default()
            },
        );

        styles.insert(
            StyleId::CodeFence,
            StyleSpec {
                opacity: Some(0.5),
                foreground: Some(ThemeColor::Muted),
                ..Default::default()
            },
        );

        styles.insert(
            StyleId::ImagePreview,
            StyleSpec {
                opacity: Some(0.6),
                foreground: Some(ThemeColor::Muted),
                ..Default::default()
            },
        );

        styles.insert(
            StyleId::ListBullet,
            StyleSpec {
                bold: true,
                foreground: Some(ThemeColor::Accent),
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::ListNumber,
            StyleSpec {
                bold: true,
                foreground: Some(ThemeColor::Accent),
                ..Default::default()
            },
        );

        styles.insert(
            StyleId::MetadataBlock,
            StyleSpec {
                opacity: Some(0.45),
                foreground: Some(ThemeColor::Muted),
                ..Default::default()
            },
        );

        // Table styles adjust opacity only. Hiding or collapsing any part
        // of a table changes column widths and makes the whole grid shimmer
        // as the cursor moves, so width-affecting attributes stay unset.
        styles.insert(
            StyleId::TableHeader,
            StyleSpec {
                bold: true,
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::TableSeparator,
            StyleSpec {
                opacity: Some(0.25),
                ..Default::default()
            },
        );
        styles.insert(
            StyleId::TablePipe,
            StyleSpec {
                opacity: Some(0.4),
                ..Default::default()
            },
        );

        styles.insert(
            StyleId::DiagramImage,
            StyleSpec {
                opacity: Some(0.5),
                foreground: Some(ThemeColor::Muted),
                ..Default::default()
            },
        );

        Ok(Self { styles })
    }

    /// Specification for a style, default when unset
    pub fn spec(&self, id: StyleId) -> StyleSpec {
        self.styles.get(&id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_every_style_has_a_unique_name() {
        let mut names: Vec<&str> = StyleId::ALL.iter().map(|id| id.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), StyleId::ALL.len());
    }

    #[test]
    fn test_build_default_sheet() {
        let sheet = StyleSheet::build(&PreviewConfig::default()).unwrap();
        let hidden = sheet.spec(StyleId::SyntaxHidden);
        assert_eq!(hidden.opacity, Some(0.0));
        assert!(hidden.letter_spacing.is_some());

        let ghost = sheet.spec(StyleId::SyntaxGhost);
        assert_eq!(ghost.opacity, Some(0.3));
        assert!(ghost.letter_spacing.is_none());
    }

    #[test]
    fn test_ghost_opacity_follows_config() {
        let config = PreviewConfig {
            ghost_opacity: 0.5,
            ..Default::default()
        };
        let sheet = StyleSheet::build(&config).unwrap();
        assert_eq!(sheet.spec(StyleId::SyntaxGhost).opacity, Some(0.5));
    }

    #[test]
    fn test_out_of_range_opacity_clamped() {
        let config = PreviewConfig {
            ghost_opacity: 7.0,
            ..Default::default()
        };
        let sheet = StyleSheet::build(&config).unwrap();
        assert_eq!(sheet.spec(StyleId::SyntaxGhost).opacity, Some(1.0));
    }

    #[test]
    fn test_invalid_opacity_rejected() {
        let config = PreviewConfig {
            ghost_opacity: f32::NAN,
            ..Default::default()
        };
        let err = StyleSheet::build(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOpacity { .. }));
    }

    #[test]
    fn test_table_styles_never_affect_width() {
        let sheet = StyleSheet::build(&PreviewConfig::default()).unwrap();
        for id in [StyleId::TableSeparator, StyleId::TablePipe, StyleId::TableHeader] {
            let spec = sheet.spec(id);
            assert!(spec.letter_spacing.is_none(), "{:?} collapses width", id);
            assert!(spec.font_scale.is_none(), "{:?} changes glyph size", id);
            if let Some(opacity) = spec.opacity {
                assert!(opacity > 0.0, "{:?} hides text entirely", id);
            }
        }
    }

    #[test]
    fn test_header_scale_decreases_with_level() {
        let sheet = StyleSheet::build(&PreviewConfig::default()).unwrap();
        let h1 = sheet.spec(StyleId::Header(1)).font_scale.unwrap();
        let h2 = sheet.spec(StyleId::Header(2)).font_scale.unwrap();
        let h3 = sheet.spec(StyleId::Header(3)).font_scale.unwrap();
        assert!(h1 > h2 && h2 > h3);
        assert!(sheet.spec(StyleId::Header(6)).font_scale.is_none());
        assert!(sheet.spec(StyleId::Header(6)).bold);
    }
}
