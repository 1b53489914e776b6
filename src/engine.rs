//! The preview engine
//!
//! Owns the caches, the scheduler, and the pass pipeline. A pass takes a
//! document plus the host's view state and produces one decoration batch
//! per style, applied through the sink with replace semantics. Passes are
//! pure over `(text version, cursors, viewport, config, diagram states)`,
//! so running the same pass twice is a visual no-op.

use crate::config::{PreviewConfig, VIEWPORT_BUFFER_LINES};
use crate::decorations::{
    blockquotes::BlockquoteDecorator, code_blocks::CodeBlockDecorator, diagrams::DiagramDecorator,
    emphasis::EmphasisDecorator, headers::HeaderDecorator, images::ImageDecorator,
    inline_code::InlineCodeDecorator, links::LinkDecorator, lists::ListDecorator,
    metadata::MetadataDecorator, rules::HorizontalRuleDecorator, tables::TableDecorator,
    task_lists::TaskListDecorator,
};
use crate::decorations::{run_decorator, DecorationSet, PassContext, StyleId, StyleSheet};
use crate::diagram::{DiagramCache, DiagramRenderService};
use crate::document::{Document, DocumentId};
use crate::error::{ConfigResult, HostError};
use crate::host::{DecorationSink, ViewState};
use crate::parser::{ParseCache, ParsedDocument};
use crate::scheduler::{UpdateDirective, UpdateScheduler, UpdateTrigger};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

/// Outcome of one decoration pass
#[derive(Debug, Clone, Copy)]
pub struct PassSummary {
    /// Styles applied successfully
    pub applied: usize,
    /// Styles the sink rejected
    pub failed: usize,
    /// Total decorations across all styles
    pub decorations: usize,
}

impl PassSummary {
    pub fn ok(&self) -> bool {
        self.failed == 0
    }
}

/// Incremental live-preview engine for one editor
pub struct PreviewEngine {
    config: PreviewConfig,
    styles: StyleSheet,
    parse_cache: ParseCache,
    diagram_cache: DiagramCache,
    scheduler: UpdateScheduler,
    render_service: Option<Box<dyn DiagramRenderService>>,
    active_document: Option<DocumentId>,
}

impl PreviewEngine {
    pub fn new(config: PreviewConfig) -> ConfigResult<Self> {
        let styles = StyleSheet::build(&config)?;
        Ok(Self {
            config,
            styles,
            parse_cache: ParseCache::new(),
            diagram_cache: DiagramCache::new(),
            scheduler: UpdateScheduler::new(),
            render_service: None,
            active_document: None,
        })
    }

    /// Attach the backend that renders diagram blocks
    pub fn with_render_service(mut self, service: Box<dyn DiagramRenderService>) -> Self {
        self.render_service = Some(service);
        self
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Replace the configuration, rebuilding the style table
    ///
    /// The caller should follow up with a `ConfigChanged` update request
    /// so the new styles reach the document.
    pub fn set_config(&mut self, config: PreviewConfig) -> ConfigResult<()> {
        self.styles = StyleSheet::build(&config)?;
        info!(
            "configuration replaced, styles rebuilt (enabled: {})",
            config.enabled
        );
        self.config = config;
        Ok(())
    }

    /// Record an update request for a document
    pub fn request_update(
        &mut self,
        document: DocumentId,
        trigger: UpdateTrigger,
        now: Instant,
    ) -> UpdateDirective {
        if !self.config.enabled {
            return UpdateDirective::Skip;
        }
        self.scheduler.request(document, trigger, now)
    }

    /// Check whether a document's debounce deadline has passed
    pub fn poll_due(&mut self, document: DocumentId, now: Instant) -> bool {
        self.scheduler.poll(document, now)
    }

    /// Fold completed diagram renders into the cache
    ///
    /// Returns a debounced refresh directive for the active document when
    /// anything arrived, so bursts of completions coalesce into one pass.
    pub fn poll_diagram_events(&mut self, now: Instant) -> UpdateDirective {
        // Drain even while disabled so completions never pile up unfolded
        if self.diagram_cache.drain_events() == 0 || !self.config.enabled {
            return UpdateDirective::Skip;
        }
        let Some(active) = self.active_document else {
            return UpdateDirective::Skip;
        };
        self.scheduler.request(active, UpdateTrigger::DiagramResolved, now)
    }

    /// Run one full decoration pass
    pub fn run_pass(
        &mut self,
        document: &Document,
        view: &ViewState,
        sink: &mut dyn DecorationSink,
    ) -> PassSummary {
        self.active_document = Some(document.id());

        if !self.config.enabled {
            // Clear any decorations a previous enabled pass left behind;
            // a disabled pass references no diagrams, so the eviction that
            // runs every pass empties the diagram cache too
            self.diagram_cache.evict_except(&HashSet::new());
            return self.apply(DecorationSet::new(), sink);
        }

        let parsed = self.parse_cache.get(document);
        let text = document.contents();
        let cursors = view.cursors();

        // Dispatch renders for every diagram currently in the document and
        // remember the keys: everything else is stale after this pass.
        let mut active_keys = HashSet::new();
        if self.config.render_diagrams {
            let service = self.render_service.as_deref();
            for block in parsed.diagram_blocks() {
                let source = text
                    .get(block.content_range.start.offset..block.content_range.end.offset)
                    .unwrap_or("");
                let key = self.diagram_cache.ensure(
                    source,
                    view.dark_theme,
                    self.config.diagram_mode,
                    service,
                );
                active_keys.insert(key);
            }
        }

        let ctx = PassContext {
            config: &self.config,
            cursors: &cursors,
            visible: buffered_window(&view.visible_lines),
            dark_theme: view.dark_theme,
            text: &text,
            diagrams: &self.diagram_cache,
        };

        let mut out = DecorationSet::new();
        if self.config.render_metadata {
            run_decorator(&MetadataDecorator, &parsed.metadata, &ctx, &mut out);
        }
        if self.config.render_headers {
            run_decorator(&HeaderDecorator, &parsed.headers, &ctx, &mut out);
        }
        if self.config.render_emphasis {
            run_decorator(&EmphasisDecorator, &parsed.emphasis, &ctx, &mut out);
        }
        if self.config.render_task_lists {
            run_decorator(&TaskListDecorator, &parsed.task_items, &ctx, &mut out);
        }
        if self.config.render_inline_code {
            run_decorator(&InlineCodeDecorator, &parsed.inline_code, &ctx, &mut out);
        }
        if self.config.render_links {
            run_decorator(&LinkDecorator, &parsed.links, &ctx, &mut out);
        }
        if self.config.render_blockquotes {
            run_decorator(&BlockquoteDecorator, &parsed.blockquotes, &ctx, &mut out);
        }
        if self.config.render_horizontal_rules {
            run_decorator(&HorizontalRuleDecorator, &parsed.horizontal_rules, &ctx, &mut out);
        }
        if self.config.render_code_blocks {
            run_decorator(&CodeBlockDecorator, &parsed.fenced_code, &ctx, &mut out);
        }
        if self.config.render_diagrams {
            run_decorator(&DiagramDecorator, &parsed.fenced_code, &ctx, &mut out);
        }
        if self.config.render_images {
            run_decorator(&ImageDecorator, &parsed.images, &ctx, &mut out);
        }
        if self.config.render_lists {
            run_decorator(&ListDecorator, &parsed.list_items, &ctx, &mut out);
        }
        if self.config.render_tables {
            run_decorator(&TableDecorator, &parsed.tables, &ctx, &mut out);
        }

        self.diagram_cache.evict_except(&active_keys);
        self.apply(out, sink)
    }

    /// Apply every style's batch, empty batches included
    fn apply(&mut self, set: DecorationSet, sink: &mut dyn DecorationSink) -> PassSummary {
        let mut applied = 0;
        let mut failed = 0;
        for style in StyleId::ALL {
            match sink.apply(style, set.get(style)) {
                Ok(()) => applied += 1,
                Err(source) => {
                    let error = HostError::Apply {
                        style: style.name(),
                        source,
                    };
                    warn!("{:#}", anyhow::Error::new(error));
                    failed += 1;
                }
            }
        }
        debug!(
            "pass applied {applied} styles, {} decorations, {failed} failures",
            set.total()
        );
        PassSummary {
            applied,
            failed,
            decorations: set.total(),
        }
    }

    /// Forget a closed document's cache entries and deadlines
    pub fn close_document(&mut self, document: DocumentId) {
        self.parse_cache.invalidate(document);
        self.scheduler.cancel(document);
        if self.active_document == Some(document) {
            self.active_document = None;
        }
    }

    /// Parsed elements for a document, through the cache
    pub fn parse(&mut self, document: &Document) -> Arc<ParsedDocument> {
        self.parse_cache.get(document)
    }

    /// Extraction runs performed so far
    pub fn parse_count(&self) -> u64 {
        self.parse_cache.parse_count()
    }

    /// Diagram cache entries currently held
    pub fn diagram_entries(&self) -> usize {
        self.diagram_cache.len()
    }
}

/// Pad the visible window with the scroll buffer on both sides
fn buffered_window(visible: &Range<usize>) -> Range<usize> {
    visible.start.saturating_sub(VIEWPORT_BUFFER_LINES)
        ..visible.end.saturating_add(VIEWPORT_BUFFER_LINES)
}
