//! Asynchronous diagram rendering cache
//!
//! Diagram sources inside fenced blocks are rendered out of process by a
//! host-provided service. Results are cached by a hash of the source text
//! and theme, so re-opening a document or toggling back to a known diagram
//! shows the artifact immediately. Render completion flows back through a
//! channel and is folded into the next decoration pass; a failed render is
//! logged and the block falls back to ordinary code styling.

use crate::config::DiagramMode;
use log::{debug, warn};
use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use tokio::sync::mpsc;

/// Cache key for one diagram: source text and theme
///
/// The source is trimmed first so trailing whitespace edits around the
/// fence do not force a re-render.
pub fn content_key(source: &str, dark_theme: bool) -> u64 {
    let mut hasher = DefaultHasher::new();
    source.trim().hash(&mut hasher);
    dark_theme.hash(&mut hasher);
    hasher.finish()
}

/// A rendered diagram ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramArtifact {
    /// Where the host finds the rendered output, typically a file URI
    pub uri: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Lifecycle of one diagram render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramState {
    /// Dispatched to the render service, not yet resolved
    Pending,
    Ready(DiagramArtifact),
    Failed(String),
}

/// How a finished render resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(DiagramArtifact),
    Failed(String),
}

/// Completion notice sent by the render service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEvent {
    pub key: u64,
    pub outcome: RenderOutcome,
}

pub type DiagramEventSender = mpsc::UnboundedSender<DiagramEvent>;

/// One render job handed to the service
pub struct RenderRequest {
    pub key: u64,
    pub source: String,
    pub dark_theme: bool,
    pub mode: DiagramMode,
    /// Channel the service reports completion on
    pub events: DiagramEventSender,
}

/// Host-provided backend that renders diagram source off the update path
pub trait DiagramRenderService: Send {
    /// Start rendering; must not block the caller
    fn spawn_render(&self, request: RenderRequest) -> anyhow::Result<()>;
}

/// Content-addressed store of diagram render states
pub struct DiagramCache {
    entries: HashMap<u64, DiagramState>,
    events_tx: DiagramEventSender,
    events_rx: mpsc::UnboundedReceiver<DiagramEvent>,
}

impl DiagramCache {
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            entries: HashMap::new(),
            events_tx,
            events_rx,
        }
    }

    /// Current state for a key, if the diagram has been seen
    pub fn state(&self, key: u64) -> Option<&DiagramState> {
        self.entries.get(&key)
    }

    /// Sender handed to render services for completion events
    pub fn sender(&self) -> DiagramEventSender {
        self.events_tx.clone()
    }

    /// Ensure a render is underway or resolved for this source
    ///
    /// New sources are marked pending and dispatched; known sources are
    /// left alone regardless of state. A dispatch error marks the entry
    /// failed immediately.
    pub fn ensure(
        &mut self,
        source: &str,
        dark_theme: bool,
        mode: DiagramMode,
        service: Option<&dyn DiagramRenderService>,
    ) -> u64 {
        let key = content_key(source, dark_theme);
        if let Entry::Vacant(slot) = self.entries.entry(key) {
            let Some(service) = service else {
                return key;
            };
            slot.insert(DiagramState::Pending);
            debug!("dispatching diagram render for key {key:x}");
            let request = RenderRequest {
                key,
                source: source.trim().to_string(),
                dark_theme,
                mode,
                events: self.events_tx.clone(),
            };
            if let Err(error) = service.spawn_render(request) {
                warn!("diagram render dispatch failed: {error}");
                self.entries.insert(key, DiagramState::Failed(error.to_string()));
            }
        }
        key
    }

    /// Fold completed renders into the cache, returning how many arrived
    pub fn drain_events(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            drained += 1;
            match event.outcome {
                RenderOutcome::Rendered(artifact) => {
                    self.entries.insert(event.key, DiagramState::Ready(artifact));
                }
                RenderOutcome::Failed(message) => {
                    // The block keeps its plain code styling; nothing is
                    // surfaced in the document itself
                    warn!("diagram render failed for key {:x}: {}", event.key, message);
                    self.entries.insert(event.key, DiagramState::Failed(message));
                }
            }
        }
        drained
    }

    /// Drop every entry whose key is not in the active set
    ///
    /// Called once per pass with the keys the current document still
    /// references, so edited-away diagrams do not accumulate.
    pub fn evict_except(&mut self, active: &HashSet<u64>) {
        let before = self.entries.len();
        self.entries.retain(|key, _| active.contains(key));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!("evicted {evicted} stale diagram entries");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DiagramCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Service that records requests and resolves them on demand
    struct RecordingService {
        requests: Arc<Mutex<Vec<(u64, String)>>>,
        fail: bool,
    }

    impl RecordingService {
        fn new() -> (Self, Arc<Mutex<Vec<(u64, String)>>>) {
            let requests = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    requests: Arc::clone(&requests),
                    fail: false,
                },
                requests,
            )
        }
    }

    impl DiagramRenderService for RecordingService {
        fn spawn_render(&self, request: RenderRequest) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("renderer unavailable");
            }
            self.requests
                .lock()
                .unwrap()
                .push((request.key, request.source));
            Ok(())
        }
    }

    fn artifact(uri: &str) -> DiagramArtifact {
        DiagramArtifact {
            uri: uri.to_string(),
            width: Some(320),
            height: Some(200),
        }
    }

    #[test]
    fn test_key_ignores_surrounding_whitespace() {
        assert_eq!(
            content_key("graph TD\n", false),
            content_key("\n  graph TD  \n\n", false)
        );
    }

    #[test]
    fn test_key_differs_by_theme() {
        assert_ne!(content_key("graph TD", false), content_key("graph TD", true));
    }

    #[test]
    fn test_ensure_dispatches_once() {
        let mut cache = DiagramCache::new();
        let (service, requests) = RecordingService::new();

        let key = cache.ensure("graph TD", false, DiagramMode::Auto, Some(&service));
        assert_eq!(cache.state(key), Some(&DiagramState::Pending));
        assert_eq!(requests.lock().unwrap().len(), 1);

        // Same source again: no second dispatch
        cache.ensure("graph TD", false, DiagramMode::Auto, Some(&service));
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_event_resolves_to_ready() {
        let mut cache = DiagramCache::new();
        let (service, _) = RecordingService::new();
        let key = cache.ensure("graph TD", true, DiagramMode::Svg, Some(&service));

        let sender = cache.sender();
        sender
            .send(DiagramEvent {
                key,
                outcome: RenderOutcome::Rendered(artifact("file:///d.svg")),
            })
            .unwrap();

        assert_eq!(cache.drain_events(), 1);
        assert_eq!(cache.state(key), Some(&DiagramState::Ready(artifact("file:///d.svg"))));
    }

    #[test]
    fn test_failed_render_recorded_without_panic() {
        let mut cache = DiagramCache::new();
        let (service, _) = RecordingService::new();
        let key = cache.ensure("graph TD", false, DiagramMode::Auto, Some(&service));

        cache
            .sender()
            .send(DiagramEvent {
                key,
                outcome: RenderOutcome::Failed("syntax error".to_string()),
            })
            .unwrap();

        cache.drain_events();
        assert!(matches!(cache.state(key), Some(DiagramState::Failed(_))));
    }

    #[test]
    fn test_dispatch_error_marks_failed() {
        let mut cache = DiagramCache::new();
        let (mut service, _) = RecordingService::new();
        service.fail = true;

        let key = cache.ensure("graph TD", false, DiagramMode::Auto, Some(&service));
        assert!(matches!(cache.state(key), Some(DiagramState::Failed(_))));
    }

    #[test]
    fn test_no_service_means_no_entry() {
        let mut cache = DiagramCache::new();
        let key = cache.ensure("graph TD", false, DiagramMode::Auto, None);
        assert_eq!(cache.state(key), None);
    }

    #[test]
    fn test_eviction_keeps_active_keys() {
        let mut cache = DiagramCache::new();
        let (service, _) = RecordingService::new();
        let keep = cache.ensure("graph TD", false, DiagramMode::Auto, Some(&service));
        let stale = cache.ensure("pie\n  \"a\": 1", false, DiagramMode::Auto, Some(&service));

        let mut active = HashSet::new();
        active.insert(keep);
        cache.evict_except(&active);

        assert!(cache.state(keep).is_some());
        assert!(cache.state(stale).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_edit_and_restore_hits_cache() {
        let mut cache = DiagramCache::new();
        let (service, requests) = RecordingService::new();

        let key = cache.ensure("graph TD", false, DiagramMode::Auto, Some(&service));
        cache
            .sender()
            .send(DiagramEvent {
                key,
                outcome: RenderOutcome::Rendered(artifact("file:///d.svg")),
            })
            .unwrap();
        cache.drain_events();

        // The same source after an edit round trip resolves without a
        // second dispatch
        let again = cache.ensure("graph TD\n", false, DiagramMode::Auto, Some(&service));
        assert_eq!(again, key);
        assert!(matches!(cache.state(again), Some(DiagramState::Ready(_))));
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    /// Service that resolves on a spawned task, the way a real backend would
    struct TaskService;

    impl DiagramRenderService for TaskService {
        fn spawn_render(&self, request: RenderRequest) -> anyhow::Result<()> {
            tokio::spawn(async move {
                let rendered = artifact(&format!("file:///out/{:x}.svg", request.key));
                let _ = request.events.send(DiagramEvent {
                    key: request.key,
                    outcome: RenderOutcome::Rendered(rendered),
                });
            });
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_spawned_render_resolves_through_channel() {
        let mut cache = DiagramCache::new();
        let key = cache.ensure("graph TD", false, DiagramMode::Auto, Some(&TaskService));
        assert_eq!(cache.state(key), Some(&DiagramState::Pending));
        assert_eq!(cache.drain_events(), 0);

        // On the current-thread runtime the spawned task runs during the yield
        tokio::task::yield_now().await;

        assert_eq!(cache.drain_events(), 1);
        assert!(matches!(cache.state(key), Some(DiagramState::Ready(_))));
    }
}
