//! Update scheduling and debounce policy
//!
//! Triggers fall into two classes. High-frequency ones (typing, scrolling)
//! are debounced so a burst costs one pass; user-intent ones (cursor moves,
//! switching documents) run immediately because a delay there reads as lag.
//! Deadlines are per document and last-write-wins: a new debounced request
//! supersedes the previous deadline, and an immediate request discards it.

use crate::config::DEBOUNCE_DELAY_MS;
use crate::document::DocumentId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// What caused an update request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTrigger {
    /// Document text was edited
    TextChanged,
    /// Cursor or selection moved
    SelectionChanged,
    /// Visible line window moved
    ViewportScrolled,
    /// A different document became active
    DocumentSwitched,
    /// Preview configuration changed
    ConfigChanged,
    /// An asynchronous diagram render completed
    DiagramResolved,
}

/// Scheduling class of a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    Immediate,
    Debounced,
}

impl UpdateTrigger {
    pub fn policy(&self) -> UpdatePolicy {
        match self {
            UpdateTrigger::TextChanged
            | UpdateTrigger::ViewportScrolled
            | UpdateTrigger::DiagramResolved => UpdatePolicy::Debounced,
            UpdateTrigger::SelectionChanged
            | UpdateTrigger::DocumentSwitched
            | UpdateTrigger::ConfigChanged => UpdatePolicy::Immediate,
        }
    }
}

/// What the caller should do with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDirective {
    /// Run a pass now
    Now,
    /// Run a pass once the deadline passes, unless superseded
    At(Instant),
    /// Nothing to do
    Skip,
}

/// Per-document debounce deadlines
pub struct UpdateScheduler {
    pending: HashMap<DocumentId, Instant>,
    delay: Duration,
}

impl UpdateScheduler {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(DEBOUNCE_DELAY_MS))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            pending: HashMap::new(),
            delay,
        }
    }

    /// Record a request, returning how the caller should proceed
    ///
    /// An immediate trigger also discards any pending deadline for the
    /// document: the pass it causes already reflects the latest state.
    pub fn request(
        &mut self,
        document: DocumentId,
        trigger: UpdateTrigger,
        now: Instant,
    ) -> UpdateDirective {
        match trigger.policy() {
            UpdatePolicy::Immediate => {
                self.pending.remove(&document);
                UpdateDirective::Now
            }
            UpdatePolicy::Debounced => {
                let deadline = now + self.delay;
                self.pending.insert(document, deadline);
                UpdateDirective::At(deadline)
            }
        }
    }

    /// Check one document's deadline, consuming it when due
    pub fn poll(&mut self, document: DocumentId, now: Instant) -> bool {
        match self.pending.get(&document) {
            Some(&deadline) if deadline <= now => {
                self.pending.remove(&document);
                true
            }
            _ => false,
        }
    }

    /// All documents whose deadlines have passed, consuming them
    pub fn poll_due(&mut self, now: Instant) -> Vec<DocumentId> {
        let due: Vec<DocumentId> = self
            .pending
            .iter()
            .filter(|(_, &deadline)| deadline <= now)
            .map(|(&document, _)| document)
            .collect();
        for document in &due {
            self.pending.remove(document);
        }
        due
    }

    /// Drop a document's pending deadline, if any
    pub fn cancel(&mut self, document: DocumentId) {
        self.pending.remove(&document);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Deadline currently pending for a document
    pub fn pending_deadline(&self, document: DocumentId) -> Option<Instant> {
        self.pending.get(&document).copied()
    }
}

impl Default for UpdateScheduler {
    fn default() -> Self {
        Self::new()
    }
}
