//! Version-keyed cache of parsed documents
//!
//! Parsing is pure over the document text, so a `(document, version)` pair
//! fully determines the result. Entries are replaced whole on version
//! change; there is no partial invalidation.

use crate::document::{Document, DocumentId};
use crate::parser::{extract, ParsedDocument};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

struct CacheEntry {
    version: u64,
    parsed: Arc<ParsedDocument>,
}

/// Cache of extraction results keyed by document identity and version
pub struct ParseCache {
    entries: HashMap<DocumentId, CacheEntry>,
    parse_count: u64,
}

impl ParseCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            parse_count: 0,
        }
    }

    /// Parsed elements for the document's current version
    ///
    /// Returns the cached result when the stored version matches; otherwise
    /// re-extracts, replaces the entry, and returns the fresh result.
    pub fn get(&mut self, document: &Document) -> Arc<ParsedDocument> {
        if let Some(entry) = self.entries.get(&document.id()) {
            if entry.version == document.version() {
                return Arc::clone(&entry.parsed);
            }
        }

        let parsed = Arc::new(extract(&document.contents()));
        self.parse_count += 1;
        debug!(
            "parsed document {} at version {} ({} elements)",
            document.id(),
            document.version(),
            parsed.element_count()
        );
        self.entries.insert(
            document.id(),
            CacheEntry {
                version: document.version(),
                parsed: Arc::clone(&parsed),
            },
        );
        parsed
    }

    /// Drop the entry for one document, if present
    pub fn invalidate(&mut self, id: DocumentId) {
        self.entries.remove(&id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of extraction runs performed since construction
    pub fn parse_count(&self) -> u64 {
        self.parse_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_returns_shared_result() {
        let mut cache = ParseCache::new();
        let doc = Document::from_text("# Title");

        let first = cache.get(&doc);
        let second = cache.get(&doc);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.parse_count(), 1);
    }

    #[test]
    fn test_version_change_reparses() {
        let mut cache = ParseCache::new();
        let mut doc = Document::from_text("# One");

        let before = cache.get(&doc);
        assert_eq!(before.headers.len(), 1);

        doc.set_text("# One\n\n# Two");
        let after = cache.get(&doc);
        assert_eq!(after.headers.len(), 2);
        assert_eq!(cache.parse_count(), 2);

        // The new version is now the cached one
        let again = cache.get(&doc);
        assert!(Arc::ptr_eq(&after, &again));
        assert_eq!(cache.parse_count(), 2);
    }

    #[test]
    fn test_stale_result_never_served() {
        let mut cache = ParseCache::new();
        let mut doc = Document::from_text("- [ ] task");

        let before = cache.get(&doc);
        assert!(!before.task_items[0].checked);

        doc.set_text("- [x] task");
        let after = cache.get(&doc);
        assert!(after.task_items[0].checked);
    }

    #[test]
    fn test_invalidate_forces_reparse() {
        let mut cache = ParseCache::new();
        let doc = Document::from_text("*x*");

        cache.get(&doc);
        cache.invalidate(doc.id());
        assert!(cache.is_empty());
        cache.get(&doc);
        assert_eq!(cache.parse_count(), 2);
    }

    #[test]
    fn test_documents_cached_independently() {
        let mut cache = ParseCache::new();
        let a = Document::from_text("# A");
        let b = Document::from_text("# B\n\n# C");

        assert_eq!(cache.get(&a).headers.len(), 1);
        assert_eq!(cache.get(&b).headers.len(), 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.parse_count(), 2);

        // Both stay warm
        cache.get(&a);
        cache.get(&b);
        assert_eq!(cache.parse_count(), 2);
    }
}
