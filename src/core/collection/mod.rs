use std::sync::Arc;

use serde_json::Value;

use crate::core::cache::QueryCache;
use crate::core::document_id::IdGenerator;
use crate::core::index::SecondaryIndex;
use crate::stats::Statistics;

// Module declarations
pub mod append;
pub mod drop;
pub mod find;
pub mod indexes;
pub mod update;

/// A named, ordered array of JSON documents together with its secondary
/// indexes and single-result query cache.
///
/// Documents keep insertion order; the only structural reordering ever
/// applied is removal. Every document carries a generated 16-character `_id`
/// that is strictly increasing across appends, which is what makes ID lookup
/// a binary search.
///
/// The engine is single-threaded: write operations take `&mut self`, reads
/// take `&self`, and cursors borrow the document array for their lifetime.
pub struct Collection {
    pub(crate) name: String,
    pub(crate) docs: Vec<Value>,
    pub(crate) indexes: Vec<SecondaryIndex>,
    pub(crate) cache: QueryCache,
    pub(crate) ids: IdGenerator,
    pub(crate) stats: Arc<Statistics>,
}

impl Collection {
    /// Create an empty collection with its own statistics hub.
    ///
    /// Collections that belong to a database share the database's hub
    /// instead; see `JayDb::collection`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_stats(name, Arc::new(Statistics::new()))
    }

    pub(crate) fn with_stats(name: impl Into<String>, stats: Arc<Statistics>) -> Self {
        Collection {
            name: name.into(),
            docs: Vec::new(),
            indexes: Vec::new(),
            cache: QueryCache::new(),
            ids: IdGenerator::new(),
            stats,
        }
    }

    /// Adopt an already-parsed document array, e.g. from a database file.
    ///
    /// Indexes and the cache start empty.
    pub(crate) fn from_docs(
        name: impl Into<String>,
        docs: Vec<Value>,
        stats: Arc<Statistics>,
    ) -> Self {
        stats.record_loaded_documents(docs.len() as u64);
        Collection {
            name: name.into(),
            docs,
            indexes: Vec::new(),
            cache: QueryCache::new(),
            ids: IdGenerator::new(),
            stats,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of documents in the collection
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Get statistics snapshot
    pub fn stats(&self) -> crate::stats::StatsSnapshot {
        self.stats.snapshot()
    }
}
