use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use ahash::AHashMap;
use log::{debug, warn};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::core::collection::Collection;
use crate::error::{JayError, Result};
use crate::stats::{Statistics, StatsSnapshot};

/// Embedded in-memory JSON document database.
///
/// A database is a set of named [`Collection`]s sharing one statistics hub.
/// It persists to a single JSON file whose root object maps collection names
/// to document arrays.
///
/// The database is single-threaded: it holds no locks, and callers that
/// share one across threads must serialize access themselves.
pub struct JayDb {
    collections: AHashMap<String, Collection>,
    stats: Arc<Statistics>,
}

impl JayDb {
    /// Create an empty database.
    pub fn new() -> Self {
        JayDb {
            collections: AHashMap::new(),
            stats: Arc::new(Statistics::new()),
        }
    }

    /// Create a database from an existing file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use jaydb::JayDb;
    ///
    /// # fn main() -> jaydb::Result<()> {
    /// let mut db = JayDb::open("/var/lib/app/data.json")?;
    /// let users = db.collection("users");
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut db = JayDb::new();
        db.load(path)?;
        Ok(db)
    }

    /// Fetch a collection by name, creating it if it does not exist.
    pub fn collection(&mut self, name: &str) -> &mut Collection {
        let stats = &self.stats;
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Collection::with_stats(name, Arc::clone(stats)))
    }

    pub fn get_collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    pub fn get_collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.get_mut(name)
    }

    /// Remove a collection and everything in it.
    ///
    /// # Returns
    ///
    /// `true` if the collection existed.
    pub fn drop_collection(&mut self, name: &str) -> bool {
        match self.collections.remove(name) {
            Some(collection) => {
                self.stats
                    .document_count
                    .fetch_sub(collection.len() as u64, Ordering::Relaxed);
                self.stats
                    .index_count
                    .fetch_sub(collection.indexed_fields().len() as u64, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    /// Get statistics snapshot
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Write the whole database to `path` as one JSON file.
    ///
    /// Only documents are persisted. Indexes and query caches are in-memory
    /// acceleration structures and are rebuilt by the application after a
    /// [`load`](JayDb::load).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &RootSnapshot(&self.collections))?;
        writer.flush()?;
        debug!(
            "saved {} collections to {:?}",
            self.collections.len(),
            path.as_ref()
        );
        Ok(())
    }

    /// Replace the database contents with the file at `path`.
    ///
    /// A root member whose value is not an array is corrupt; it is logged
    /// and loaded as an empty collection rather than failing the whole file.
    ///
    /// # Errors
    ///
    /// * [`JayError::Io`] - the file cannot be read
    /// * [`JayError::Json`] - the file is not valid JSON
    /// * [`JayError::CorruptDatabase`] - the root is not a JSON object
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::open(&path)?;
        let root: Value = serde_json::from_reader(BufReader::new(file))?;
        let Value::Object(members) = root else {
            return Err(JayError::CorruptDatabase);
        };

        self.collections.clear();
        self.stats.document_count.store(0, Ordering::Relaxed);
        self.stats.index_count.store(0, Ordering::Relaxed);

        for (name, member) in members {
            let docs = match member {
                Value::Array(docs) => docs,
                _ => {
                    warn!(
                        "collection {:?} in {:?} is not an array; loading it empty",
                        name,
                        path.as_ref()
                    );
                    Vec::new()
                }
            };
            let collection = Collection::from_docs(&name, docs, Arc::clone(&self.stats));
            self.collections.insert(name, collection);
        }

        debug!(
            "loaded {} collections from {:?}",
            self.collections.len(),
            path.as_ref()
        );
        Ok(())
    }
}

impl Default for JayDb {
    fn default() -> Self {
        Self::new()
    }
}

// Serializes the root object {collection name: [documents…]} without
// cloning the document arrays.
struct RootSnapshot<'a>(&'a AHashMap<String, Collection>);

impl Serialize for RootSnapshot<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, collection)| (name, &collection.docs)))
    }
}
