use serde_json::Value;

use crate::constants::ID_FIELD;
use crate::core::document_id;
use crate::error::Result;
use crate::query::executor;
use crate::query::parser;

use super::Collection;

impl Collection {
    /// Remove the document with the given `_id`.
    ///
    /// Indexes are maintained incrementally: entries for the removed slot are
    /// deleted and entries above it shift down by one. The query cache is
    /// cleared.
    ///
    /// # Returns
    ///
    /// `true` if a document was removed.
    pub fn drop_by_id(&mut self, id: &str) -> bool {
        let Some(slot) = self.slot_by_id(id) else {
            return false;
        };

        for index in self.indexes.iter_mut() {
            index.remove_slot(slot as u32);
        }
        self.docs.remove(slot);
        self.cache.clear();
        self.stats.record_drop(1);
        true
    }

    /// Remove the first document matching `query`.
    pub fn drop_one(&mut self, query: &str) -> Result<u32> {
        self.drop(query, 1)
    }

    /// Remove up to `limit` documents matching `query`, in insertion order.
    ///
    /// On any removal the query cache is cleared and all indexes are rebuilt
    /// from scratch; bulk deletes shift too many slots for incremental
    /// maintenance to be worth it.
    ///
    /// # Returns
    ///
    /// The number of documents removed.
    ///
    /// # Errors
    ///
    /// * [`JayError::Query`](crate::error::JayError::Query) - the query text
    ///   does not parse; nothing is removed
    pub fn drop(&mut self, query: &str, limit: u32) -> Result<u32> {
        let filter = parser::parse(query)?;

        let mut removed = 0u32;
        let mut slot = 0;
        while slot < self.docs.len() && removed < limit {
            if executor::matches(&filter, &self.docs[slot]) {
                self.docs.remove(slot);
                removed += 1;
            } else {
                slot += 1;
            }
        }

        if removed > 0 {
            self.cache.clear();
            self.rebuild_indexes();
            self.stats.record_drop(u64::from(removed));
        }
        Ok(removed)
    }

    /// Remove every document older than `milliseconds` since the epoch.
    ///
    /// IDs embed their append timestamp and the array is append-ordered, so
    /// the retention boundary is a binary search and the removal is one
    /// contiguous drain from the front. Documents whose timestamp equals the
    /// cutoff second are kept.
    ///
    /// # Returns
    ///
    /// The number of documents removed.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use jaydb::Collection;
    /// # use serde_json::json;
    /// # fn main() -> jaydb::Result<()> {
    /// let mut events = Collection::new("events");
    /// events.append(json!({"event": "boot"}))?;
    /// // a cutoff in the past removes nothing
    /// assert_eq!(events.drop_older_than(1_000), 0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn drop_older_than(&mut self, milliseconds: u64) -> u32 {
        let cutoff = milliseconds / 1000;
        if self.docs.is_empty() {
            return 0;
        }

        let boundary = self
            .docs
            .partition_point(|doc| embedded_timestamp(doc) < cutoff);
        if boundary > 0 {
            self.docs.drain(..boundary);
            self.cache.clear();
            self.rebuild_indexes();
            self.stats.record_drop(boundary as u64);
        }
        boundary as u32
    }
}

fn embedded_timestamp(doc: &Value) -> u64 {
    doc.get(ID_FIELD)
        .and_then(Value::as_str)
        .and_then(document_id::timestamp_of)
        .unwrap_or(0)
}
