use std::cmp::Ordering;

use serde_json::Value;

use crate::constants::ID_FIELD;
use crate::core::cursor::{DocumentCursor, IndexCursor, LinearCursor};
use crate::core::document_id;
use crate::core::index::SecondaryIndex;
use crate::error::Result;
use crate::query::ast::{BasicComparison, CompareOp};
use crate::query::parser;

impl super::Collection {
    /// Look up a document by its `_id`.
    ///
    /// IDs are append-monotonic and the array is never reordered or
    /// middle-inserted, so this is a binary search on the embedded
    /// (timestamp, counter) pair.
    ///
    /// # Returns
    ///
    /// The document serialized to text, or `None` if no document carries the
    /// ID (including malformed IDs).
    pub fn find_one_by_id(&self, id: &str) -> Option<String> {
        self.stats.record_id_lookup();
        let slot = self.slot_by_id(id)?;
        serde_json::to_string(&self.docs[slot]).ok()
    }

    /// Find the first document matching `query`, serialized to text.
    ///
    /// Resolution order:
    ///
    /// 1. the query cache, keyed by the hash of the query text;
    /// 2. an index lookup, when the query is a single equality comparison on
    ///    an indexed field (first slot of the key's range);
    /// 3. a linear scan with limit 1.
    ///
    /// A non-empty result is stored in the cache before returning.
    ///
    /// # Errors
    ///
    /// * [`JayError::Query`](crate::error::JayError::Query) - the query text
    ///   does not parse; the collection and cache are unchanged
    ///
    /// # Example
    ///
    /// ```rust
    /// # use jaydb::Collection;
    /// # use serde_json::json;
    /// # fn main() -> jaydb::Result<()> {
    /// let mut users = Collection::new("users");
    /// users.append(json!({"name": "Ada", "age": 36}))?;
    /// let hit = users.find_one(r#"{"age": 36}"#)?;
    /// assert!(hit.is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn find_one(&mut self, query: &str) -> Result<Option<String>> {
        self.stats.record_find();

        if let Some(hit) = self.cache.get(query) {
            self.stats.record_cache_hit();
            return Ok(Some(hit.to_string()));
        }
        self.stats.record_cache_miss();

        let mut result = None;
        if let Some((index, cmp)) = self.plan_index(query) {
            self.stats.record_index_lookup();
            if let Some(slot) = index.first_slot(&cmp.key) {
                result = serde_json::to_string(&self.docs[slot as usize]).ok();
            }
        }

        if result.is_none() {
            let filter = parser::parse(query)?;
            self.stats.record_linear_scan();
            result = LinearCursor::new(&self.docs, filter, 1).next();
        }

        if let Some(ref doc) = result {
            self.cache.insert(query, doc.clone());
        }
        Ok(result)
    }

    /// Build a cursor over every document matching `query`, yielding at most
    /// `limit` of them.
    ///
    /// When the query is a single equality comparison on an indexed field the
    /// cursor walks that key's equal-range; otherwise it scans the array.
    /// `find` never consults or populates the query cache.
    ///
    /// # Errors
    ///
    /// * [`JayError::Query`](crate::error::JayError::Query) - the query text
    ///   does not parse
    pub fn find(&self, query: &str, limit: u32) -> Result<DocumentCursor<'_>> {
        self.stats.record_find();

        if let Some((index, cmp)) = self.plan_index(query) {
            self.stats.record_index_lookup();
            let slots = index.slots(&cmp.key).to_vec();
            return Ok(DocumentCursor::Index(IndexCursor::new(
                &self.docs, slots, limit,
            )));
        }

        let filter = parser::parse(query)?;
        self.stats.record_linear_scan();
        Ok(DocumentCursor::Linear(LinearCursor::new(
            &self.docs, filter, limit,
        )))
    }

    // Index fast path: a single equality comparison on a field that has an
    // index. Non-equality comparisons and multi-clause filters scan.
    fn plan_index(&self, query: &str) -> Option<(&SecondaryIndex, BasicComparison)> {
        let cmp = parser::parse_comparison(query)?;
        if cmp.op != CompareOp::Eq {
            return None;
        }
        let index = self
            .indexes
            .iter()
            .find(|index| index.field_name() == cmp.field)?;
        Some((index, cmp))
    }

    /// Current slot of the document with the given `_id`, by binary search.
    pub(crate) fn slot_by_id(&self, id: &str) -> Option<usize> {
        let target = document_id::decode(id)?;
        self.docs
            .binary_search_by(|doc| match embedded_id(doc) {
                // documents with no well-formed id sort first
                None => Ordering::Less,
                Some(pair) => pair.cmp(&target),
            })
            .ok()
    }
}

fn embedded_id(doc: &Value) -> Option<(u64, u64)> {
    doc.get(ID_FIELD)
        .and_then(Value::as_str)
        .and_then(document_id::decode)
}
