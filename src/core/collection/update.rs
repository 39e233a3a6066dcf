use log::warn;
use serde_json::Value;

use crate::error::{JayError, Result};
use crate::query::executor;
use crate::query::parser;
use crate::utils::merge::merge_objects;

use super::Collection;

impl Collection {
    /// Deep-merge a patch into the document with the given `_id`.
    ///
    /// The document is located by binary search. On success its index
    /// entries are refreshed in place (the slot does not move) and the query
    /// cache is cleared.
    ///
    /// # Returns
    ///
    /// `true` if a document was patched, `false` if the ID matched nothing
    /// (a silent no-op).
    ///
    /// # Errors
    ///
    /// * [`JayError::Json`] / [`JayError::NotAnObject`] - the patch text is
    ///   not a JSON object; nothing changes
    /// * [`JayError::MergeConflict`] - a member had mismatched types; members
    ///   merged before the conflict stay applied, and the cache and index
    ///   maintenance still run
    pub fn update_by_id(&mut self, id: &str, patch_text: &str) -> Result<bool> {
        let patch = parse_patch(patch_text)?;
        let Some(slot) = self.slot_by_id(id) else {
            return Ok(false);
        };

        let merged = merge_objects(&mut self.docs[slot], &patch);

        let doc = &self.docs[slot];
        for index in self.indexes.iter_mut() {
            index.remove_slot_entries(slot as u32);
            index.insert_doc(doc, slot as u32);
        }
        self.cache.clear();
        self.stats.record_update(1);

        merged.map(|()| true)
    }

    /// Deep-merge a patch into every document matching `query`.
    ///
    /// Documents are visited in insertion order. A merge type-mismatch skips
    /// the rest of that document (anything already merged stays) and the scan
    /// continues. The query cache is cleared unconditionally; indexes are
    /// rebuilt when at least one document was touched, so indexed lookups
    /// never see stale values.
    ///
    /// # Returns
    ///
    /// The number of matching documents.
    ///
    /// # Errors
    ///
    /// * [`JayError::Query`] - the query text does not parse
    /// * [`JayError::Json`] / [`JayError::NotAnObject`] - the patch text is
    ///   not a JSON object
    pub fn update(&mut self, query: &str, patch_text: &str) -> Result<u32> {
        let filter = parser::parse(query)?;
        let patch = parse_patch(patch_text)?;

        let mut matched = 0u32;
        for doc in self.docs.iter_mut() {
            if executor::matches(&filter, doc) {
                if let Err(err) = merge_objects(doc, &patch) {
                    warn!(
                        "update on collection {:?} skipped part of a document: {}",
                        self.name, err
                    );
                }
                matched += 1;
            }
        }

        if matched > 0 {
            self.rebuild_indexes();
            self.stats.record_update(u64::from(matched));
        }
        self.cache.clear();
        Ok(matched)
    }
}

fn parse_patch(patch_text: &str) -> Result<Value> {
    let patch: Value = serde_json::from_str(patch_text)?;
    if !patch.is_object() {
        return Err(JayError::NotAnObject);
    }
    Ok(patch)
}
