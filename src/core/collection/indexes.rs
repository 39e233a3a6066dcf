use log::debug;

use crate::core::index::SecondaryIndex;
use crate::error::Result;

use super::Collection;

impl Collection {
    /// Create a secondary index over a dotted field path.
    ///
    /// The whole array is scanned once; one entry is added per document
    /// whose field resolves to a string or number. Duplicate index names are
    /// not detected.
    ///
    /// # Errors
    ///
    /// * [`JayError::InvalidFieldPath`](crate::error::JayError::InvalidFieldPath) -
    ///   the path is empty or has an empty segment
    ///
    /// # Example
    ///
    /// ```rust
    /// # use jaydb::Collection;
    /// # use serde_json::json;
    /// # fn main() -> jaydb::Result<()> {
    /// let mut users = Collection::new("users");
    /// users.append(json!({"address": {"city": "Perth"}}))?;
    /// users.create_index("address.city")?;
    /// assert!(users.find(r#"{"address.city": "Perth"}"#, 10)?.has_next());
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_index(&mut self, field: &str) -> Result<()> {
        let index = SecondaryIndex::build(field, &self.docs)?;
        self.indexes.push(index);
        self.stats
            .index_count
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Ok(())
    }

    /// Remove the first index whose field path equals `field`.
    pub fn drop_index(&mut self, field: &str) {
        if let Some(pos) = self
            .indexes
            .iter()
            .position(|index| index.field_name() == field)
        {
            self.indexes.remove(pos);
            self.stats
                .index_count
                .fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
        }
    }

    /// Field paths of the current indexes, in creation order.
    pub fn indexed_fields(&self) -> Vec<&str> {
        self.indexes.iter().map(SecondaryIndex::field_name).collect()
    }

    // Re-scan every index from the current array. Used after bulk mutations
    // where incremental slot maintenance would touch most entries anyway.
    pub(crate) fn rebuild_indexes(&mut self) {
        if self.indexes.is_empty() {
            return;
        }
        debug!(
            "rebuilding {} indexes over {} documents in collection {:?}",
            self.indexes.len(),
            self.docs.len(),
            self.name
        );
        for index in self.indexes.iter_mut() {
            index.rebuild(&self.docs);
        }
        self.stats.record_index_rebuild();
    }
}
