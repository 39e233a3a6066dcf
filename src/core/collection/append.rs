use serde_json::Value;

use crate::constants::ID_FIELD;
use crate::error::{JayError, Result};

use super::Collection;

impl Collection {
    /// Append a document to the end of the collection.
    ///
    /// The document is stamped with a generated `_id` (overwriting any
    /// existing member of that name), pushed onto the array, and added to
    /// every secondary index whose field resolves to a string or number.
    ///
    /// Append never touches the query cache: only non-empty `find_one`
    /// results are cached, and a cached first match stays the first match
    /// when documents are only added behind it.
    ///
    /// # Returns
    ///
    /// The generated `_id`.
    ///
    /// # Errors
    ///
    /// * [`JayError::NotAnObject`] - the value is not a JSON object; the
    ///   collection is left unchanged
    ///
    /// # Example
    ///
    /// ```rust
    /// # use jaydb::Collection;
    /// # use serde_json::json;
    /// let mut users = Collection::new("users");
    /// let id = users.append(json!({"name": "Ada"})).unwrap();
    /// assert_eq!(id.len(), 16);
    /// ```
    pub fn append(&mut self, mut doc: Value) -> Result<String> {
        let Some(object) = doc.as_object_mut() else {
            return Err(JayError::NotAnObject);
        };

        let id = self.ids.next_id();
        object.insert(ID_FIELD.to_string(), Value::String(id.clone()));

        self.docs.push(doc);
        self.index_new_doc();
        self.stats.record_append();
        Ok(id)
    }

    /// Parse `text` as a JSON object and append it.
    ///
    /// # Errors
    ///
    /// * [`JayError::Json`] - the text is not valid JSON
    /// * [`JayError::NotAnObject`] - the text is valid JSON but not an object
    pub fn append_json(&mut self, text: &str) -> Result<String> {
        let doc: Value = serde_json::from_str(text)?;
        self.append(doc)
    }

    // Index the document just pushed onto the array.
    fn index_new_doc(&mut self) {
        let slot = (self.docs.len() - 1) as u32;
        if let Some(doc) = self.docs.last() {
            for index in self.indexes.iter_mut() {
                index.insert_doc(doc, slot);
            }
        }
    }
}
