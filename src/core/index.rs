use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{JayError, Result};

/// Index key: the comparable union of the two indexable JSON scalar types.
///
/// Keys order within a variant (lexicographic for strings, IEEE total order
/// for numbers). Cross-variant ordering is by tag; it is arbitrary but
/// consistent, and never decides a lookup because any one document field
/// produces keys of a single type.
#[derive(Debug, Clone)]
pub enum ScalarKey {
    Str(String),
    Num(f64),
}

impl ScalarKey {
    /// Key for a JSON value, if it is an indexable scalar.
    ///
    /// Arrays, objects, booleans and null do not produce keys.
    pub fn from_value(value: &Value) -> Option<ScalarKey> {
        match value {
            Value::String(s) => Some(ScalarKey::Str(s.clone())),
            Value::Number(n) => n.as_f64().map(ScalarKey::Num),
            _ => None,
        }
    }
}

impl PartialEq for ScalarKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScalarKey {}

impl PartialOrd for ScalarKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScalarKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ScalarKey::Str(a), ScalarKey::Str(b)) => a.cmp(b),
            (ScalarKey::Num(a), ScalarKey::Num(b)) => a.total_cmp(b),
            (ScalarKey::Str(_), ScalarKey::Num(_)) => Ordering::Less,
            (ScalarKey::Num(_), ScalarKey::Str(_)) => Ordering::Greater,
        }
    }
}

/// A dotted field path compiled to a JSON Pointer.
///
/// `address.city` compiles to `/address/city`; segment characters reserved by
/// RFC 6901 are escaped during compilation.
#[derive(Debug, Clone)]
pub struct FieldPath {
    name: String,
    pointer: String,
}

impl FieldPath {
    pub fn compile(field: &str) -> Result<FieldPath> {
        if field.is_empty() {
            return Err(JayError::InvalidFieldPath(field.to_string()));
        }
        let mut pointer = String::with_capacity(field.len() + 4);
        for segment in field.split('.') {
            if segment.is_empty() {
                return Err(JayError::InvalidFieldPath(field.to_string()));
            }
            pointer.push('/');
            pointer.push_str(&segment.replace('~', "~0").replace('/', "~1"));
        }
        Ok(FieldPath {
            name: field.to_string(),
            pointer,
        })
    }

    /// The dotted path as given to [`compile`](FieldPath::compile).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolve<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        doc.pointer(&self.pointer)
    }
}

/// Ordered multi-map from scalar key to document slot, over one field path.
///
/// Slot values are offsets into the owning collection's document array and
/// must track every array mutation; the collection drives that maintenance.
#[derive(Debug)]
pub struct SecondaryIndex {
    path: FieldPath,
    entries: BTreeMap<ScalarKey, Vec<u32>>,
}

impl SecondaryIndex {
    /// Compile `field` and build the index over the current documents.
    pub fn build(field: &str, docs: &[Value]) -> Result<SecondaryIndex> {
        let mut index = SecondaryIndex {
            path: FieldPath::compile(field)?,
            entries: BTreeMap::new(),
        };
        for (slot, doc) in docs.iter().enumerate() {
            index.insert_doc(doc, slot as u32);
        }
        Ok(index)
    }

    pub fn field_name(&self) -> &str {
        self.path.name()
    }

    /// Index `doc` at `slot` if its field resolves to a string or number.
    pub fn insert_doc(&mut self, doc: &Value, slot: u32) {
        if let Some(key) = self.path.resolve(doc).and_then(ScalarKey::from_value) {
            self.entries.entry(key).or_default().push(slot);
        }
    }

    /// First slot recorded for `key`, if any.
    pub fn first_slot(&self, key: &ScalarKey) -> Option<u32> {
        self.entries.get(key).and_then(|slots| slots.first().copied())
    }

    /// Every slot recorded for `key`, in index insertion order.
    pub fn slots(&self, key: &ScalarKey) -> &[u32] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop entries for `slot` and shift entries above it down by one.
    ///
    /// Used when a single document is removed from the middle of the array.
    pub fn remove_slot(&mut self, slot: u32) {
        self.entries.retain(|_, slots| {
            slots.retain(|&s| s != slot);
            for s in slots.iter_mut() {
                if *s > slot {
                    *s -= 1;
                }
            }
            !slots.is_empty()
        });
    }

    /// Drop entries for `slot` without shifting others.
    ///
    /// Used before re-indexing a document that was mutated in place.
    pub fn remove_slot_entries(&mut self, slot: u32) {
        self.entries.retain(|_, slots| {
            slots.retain(|&s| s != slot);
            !slots.is_empty()
        });
    }

    /// Discard all entries and re-scan `docs` from scratch.
    pub fn rebuild(&mut self, docs: &[Value]) {
        self.entries.clear();
        for (slot, doc) in docs.iter().enumerate() {
            self.insert_doc(doc, slot as u32);
        }
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&ScalarKey, u32)> {
        self.entries
            .iter()
            .flat_map(|(key, slots)| slots.iter().map(move |&slot| (key, slot)))
    }

    /// Total number of (key, slot) entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
