use ahash::AHashMap;

use crate::utils::hash::fnv1a_32;

/// Single-result query cache.
///
/// Maps the FNV-1a hash of a query string to a previously serialized
/// `find_one` result. The cache holds only non-empty single-document results
/// and is cleared wholesale by any mutation that could stale it; correctness
/// comes from blunt invalidation, not bookkeeping.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: AHashMap<u32, String>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<&str> {
        self.entries.get(&fnv1a_32(query)).map(String::as_str)
    }

    pub fn insert(&mut self, query: &str, result: String) {
        self.entries.insert(fnv1a_32(query), result);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
