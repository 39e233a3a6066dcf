use serde_json::Value;

use crate::query::ast::Filter;
use crate::query::executor;

/// Forward-only scan over a collection's array, applying a parsed filter.
///
/// The cursor owns its filter and keeps a one-element look-ahead so that
/// `has_next` is free. It yields each match serialized to text, at most
/// `limit` of them, in insertion order.
pub struct LinearCursor<'a> {
    docs: &'a [Value],
    filter: Filter,
    pos: usize,
    yielded: u32,
    limit: u32,
    lookahead: Option<String>,
}

impl<'a> LinearCursor<'a> {
    pub(crate) fn new(docs: &'a [Value], filter: Filter, limit: u32) -> Self {
        let mut cursor = LinearCursor {
            docs,
            filter,
            pos: 0,
            yielded: 0,
            limit,
            lookahead: None,
        };
        cursor.lookahead = cursor.advance();
        cursor
    }

    fn advance(&mut self) -> Option<String> {
        if self.yielded >= self.limit {
            return None;
        }
        while self.pos < self.docs.len() {
            let doc = &self.docs[self.pos];
            self.pos += 1;
            if executor::matches(&self.filter, doc) {
                self.yielded += 1;
                return serde_json::to_string(doc).ok();
            }
        }
        None
    }

    pub fn has_next(&self) -> bool {
        self.lookahead.is_some()
    }

    /// Total matches in the underlying array. Independent of iteration state
    /// and not bounded by the limit.
    pub fn count(&self) -> u32 {
        self.docs
            .iter()
            .filter(|doc| executor::matches(&self.filter, doc))
            .count() as u32
    }
}

impl Iterator for LinearCursor<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let current = self.lookahead.take()?;
        self.lookahead = self.advance();
        Some(current)
    }
}

/// Scan over the documents recorded under one index key.
///
/// The equal-range slot list is computed when the cursor is built; documents
/// are serialized lazily as the cursor advances.
pub struct IndexCursor<'a> {
    docs: &'a [Value],
    slots: Vec<u32>,
    pos: usize,
    limit: u32,
}

impl<'a> IndexCursor<'a> {
    pub(crate) fn new(docs: &'a [Value], slots: Vec<u32>, limit: u32) -> Self {
        IndexCursor {
            docs,
            slots,
            pos: 0,
            limit,
        }
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.slots.len() && (self.pos as u32) < self.limit
    }

    /// Length of the key range, not bounded by the limit.
    pub fn count(&self) -> u32 {
        self.slots.len() as u32
    }
}

impl Iterator for IndexCursor<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if !self.has_next() {
            return None;
        }
        let slot = self.slots[self.pos] as usize;
        self.pos += 1;
        self.docs
            .get(slot)
            .and_then(|doc| serde_json::to_string(doc).ok())
    }
}

/// Cursor returned by `find`: either an index equal-range walk or a filtered
/// linear scan. Single-use; iterating past exhaustion keeps yielding `None`.
pub enum DocumentCursor<'a> {
    Linear(LinearCursor<'a>),
    Index(IndexCursor<'a>),
}

impl DocumentCursor<'_> {
    pub fn has_next(&self) -> bool {
        match self {
            DocumentCursor::Linear(cursor) => cursor.has_next(),
            DocumentCursor::Index(cursor) => cursor.has_next(),
        }
    }

    /// Total matches available to this cursor, ignoring the limit and the
    /// current iteration position.
    pub fn count(&self) -> u32 {
        match self {
            DocumentCursor::Linear(cursor) => cursor.count(),
            DocumentCursor::Index(cursor) => cursor.count(),
        }
    }
}

impl Iterator for DocumentCursor<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self {
            DocumentCursor::Linear(cursor) => cursor.next(),
            DocumentCursor::Index(cursor) => cursor.next(),
        }
    }
}
