//! # JayDB - Embedded In-Memory JSON Document Database
//!
// Copyright 2026 JayDB Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! JayDB stores JSON documents in named collections, stamps every document
//! with a time-ordered 16-character `_id`, and answers filter queries written
//! in a small Mongo-flavored JSON query language. Equality lookups on scalar
//! fields can be accelerated with secondary indexes, repeated point queries
//! are served from a result cache, and the whole database persists to a
//! single JSON file.
//!
//! ## Features
//!
//! - **Ordered collections**: documents keep insertion order; IDs are
//!   append-monotonic, so ID lookup is a binary search
//! - **Secondary indexes**: ordered multi-maps over any dotted field path,
//!   maintained across appends, updates and deletes
//! - **Query language**: implicit equality, `$eq`/`$ne`/`$gt`/`$gte`/`$lt`/
//!   `$lte`/`$in`/`$nin`/`$exists`, combined with `$and`/`$or`/`$not`
//! - **Query cache**: repeated `find_one` calls with the same query text are
//!   answered without re-planning; any mutation invalidates the cache
//! - **Cursors**: bounded, lazy iteration over matching documents
//! - **Deep-merge updates**: patches merge recursively, appending to arrays
//!   and overwriting scalars
//! - **Retention deletes**: `drop_older_than` erases an age-based prefix in
//!   one drain
//! - **Single-file persistence**: `save`/`load` of standard JSON text
//! - **Command façade**: a string-in/string-out `execute` API for embedding
//!   behind any transport
//!
//! ## Quick Start
//!
//! ```rust
//! use jaydb::JayDb;
//! use serde_json::json;
//!
//! # fn main() -> jaydb::Result<()> {
//! let mut db = JayDb::new();
//!
//! let users = db.collection("users");
//! users.append(json!({"name": "Ada", "age": 36}))?;
//! users.append(json!({"name": "Grace", "age": 45}))?;
//!
//! // First match in insertion order
//! let hit = users.find_one(r#"{"age": {"$gt": 40}}"#)?;
//! assert!(hit.unwrap().contains("Grace"));
//!
//! // Index accelerates equality lookups on a scalar field
//! users.create_index("age")?;
//! let cursor = users.find(r#"{"age": 36}"#, 10)?;
//! assert_eq!(cursor.count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Persistence
//!
//! ```no_run
//! use jaydb::JayDb;
//! use serde_json::json;
//!
//! # fn main() -> jaydb::Result<()> {
//! let mut db = JayDb::new();
//! db.collection("events").append(json!({"event": "boot"}))?;
//! db.save("/var/lib/app/data.json")?;
//!
//! let restored = JayDb::open("/var/lib/app/data.json")?;
//! assert_eq!(restored.get_collection("events").unwrap().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Command Façade
//!
//! ```rust
//! use jaydb::JayDb;
//!
//! let mut db = JayDb::new();
//! db.execute(r#"{"cmd": "createCollection", "collection": "logs"}"#);
//! db.execute(r#"{"cmd": "append", "collection": "logs",
//!               "document": {"level": "info", "text": "started"}}"#);
//! let reply = db.execute(r#"{"cmd": "findOne", "collection": "logs",
//!                            "query": {"level": "info"}}"#);
//! assert!(reply.contains("started"));
//! ```
//!
//! ## Threading
//!
//! The engine is deliberately single-threaded: no internal locks, no atomics
//! on the data path. Write operations take `&mut self` and cursors borrow the
//! collection, so the borrow checker enforces the single-writer contract at
//! compile time. Wrap the database in your own synchronization to share it.

pub mod constants;
pub mod core;
pub mod error;
pub mod query;
pub mod stats;
pub mod utils;

pub use crate::core::collection::Collection;
pub use crate::core::cursor::{DocumentCursor, IndexCursor, LinearCursor};
pub use crate::core::database::JayDb;
pub use crate::error::{JayError, Result};
pub use crate::stats::{Statistics, StatsSnapshot};

#[cfg(test)]
mod tests;
