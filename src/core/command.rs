//! String-in/string-out command façade.
//!
//! [`JayDb::execute`] accepts a JSON envelope naming a command and its
//! arguments and answers with a JSON reply, so the database can sit behind
//! any transport that shuttles strings. Success replies carry a `msg` member
//! (plus command-specific members); failures carry an `error` member. Raw
//! document payloads are returned as-is.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::DEFAULT_FIND_LIMIT;
use crate::core::collection::Collection;
use crate::core::database::JayDb;
use crate::core::document_id;
use crate::error::{JayError, Result};

/// Command envelope accepted by [`JayDb::execute`].
#[derive(Debug, Deserialize)]
struct Command {
    cmd: String,
    collection: Option<String>,
    document: Option<Value>,
    query: Option<Value>,
    patch: Option<Value>,
    id: Option<String>,
    field: Option<String>,
    limit: Option<u32>,
    timestamp: Option<u64>,
    path: Option<String>,
}

impl JayDb {
    /// Execute one command and return the reply text.
    ///
    /// This never panics and never returns malformed JSON; every failure
    /// becomes an `{"error": …}` reply.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jaydb::JayDb;
    ///
    /// let mut db = JayDb::new();
    /// db.execute(r#"{"cmd": "createCollection", "collection": "users"}"#);
    /// let reply = db.execute(
    ///     r#"{"cmd": "append", "collection": "users",
    ///         "document": {"name": "Ada"}}"#,
    /// );
    /// assert!(reply.contains("\"msg\""));
    /// ```
    pub fn execute(&mut self, command_text: &str) -> String {
        let command: Command = match serde_json::from_str(command_text) {
            Ok(command) => command,
            Err(err) => return reply_err(format!("bad command: {}", err)),
        };
        match self.dispatch(command) {
            Ok(reply) => reply,
            Err(err) => reply_err(err.to_string()),
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<String> {
        match command.cmd.as_str() {
            "createCollection" => {
                let name = require(command.collection, "collection")?;
                self.collection(&name);
                Ok(reply_ok())
            }
            "dropCollection" => {
                let name = require(command.collection, "collection")?;
                if self.drop_collection(&name) {
                    Ok(reply_ok())
                } else {
                    Err(JayError::CollectionNotFound(name))
                }
            }
            "collections" => Ok(json!({ "collections": self.collection_names() }).to_string()),
            "append" => {
                let document = require(command.document, "document")?;
                let id = self.target(command.collection)?.append(document)?;
                Ok(json!({ "msg": "ok", "id": id }).to_string())
            }
            "updateById" => {
                let id = require(command.id, "id")?;
                let patch = require(command.patch, "patch")?.to_string();
                let updated = self.target(command.collection)?.update_by_id(&id, &patch)?;
                Ok(json!({ "msg": "ok", "updated": updated }).to_string())
            }
            "update" => {
                let query = require(command.query, "query")?.to_string();
                let patch = require(command.patch, "patch")?.to_string();
                let matched = self.target(command.collection)?.update(&query, &patch)?;
                Ok(json!({ "msg": "ok", "matched": matched }).to_string())
            }
            "findById" => {
                let id = require(command.id, "id")?;
                match self.target(command.collection)?.find_one_by_id(&id) {
                    Some(doc) => Ok(doc),
                    None => Ok(reply_err("not found")),
                }
            }
            "findOne" => {
                let query = require(command.query, "query")?.to_string();
                match self.target(command.collection)?.find_one(&query)? {
                    Some(doc) => Ok(doc),
                    None => Ok(reply_err("not found")),
                }
            }
            "find" => {
                let query = require(command.query, "query")?.to_string();
                let limit = command.limit.unwrap_or(DEFAULT_FIND_LIMIT);
                let collection = self.read_target(command.collection.as_deref())?;
                let docs: Vec<String> = collection.find(&query, limit)?.collect();
                Ok(format!("[{}]", docs.join(",")))
            }
            "dropById" => {
                let id = require(command.id, "id")?;
                let dropped = self.target(command.collection)?.drop_by_id(&id);
                Ok(json!({ "msg": "ok", "dropped": u32::from(dropped) }).to_string())
            }
            "dropOne" => {
                let query = require(command.query, "query")?.to_string();
                let dropped = self.target(command.collection)?.drop_one(&query)?;
                Ok(json!({ "msg": "ok", "dropped": dropped }).to_string())
            }
            "drop" => {
                let query = require(command.query, "query")?.to_string();
                let limit = command.limit.unwrap_or(DEFAULT_FIND_LIMIT);
                let dropped = self.target(command.collection)?.drop(&query, limit)?;
                Ok(json!({ "msg": "ok", "dropped": dropped }).to_string())
            }
            "dropOlderThan" => {
                let timestamp = require(command.timestamp, "timestamp")?;
                let dropped = self.target(command.collection)?.drop_older_than(timestamp);
                Ok(json!({ "msg": "ok", "dropped": dropped }).to_string())
            }
            "createIndex" => {
                let field = require(command.field, "field")?;
                self.target(command.collection)?.create_index(&field)?;
                Ok(reply_ok())
            }
            "dropIndex" => {
                let field = require(command.field, "field")?;
                self.target(command.collection)?.drop_index(&field);
                Ok(reply_ok())
            }
            "size" => {
                let collection = self.read_target(command.collection.as_deref())?;
                Ok(json!({ "size": collection.len() }).to_string())
            }
            "timestampById" => {
                let id = require(command.id, "id")?;
                match document_id::timestamp_of(&id) {
                    Some(timestamp) => {
                        Ok(json!({ "msg": "ok", "timestamp": timestamp }).to_string())
                    }
                    None => Err(JayError::InvalidId(id)),
                }
            }
            "save" => {
                let path = require(command.path, "path")?;
                self.save(&path)?;
                Ok(reply_ok())
            }
            "load" => {
                let path = require(command.path, "path")?;
                self.load(&path)?;
                Ok(reply_ok())
            }
            "stats" => Ok(serde_json::to_string(&self.stats())?),
            other => Err(JayError::Command(format!("unknown command {:?}", other))),
        }
    }

    // Resolve the collection argument for a command that mutates it.
    fn target(&mut self, name: Option<String>) -> Result<&mut Collection> {
        let name = require(name, "collection")?;
        self.get_collection_mut(&name)
            .ok_or(JayError::CollectionNotFound(name))
    }

    fn read_target(&self, name: Option<&str>) -> Result<&Collection> {
        let name = require(name, "collection")?;
        self.get_collection(name)
            .ok_or_else(|| JayError::CollectionNotFound(name.to_string()))
    }
}

fn require<T>(field: Option<T>, name: &str) -> Result<T> {
    field.ok_or_else(|| JayError::Command(format!("missing field {:?}", name)))
}

fn reply_ok() -> String {
    json!({ "msg": "ok" }).to_string()
}

fn reply_err(message: impl AsRef<str>) -> String {
    json!({ "error": message.as_ref() }).to_string()
}
