use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JayError {
    #[error("Document is not a JSON object")]
    NotAnObject,

    #[error("Invalid document id: {0:?}")]
    InvalidId(String),

    #[error("Invalid query: {0}")]
    Query(String),

    #[error("Invalid field path: {0:?}")]
    InvalidFieldPath(String),

    #[error("Merge type mismatch at {0:?}")]
    MergeConflict(String),

    #[error("Collection {0:?} not found")]
    CollectionNotFound(String),

    #[error("Database file root is not a JSON object")]
    CorruptDatabase,

    #[error("Invalid command: {0}")]
    Command(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, JayError>;
