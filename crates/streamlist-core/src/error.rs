use std::path::PathBuf;
use streamlist_models::MovieId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for '{key}' is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures inside a store operation. These never reach the caller of a
/// mutation; they are turned into a failure outcome and an error message.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stream list holds more than one entry for movie {id} ({title})")]
    DuplicateEntry { id: MovieId, title: String },
}
