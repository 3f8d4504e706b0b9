//
//  github-explorer
//  store/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Document Store
//!
//! Report results are persisted as JSON documents addressed by a collection
//! (one per organisation) and a document name (one per report).
//!
//! ## Layers
//!
//! - [`DocumentStore`]: the raw read/write capability. Backends are
//!   [`MemoryStore`] and [`FileStore`].
//! - [`ChunkedStore`]: splits large collections into numbered chunk
//!   documents on write and reassembles them on read, with a per-instance
//!   cache.
//! - [`ReportStore`]: typed reads of persisted reports for one organisation.
//!
//! ## Example
//!
//! ```rust
//! use github_explorer::store::{ChunkedStore, MemoryStore};
//! use serde_json::json;
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let store = ChunkedStore::new(MemoryStore::new());
//! let records: Vec<_> = (0..750).map(|i| json!({ "id": i })).collect();
//!
//! let outcome = store.write("github-explorer-acme", "all_repositories", &json!(records)).await.unwrap();
//! assert_eq!(outcome.chunks, 2);
//!
//! let read = store.read("github-explorer-acme", "all_repositories").await.unwrap().unwrap();
//! assert_eq!(read.as_array().unwrap().len(), 750);
//! # });
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

mod chunked;
mod file;
mod memory;
mod reports;

pub use chunked::*;
pub use file::*;
pub use memory::*;
pub use reports::*;

/// Errors raised by document stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Collection or document names must be plain, non-empty path segments.
    #[error("Invalid document name '{0}'")]
    InvalidName(String),

    /// The value has the shape reserved for chunk metadata.
    #[error("Refusing to write '{collection}/{name}': a single 'chunkCount' key is reserved for chunk metadata")]
    ReservedShape { collection: String, name: String },

    /// Chunk metadata names a chunk that does not exist.
    #[error("Chunk '{collection}/{name}' is missing")]
    MissingChunk { collection: String, name: String },

    /// A chunk document is not a JSON array.
    #[error("Chunk '{collection}/{name}' is not an array")]
    MalformedChunk { collection: String, name: String },

    /// A document could not be decoded into the expected type.
    #[error("Document '{collection}/{name}' has an unexpected shape: {source}")]
    Decode {
        collection: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded as JSON.
    #[error("Failed to encode document '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read/write access to JSON documents.
///
/// Implementations only store and return values; chunking and caching live
/// in [`ChunkedStore`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document, `None` if it does not exist.
    async fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StoreError>;

    /// Creates or replaces a document.
    async fn write(&self, collection: &str, name: &str, value: &Value) -> Result<(), StoreError>;

    /// When the document was last written, if known.
    async fn updated(&self, collection: &str, name: &str) -> Result<Option<DateTime<Utc>>, StoreError>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StoreError> {
        (**self).read(collection, name).await
    }

    async fn write(&self, collection: &str, name: &str, value: &Value) -> Result<(), StoreError> {
        (**self).write(collection, name, value).await
    }

    async fn updated(&self, collection: &str, name: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        (**self).updated(collection, name).await
    }
}

/// Checks that a collection or document name is a single safe path segment.
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}
