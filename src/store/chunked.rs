//
//  github-explorer
//  store/chunked.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Transparent chunking of large collections.
//!
//! A collection longer than the chunk size is written as contiguous slices
//! `<name>_chunk_0 .. <name>_chunk_{N-1}` followed by a marker document
//! `<name> = {"chunkCount": N}`. Reading the marker reassembles the slices in
//! index order. Everything else is stored under `<name>` as-is.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::{DocumentStore, StoreError};

/// Collections longer than this are chunked.
pub const CHUNK_SIZE: usize = 500;

/// Sole key of a chunk marker document.
pub const CHUNK_COUNT_KEY: &str = "chunkCount";

/// Document name of chunk `index`.
pub fn chunk_name(name: &str, index: usize) -> String {
    format!("{name}_chunk_{index}")
}

/// The marker written in place of a chunked collection.
pub fn chunk_marker(count: usize) -> Value {
    let mut marker = Map::new();
    marker.insert(CHUNK_COUNT_KEY.to_string(), Value::from(count));
    Value::Object(marker)
}

/// Chunk count if `value` is exactly a marker: an object whose only key is
/// `chunkCount` holding a non-negative integer.
pub fn is_chunk_marker(value: &Value) -> Option<usize> {
    let object = value.as_object()?;
    if object.len() != 1 {
        return None;
    }
    object
        .get(CHUNK_COUNT_KEY)?
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
}

/// What a write stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Top-level records in the value (array elements or map entries, 1 for
    /// scalars).
    pub records: usize,
    /// Chunk documents written, 0 when stored whole.
    pub chunks: usize,
}

/// Chunking adapter over a [`DocumentStore`] with a read cache.
///
/// The cache lives as long as the adapter. Give each run its own instance.
#[derive(Debug)]
pub struct ChunkedStore<S> {
    inner: S,
    chunk_size: usize,
    cache: Mutex<HashMap<(String, String), Value>>,
}

impl<S: DocumentStore> ChunkedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            chunk_size: CHUNK_SIZE,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Overrides the chunk threshold (minimum 1).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Writes `value` under `name`, chunking arrays longer than the chunk
    /// size.
    pub async fn write(
        &self,
        collection: &str,
        name: &str,
        value: &Value,
    ) -> Result<WriteOutcome, StoreError> {
        if is_chunk_marker(value).is_some() {
            return Err(StoreError::ReservedShape {
                collection: collection.to_string(),
                name: name.to_string(),
            });
        }

        let records = match value {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 1,
        };

        let chunks = match value {
            Value::Array(items) if items.len() > self.chunk_size => {
                let slices: Vec<&[Value]> = items.chunks(self.chunk_size).collect();
                for (index, slice) in slices.iter().enumerate() {
                    let chunk = Value::Array(slice.to_vec());
                    self.inner
                        .write(collection, &chunk_name(name, index), &chunk)
                        .await?;
                }
                // Marker last: a failure above leaves the previous document in place.
                self.inner
                    .write(collection, name, &chunk_marker(slices.len()))
                    .await?;
                slices.len()
            }
            _ => {
                self.inner.write(collection, name, value).await?;
                0
            }
        };

        tracing::debug!(collection, name, records, chunks, "Stored document");

        self.cache()
            .insert((collection.to_string(), name.to_string()), value.clone());

        Ok(WriteOutcome { records, chunks })
    }

    /// Reads `name`, reassembling chunks. `None` if it does not exist.
    pub async fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StoreError> {
        let key = (collection.to_string(), name.to_string());
        if let Some(value) = self.cache().get(&key) {
            return Ok(Some(value.clone()));
        }

        let Some(document) = self.inner.read(collection, name).await? else {
            return Ok(None);
        };

        let value = match is_chunk_marker(&document) {
            Some(count) => self.reassemble(collection, name, count).await?,
            None => document,
        };

        self.cache().insert(key, value.clone());
        Ok(Some(value))
    }

    /// When `name` (or its chunk marker) was last written.
    pub async fn updated(
        &self,
        collection: &str,
        name: &str,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.inner.updated(collection, name).await
    }

    /// Drops a cached document so the next read goes to the store.
    pub fn invalidate(&self, collection: &str, name: &str) {
        self.cache()
            .remove(&(collection.to_string(), name.to_string()));
    }

    async fn reassemble(
        &self,
        collection: &str,
        name: &str,
        count: usize,
    ) -> Result<Value, StoreError> {
        let mut items = Vec::new();

        for index in 0..count {
            let chunk = chunk_name(name, index);
            match self.inner.read(collection, &chunk).await? {
                Some(Value::Array(slice)) => items.extend(slice),
                Some(_) => {
                    return Err(StoreError::MalformedChunk {
                        collection: collection.to_string(),
                        name: chunk,
                    })
                }
                None => {
                    return Err(StoreError::MissingChunk {
                        collection: collection.to_string(),
                        name: chunk,
                    })
                }
            }
        }

        tracing::debug!(collection, name, chunks = count, records = items.len(), "Reassembled chunks");
        Ok(Value::Array(items))
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<(String, String), Value>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use serde_json::json;
    use crate::store::MemoryStore;

    const ORG: &str = "github-explorer-acme";

    fn records(len: usize) -> Value {
        Value::Array((0..len).map(|i| json!({ "name": format!("repo-{i}") })).collect())
    }

    #[tokio::test]
    async fn test_round_trip_lengths() {
        for len in [0, 1, 500, 501, 1000, 1001] {
            let backend = Arc::new(MemoryStore::new());
            let writer = ChunkedStore::new(backend.clone());
            let original = records(len);

            let outcome = writer.write(ORG, "all_repositories", &original).await.unwrap();
            assert_eq!(outcome.records, len);
            assert_eq!(outcome.chunks, if len > 500 { len.div_ceil(500) } else { 0 });

            // A fresh adapter has an empty cache and reads from the backend.
            let reader = ChunkedStore::new(backend.clone());
            let read = reader.read(ORG, "all_repositories").await.unwrap();
            assert_eq!(read, Some(original), "length {len}");
        }
    }

    #[tokio::test]
    async fn test_750_records_chunk_layout() {
        let backend = Arc::new(MemoryStore::new());
        let store = ChunkedStore::new(backend.clone());
        let original = records(750);

        store.write("org", "all_repositories", &original).await.unwrap();

        assert_eq!(
            backend.read("org", "all_repositories").await.unwrap(),
            Some(json!({ "chunkCount": 2 }))
        );
        let chunk_0 = backend.read("org", "all_repositories_chunk_0").await.unwrap().unwrap();
        let chunk_1 = backend.read("org", "all_repositories_chunk_1").await.unwrap().unwrap();
        assert_eq!(chunk_0.as_array().unwrap().len(), 500);
        assert_eq!(chunk_1.as_array().unwrap().len(), 250);
        assert_eq!(chunk_0[0]["name"], "repo-0");
        assert_eq!(chunk_1[0]["name"], "repo-500");
        assert_eq!(backend.names("org").len(), 3);

        let reader = ChunkedStore::new(backend);
        let read = reader.read("org", "all_repositories").await.unwrap().unwrap();
        assert_eq!(read, original);
    }

    #[test]
    fn test_marker_detection() {
        assert_eq!(is_chunk_marker(&json!({ "chunkCount": 3 })), Some(3));
        assert_eq!(is_chunk_marker(&json!({ "chunkCount": 3, "other": 1 })), None);
        assert_eq!(is_chunk_marker(&json!({ "chunkCount": "3" })), None);
        assert_eq!(is_chunk_marker(&json!({ "chunkCount": -1 })), None);
        assert_eq!(is_chunk_marker(&json!({ "count": 3 })), None);
        assert_eq!(is_chunk_marker(&json!([{ "chunkCount": 3 }])), None);
    }

    #[tokio::test]
    async fn test_single_key_document_is_data() {
        let backend = Arc::new(MemoryStore::new());
        let store = ChunkedStore::new(backend.clone());
        let value = json!({ "octocat": [{ "slug": "web", "name": "Web" }] });

        store.write(ORG, "all_members_teams", &value).await.unwrap();

        let reader = ChunkedStore::new(backend);
        assert_eq!(reader.read(ORG, "all_members_teams").await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn test_marker_shaped_value_rejected() {
        let store = ChunkedStore::new(MemoryStore::new());
        let err = store
            .write(ORG, "doc", &json!({ "chunkCount": 2 }))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ReservedShape { .. }));
        assert!(store.inner().is_empty());
    }

    #[tokio::test]
    async fn test_missing_chunk() {
        let backend = Arc::new(MemoryStore::new());
        backend.write(ORG, "doc", &chunk_marker(2)).await.unwrap();
        backend.write(ORG, "doc_chunk_0", &json!([1])).await.unwrap();

        let err = ChunkedStore::new(backend).read(ORG, "doc").await.unwrap_err();
        match err {
            StoreError::MissingChunk { name, .. } => assert_eq!(name, "doc_chunk_1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_chunk() {
        let backend = Arc::new(MemoryStore::new());
        backend.write(ORG, "doc", &chunk_marker(1)).await.unwrap();
        backend.write(ORG, "doc_chunk_0", &json!({ "a": 1 })).await.unwrap();

        let err = ChunkedStore::new(backend).read(ORG, "doc").await.unwrap_err();
        assert!(matches!(err, StoreError::MalformedChunk { .. }));
    }

    #[tokio::test]
    async fn test_cache_and_invalidate() {
        let backend = Arc::new(MemoryStore::new());
        let store = ChunkedStore::new(backend.clone());
        backend.write(ORG, "doc", &json!([1])).await.unwrap();

        assert_eq!(store.read(ORG, "doc").await.unwrap(), Some(json!([1])));

        // Changed behind the adapter's back: the cached value is served.
        backend.write(ORG, "doc", &json!([2])).await.unwrap();
        assert_eq!(store.read(ORG, "doc").await.unwrap(), Some(json!([1])));

        store.invalidate(ORG, "doc");
        assert_eq!(store.read(ORG, "doc").await.unwrap(), Some(json!([2])));
    }

    #[tokio::test]
    async fn test_write_refreshes_cache() {
        let store = ChunkedStore::new(MemoryStore::new()).with_chunk_size(2);
        store.write(ORG, "doc", &json!([1])).await.unwrap();
        assert_eq!(store.read(ORG, "doc").await.unwrap(), Some(json!([1])));

        let outcome = store.write(ORG, "doc", &json!([1, 2, 3])).await.unwrap();
        assert_eq!(outcome.chunks, 2);
        assert_eq!(store.read(ORG, "doc").await.unwrap(), Some(json!([1, 2, 3])));
    }

    #[tokio::test]
    async fn test_missing_document_not_cached() {
        let backend = Arc::new(MemoryStore::new());
        let store = ChunkedStore::new(backend.clone());

        assert!(store.read(ORG, "later").await.unwrap().is_none());
        backend.write(ORG, "later", &json!([])).await.unwrap();
        assert_eq!(store.read(ORG, "later").await.unwrap(), Some(json!([])));
    }
}
