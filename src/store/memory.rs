//
//  github-explorer
//  store/memory.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{validate_name, DocumentStore, StoreError};

type Key = (String, String);

/// Process-local document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<Key, (Value, DateTime<Utc>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents, chunks included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Document names in a collection, sorted.
    pub fn names(&self, collection: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .lock()
            .keys()
            .filter(|(c, _)| c == collection)
            .map(|(_, n)| n.clone())
            .collect();
        names.sort();
        names
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Key, (Value, DateTime<Utc>)>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .lock()
            .get(&(collection.to_string(), name.to_string()))
            .map(|(value, _)| value.clone()))
    }

    async fn write(&self, collection: &str, name: &str, value: &Value) -> Result<(), StoreError> {
        validate_name(collection)?;
        validate_name(name)?;
        self.lock().insert(
            (collection.to_string(), name.to_string()),
            (value.clone(), Utc::now()),
        );
        Ok(())
    }

    async fn updated(&self, collection: &str, name: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self
            .lock()
            .get(&(collection.to_string(), name.to_string()))
            .map(|(_, at)| *at))
    }
}
