//
//  github-explorer
//  store/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! JSON file document store.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//! └── github-explorer-acme/
//!     ├── all_members.json
//!     ├── all_repositories.json          {"chunkCount": 2}
//!     ├── all_repositories_chunk_0.json
//!     └── all_repositories_chunk_1.json
//! ```
//!
//! Documents are written to a temporary sibling and renamed into place, so a
//! reader never sees a half-written file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde_json::Value;

use super::{validate_name, DocumentStore, StoreError};

/// Stores each document as `<root>/<collection>/<name>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a document, after validating both names.
    pub fn document_path(&self, collection: &str, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(collection)?;
        validate_name(name)?;
        Ok(self.root.join(collection).join(format!("{name}.json")))
    }
}

/// Platform data directory for persisted reports.
///
/// - Linux: `~/.local/share/github-explorer/`
/// - macOS: `~/Library/Application Support/github-explorer/`
/// - Windows: `%APPDATA%\github-explorer\data\`
pub fn default_root() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", crate::APP_NAME)
        .ok_or_else(|| anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StoreError> {
        let path = self.document_path(collection, name)?;

        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };

        serde_json::from_slice(&content)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    async fn write(&self, collection: &str, name: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.document_path(collection, name)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let content = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
            name: name.to_string(),
            source,
        })?;

        let temp = path.with_extension("json.tmp");
        tokio::fs::write(&temp, content)
            .await
            .map_err(|e| io_error(&temp, e))?;
        tokio::fs::rename(&temp, &path)
            .await
            .map_err(|e| io_error(&path, e))?;

        tracing::debug!(path = %path.display(), "Wrote document");
        Ok(())
    }

    async fn updated(&self, collection: &str, name: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        let path = self.document_path(collection, name)?;

        match tokio::fs::metadata(&path).await {
            Ok(metadata) => {
                let modified = metadata.modified().map_err(|e| io_error(&path, e))?;
                Ok(Some(DateTime::<Utc>::from(modified)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
