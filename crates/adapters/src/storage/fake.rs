// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory object store for tests

use super::{ObjectStore, StorageError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Default)]
struct FakeStorageState {
    objects: BTreeMap<String, Vec<u8>>,
    downloads: Vec<String>,
    uploads: Vec<(PathBuf, String)>,
    failing_keys: HashSet<String>,
    interrupted_keys: HashSet<String>,
}

/// Fake bucket that keeps objects in memory and records transfers
#[derive(Clone)]
pub struct FakeObjectStore {
    bucket: String,
    inner: Arc<Mutex<FakeStorageState>>,
}

impl Default for FakeObjectStore {
    fn default() -> Self {
        Self::new("project-bucket")
    }
}

impl FakeObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self { bucket: bucket.into(), inner: Arc::new(Mutex::new(FakeStorageState::default())) }
    }

    pub fn put(&self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.inner.lock().objects.insert(key.into(), bytes.into());
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.lock().objects.get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().objects.keys().cloned().collect()
    }

    /// Transfers of `key` in either direction fail from now on
    pub fn fail_key(&self, key: impl Into<String>) {
        self.inner.lock().failing_keys.insert(key.into());
    }

    /// The next download of `key` writes half the object, then fails
    pub fn interrupt_once(&self, key: impl Into<String>) {
        self.inner.lock().interrupted_keys.insert(key.into());
    }

    /// Keys downloaded, in order
    pub fn downloads(&self) -> Vec<String> {
        self.inner.lock().downloads.clone()
    }

    /// `(source, key)` pairs uploaded, in order
    pub fn uploads(&self) -> Vec<(PathBuf, String)> {
        self.inner.lock().uploads.clone()
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self.inner.lock().objects.keys().filter(|k| k.starts_with(prefix)).cloned().collect())
    }

    async fn download(&self, key: &str, dest: &Path) -> Result<(), StorageError> {
        let bytes = {
            let mut state = self.inner.lock();
            let missing = |message: &str| StorageError::Download {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                message: message.to_string(),
            };
            if state.failing_keys.contains(key) {
                return Err(missing("injected failure"));
            }
            let mut bytes = state.objects.get(key).cloned().ok_or_else(|| missing("NoSuchKey"))?;
            let interrupted = state.interrupted_keys.remove(key);
            if interrupted {
                bytes.truncate(bytes.len() / 2);
            } else {
                state.downloads.push(key.to_string());
            }
            (bytes, interrupted)
        };
        let (bytes, interrupted) = bytes;
        tokio::fs::write(dest, bytes)
            .await
            .map_err(|source| StorageError::Io { path: dest.to_path_buf(), source })?;
        if interrupted {
            return Err(StorageError::Download {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                message: "connection reset mid-body".to_string(),
            });
        }
        Ok(())
    }

    async fn upload(&self, src: &Path, key: &str) -> Result<(), StorageError> {
        if self.inner.lock().failing_keys.contains(key) {
            return Err(StorageError::Upload {
                path: src.to_path_buf(),
                bucket: self.bucket.clone(),
                key: key.to_string(),
                message: "injected failure".to_string(),
            });
        }
        let bytes = tokio::fs::read(src)
            .await
            .map_err(|source| StorageError::Io { path: src.to_path_buf(), source })?;
        let mut state = self.inner.lock();
        state.objects.insert(key.to_string(), bytes);
        state.uploads.push((src.to_path_buf(), key.to_string()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
