// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local mirror of the project bucket.
//!
//! A tracked path maps to the bucket key with its leading `/` stripped and to
//! the local file under `local_root`. Files already on disk are never
//! fetched again; presence is the only check, so a download lands in a
//! `.part` sibling and is renamed into place only once complete.

use crate::error::EngineError;
use sgf_adapters::ObjectStore;
use sgf_core::FramePattern;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
pub struct Mirror {
    store: Arc<dyn ObjectStore>,
    local_root: PathBuf,
}

impl Mirror {
    pub fn new(store: Arc<dyn ObjectStore>, local_root: impl Into<PathBuf>) -> Self {
        Self { store, local_root: local_root.into() }
    }

    pub fn bucket(&self) -> &str {
        self.store.bucket()
    }

    /// Bucket key for a tracked path.
    pub fn key_for(path: &str) -> &str {
        path.strip_prefix('/').unwrap_or(path)
    }

    /// Where a tracked path lives on this machine.
    pub fn local_path(&self, path: &str) -> PathBuf {
        self.local_root.join(Self::key_for(path))
    }

    /// Make `path` available locally and return the local files.
    ///
    /// A path with a frame placeholder mirrors every object sharing the
    /// literal prefix before the placeholder.
    pub async fn ensure_local(&self, path: &str) -> Result<Vec<PathBuf>, EngineError> {
        let Some(pattern) = FramePattern::find(path) else {
            return Ok(vec![self.ensure_file(Self::key_for(path)).await?]);
        };

        let prefix = Self::key_for(pattern.prefix());
        let keys = self.store.list_keys(prefix).await?;
        tracing::debug!(path, prefix, count = keys.len(), "mirroring sequence");

        let mut local = Vec::with_capacity(keys.len());
        for key in &keys {
            local.push(self.ensure_file(key).await?);
        }
        Ok(local)
    }

    async fn ensure_file(&self, key: &str) -> Result<PathBuf, EngineError> {
        let local = self.local_root.join(key);
        if tokio::fs::try_exists(&local).await.map_err(EngineError::io(&local))? {
            tracing::debug!(path = %local.display(), "already mirrored");
            return Ok(local);
        }

        if let Some(parent) = local.parent() {
            create_parent(parent).await?;
        }
        tracing::info!(bucket = self.store.bucket(), key, path = %local.display(), "downloading");
        let part = part_path(&local);
        if let Err(e) = self.store.download(key, &part).await {
            if let Err(remove) = tokio::fs::remove_file(&part).await {
                if remove.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %part.display(), error = %remove, "partial download left behind");
                }
            }
            return Err(e.into());
        }
        tokio::fs::rename(&part, &local).await.map_err(EngineError::io(&local))?;
        Ok(local)
    }
}

/// Sibling path a download lands in before it is complete.
fn part_path(local: &Path) -> PathBuf {
    let mut name = local.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    local.with_file_name(name)
}

async fn create_parent(dir: &Path) -> Result<(), EngineError> {
    tokio::fs::create_dir_all(dir).await.map_err(EngineError::io(dir))
}

#[cfg(test)]
#[path = "mirror_tests.rs"]
mod tests;
