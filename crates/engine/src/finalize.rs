// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publish finalizer, split across the job-completion boundary.
//!
//! Before submission the pending publish is written next to the job. Once
//! the job has run, the worker uploads every rendered frame to the bucket
//! and registers the publish from that descriptor. The completion side only
//! reads the environment contract and the descriptor, so it runs the same on
//! a farm worker or locally.

use crate::config::ConfigError;
use crate::error::EngineError;
use sgf_adapters::{ObjectStore, TrackingStore};
use sgf_core::{env_vars, frame_from_filename, EntityRef, FramePattern, PendingPublish, TrackedFile, IMAGE_FILE_TYPE};
use std::path::{Path, PathBuf};

/// Build the pending publish for a render of `source`.
pub async fn prepare_publish(
    tracking: &dyn TrackingStore,
    source: &TrackedFile,
    output_pattern: &str,
) -> Result<PendingPublish, EngineError> {
    let file_type = tracking
        .find_published_file_type(IMAGE_FILE_TYPE)
        .await?
        .ok_or_else(|| EngineError::UnresolvedFileType(IMAGE_FILE_TYPE.to_string()))?;
    Ok(PendingPublish::for_render(source, file_type, output_pattern))
}

pub async fn write_pending_publish(path: &Path, publish: &PendingPublish) -> Result<(), EngineError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(EngineError::io(parent))?;
    }
    let json = serde_json::to_string_pretty(publish)
        .map_err(|source| EngineError::Descriptor { path: path.to_path_buf(), source })?;
    tokio::fs::write(path, json).await.map_err(EngineError::io(path))?;
    tracing::info!(path = %path.display(), code = %publish.code, "wrote pending publish");
    Ok(())
}

pub async fn read_pending_publish(path: &Path) -> Result<PendingPublish, EngineError> {
    let json = tokio::fs::read_to_string(path).await.map_err(EngineError::io(path))?;
    serde_json::from_str(&json).map_err(|source| EngineError::Descriptor { path: path.to_path_buf(), source })
}

/// The environment a finished job hands to its completion hooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEnv {
    /// Directory the render wrote into.
    pub output_path: PathBuf,
    pub bucket: String,
    /// Bucket key pattern with a frame placeholder.
    pub key_pattern: String,
}

impl CompletionEnv {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(crate::env::var)
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &'static str| lookup(name).filter(|v| !v.is_empty()).ok_or(ConfigError::MissingVar(name));
        Ok(Self {
            output_path: PathBuf::from(get(env_vars::OUTPUT_PATH)?),
            bucket: get(env_vars::BUCKET)?,
            key_pattern: get(env_vars::KEY_PATTERN)?,
        })
    }
}

/// Every file under `dir`, sorted by path.
pub fn collect_outputs(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| EngineError::Io {
            path: e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf),
            source: e.into(),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Upload the rendered frames to their keys. The first failure aborts.
pub async fn upload_outputs(store: &dyn ObjectStore, env: &CompletionEnv) -> Result<Vec<String>, EngineError> {
    let pattern = FramePattern::parse(&env.key_pattern)?;
    if store.bucket() != env.bucket {
        tracing::warn!(store = store.bucket(), expected = %env.bucket, "uploading to a different bucket than the job named");
    }

    let files = collect_outputs(&env.output_path)?;
    let mut keys = Vec::with_capacity(files.len());
    for file in &files {
        let key = pattern.format(frame_from_filename(file)?);
        tracing::info!(path = %file.display(), bucket = store.bucket(), key = %key, "uploading frame");
        store.upload(file, &key).await?;
        keys.push(key);
    }
    Ok(keys)
}

/// Create the published file described by the pending publish at `path`.
pub async fn register_publish(tracking: &dyn TrackingStore, path: &Path) -> Result<EntityRef, EngineError> {
    let publish = read_pending_publish(path).await?;
    let created = tracking.create_published_file(&publish).await?;
    tracing::info!(%created, code = %publish.code, "registered publish");
    Ok(created)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub uploaded: Vec<String>,
    pub published: EntityRef,
}

/// Both completion steps, frames first.
pub async fn on_completion(
    tracking: &dyn TrackingStore,
    store: &dyn ObjectStore,
    env: &CompletionEnv,
    descriptor: &Path,
) -> Result<CompletionReport, EngineError> {
    let uploaded = upload_outputs(store, env).await?;
    let published = register_publish(tracking, descriptor).await?;
    Ok(CompletionReport { uploaded, published })
}

#[cfg(test)]
#[path = "finalize_tests.rs"]
mod tests;
