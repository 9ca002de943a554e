// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Production tracking store adapter

mod shotgun;

pub use shotgun::ShotgunClient;

use async_trait::async_trait;
use sgf_core::{EntityRef, EventRecord, PendingPublish, RecordError, TrackedFile, VersionDraft};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from tracking store operations
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("tracking store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{operation} returned HTTP {status}: {body}")]
    Status { operation: String, status: u16, body: String },
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("unexpected response from {operation}: {message}")]
    Response { operation: String, message: String },
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Adapter for the production tracking store
#[async_trait]
pub trait TrackingStore: Send + Sync {
    /// Fetch an event log entry by id.
    async fn find_event(&self, id: i64) -> Result<Option<EventRecord>, TrackingError>;

    /// Fetch the published file behind `entity` with the given field projection.
    async fn find_tracked_file(
        &self,
        entity: &EntityRef,
        fields: &[&str],
    ) -> Result<Option<TrackedFile>, TrackingError>;

    /// Fetch several published files at once, projected to their path and
    /// dependency links. Unknown ids are silently absent from the result.
    async fn find_tracked_files(&self, ids: &[i64]) -> Result<Vec<TrackedFile>, TrackingError>;

    async fn find_published_file_type(&self, code: &str) -> Result<Option<EntityRef>, TrackingError>;

    async fn create_published_file(&self, publish: &PendingPublish) -> Result<EntityRef, TrackingError>;

    async fn create_version(&self, draft: &VersionDraft) -> Result<EntityRef, TrackingError>;

    /// Attach a local file to a field of an existing record.
    async fn upload(&self, entity: &EntityRef, path: &Path, field: &str) -> Result<(), TrackingError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTrackingStore, TrackingUpload};
