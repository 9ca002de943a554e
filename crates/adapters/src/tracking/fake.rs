// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory tracking store for tests

use super::{TrackingError, TrackingStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use sgf_core::{kind, EntityRef, EventRecord, PendingPublish, TrackedFile, VersionDraft};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Recorded attachment upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingUpload {
    pub entity: EntityRef,
    pub path: PathBuf,
    pub field: String,
}

struct FakeTrackingState {
    events: HashMap<i64, EventRecord>,
    files: HashMap<i64, TrackedFile>,
    file_types: HashMap<String, EntityRef>,
    record_lookups: Vec<EntityRef>,
    batch_lookups: Vec<Vec<i64>>,
    published: Vec<PendingPublish>,
    versions: Vec<VersionDraft>,
    uploads: Vec<TrackingUpload>,
    next_id: i64,
}

/// Fake tracking store that serves seeded records and records writes
#[derive(Clone)]
pub struct FakeTrackingStore {
    inner: Arc<Mutex<FakeTrackingState>>,
}

impl Default for FakeTrackingStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeTrackingState {
                events: HashMap::new(),
                files: HashMap::new(),
                file_types: HashMap::new(),
                record_lookups: Vec::new(),
                batch_lookups: Vec::new(),
                published: Vec::new(),
                versions: Vec::new(),
                uploads: Vec::new(),
                next_id: 10_000,
            })),
        }
    }
}

impl FakeTrackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&self, event: EventRecord) {
        self.inner.lock().events.insert(event.id, event);
    }

    pub fn add_file(&self, file: TrackedFile) {
        self.inner.lock().files.insert(file.id, file);
    }

    pub fn add_file_type(&self, code: &str, id: i64) {
        self.inner
            .lock()
            .file_types
            .insert(code.to_string(), EntityRef::new(kind::PUBLISHED_FILE_TYPE, id).with_name(code));
    }

    /// Entities fetched one at a time
    pub fn record_lookups(&self) -> Vec<EntityRef> {
        self.inner.lock().record_lookups.clone()
    }

    /// Id batches passed to `find_tracked_files`
    pub fn batch_lookups(&self) -> Vec<Vec<i64>> {
        self.inner.lock().batch_lookups.clone()
    }

    pub fn published(&self) -> Vec<PendingPublish> {
        self.inner.lock().published.clone()
    }

    pub fn versions(&self) -> Vec<VersionDraft> {
        self.inner.lock().versions.clone()
    }

    pub fn uploads(&self) -> Vec<TrackingUpload> {
        self.inner.lock().uploads.clone()
    }
}

#[async_trait]
impl TrackingStore for FakeTrackingStore {
    async fn find_event(&self, id: i64) -> Result<Option<EventRecord>, TrackingError> {
        Ok(self.inner.lock().events.get(&id).cloned())
    }

    async fn find_tracked_file(
        &self,
        entity: &EntityRef,
        _fields: &[&str],
    ) -> Result<Option<TrackedFile>, TrackingError> {
        let mut state = self.inner.lock();
        state.record_lookups.push(entity.clone());
        if !entity.is(kind::PUBLISHED_FILE) {
            return Ok(None);
        }
        Ok(state.files.get(&entity.id).cloned())
    }

    async fn find_tracked_files(&self, ids: &[i64]) -> Result<Vec<TrackedFile>, TrackingError> {
        let mut state = self.inner.lock();
        state.batch_lookups.push(ids.to_vec());
        Ok(ids.iter().filter_map(|id| state.files.get(id).cloned()).collect())
    }

    async fn find_published_file_type(&self, code: &str) -> Result<Option<EntityRef>, TrackingError> {
        Ok(self.inner.lock().file_types.get(code).cloned())
    }

    async fn create_published_file(&self, publish: &PendingPublish) -> Result<EntityRef, TrackingError> {
        let mut state = self.inner.lock();
        state.next_id += 1;
        state.published.push(publish.clone());
        Ok(EntityRef::published_file(state.next_id).with_name(&publish.code))
    }

    async fn create_version(&self, draft: &VersionDraft) -> Result<EntityRef, TrackingError> {
        let mut state = self.inner.lock();
        state.next_id += 1;
        state.versions.push(draft.clone());
        Ok(EntityRef::new(kind::VERSION, state.next_id).with_name(&draft.code))
    }

    async fn upload(&self, entity: &EntityRef, path: &Path, field: &str) -> Result<(), TrackingError> {
        if !path.exists() {
            return Err(TrackingError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        self.inner.lock().uploads.push(TrackingUpload {
            entity: entity.clone(),
            path: path.to_path_buf(),
            field: field.to_string(),
        });
        Ok(())
    }
}
