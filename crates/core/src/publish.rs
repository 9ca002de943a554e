// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Records written back to the tracking store: the pending publish for a
//! render output and the review version for an image sequence.

use crate::entity::EntityRef;
use crate::tracked_file::{FilePath, TrackedFile};
use serde::{Deserialize, Serialize};

/// Status given to freshly created review versions.
pub const REVIEW_STATUS: &str = "rev";

/// Published-file type code for rendered image sequences.
pub const IMAGE_FILE_TYPE: &str = "Image";

/// Attributes of the published file a render job will produce.
///
/// Written to disk before submission, uploaded with the job, and read back by
/// the post-job hook to create the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPublish {
    pub code: String,
    pub project: Option<EntityRef>,
    pub published_file_type: EntityRef,
    pub path: FilePath,
    /// Links the output back to the record it was rendered from.
    pub downstream_published_files: Vec<EntityRef>,
    pub created_by: Option<EntityRef>,
    pub task: Option<EntityRef>,
    pub entity: Option<EntityRef>,
}

impl PendingPublish {
    /// Describe the render of `source` that will land at `output_pattern`.
    pub fn for_render(source: &TrackedFile, file_type: EntityRef, output_pattern: &str) -> Self {
        Self {
            code: format!("{}_render", source.code),
            project: source.project.clone(),
            published_file_type: file_type.link(),
            path: FilePath::local(output_pattern),
            downstream_published_files: vec![source.entity_ref()],
            created_by: source.created_by.clone(),
            task: source.task.clone(),
            entity: source.entity.clone(),
        }
    }
}

/// A review version created from an image sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDraft {
    pub code: String,
    pub project: Option<EntityRef>,
    pub sg_status_list: String,
    pub entity: Option<EntityRef>,
    pub sg_task: Option<EntityRef>,
    pub user: Option<EntityRef>,
    pub sg_path_to_frames: Option<String>,
    pub published_files: Vec<EntityRef>,
}

impl VersionDraft {
    pub fn for_review(source: &TrackedFile) -> Self {
        Self {
            code: source.code.clone(),
            project: source.project.clone(),
            sg_status_list: REVIEW_STATUS.to_string(),
            entity: source.entity.clone(),
            sg_task: source.task.clone(),
            user: source.created_by.clone(),
            sg_path_to_frames: source.path.local_path().map(str::to_string),
            published_files: vec![source.entity_ref()],
        }
    }
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
