// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracked file (published file) records.

use crate::entity::{kind, EntityRef};
use crate::frames::FrameRange;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field projection used when a hook fetches the record behind an event.
pub const TRACKED_FILE_FIELDS: &[&str] = &[
    "code",
    "created_by",
    "entity",
    "id",
    "name",
    "path",
    "project",
    "sg_category",
    "task",
    "downstream_published_files",
    "created_by.HumanUser.login",
    "entity.Shot.sg_cut_in",
    "entity.Shot.sg_cut_out",
    "published_file_type.PublishedFileType.code",
    "task.Task.step.Step.code",
];

/// Field projection used while walking dependency links.
pub const DEPENDENCY_FIELDS: &[&str] = &["id", "path", "downstream_published_files"];

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed {entity_type} record: {source}")]
    Malformed {
        entity_type: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to process {record}, the shot has no cut info (cut_in={cut_in:?}, cut_out={cut_out:?})")]
    MissingFrameRange { record: String, cut_in: Option<i64>, cut_out: Option<i64> },
}

/// The storage path of a tracked file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path_linux: Option<String>,
}

impl FilePath {
    pub fn local(path: impl Into<String>) -> Self {
        Self { local_path: Some(path.into()), local_path_linux: None }
    }

    pub fn linux(path: impl Into<String>) -> Self {
        let path = path.into();
        Self { local_path: Some(path.clone()), local_path_linux: Some(path) }
    }

    /// Path on the Linux render hosts, falling back to the generic local path.
    pub fn linux_path(&self) -> Option<&str> {
        self.local_path_linux.as_deref().or(self.local_path.as_deref())
    }

    pub fn local_path(&self) -> Option<&str> {
        self.local_path.as_deref().or(self.local_path_linux.as_deref())
    }
}

/// A published artifact in the tracking store.
///
/// Linked fields (`entity.Shot.sg_cut_in` and friends) are flattened into the
/// record by the store adapter and land on plain struct fields here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFile {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: FilePath,
    #[serde(default)]
    pub project: Option<EntityRef>,
    /// The shot (or asset) the file was published against.
    #[serde(default)]
    pub entity: Option<EntityRef>,
    #[serde(default)]
    pub task: Option<EntityRef>,
    #[serde(default)]
    pub created_by: Option<EntityRef>,
    #[serde(default, rename = "created_by.HumanUser.login")]
    pub created_by_login: Option<String>,
    #[serde(default, rename = "published_file_type.PublishedFileType.code")]
    pub file_type: Option<String>,
    #[serde(default, rename = "task.Task.step.Step.code")]
    pub step: Option<String>,
    #[serde(default, rename = "entity.Shot.sg_cut_in")]
    pub cut_in: Option<i64>,
    #[serde(default, rename = "entity.Shot.sg_cut_out")]
    pub cut_out: Option<i64>,
    /// Records this file depends on.
    #[serde(default, rename = "downstream_published_files", deserialize_with = "null_as_default")]
    pub downstream: Vec<EntityRef>,
}

/// The store returns `null` for empty fields.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TrackedFile {
    /// Build a record from a flat field map returned by the store.
    pub fn from_fields(fields: serde_json::Map<String, serde_json::Value>) -> Result<Self, RecordError> {
        serde_json::from_value(serde_json::Value::Object(fields)).map_err(|source| {
            RecordError::Malformed { entity_type: kind::PUBLISHED_FILE, source }
        })
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::published_file(self.id)
    }

    pub fn linux_path(&self) -> Option<&str> {
        self.path.linux_path()
    }

    /// File extension of the Linux path without the leading period; empty if none.
    pub fn extension(&self) -> &str {
        let Some(path) = self.linux_path() else {
            return "";
        };
        let file_name = path.rsplit('/').next().unwrap_or(path);
        match file_name.rfind('.') {
            Some(0) | None => "",
            Some(dot) => &file_name[dot + 1..],
        }
    }

    /// Human readable label for logs and errors.
    pub fn label(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.code)
    }

    /// The shot's cut range. Absent bounds are a data-integrity error.
    pub fn frame_range(&self) -> Result<FrameRange, RecordError> {
        match (self.cut_in, self.cut_out) {
            (Some(start), Some(end)) => Ok(FrameRange::new(start, end)),
            (cut_in, cut_out) => Err(RecordError::MissingFrameRange {
                record: self.label().to_string(),
                cut_in,
                cut_out,
            }),
        }
    }
}

crate::record_builder! {
    pub struct TrackedFileBuilder => TrackedFile {
        set {
            id: i64 = 1,
            code: String = "sh010_light_v001".to_string(),
            path: FilePath = FilePath::linux("/projects/demo/sh010/light/sh010_light_v001.mb"),
            downstream: Vec<EntityRef> = Vec::new(),
        }
        option {
            name: String = None,
            project: EntityRef = Some(EntityRef::new(kind::PROJECT, 70)),
            entity: EntityRef = Some(EntityRef::new(kind::SHOT, 1200)),
            task: EntityRef = Some(EntityRef::new(kind::TASK, 5400)),
            created_by: EntityRef = Some(EntityRef::new(kind::HUMAN_USER, 88)),
            created_by_login: String = Some("artist".to_string()),
            file_type: String = Some("Maya Scene".to_string()),
            step: String = Some("Light".to_string()),
            cut_in: i64 = Some(1001),
            cut_out: i64 = Some(1010),
        }
    }
}

#[cfg(test)]
#[path = "tracked_file_tests.rs"]
mod tests;
