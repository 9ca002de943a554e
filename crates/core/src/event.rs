// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracking-store event log entries.

use crate::entity::{kind, EntityRef};
use crate::tracked_file::RecordError;
use serde::{Deserialize, Serialize};

/// Event type emitted when a new published file is registered.
pub const PUBLISHED_FILE_NEW: &str = "Shotgun_PublishedFile_New";

/// Field projection for event lookups.
pub const EVENT_FIELDS: &[&str] = &[
    "attribute_name",
    "event_type",
    "created_at",
    "entity",
    "project",
    "meta",
    "user",
    "session_uuid",
    "user.HumanUser.login",
];

/// A single event from the store's event log. Consumed once per hook run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "crate::tracked_file::null_as_default")]
    pub event_type: String,
    #[serde(default)]
    pub attribute_name: Option<String>,
    #[serde(default)]
    pub entity: Option<EntityRef>,
    #[serde(default)]
    pub project: Option<EntityRef>,
    #[serde(default)]
    pub user: Option<EntityRef>,
    #[serde(default, rename = "user.HumanUser.login")]
    pub user_login: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub session_uuid: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl EventRecord {
    pub fn from_fields(fields: serde_json::Map<String, serde_json::Value>) -> Result<Self, RecordError> {
        serde_json::from_value(serde_json::Value::Object(fields)).map_err(|source| {
            RecordError::Malformed { entity_type: kind::EVENT_LOG_ENTRY, source }
        })
    }

    /// A new-publish event for the given published file, as the store emits it.
    pub fn published_file_new(id: i64, file_id: i64) -> Self {
        Self {
            id,
            event_type: PUBLISHED_FILE_NEW.to_string(),
            attribute_name: None,
            entity: Some(EntityRef::published_file(file_id)),
            project: None,
            user: None,
            user_login: None,
            created_at: None,
            session_uuid: None,
            meta: None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
