// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entity references into the tracking store.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Entity type names used by the hooks.
pub mod kind {
    pub const PUBLISHED_FILE: &str = "PublishedFile";
    pub const PUBLISHED_FILE_TYPE: &str = "PublishedFileType";
    pub const EVENT_LOG_ENTRY: &str = "EventLogEntry";
    pub const VERSION: &str = "Version";
    pub const SHOT: &str = "Shot";
    pub const TASK: &str = "Task";
    pub const PROJECT: &str = "Project";
    pub const HUMAN_USER: &str = "HumanUser";
}

/// A `{type, id}` link to a record in the tracking store.
///
/// Serializes in the shape the store accepts for link fields; the display
/// name is carried when the store returned one but is never required.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "type")]
    pub entity_type: SmolStr,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<SmolStr>, id: i64) -> Self {
        Self { entity_type: entity_type.into(), id, name: None }
    }

    pub fn published_file(id: i64) -> Self {
        Self::new(kind::PUBLISHED_FILE, id)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is(&self, entity_type: &str) -> bool {
        self.entity_type == entity_type
    }

    /// Strip the display name, keeping only what the store needs to link.
    pub fn link(&self) -> Self {
        Self::new(self.entity_type.clone(), self.id)
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} #{} ({})", self.entity_type, self.id, name),
            None => write!(f, "{} #{}", self.entity_type, self.id),
        }
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
