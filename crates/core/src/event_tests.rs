// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn parses_event_log_entry() {
    let serde_json::Value::Object(map) = json!({
        "id": 9001,
        "type": "EventLogEntry",
        "event_type": "Shotgun_PublishedFile_New",
        "attribute_name": null,
        "entity": {"type": "PublishedFile", "id": 123, "name": "sh010_light_v003"},
        "project": {"type": "Project", "id": 70},
        "user": {"type": "HumanUser", "id": 88},
        "user.HumanUser.login": "artist",
        "created_at": "2026-10-15T09:30:00Z",
        "meta": {"type": "new_entity", "entity_id": 123}
    }) else {
        unreachable!()
    };

    let event = EventRecord::from_fields(map).unwrap();
    assert_eq!(event.id, 9001);
    assert_eq!(event.event_type, PUBLISHED_FILE_NEW);
    assert_eq!(event.entity.as_ref().map(|e| e.id), Some(123));
    assert_eq!(event.user_login.as_deref(), Some("artist"));
    assert!(event.meta.is_some());
}

#[test]
fn event_without_entity_parses() {
    let serde_json::Value::Object(map) = json!({"id": 1, "event_type": "Shotgun_Shot_Change"})
    else {
        unreachable!()
    };
    let event = EventRecord::from_fields(map).unwrap();
    assert!(event.entity.is_none());
}

#[test]
fn published_file_new_references_file() {
    let event = EventRecord::published_file_new(7, 123);
    assert_eq!(event.entity, Some(EntityRef::published_file(123)));
    assert_eq!(event.event_type, PUBLISHED_FILE_NEW);
}
