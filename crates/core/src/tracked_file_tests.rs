// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn fields(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn parses_flattened_store_fields() {
    let record = TrackedFile::from_fields(fields(json!({
        "id": 123,
        "type": "PublishedFile",
        "code": "sh010_light_v003",
        "name": "sh010_light",
        "path": {"local_path": "/projects/sh010_light_v003.mb", "local_path_linux": "/mnt/projects/sh010_light_v003.mb"},
        "project": {"type": "Project", "id": 70, "name": "demo"},
        "entity": {"type": "Shot", "id": 1200},
        "task": {"type": "Task", "id": 5400},
        "created_by": {"type": "HumanUser", "id": 88},
        "created_by.HumanUser.login": "artist",
        "published_file_type.PublishedFileType.code": "Maya Scene",
        "task.Task.step.Step.code": "Light",
        "entity.Shot.sg_cut_in": 1001,
        "entity.Shot.sg_cut_out": 1010,
        "sg_category": null,
        "downstream_published_files": [{"type": "PublishedFile", "id": 9}]
    })))
    .unwrap();

    assert_eq!(record.id, 123);
    assert_eq!(record.code, "sh010_light_v003");
    assert_eq!(record.linux_path(), Some("/mnt/projects/sh010_light_v003.mb"));
    assert_eq!(record.path.local_path(), Some("/projects/sh010_light_v003.mb"));
    assert_eq!(record.created_by_login.as_deref(), Some("artist"));
    assert_eq!(record.file_type.as_deref(), Some("Maya Scene"));
    assert_eq!(record.step.as_deref(), Some("Light"));
    assert_eq!(record.downstream, vec![EntityRef::published_file(9)]);
    assert_eq!(record.frame_range().unwrap(), FrameRange::new(1001, 1010));
}

#[test]
fn null_links_become_empty() {
    let record = TrackedFile::from_fields(fields(json!({
        "id": 5,
        "code": null,
        "path": null,
        "downstream_published_files": null,
        "entity.Shot.sg_cut_in": null
    })))
    .unwrap();

    assert_eq!(record.code, "");
    assert_eq!(record.linux_path(), None);
    assert!(record.downstream.is_empty());
    assert_eq!(record.cut_in, None);
}

#[test]
fn missing_id_is_malformed() {
    let err = TrackedFile::from_fields(fields(json!({"code": "x"}))).unwrap_err();
    assert!(matches!(err, RecordError::Malformed { .. }));
}

#[yare::parameterized(
    maya_binary   = { "/p/sh010_light_v001.mb", "mb" },
    maya_ascii    = { "/p/sh010_light_v001.ma", "ma" },
    exr_sequence  = { "/p/renders/sh010.%05d.exr", "exr" },
    movie         = { "/p/review/sh010.mov", "mov" },
    no_suffix     = { "/p/renders/README", "" },
    dotted_dir    = { "/p/v1.2/plate", "" },
    hidden_file   = { "/p/.hidden", "" },
)]
fn extension_from_linux_path(path: &str, expected: &str) {
    let record = TrackedFile::builder().path(FilePath::linux(path)).build();
    assert_eq!(record.extension(), expected);
}

#[test]
fn extension_prefers_linux_path() {
    let record = TrackedFile::builder()
        .path(FilePath {
            local_path: Some("C:/projects/scene.ma".to_string()),
            local_path_linux: Some("/projects/scene.mb".to_string()),
        })
        .build();
    assert_eq!(record.extension(), "mb");
}

#[test]
fn missing_cut_out_is_a_data_error() {
    let mut record = TrackedFile::builder().name("sh010_light").build();
    record.cut_out = None;

    let err = record.frame_range().unwrap_err();
    match err {
        RecordError::MissingFrameRange { record, cut_in, cut_out } => {
            assert_eq!(record, "sh010_light");
            assert_eq!(cut_in, Some(1001));
            assert_eq!(cut_out, None);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn label_falls_back_to_code() {
    let record = TrackedFile::builder().build();
    assert_eq!(record.label(), "sh010_light_v001");
}
