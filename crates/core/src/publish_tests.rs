// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::entity::kind;
use serde_json::json;

#[test]
fn pending_publish_links_back_to_source() {
    let source = TrackedFile::builder().id(123).code("sh010_light_v003".to_string()).build();
    let image = EntityRef::new(kind::PUBLISHED_FILE_TYPE, 4).with_name("Image");

    let pending = PendingPublish::for_render(&source, image, "/projects/renders/sh010_light_v003.%05d.exr");

    assert_eq!(pending.code, "sh010_light_v003_render");
    assert_eq!(pending.published_file_type, EntityRef::new(kind::PUBLISHED_FILE_TYPE, 4));
    assert_eq!(pending.path.local_path(), Some("/projects/renders/sh010_light_v003.%05d.exr"));
    assert_eq!(pending.downstream_published_files, vec![EntityRef::published_file(123)]);
    assert_eq!(pending.entity, source.entity);
    assert_eq!(pending.task, source.task);
    assert_eq!(pending.created_by, source.created_by);
}

#[test]
fn pending_publish_serializes_in_store_shape() {
    let source = TrackedFile::builder().id(7).build();
    let pending =
        PendingPublish::for_render(&source, EntityRef::new(kind::PUBLISHED_FILE_TYPE, 4), "/r/a.%05d.exr");

    let value = serde_json::to_value(&pending).unwrap();
    assert_eq!(value["published_file_type"], json!({"type": "PublishedFileType", "id": 4}));
    assert_eq!(value["path"], json!({"local_path": "/r/a.%05d.exr"}));
    assert_eq!(value["downstream_published_files"], json!([{"type": "PublishedFile", "id": 7}]));

    let back: PendingPublish = serde_json::from_value(value).unwrap();
    assert_eq!(back, pending);
}

#[test]
fn version_draft_is_marked_for_review() {
    let source = TrackedFile::builder()
        .id(55)
        .code("sh010_comp_v002".to_string())
        .path(FilePath::linux("/projects/renders/sh010_comp_v002.%05d.exr"))
        .build();

    let draft = VersionDraft::for_review(&source);

    assert_eq!(draft.sg_status_list, REVIEW_STATUS);
    assert_eq!(draft.code, "sh010_comp_v002");
    assert_eq!(draft.sg_task, source.task);
    assert_eq!(draft.user, source.created_by);
    assert_eq!(draft.sg_path_to_frames.as_deref(), Some("/projects/renders/sh010_comp_v002.%05d.exr"));
    assert_eq!(draft.published_files, vec![EntityRef::published_file(55)]);
}
