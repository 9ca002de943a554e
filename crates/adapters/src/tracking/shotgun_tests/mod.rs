// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

mod http;

#[yare::parameterized(
    published_file      = { "PublishedFile", "published_files" },
    published_file_type = { "PublishedFileType", "published_file_types" },
    event_log_entry     = { "EventLogEntry", "event_log_entries" },
    version             = { "Version", "versions" },
    shot                = { "Shot", "shots" },
    human_user          = { "HumanUser", "human_users" },
    key_ending_vowel_y  = { "Day", "days" },
)]
fn endpoint_names(entity_type: &str, expected: &str) {
    assert_eq!(endpoint_name(entity_type), expected);
}

#[test]
fn flatten_merges_attributes_and_relationships() {
    let record = json!({
        "id": 123,
        "type": "PublishedFile",
        "attributes": {
            "code": "sh010_light_v003",
            "entity.Shot.sg_cut_in": 1001,
            "path": {"local_path_linux": "/projects/a.mb"}
        },
        "relationships": {
            "project": {"data": {"type": "Project", "id": 70, "name": "demo"}, "links": {}},
            "downstream_published_files": {"data": [{"type": "PublishedFile", "id": 9}]},
            "task": {"links": {}}
        },
        "links": {"self": "/api/v1/entity/published_files/123"}
    });

    let fields = flatten_record(&record, "test").unwrap();

    assert_eq!(fields["id"], json!(123));
    assert_eq!(fields["code"], json!("sh010_light_v003"));
    assert_eq!(fields["entity.Shot.sg_cut_in"], json!(1001));
    assert_eq!(fields["project"]["id"], json!(70));
    assert_eq!(fields["downstream_published_files"][0]["id"], json!(9));
    assert_eq!(fields["task"], Value::Null);
    assert!(!fields.contains_key("links"));

    let file = TrackedFile::from_fields(fields).unwrap();
    assert_eq!(file.downstream, vec![EntityRef::published_file(9)]);
    assert_eq!(file.task, None);
}

#[test]
fn flatten_rejects_non_objects() {
    let err = flatten_record(&json!([1, 2]), "search PublishedFile").unwrap_err();
    assert!(matches!(err, TrackingError::Response { .. }));
}

#[test]
fn links_resolve_against_server() {
    let client = ShotgunClient::new("https://studio.shotgrid.autodesk.com/", "daemon", "key");
    assert_eq!(
        client.resolve_link("/api/v1/entity/versions/5/sg_uploaded_movie/_upload"),
        "https://studio.shotgrid.autodesk.com/api/v1/entity/versions/5/sg_uploaded_movie/_upload"
    );
    assert_eq!(client.resolve_link("https://s3.amazonaws.com/x?sig=1"), "https://s3.amazonaws.com/x?sig=1");
    assert_eq!(client.url("/auth/access_token"), "https://studio.shotgrid.autodesk.com/api/v1/auth/access_token");
}
