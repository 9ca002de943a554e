// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request-level behavior against a local site.

use super::*;
use wiremock::matchers::{body_json, body_partial_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TOKEN_PATH: &str = "/api/v1/auth/access_token";
const UPLOAD_PATH: &str = "/api/v1/entity/versions/7/sg_uploaded_movie/_upload";

async fn mount_token(site: &MockServer, expires_in: u64, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=render_daemon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-1",
            "token_type": "Bearer",
            "expires_in": expires_in,
        })))
        .expect(expected_calls)
        .mount(site)
        .await;
}

fn client(site: &MockServer) -> ShotgunClient {
    ShotgunClient::new(site.uri(), "render_daemon", "s3cret")
}

fn published_file(id: i64) -> Value {
    json!({
        "id": id,
        "type": "PublishedFile",
        "attributes": { "path": { "local_path_linux": format!("/projects/{id}.abc") } },
        "relationships": { "downstream_published_files": { "data": [] } },
    })
}

async fn requests_with_method(server: &MockServer, verb: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.method.to_string() == verb)
        .collect()
}

#[tokio::test]
async fn token_is_reused_while_valid() {
    let site = MockServer::start().await;
    mount_token(&site, 600, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/entity/event_log_entries/_search"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(2)
        .mount(&site)
        .await;
    let client = client(&site);

    assert_eq!(client.find_event(1).await.unwrap(), None);
    assert_eq!(client.find_event(2).await.unwrap(), None);

    site.verify().await;
}

#[tokio::test]
async fn expired_token_is_refreshed() {
    let site = MockServer::start().await;
    // Shorter than the refresh slack, so every request sees it as expired
    mount_token(&site, 5, 2).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/entity/event_log_entries/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(2)
        .mount(&site)
        .await;
    let client = client(&site);

    client.find_event(1).await.unwrap();
    client.find_event(2).await.unwrap();

    site.verify().await;
}

#[tokio::test]
async fn rejected_credentials_are_an_auth_error() {
    let site = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_client"))
        .mount(&site)
        .await;

    let err = client(&site).find_event(1).await.unwrap_err();

    assert!(matches!(err, TrackingError::Auth(ref message) if message.contains("invalid_client")), "{err}");
}

#[tokio::test]
async fn search_sends_array_filters_and_projection() {
    let site = MockServer::start().await;
    mount_token(&site, 600, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/entity/published_files/_search"))
        .and(header("content-type", ARRAY_FILTERS))
        .and(query_param("fields", DEPENDENCY_FIELDS.join(",").as_str()))
        .and(query_param("page[size]", "500"))
        .and(query_param("page[number]", "1"))
        .and(body_json(json!({ "filters": [["id", "in", [4, 5]]] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [published_file(4), published_file(5)],
        })))
        .expect(1)
        .mount(&site)
        .await;

    let files = client(&site).find_tracked_files(&[4, 5]).await.unwrap();

    let ids: Vec<i64> = files.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![4, 5]);
    assert_eq!(files[0].linux_path(), Some("/projects/4.abc"));
}

#[tokio::test]
async fn search_follows_pages_until_a_short_one() {
    let site = MockServer::start().await;
    mount_token(&site, 600, 1).await;
    let pages = [
        ("1", vec![published_file(1), published_file(2)]),
        ("2", vec![published_file(3), published_file(4)]),
        ("3", vec![published_file(5)]),
    ];
    for (number, records) in pages {
        Mock::given(method("POST"))
            .and(path("/api/v1/entity/published_files/_search"))
            .and(query_param("page[size]", "2"))
            .and(query_param("page[number]", number))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": records })))
            .expect(1)
            .mount(&site)
            .await;
    }

    let files = client(&site).with_page_size(2).find_tracked_files(&[1, 2, 3, 4, 5]).await.unwrap();

    let ids: Vec<i64> = files.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    site.verify().await;
}

#[tokio::test]
async fn full_last_page_costs_one_empty_request() {
    let site = MockServer::start().await;
    mount_token(&site, 600, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/entity/published_files/_search"))
        .and(query_param("page[number]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [published_file(1), published_file(2)],
        })))
        .mount(&site)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/entity/published_files/_search"))
        .and(query_param("page[number]", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&site)
        .await;

    let files = client(&site).with_page_size(2).find_tracked_files(&[1, 2]).await.unwrap();

    assert_eq!(files.len(), 2);
    site.verify().await;
}

#[tokio::test]
async fn search_error_status_is_reported() {
    let site = MockServer::start().await;
    mount_token(&site, 600, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/entity/published_files/_search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&site)
        .await;

    let err = client(&site).find_tracked_files(&[1]).await.unwrap_err();

    assert!(matches!(err, TrackingError::Status { status: 500, ref body, .. } if body == "boom"), "{err}");
}

/// Which of the three upload requests the site rejects.
#[derive(Clone, Copy, PartialEq)]
enum UploadStep {
    Ticket,
    Put,
    Complete,
}

/// Mount the upload requests. `upload_link` is where the bytes go.
async fn mount_upload(site: &MockServer, upload_link: &str, failing: Option<UploadStep>) {
    let status = |step| if failing == Some(step) { 500 } else { 200 };
    Mock::given(method("GET"))
        .and(path(UPLOAD_PATH))
        .and(query_param("filename", "sh010_light_v001.mp4"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(status(UploadStep::Ticket)).set_body_json(json!({
            "data": { "upload_type": "Attachment", "original_filename": "sh010_light_v001.mp4" },
            "links": { "upload": upload_link, "complete_upload": UPLOAD_PATH },
        })))
        .mount(site)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(status(UploadStep::Put)))
        .mount(site)
        .await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .and(body_partial_json(json!({
            "upload_info": { "upload_type": "Attachment" },
            "upload_data": { "display_name": "sh010_light_v001.mp4" },
        })))
        .respond_with(ResponseTemplate::new(status(UploadStep::Complete)))
        .mount(site)
        .await;
}

fn movie() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let movie = dir.path().join("sh010_light_v001.mp4");
    std::fs::write(&movie, b"movie bytes").unwrap();
    (dir, movie)
}

#[tokio::test]
async fn site_hosted_upload_carries_the_token() {
    let site = MockServer::start().await;
    mount_token(&site, 600, 1).await;
    mount_upload(&site, &format!("{UPLOAD_PATH}/blob?signature=abc"), None).await;
    let (_dir, movie) = movie();

    client(&site).upload(&EntityRef::new("Version", 7), &movie, "sg_uploaded_movie").await.unwrap();

    let puts = requests_with_method(&site, "PUT").await;
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].body, b"movie bytes");
    assert_eq!(puts[0].headers.get("authorization").map(|v| v.to_str().unwrap().to_string()).as_deref(), Some("Bearer tok-1"));
    assert_eq!(requests_with_method(&site, "POST").await.len(), 2);
}

#[tokio::test]
async fn presigned_upload_omits_the_token() {
    let site = MockServer::start().await;
    let storage = MockServer::start().await;
    mount_token(&site, 600, 1).await;
    mount_upload(&site, &format!("{}/bucket/sh010_light_v001.mp4?X-Amz-Signature=abc", storage.uri()), None).await;
    Mock::given(method("PUT")).respond_with(ResponseTemplate::new(200)).mount(&storage).await;
    let (_dir, movie) = movie();

    client(&site).upload(&EntityRef::new("Version", 7), &movie, "sg_uploaded_movie").await.unwrap();

    let puts = requests_with_method(&storage, "PUT").await;
    assert_eq!(puts.len(), 1);
    assert!(puts[0].headers.get("authorization").is_none());
    assert!(requests_with_method(&site, "PUT").await.is_empty());
}

async fn failed_upload(step: UploadStep) -> (TrackingError, MockServer) {
    let site = MockServer::start().await;
    mount_token(&site, 600, 1).await;
    mount_upload(&site, &format!("{UPLOAD_PATH}/blob"), Some(step)).await;
    let (_dir, movie) = movie();

    let err = client(&site).upload(&EntityRef::new("Version", 7), &movie, "sg_uploaded_movie").await.unwrap_err();
    (err, site)
}

#[tokio::test]
async fn upload_ticket_failure_stops_before_sending_bytes() {
    let (err, site) = failed_upload(UploadStep::Ticket).await;

    assert!(matches!(err, TrackingError::Status { status: 500, .. }), "{err}");
    assert!(requests_with_method(&site, "PUT").await.is_empty());
}

#[tokio::test]
async fn upload_put_failure_skips_completion() {
    let (err, site) = failed_upload(UploadStep::Put).await;

    assert!(matches!(err, TrackingError::Status { status: 500, .. }), "{err}");
    // Only the token exchange; no completion request
    assert_eq!(requests_with_method(&site, "POST").await.len(), 1);
}

#[tokio::test]
async fn upload_completion_failure_is_reported() {
    let (err, site) = failed_upload(UploadStep::Complete).await;

    assert!(matches!(err, TrackingError::Status { status: 500, .. }), "{err}");
    assert_eq!(requests_with_method(&site, "PUT").await.len(), 1);
}

#[tokio::test]
async fn created_record_returns_its_ref() {
    let site = MockServer::start().await;
    mount_token(&site, 600, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/entity/versions"))
        .and(body_partial_json(json!({ "code": "sh010_light_v001", "sg_status_list": "rev" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": 7, "type": "Version", "attributes": { "code": "sh010_light_v001" } },
        })))
        .expect(1)
        .mount(&site)
        .await;
    let draft = VersionDraft::for_review(&TrackedFile::builder().build());

    let version = client(&site).create_version(&draft).await.unwrap();

    assert_eq!(version, EntityRef::new("Version", 7));
}
