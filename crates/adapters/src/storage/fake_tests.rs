// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn lists_by_prefix_in_key_order() {
    let store = FakeObjectStore::default();
    store.put("projects/renders/a.00002.exr", "2");
    store.put("projects/renders/a.00001.exr", "1");
    store.put("projects/plates/p.00001.exr", "p");

    let keys = store.list_keys("projects/renders/a.").await.unwrap();
    assert_eq!(keys, vec!["projects/renders/a.00001.exr", "projects/renders/a.00002.exr"]);
}

#[tokio::test]
async fn download_missing_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = FakeObjectStore::default();
    let err = store.download("nope", &dir.path().join("nope")).await.unwrap_err();
    assert!(matches!(err, StorageError::Download { .. }));
    assert!(store.downloads().is_empty());
}

#[tokio::test]
async fn upload_then_download_round_trips_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("frame.00001.exr");
    std::fs::write(&src, b"pixels").unwrap();
    let store = FakeObjectStore::new("renders");

    store.upload(&src, "out/frame.00001.exr").await.unwrap();
    let dest = dir.path().join("copy.exr");
    store.download("out/frame.00001.exr", &dest).await.unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), b"pixels");
    assert_eq!(store.bucket(), "renders");
    assert_eq!(store.uploads(), vec![(src, "out/frame.00001.exr".to_string())]);
}

#[tokio::test]
async fn injected_failure_blocks_upload() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("frame.00001.exr");
    std::fs::write(&src, b"pixels").unwrap();
    let store = FakeObjectStore::default();
    store.fail_key("out/frame.00001.exr");

    let err = store.upload(&src, "out/frame.00001.exr").await.unwrap_err();
    assert!(matches!(err, StorageError::Upload { .. }));
    assert!(store.get("out/frame.00001.exr").is_none());
}

#[tokio::test]
async fn interrupted_download_leaves_half_the_object() {
    let dir = tempfile::tempdir().unwrap();
    let store = FakeObjectStore::default();
    store.put("renders/a.00001.exr", "12345678");
    store.interrupt_once("renders/a.00001.exr");
    let dest = dir.path().join("a.00001.exr");

    let err = store.download("renders/a.00001.exr", &dest).await.unwrap_err();
    assert!(matches!(err, StorageError::Download { .. }));
    assert_eq!(std::fs::read(&dest).unwrap(), b"1234");
    assert!(store.downloads().is_empty());

    store.download("renders/a.00001.exr", &dest).await.unwrap();
    assert_eq!(std::fs::read(&dest).unwrap(), b"12345678");
}
