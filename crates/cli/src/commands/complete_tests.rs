// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn explicit_descriptor_wins() {
    let args = DescriptorArgs { descriptor: Some(PathBuf::from("/scratch/publish.json")) };
    let missing = PathBuf::from("/nonexistent/sgf.toml");

    assert_eq!(args.resolve(Some(&missing)).unwrap(), PathBuf::from("/scratch/publish.json"));
}

#[test]
fn descriptor_falls_back_to_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sgf.toml");
    std::fs::write(&path, "descriptor_path = \"/farm/published_file.json\"\n").unwrap();

    let resolved = DescriptorArgs { descriptor: None }.resolve(Some(&path)).unwrap();

    assert_eq!(resolved, PathBuf::from("/farm/published_file.json"));
}

#[test]
fn unreadable_settings_is_an_error() {
    let missing = PathBuf::from("/nonexistent/sgf.toml");
    assert!(DescriptorArgs { descriptor: None }.resolve(Some(&missing)).is_err());
}
