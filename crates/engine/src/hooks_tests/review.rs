// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::hooks::review::movie_basename;

#[yare::parameterized(
    sequence       = { "/projects/renders/sh010_light_v001.%05d.exr", "sh010_light_v001" },
    dotted_name    = { "/projects/sh010.light.v001.%05d.exr", "sh010.light.v001" },
    single_suffix  = { "/projects/sh010_light_v001.exr", "sh010_light_v001" },
    no_suffix      = { "/projects/sh010_light_v001", "sh010_light_v001" },
    relative       = { "sh010.%04d.exr", "sh010" },
)]
fn basename(path: &str, expected: &str) {
    assert_eq!(movie_basename(path), expected);
}

#[tokio::test]
async fn plans_movie_from_sequence() {
    let harness = setup();
    let record = TrackedFile::builder()
        .id(42)
        .code("sh010_light_v001".to_string())
        .file_type("Image")
        .path(sgf_core::FilePath::linux("/projects/renders/sh010_light_v001.%05d.exr"))
        .build();

    let plan = ReviewVersionHook::new(Settings::default()).build_job(&harness.context(&record, &[])).await.unwrap();

    let JobPlan::Review(plan) = plan else {
        panic!("expected a review plan");
    };
    assert_eq!(plan.sequence, "/projects/renders/sh010_light_v001.%05d.exr");
    assert_eq!(plan.movie, PathBuf::from("/tmp/sh010_light_v001.mp4"));
    assert_eq!(plan.start_frame, 1001);
    assert_eq!(plan.fps, 24);
    assert_eq!(plan.draft, VersionDraft::for_review(&record));
}

#[tokio::test]
async fn review_needs_no_farm() {
    let harness = setup();
    let record = TrackedFile::builder().file_type("Image").path(sgf_core::FilePath::linux("/p/a.%05d.exr")).build();
    let ctx = JobContext { farm: None, ..harness.context(&record, &[]) };

    let plan = ReviewVersionHook::new(Settings::default()).build_job(&ctx).await.unwrap();

    assert!(matches!(plan, JobPlan::Review(_)));
}
