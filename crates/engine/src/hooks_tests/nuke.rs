// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const RENDER: &str = "/projects/renders/sh010_light_v001.%05d.exr";
const OUTPUT: &str = "/projects/renders/sh010_light_v001_42_20261015-093005/sh010_light_v001_precomp.%05d.exr";

fn light_render() -> TrackedFile {
    TrackedFile::builder()
        .file_type("Image")
        .path(sgf_core::FilePath::linux(RENDER))
        .build()
}

#[tokio::test]
async fn depends_on_render_and_plate() {
    let resolver = DependencyResolver::new(Arc::new(sgf_adapters::FakeTrackingStore::new()));

    let paths = NukePrecompHook::new(Settings::default()).get_dependencies(&light_render(), &resolver).await.unwrap();

    assert_eq!(paths, vec![RENDER, "/projects/generic_plate.%05d.exr"]);
}

#[tokio::test]
async fn comps_render_over_plate() {
    let harness = setup();
    let record = light_render();
    let frames = ["/projects/renders/sh010_light_v001.01001.exr", "/projects/generic_plate.01001.exr"];

    let plan = NukePrecompHook::new(harness.settings.clone())
        .build_job(&harness.context(&record, &frames))
        .await
        .unwrap();
    let plan = farm_plan_of(plan);
    let job = plan.job.description();

    assert_eq!(plan.output_pattern, OUTPUT);
    assert_eq!(plan.job.package_ids(), vec!["nuke-11.3v5"]);
    assert_eq!(job.pre_task_cmd.as_deref(), Some("mkdir -p /projects/renders/sh010_light_v001_42_20261015-093005"));
    assert_eq!(
        plan.job.tasks()[0].command,
        format!(
            "mkdir -p /projects/renders/sh010_light_v001_42_20261015-093005 \
             && nuke -F 1001-1010x1 -x /usr/local/shotgun/support_files/nuke_template.nk \
             /projects/generic_plate.%05d.exr {RENDER} {OUTPUT} \
             && sh /usr/local/shotgun/support_files/post_render.sh"
        )
    );
    assert!(!plan.job.environment().contains_key("MAYA_ENABLE_LEGACY_RENDER_LAYERS"));
}

#[tokio::test]
async fn uploads_template_and_mirrored_frames() {
    let harness = setup();
    let record = light_render();
    let frames = ["/projects/renders/sh010_light_v001.01001.exr", "/projects/generic_plate.01001.exr"];

    let plan = farm_plan_of(
        NukePrecompHook::new(harness.settings.clone())
            .build_job(&harness.context(&record, &frames))
            .await
            .unwrap(),
    );

    assert_eq!(
        plan.job.description().upload_paths,
        vec![
            "/usr/local/shotgun/support_files/nuke_template.nk",
            "/projects/renders/sh010_light_v001.01001.exr",
            "/projects/generic_plate.01001.exr",
            "/usr/local/shotgun/support_files/post_render.sh",
            "/usr/local/shotgun/support_files/register_publish.sh",
            "/tmp/published_file.json",
        ]
    );
}
