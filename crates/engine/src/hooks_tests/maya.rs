// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sgf_adapters::FakeTrackingStore;
use sgf_core::EntityRef;

const SCENE: &str = "/projects/demo/sh010/light/sh010_light_v001.mb";
const OUTPUT_DIR: &str = "/projects/renders/sh010_light_v001_42_20261015-093005";

async fn build(harness: &TestHarness, dependencies: &[&str]) -> FarmPlan {
    let record = TrackedFile::builder().build();
    let plan = MayaRenderHook::new(harness.settings.clone())
        .build_job(&harness.context(&record, dependencies))
        .await
        .unwrap();
    farm_plan_of(plan)
}

#[tokio::test]
async fn renders_the_shot_range_in_one_task() {
    let plan = build(&setup(), &[SCENE]).await;
    let job = plan.job.description();

    assert_eq!(job.frames, FrameRange::new(1001, 1010));
    assert_eq!(job.frames.step, 1);
    assert_eq!(job.title, "[SG Daemon] - sh010_light_v001");
    assert_eq!(job.user.as_deref(), Some("artist"));
    assert_eq!(plan.job.tasks().len(), 1);
    assert_eq!(
        plan.job.tasks()[0].command,
        format!(
            "Render -r file -s 1001 -e 1010 -b 1 -rl defaultRenderLayer -rd {OUTPUT_DIR} {SCENE} \
             && sh /usr/local/shotgun/support_files/post_render.sh"
        )
    );
    assert_eq!(job.post_job_cmd.as_deref(), Some("sh /usr/local/shotgun/support_files/register_publish.sh"));
}

#[tokio::test]
async fn resolves_host_and_plugin_packages() {
    let plan = build(&setup(), &[SCENE]).await;

    assert_eq!(plan.job.package_ids(), vec!["maya-2018.1", "vray-3.60.04"]);
    assert_eq!(plan.job.description().instance_type, "n1-highmem-2");
}

#[tokio::test]
async fn exposes_output_contract_to_workers() {
    let plan = build(&setup(), &[SCENE]).await;
    let env = plan.job.environment();

    assert_eq!(plan.output_pattern, format!("{OUTPUT_DIR}/sh010_light_v001.%05d.exr"));
    assert_eq!(env["CONDUCTOR_OUTPUT_PATH"], OUTPUT_DIR);
    assert_eq!(env["CONDUCTOR_S3_BUCKET"], "project-bucket");
    assert_eq!(
        env["CONDUCTOR_S3_PATH"],
        "projects/renders/sh010_light_v001_42_20261015-093005/sh010_light_v001.%05d.exr"
    );
    assert_eq!(env["MAYA_ENABLE_LEGACY_RENDER_LAYERS"], "1");
}

#[tokio::test]
async fn uploads_scene_dependencies_and_support_files() {
    let plan = build(&setup(), &[SCENE, "/projects/demo/assets/tree.abc"]).await;

    assert_eq!(
        plan.job.description().upload_paths,
        vec![
            SCENE,
            "/projects/demo/assets/tree.abc",
            "/usr/local/shotgun/support_files/post_render.sh",
            "/usr/local/shotgun/support_files/register_publish.sh",
            "/tmp/published_file.json",
        ]
    );
    assert_eq!(plan.descriptor_path, PathBuf::from("/tmp/published_file.json"));
}

#[tokio::test]
async fn unresolved_plugin_is_fatal() {
    let mut harness = setup();
    harness.settings.maya.plugin = PackageSpec::plugin("redshift-maya", "2.6", "maya-io");

    let record = TrackedFile::builder().build();
    let err = MayaRenderHook::new(harness.settings.clone())
        .build_job(&harness.context(&record, &[]))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "no software package matches redshift-maya 2.6 (plugin for maya-io)");
}

#[tokio::test]
async fn dependencies_follow_downstream_links() {
    let tracking = FakeTrackingStore::new();
    let scene = TrackedFile::builder().id(1).downstream(vec![EntityRef::published_file(2)]).build();
    tracking.add_file(scene.clone());
    tracking.add_file(
        TrackedFile::builder()
            .id(2)
            .path(sgf_core::FilePath::linux("/projects/demo/assets/tree.abc"))
            .build(),
    );
    let resolver = DependencyResolver::new(Arc::new(tracking));

    let paths = MayaRenderHook::new(Settings::default()).get_dependencies(&scene, &resolver).await.unwrap();

    assert_eq!(paths, vec![SCENE, "/projects/demo/assets/tree.abc"]);
}
