// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn maya_template() -> JobTemplate {
    JobTemplate::MayaRender {
        scene: "/projects/sh010_light_v001.mb".to_string(),
        render_layer: "defaultRenderLayer".to_string(),
    }
}

fn package(id: &str, env: &[(&str, &str, MergePolicy)]) -> Package {
    Package {
        package_id: id.to_string(),
        product: "maya-io".to_string(),
        version: "2018.1".to_string(),
        host_product: None,
        environment: env
            .iter()
            .map(|(name, value, merge_policy)| PackageEnv {
                name: name.to_string(),
                value: value.to_string(),
                merge_policy: *merge_policy,
            })
            .collect(),
    }
}

fn job() -> JobDescription {
    JobDescription::new("sh010_light_v001", maya_template(), FrameRange::new(1001, 1010))
        .output_path("/projects/renders/sh010")
        .instance_type("n1-highmem-2")
}

#[test]
fn whole_range_is_a_single_task() {
    let finalized = job().finalize().unwrap();

    assert_eq!(finalized.tasks().len(), 1);
    let task = &finalized.tasks()[0];
    assert_eq!(task.frames, FrameRange::new(1001, 1010));
    assert_eq!(
        task.command,
        "Render -r file -s 1001 -e 1010 -b 1 -rl defaultRenderLayer -rd /projects/renders/sh010 /projects/sh010_light_v001.mb"
    );
}

#[test]
fn task_hooks_wrap_the_command() {
    let finalized = job()
        .pre_task_cmd("mkdir -p /projects/renders/sh010")
        .post_task_cmd("sh /support/post_render.sh")
        .post_job_cmd("sh /support/register_publish.sh")
        .finalize()
        .unwrap();

    let command = &finalized.tasks()[0].command;
    assert!(command.starts_with("mkdir -p /projects/renders/sh010 && Render "));
    assert!(command.ends_with(" && sh /support/post_render.sh"));
    assert!(!command.contains("register_publish"));
}

#[test]
fn explicit_chunk_size_splits_tasks() {
    let finalized = job().chunk_size(4).finalize().unwrap();
    let frames: Vec<_> = finalized.tasks().iter().map(|t| t.frames).collect();
    assert_eq!(
        frames,
        vec![FrameRange::new(1001, 1004), FrameRange::new(1005, 1008), FrameRange::new(1009, 1010)]
    );
}

#[test]
fn nuke_command_substitutes_chunk_tokens() {
    let template = JobTemplate::NukeScript {
        script: "/support/nuke_template.nk".to_string(),
        argv: "/plates/p.%05d.exr /renders/r.%05d.exr /out/o.%05d.exr".to_string(),
    };
    let finalized = JobDescription::new("precomp", template, FrameRange::new(1, 5))
        .output_path("/out")
        .instance_type("n1-standard-4")
        .finalize()
        .unwrap();

    assert_eq!(
        finalized.tasks()[0].command,
        "nuke -F 1-5x1 -x /support/nuke_template.nk /plates/p.%05d.exr /renders/r.%05d.exr /out/o.%05d.exr"
    );
}

#[test]
fn package_env_appends_and_job_env_overrides() {
    let finalized = job()
        .software_packages(vec![
            package("maya", &[("PATH", "/maya/bin", MergePolicy::Append), ("MAYA_LOCATION", "/maya", MergePolicy::Exclusive)]),
            package("vray", &[("PATH", "/vray/bin", MergePolicy::Append), ("MAYA_LOCATION", "/maya", MergePolicy::Exclusive)]),
        ])
        .env("MAYA_LOCATION", "/opt/maya")
        .env(env_vars::LEGACY_RENDER_LAYERS, "1")
        .finalize()
        .unwrap();

    let env = finalized.environment();
    assert_eq!(env.get("PATH").map(String::as_str), Some("/maya/bin:/vray/bin"));
    assert_eq!(env.get("MAYA_LOCATION").map(String::as_str), Some("/opt/maya"));
    assert_eq!(env.get(env_vars::LEGACY_RENDER_LAYERS).map(String::as_str), Some("1"));
    assert_eq!(finalized.package_ids(), vec!["maya", "vray"]);
}

#[test]
fn conflicting_exclusive_env_is_rejected() {
    let err = job()
        .software_packages(vec![
            package("a", &[("MAYA_LOCATION", "/a", MergePolicy::Exclusive)]),
            package("b", &[("MAYA_LOCATION", "/b", MergePolicy::Exclusive)]),
        ])
        .finalize()
        .unwrap_err();

    assert!(matches!(err, JobError::ConflictingEnvironment { ref name, .. } if name == "MAYA_LOCATION"));
}

#[yare::parameterized(
    reversed_range = { FrameRange::new(1010, 1001), "n1-highmem-2", "/out" },
    zero_step      = { FrameRange::new(1, 10).with_step(0), "n1-highmem-2", "/out" },
    no_instance    = { FrameRange::new(1, 10), "", "/out" },
    no_output      = { FrameRange::new(1, 10), "n1-highmem-2", "" },
)]
fn invalid_jobs_do_not_finalize(frames: FrameRange, instance: &str, output: &str) {
    let result = JobDescription::new("bad", maya_template(), frames)
        .instance_type(instance)
        .output_path(output)
        .finalize();
    assert!(result.is_err());
}

#[test]
fn uploads_are_deduplicated_in_order() {
    let job = job().uploads(["/a.mb", "/b.py", "/a.mb"]).upload("/c.json");
    assert_eq!(job.upload_paths, vec!["/a.mb", "/b.py", "/c.json"]);
}

#[test]
fn package_parses_with_default_merge_policy() {
    let package: Package = serde_json::from_value(serde_json::json!({
        "package_id": "abc",
        "product": "v-ray-maya",
        "version": "3.60.04",
        "host_product": "maya-io",
        "environment": [{"name": "VRAY_PATH", "value": "/vray"}]
    }))
    .unwrap();
    assert_eq!(package.environment[0].merge_policy, MergePolicy::Exclusive);
    assert_eq!(package.host_product.as_deref(), Some("maya-io"));
}

#[test]
fn handle_display_includes_uri() {
    let handle = JobHandle { job_id: "00042".to_string(), uri: Some("/job/00042".to_string()) };
    assert_eq!(handle.to_string(), "00042 (/job/00042)");
}
