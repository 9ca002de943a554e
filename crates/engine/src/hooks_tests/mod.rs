// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod maya;
mod nuke;
mod review;

use super::*;
use sgf_adapters::{FakeObjectStore, FakeRenderFarm};
use sgf_core::Package;
use std::sync::Arc;

const DESTINATION: &str = "projects/renders/sh010_light_v001_42_20261015-093005";

pub(super) fn package(id: &str, product: &str, version: &str, host: Option<&str>) -> Package {
    Package {
        package_id: id.to_string(),
        product: product.to_string(),
        version: version.to_string(),
        host_product: host.map(str::to_string),
        environment: Vec::new(),
    }
}

pub(super) struct TestHarness {
    pub settings: Settings,
    pub mirror: Mirror,
    pub farm: FakeRenderFarm,
}

pub(super) fn setup() -> TestHarness {
    let farm = FakeRenderFarm::new();
    farm.add_package(package("maya-2018.1", "maya-io", "2018.1", None));
    farm.add_package(package("vray-3.60.04", "v-ray-maya", "3.60.04", Some("maya-io")));
    farm.add_package(package("nuke-11.3v5", "nuke", "11.3v5", None));
    farm.add_instance_type("n1-highmem-2", "2 core, 13GB Mem");

    TestHarness {
        settings: Settings::default(),
        mirror: Mirror::new(Arc::new(FakeObjectStore::default()), "/"),
        farm,
    }
}

impl TestHarness {
    pub fn context<'a>(&'a self, record: &'a TrackedFile, dependencies: &[&str]) -> JobContext<'a> {
        JobContext {
            record,
            frames: FrameRange::new(1001, 1010),
            title: self.settings.job_title(&record.code),
            destination: DESTINATION.to_string(),
            dependencies: dependencies.iter().map(PathBuf::from).collect(),
            mirror: &self.mirror,
            farm: Some(&self.farm),
        }
    }
}

pub(super) fn farm_plan_of(plan: JobPlan) -> FarmPlan {
    match plan {
        JobPlan::Farm(plan) => plan,
        JobPlan::Review(plan) => panic!("expected a farm plan, got {plan:?}"),
    }
}

fn record(file_type: &str, path: &str, step: &str) -> TrackedFile {
    TrackedFile::builder()
        .file_type(file_type)
        .path(sgf_core::FilePath::linux(path))
        .step(step)
        .build()
}

#[yare::parameterized(
    maya_scene_mb   = { "submit-maya", "Maya Scene", "/p/sh010.mb", "Light", true },
    maya_scene_ma   = { "submit-maya", "Maya Scene", "/p/sh010.ma", "Light", true },
    maya_wrong_step = { "submit-maya", "Maya Scene", "/p/sh010.mb", "Anim", false },
    maya_wrong_type = { "submit-maya", "Image", "/p/sh010.mb", "Light", false },
    maya_wrong_ext  = { "submit-maya", "Maya Scene", "/p/sh010.abc", "Light", false },
    nuke_exr        = { "submit-nuke", "Image", "/p/sh010.%05d.exr", "Light", true },
    nuke_mov        = { "submit-nuke", "Image", "/p/sh010.mov", "Light", false },
    nuke_wrong_step = { "submit-nuke", "Image", "/p/sh010.%05d.exr", "Comp", false },
    review_exr      = { "create-version", "Image", "/p/sh010.%05d.exr", "Comp", true },
    review_mov      = { "create-version", "Image", "/p/sh010.mov", "Light", false },
    review_no_ext   = { "create-version", "Image", "/p/sh010", "Light", false },
)]
fn eligibility(hook: &str, file_type: &str, path: &str, step: &str, eligible: bool) {
    let hook = hook_by_name(hook, &Settings::default()).unwrap();
    let outcome = hook.evaluate_eligibility(&record(file_type, path, step));
    assert_eq!(outcome == Eligibility::Eligible, eligible, "{outcome:?}");
}

#[test]
fn skip_reason_names_the_mismatch() {
    let outcome = Eligibility::check(&record("Image", "/p/sh010.mov", "Light"), "Image", &["exr"], Some("Light"));
    assert_eq!(outcome, Eligibility::Skip("extension 'mov' is not one of [\"exr\"]".to_string()));
}

#[test]
fn missing_file_type_is_ineligible() {
    let record = TrackedFile { file_type: None, ..record("Image", "/p/sh010.%05d.exr", "Light") };
    assert!(matches!(Eligibility::check(&record, "Image", &["exr"], None), Eligibility::Skip(_)));
}

#[test]
fn hooks_in_dispatch_order() {
    let names: Vec<_> = all_hooks(&Settings::default()).iter().map(|h| h.name()).collect();
    assert_eq!(names, vec!["submit-maya", "submit-nuke", "create-version"]);
}

#[test]
fn unknown_hook_name() {
    assert!(hook_by_name("submit-houdini", &Settings::default()).is_none());
}

#[test]
fn hooks_listen_for_new_published_files() {
    for hook in all_hooks(&Settings::default()) {
        assert_eq!(hook.event_types(), &[PUBLISHED_FILE_NEW]);
    }
}

#[test]
fn output_pattern_lives_under_destination() {
    let harness = setup();
    let record = TrackedFile::builder().code("sh010_light_v001".to_string()).build();
    let ctx = harness.context(&record, &[]);

    assert_eq!(
        ctx.output_pattern("_precomp"),
        "/projects/renders/sh010_light_v001_42_20261015-093005/sh010_light_v001_precomp.%05d.exr"
    );
}

#[tokio::test]
async fn farm_hook_without_farm_is_a_config_error() {
    let harness = setup();
    let record = record("Maya Scene", "/p/sh010.mb", "Light");
    let ctx = JobContext { farm: None, ..harness.context(&record, &[]) };

    let err = MayaRenderHook::new(Settings::default()).build_job(&ctx).await.unwrap_err();

    assert_eq!(err.to_string(), "configuration error: environment variable CONDUCTOR_API_KEY is not set");
}

#[tokio::test]
async fn unknown_instance_type_is_fatal() {
    let harness = setup();
    let settings = Settings { instance_type: "64 core, 1TB Mem".to_string(), ..Settings::default() };
    let record = record("Maya Scene", "/p/sh010.mb", "Light");

    let err = MayaRenderHook::new(settings).build_job(&harness.context(&record, &[])).await.unwrap_err();

    assert!(matches!(err, EngineError::UnresolvedInstanceType(label) if label == "64 core, 1TB Mem"));
}

#[tokio::test]
async fn extra_environment_reaches_the_job() {
    let harness = setup();
    let mut settings = Settings::default();
    settings.environment.insert("OCIO".to_string(), "/studio/ocio/config.ocio".to_string());
    let record = record("Maya Scene", "/p/sh010.mb", "Light");

    let plan = farm_plan_of(MayaRenderHook::new(settings).build_job(&harness.context(&record, &[])).await.unwrap());

    assert_eq!(plan.job.environment().get("OCIO").map(String::as_str), Some("/studio/ocio/config.ocio"));
}
