// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publish hooks: one per job type.
//!
//! A hook decides whether a freshly published file concerns it, names the
//! tracked paths it needs mirrored, and turns the record into a plan. The
//! dispatcher owns all side effects; hooks only describe what to do.

mod maya;
mod nuke;
mod review;

pub use maya::MayaRenderHook;
pub use nuke::NukePrecompHook;
pub use review::ReviewVersionHook;

use crate::config::Settings;
use crate::error::EngineError;
use crate::mirror::Mirror;
use crate::registry::{PackageRegistry, PackageSpec};
use crate::resolver::DependencyResolver;
use async_trait::async_trait;
use sgf_adapters::RenderFarm;
use sgf_core::{
    env_vars, FinalizedJob, FrameRange, JobDescription, JobTemplate, TrackedFile, VersionDraft,
    PUBLISHED_FILE_NEW,
};
use std::path::PathBuf;

/// Result of the eligibility predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Skip(String),
}

impl Eligibility {
    /// Exact match on file type, extension and (optionally) pipeline step.
    pub fn check(record: &TrackedFile, file_type: &str, extensions: &[&str], step: Option<&str>) -> Self {
        let actual_type = record.file_type.as_deref().unwrap_or_default();
        if actual_type != file_type {
            return Self::Skip(format!("file type '{actual_type}' is not '{file_type}'"));
        }
        let extension = record.extension();
        if !extensions.contains(&extension) {
            return Self::Skip(format!("extension '{extension}' is not one of {extensions:?}"));
        }
        if let Some(step) = step {
            let actual_step = record.step.as_deref().unwrap_or_default();
            if actual_step != step {
                return Self::Skip(format!("step '{actual_step}' is not '{step}'"));
            }
        }
        Self::Eligible
    }
}

/// Everything a hook needs to build its plan for one eligible record
pub struct JobContext<'a> {
    pub record: &'a TrackedFile,
    pub frames: FrameRange,
    pub title: String,
    /// Bucket prefix unique to this submission, without a leading `/`.
    pub destination: String,
    /// Local files mirrored for the hook's dependencies.
    pub dependencies: Vec<PathBuf>,
    pub mirror: &'a Mirror,
    pub farm: Option<&'a dyn RenderFarm>,
}

impl JobContext<'_> {
    /// Tracked output pattern for the rendered frames.
    pub fn output_pattern(&self, suffix: &str) -> String {
        format!("/{}/{}{}.%05d.exr", self.destination, self.record.code, suffix)
    }

    /// Local form of a tracked path.
    pub fn local(&self, path: &str) -> String {
        self.mirror.local_path(path).display().to_string()
    }

    pub fn record_path(&self) -> Result<&str, EngineError> {
        self.record.linux_path().ok_or_else(|| EngineError::MissingPath(self.record.label().to_string()))
    }

    fn farm(&self) -> Result<&dyn RenderFarm, EngineError> {
        self.farm.ok_or_else(EngineError::no_farm)
    }
}

/// A render job ready for submission
#[derive(Debug, Clone)]
pub struct FarmPlan {
    pub job: FinalizedJob,
    pub output_pattern: String,
    pub descriptor_path: PathBuf,
}

/// A local transcode followed by a review version
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPlan {
    pub sequence: String,
    pub movie: PathBuf,
    pub start_frame: i64,
    pub fps: u32,
    pub draft: VersionDraft,
}

#[derive(Debug, Clone)]
pub enum JobPlan {
    Farm(FarmPlan),
    Review(ReviewPlan),
}

#[async_trait]
pub trait PublishHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn event_types(&self) -> &[&'static str] {
        &[PUBLISHED_FILE_NEW]
    }

    fn evaluate_eligibility(&self, record: &TrackedFile) -> Eligibility;

    /// Tracked paths to mirror locally before the plan is built.
    async fn get_dependencies(
        &self,
        record: &TrackedFile,
        resolver: &DependencyResolver,
    ) -> Result<Vec<String>, EngineError>;

    async fn build_job(&self, ctx: &JobContext<'_>) -> Result<JobPlan, EngineError>;
}

/// Every hook, in dispatch order
pub fn all_hooks(settings: &Settings) -> Vec<Box<dyn PublishHook>> {
    vec![
        Box::new(MayaRenderHook::new(settings.clone())),
        Box::new(NukePrecompHook::new(settings.clone())),
        Box::new(ReviewVersionHook::new(settings.clone())),
    ]
}

pub fn hook_by_name(name: &str, settings: &Settings) -> Option<Box<dyn PublishHook>> {
    all_hooks(settings).into_iter().find(|hook| hook.name() == name)
}

/// The part of a farm job every render hook shares: packages, instance
/// type, the remote environment, support files and the completion hooks.
async fn farm_job(
    settings: &Settings,
    ctx: &JobContext<'_>,
    template: JobTemplate,
    output_pattern: &str,
    packages: &[PackageSpec],
) -> Result<JobDescription, EngineError> {
    let registry = PackageRegistry::fetch(ctx.farm()?).await?;
    let packages = registry.resolve_all(packages)?;
    let instance_type = registry.resolve_instance_type(&settings.instance_type)?;
    let output_dir = output_pattern.rsplit_once('/').map_or("/", |(dir, _)| if dir.is_empty() { "/" } else { dir });
    let support = &settings.support_files;

    let mut job = JobDescription::new(ctx.title.clone(), template, ctx.frames)
        .output_path(output_dir)
        .instance_type(instance_type)
        .software_packages(packages)
        .env(env_vars::OUTPUT_PATH, output_dir)
        .env(env_vars::BUCKET, ctx.mirror.bucket())
        .env(env_vars::KEY_PATTERN, Mirror::key_for(output_pattern))
        .post_task_cmd(support.post_render_cmd())
        .post_job_cmd(support.register_publish_cmd());
    for (name, value) in &settings.environment {
        job = job.env(name.as_str(), value.as_str());
    }
    if let Some(login) = &ctx.record.created_by_login {
        job = job.user(login.as_str());
    }
    Ok(job)
}

/// Finish a farm job: support files and the descriptor ride along with it.
fn farm_plan(settings: &Settings, job: JobDescription, output_pattern: String) -> Result<JobPlan, EngineError> {
    let descriptor_path = settings.descriptor_path.clone();
    let job = job
        .uploads(settings.support_files.paths())
        .upload(descriptor_path.display().to_string())
        .finalize()?;
    Ok(JobPlan::Farm(FarmPlan { job, output_pattern, descriptor_path }))
}

#[cfg(test)]
#[path = "../hooks_tests/mod.rs"]
mod tests;
