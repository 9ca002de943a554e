// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote render job description and its finalized, submittable form.

use crate::frames::{FrameError, FrameRange};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variables exposed to the render workers.
pub mod env_vars {
    /// Directory the job renders into.
    pub const OUTPUT_PATH: &str = "CONDUCTOR_OUTPUT_PATH";
    /// Bucket the finalizer mirrors outputs to.
    pub const BUCKET: &str = "CONDUCTOR_S3_BUCKET";
    /// Destination key pattern with a frame placeholder.
    pub const KEY_PATTERN: &str = "CONDUCTOR_S3_PATH";
    pub const LEGACY_RENDER_LAYERS: &str = "MAYA_ENABLE_LEGACY_RENDER_LAYERS";
}

/// Token replaced with the first frame of a task.
pub const CHUNK_START: &str = "<chunk_start>";
/// Token replaced with the last frame of a task.
pub const CHUNK_END: &str = "<chunk_end>";
/// Token replaced with the frame step of a task.
pub const CHUNK_STEP: &str = "<chunk_step>";

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Frames(#[from] FrameError),
    #[error("job '{0}' has no instance type")]
    MissingInstanceType(String),
    #[error("job '{0}' has no output path")]
    MissingOutputPath(String),
    #[error("conflicting values for environment variable {name}: '{existing}' vs '{incoming}'")]
    ConflictingEnvironment { name: String, existing: String, incoming: String },
}

/// How a package environment variable combines with earlier values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    #[default]
    Exclusive,
    Append,
}

crate::simple_display! {
    MergePolicy {
        Exclusive => "exclusive",
        Append => "append",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEnv {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub merge_policy: MergePolicy,
}

/// A software package available on the render farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub package_id: String,
    pub product: String,
    pub version: String,
    /// Set for plugins: the host application they load into.
    #[serde(default)]
    pub host_product: Option<String>,
    #[serde(default)]
    pub environment: Vec<PackageEnv>,
}

/// A compute instance class offered by the render farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceType {
    /// Machine name used in submissions, e.g. `n1-highmem-2`.
    pub name: String,
    /// Human readable label, e.g. `2 core, 13GB Mem`.
    pub description: String,
    #[serde(default)]
    pub cores: Option<u32>,
    #[serde(default)]
    pub memory_gb: Option<f64>,
}

/// What the render workers execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobTemplate {
    MayaRender { scene: String, render_layer: String },
    NukeScript { script: String, argv: String },
}

impl JobTemplate {
    /// Task command with chunk tokens still in place.
    pub fn task_command(&self, output_path: &str) -> String {
        match self {
            JobTemplate::MayaRender { scene, render_layer } => format!(
                "Render -r file -s {CHUNK_START} -e {CHUNK_END} -b {CHUNK_STEP} -rl {render_layer} -rd {output_path} {scene}"
            ),
            JobTemplate::NukeScript { script, argv } => {
                format!("nuke -F {CHUNK_START}-{CHUNK_END}x{CHUNK_STEP} -x {script} {argv}")
            }
        }
    }
}

/// Everything needed to submit a render. Built fresh per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub title: String,
    pub user: Option<String>,
    pub template: JobTemplate,
    pub frames: FrameRange,
    /// Frames per task. Zero means the whole range in a single task.
    pub chunk_size: u64,
    pub output_path: String,
    pub software_packages: Vec<Package>,
    pub instance_type: String,
    pub environment: IndexMap<String, String>,
    pub upload_paths: Vec<String>,
    pub pre_task_cmd: Option<String>,
    pub post_task_cmd: Option<String>,
    pub post_job_cmd: Option<String>,
    /// Upload from this process instead of relying on an uploader daemon.
    pub local_upload: bool,
}

impl JobDescription {
    pub fn new(title: impl Into<String>, template: JobTemplate, frames: FrameRange) -> Self {
        Self {
            title: title.into(),
            user: None,
            template,
            frames,
            chunk_size: 0,
            output_path: String::new(),
            software_packages: Vec::new(),
            instance_type: String::new(),
            environment: IndexMap::new(),
            upload_paths: Vec::new(),
            pre_task_cmd: None,
            post_task_cmd: None,
            post_job_cmd: None,
            local_upload: true,
        }
    }

    crate::setters! {
        into {
            output_path: String,
            instance_type: String,
        }
        set {
            chunk_size: u64,
            software_packages: Vec<Package>,
            local_upload: bool,
        }
        option {
            user: String,
            pre_task_cmd: String,
            post_task_cmd: String,
            post_job_cmd: String,
        }
    }

    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(name.into(), value.into());
        self
    }

    pub fn upload(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !self.upload_paths.contains(&path) {
            self.upload_paths.push(path);
        }
        self
    }

    pub fn uploads<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths.into_iter().fold(self, |job, path| job.upload(path))
    }

    /// Materialize the job: validate, merge package environments under the
    /// job environment, and expand tasks. Pre- and post-task commands wrap
    /// every task command. Only a finalized job can be submitted.
    pub fn finalize(self) -> Result<FinalizedJob, JobError> {
        self.frames.validate()?;
        if self.instance_type.trim().is_empty() {
            return Err(JobError::MissingInstanceType(self.title));
        }
        if self.output_path.trim().is_empty() {
            return Err(JobError::MissingOutputPath(self.title));
        }

        let mut merged: IndexMap<String, (String, MergePolicy)> = IndexMap::new();
        for var in self.software_packages.iter().flat_map(|p| p.environment.iter()) {
            match merged.get_mut(&var.name) {
                None => {
                    merged.insert(var.name.clone(), (var.value.clone(), var.merge_policy));
                }
                Some((existing, MergePolicy::Append)) if var.merge_policy == MergePolicy::Append => {
                    existing.push(':');
                    existing.push_str(&var.value);
                }
                Some((existing, _)) if *existing == var.value => {}
                Some((existing, _)) => {
                    return Err(JobError::ConflictingEnvironment {
                        name: var.name.clone(),
                        existing: existing.clone(),
                        incoming: var.value.clone(),
                    });
                }
            }
        }
        let mut environment: IndexMap<String, String> =
            merged.into_iter().map(|(name, (value, _))| (name, value)).collect();
        for (name, value) in &self.environment {
            environment.insert(name.clone(), value.clone());
        }

        let chunk_size = if self.chunk_size == 0 { self.frames.len() } else { self.chunk_size };
        let command = [
            self.pre_task_cmd.clone(),
            Some(self.template.task_command(&self.output_path)),
            self.post_task_cmd.clone(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" && ");
        let tasks = self
            .frames
            .chunks(chunk_size)
            .into_iter()
            .map(|frames| TaskSpec {
                command: command
                    .replace(CHUNK_START, &frames.start.to_string())
                    .replace(CHUNK_END, &frames.end.to_string())
                    .replace(CHUNK_STEP, &frames.step.to_string()),
                frames,
            })
            .collect();

        Ok(FinalizedJob { description: self, environment, tasks })
    }
}

/// One unit of work on the farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub frames: FrameRange,
    pub command: String,
}

/// A job whose environment and tasks have been materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedJob {
    description: JobDescription,
    environment: IndexMap<String, String>,
    tasks: Vec<TaskSpec>,
}

impl FinalizedJob {
    pub fn description(&self) -> &JobDescription {
        &self.description
    }

    /// Package environment merged with the job environment.
    pub fn environment(&self) -> &IndexMap<String, String> {
        &self.environment
    }

    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    pub fn package_ids(&self) -> Vec<&str> {
        self.description.software_packages.iter().map(|p| p.package_id.as_str()).collect()
    }
}

/// Returned by the farm on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub job_id: String,
    #[serde(default)]
    pub uri: Option<String>,
}

impl std::fmt::Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.uri {
            Some(uri) => write!(f, "{} ({})", self.job_id, uri),
            None => f.write_str(&self.job_id),
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
