// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Nuke precomp of a light render over the shot plate.

use super::{farm_job, farm_plan, Eligibility, JobContext, JobPlan, PublishHook};
use crate::config::Settings;
use crate::error::EngineError;
use crate::resolver::DependencyResolver;
use async_trait::async_trait;
use sgf_core::{JobTemplate, TrackedFile};

const FILE_TYPE: &str = "Image";
const EXTENSIONS: &[&str] = &["exr"];
const STEP: &str = "Light";

pub struct NukePrecompHook {
    settings: Settings,
}

impl NukePrecompHook {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl PublishHook for NukePrecompHook {
    fn name(&self) -> &'static str {
        "submit-nuke"
    }

    fn evaluate_eligibility(&self, record: &TrackedFile) -> Eligibility {
        Eligibility::check(record, FILE_TYPE, EXTENSIONS, Some(STEP))
    }

    async fn get_dependencies(
        &self,
        record: &TrackedFile,
        _resolver: &DependencyResolver,
    ) -> Result<Vec<String>, EngineError> {
        let render = record.linux_path().ok_or_else(|| EngineError::MissingPath(record.label().to_string()))?;
        Ok(vec![render.to_string(), self.settings.nuke.plate.clone()])
    }

    async fn build_job(&self, ctx: &JobContext<'_>) -> Result<JobPlan, EngineError> {
        let nuke = &self.settings.nuke;
        let render = ctx.local(ctx.record_path()?);
        let plate = ctx.local(&nuke.plate);
        let output_pattern = ctx.output_pattern("_precomp");
        let template = JobTemplate::NukeScript {
            script: nuke.template.clone(),
            argv: format!("{plate} {render} {output_pattern}"),
        };

        let job = farm_job(&self.settings, ctx, template, &output_pattern, std::slice::from_ref(&nuke.host)).await?;
        let mkdir = format!("mkdir -p {}", job.output_path);
        let job = job
            .pre_task_cmd(mkdir)
            .upload(nuke.template.clone())
            .uploads(ctx.dependencies.iter().map(|p| p.display().to_string()));
        farm_plan(&self.settings, job, output_pattern)
    }
}
