// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! V-Ray render of a lighting scene.

use super::{farm_job, farm_plan, Eligibility, JobContext, JobPlan, PublishHook};
use crate::config::Settings;
use crate::error::EngineError;
use crate::resolver::DependencyResolver;
use async_trait::async_trait;
use sgf_core::{env_vars, JobTemplate, TrackedFile};

const FILE_TYPE: &str = "Maya Scene";
const EXTENSIONS: &[&str] = &["ma", "mb"];
const STEP: &str = "Light";

pub struct MayaRenderHook {
    settings: Settings,
}

impl MayaRenderHook {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl PublishHook for MayaRenderHook {
    fn name(&self) -> &'static str {
        "submit-maya"
    }

    fn evaluate_eligibility(&self, record: &TrackedFile) -> Eligibility {
        Eligibility::check(record, FILE_TYPE, EXTENSIONS, Some(STEP))
    }

    /// The scene and everything reachable through its downstream links.
    async fn get_dependencies(
        &self,
        record: &TrackedFile,
        resolver: &DependencyResolver,
    ) -> Result<Vec<String>, EngineError> {
        let files = resolver.expand(&[record.entity_ref()]).await?;
        Ok(files.iter().filter_map(|f| f.linux_path()).map(str::to_string).collect())
    }

    async fn build_job(&self, ctx: &JobContext<'_>) -> Result<JobPlan, EngineError> {
        let maya = &self.settings.maya;
        let scene = ctx.local(ctx.record_path()?);
        let output_pattern = ctx.output_pattern("");
        let template = JobTemplate::MayaRender { scene: scene.clone(), render_layer: maya.render_layer.clone() };

        let job = farm_job(&self.settings, ctx, template, &output_pattern, &[maya.host.clone(), maya.plugin.clone()])
            .await?
            .env(env_vars::LEGACY_RENDER_LAYERS, "1")
            .upload(scene)
            .uploads(ctx.dependencies.iter().map(|p| p.display().to_string()));
        farm_plan(&self.settings, job, output_pattern)
    }
}
