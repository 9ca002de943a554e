// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event dispatch: one event in, one outcome per hook.
//!
//! Ineligible records are skipped quietly; missing frame bounds, failed
//! lookups and failed transfers abort the whole event.

use crate::config::Settings;
use crate::error::EngineError;
use crate::finalize;
use crate::hooks::{Eligibility, FarmPlan, JobContext, JobPlan, PublishHook, ReviewPlan};
use crate::mirror::Mirror;
use crate::resolver::DependencyResolver;
use sgf_adapters::{ObjectStore, RenderFarm, TrackingStore, TranscodeRequest, Transcoder};
use sgf_core::{Clock, EntityRef, EventRecord, JobHandle, TrackedFile, TRACKED_FILE_FIELDS};
use std::path::PathBuf;
use std::sync::Arc;

/// Tracking field that receives the review movie.
pub const UPLOADED_MOVIE_FIELD: &str = "sg_uploaded_movie";

/// External collaborators shared by every hook
#[derive(Clone)]
pub struct Services {
    pub tracking: Arc<dyn TrackingStore>,
    pub storage: Arc<dyn ObjectStore>,
    /// Absent when no farm credentials are configured.
    pub farm: Option<Arc<dyn RenderFarm>>,
    pub transcoder: Arc<dyn Transcoder>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    Skipped { reason: String },
    Submitted { handle: JobHandle, descriptor: PathBuf },
    Reviewed { version: EntityRef, movie: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HookReport {
    pub hook: &'static str,
    pub outcome: HookOutcome,
}

pub struct Dispatcher<C: Clock> {
    services: Services,
    settings: Settings,
    hooks: Vec<Box<dyn PublishHook>>,
    mirror: Mirror,
    resolver: DependencyResolver,
    clock: C,
}

impl<C: Clock> Dispatcher<C> {
    pub fn new(services: Services, settings: Settings, hooks: Vec<Box<dyn PublishHook>>, clock: C) -> Self {
        let mirror = Mirror::new(Arc::clone(&services.storage), settings.local_root.clone());
        let resolver = DependencyResolver::new(Arc::clone(&services.tracking));
        Self { services, settings, hooks, mirror, resolver, clock }
    }

    pub async fn handle_event_id(&self, event_id: i64) -> Result<Vec<HookReport>, EngineError> {
        let event = self
            .services
            .tracking
            .find_event(event_id)
            .await?
            .ok_or(EngineError::EventNotFound(event_id))?;
        self.handle_event(&event).await
    }

    pub async fn handle_event(&self, event: &EventRecord) -> Result<Vec<HookReport>, EngineError> {
        let mut record: Option<TrackedFile> = None;
        let mut reports = Vec::with_capacity(self.hooks.len());

        for hook in &self.hooks {
            let hook_name = hook.name();
            let outcome = match self.precheck(&**hook, event) {
                Err(reason) => HookOutcome::Skipped { reason },
                Ok(entity) => {
                    if record.is_none() {
                        record = Some(self.fetch_record(entity).await?);
                    }
                    let Some(record) = record.as_ref() else {
                        continue;
                    };
                    self.run_hook(&**hook, event, record).await?
                }
            };
            if let HookOutcome::Skipped { reason } = &outcome {
                tracing::info!(event_id = event.id, hook = hook_name, reason = %reason, "skipped");
            }
            reports.push(HookReport { hook: hook_name, outcome });
        }
        Ok(reports)
    }

    /// The entity to fetch, or why the hook does not apply to this event.
    fn precheck<'e>(&self, hook: &dyn PublishHook, event: &'e EventRecord) -> Result<&'e EntityRef, String> {
        if !hook.event_types().contains(&event.event_type.as_str()) {
            return Err(format!("event type '{}' is not handled", event.event_type));
        }
        event.entity.as_ref().ok_or_else(|| "event has no entity".to_string())
    }

    async fn fetch_record(&self, entity: &EntityRef) -> Result<TrackedFile, EngineError> {
        tracing::debug!(%entity, "fetching record");
        self.services
            .tracking
            .find_tracked_file(entity, TRACKED_FILE_FIELDS)
            .await?
            .ok_or_else(|| EngineError::RecordNotFound(entity.clone()))
    }

    async fn run_hook(
        &self,
        hook: &dyn PublishHook,
        event: &EventRecord,
        record: &TrackedFile,
    ) -> Result<HookOutcome, EngineError> {
        if let Eligibility::Skip(reason) = hook.evaluate_eligibility(record) {
            return Ok(HookOutcome::Skipped { reason });
        }

        let frames = record.frame_range()?;
        let destination = format!(
            "{}/{}_{}_{}",
            self.settings.render_root.trim_matches('/'),
            record.code,
            record.id,
            self.clock.timestamp()
        );
        tracing::info!(
            event_id = event.id,
            hook = hook.name(),
            record = %record.entity_ref(),
            frames = %frames,
            destination = %destination,
            "processing"
        );

        let mut dependencies = Vec::new();
        for path in hook.get_dependencies(record, &self.resolver).await? {
            dependencies.extend(self.mirror.ensure_local(&path).await?);
        }

        let ctx = JobContext {
            record,
            frames,
            title: self.settings.job_title(&record.code),
            destination,
            dependencies,
            mirror: &self.mirror,
            farm: self.services.farm.as_deref(),
        };
        match hook.build_job(&ctx).await? {
            JobPlan::Farm(plan) => self.submit(record, plan).await,
            JobPlan::Review(plan) => self.review(plan).await,
        }
    }

    async fn submit(&self, record: &TrackedFile, plan: FarmPlan) -> Result<HookOutcome, EngineError> {
        let publish = finalize::prepare_publish(self.services.tracking.as_ref(), record, &plan.output_pattern).await?;
        finalize::write_pending_publish(&plan.descriptor_path, &publish).await?;

        let farm = self.services.farm.as_deref().ok_or_else(EngineError::no_farm)?;
        let handle = farm.submit(&plan.job).await?;
        tracing::info!(
            job_id = %handle.job_id,
            title = %plan.job.description().title,
            tasks = plan.job.tasks().len(),
            output = %plan.output_pattern,
            "submitted"
        );
        Ok(HookOutcome::Submitted { handle, descriptor: plan.descriptor_path })
    }

    async fn review(&self, plan: ReviewPlan) -> Result<HookOutcome, EngineError> {
        if let Some(dir) = plan.movie.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(EngineError::io(dir))?;
        }
        let request = TranscodeRequest {
            input: plan.sequence.clone(),
            output: plan.movie.clone(),
            start_number: plan.start_frame,
            fps: plan.fps,
        };
        self.services.transcoder.transcode(&request).await?;

        let size = tokio::fs::metadata(&plan.movie).await.map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            return Err(EngineError::MovieMissing(plan.movie));
        }

        let version = self.services.tracking.create_version(&plan.draft).await?;
        self.services.tracking.upload(&version, &plan.movie, UPLOADED_MOVIE_FIELD).await?;
        tracing::info!(%version, movie = %plan.movie.display(), size, "review version created");
        Ok(HookOutcome::Reviewed { version, movie: plan.movie })
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
