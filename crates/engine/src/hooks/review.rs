// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Review movie and Version for every published image sequence.

use super::{Eligibility, JobContext, JobPlan, PublishHook, ReviewPlan};
use crate::config::Settings;
use crate::error::EngineError;
use crate::resolver::DependencyResolver;
use async_trait::async_trait;
use sgf_core::{TrackedFile, VersionDraft};

const FILE_TYPE: &str = "Image";
const EXTENSIONS: &[&str] = &["exr"];

pub struct ReviewVersionHook {
    settings: Settings,
}

impl ReviewVersionHook {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

/// `sh010_light_v001.%05d.exr` → `sh010_light_v001`
pub(crate) fn movie_basename(path: &str) -> &str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let mut segments = file_name.rsplitn(3, '.');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(_), Some(base)) if !base.is_empty() => base,
        _ => file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem),
    }
}

#[async_trait]
impl PublishHook for ReviewVersionHook {
    fn name(&self) -> &'static str {
        "create-version"
    }

    fn evaluate_eligibility(&self, record: &TrackedFile) -> Eligibility {
        Eligibility::check(record, FILE_TYPE, EXTENSIONS, None)
    }

    async fn get_dependencies(
        &self,
        record: &TrackedFile,
        _resolver: &DependencyResolver,
    ) -> Result<Vec<String>, EngineError> {
        let sequence = record.linux_path().ok_or_else(|| EngineError::MissingPath(record.label().to_string()))?;
        Ok(vec![sequence.to_string()])
    }

    async fn build_job(&self, ctx: &JobContext<'_>) -> Result<JobPlan, EngineError> {
        let review = &self.settings.review;
        let tracked = ctx.record.path.local_path().ok_or_else(|| EngineError::MissingPath(ctx.record.label().to_string()))?;
        let movie = review.movie_dir.join(format!("{}.mp4", movie_basename(tracked)));

        Ok(JobPlan::Review(ReviewPlan {
            sequence: ctx.local(ctx.record_path()?),
            movie,
            start_frame: ctx.frames.start,
            fps: review.fps,
            draft: VersionDraft::for_review(ctx.record),
        }))
    }
}
