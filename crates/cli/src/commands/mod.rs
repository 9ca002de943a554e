// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod complete;
pub mod event;

use sgf_adapters::{ConductorClient, FfmpegTranscoder, RenderFarm, S3ObjectStore, ShotgunClient};
use sgf_engine::{Config, Services};
use std::sync::Arc;

/// Real clients for every collaborator the configuration allows.
pub async fn services(config: &Config) -> Services {
    let shotgun = &config.shotgun;
    let farm: Option<Arc<dyn RenderFarm>> = match config.conductor_api_key() {
        Ok(key) => Some(Arc::new(ConductorClient::new(config.conductor_url.clone(), key))),
        Err(_) => {
            tracing::debug!("no farm credentials, farm hooks will fail");
            None
        }
    };
    Services {
        tracking: Arc::new(ShotgunClient::new(
            shotgun.server.clone(),
            shotgun.script_name.clone(),
            shotgun.script_key.clone(),
        )),
        storage: Arc::new(S3ObjectStore::from_env(config.bucket.clone()).await),
        farm,
        transcoder: Arc::new(FfmpegTranscoder::new(config.settings.review.ffmpeg.clone())),
    }
}
