// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Farm-side completion commands, run by the support scripts on the workers

use anyhow::Result;
use clap::Args;
use sgf_adapters::{S3ObjectStore, ShotgunClient};
use sgf_engine::{finalize, CompletionEnv, Settings, ShotgunCredentials};
use std::path::{Path, PathBuf};

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct DescriptorArgs {
    /// Pending publish written at submission [default: settings descriptor_path]
    #[arg(long, value_name = "PATH")]
    pub descriptor: Option<PathBuf>,
}

impl DescriptorArgs {
    pub fn resolve(&self, config_path: Option<&Path>) -> Result<PathBuf> {
        match &self.descriptor {
            Some(path) => Ok(path.clone()),
            None => Ok(Settings::discover(config_path)?.descriptor_path),
        }
    }
}

fn tracking() -> Result<ShotgunClient> {
    let creds = ShotgunCredentials::load()?;
    Ok(ShotgunClient::new(creds.server, creds.script_name, creds.script_key))
}

/// Mirror the rendered frames back to the project bucket.
pub async fn post_render(format: OutputFormat) -> Result<()> {
    let env = CompletionEnv::load()?;
    let store = S3ObjectStore::from_env(env.bucket.clone()).await;
    let keys = finalize::upload_outputs(&store, &env).await?;
    output::print_uploads(&keys, format)
}

/// Create the published file recorded at submission.
pub async fn register_publish(args: DescriptorArgs, config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let descriptor = args.resolve(config_path)?;
    let tracking = tracking()?;
    let published = finalize::register_publish(&tracking, &descriptor).await?;
    output::print_published(&published, format)
}

/// Upload then register, for workers that run a single completion hook.
pub async fn finalize(args: DescriptorArgs, config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let descriptor = args.resolve(config_path)?;
    let env = CompletionEnv::load()?;
    let tracking = tracking()?;
    let store = S3ObjectStore::from_env(env.bucket.clone()).await;
    let report = finalize::on_completion(&tracking, &store, &env, &descriptor).await?;
    output::print_completion(&report, format)
}

#[cfg(test)]
#[path = "complete_tests.rs"]
mod tests;
