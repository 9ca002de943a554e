// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conductor render farm client.

use super::{FarmError, RenderFarm};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use sgf_core::{FinalizedJob, InstanceType, JobHandle, Package, PackageEnv};

pub const DEFAULT_CONDUCTOR_URL: &str = "https://dashboard.conductortech.com";

#[derive(Deserialize)]
struct DataList<T> {
    data: Vec<T>,
}

/// Package as the farm reports it, with the version split into components.
#[derive(Deserialize)]
struct RawPackage {
    package_id: String,
    product: String,
    #[serde(default)]
    major_version: String,
    #[serde(default)]
    minor_version: String,
    #[serde(default)]
    release_version: String,
    #[serde(default)]
    build_version: String,
    #[serde(default)]
    plugin_host_product: String,
    #[serde(default)]
    environment: Vec<PackageEnv>,
}

impl From<RawPackage> for Package {
    fn from(raw: RawPackage) -> Self {
        let version = [&raw.major_version, &raw.minor_version, &raw.release_version, &raw.build_version]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".");
        Package {
            package_id: raw.package_id,
            product: raw.product,
            version,
            host_product: Some(raw.plugin_host_product).filter(|p| !p.is_empty()),
            environment: raw.environment,
        }
    }
}

#[derive(Deserialize)]
struct RawInstanceType {
    name: String,
    description: String,
    #[serde(default)]
    cores: Option<u32>,
    #[serde(default)]
    memory: Option<Value>,
}

impl From<RawInstanceType> for InstanceType {
    fn from(raw: RawInstanceType) -> Self {
        let memory_gb = match raw.memory {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        InstanceType { name: raw.name, description: raw.description, cores: raw.cores, memory_gb }
    }
}

#[derive(Deserialize)]
struct SubmitResponse {
    jobid: String,
    #[serde(default)]
    uri: Option<String>,
}

/// Render farm backed by the Conductor REST API
pub struct ConductorClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl ConductorClient {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn get(&self, path: &str, operation: &str) -> Result<reqwest::Response, FarmError> {
        let response = self.http.get(format!("{}{}", self.url, path)).bearer_auth(&self.api_key).send().await?;
        checked(response, operation).await
    }
}

#[async_trait]
impl RenderFarm for ConductorClient {
    async fn packages(&self) -> Result<Vec<Package>, FarmError> {
        let list: DataList<RawPackage> = self.get("/api/v1/ee/packages", "list packages").await?.json().await?;
        tracing::debug!(count = list.data.len(), "fetched farm packages");
        Ok(list.data.into_iter().map(Package::from).collect())
    }

    async fn instance_types(&self) -> Result<Vec<InstanceType>, FarmError> {
        let list: DataList<RawInstanceType> =
            self.get("/api/v1/instance-types", "list instance types").await?.json().await?;
        Ok(list.data.into_iter().map(InstanceType::from).collect())
    }

    async fn submit(&self, job: &FinalizedJob) -> Result<JobHandle, FarmError> {
        let payload = job_payload(job);
        tracing::debug!(title = %job.description().title, tasks = job.tasks().len(), "submitting job");
        let response = self
            .http
            .post(format!("{}/jobs/", self.url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;
        let response: SubmitResponse = checked(response, "submit job").await?.json().await?;
        Ok(JobHandle { job_id: response.jobid, uri: response.uri })
    }
}

async fn checked(response: reqwest::Response, operation: &str) -> Result<reqwest::Response, FarmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(FarmError::Status { operation: operation.to_string(), status: status.as_u16(), body })
}

/// Submission body for a finalized job.
pub(crate) fn job_payload(job: &FinalizedJob) -> Value {
    let description = job.description();
    let tasks: Vec<Value> = job
        .tasks()
        .iter()
        .map(|task| json!({ "command": task.command, "frames": task.frames.to_string() }))
        .collect();
    json!({
        "job_title": description.title,
        "owner": description.user,
        "local_upload": description.local_upload,
        "instance_type": description.instance_type,
        "software_package_ids": job.package_ids(),
        "environment": job.environment(),
        "output_path": description.output_path,
        "frame_range": description.frames.to_string(),
        "chunk_size": job.tasks().first().map(|task| task.frames.len()),
        "upload_paths": description.upload_paths,
        "tasks_data": tasks,
        "post_job_cmd": description.post_job_cmd,
        "scout_frames": "",
    })
}

#[cfg(test)]
#[path = "conductor_tests.rs"]
mod tests;
