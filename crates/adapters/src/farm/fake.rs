// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording render farm for tests

use super::{FarmError, RenderFarm};
use async_trait::async_trait;
use parking_lot::Mutex;
use sgf_core::{FinalizedJob, InstanceType, JobHandle, Package};
use std::sync::Arc;

#[derive(Default)]
struct FakeFarmState {
    packages: Vec<Package>,
    instance_types: Vec<InstanceType>,
    submissions: Vec<FinalizedJob>,
}

/// Fake render farm with a seeded catalog that records submissions
#[derive(Clone, Default)]
pub struct FakeRenderFarm {
    inner: Arc<Mutex<FakeFarmState>>,
}

impl FakeRenderFarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_package(&self, package: Package) {
        self.inner.lock().packages.push(package);
    }

    pub fn add_instance_type(&self, name: &str, description: &str) {
        self.inner.lock().instance_types.push(InstanceType {
            name: name.to_string(),
            description: description.to_string(),
            cores: None,
            memory_gb: None,
        });
    }

    pub fn submissions(&self) -> Vec<FinalizedJob> {
        self.inner.lock().submissions.clone()
    }
}

#[async_trait]
impl RenderFarm for FakeRenderFarm {
    async fn packages(&self) -> Result<Vec<Package>, FarmError> {
        Ok(self.inner.lock().packages.clone())
    }

    async fn instance_types(&self) -> Result<Vec<InstanceType>, FarmError> {
        Ok(self.inner.lock().instance_types.clone())
    }

    async fn submit(&self, job: &FinalizedJob) -> Result<JobHandle, FarmError> {
        let mut state = self.inner.lock();
        state.submissions.push(job.clone());
        let job_id = format!("{:05}", state.submissions.len());
        Ok(JobHandle { uri: Some(format!("/job/{job_id}")), job_id })
    }
}
