// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Render farm adapter

mod conductor;

pub use conductor::{ConductorClient, DEFAULT_CONDUCTOR_URL};

use async_trait::async_trait;
use sgf_core::{FinalizedJob, InstanceType, JobHandle, Package};
use thiserror::Error;

/// Errors from render farm operations
#[derive(Debug, Error)]
pub enum FarmError {
    #[error("render farm request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{operation} returned HTTP {status}: {body}")]
    Status { operation: String, status: u16, body: String },
    #[error("unexpected response from {operation}: {message}")]
    Response { operation: String, message: String },
}

/// Adapter for the remote render farm
#[async_trait]
pub trait RenderFarm: Send + Sync {
    /// Software packages the farm can provision.
    async fn packages(&self) -> Result<Vec<Package>, FarmError>;

    async fn instance_types(&self) -> Result<Vec<InstanceType>, FarmError>;

    async fn submit(&self, job: &FinalizedJob) -> Result<JobHandle, FarmError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRenderFarm;
