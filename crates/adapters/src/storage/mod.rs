// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Object storage adapter

mod s3;

pub use s3::S3ObjectStore;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from object storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to list s3://{bucket}/{prefix}: {message}")]
    List { bucket: String, prefix: String, message: String },
    #[error("failed to download s3://{bucket}/{key}: {message}")]
    Download { bucket: String, key: String, message: String },
    #[error("failed to upload {} to s3://{bucket}/{key}: {message}", .path.display())]
    Upload { path: PathBuf, bucket: String, key: String, message: String },
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Adapter for a single object storage bucket
#[async_trait]
pub trait ObjectStore: Send + Sync {
    fn bucket(&self) -> &str;

    /// All keys beginning with `prefix`, in lexicographic order.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Fetch `key` into `dest`. The parent directory must exist.
    async fn download(&self, key: &str, dest: &Path) -> Result<(), StorageError>;

    async fn upload(&self, src: &Path, key: &str) -> Result<(), StorageError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeObjectStore;
