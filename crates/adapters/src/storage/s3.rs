// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S3 bucket access through the AWS SDK.

use super::{ObjectStore, StorageError};
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Object store backed by one S3 bucket
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Credentials and region come from the default AWS provider chain.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::with_client(aws_sdk_s3::Client::new(&config), bucket)
    }

    pub fn with_client(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self { client, bucket: bucket.into() }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut pages =
            self.client.list_objects_v2().bucket(&self.bucket).prefix(prefix).into_paginator().send();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StorageError::List {
                bucket: self.bucket.clone(),
                prefix: prefix.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
            keys.extend(page.contents().iter().filter_map(|object| object.key().map(str::to_string)));
        }
        tracing::debug!(bucket = %self.bucket, prefix, count = keys.len(), "listed objects");
        Ok(keys)
    }

    async fn download(&self, key: &str, dest: &Path) -> Result<(), StorageError> {
        let download_error = |message: String| StorageError::Download {
            bucket: self.bucket.clone(),
            key: key.to_string(),
            message,
        };
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| download_error(DisplayErrorContext(&e).to_string()))?;

        let body = object.body.into_async_read();
        tokio::pin!(body);
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|source| StorageError::Io { path: dest.to_path_buf(), source })?;
        let copied = match tokio::io::copy(&mut body, &mut file).await {
            Ok(_) => file.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = copied {
            drop(file);
            if let Err(remove) = tokio::fs::remove_file(dest).await {
                tracing::warn!(path = %dest.display(), error = %remove, "partial download left behind");
            }
            return Err(download_error(e.to_string()));
        }
        Ok(())
    }

    async fn upload(&self, src: &Path, key: &str) -> Result<(), StorageError> {
        let upload_error = |message: String| StorageError::Upload {
            path: src.to_path_buf(),
            bucket: self.bucket.clone(),
            key: key.to_string(),
            message,
        };
        let body = ByteStream::from_path(src).await.map_err(|e| upload_error(e.to_string()))?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| upload_error(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
