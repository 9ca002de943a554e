// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that end the handling of an event.
//!
//! Eligibility skips are not errors; everything here is fatal for the event
//! and propagates to the caller.

use crate::config::ConfigError;
use sgf_adapters::{FarmError, StorageError, TrackingError, TranscodeError};
use sgf_core::{EntityRef, FrameError, JobError, RecordError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("tracking error: {0}")]
    Tracking(#[from] TrackingError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("farm error: {0}")]
    Farm(#[from] FarmError),
    #[error("transcode error: {0}")]
    Transcode(#[from] TranscodeError),
    #[error("job error: {0}")]
    Job(#[from] JobError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Frames(#[from] FrameError),
    #[error("event {0} not found")]
    EventNotFound(i64),
    #[error("{0} not found")]
    RecordNotFound(EntityRef),
    #[error("{0} has no path")]
    MissingPath(String),
    #[error("no software package matches {0}")]
    UnresolvedPackage(String),
    #[error("unable to find an instance matching '{0}'")]
    UnresolvedInstanceType(String),
    #[error("published file type '{0}' not found")]
    UnresolvedFileType(String),
    #[error("review movie {} is missing or empty", .0.display())]
    MovieMissing(PathBuf),
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid pending publish {}: {source}", .path.display())]
    Descriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// Farm work was requested but no farm client could be built.
    pub(crate) fn no_farm() -> Self {
        Self::Config(ConfigError::MissingVar(crate::env::CONDUCTOR_API_KEY))
    }
}
