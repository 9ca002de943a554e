// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sgf-adapters: External collaborators of the render-publish hooks

pub mod farm;
pub mod storage;
pub mod tracking;
pub mod transcode;

pub use farm::{ConductorClient, FarmError, RenderFarm, DEFAULT_CONDUCTOR_URL};
pub use storage::{ObjectStore, S3ObjectStore, StorageError};
pub use tracking::{ShotgunClient, TrackingError, TrackingStore};
pub use transcode::{FfmpegTranscoder, TranscodeError, TranscodeRequest, Transcoder};

#[cfg(any(test, feature = "test-support"))]
pub use farm::FakeRenderFarm;
#[cfg(any(test, feature = "test-support"))]
pub use storage::FakeObjectStore;
#[cfg(any(test, feature = "test-support"))]
pub use tracking::{FakeTrackingStore, TrackingUpload};
#[cfg(any(test, feature = "test-support"))]
pub use transcode::{FakeTranscodeOutcome, FakeTranscoder};
