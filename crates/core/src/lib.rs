// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sgf-core: Data model for the sgfarm render-publish hooks

pub mod macros;

pub mod clock;
pub mod entity;
pub mod event;
pub mod frames;
pub mod job;
pub mod publish;
pub mod tracked_file;

pub use clock::{Clock, FakeClock, SystemClock};
pub use entity::{kind, EntityRef};
pub use event::{EventRecord, EVENT_FIELDS, PUBLISHED_FILE_NEW};
pub use frames::{frame_from_filename, FrameError, FramePattern, FrameRange};
pub use job::{
    env_vars, FinalizedJob, InstanceType, JobDescription, JobError, JobHandle, JobTemplate,
    MergePolicy, Package, PackageEnv, TaskSpec,
};
pub use publish::{PendingPublish, VersionDraft, IMAGE_FILE_TYPE, REVIEW_STATUS};
#[cfg(any(test, feature = "test-support"))]
pub use tracked_file::TrackedFileBuilder;
pub use tracked_file::{FilePath, RecordError, TrackedFile, DEPENDENCY_FIELDS, TRACKED_FILE_FIELDS};
