// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sgf-engine: Event dispatch, job assembly and publish finalization

pub mod config;
pub mod dispatch;
pub mod env;
pub mod error;
pub mod finalize;
pub mod hooks;
pub mod mirror;
pub mod registry;
pub mod resolver;

pub use config::{Config, ConfigError, Settings, ShotgunCredentials};
pub use dispatch::{Dispatcher, HookOutcome, HookReport, Services};
pub use error::EngineError;
pub use finalize::{CompletionEnv, CompletionReport};
pub use hooks::{all_hooks, hook_by_name, Eligibility, JobPlan, PublishHook};
pub use mirror::Mirror;
pub use registry::{PackageRegistry, PackageSpec};
pub use resolver::DependencyResolver;
