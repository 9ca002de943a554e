// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::path::PathBuf;

pub const SHOTGUN_SERVER: &str = "SHOTGUN_SERVER";
pub const SHOTGUN_SCRIPT_NAME: &str = "SHOTGUN_SCRIPT_NAME";
pub const SHOTGUN_SCRIPT_KEY: &str = "SHOTGUN_SCRIPT_KEY";
pub const AWS_PROJECT_BUCKET: &str = "AWS_PROJECT_BUCKET";
pub const CONDUCTOR_URL: &str = "CONDUCTOR_URL";
pub const CONDUCTOR_API_KEY: &str = "CONDUCTOR_API_KEY";
pub const SGF_CONFIG: &str = "SGF_CONFIG";
pub const SGF_LOG_DIR: &str = "SGF_LOG_DIR";

/// Process environment lookup. Empty values count as unset.
pub fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Settings file named by `SGF_CONFIG`
pub fn config_path() -> Option<PathBuf> {
    var(SGF_CONFIG).map(PathBuf::from)
}

/// Directory for the rolling log file, when file logging is wanted
pub fn log_dir() -> Option<PathBuf> {
    var(SGF_LOG_DIR).map(PathBuf::from)
}
