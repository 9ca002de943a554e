// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process configuration: required credentials from the environment plus an
//! optional TOML settings file.
//!
//! Everything is read once at startup and injected; hooks never consult the
//! environment themselves.

use crate::env;
use crate::registry::PackageSpec;
use indexmap::IndexMap;
use serde::Deserialize;
use sgf_adapters::DEFAULT_CONDUCTOR_URL;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("failed to read settings {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<String, ConfigError> {
    lookup(name).filter(|v| !v.is_empty()).ok_or(ConfigError::MissingVar(name))
}

/// API script credentials for the tracking store
#[derive(Clone, PartialEq, Eq)]
pub struct ShotgunCredentials {
    pub server: String,
    pub script_name: String,
    pub script_key: String,
}

impl std::fmt::Debug for ShotgunCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShotgunCredentials")
            .field("server", &self.server)
            .field("script_name", &self.script_name)
            .finish_non_exhaustive()
    }
}

impl ShotgunCredentials {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(env::var)
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            server: required(&lookup, env::SHOTGUN_SERVER)?,
            script_name: required(&lookup, env::SHOTGUN_SCRIPT_NAME)?,
            script_key: required(&lookup, env::SHOTGUN_SCRIPT_KEY)?,
        })
    }
}

/// Configuration for the dispatch commands
#[derive(Debug, Clone)]
pub struct Config {
    pub shotgun: ShotgunCredentials,
    /// Project bucket mirrored to and from.
    pub bucket: String,
    pub conductor_url: String,
    conductor_api_key: Option<String>,
    pub settings: Settings,
}

impl Config {
    /// Load from the process environment. An explicit settings path wins over
    /// `SGF_CONFIG`.
    pub fn load(settings_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_vars(env::var, settings_path)
    }

    pub fn from_vars(
        lookup: impl Fn(&str) -> Option<String>,
        settings_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let shotgun = ShotgunCredentials::from_vars(&lookup)?;
        let bucket = required(&lookup, env::AWS_PROJECT_BUCKET)?;
        let settings_path = settings_path.map(Path::to_path_buf).or_else(|| lookup(env::SGF_CONFIG).map(PathBuf::from));
        let settings = match settings_path {
            Some(path) => Settings::load(&path)?,
            None => Settings::default(),
        };
        Ok(Self {
            shotgun,
            bucket,
            conductor_url: lookup(env::CONDUCTOR_URL)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_CONDUCTOR_URL.to_string()),
            conductor_api_key: lookup(env::CONDUCTOR_API_KEY).filter(|v| !v.is_empty()),
            settings,
        })
    }

    /// Only needed once a farm client is built.
    pub fn conductor_api_key(&self) -> Result<&str, ConfigError> {
        self.conductor_api_key.as_deref().ok_or(ConfigError::MissingVar(env::CONDUCTOR_API_KEY))
    }
}

/// Tunables read from the settings file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Local directory that mirrors the bucket root.
    pub local_root: PathBuf,
    /// Where the pending-publish descriptor is written before submission.
    pub descriptor_path: PathBuf,
    /// Bucket prefix under which render outputs land.
    pub render_root: String,
    /// Instance type, by its human readable description.
    pub instance_type: String,
    pub job_title_prefix: String,
    /// Extra variables for every render job.
    pub environment: IndexMap<String, String>,
    pub support_files: SupportFiles,
    pub maya: MayaSettings,
    pub nuke: NukeSettings,
    pub review: ReviewSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            local_root: PathBuf::from("/"),
            descriptor_path: PathBuf::from("/tmp/published_file.json"),
            render_root: "projects/renders".to_string(),
            instance_type: "2 core, 13GB Mem".to_string(),
            job_title_prefix: "[SG Daemon]".to_string(),
            environment: IndexMap::new(),
            support_files: SupportFiles::default(),
            maya: MayaSettings::default(),
            nuke: NukeSettings::default(),
            review: ReviewSettings::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Settings without the dispatch credentials, for the worker-side
    /// commands. An explicit path wins over `SGF_CONFIG`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit.map(Path::to_path_buf).or_else(env::config_path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Farm job title for a record code.
    pub fn job_title(&self, code: &str) -> String {
        if self.job_title_prefix.is_empty() {
            code.to_string()
        } else {
            format!("{} - {}", self.job_title_prefix, code)
        }
    }
}

/// Scripts shipped with every render job and run on the farm
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SupportFiles {
    pub interpreter: String,
    /// Mirrors rendered frames to the bucket after the render.
    pub post_render: String,
    /// Registers the render as a published file once the job is done.
    pub register_publish: String,
}

impl Default for SupportFiles {
    fn default() -> Self {
        Self {
            interpreter: "sh".to_string(),
            post_render: "/usr/local/shotgun/support_files/post_render.sh".to_string(),
            register_publish: "/usr/local/shotgun/support_files/register_publish.sh".to_string(),
        }
    }
}

impl SupportFiles {
    pub fn post_render_cmd(&self) -> String {
        format!("{} {}", self.interpreter, self.post_render)
    }

    pub fn register_publish_cmd(&self) -> String {
        format!("{} {}", self.interpreter, self.register_publish)
    }

    pub fn paths(&self) -> [&str; 2] {
        [&self.post_render, &self.register_publish]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MayaSettings {
    pub host: PackageSpec,
    pub plugin: PackageSpec,
    pub render_layer: String,
}

impl Default for MayaSettings {
    fn default() -> Self {
        Self {
            host: PackageSpec::host("maya-io", "2018.1"),
            plugin: PackageSpec::plugin("v-ray-maya", "3.60.04", "maya-io"),
            render_layer: "defaultRenderLayer".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NukeSettings {
    pub host: PackageSpec,
    /// Comp script run against every light render.
    pub template: String,
    /// Background plate sequence fed to the template.
    pub plate: String,
}

impl Default for NukeSettings {
    fn default() -> Self {
        Self {
            host: PackageSpec::host("nuke", "11.3v5"),
            template: "/usr/local/shotgun/support_files/nuke_template.nk".to_string(),
            plate: "/projects/generic_plate.%05d.exr".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewSettings {
    pub ffmpeg: String,
    pub fps: u32,
    pub movie_dir: PathBuf,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self { ffmpeg: "ffmpeg".to_string(), fps: 24, movie_dir: PathBuf::from("/tmp") }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
