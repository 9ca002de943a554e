// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frame ranges and `%0Nd` frame placeholders in sequence paths.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Matches a zero-padded printf-style frame token such as `%05d`.
#[allow(clippy::expect_used)]
static FRAME_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%0(\d+)d").expect("constant regex pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("invalid frame range {start}-{end}x{step}")]
    InvalidRange { start: i64, end: i64, step: i64 },
    #[error("no frame placeholder in '{0}'")]
    NoPlaceholder(String),
    #[error("no frame number in file name '{0}'")]
    NoFrameNumber(String),
}

/// Inclusive frame range with an integer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl FrameRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end, step: 1 }
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    pub fn validate(&self) -> Result<(), FrameError> {
        if self.start > self.end || self.step < 1 {
            return Err(FrameError::InvalidRange {
                start: self.start,
                end: self.end,
                step: self.step,
            });
        }
        Ok(())
    }

    /// Number of frames rendered, counting the step. Zero for an invalid range.
    pub fn len(&self) -> u64 {
        if self.validate().is_err() {
            return 0;
        }
        (self.end.abs_diff(self.start) / self.step as u64).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split into consecutive chunks of at most `chunk_size` frames.
    pub fn chunks(&self, chunk_size: u64) -> Vec<FrameRange> {
        if self.is_empty() {
            return Vec::new();
        }
        let step = self.step as u64;
        let span = chunk_size.max(1).saturating_mul(step);
        let mut chunks = Vec::new();
        let mut start = self.start;
        loop {
            let offset = (span - step).min(self.end.abs_diff(start));
            // Keep the last frame on the step grid
            let end = start.saturating_add_unsigned(offset - offset % step);
            chunks.push(FrameRange { start, end, step: self.step });
            match start.checked_add_unsigned(span) {
                Some(next) if next <= self.end => start = next,
                _ => break,
            }
        }
        chunks
    }
}

impl std::fmt::Display for FrameRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}x{}", self.start, self.end, self.step)
    }
}

/// A path containing a single frame placeholder, e.g. `/renders/sh010.%05d.exr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePattern {
    prefix: String,
    suffix: String,
    padding: usize,
}

impl FramePattern {
    /// Detect a frame placeholder in `path`. Returns `None` for single files.
    pub fn find(path: &str) -> Option<Self> {
        let captures = FRAME_PLACEHOLDER.captures(path)?;
        let whole = captures.get(0)?;
        let padding = captures.get(1)?.as_str().parse().ok()?;
        Some(Self {
            prefix: path[..whole.start()].to_string(),
            suffix: path[whole.end()..].to_string(),
            padding,
        })
    }

    /// Like [`FramePattern::find`], but a missing placeholder is an error.
    pub fn parse(path: &str) -> Result<Self, FrameError> {
        Self::find(path).ok_or_else(|| FrameError::NoPlaceholder(path.to_string()))
    }

    /// Literal text before the placeholder.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Substitute a concrete frame number.
    pub fn format(&self, frame: i64) -> String {
        format!("{}{:0width$}{}", self.prefix, frame, self.suffix, width = self.padding)
    }
}

/// Frame number of a rendered file: the last dot-delimited segment before
/// the extension (`sh010.01001.exr` → 1001).
pub fn frame_from_filename(path: &Path) -> Result<i64, FrameError> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let mut segments = name.rsplit('.');
    let _extension = segments.next();
    segments
        .next()
        .and_then(|segment| segment.parse::<i64>().ok())
        .ok_or_else(|| FrameError::NoFrameNumber(name.to_string()))
}

#[cfg(test)]
#[path = "frames_tests.rs"]
mod tests;
