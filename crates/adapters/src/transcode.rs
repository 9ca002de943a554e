// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Review-movie encoding through an external ffmpeg process

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;

/// Errors from transcode operations
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {}: {stderr}", .code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}")))]
    Failed { program: String, code: Option<i32>, stderr: String },
}

/// Encode an image sequence into a review movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeRequest {
    /// Sequence path with a `%0Nd` placeholder.
    pub input: String,
    pub output: PathBuf,
    /// First frame number of the sequence.
    pub start_number: i64,
    pub fps: u32,
}

/// Adapter for movie transcoding
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Runs to completion. There is no timeout.
    async fn transcode(&self, request: &TranscodeRequest) -> Result<(), TranscodeError>;
}

/// Transcoder that shells out to ffmpeg
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: String,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegTranscoder {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub(crate) fn args(request: &TranscodeRequest) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-start_number".to_string(),
            request.start_number.to_string(),
            "-i".to_string(),
            request.input.clone(),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-vf".to_string(),
            format!("fps={}", request.fps),
            request.output.display().to_string(),
        ]
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, request: &TranscodeRequest) -> Result<(), TranscodeError> {
        let args = Self::args(request);
        tracing::debug!(program = %self.program, ?args, "executing transcoder");
        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| TranscodeError::Spawn { program: self.program.clone(), source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // ffmpeg prints its banner first; the cause is at the end
            let tail: Vec<&str> = stderr.lines().rev().take(20).collect();
            return Err(TranscodeError::Failed {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: tail.into_iter().rev().collect::<Vec<_>>().join("\n"),
            });
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{TranscodeError, TranscodeRequest, Transcoder};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// What the fake writes to the requested output
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FakeTranscodeOutcome {
        Movie,
        EmptyFile,
        NoFile,
        ExitFailure,
    }

    struct FakeTranscodeState {
        outcome: FakeTranscodeOutcome,
        requests: Vec<TranscodeRequest>,
    }

    /// Fake transcoder that records requests
    #[derive(Clone)]
    pub struct FakeTranscoder {
        inner: Arc<Mutex<FakeTranscodeState>>,
    }

    impl Default for FakeTranscoder {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeTranscodeState {
                    outcome: FakeTranscodeOutcome::Movie,
                    requests: Vec::new(),
                })),
            }
        }
    }

    impl FakeTranscoder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_outcome(&self, outcome: FakeTranscodeOutcome) {
            self.inner.lock().outcome = outcome;
        }

        pub fn requests(&self) -> Vec<TranscodeRequest> {
            self.inner.lock().requests.clone()
        }
    }

    #[async_trait]
    impl Transcoder for FakeTranscoder {
        async fn transcode(&self, request: &TranscodeRequest) -> Result<(), TranscodeError> {
            let outcome = {
                let mut state = self.inner.lock();
                state.requests.push(request.clone());
                state.outcome
            };
            let contents: &[u8] = match outcome {
                FakeTranscodeOutcome::Movie => b"\x00\x00\x00\x18ftypmp42",
                FakeTranscodeOutcome::EmptyFile => b"",
                FakeTranscodeOutcome::NoFile => return Ok(()),
                FakeTranscodeOutcome::ExitFailure => {
                    return Err(TranscodeError::Failed {
                        program: "ffmpeg".to_string(),
                        code: Some(1),
                        stderr: "Could not find file with path".to_string(),
                    });
                }
            };
            tokio::fs::write(&request.output, contents).await.map_err(|source| {
                TranscodeError::Spawn { program: "ffmpeg".to_string(), source }
            })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTranscodeOutcome, FakeTranscoder};

#[cfg(test)]
#[path = "transcode_tests.rs"]
mod tests;
