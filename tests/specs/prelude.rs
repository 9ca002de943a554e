// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: run `sgf` with a scrubbed environment and assert on the
//! result.

use assert_cmd::Command;

/// Every variable the binary reads, removed before each run.
const SCRUBBED: &[&str] = &[
    "SHOTGUN_SERVER",
    "SHOTGUN_SCRIPT_NAME",
    "SHOTGUN_SCRIPT_KEY",
    "AWS_PROJECT_BUCKET",
    "CONDUCTOR_URL",
    "CONDUCTOR_API_KEY",
    "CONDUCTOR_OUTPUT_PATH",
    "CONDUCTOR_S3_BUCKET",
    "CONDUCTOR_S3_PATH",
    "SGF_CONFIG",
    "SGF_LOG_DIR",
    "RUST_LOG",
];

pub struct CliBuilder {
    cmd: Command,
}

pub fn cli() -> CliBuilder {
    let mut cmd = Command::cargo_bin("sgf").unwrap();
    for name in SCRUBBED {
        cmd.env_remove(name);
    }
    cmd.env("NO_COLOR", "1");
    CliBuilder { cmd }
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert!(run.success, "expected success, got failure\nstdout: {}\nstderr: {}", run.stdout, run.stderr);
        run
    }

    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert!(!run.success, "expected failure, got success\nstdout: {}", run.stdout);
        run
    }
}

pub struct RunAssert {
    success: bool,
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for RunAssert {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunAssert {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}\nstdout: {}", self.stdout);
        self
    }

    pub fn stdout_is(self, expected: &str) -> Self {
        assert_eq!(self.stdout, expected);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}\nstderr: {}", self.stderr);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}
