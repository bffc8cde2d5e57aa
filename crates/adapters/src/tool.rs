// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter for invoking the `dmtools` CLI.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;

use crate::subprocess::{run_with_timeout, SubprocessError, TOOL_TIMEOUT};

/// Name of the external tool, as used in diagnostics.
pub const TOOL_NAME: &str = "dmtools";

/// Exit code reported when the tool could not be run at all.
pub const NOT_RUN_EXIT_CODE: i32 = -1;

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Exit 0 with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self { exit_code: 0, stdout: stdout.into(), stderr: String::new() }
    }

    /// Nonzero exit with the given stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self { exit_code, stdout: String::new(), stderr: stderr.into() }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Adapter for running the external tool.
///
/// Failures to run the tool (missing binary, timeout) are reported through
/// [`ToolOutput`] with [`NOT_RUN_EXIT_CODE`], never as an error, so every
/// call site decides for itself how to react.
#[async_trait]
pub trait ToolAdapter: Clone + Send + Sync + 'static {
    async fn run(&self, args: &[&str]) -> ToolOutput;
}

/// Runs the real `dmtools` binary from the project root.
#[derive(Clone, Debug)]
pub struct DmtoolsAdapter {
    program: OsString,
    cwd: PathBuf,
    timeout: Duration,
}

impl DmtoolsAdapter {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { program: OsString::from(TOOL_NAME), cwd: cwd.into(), timeout: TOOL_TIMEOUT }
    }

    /// Use a different executable in place of `dmtools`.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ToolAdapter for DmtoolsAdapter {
    async fn run(&self, args: &[&str]) -> ToolOutput {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(&self.cwd);

        let started = Instant::now();
        match run_with_timeout(cmd, self.timeout, TOOL_NAME).await {
            Ok(output) => {
                // Killed by a signal: no exit code.
                let exit_code = output.status.code().unwrap_or(NOT_RUN_EXIT_CODE);
                tracing::debug!(
                    ?args,
                    exit_code,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "dmtools finished"
                );
                ToolOutput {
                    exit_code,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
            Err(SubprocessError::NotFound { .. }) => {
                tracing::warn!(program = ?self.program, "dmtools not found");
                ToolOutput::failed(NOT_RUN_EXIT_CODE, format!("{TOOL_NAME} not found"))
            }
            Err(SubprocessError::TimedOut { .. }) => {
                ToolOutput::failed(NOT_RUN_EXIT_CODE, format!("{TOOL_NAME} timed out"))
            }
            Err(e) => {
                tracing::warn!(error = %e, "dmtools could not be started");
                ToolOutput::failed(NOT_RUN_EXIT_CODE, e.to_string())
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ToolAdapter, ToolOutput};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeToolState {
        responses: HashMap<String, ToolOutput>,
        calls: Vec<Vec<String>>,
    }

    /// Fake tool adapter for testing.
    ///
    /// Responses are scripted per command (the first argument). Unscripted
    /// commands fail with exit code 1.
    #[derive(Clone, Default)]
    pub struct FakeToolAdapter {
        inner: Arc<Mutex<FakeToolState>>,
    }

    impl FakeToolAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Script the response for `command`, replacing any earlier one.
        pub fn respond(&self, command: &str, output: ToolOutput) -> &Self {
            self.inner.lock().responses.insert(command.to_string(), output);
            self
        }

        /// Get all recorded invocations, in order.
        pub fn calls(&self) -> Vec<Vec<String>> {
            self.inner.lock().calls.clone()
        }

        /// First argument of each recorded invocation.
        pub fn commands(&self) -> Vec<String> {
            self.inner.lock().calls.iter().filter_map(|c| c.first().cloned()).collect()
        }
    }

    #[async_trait]
    impl ToolAdapter for FakeToolAdapter {
        async fn run(&self, args: &[&str]) -> ToolOutput {
            let mut state = self.inner.lock();
            state.calls.push(args.iter().map(|a| a.to_string()).collect());
            let command = args.first().copied().unwrap_or_default();
            state
                .responses
                .get(command)
                .cloned()
                .unwrap_or_else(|| ToolOutput::failed(1, format!("unscripted command: {command}")))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeToolAdapter;

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
