// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution with a hard timeout.

use std::process::Output;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

/// Default timeout for a single `dmtools` invocation.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(60);

/// Why a subprocess produced no [`Output`].
#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("{description}: program not found")]
    NotFound { description: String },
    #[error("{description}: timed out after {timeout:?}")]
    TimedOut { description: String, timeout: Duration },
    #[error("{description}: failed to spawn: {source}")]
    Spawn { description: String, source: std::io::Error },
}

/// Run `cmd` to completion, capturing stdout and stderr.
///
/// The child is killed if it is still running when `timeout` elapses.
/// A nonzero exit status is not an error; callers inspect `Output::status`.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, SubprocessError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SubprocessError::NotFound { description: description.to_string() })
        }
        Ok(Err(source)) => {
            Err(SubprocessError::Spawn { description: description.to_string(), source })
        }
        Err(_) => {
            tracing::warn!(description, ?timeout, "subprocess timed out");
            Err(SubprocessError::TimedOut { description: description.to_string(), timeout })
        }
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
