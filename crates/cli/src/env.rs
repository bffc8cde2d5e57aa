// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::ffi::OsString;
use std::time::Duration;

use dmcheck_adapters::{TOOL_NAME, TOOL_TIMEOUT};
use dmcheck_core::BASE_PATH_KEY;

/// Program run as the external tool: `DMCHECK_DMTOOLS_BIN` > `dmtools`
pub fn tool_program() -> OsString {
    std::env::var_os("DMCHECK_DMTOOLS_BIN")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| OsString::from(TOOL_NAME))
}

/// Per-invocation timeout (default 60s, configurable via `DMCHECK_TOOL_TIMEOUT_MS`).
pub fn tool_timeout() -> Duration {
    std::env::var("DMCHECK_TOOL_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(TOOL_TIMEOUT)
}

/// `JIRA_BASE_PATH` from the process environment, used when `dmtools.env` has none.
pub fn jira_base_path() -> Option<String> {
    std::env::var(BASE_PATH_KEY).ok()
}

/// Tracing filter when `--log-level` is not given.
pub fn log_filter() -> Option<String> {
    std::env::var("DMCHECK_LOG").ok().filter(|s| !s.is_empty())
}
