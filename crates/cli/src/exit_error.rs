// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

use crate::diagnostic::Diagnostic;

/// Exit codes, one per failure class.
pub mod code {
    /// `--verify` found a missing or malformed cache file.
    pub const VERIFY_FAILED: i32 = 1;
    /// `dmtools` is not installed or not runnable.
    pub const TOOL_MISSING: i32 = 2;
    /// `dmtools` lists no JIRA capabilities (env file missing or incomplete).
    pub const CONFIG_MISSING: i32 = 3;
    /// JIRA rejected the credentials, or the profile response was unusable.
    pub const AUTH_FAILED: i32 = 4;
}

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
    pub diagnostic: Diagnostic,
}

impl ExitError {
    /// Exit with `code`, printing `diagnostic` on stderr.
    pub fn diagnose(code: i32, diagnostic: Diagnostic) -> Self {
        Self { code, message: diagnostic.to_string(), diagnostic }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
