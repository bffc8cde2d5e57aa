// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dmcheck --verify`: check the cached record without calling dmtools.

use std::path::{Path, PathBuf};

use anyhow::Result;

use dmcheck_core::{cache_path, verify_record};

use crate::color;
use crate::diagnostic;
use crate::exit_error::{code, ExitError};

pub fn handle(root: &Path) -> Result<()> {
    verify(root)?;
    println!("{}", color::ok("OK: .dmtools/jira.cfg is present and valid."));
    Ok(())
}

/// Check the cache file under `root`, returning its path when it is sound.
pub fn verify(root: &Path) -> Result<PathBuf, ExitError> {
    let path = cache_path(root);
    if !path.is_file() {
        return Err(ExitError::diagnose(code::VERIFY_FAILED, diagnostic::cache_missing(&path)));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| {
        ExitError::diagnose(code::VERIFY_FAILED, diagnostic::cache_unreadable(&path, &e))
    })?;

    verify_record(&content).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "cache file rejected");
        ExitError::diagnose(code::VERIFY_FAILED, diagnostic::cache_invalid(&path, &e))
    })?;

    Ok(path)
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
