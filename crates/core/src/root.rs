// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project root discovery.
//!
//! The root is the nearest directory holding a `dmtools.env` file. Every
//! other path the validator touches (the cache file, the subprocess working
//! directory) hangs off it.

use std::path::{Path, PathBuf};

/// Marker file whose presence defines the project root.
pub const MARKER_FILE: &str = "dmtools.env";

/// Number of ancestors searched above the starting directory.
pub const MAX_ANCESTORS: usize = 19;

/// Walk up from `cwd` looking for [`MARKER_FILE`].
///
/// Checks `cwd` itself plus at most [`MAX_ANCESTORS`] parents. Falls back to
/// `cwd` when no marker is found or the filesystem root is reached first.
pub fn find_root(cwd: &Path) -> PathBuf {
    cwd.ancestors()
        .take(MAX_ANCESTORS + 1)
        .find(|dir| dir.join(MARKER_FILE).is_file())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf())
}

/// Path of the marker file under `root`.
pub fn marker_path(root: &Path) -> PathBuf {
    root.join(MARKER_FILE)
}

#[cfg(test)]
#[path = "root_tests.rs"]
mod tests;
