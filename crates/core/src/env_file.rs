// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented `KEY=value` scanner for `dmtools.env`.
//!
//! This is not a shell parser. It understands blank lines, `#` comments, an
//! optional `export ` prefix, and one layer of matching quotes around the
//! value. Anything else on the line is taken literally.

use std::path::Path;
use thiserror::Error;

/// Key holding the JIRA instance URL.
pub const BASE_PATH_KEY: &str = "JIRA_BASE_PATH";

/// Base path recorded when neither the env file nor the process env has one.
pub const UNKNOWN_BASE_PATH: &str = "unknown";

#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
}

/// Parsed `KEY=value` entries in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    pub fn parse(content: &str) -> Self {
        let entries = content.lines().filter_map(parse_line).collect();
        Self { entries }
    }

    /// Load and parse `path`. Returns `Ok(None)` when it is not a regular file.
    pub fn load(path: &Path) -> Result<Option<Self>, EnvFileError> {
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .map_err(|source| EnvFileError::Read { path: path.display().to_string(), source })?;
        Ok(Some(Self::parse(&content)))
    }

    /// Value of the first entry named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Trimmed value of the first entry named `key` that is not blank.
    pub fn first_non_blank(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .find(|v| !v.is_empty())
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].trim();
        }
    }
    value
}

/// Resolve the JIRA base path recorded in the cache.
///
/// Order: first non-blank env file value, then the process environment
/// value, then [`UNKNOWN_BASE_PATH`].
pub fn resolve_base_path(env_file: Option<&EnvFile>, process_value: Option<&str>) -> String {
    env_file
        .and_then(|f| f.first_non_blank(BASE_PATH_KEY))
        .or_else(|| process_value.map(str::trim).filter(|v| !v.is_empty()))
        .unwrap_or(UNKNOWN_BASE_PATH)
        .to_string()
}

#[cfg(test)]
#[path = "env_file_tests.rs"]
mod tests;
