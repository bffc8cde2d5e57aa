// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persisted connection record (`.dmtools/jira.cfg`).
//!
//! Written wholesale at the end of a successful validation and checked
//! structurally by `--verify`. Verification works on the raw JSON rather than
//! deserializing into [`ConnectionRecord`] so a hand-edited file with odd
//! optional sections still passes as long as the mandatory keys are sound.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Cache directory, relative to the project root.
pub const CACHE_DIR: &str = ".dmtools";

/// Cache file name inside [`CACHE_DIR`].
pub const CACHE_FILE: &str = "jira.cfg";

/// Keys that must be present in every record, in the order they are checked.
pub const MANDATORY_KEYS: [&str; 3] = ["validated_at", "jira_base_path", "account_id"];

/// Path of the cache file under `root`.
pub fn cache_path(root: &Path) -> PathBuf {
    root.join(CACHE_DIR).join(CACHE_FILE)
}

/// Confirmation of a successful validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub validated_at: DateTime<Utc>,
    pub jira_base_path: String,
    pub account_id: String,
    /// Raw `jira_get_my_profile` payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<IndexMap<String, ProjectMetadata>>,
}

impl ConnectionRecord {
    pub fn new(
        validated_at: DateTime<Utc>,
        jira_base_path: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            validated_at,
            jira_base_path: jira_base_path.into(),
            account_id: account_id.into(),
            profile: None,
            projects: None,
        }
    }

    /// Serialize as indented JSON and write to `path`, replacing any existing
    /// file. Parent directories are created as needed.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

/// Cached metadata for a single project. Each entry is the tool's JSON
/// output, or its raw text when the output wasn't JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_types: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
}

impl ProjectMetadata {
    pub fn set(&mut self, kind: MetadataKind, value: Value) {
        let slot = match kind {
            MetadataKind::IssueTypes => &mut self.issue_types,
            MetadataKind::Statuses => &mut self.statuses,
            MetadataKind::Components => &mut self.components,
            MetadataKind::Fields => &mut self.fields,
        };
        *slot = Some(value);
    }

    pub fn get(&self, kind: MetadataKind) -> Option<&Value> {
        match kind {
            MetadataKind::IssueTypes => self.issue_types.as_ref(),
            MetadataKind::Statuses => self.statuses.as_ref(),
            MetadataKind::Components => self.components.as_ref(),
            MetadataKind::Fields => self.fields.as_ref(),
        }
    }
}

/// Per-project metadata fetched after authentication succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    IssueTypes,
    Statuses,
    Components,
    Fields,
}

impl MetadataKind {
    /// Fetch order.
    pub const ALL: [MetadataKind; 4] = [
        MetadataKind::IssueTypes,
        MetadataKind::Statuses,
        MetadataKind::Components,
        MetadataKind::Fields,
    ];

    /// `dmtools` command that fetches this metadata for a project.
    pub fn command(self) -> &'static str {
        match self {
            MetadataKind::IssueTypes => "jira_get_issue_types",
            MetadataKind::Statuses => "jira_get_project_statuses",
            MetadataKind::Components => "jira_get_components",
            MetadataKind::Fields => "jira_get_fields",
        }
    }

    /// Key under the project entry in the cache file.
    pub fn key(self) -> &'static str {
        match self {
            MetadataKind::IssueTypes => "issue_types",
            MetadataKind::Statuses => "statuses",
            MetadataKind::Components => "components",
            MetadataKind::Fields => "fields",
        }
    }
}

/// Structural problems found in a cache file's contents.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("missing required key: {0}")]
    MissingKey(&'static str),
    #[error("{0} must be a non-empty string")]
    EmptyString(&'static str),
    #[error("validated_at must be a non-empty ISO 8601 string")]
    TimestampNotString,
    #[error("validated_at must be parseable as ISO 8601 date (got {0:?})")]
    TimestampUnparseable(String),
}

/// Check the contents of a cache file.
///
/// Checks run in a fixed order and stop at the first failure: JSON syntax,
/// presence of [`MANDATORY_KEYS`], non-blank `jira_base_path` and
/// `account_id`, then a parseable `validated_at`.
pub fn verify_record(content: &str) -> Result<(), RecordError> {
    let data: Value = serde_json::from_str(content)?;

    for key in MANDATORY_KEYS {
        if data.get(key).is_none() {
            return Err(RecordError::MissingKey(key));
        }
    }

    for key in ["jira_base_path", "account_id"] {
        if non_blank_str(&data, key).is_none() {
            return Err(RecordError::EmptyString(key));
        }
    }

    let validated_at = non_blank_str(&data, "validated_at").ok_or(RecordError::TimestampNotString)?;
    if !is_iso8601(validated_at) {
        return Err(RecordError::TimestampUnparseable(validated_at.to_string()));
    }
    Ok(())
}

fn non_blank_str<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y%m%d", "%G-W%V-%u", "%GW%V%u"];
const TIME_FORMATS: [&str; 4] = ["%H:%M:%S%.f", "%H%M%S%.f", "%H:%M", "%H%M"];

/// Whether `s` reads as an ISO 8601 date or date-time.
///
/// Dates may be calendar or week dates, in extended or basic form. The time
/// is optional, follows a `T` or a space, and runs from hour-only to
/// fractional seconds. `Z` is read as UTC; other offsets may omit minutes.
pub fn is_iso8601(s: &str) -> bool {
    let normalized = s.replace('Z', "+00:00");
    [10, 8].into_iter().any(|len| match (normalized.get(..len), normalized.get(len..)) {
        (Some(date), Some(rest)) => is_date(date) && is_time_suffix(rest),
        _ => false,
    })
}

fn is_date(date: &str) -> bool {
    DATE_FORMATS.iter().any(|f| NaiveDate::parse_from_str(date, f).is_ok())
}

/// Everything after the date: nothing, a bare offset, or a time with an
/// optional offset.
fn is_time_suffix(rest: &str) -> bool {
    if rest.is_empty() {
        return true;
    }
    if rest.starts_with(is_sign) {
        return is_offset(rest);
    }
    let Some(time) = rest.strip_prefix(|c: char| c == 'T' || c == ' ') else {
        return false;
    };
    let (clock, offset) = match time.find(is_sign) {
        Some(i) => time.split_at(i),
        None => (time, ""),
    };
    is_clock(clock) && (offset.is_empty() || is_offset(offset))
}

fn is_sign(c: char) -> bool {
    c == '+' || c == '-'
}

fn is_clock(clock: &str) -> bool {
    let clock = clock.replace(',', ".");
    if clock.len() == 2 {
        return NaiveTime::parse_from_str(&format!("{clock}:00"), "%H:%M").is_ok();
    }
    TIME_FORMATS.iter().any(|f| NaiveTime::parse_from_str(&clock, f).is_ok())
}

fn is_offset(offset: &str) -> bool {
    let stamped = format!("2000-01-01T00:00:00{offset}");
    DateTime::parse_from_str(&stamped, "%Y-%m-%dT%H:%M:%S%#z").is_ok()
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
