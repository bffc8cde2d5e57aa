// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsers for `dmtools` stdout.
//!
//! The tool's output format is not under our control, so both parsers treat
//! anything they don't recognize as "not found" rather than an error.

use serde_json::Value;

/// Prefix shared by every JIRA capability in `dmtools list`.
pub const JIRA_CAPABILITY_PREFIX: &str = "jira_";

/// Pull the `accountId` out of a `jira_get_my_profile` response.
///
/// Accepts `{"accountId": "..."}` and `{"result": {"accountId": "..."}}`.
pub fn extract_account_id(stdout: &str) -> Option<String> {
    let data: Value = serde_json::from_str(stdout).ok()?;
    let obj = data.as_object()?;
    if let Some(id) = obj.get("accountId").and_then(Value::as_str) {
        return Some(id.to_string());
    }
    obj.get("result")
        .and_then(Value::as_object)
        .and_then(|result| result.get("accountId"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Check a `dmtools list` response for any tool whose name starts with `prefix`.
///
/// The listing is either `{"tools": [...]}` or a bare array. Entries are
/// plain names or `{"name": "..."}` objects; both shapes are seen in the wild.
pub fn has_capability(stdout: &str, prefix: &str) -> bool {
    let Ok(data) = serde_json::from_str::<Value>(stdout) else {
        return false;
    };
    let tools = match data.get("tools") {
        Some(Value::Array(tools)) => tools.as_slice(),
        _ => data.as_array().map(Vec::as_slice).unwrap_or_default(),
    };
    tools.iter().filter_map(tool_name).any(|name| name.starts_with(prefix))
}

fn tool_name(entry: &Value) -> Option<&str> {
    match entry {
        Value::String(name) => Some(name),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str),
        _ => None,
    }
}

/// Parse `stdout` as JSON, falling back to the trimmed raw text.
///
/// Returns `None` for blank output.
pub fn json_or_text(stdout: &str) -> Option<Value> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
