//! `dmcheck --verify` specs: cache checks without calling dmtools.

use crate::prelude::*;
use crate::prelude::assert_eq;

const VALID: &str = r#"{
  "validated_at": "2026-10-18T08:00:00Z",
  "jira_base_path": "https://acme.atlassian.net",
  "account_id": "acc-123"
}"#;

#[test]
fn missing_cache_exits_1_with_guidance() {
    let temp = Project::configured();
    temp.dmcheck()
        .args(&["--verify"])
        .exits_with(1)
        .stderr_has("Missing required file:")
        .stderr_has("Fix: Run from repo root: dmcheck (without --verify)");
}

#[test]
fn malformed_json_exits_1() {
    let temp = Project::configured();
    temp.file(".dmtools/jira.cfg", "{ not json");
    temp.dmcheck().args(&["--verify"]).exits_with(1).stderr_has("Invalid JSON in");
}

#[test]
fn missing_mandatory_keys_exit_1() {
    let temp = Project::configured();
    temp.file(".dmtools/jira.cfg", r#"{"validated_at":"x"}"#);
    temp.dmcheck()
        .args(&["--verify"])
        .exits_with(1)
        .stderr_has("Missing required key")
        .stderr_has("jira_base_path");
}

#[test]
fn unparseable_timestamp_exits_1() {
    let temp = Project::configured();
    temp.file(
        ".dmtools/jira.cfg",
        r#"{"validated_at": "last tuesday", "jira_base_path": "b", "account_id": "a"}"#,
    );
    temp.dmcheck().args(&["--verify"]).exits_with(1).stderr_has("ISO 8601");
}

#[test]
fn valid_cache_passes() {
    let temp = Project::configured();
    temp.file(".dmtools/jira.cfg", VALID);
    temp.dmcheck()
        .args(&["--verify"])
        .passes()
        .stdout_has("OK: .dmtools/jira.cfg is present and valid.");
}

#[test]
fn verify_ignores_project_and_never_runs_dmtools() {
    // No fake dmtools installed: any subprocess call would fail the run.
    let temp = Project::configured();
    temp.file(".dmtools/jira.cfg", VALID);
    temp.dmcheck().args(&["--verify", "--project", "PROJ"]).passes();
    assert_eq!(temp.read_file(".dmtools/jira.cfg"), VALID);
}

#[test]
fn verify_from_subdirectory_uses_project_root() {
    let temp = Project::configured();
    temp.file(".dmtools/jira.cfg", VALID);
    let nested = temp.dir("src/deep/module");
    temp.dmcheck().current_dir(nested).args(&["--verify"]).passes();
}

#[test]
fn basic_format_timestamp_passes() {
    let temp = Project::configured();
    temp.file(
        ".dmtools/jira.cfg",
        r#"{"validated_at": "20261018T091500Z", "jira_base_path": "b", "account_id": "a"}"#,
    );
    temp.dmcheck().args(&["--verify"]).passes();
}
