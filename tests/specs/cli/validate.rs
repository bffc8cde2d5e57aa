//! `dmcheck` validation specs, driven by a fake dmtools script.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn healthy_connection_writes_cache() {
    let temp = Project::configured();
    temp.dmtools(HEALTHY_DMTOOLS);

    temp.dmcheck().passes().stdout_has("OK: JIRA connection validated. Wrote");

    let cache = temp.cache_json();
    assert_eq!(cache["account_id"], "acc-123");
    assert_eq!(cache["jira_base_path"], "https://acme.atlassian.net");
    assert_eq!(cache["profile"]["displayName"], "Ann");
    assert!(cache["validated_at"].as_str().is_some_and(|s| s.starts_with("20")));
    assert!(cache.get("projects").is_none());
}

#[test]
fn failing_version_check_exits_2_without_cache() {
    let temp = Project::configured();
    temp.dmtools("exit 127");

    temp.dmcheck()
        .exits_with(2)
        .stderr_has("dmtools is not on PATH or not installed.")
        .stderr_has("Fix: Install:");
    assert!(!temp.exists(".dmtools/jira.cfg"));
}

#[test]
fn missing_dmtools_binary_exits_2() {
    let temp = Project::configured();
    temp.dmcheck().exits_with(2).stderr_has("dmtools is not on PATH");
    assert!(!temp.exists(".dmtools"));
}

#[test]
fn no_jira_tools_exits_3() {
    let temp = Project::configured();
    temp.dmtools(
        r#"
case "$1" in
  --version) echo "dmtools 1.7.0" ;;
  list) echo '{"tools": [{"name": "confluence_search"}]}' ;;
  *) exit 1 ;;
esac
"#,
    );

    temp.dmcheck()
        .exits_with(3)
        .stderr_has("JIRA tools are missing from dmtools.")
        .stderr_has("JIRA_BASE_PATH, JIRA_EMAIL, JIRA_API_TOKEN");
    assert!(!temp.exists(".dmtools/jira.cfg"));
}

#[test]
fn rejected_credentials_exit_4() {
    let temp = Project::configured();
    temp.dmtools(
        r#"
case "$1" in
  --version) echo "dmtools 1.7.0" ;;
  list) echo '["jira_get_my_profile"]' ;;
  jira_get_my_profile) echo "401 Unauthorized" >&2; exit 1 ;;
esac
"#,
    );

    temp.dmcheck().exits_with(4).stderr_has("JIRA authentication failed");
    assert!(!temp.exists(".dmtools/jira.cfg"));
}

#[test]
fn profile_without_account_id_exits_4() {
    let temp = Project::configured();
    temp.dmtools(
        r#"
case "$1" in
  --version) echo "dmtools 1.7.0" ;;
  list) echo '["jira_get_my_profile"]' ;;
  jira_get_my_profile) echo '{"displayName": "Ann"}' ;;
esac
"#,
    );

    temp.dmcheck().exits_with(4).stderr_has("did not contain accountId");
    assert!(!temp.exists(".dmtools/jira.cfg"));
}

#[test]
fn project_metadata_is_cached_per_key() {
    let temp = Project::configured();
    temp.dmtools(HEALTHY_DMTOOLS);

    temp.dmcheck().args(&["--project", "PROJ"]).passes();

    let cache = temp.cache_json();
    let proj = &cache["projects"]["PROJ"];
    assert_eq!(proj["issue_types"][1]["name"], "Story");
    assert_eq!(proj["fields"], "Summary, Priority");
    // The healthy fake fails statuses and components: they are left out.
    assert!(proj.get("statuses").is_none());
    assert!(proj.get("components").is_none());
}

#[test]
fn validation_runs_from_a_subdirectory() {
    let temp = Project::configured();
    temp.dmtools(HEALTHY_DMTOOLS);
    let nested = temp.dir("services/api/src");

    temp.dmcheck().current_dir(nested).passes();

    assert!(temp.exists(".dmtools/jira.cfg"));
    assert!(!temp.exists("services/api/src/.dmtools"));
}

#[test]
fn base_path_falls_back_to_process_env_then_unknown() {
    let temp = Project::empty();
    temp.file("dmtools.env", "JIRA_EMAIL=ann@acme.com\n");
    temp.dmtools(HEALTHY_DMTOOLS);

    temp.dmcheck().env("JIRA_BASE_PATH", "https://env.atlassian.net").passes();
    assert_eq!(temp.cache_json()["jira_base_path"], "https://env.atlassian.net");

    temp.dmcheck().passes();
    assert_eq!(temp.cache_json()["jira_base_path"], "unknown");
}

#[test]
fn validated_cache_passes_verify() {
    let temp = Project::configured();
    temp.dmtools(HEALTHY_DMTOOLS);

    temp.dmcheck().args(&["--project", "PROJ"]).passes();
    temp.dmcheck()
        .args(&["--verify"])
        .passes()
        .stdout_has("OK: .dmtools/jira.cfg is present and valid.");
}

#[test]
fn rerun_replaces_previous_cache() {
    let temp = Project::configured();
    temp.dmtools(HEALTHY_DMTOOLS);

    temp.dmcheck().args(&["--project", "PROJ"]).passes();
    assert!(temp.cache_json().get("projects").is_some());

    temp.dmcheck().passes();
    let cache = temp.cache_json();
    assert!(cache.get("projects").is_none());
    assert_eq!(cache["account_id"], "acc-123");
}

#[test]
fn failed_rerun_keeps_previous_cache() {
    let temp = Project::configured();
    temp.dmtools(HEALTHY_DMTOOLS);
    temp.dmcheck().passes();
    let before = temp.read_file(".dmtools/jira.cfg");

    temp.dmtools("exit 1");
    temp.dmcheck().exits_with(2);

    assert_eq!(temp.read_file(".dmtools/jira.cfg"), before);
}
