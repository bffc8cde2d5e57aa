//! CLI help output specs

use crate::prelude::*;

#[test]
fn dmcheck_help_shows_usage_and_flags() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--verify")
        .stdout_has("--project <PROJECT_KEY>")
        .stdout_has("--log-level");
}

#[test]
fn dmcheck_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn unknown_flag_is_rejected() {
    cli().args(&["--bogus"]).fails().stderr_has("--bogus");
}

#[test]
fn specs_run_against_the_built_binary() {
    assert!(dmcheck_bin().ends_with(format!("dmcheck{}", std::env::consts::EXE_SUFFIX)));
}
