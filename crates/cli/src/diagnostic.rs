// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure diagnostics: what went wrong, how to fix it, where to read more.

use std::fmt;
use std::path::Path;

use dmcheck_core::RecordError;

use crate::color;

pub const DMTOOLS_README: &str = "https://github.com/IstiN/dmtools/blob/main/README.md";
pub const JIRA_API_TOKENS: &str = "https://id.atlassian.com/manage-profile/security/api-tokens";
pub const REQUIRED_ENV_VARS: &str = "JIRA_BASE_PATH, JIRA_EMAIL, JIRA_API_TOKEN";

const INSTALL_UNIX: &str =
    "curl -fsSL https://raw.githubusercontent.com/IstiN/dmtools/main/install | bash";
const INSTALL_WINDOWS: &str = "curl -fsSL https://raw.githubusercontent.com/IstiN/dmtools/main/install.bat -o \"%TEMP%\\dmtools-install.bat\" && \"%TEMP%\\dmtools-install.bat\"";

/// How users re-run a full validation.
const REVALIDATE: &str = "dmcheck";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub fix: Option<String>,
    pub see: Option<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), fix: None, see: None }
    }

    pub fn fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn see(mut self, see: impl Into<String>) -> Self {
        self.see = Some(see.into());
        self
    }

    /// Colored rendering for a terminal.
    pub fn render(&self) -> String {
        let mut out = color::error(&self.message);
        if let Some(fix) = &self.fix {
            out.push_str(&format!("\n{} {}", color::context("Fix:"), fix));
        }
        if let Some(see) = &self.see {
            out.push_str(&format!("\n{} {}", color::context("See:"), see));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(fix) = &self.fix {
            write!(f, "\nFix: {fix}")?;
        }
        if let Some(see) = &self.see {
            write!(f, "\nSee: {see}")?;
        }
        Ok(())
    }
}

pub fn tool_missing() -> Diagnostic {
    Diagnostic::new("dmtools is not on PATH or not installed.")
        .fix(format!(
            "Install: macOS/Linux/Git Bash: {INSTALL_UNIX}  |  Windows: {INSTALL_WINDOWS}  |  Then ensure dmtools is on PATH."
        ))
        .see(DMTOOLS_README)
}

pub fn config_missing() -> Diagnostic {
    Diagnostic::new(
        "JIRA tools are missing from dmtools. dmtools.env is not loaded or does not contain JIRA variables.",
    )
    .fix(format!(
        "Create or fix dmtools.env in the project root. Required: {REQUIRED_ENV_VARS}. Optional: JIRA_AUTH_TYPE (Basic or Bearer). Example: JIRA_BASE_PATH=https://your-company.atlassian.net  JIRA_EMAIL=your@email.com  JIRA_API_TOKEN=<token from link below>."
    ))
    .see(format!("{DMTOOLS_README}  |  API token: {JIRA_API_TOKENS}"))
}

pub fn auth_failed() -> Diagnostic {
    Diagnostic::new("JIRA authentication failed (jira_get_my_profile returned an error).")
        .fix(format!(
            "Check dmtools.env in project root: {REQUIRED_ENV_VARS}. Ensure JIRA_BASE_PATH has no trailing slash. Token may be invalid or expired; create a new API token at the link below."
        ))
        .see(JIRA_API_TOKENS)
}

pub fn account_id_missing() -> Diagnostic {
    Diagnostic::new("jira_get_my_profile succeeded but response did not contain accountId.")
        .fix(format!(
            "Check dmtools output. Ensure {REQUIRED_ENV_VARS} are set in dmtools.env."
        ))
        .see(DMTOOLS_README)
}

pub fn cache_missing(path: &Path) -> Diagnostic {
    Diagnostic::new(format!("Missing required file: {}", path.display()))
        .fix(format!(
            "Run from repo root: {REVALIDATE} (without --verify) to validate JIRA connection and create jira.cfg."
        ))
        .see(DMTOOLS_README)
}

pub fn cache_unreadable(path: &Path, err: &std::io::Error) -> Diagnostic {
    Diagnostic::new(format!("Cannot read {}: {err}", path.display()))
        .fix(format!("Check file permissions, or re-run: {REVALIDATE} to regenerate jira.cfg."))
}

pub fn cache_invalid(path: &Path, err: &RecordError) -> Diagnostic {
    match err {
        RecordError::InvalidJson(e) => {
            Diagnostic::new(format!("Invalid JSON in {}: {e}", path.display()))
                .fix(format!("Re-run: {REVALIDATE} to regenerate a valid jira.cfg."))
        }
        RecordError::MissingKey(key) => {
            Diagnostic::new(format!("Missing required key in {}: {key}", path.display()))
                .fix(format!("Re-run: {REVALIDATE} to refresh jira.cfg."))
        }
        other => Diagnostic::new(format!("Invalid format in {}: {other}.", path.display()))
            .fix(format!("Re-run: {REVALIDATE} to refresh jira.cfg.")),
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
