// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dmcheck` (default mode): validate the JIRA connection through dmtools.
//!
//! Runs version check → capability check → auth check → optional project
//! metadata fetch → persist. The first failing step ends the run with its
//! own exit code; nothing is written unless every mandatory step passes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use indexmap::IndexMap;

use dmcheck_adapters::ToolAdapter;
use dmcheck_core::{
    cache_path, extract_account_id, has_capability, json_or_text, marker_path,
    resolve_base_path, Clock, ConnectionRecord, EnvFile, MetadataKind, ProjectMetadata,
    JIRA_CAPABILITY_PREFIX,
};

use crate::color;
use crate::diagnostic;
use crate::exit_error::{code, ExitError};

/// Inputs read from the process environment at startup.
#[derive(Debug, Clone)]
pub struct ValidateContext {
    /// Located project root; also the working directory for dmtools.
    pub root: PathBuf,
    /// Project key whose metadata should be cached.
    pub project: Option<String>,
    /// `JIRA_BASE_PATH` from the process environment.
    pub env_base_path: Option<String>,
}

/// A record that was written to disk.
#[derive(Debug)]
pub struct Validated {
    pub path: PathBuf,
    pub record: ConnectionRecord,
}

pub async fn handle<T: ToolAdapter, C: Clock>(
    tool: &T,
    clock: &C,
    ctx: &ValidateContext,
) -> Result<()> {
    let validated = validate(tool, clock, ctx).await?;
    tracing::debug!(
        account_id = %validated.record.account_id,
        jira_base_path = %validated.record.jira_base_path,
        "validation complete"
    );
    println!(
        "{}",
        color::ok(&format!("OK: JIRA connection validated. Wrote {}", validated.path.display()))
    );
    Ok(())
}

pub async fn validate<T: ToolAdapter, C: Clock>(
    tool: &T,
    clock: &C,
    ctx: &ValidateContext,
) -> Result<Validated> {
    let version = tool.run(&["--version"]).await;
    if !version.success() {
        tracing::info!(
            exit_code = version.exit_code,
            stderr = %version.stderr.trim(),
            "version check failed"
        );
        return Err(ExitError::diagnose(code::TOOL_MISSING, diagnostic::tool_missing()).into());
    }
    tracing::info!(version = %version.stdout.trim(), "dmtools available");

    let list = tool.run(&["list"]).await;
    if !list.success() || !has_capability(&list.stdout, JIRA_CAPABILITY_PREFIX) {
        tracing::info!(exit_code = list.exit_code, "no jira capabilities listed");
        return Err(ExitError::diagnose(code::CONFIG_MISSING, diagnostic::config_missing()).into());
    }

    let profile = tool.run(&["jira_get_my_profile"]).await;
    if !profile.success() {
        tracing::info!(
            exit_code = profile.exit_code,
            stderr = %profile.stderr.trim(),
            "profile fetch failed"
        );
        return Err(ExitError::diagnose(code::AUTH_FAILED, diagnostic::auth_failed()).into());
    }
    let Some(account_id) = extract_account_id(&profile.stdout).filter(|id| !id.is_empty()) else {
        return Err(ExitError::diagnose(code::AUTH_FAILED, diagnostic::account_id_missing()).into());
    };
    tracing::info!(%account_id, "authenticated");

    let mut record = ConnectionRecord::new(clock.now_utc(), base_path(ctx), account_id);
    record.profile = serde_json::from_str(&profile.stdout).ok();

    if let Some(project) = ctx.project.as_deref().filter(|p| !p.is_empty()) {
        let metadata = fetch_metadata(tool, project).await;
        record.projects = Some(IndexMap::from([(project.to_string(), metadata)]));
    }

    let path = cache_path(&ctx.root);
    record.write(&path).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "connection record written");

    Ok(Validated { path, record })
}

/// Base path from `dmtools.env`, then the process env, then `"unknown"`.
///
/// An unreadable env file is treated as absent; the value is informational.
fn base_path(ctx: &ValidateContext) -> String {
    let env_file = match EnvFile::load(&marker_path(&ctx.root)) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable env file");
            None
        }
    };
    resolve_base_path(env_file.as_ref(), ctx.env_base_path.as_deref())
}

/// Fetch each metadata kind for `project`. Failed fetches are left out.
async fn fetch_metadata<T: ToolAdapter>(tool: &T, project: &str) -> ProjectMetadata {
    let mut metadata = ProjectMetadata::default();
    for kind in MetadataKind::ALL {
        let output = tool.run(&[kind.command(), project]).await;
        let value = if output.success() { json_or_text(&output.stdout) } else { None };
        match value {
            Some(value) => metadata.set(kind, value),
            None => tracing::debug!(
                project,
                key = kind.key(),
                exit_code = output.exit_code,
                "metadata omitted"
            ),
        }
    }
    metadata
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
