// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dmcheck - validate a dmtools JIRA connection

mod color;
mod commands;
mod diagnostic;
mod env;
mod exit_error;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use dmcheck_adapters::DmtoolsAdapter;
use dmcheck_core::{find_root, SystemClock};

use crate::commands::validate::ValidateContext;
use crate::exit_error::ExitError;

/// Validate the JIRA connection via dmtools and write .dmtools/jira.cfg,
/// or only verify jira.cfg (--verify).
#[derive(Parser, Debug)]
#[command(name = "dmcheck", version, styles = color::styles())]
struct Cli {
    /// Only validate that .dmtools/jira.cfg exists and has mandatory keys; do not call dmtools
    #[arg(long)]
    verify: bool,

    /// Project key whose issue types, statuses, components and fields are cached into jira.cfg
    #[arg(long, value_name = "PROJECT_KEY")]
    project: Option<String>,

    /// Log level (trace, debug, info, warn, error); defaults to $DMCHECK_LOG or warn
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("{}", exit.diagnostic.render());
                std::process::exit(exit.code);
            }
            None => {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

fn init_logging(level: Option<&str>) {
    let directive = level.map(str::to_string).or_else(env::log_filter);
    let filter = directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let cwd = cwd.canonicalize().unwrap_or(cwd);
    let root = find_root(&cwd);
    tracing::debug!(root = %root.display(), "located project root");

    if cli.verify {
        return commands::verify::handle(&root);
    }

    let tool = DmtoolsAdapter::new(&root)
        .with_program(env::tool_program())
        .with_timeout(env::tool_timeout());
    let ctx = ValidateContext { root, project: cli.project, env_base_path: env::jira_base_path() };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    runtime.block_on(commands::validate::handle(&tool, &SystemClock, &ctx))
}
