// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Process-boundary adapters for dmcheck

pub mod subprocess;
pub mod tool;

pub use subprocess::{run_with_timeout, SubprocessError, TOOL_TIMEOUT};
pub use tool::{DmtoolsAdapter, ToolAdapter, ToolOutput, NOT_RUN_EXIT_CODE, TOOL_NAME};

#[cfg(any(test, feature = "test-support"))]
pub use tool::FakeToolAdapter;
