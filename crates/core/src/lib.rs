// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dmcheck-core: domain types for the dmcheck JIRA connection validator

pub mod clock;
pub mod env_file;
pub mod record;
pub mod response;
pub mod root;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use env_file::{resolve_base_path, EnvFile, EnvFileError, BASE_PATH_KEY, UNKNOWN_BASE_PATH};
pub use record::{
    cache_path, is_iso8601, verify_record, ConnectionRecord, MetadataKind, ProjectMetadata,
    RecordError, CACHE_DIR, CACHE_FILE, MANDATORY_KEYS,
};
pub use response::{extract_account_id, has_capability, json_or_text, JIRA_CAPABILITY_PREFIX};
pub use root::{find_root, marker_path, MARKER_FILE, MAX_ANCESTORS};
