// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod help;
#[cfg(unix)]
mod validate;
mod verify;
