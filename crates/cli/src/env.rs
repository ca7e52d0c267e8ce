// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable names and access.

pub const SLURM_BIN_DIR: &str = "PJS_SLURM_BIN_DIR";
pub const GPFS_BIN_DIR: &str = "PJS_GPFS_BIN_DIR";
pub const GPFS_FILESYSTEM: &str = "PJS_GPFS_FILESYSTEM";
pub const PROJECTS_DIR: &str = "PJS_PROJECTS_DIR";
pub const COMMAND_TIMEOUT_SECS: &str = "PJS_COMMAND_TIMEOUT_SECS";
pub const WORKERS: &str = "PJS_WORKERS";
pub const NODE_EXPANDER: &str = "PJS_NODE_EXPANDER";

/// Log filter directives, e.g. `pjs_engine=debug,info`
pub const LOG: &str = "PJS_LOG";

/// Optional file receiving a copy of the log
pub const LOG_FILE: &str = "PJS_LOG_FILE";

/// Non-empty, trimmed value of `name`.
pub fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
