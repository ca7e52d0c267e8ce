// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

use pjs_core::{ParseError, ReferenceError};
use thiserror::Error;

/// Errors from collaborator adapters.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("failed to spawn `{command}`: {source}")]
    SpawnFailed { command: String, source: std::io::Error },

    #[error("`{command}` timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed { command: String, status: String, stderr: String },

    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("no user entry for uid {uid} owning {}", path.display())]
    UnknownOwner { path: PathBuf, uid: u32 },

    #[error(transparent)]
    Malformed(#[from] ReferenceError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Other(String),
}
