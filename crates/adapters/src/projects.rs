// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Account → PI from ownership of the project directories.
//!
//! Every account has a directory `<root>/<account>` owned by its PI.

use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use nix::unistd::{Uid, User};
use pjs_core::AccountPis;

use crate::{AccountPiSource, AdapterError};

pub const DEFAULT_PROJECTS_DIR: &str = "/gpfs/projects";

#[derive(Debug, Clone)]
pub struct ProjectDirs {
    root: PathBuf,
}

impl ProjectDirs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AccountPiSource for ProjectDirs {
    async fn account_pis(&self) -> Result<AccountPis, AdapterError> {
        let root = self.root.clone();
        // Directory walk and passwd lookups are blocking calls.
        let pairs = tokio::task::spawn_blocking(move || scan(&root, username_for_uid))
            .await
            .map_err(|e| AdapterError::Other(format!("project scan task failed: {e}")))??;
        tracing::debug!(accounts = pairs.len(), "loaded account PIs");
        Ok(pairs.into_iter().collect())
    }
}

/// `(account, owner)` for each visible directory directly under `root`.
pub(crate) fn scan(
    root: &Path,
    resolve: impl Fn(u32) -> Result<Option<String>, AdapterError>,
) -> Result<Vec<(String, String)>, AdapterError> {
    let io_err = |path: &Path, source| AdapterError::Io { path: path.to_path_buf(), source };

    let mut pairs = Vec::new();
    for entry in std::fs::read_dir(root).map_err(|e| io_err(root, e))? {
        let entry = entry.map_err(|e| io_err(root, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let meta = std::fs::metadata(&path).map_err(|e| io_err(&path, e))?;
        if !meta.is_dir() {
            continue;
        }
        let uid = meta.uid();
        let owner = resolve(uid)?.ok_or(AdapterError::UnknownOwner { path, uid })?;
        pairs.push((name, owner));
    }
    pairs.sort();
    Ok(pairs)
}

fn username_for_uid(uid: u32) -> Result<Option<String>, AdapterError> {
    User::from_uid(Uid::from_raw(uid))
        .map(|user| user.map(|u| u.name))
        .map_err(|e| AdapterError::Other(format!("passwd lookup for uid {uid} failed: {e}")))
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
