// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-fileset storage from GPFS `mmrepquota`.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use pjs_core::{AccountStorage, ReferenceError};
use tokio::process::Command;

use crate::subprocess::{output_lines, run_checked, DEFAULT_COMMAND_TIMEOUT};
use crate::{AccountStorageSource, AdapterError};

pub const DEFAULT_FILESYSTEM: &str = "fs1";

/// `mmrepquota -j <fs> --block-size g`.
#[derive(Debug, Clone)]
pub struct GpfsQuota {
    bin_dir: PathBuf,
    filesystem: String,
    timeout: Duration,
}

impl GpfsQuota {
    pub fn new(bin_dir: impl Into<PathBuf>, filesystem: impl Into<String>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
            filesystem: filesystem.into(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Extract `(fileset, GB)` from the FILESET rows of a report: the fileset
/// name is the first column, the type the third and the block figure the
/// fourth. Banner and header lines are ignored.
pub fn parse_repquota(output: &str) -> Result<AccountStorage, ReferenceError> {
    let mut rows = Vec::new();
    for line in output_lines(output) {
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.get(2) != Some(&"FILESET") {
            continue;
        }
        let malformed = |reason: String| ReferenceError::Malformed {
            table: "account storage",
            line: line.to_string(),
            reason,
        };
        let gb = cols.get(3).ok_or_else(|| malformed("missing block column".to_string()))?;
        let gb = gb.parse::<u64>().map_err(|e| malformed(e.to_string()))?;
        rows.push((cols[0].to_string(), gb));
    }
    Ok(rows.into_iter().collect())
}

#[async_trait]
impl AccountStorageSource for GpfsQuota {
    async fn account_storage(&self) -> Result<AccountStorage, AdapterError> {
        let mut cmd = Command::new(self.bin_dir.join("mmrepquota"));
        cmd.args(["-j", &self.filesystem, "--block-size", "g"]);
        let stdout = run_checked(cmd, self.timeout, "mmrepquota").await?;
        let table = parse_repquota(&stdout)?;
        tracing::debug!(accounts = table.len(), "loaded account storage");
        Ok(table)
    }
}

#[cfg(test)]
#[path = "gpfs_tests.rs"]
mod tests;
