// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler queries through the Slurm command-line tools.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use pjs_core::NodePartitions;
use tokio::process::Command;

use crate::subprocess::{output_lines, run_checked, DEFAULT_COMMAND_TIMEOUT};
use crate::{AdapterError, JobSource, NodeExpander, NodePartitionSource};

/// Column list requested from `sacct`; must match the raw record layout.
pub const SACCT_FORMAT: &str =
    "JobID,JobName,User,Account,Partition,Elapsed,NNodes,NCPUS,AllocTRES,Submit,Start,End,Nodelist,State";

/// Terminal states to report: failed, completed, cancelled.
pub const SACCT_STATES: &str = "F,CD,CA";

/// `sacct` / `sinfo` / `scontrol` found under one bin directory.
#[derive(Debug, Clone)]
pub struct SlurmCli {
    bin_dir: PathBuf,
    timeout: Duration,
}

impl SlurmCli {
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self { bin_dir: bin_dir.into(), timeout: DEFAULT_COMMAND_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    fn command(&self, tool: &str) -> Command {
        Command::new(self.bin_dir.join(tool))
    }
}

/// `sacct` arguments selecting allocations that ended within `day`.
pub fn sacct_args(day: NaiveDate) -> Vec<String> {
    let day = day.format("%Y-%m-%d");
    vec![
        "-X".to_string(),
        "-P".to_string(),
        "-n".to_string(),
        format!("--starttime={day}T00:00:00"),
        format!("--endtime={day}T23:59:59"),
        format!("--state={SACCT_STATES}"),
        format!("--format={SACCT_FORMAT}"),
    ]
}

#[async_trait]
impl JobSource for SlurmCli {
    async fn jobs(&self, day: NaiveDate) -> Result<Vec<String>, AdapterError> {
        let mut cmd = self.command("sacct");
        cmd.args(sacct_args(day));
        let stdout = run_checked(cmd, self.timeout, "sacct").await?;
        // Record lines keep their inner whitespace; only blank lines are dropped.
        let lines: Vec<String> = stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect();
        tracing::debug!(%day, count = lines.len(), "fetched accounting records");
        Ok(lines)
    }
}

#[async_trait]
impl NodePartitionSource for SlurmCli {
    async fn node_partitions(&self) -> Result<NodePartitions, AdapterError> {
        let mut cmd = self.command("sinfo");
        cmd.args(["-h", "-o", "%n,%P"]);
        let stdout = run_checked(cmd, self.timeout, "sinfo").await?;
        let table = NodePartitions::parse(&stdout)?;
        tracing::debug!(nodes = table.len(), "loaded node partitions");
        Ok(table)
    }
}

#[async_trait]
impl NodeExpander for SlurmCli {
    async fn expand(&self, expr: &str) -> Result<Vec<String>, AdapterError> {
        let mut cmd = self.command("scontrol");
        cmd.args(["show", "hostnames", expr]);
        let stdout = run_checked(cmd, self.timeout, "scontrol show hostnames").await?;
        Ok(output_lines(&stdout).map(str::to_string).collect())
    }
}

#[cfg(test)]
#[path = "slurm_tests.rs"]
mod tests;
