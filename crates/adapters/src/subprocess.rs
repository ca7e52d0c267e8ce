// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess helpers with timeouts.

use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

use crate::AdapterError;

/// Default ceiling for a single scheduler or storage query.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Run a command to completion, killing it if it outlives `timeout`.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    label: &str,
) -> Result<Output, AdapterError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(source)) => Err(AdapterError::SpawnFailed { command: label.to_string(), source }),
        Err(_) => Err(AdapterError::TimedOut { command: label.to_string(), timeout }),
    }
}

/// Run a command and return its stdout, failing on a non-zero exit.
pub async fn run_checked(
    cmd: Command,
    timeout: Duration,
    label: &str,
) -> Result<String, AdapterError> {
    tracing::debug!(command = label, "running collaborator command");
    let output = run_with_timeout(cmd, timeout, label).await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AdapterError::CommandFailed {
            command: label.to_string(),
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Non-blank, trimmed lines of command output.
pub fn output_lines(stdout: &str) -> impl Iterator<Item = &str> {
    stdout.lines().map(str::trim).filter(|l| !l.is_empty())
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
