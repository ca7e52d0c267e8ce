// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for specs.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;

pub use similar_asserts::assert_eq;

pub const BIN: &str = "process-job-stats";

/// The day every fake cluster reports jobs for.
pub const DAY: &str = "2025-02-03";

/// Command for the binary with a clean environment.
pub fn cli() -> Cli {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    for (key, _) in std::env::vars() {
        if key.starts_with("PJS_") {
            cmd.env_remove(&key);
        }
    }
    Cli { cmd }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        assert!(
            output.status.success(),
            "expected success, got {:?}\nstderr:\n{}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    pub fn fails_with(mut self, code: i32) -> RunAssert {
        let output = self.cmd.output().unwrap();
        assert_eq!(
            output.status.code(),
            Some(code),
            "stderr:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }

    /// Non-empty stdout lines, header first when present, rows sorted.
    pub fn rows(&self) -> Vec<String> {
        let stdout = self.stdout();
        let mut lines: Vec<String> = stdout.lines().map(str::to_string).collect();
        let header = match lines.first() {
            Some(first) if first.starts_with("JobID,") => Some(lines.remove(0)),
            _ => None,
        };
        lines.sort();
        header.into_iter().chain(lines).collect()
    }
}

/// A throwaway cluster: fake `sacct`, `sinfo`, `scontrol` and `mmrepquota`
/// scripts plus a projects root owned by the current user.
pub struct Cluster {
    dir: tempfile::TempDir,
}

impl Cluster {
    /// Five nodes, two accounts, no jobs yet.
    pub fn new() -> Self {
        let cluster = Self { dir: tempfile::tempdir().unwrap() };
        std::fs::create_dir_all(cluster.slurm_bin()).unwrap();
        std::fs::create_dir_all(cluster.gpfs_bin()).unwrap();
        std::fs::create_dir_all(cluster.projects()).unwrap();

        cluster.jobs(&[]);
        cluster.nodes("n1,compute*\nn2,cluster1\nn3,memory\nn4,kern\ng1,gpu\n");
        cluster.project("hpcrcf");
        cluster.project("kernlab");
        cluster.quotas(&[("hpcrcf", 1024), ("kernlab", 2048)]);
        cluster.script(
            &cluster.slurm_bin(),
            "scontrol",
            r#"[ "$1 $2" = "show hostnames" ] || exit 2
echo "$3" >> "$(dirname "$0")/scontrol.calls"
echo "$3" | tr ',' '\n'"#,
        );
        cluster
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn slurm_bin(&self) -> PathBuf {
        self.root().join("slurm/bin")
    }

    pub fn gpfs_bin(&self) -> PathBuf {
        self.root().join("gpfs/bin")
    }

    pub fn projects(&self) -> PathBuf {
        self.root().join("projects")
    }

    /// Raw accounting lines `sacct` prints.
    pub fn jobs(&self, lines: &[&str]) {
        let data = self.root().join("jobs.txt");
        std::fs::write(&data, lines.iter().map(|l| format!("{l}\n")).collect::<String>())
            .unwrap();
        self.script(
            &self.slurm_bin(),
            "sacct",
            &format!(
                "echo \"$@\" > \"$(dirname \"$0\")/sacct.args\"\ncat '{}'",
                data.display()
            ),
        );
    }

    /// `node,partition` lines `sinfo` prints.
    pub fn nodes(&self, table: &str) {
        let data = self.root().join("nodes.txt");
        std::fs::write(&data, table).unwrap();
        self.script(&self.slurm_bin(), "sinfo", &format!("cat '{}'", data.display()));
    }

    pub fn project(&self, account: &str) {
        std::fs::create_dir_all(self.projects().join(account)).unwrap();
    }

    pub fn quotas(&self, filesets: &[(&str, u64)]) {
        let mut report = String::from("*** Report for FILESET quotas on fs1\n");
        report.push_str("Name fileset type GB quota limit in_doubt grace\n");
        for (name, gb) in filesets {
            report.push_str(&format!("{name} root FILESET {gb} {gb} {gb} 0 none\n"));
        }
        let data = self.root().join("repquota.txt");
        std::fs::write(&data, report).unwrap();
        self.script(
            &self.gpfs_bin(),
            "mmrepquota",
            &format!(
                "echo \"$@\" > \"$(dirname \"$0\")/mmrepquota.args\"\ncat '{}'",
                data.display()
            ),
        );
    }

    /// Replace `name` with a script that fails.
    pub fn break_tool(&self, dir: &Path, name: &str) {
        self.script(dir, name, "echo \"$0: connection refused\" >&2\nexit 1");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.root().join(relative)).unwrap_or_default()
    }

    /// The binary pointed at this cluster, expanding node ranges in-process.
    pub fn cli(&self) -> Cli {
        cli()
            .env("PJS_SLURM_BIN_DIR", self.slurm_bin())
            .env("PJS_GPFS_BIN_DIR", self.gpfs_bin())
            .env("PJS_PROJECTS_DIR", self.projects())
            .env("PJS_COMMAND_TIMEOUT_SECS", "30")
            .env("PJS_NODE_EXPANDER", "builtin")
            .args(&["--day", DAY])
    }

    fn script(&self, dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}

/// Login name of the user running the specs; owns every fake project dir.
pub fn current_user() -> String {
    let output = std::process::Command::new("id").arg("-un").output().unwrap();
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Builds raw accounting lines field by field.
pub struct Job {
    fields: [String; 14],
}

impl Job {
    /// An hour on `n1,n2` with 8 CPUs, submitted to `compute` by `hpcrcf`.
    pub fn new(id: &str) -> Self {
        let fields = [
            id,
            "analysis",
            "alice",
            "hpcrcf",
            "compute",
            "01:00:00",
            "2",
            "8",
            "billing=8,cpu=8,mem=64G,node=2",
            "2025-02-03T09:30:00",
            "2025-02-03T10:00:00",
            "2025-02-03T11:00:00",
            "n[1-2]",
            "COMPLETED",
        ]
        .map(str::to_string);
        Self { fields }
    }

    fn set(mut self, index: usize, value: &str) -> Self {
        self.fields[index] = value.to_string();
        self
    }

    pub fn account(self, v: &str) -> Self {
        self.set(3, v)
    }

    pub fn partition(self, v: &str) -> Self {
        self.set(4, v)
    }

    pub fn cpus(self, v: &str) -> Self {
        self.set(7, v)
    }

    pub fn tres(self, v: &str) -> Self {
        self.set(8, v)
    }

    pub fn start(self, v: &str) -> Self {
        self.set(10, v)
    }

    pub fn nodes(self, v: &str) -> Self {
        self.set(12, v)
    }

    pub fn state(self, v: &str) -> Self {
        self.set(13, v)
    }

    pub fn line(&self) -> String {
        self.fields.join("|")
    }
}
