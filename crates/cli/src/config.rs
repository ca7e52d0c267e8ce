// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered run configuration: defaults, TOML file, environment, flags.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use pjs_adapters::gpfs::DEFAULT_FILESYSTEM;
use pjs_adapters::projects::DEFAULT_PROJECTS_DIR;
use pjs_adapters::subprocess::DEFAULT_COMMAND_TIMEOUT;
use pjs_core::{BillingError, BillingPolicy};
use pjs_engine::DEFAULT_WORKERS;
use serde::Deserialize;
use thiserror::Error;

use crate::env;

pub const DEFAULT_SLURM_BIN_DIR: &str = "/gpfs/t2/slurm/apps/current/bin";
pub const DEFAULT_GPFS_BIN_DIR: &str = "/usr/lpp/mmfs/bin";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("{var}={value:?}: {reason}")]
    Env { var: &'static str, value: String, reason: String },

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Billing(#[from] BillingError),
}

/// Which collaborator expands node-range expressions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpanderKind {
    /// `scontrol show hostnames`
    #[default]
    Scontrol,
    /// In-process parser
    Builtin,
}

impl FromStr for ExpanderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scontrol" => Ok(ExpanderKind::Scontrol),
            "builtin" => Ok(ExpanderKind::Builtin),
            other => Err(format!("expected `scontrol` or `builtin`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub slurm_bin_dir: PathBuf,
    pub gpfs_bin_dir: PathBuf,
    pub gpfs_filesystem: String,
    pub projects_dir: PathBuf,
    pub command_timeout_secs: u64,
    pub workers: usize,
    pub node_expander: ExpanderKind,
    pub billing: BillingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slurm_bin_dir: PathBuf::from(DEFAULT_SLURM_BIN_DIR),
            gpfs_bin_dir: PathBuf::from(DEFAULT_GPFS_BIN_DIR),
            gpfs_filesystem: DEFAULT_FILESYSTEM.to_string(),
            projects_dir: PathBuf::from(DEFAULT_PROJECTS_DIR),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT.as_secs(),
            workers: DEFAULT_WORKERS,
            node_expander: ExpanderKind::default(),
            billing: BillingPolicy::default(),
        }
    }
}

impl Config {
    /// Defaults, overlaid by `path` when given, then by `PJS_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(env::var)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Overlay environment overrides read through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup(env::SLURM_BIN_DIR) {
            self.slurm_bin_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(env::GPFS_BIN_DIR) {
            self.gpfs_bin_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(env::GPFS_FILESYSTEM) {
            self.gpfs_filesystem = v;
        }
        if let Some(v) = lookup(env::PROJECTS_DIR) {
            self.projects_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(env::COMMAND_TIMEOUT_SECS) {
            self.command_timeout_secs = parse_env(env::COMMAND_TIMEOUT_SECS, v)?;
        }
        if let Some(v) = lookup(env::WORKERS) {
            self.workers = parse_env(env::WORKERS, v)?;
        }
        if let Some(v) = lookup(env::NODE_EXPANDER) {
            self.node_expander = parse_env(env::NODE_EXPANDER, v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::Invalid("command_timeout_secs must be at least 1".into()));
        }
        if self.gpfs_filesystem.is_empty() {
            return Err(ConfigError::Invalid("gpfs_filesystem is empty".into()));
        }
        self.billing.validate()?;
        Ok(())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

fn parse_env<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Env { var, reason: e.to_string(), value })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
