// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pjs-adapters: scheduler, storage and directory collaborators

mod error;
pub mod gpfs;
pub mod hostlist;
pub mod projects;
pub mod slurm;
pub mod source;
pub mod subprocess;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use error::AdapterError;
pub use gpfs::GpfsQuota;
pub use hostlist::HostlistExpander;
pub use projects::ProjectDirs;
pub use slurm::SlurmCli;
pub use source::{
    AccountPiSource, AccountStorageSource, JobSource, NodeExpander, NodePartitionSource,
};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeCluster, FakeSource};
