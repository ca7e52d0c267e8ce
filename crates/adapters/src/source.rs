// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborator seams: where raw jobs and reference data come from.

use async_trait::async_trait;
use chrono::NaiveDate;
use pjs_core::{AccountPis, AccountStorage, NodePartitions};

use crate::AdapterError;

/// Finished-job accounting lines for one day.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Pipe-delimited records of jobs that ended as completed, failed or
    /// cancelled on `day`.
    async fn jobs(&self, day: NaiveDate) -> Result<Vec<String>, AdapterError>;
}

/// Node → partition table for the whole cluster.
#[async_trait]
pub trait NodePartitionSource: Send + Sync {
    async fn node_partitions(&self) -> Result<NodePartitions, AdapterError>;
}

/// Account → PI username table.
#[async_trait]
pub trait AccountPiSource: Send + Sync {
    async fn account_pis(&self) -> Result<AccountPis, AdapterError>;
}

/// Account → storage GB table.
#[async_trait]
pub trait AccountStorageSource: Send + Sync {
    async fn account_storage(&self) -> Result<AccountStorage, AdapterError>;
}

/// Expands a compressed node-range expression into explicit hostnames.
///
/// Implementations must be pure: the same expression always yields the same
/// hosts, so results may be cached for the length of a run.
#[async_trait]
pub trait NodeExpander: Send + Sync {
    async fn expand(&self, expr: &str) -> Result<Vec<String>, AdapterError>;
}
