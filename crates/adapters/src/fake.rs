// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory cluster implementing every collaborator seam.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use pjs_core::{AccountPis, AccountStorage, NodePartitions, ReferenceIndices};

use crate::{
    AccountPiSource, AccountStorageSource, AdapterError, JobSource, NodeExpander,
    NodePartitionSource,
};

/// Which collaborator a fake failure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakeSource {
    Jobs,
    NodePartitions,
    AccountPis,
    AccountStorage,
}

#[derive(Default)]
struct FakeClusterState {
    jobs: Vec<String>,
    indices: ReferenceIndices,
    expansions: HashMap<String, Vec<String>>,
    expand_calls: HashMap<String, usize>,
    failing_sources: HashSet<FakeSource>,
    failing_expressions: HashSet<String>,
    requested_days: Vec<NaiveDate>,
}

/// Fake cluster for testing.
///
/// Node expressions without an explicit mapping are expanded with the
/// built-in hostlist parser. Every `expand` call is counted.
#[derive(Clone, Default)]
pub struct FakeCluster {
    inner: Arc<Mutex<FakeClusterState>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indices(indices: ReferenceIndices) -> Self {
        let cluster = Self::new();
        cluster.inner.lock().indices = indices;
        cluster
    }

    pub fn set_jobs<I, S>(&self, jobs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.lock().jobs = jobs.into_iter().map(Into::into).collect();
    }

    /// Pin the expansion of `expr`.
    pub fn set_expansion(&self, expr: &str, hosts: &[&str]) {
        self.inner
            .lock()
            .expansions
            .insert(expr.to_string(), hosts.iter().map(|h| h.to_string()).collect());
    }

    pub fn fail_source(&self, source: FakeSource) {
        self.inner.lock().failing_sources.insert(source);
    }

    pub fn fail_expansion(&self, expr: &str) {
        self.inner.lock().failing_expressions.insert(expr.to_string());
    }

    /// Number of times `expr` reached the expander.
    pub fn expand_calls(&self, expr: &str) -> usize {
        self.inner.lock().expand_calls.get(expr).copied().unwrap_or(0)
    }

    pub fn total_expand_calls(&self) -> usize {
        self.inner.lock().expand_calls.values().sum()
    }

    pub fn requested_days(&self) -> Vec<NaiveDate> {
        self.inner.lock().requested_days.clone()
    }

    fn check(&self, source: FakeSource) -> Result<(), AdapterError> {
        if self.inner.lock().failing_sources.contains(&source) {
            return Err(AdapterError::Other(format!("injected {source:?} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl JobSource for FakeCluster {
    async fn jobs(&self, day: NaiveDate) -> Result<Vec<String>, AdapterError> {
        self.check(FakeSource::Jobs)?;
        let mut inner = self.inner.lock();
        inner.requested_days.push(day);
        Ok(inner.jobs.clone())
    }
}

#[async_trait]
impl NodePartitionSource for FakeCluster {
    async fn node_partitions(&self) -> Result<NodePartitions, AdapterError> {
        self.check(FakeSource::NodePartitions)?;
        Ok(self.inner.lock().indices.node_partitions.clone())
    }
}

#[async_trait]
impl AccountPiSource for FakeCluster {
    async fn account_pis(&self) -> Result<AccountPis, AdapterError> {
        self.check(FakeSource::AccountPis)?;
        Ok(self.inner.lock().indices.account_pis.clone())
    }
}

#[async_trait]
impl AccountStorageSource for FakeCluster {
    async fn account_storage(&self) -> Result<AccountStorage, AdapterError> {
        self.check(FakeSource::AccountStorage)?;
        Ok(self.inner.lock().indices.account_storage.clone())
    }
}

#[async_trait]
impl NodeExpander for FakeCluster {
    async fn expand(&self, expr: &str) -> Result<Vec<String>, AdapterError> {
        let pinned = {
            let mut inner = self.inner.lock();
            *inner.expand_calls.entry(expr.to_string()).or_default() += 1;
            if inner.failing_expressions.contains(expr) {
                return Err(AdapterError::Other(format!("injected expansion failure for {expr}")));
            }
            inner.expansions.get(expr).cloned()
        };
        match pinned {
            Some(hosts) => Ok(hosts),
            None => Ok(pjs_core::hostlist::expand(expr)?),
        }
    }
}
