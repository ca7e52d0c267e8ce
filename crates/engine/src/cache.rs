// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Memoized node-range expansion shared by every worker of one run.

use std::collections::HashMap;

use parking_lot::RwLock;
use pjs_adapters::{AdapterError, NodeExpander};
use pjs_core::hostlist;

/// Compressed expression → comma-joined hostnames.
///
/// Grows monotonically and never evicts. Concurrent misses on the same
/// expression may each reach the expander; the last writer wins, which is
/// harmless because expansion is pure.
#[derive(Debug, Default)]
pub struct NodeListCache {
    entries: RwLock<HashMap<String, String>>,
}

impl NodeListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expanded hostnames for `expr`, joined with `,`.
    ///
    /// Blank and unassigned expressions expand to an empty string without
    /// consulting the expander.
    pub async fn expand(
        &self,
        expr: &str,
        expander: &dyn NodeExpander,
    ) -> Result<String, AdapterError> {
        if hostlist::is_unassigned(expr) {
            return Ok(String::new());
        }
        if let Some(hit) = self.get(expr) {
            return Ok(hit);
        }

        // No lock is held while the expander runs.
        let hosts = expander.expand(expr).await?.join(",");
        tracing::debug!(expr, hosts = hosts.len(), "cached node expansion");
        self.entries.write().insert(expr.to_string(), hosts.clone());
        Ok(hosts)
    }

    pub fn get(&self, expr: &str) -> Option<String> {
        self.entries.read().get(expr).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
