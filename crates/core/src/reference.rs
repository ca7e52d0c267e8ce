// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only lookup tables joined against every job.

use std::collections::HashMap;

use thiserror::Error;

/// Reference data could not be built from collaborator output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("malformed {table} line `{line}`: {reason}")]
    Malformed { table: &'static str, line: String, reason: String },
}

/// Node hostname → partition name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePartitions {
    data: HashMap<String, String>,
}

impl NodePartitions {
    /// Parse `node,partition` lines (as printed by `sinfo -h -o '%n,%P'`).
    ///
    /// The default-partition marker (`compute*`) is stripped. A node listed
    /// under several partitions keeps the last one.
    pub fn parse(output: &str) -> Result<Self, ReferenceError> {
        let mut data = HashMap::new();
        for line in non_blank_lines(output) {
            let (node, partition) = split_pair("node partition", line)?;
            data.insert(node.to_string(), partition.trim_end_matches('*').to_string());
        }
        Ok(Self { data })
    }

    pub fn partition(&self, node: &str) -> Option<&str> {
        self.data.get(node).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NodePartitions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { data: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Account → username of its principal investigator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPis {
    data: HashMap<String, String>,
}

impl AccountPis {
    pub fn pi(&self, account: &str) -> Option<&str> {
        self.data.get(account).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AccountPis {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { data: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Account → storage quota in GB.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountStorage {
    data: HashMap<String, u64>,
}

impl AccountStorage {
    /// Parse `account,quota_gb` lines.
    pub fn parse(output: &str) -> Result<Self, ReferenceError> {
        let mut data = HashMap::new();
        for line in non_blank_lines(output) {
            let (account, quota) = split_pair("account storage", line)?;
            let quota = quota.parse::<u64>().map_err(|e| ReferenceError::Malformed {
                table: "account storage",
                line: line.to_string(),
                reason: e.to_string(),
            })?;
            data.insert(account.to_string(), quota);
        }
        Ok(Self { data })
    }

    pub fn quota_gb(&self, account: &str) -> Option<u64> {
        self.data.get(account).copied()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for AccountStorage {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self { data: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

/// The three tables, built once per run and shared read-only by all workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndices {
    pub node_partitions: NodePartitions,
    pub account_pis: AccountPis,
    pub account_storage: AccountStorage,
}

fn non_blank_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().map(str::trim).filter(|l| !l.is_empty())
}

fn split_pair<'a>(table: &'static str, line: &'a str) -> Result<(&'a str, &'a str), ReferenceError> {
    let malformed = |reason: &str| ReferenceError::Malformed {
        table,
        line: line.to_string(),
        reason: reason.to_string(),
    };
    let (key, value) = line.split_once(',').ok_or_else(|| malformed("expected two fields"))?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(malformed("empty field"));
    }
    if value.contains(',') {
        return Err(malformed("expected two fields"));
    }
    Ok((key, value))
}

#[cfg(test)]
#[path = "reference_tests.rs"]
mod tests;
