// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot construction of the reference tables.

use pjs_adapters::{AccountPiSource, AccountStorageSource, NodePartitionSource};
use pjs_core::ReferenceIndices;

use crate::EngineError;

/// Query all three reference collaborators concurrently.
///
/// Any failure is fatal: the first error wins and the run must not start.
pub async fn load_reference_indices(
    nodes: &dyn NodePartitionSource,
    pis: &dyn AccountPiSource,
    storage: &dyn AccountStorageSource,
) -> Result<ReferenceIndices, EngineError> {
    let (node_partitions, account_pis, account_storage) = tokio::try_join!(
        async {
            nodes
                .node_partitions()
                .await
                .map_err(|source| EngineError::Reference { table: "node partitions", source })
        },
        async {
            pis.account_pis()
                .await
                .map_err(|source| EngineError::Reference { table: "account PIs", source })
        },
        async {
            storage
                .account_storage()
                .await
                .map_err(|source| EngineError::Reference { table: "account storage", source })
        },
    )?;

    tracing::info!(
        nodes = node_partitions.len(),
        accounts = account_pis.len(),
        filesets = account_storage.len(),
        "loaded reference indices"
    );

    Ok(ReferenceIndices { node_partitions, account_pis, account_storage })
}

#[cfg(test)]
#[path = "reference_tests.rs"]
mod tests;
