// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;

use crate::{AdapterError, NodeExpander};

/// Expands node ranges in-process, without calling `scontrol`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostlistExpander;

#[async_trait]
impl NodeExpander for HostlistExpander {
    async fn expand(&self, expr: &str) -> Result<Vec<String>, AdapterError> {
        Ok(pjs_core::hostlist::expand(expr)?)
    }
}
