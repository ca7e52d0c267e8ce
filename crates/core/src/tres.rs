// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Allocated trackable-resource (TRES) strings.

use crate::ParseError;

const GPU_KEY: &str = "gres/gpu=";

/// GPU count from an allocation string such as
/// `billing=8,cpu=8,gres/gpu=2,mem=64G,node=1`.
///
/// Absent key means zero GPUs. Typed entries like `gres/gpu:a100=2` are
/// not counted; the scheduler always reports the untyped total alongside.
pub fn gpu_count(tres: &str) -> Result<u32, ParseError> {
    for token in tres.split(',') {
        if let Some(value) = token.trim().strip_prefix(GPU_KEY) {
            return value.parse().map_err(|_| ParseError::InvalidGpuCount(token.to_string()));
        }
    }
    Ok(0)
}

#[cfg(test)]
#[path = "tres_tests.rs"]
mod tests;
