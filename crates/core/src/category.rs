// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job billing category.

use serde::{Deserialize, Serialize};

/// Which pool of capacity a job ran against.
///
/// `Unknown` only exists as a construction default; a successfully enriched
/// job is always one of the other three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobCategory {
    /// Partition available to every account.
    OpenUse,
    /// Preemptible capacity donated by condo owners.
    Donated,
    /// Partition reserved for a specific group.
    Condo,
    #[default]
    Unknown,
}

crate::simple_display! {
    JobCategory {
        OpenUse => "openuse",
        Donated => "donated",
        Condo => "condo",
        Unknown => "unknown",
    }
}
