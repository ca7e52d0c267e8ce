// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal scheduler state of a finished job.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Completed,
    Failed,
    Cancelled,
}

crate::simple_display! {
    JobState {
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

impl FromStr for JobState {
    type Err = ParseError;

    /// Accepts `COMPLETED`, `FAILED`, and any string containing `CANCELLED`
    /// (e.g. `CANCELLED by 51234`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPLETED" => Ok(JobState::Completed),
            "FAILED" => Ok(JobState::Failed),
            _ if s.contains("CANCELLED") => Ok(JobState::Cancelled),
            _ => Err(ParseError::UnknownState(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
