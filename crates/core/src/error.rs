// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parse errors for raw accounting fields.

use thiserror::Error;

/// A raw field could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid {field} `{value}`: {reason}")]
    InvalidInteger { field: &'static str, value: String, reason: String },

    #[error("invalid elapsed time `{0}`, expected [D-]HH:MM:SS")]
    InvalidElapsed(String),

    #[error("invalid timestamp `{value}`: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("unrecognized job state `{0}`")]
    UnknownState(String),

    #[error("invalid gpu count in tres token `{0}`")]
    InvalidGpuCount(String),

    #[error("invalid node-range expression `{expr}`: {reason}")]
    InvalidHostlist { expr: String, reason: String },
}

impl ParseError {
    pub(crate) fn integer(field: &'static str, value: &str, err: std::num::ParseIntError) -> Self {
        ParseError::InvalidInteger { field, value: value.to_string(), reason: err.to_string() }
    }
}
