// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use pjs_adapters::AdapterError;
use pjs_core::{BillingError, ParseError};
use thiserror::Error;

/// Run-level failure. Aborts before any job is processed.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load {table}: {source}")]
    Reference {
        table: &'static str,
        #[source]
        source: AdapterError,
    },

    #[error("failed to fetch jobs: {0}")]
    Jobs(#[source] AdapterError),

    #[error("worker pool needs at least one worker")]
    NoWorkers,

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Why one job could not be enriched.
#[derive(Debug, Error)]
pub enum EnrichErrorKind {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error("node expansion failed: {0}")]
    Expand(#[source] AdapterError),

    #[error("no PI for account `{0}`")]
    MissingPi(String),

    #[error("no storage quota for account `{0}`")]
    MissingStorage(String),
}

/// Per-job failure. Isolated: logged, counted and excluded from output.
#[derive(Debug, Error)]
#[error("job {job_id}: {kind}")]
pub struct EnrichError {
    /// Empty when the line could not be split into fields.
    pub job_id: String,
    #[source]
    pub kind: EnrichErrorKind,
}

impl EnrichError {
    pub fn new(job_id: impl Into<String>, kind: impl Into<EnrichErrorKind>) -> Self {
        Self { job_id: job_id.into(), kind: kind.into() }
    }
}
