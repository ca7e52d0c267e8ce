// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pjs-engine: node-list cache, reference loading, enrichment and the worker pool

mod cache;
mod enrich;
mod error;
mod pipeline;
mod reference;

pub use cache::NodeListCache;
pub use enrich::{enrich, EnrichContext, Outcome};
pub use error::{EngineError, EnrichError, EnrichErrorKind};
pub use pipeline::{JobFailure, Pipeline, PipelineRun, RunReport, DEFAULT_WORKERS};
pub use reference::load_reference_indices;
