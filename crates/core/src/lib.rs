// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pjs-core: accounting data model and the pure weighting & billing engine

pub mod macros;

pub mod billing;
pub mod category;
pub mod error;
pub mod hostlist;
pub mod job;
pub mod record;
pub mod reference;
pub mod state;
pub mod time;
pub mod tres;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use billing::{BillingError, BillingPolicy, ComputeHours, Weights};
pub use category::JobCategory;
pub use error::ParseError;
pub use job::{Job, CSV_HEADER};
pub use record::{RawJobRecord, FIELD_COUNT};
pub use reference::{AccountPis, AccountStorage, NodePartitions, ReferenceError, ReferenceIndices};
pub use state::JobState;
