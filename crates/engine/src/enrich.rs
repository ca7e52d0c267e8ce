// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns one raw accounting line into an enriched [`Job`].

use std::sync::Arc;

use pjs_adapters::NodeExpander;
use pjs_core::time::{run_time_hours, wait_time_hours};
use pjs_core::tres::gpu_count;
use pjs_core::{
    BillingPolicy, ComputeHours, Job, JobCategory, JobState, RawJobRecord, ReferenceIndices,
    Weights,
};

use crate::{EnrichError, EnrichErrorKind, NodeListCache};

/// Everything a worker needs to enrich a job. Cheap to clone.
#[derive(Clone)]
pub struct EnrichContext {
    pub indices: Arc<ReferenceIndices>,
    pub cache: Arc<NodeListCache>,
    pub expander: Arc<dyn NodeExpander>,
    pub policy: Arc<BillingPolicy>,
    /// Processing day tag stamped on every job (`YYYY-MM-DD`)
    pub date: String,
}

/// Terminal result of enriching one line that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Completed(Box<Job>),
    /// The job never ran on any node.
    Skipped { job_id: String },
}

/// Enrich one raw accounting line.
///
/// Timestamps are only parsed once the job is known to have run, so jobs
/// cancelled while pending are skipped rather than failed.
pub async fn enrich(ctx: &EnrichContext, line: &str) -> Result<Outcome, EnrichError> {
    let raw = RawJobRecord::parse(line).map_err(|e| EnrichError::new(job_id_of(line), e))?;
    let fail = |kind: EnrichErrorKind| EnrichError::new(raw.job_id.as_str(), kind);

    let node_list = ctx
        .cache
        .expand(&raw.node_list, ctx.expander.as_ref())
        .await
        .map_err(|e| fail(EnrichErrorKind::Expand(e)))?;
    if node_list.is_empty() {
        tracing::debug!(job_id = %raw.job_id, "skipping job with no nodes");
        return Ok(Outcome::Skipped { job_id: raw.job_id });
    }

    let state: JobState = raw.state.parse().map_err(|e| fail(EnrichErrorKind::Parse(e)))?;

    let pi = ctx
        .indices
        .account_pis
        .pi(&raw.account)
        .ok_or_else(|| fail(EnrichErrorKind::MissingPi(raw.account.clone())))?
        .to_string();
    let account_storage_gb = ctx
        .indices
        .account_storage
        .quota_gb(&raw.account)
        .ok_or_else(|| fail(EnrichErrorKind::MissingStorage(raw.account.clone())))?;

    let policy = ctx.policy.as_ref();
    let nodes = &ctx.indices.node_partitions;
    let category = policy.categorize(&raw.partition);
    let weights = Weights {
        open_use: policy
            .weight(JobCategory::OpenUse, &node_list, nodes)
            .map_err(|e| fail(e.into()))?,
        condo: policy.weight(JobCategory::Condo, &node_list, nodes).map_err(|e| fail(e.into()))?,
    };
    let gpus = gpu_count(&raw.tres).map_err(|e| fail(e.into()))?;
    let hours = ComputeHours::new(raw.cpus, gpus, weights, raw.elapsed_secs);
    let wait_time_hours =
        wait_time_hours(&raw.submit_time, &raw.start_time).map_err(|e| fail(e.into()))?;
    if wait_time_hours < 0.0 {
        tracing::debug!(job_id = %raw.job_id, wait_time_hours, "start precedes submit");
    }
    let service_units =
        policy.service_units(category, &raw.partition, &hours).map_err(|e| fail(e.into()))?;

    Ok(Outcome::Completed(Box::new(Job {
        pi,
        account_storage_gb,
        category,
        open_use_weight: weights.open_use,
        condo_weight: weights.condo,
        gpus,
        cpu_hours_open_use: hours.cpu_open_use,
        cpu_hours_condo: hours.cpu_condo,
        cpu_hours_total: hours.cpu_total(),
        gpu_hours_open_use: hours.gpu_open_use,
        gpu_hours_condo: hours.gpu_condo,
        gpu_hours_total: hours.gpu_total(),
        wait_time_hours,
        run_time_hours: run_time_hours(raw.elapsed_secs),
        date: ctx.date.clone(),
        service_units,
        node_list,
        state,
        job_id: raw.job_id,
        job_name: raw.job_name,
        username: raw.username,
        account: raw.account,
        partition: raw.partition,
        elapsed: raw.elapsed,
        node_count: raw.node_count,
        cpus: raw.cpus,
        tres: raw.tres,
        submit_time: raw.submit_time,
        start_time: raw.start_time,
        end_time: raw.end_time,
    })))
}

fn job_id_of(line: &str) -> &str {
    line.split('|').next().unwrap_or_default()
}

#[cfg(test)]
#[path = "enrich_tests.rs"]
mod tests;
