// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One day's run: fetch, load reference data, enrich, write.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use pjs_adapters::{
    AccountPiSource, AccountStorageSource, GpfsQuota, HostlistExpander, JobSource, NodeExpander,
    NodePartitionSource, ProjectDirs, SlurmCli,
};
use pjs_engine::{
    load_reference_indices, EngineError, EnrichContext, NodeListCache, Pipeline, RunReport,
};

use crate::config::{Config, ExpanderKind};
use crate::output::JobWriter;

/// The collaborators a run talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub jobs: Arc<dyn JobSource>,
    pub node_partitions: Arc<dyn NodePartitionSource>,
    pub account_pis: Arc<dyn AccountPiSource>,
    pub account_storage: Arc<dyn AccountStorageSource>,
    pub expander: Arc<dyn NodeExpander>,
}

impl Collaborators {
    /// Real scheduler, storage and directory collaborators.
    pub fn from_config(config: &Config) -> Self {
        let timeout = config.command_timeout();
        let slurm = Arc::new(SlurmCli::new(&config.slurm_bin_dir).with_timeout(timeout));
        let expander: Arc<dyn NodeExpander> = match config.node_expander {
            ExpanderKind::Scontrol => slurm.clone(),
            ExpanderKind::Builtin => Arc::new(HostlistExpander),
        };
        Self {
            jobs: slurm.clone(),
            node_partitions: slurm,
            account_pis: Arc::new(ProjectDirs::new(&config.projects_dir)),
            account_storage: Arc::new(
                GpfsQuota::new(&config.gpfs_bin_dir, &config.gpfs_filesystem)
                    .with_timeout(timeout),
            ),
            expander,
        }
    }
}

/// Process every job that finished on `day` and write the enriched rows.
///
/// Fails before writing anything when the job source or any reference
/// table is unavailable. Individual job failures only show up in the
/// returned report.
pub async fn process_day<W: Write>(
    collaborators: &Collaborators,
    config: &Config,
    day: NaiveDate,
    out: W,
    header: bool,
) -> anyhow::Result<RunReport> {
    let started = Instant::now();

    let records = collaborators.jobs.jobs(day).await.map_err(EngineError::Jobs)?;
    tracing::info!(%day, records = records.len(), "fetched job records");

    let indices = load_reference_indices(
        collaborators.node_partitions.as_ref(),
        collaborators.account_pis.as_ref(),
        collaborators.account_storage.as_ref(),
    )
    .await?;

    let ctx = EnrichContext {
        indices: Arc::new(indices),
        cache: Arc::new(NodeListCache::new()),
        expander: Arc::clone(&collaborators.expander),
        policy: Arc::new(config.billing.clone()),
        date: day.to_string(),
    };
    let mut run = Pipeline::spawn(ctx.clone(), records, config.workers)?;

    let mut writer = JobWriter::new(out, header).context("failed to write header")?;
    while let Some(job) = run.jobs.recv().await {
        writer.write(&job).with_context(|| format!("failed to write job {}", job.job_id))?;
    }
    let rows = writer.rows();
    writer.finish().context("failed to flush output")?;

    let report = run.barrier.await??;
    tracing::info!(
        %day,
        rows,
        completed = report.completed,
        skipped = report.skipped,
        failed = report.failed,
        expressions = ctx.cache.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run complete"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
