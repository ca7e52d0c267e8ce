// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-size worker pool that enriches a day's jobs in parallel.

use std::sync::Arc;

use parking_lot::Mutex;
use pjs_core::Job;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{enrich, EngineError, EnrichContext, Outcome};

/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 16;

/// A job that could not be enriched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    pub job_id: String,
    pub error: String,
}

/// Outcome counts of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub completed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<JobFailure>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.completed + self.skipped + self.failed
    }

    fn merge(&mut self, other: RunReport) {
        self.completed += other.completed;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.failures.extend(other.failures);
    }
}

/// Handles to a running pipeline.
///
/// `jobs` yields enriched jobs in completion order and closes once every
/// worker has finished. `barrier` resolves to the run report at that point.
pub struct PipelineRun {
    pub jobs: mpsc::Receiver<Job>,
    pub barrier: JoinHandle<Result<RunReport, EngineError>>,
}

impl PipelineRun {
    /// Drain every job, then wait for the barrier.
    pub async fn collect(mut self) -> Result<(Vec<Job>, RunReport), EngineError> {
        let mut jobs = Vec::new();
        while let Some(job) = self.jobs.recv().await {
            jobs.push(job);
        }
        let report = self.barrier.await??;
        Ok((jobs, report))
    }
}

pub struct Pipeline;

impl Pipeline {
    /// Queue `records` and start `workers` enrichment tasks.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        ctx: EnrichContext,
        records: Vec<String>,
        workers: usize,
    ) -> Result<PipelineRun, EngineError> {
        if workers == 0 {
            return Err(EngineError::NoWorkers);
        }

        let capacity = records.len().max(1);
        let (work_tx, work_rx) = mpsc::channel::<String>(capacity);
        for line in records {
            // Capacity covers every record, so the queue never fills.
            if work_tx.try_send(line).is_err() {
                break;
            }
        }
        drop(work_tx);

        let queue = Arc::new(Mutex::new(work_rx));
        let (job_tx, job_rx) = mpsc::channel::<Job>(capacity);

        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                tokio::spawn(run_worker(worker, ctx.clone(), Arc::clone(&queue), job_tx.clone()))
            })
            .collect();
        drop(job_tx);

        let barrier = tokio::spawn(async move {
            let mut report = RunReport::default();
            for handle in handles {
                report.merge(handle.await?);
            }
            Ok::<_, EngineError>(report)
        });

        Ok(PipelineRun { jobs: job_rx, barrier })
    }
}

async fn run_worker(
    worker: usize,
    ctx: EnrichContext,
    queue: Arc<Mutex<mpsc::Receiver<String>>>,
    jobs: mpsc::Sender<Job>,
) -> RunReport {
    let mut report = RunReport::default();
    loop {
        // The queue is filled before workers start, so try_recv only
        // reports empty once every record has been claimed.
        let next = queue.lock().try_recv();
        let Ok(line) = next else {
            break;
        };

        match enrich(&ctx, &line).await {
            Ok(Outcome::Completed(job)) => {
                report.completed += 1;
                if jobs.send(*job).await.is_err() {
                    tracing::warn!(worker, "job receiver dropped, stopping worker");
                    break;
                }
            }
            Ok(Outcome::Skipped { .. }) => report.skipped += 1,
            Err(e) => {
                tracing::warn!(worker, job_id = %e.job_id, error = %e.kind, "failed to enrich job");
                report.failed += 1;
                report.failures.push(JobFailure { job_id: e.job_id, error: e.kind.to_string() });
            }
        }
    }
    tracing::debug!(worker, completed = report.completed, "worker finished");
    report
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
