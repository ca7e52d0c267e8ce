// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Categorization, node weighting, compute hours and service units.
//!
//! Everything here is pure: inputs are a job's already-parsed fields plus
//! the node→partition table.

use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

use crate::reference::NodePartitions;
use crate::JobCategory;

/// Partitions available to every account.
pub const OPEN_USE_PARTITIONS: &[&str] = &[
    "compute",
    "compute_intel",
    "computelong",
    "computelong_intel",
    "gpu",
    "gpulong",
    "interactive",
    "interactivegpu",
    "memory",
    "memorylong",
];

/// Open-use partitions billed at the high-memory CPU rate.
pub const HIGH_MEMORY_PARTITIONS: &[&str] = &["memory", "memorylong"];

pub const PREEMPT_PARTITION: &str = "preempt";

/// CPU-hour multiplier on high-memory partitions.
pub const HIGH_MEMORY_CPU_RATE: f64 = 2.0;

/// SU per GPU hour.
pub const DEFAULT_GPU_RATE: f64 = 3.0;

const SECS_PER_HOUR: f64 = 3_600.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillingError {
    #[error("node weight is only defined for openuse and condo, not {0}")]
    UnsupportedWeightCategory(JobCategory),

    #[error("service units require a categorized job")]
    Uncategorized,

    #[error("invalid billing policy: {0}")]
    InvalidPolicy(String),
}

/// Partition sets and rates that drive categorization and billing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillingPolicy {
    pub open_use_partitions: BTreeSet<String>,
    pub high_memory_partitions: BTreeSet<String>,
    pub preempt_partition: String,
    /// Multiplier applied to donated/preempt service units.
    pub preempt_weight: f64,
    pub gpu_rate: f64,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            open_use_partitions: OPEN_USE_PARTITIONS.iter().map(|p| p.to_string()).collect(),
            high_memory_partitions: HIGH_MEMORY_PARTITIONS.iter().map(|p| p.to_string()).collect(),
            preempt_partition: PREEMPT_PARTITION.to_string(),
            preempt_weight: 1.0,
            gpu_rate: DEFAULT_GPU_RATE,
        }
    }
}

impl BillingPolicy {
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.open_use_partitions.is_empty() {
            return Err(BillingError::InvalidPolicy("open_use_partitions is empty".into()));
        }
        if self.preempt_partition.is_empty() {
            return Err(BillingError::InvalidPolicy("preempt_partition is empty".into()));
        }
        if !(self.preempt_weight.is_finite() && self.preempt_weight >= 0.0) {
            return Err(BillingError::InvalidPolicy(format!(
                "preempt_weight must be a non-negative number, got {}",
                self.preempt_weight
            )));
        }
        if !(self.gpu_rate.is_finite() && self.gpu_rate >= 0.0) {
            return Err(BillingError::InvalidPolicy(format!(
                "gpu_rate must be a non-negative number, got {}",
                self.gpu_rate
            )));
        }
        Ok(())
    }

    pub fn is_open_use(&self, partition: &str) -> bool {
        self.open_use_partitions.contains(partition)
    }

    /// Category of the partition a job was submitted to.
    pub fn categorize(&self, partition: &str) -> JobCategory {
        if self.is_open_use(partition) {
            JobCategory::OpenUse
        } else if partition == self.preempt_partition {
            JobCategory::Donated
        } else {
            JobCategory::Condo
        }
    }

    /// Fraction of a job's nodes that belong to `category`.
    ///
    /// Nodes with no known partition are dropped from the denominator, so
    /// missing data shrinks the sample instead of biasing it. When no node
    /// resolves the weight is zero.
    pub fn weight(
        &self,
        category: JobCategory,
        node_list: &str,
        nodes: &NodePartitions,
    ) -> Result<f64, BillingError> {
        let want_open_use = match category {
            JobCategory::OpenUse => true,
            JobCategory::Condo => false,
            other => return Err(BillingError::UnsupportedWeightCategory(other)),
        };

        let mut total = 0usize;
        let mut matched = 0usize;
        for node in node_list.split(',') {
            let Some(partition) = nodes.partition(node) else {
                continue;
            };
            total += 1;
            if self.is_open_use(partition) == want_open_use {
                matched += 1;
            }
        }

        if total == 0 {
            return Ok(0.0);
        }
        Ok(matched as f64 / total as f64)
    }

    /// Service units for a job, by category and submission partition.
    pub fn service_units(
        &self,
        category: JobCategory,
        partition: &str,
        hours: &ComputeHours,
    ) -> Result<f64, BillingError> {
        match category {
            JobCategory::OpenUse => {
                let cpu_rate = if self.high_memory_partitions.contains(partition) {
                    HIGH_MEMORY_CPU_RATE
                } else {
                    1.0
                };
                Ok(cpu_rate * hours.cpu_open_use + self.gpu_rate * hours.gpu_open_use)
            }
            JobCategory::Condo => Ok(0.0),
            JobCategory::Donated => Ok(self.preempt_weight
                * (hours.cpu_total() + self.gpu_rate * hours.gpu_total())),
            JobCategory::Unknown => Err(BillingError::Uncategorized),
        }
    }
}

/// Open-use and condo node fractions of one job.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Weights {
    pub open_use: f64,
    pub condo: f64,
}

/// Weighted CPU and GPU hours of one job.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComputeHours {
    pub cpu_open_use: f64,
    pub cpu_condo: f64,
    pub gpu_open_use: f64,
    pub gpu_condo: f64,
}

impl ComputeHours {
    pub fn new(cpus: u32, gpus: u32, weights: Weights, elapsed_secs: u64) -> Self {
        Self {
            cpu_open_use: compute_hours(cpus, weights.open_use, elapsed_secs),
            cpu_condo: compute_hours(cpus, weights.condo, elapsed_secs),
            gpu_open_use: compute_hours(gpus, weights.open_use, elapsed_secs),
            gpu_condo: compute_hours(gpus, weights.condo, elapsed_secs),
        }
    }

    pub fn cpu_total(&self) -> f64 {
        self.cpu_open_use + self.cpu_condo
    }

    pub fn gpu_total(&self) -> f64 {
        self.gpu_open_use + self.gpu_condo
    }
}

/// `count × weight × elapsed` expressed in hours.
pub fn compute_hours(count: u32, weight: f64, elapsed_secs: u64) -> f64 {
    f64::from(count) * weight * elapsed_secs as f64 / SECS_PER_HOUR
}

#[cfg(test)]
#[path = "billing_tests.rs"]
mod tests;
