// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Enriched job record handed to the collector.

use crate::{JobCategory, JobState};

/// Column names of the output table, in row order.
pub const CSV_HEADER: [&str; 30] = [
    "JobID",
    "JobName",
    "Username",
    "Account",
    "Partition",
    "Elapsed",
    "NodeCount",
    "CPUs",
    "TRES",
    "SubmitTime",
    "StartTime",
    "EndTime",
    "NodeList",
    "State",
    "PI",
    "AccountStorageGB",
    "Category",
    "OpenuseWeight",
    "CondoWeight",
    "GPUs",
    "CPUHoursOpenUse",
    "CPUHoursCondo",
    "CPUHoursTotal",
    "GPUHoursOpenUse",
    "GPUHoursCondo",
    "GPUHoursTotal",
    "WaitTimeHours",
    "RunTimeHours",
    "Date",
    "ServiceUnits",
];

/// A finished job joined with reference data and billing metrics.
///
/// Built once by the enrichment step and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    // Scheduler fields
    pub job_id: String,
    pub job_name: String,
    pub username: String,
    pub account: String,
    pub partition: String,
    pub elapsed: String,
    pub node_count: u32,
    pub cpus: u32,
    pub tres: String,
    pub submit_time: String,
    pub start_time: String,
    pub end_time: String,
    /// Explicit comma-joined hostnames
    pub node_list: String,
    pub state: JobState,

    // Derived fields
    pub pi: String,
    pub account_storage_gb: u64,
    pub category: JobCategory,
    pub open_use_weight: f64,
    pub condo_weight: f64,
    pub gpus: u32,
    pub cpu_hours_open_use: f64,
    pub cpu_hours_condo: f64,
    pub cpu_hours_total: f64,
    pub gpu_hours_open_use: f64,
    pub gpu_hours_condo: f64,
    pub gpu_hours_total: f64,
    pub wait_time_hours: f64,
    pub run_time_hours: f64,
    /// Processing day tag (`YYYY-MM-DD`)
    pub date: String,
    pub service_units: f64,
}

impl Job {
    /// Row values matching [`CSV_HEADER`]. Floats carry six decimals.
    pub fn csv_record(&self) -> Vec<String> {
        vec![
            self.job_id.clone(),
            self.job_name.clone(),
            self.username.clone(),
            self.account.clone(),
            self.partition.clone(),
            self.elapsed.clone(),
            self.node_count.to_string(),
            self.cpus.to_string(),
            self.tres.clone(),
            self.submit_time.clone(),
            self.start_time.clone(),
            self.end_time.clone(),
            self.node_list.clone(),
            self.state.to_string(),
            self.pi.clone(),
            self.account_storage_gb.to_string(),
            self.category.to_string(),
            fixed(self.open_use_weight),
            fixed(self.condo_weight),
            self.gpus.to_string(),
            fixed(self.cpu_hours_open_use),
            fixed(self.cpu_hours_condo),
            fixed(self.cpu_hours_total),
            fixed(self.gpu_hours_open_use),
            fixed(self.gpu_hours_condo),
            fixed(self.gpu_hours_total),
            fixed(self.wait_time_hours),
            fixed(self.run_time_hours),
            self.date.clone(),
            fixed(self.service_units),
        ]
    }
}

fn fixed(value: f64) -> String {
    format!("{value:.6}")
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
