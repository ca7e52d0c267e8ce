// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    AccountPis, AccountStorage, Job, JobCategory, JobState, NodePartitions, RawJobRecord,
    ReferenceIndices,
};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use proptest::prelude::*;

    /// Elapsed strings in both `HH:MM:SS` and `D-HH:MM:SS` form.
    pub fn arb_elapsed() -> impl Strategy<Value = String> {
        (0u64..30, 0u64..24, 0u64..60, 0u64..60).prop_map(|(d, h, m, s)| {
            if d == 0 {
                format!("{h:02}:{m:02}:{s:02}")
            } else {
                format!("{d}-{h:02}:{m:02}:{s:02}")
            }
        })
    }

    /// Subsets of the fixture cluster's nodes, plus one unknown host.
    pub fn arb_node_list() -> impl Strategy<Value = String> {
        proptest::sample::subsequence(vec!["n1", "n2", "n3", "n4", "g1", "ghost"], 1..=6)
            .prop_map(|hosts| hosts.join(","))
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

/// Small cluster: `n1`/`n3`/`g1` are open-use, `n2`/`n4` are condo nodes.
pub fn sample_indices() -> ReferenceIndices {
    ReferenceIndices {
        node_partitions: NodePartitions::from_iter([
            ("n1", "compute"),
            ("n2", "cluster1"),
            ("n3", "memory"),
            ("n4", "kern"),
            ("g1", "gpu"),
        ]),
        account_pis: AccountPis::from_iter([("hpcrcf", "lcrown"), ("kernlab", "akern")]),
        account_storage: AccountStorage::from_iter([("hpcrcf", 1024u64), ("kernlab", 2048)]),
    }
}

crate::builder! {
    pub struct RawJobRecordBuilder => RawJobRecord {
        into {
            job_id: String = "1001",
            job_name: String = "analysis",
            username: String = "alice",
            account: String = "hpcrcf",
            partition: String = "compute",
            elapsed: String = "01:00:00",
            tres: String = "billing=8,cpu=8,mem=64G,node=2",
            submit_time: String = "2025-02-03T09:30:00",
            start_time: String = "2025-02-03T10:00:00",
            end_time: String = "2025-02-03T11:00:00",
            node_list: String = "n[1-2]",
            state: String = "COMPLETED",
        }
        set {
            node_count: u32 = 2,
            cpus: u32 = 8,
            elapsed_secs: u64 = 3_600,
        }
    }
}

impl RawJobRecordBuilder {
    /// Pipe-delimited accounting line. Only `elapsed` reaches the wire, so
    /// `elapsed_secs` need not be kept in sync when using this.
    pub fn line(self) -> String {
        self.build().to_line()
    }
}

/// Fully enriched job matching the default raw record on [`sample_indices`].
pub fn sample_job() -> Job {
    Job {
        job_id: "1001".to_string(),
        job_name: "analysis".to_string(),
        username: "alice".to_string(),
        account: "hpcrcf".to_string(),
        partition: "compute".to_string(),
        elapsed: "01:00:00".to_string(),
        node_count: 2,
        cpus: 8,
        tres: "billing=8,cpu=8,mem=64G,node=2".to_string(),
        submit_time: "2025-02-03T09:30:00".to_string(),
        start_time: "2025-02-03T10:00:00".to_string(),
        end_time: "2025-02-03T11:00:00".to_string(),
        node_list: "n1,n2".to_string(),
        state: JobState::Completed,
        pi: "lcrown".to_string(),
        account_storage_gb: 1024,
        category: JobCategory::OpenUse,
        open_use_weight: 0.5,
        condo_weight: 0.5,
        gpus: 0,
        cpu_hours_open_use: 4.0,
        cpu_hours_condo: 4.0,
        cpu_hours_total: 8.0,
        gpu_hours_open_use: 0.0,
        gpu_hours_condo: 0.0,
        gpu_hours_total: 0.0,
        wait_time_hours: 0.5,
        run_time_hours: 1.0,
        date: "2025-02-03".to_string(),
        service_units: 4.0,
    }
}
