//! Failure isolation and fatal-error specs.

use crate::prelude::*;
#[allow(unused_imports)]
use crate::prelude::assert_eq;

#[test]
fn bad_jobs_are_excluded_and_logged() {
    let cluster = Cluster::new();
    cluster.jobs(&[
        &Job::new("1001").line(),
        &Job::new("1002").account("ghostlab").line(),
        &Job::new("1003").state("TIMEOUT").line(),
        &Job::new("1004").tres("gres/gpu=lots").line(),
        "1005|truncated|record",
    ]);

    let run = cluster
        .cli()
        .args(&["--noheader"])
        .passes()
        .stderr_has("job_id=1002")
        .stderr_has("job_id=1003")
        .stderr_has("job_id=1004")
        .stderr_has("job_id=1005")
        .stderr_has("failed=4");

    let rows = run.rows();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].starts_with("1001,"));
}

#[test]
fn missing_storage_quota_fails_only_that_job() {
    let cluster = Cluster::new();
    cluster.quotas(&[("hpcrcf", 1024)]);
    cluster.jobs(&[&Job::new("1001").line(), &Job::new("1002").account("kernlab").line()]);

    let run = cluster.cli().args(&["--noheader"]).passes().stderr_has("no storage quota");

    assert_eq!(run.rows().len(), 1);
}

#[test]
fn unreachable_scheduler_is_fatal() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").line()]);
    cluster.break_tool(&cluster.slurm_bin(), "sacct");

    let run = cluster.cli().fails_with(1).stderr_has("sacct");

    assert!(run.stdout().is_empty());
}

#[test]
fn partition_table_failure_is_fatal() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").line()]);
    cluster.break_tool(&cluster.slurm_bin(), "sinfo");

    let run = cluster.cli().fails_with(1).stderr_has("node partitions");

    assert!(run.stdout().is_empty());
}

#[test]
fn quota_report_failure_is_fatal() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").line()]);
    cluster.break_tool(&cluster.gpfs_bin(), "mmrepquota");

    let run = cluster.cli().fails_with(1).stderr_has("account storage");

    assert!(run.stdout().is_empty());
}

#[test]
fn malformed_partition_table_is_fatal() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").line()]);
    cluster.nodes("n1,compute\nthis line has no comma\n");

    cluster.cli().fails_with(1).stderr_has("node partitions");
}

#[test]
fn missing_projects_root_is_fatal() {
    let cluster = Cluster::new();
    std::fs::remove_dir_all(cluster.projects()).unwrap();

    cluster.cli().fails_with(1).stderr_has("account PIs");
}

#[test]
fn unwritable_output_is_fatal() {
    let cluster = Cluster::new();
    let path = cluster.root().join("no/such/dir/jobs.csv");

    cluster.cli().args(&["--output", path.to_str().unwrap()]).fails_with(1).stderr_has("failed to open");
}
