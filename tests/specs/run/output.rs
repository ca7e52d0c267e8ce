//! CSV output specs for a healthy cluster.

use std::os::unix::fs::PermissionsExt;

use crate::prelude::*;
#[allow(unused_imports)]
use crate::prelude::assert_eq;

fn expected_row(pi: &str) -> String {
    format!(
        "1001,analysis,alice,hpcrcf,compute,01:00:00,2,8,\"billing=8,cpu=8,mem=64G,node=2\",\
         2025-02-03T09:30:00,2025-02-03T10:00:00,2025-02-03T11:00:00,\"n1,n2\",completed,\
         {pi},1024,openuse,0.500000,0.500000,0,4.000000,4.000000,8.000000,0.000000,0.000000,\
         0.000000,0.500000,1.000000,2025-02-03,4.000000"
    )
}

#[test]
fn enriched_row_follows_the_header() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").line()]);

    let run = cluster.cli().passes();

    let rows = run.rows();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("JobID,JobName,Username,Account,Partition,Elapsed,"));
    assert!(rows[0].ends_with(",WaitTimeHours,RunTimeHours,Date,ServiceUnits"));
    assert_eq!(rows[1], expected_row(&current_user()));
}

#[test]
fn noheader_writes_rows_only() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").line()]);

    let run = cluster.cli().args(&["--noheader"]).passes();

    assert_eq!(run.rows(), vec![expected_row(&current_user())]);
}

#[test]
fn empty_day_writes_only_the_header() {
    let cluster = Cluster::new();

    let run = cluster.cli().passes();

    assert_eq!(run.rows().len(), 1);
}

#[test]
fn output_flag_writes_an_owner_only_file() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").line(), &Job::new("1002").line()]);
    let path = cluster.root().join("out/jobs.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    let run = cluster.cli().args(&["--output", path.to_str().unwrap()]).passes();

    assert!(run.stdout().is_empty());
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 3);
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn jobs_that_never_ran_are_dropped_silently() {
    let cluster = Cluster::new();
    cluster.jobs(&[
        &Job::new("1001").line(),
        &Job::new("1002").nodes("None assigned").state("CANCELLED by 0").start("Unknown").line(),
    ]);

    let run = cluster.cli().args(&["--noheader"]).passes();

    let rows = run.rows();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].starts_with("1001,"));
    assert!(!run.stderr().contains("WARN"));
}

#[test]
fn gpus_on_high_memory_partition_bill_at_both_rates() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001")
        .partition("memory")
        .nodes("n3")
        .cpus("10")
        .tres("billing=10,cpu=10,gres/gpu=2,mem=1T,node=1")
        .line()]);

    let run = cluster.cli().args(&["--noheader"]).passes();

    let row = &run.rows()[0];
    assert!(row.contains(",openuse,1.000000,0.000000,2,10.000000,"), "{row}");
    assert!(row.ends_with(",2025-02-03,26.000000"), "{row}");
}

#[test]
fn condo_jobs_bill_zero() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").account("kernlab").partition("kern").nodes("n4").line()]);

    let run = cluster.cli().args(&["--noheader"]).passes();

    let row = &run.rows()[0];
    assert!(row.contains(",2048,condo,0.000000,1.000000,"), "{row}");
    assert!(row.ends_with(",0.000000"), "{row}");
}

#[test]
fn collaborators_are_queried_for_the_requested_day() {
    let cluster = Cluster::new();

    cluster.cli().passes();

    let sacct = cluster.read("slurm/bin/sacct.args");
    assert!(sacct.contains("--starttime=2025-02-03T00:00:00"), "{sacct}");
    assert!(sacct.contains("--endtime=2025-02-03T23:59:59"), "{sacct}");
    assert!(sacct.contains("--state=F,CD,CA"), "{sacct}");
    assert_eq!(cluster.read("gpfs/bin/mmrepquota.args"), "-j fs1 --block-size g\n");
}

#[test]
fn many_jobs_across_many_workers() {
    let cluster = Cluster::new();
    let lines: Vec<String> = (0..200).map(|i| Job::new(&format!("{}", 5000 + i)).line()).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    cluster.jobs(&refs);

    let single = cluster.cli().args(&["--noheader", "--workers", "1"]).passes().rows();
    let many = cluster.cli().args(&["--noheader", "--workers", "32"]).passes().rows();

    assert_eq!(single.len(), 200);
    assert_eq!(single, many);
}
