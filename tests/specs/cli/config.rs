//! Configuration layering specs: file, environment and flags.

use crate::prelude::*;
#[allow(unused_imports)]
use crate::prelude::assert_eq;

#[test]
fn zero_workers_is_rejected() {
    let cluster = Cluster::new();

    cluster.cli().args(&["--workers", "0"]).fails_with(2).stderr_has("workers must be at least 1");
}

#[test]
fn malformed_env_override_is_rejected() {
    let cluster = Cluster::new();

    cluster.cli().env("PJS_WORKERS", "many").fails_with(2).stderr_has("PJS_WORKERS");
}

#[test]
fn config_file_sets_billing_policy() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").partition("preempt").line()]);
    let config = cluster.root().join("pjs.toml");
    std::fs::write(&config, "workers = 2\n\n[billing]\npreempt_weight = 0.5\n").unwrap();

    let run = cluster.cli().args(&["--noheader", "--config"]).args(&[config.to_str().unwrap()]).passes();

    let rows = run.rows();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains(",donated,"), "{}", rows[0]);
    assert!(rows[0].ends_with(",2025-02-03,4.000000"), "{}", rows[0]);
}

#[test]
fn unknown_config_key_is_rejected() {
    let cluster = Cluster::new();
    let config = cluster.root().join("pjs.toml");
    std::fs::write(&config, "wokers = 2\n").unwrap();

    cluster.cli().args(&["--config", config.to_str().unwrap()]).fails_with(2).stderr_has("wokers");
}

#[test]
fn scontrol_expands_nodes_by_default() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").nodes("n1,n2").line(), &Job::new("1002").nodes("n1,n2").line()]);

    cluster.cli().env("PJS_NODE_EXPANDER", "scontrol").args(&["--workers", "1"]).passes();

    assert_eq!(cluster.read("slurm/bin/scontrol.calls"), "n1,n2\n");
}

#[test]
fn builtin_expander_never_calls_scontrol() {
    let cluster = Cluster::new();
    cluster.jobs(&[&Job::new("1001").line()]);

    cluster.cli().passes().stdout_has("\"n1,n2\"");

    assert_eq!(cluster.read("slurm/bin/scontrol.calls"), "");
}
