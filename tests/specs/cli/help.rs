//! Command-line surface specs.

use crate::prelude::*;
#[allow(unused_imports)]
use crate::prelude::assert_eq;

#[test]
fn help_lists_every_flag() {
    let run = cli().args(&["--help"]).passes().stdout_has("Usage:");
    for flag in ["--output", "--noheader", "--day", "--debug", "--workers", "--config"] {
        assert!(run.stdout().contains(flag), "help is missing {flag}");
    }
}

#[test]
fn version_is_reported() {
    cli().args(&["--version"]).passes().stdout_has("0.2.0");
}

#[test]
fn malformed_day_is_a_usage_error() {
    cli().args(&["--day", "02/03/2025"]).fails_with(2).stderr_has("--day");
}

#[test]
fn unknown_flag_is_a_usage_error() {
    cli().args(&["--cpuprofile", "x"]).fails_with(2);
}
