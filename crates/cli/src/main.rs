// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! process-job-stats: enrich a day of finished cluster jobs into billing CSV

mod config;
mod env;
mod exit_error;
mod logging;
mod output;
mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::config::Config;
use crate::exit_error::{exit_code, ExitError};
use crate::run::{process_day, Collaborators};

#[derive(Parser, Debug)]
#[command(name = "process-job-stats", version, about)]
struct Cli {
    /// Write CSV here instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Don't write the header row
    #[arg(long)]
    noheader: bool,

    /// Day to process (default: yesterday)
    #[arg(long, value_name = "YYYY-MM-DD")]
    day: Option<NaiveDate>,

    /// Log at debug level unless PJS_LOG is set
    #[arg(long)]
    debug: bool,

    /// Number of enrichment workers
    #[arg(long)]
    workers: Option<usize>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let log_guard = logging::init(cli.debug);

    if let Err(e) = run(cli).await {
        tracing::error!("{e:#}");
        // exit() skips destructors; flush the log file first
        drop(log_guard);
        std::process::exit(exit_code(&e));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).map_err(ExitError::config)?;
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    config.validate().map_err(ExitError::config)?;

    let day = match cli.day {
        Some(day) => day,
        None => yesterday()?,
    };
    tracing::debug!(?config, %day, "starting run");

    let out = output::open(cli.output.as_deref()).with_context(|| match &cli.output {
        Some(path) => format!("failed to open {}", path.display()),
        None => "failed to open stdout".to_string(),
    })?;

    let collaborators = Collaborators::from_config(&config);
    let report = process_day(&collaborators, &config, day, out, !cli.noheader).await?;
    if report.failed > 0 {
        tracing::warn!(failed = report.failed, "some jobs could not be enriched");
    }
    Ok(())
}

fn yesterday() -> Result<NaiveDate> {
    Local::now().date_naive().pred_opt().context("no day before today")
}
