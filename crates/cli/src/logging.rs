// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log subscriber setup. Logs go to stderr so stdout stays clean for CSV.

use std::io::IsTerminal;
use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::env;

/// Install the global subscriber.
///
/// The returned guard flushes the optional log file and must be held until
/// the process exits.
pub fn init(debug: bool) -> Option<WorkerGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    let registry = Registry::default().with(build_filter(debug)).with(stderr_layer);

    match build_file_writer() {
        Some((writer, guard)) => {
            let file_layer =
                tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer);
            registry.with(file_layer).init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

fn build_filter(debug: bool) -> EnvFilter {
    match env::var(env::LOG) {
        Some(directives) => EnvFilter::new(directives),
        None if debug => EnvFilter::new("debug"),
        None => EnvFilter::new("info"),
    }
}

fn build_file_writer() -> Option<(NonBlocking, WorkerGuard)> {
    let file_path = env::var(env::LOG_FILE)?;
    let path = Path::new(&file_path);
    let file_name = path.file_name()?.to_os_string();
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let appender = tracing_appender::rolling::never(dir, file_name);
    Some(tracing_appender::non_blocking(appender))
}
