// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CSV collector for enriched jobs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use pjs_core::{Job, CSV_HEADER};

/// Output files may carry usernames, so only the owner can read them.
const OUTPUT_MODE: u32 = 0o600;

/// Open `path` for writing, or stdout when absent.
pub fn open(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(OUTPUT_MODE)
                .open(path)?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::BufWriter::new(io::stdout()))),
    }
}

/// Writes one CSV row per job, with an optional header row first.
pub struct JobWriter<W: Write> {
    csv: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> JobWriter<W> {
    pub fn new(out: W, header: bool) -> csv::Result<Self> {
        let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        if header {
            csv.write_record(CSV_HEADER)?;
        }
        Ok(Self { csv, rows: 0 })
    }

    pub fn write(&mut self, job: &Job) -> csv::Result<()> {
        self.csv.write_record(job.csv_record())?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows and hand back the writer.
    pub fn finish(self) -> io::Result<W> {
        self.csv.into_inner().map_err(|e| e.into_error())
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
