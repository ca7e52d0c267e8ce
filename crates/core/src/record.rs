// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw accounting record as emitted by `sacct -P`.

use std::str::FromStr;

use crate::time::parse_elapsed;
use crate::ParseError;

/// Number of pipe-delimited fields in a raw accounting line.
pub const FIELD_COUNT: usize = 14;

/// One finished job exactly as reported by the scheduler.
///
/// Field order on the wire:
/// `job_id|job_name|username|account|partition|elapsed|nodes|cpus|tres|submit|start|end|nodelist|state`
///
/// Only the integer columns and the elapsed time are validated here.
/// Timestamps and the state string stay raw: jobs cancelled before they
/// started carry placeholder values there and must still reach the
/// empty-nodelist skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawJobRecord {
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
    /// Compressed node-range expression, e.g. `n[0101-0104],n0200`
    pub node_list: String,
    pub state: String,
    /// `elapsed` converted to seconds
    pub elapsed_secs: u64,
}

impl RawJobRecord {
    /// Split and validate one accounting line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount { expected: FIELD_COUNT, found: parts.len() });
        }

        let node_count =
            parts[6].parse::<u32>().map_err(|e| ParseError::integer("node count", parts[6], e))?;
        let cpus =
            parts[7].parse::<u32>().map_err(|e| ParseError::integer("cpu count", parts[7], e))?;
        let elapsed_secs = parse_elapsed(parts[5])?;

        Ok(Self {
            job_id: parts[0].to_string(),
            job_name: parts[1].to_string(),
            username: parts[2].to_string(),
            account: parts[3].to_string(),
            partition: parts[4].to_string(),
            elapsed: parts[5].to_string(),
            node_count,
            cpus,
            tres: parts[8].to_string(),
            submit_time: parts[9].to_string(),
            start_time: parts[10].to_string(),
            end_time: parts[11].to_string(),
            node_list: parts[12].to_string(),
            state: parts[13].to_string(),
            elapsed_secs,
        })
    }

    /// Render back to the pipe-delimited wire form.
    pub fn to_line(&self) -> String {
        [
            self.job_id.as_str(),
            &self.job_name,
            &self.username,
            &self.account,
            &self.partition,
            &self.elapsed,
            &self.node_count.to_string(),
            &self.cpus.to_string(),
            &self.tres,
            &self.submit_time,
            &self.start_time,
            &self.end_time,
            &self.node_list,
            &self.state,
        ]
        .join("|")
    }
}

impl FromStr for RawJobRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
