// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Elapsed-time and timestamp arithmetic.

use chrono::NaiveDateTime;

use crate::ParseError;

/// Timestamp layout used by the accounting records (`2025-02-03T23:38:14`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: f64 = 3_600.0;

/// Convert `[D-]HH:MM:SS` to total seconds.
///
/// Values whose total does not fit in `u64` are rejected as malformed.
pub fn parse_elapsed(elapsed: &str) -> Result<u64, ParseError> {
    let invalid = || ParseError::InvalidElapsed(elapsed.to_string());

    let (days, hms) = match elapsed.split_once('-') {
        Some((d, rest)) => (d.parse::<u64>().map_err(|_| invalid())?, rest),
        None => (0, elapsed),
    };

    let mut fields = hms.split(':');
    let mut next = || -> Result<u64, ParseError> {
        fields.next().and_then(|f| f.parse::<u64>().ok()).ok_or_else(invalid)
    };
    let (h, m, s) = (next()?, next()?, next()?);
    if fields.next().is_some() {
        return Err(invalid());
    }

    days
        .checked_mul(SECS_PER_DAY)
        .zip(h.checked_mul(3_600))
        .and_then(|(d, h)| d.checked_add(h))
        .and_then(|total| total.checked_add(m.checked_mul(60)?))
        .and_then(|total| total.checked_add(s))
        .ok_or_else(invalid)
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| {
        ParseError::InvalidTimestamp { value: value.to_string(), reason: e.to_string() }
    })
}

/// Hours between submission and start. Negative when the scheduler reports
/// a start before the submit time; the value is passed through as-is.
pub fn wait_time_hours(submit: &str, start: &str) -> Result<f64, ParseError> {
    let submit = parse_timestamp(submit)?;
    let start = parse_timestamp(start)?;
    Ok((start - submit).num_seconds() as f64 / SECS_PER_HOUR)
}

pub fn run_time_hours(elapsed_secs: u64) -> f64 {
    elapsed_secs as f64 / SECS_PER_HOUR
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
