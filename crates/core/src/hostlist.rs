// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process expansion of compressed node-range expressions.
//!
//! Handles the forms the scheduler emits: comma lists (`n1,n2`), bracketed
//! numeric ranges with zero padding (`n[001-003]`), comma lists inside the
//! brackets (`n[1,4-5]`), and several bracket groups in one name
//! (`r[1-2]n[1-2]`, expanded as a cartesian product).

use crate::ParseError;

/// Upper bound on hosts produced from a single expression.
pub const MAX_HOSTS: usize = 1 << 20;

/// Node list reported for jobs that never received an allocation.
pub const UNASSIGNED: &str = "None assigned";

/// True when the expression denotes no nodes at all.
pub fn is_unassigned(expr: &str) -> bool {
    let expr = expr.trim();
    expr.is_empty() || expr == UNASSIGNED
}

/// Expand an expression into explicit hostnames, in scheduler order.
///
/// Blank and unassigned input yields no hosts.
pub fn expand(expr: &str) -> Result<Vec<String>, ParseError> {
    if is_unassigned(expr) {
        return Ok(Vec::new());
    }
    let mut hosts = Vec::new();
    for item in split_top_level(expr.trim(), expr)? {
        if item.is_empty() {
            continue;
        }
        for host in expand_item(item, expr)? {
            if hosts.len() == MAX_HOSTS {
                return Err(invalid(expr, "expands to too many hosts"));
            }
            hosts.push(host);
        }
    }
    Ok(hosts)
}

/// Split on commas that are not inside brackets.
fn split_top_level<'a>(s: &'a str, expr: &str) -> Result<Vec<&'a str>, ParseError> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '[' if depth > 0 => return Err(invalid(expr, "nested brackets")),
            '[' => depth += 1,
            ']' if depth == 0 => return Err(invalid(expr, "unbalanced `]`")),
            ']' => depth -= 1,
            ',' if depth == 0 => {
                items.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(invalid(expr, "unbalanced `[`"));
    }
    items.push(s[start..].trim());
    Ok(items)
}

fn expand_item(item: &str, expr: &str) -> Result<Vec<String>, ParseError> {
    let Some(open) = item.find('[') else {
        return Ok(vec![item.to_string()]);
    };
    let close = item[open..]
        .find(']')
        .map(|i| open + i)
        .ok_or_else(|| invalid(expr, "unbalanced `[`"))?;

    let prefix = &item[..open];
    let suffixes = expand_item(&item[close + 1..], expr)?;

    let mut out = Vec::new();
    for part in item[open + 1..close].split(',') {
        for index in expand_range(part.trim(), expr)? {
            for suffix in &suffixes {
                if out.len() == MAX_HOSTS {
                    return Err(invalid(expr, "expands to too many hosts"));
                }
                out.push(format!("{prefix}{index}{suffix}"));
            }
        }
    }
    Ok(out)
}

/// `007` → `["007"]`, `08-10` → `["08", "09", "10"]`. Width follows the
/// lower bound so zero padding is preserved.
fn expand_range(part: &str, expr: &str) -> Result<Vec<String>, ParseError> {
    let (lo, hi) = part.split_once('-').unwrap_or((part, part));
    let parse = |s: &str| {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(expr, &format!("bad range bound `{s}`")));
        }
        s.parse::<u64>().map_err(|e| invalid(expr, &e.to_string()))
    };
    let (start, end) = (parse(lo)?, parse(hi)?);
    if end < start {
        return Err(invalid(expr, &format!("descending range `{part}`")));
    }
    if end - start >= MAX_HOSTS as u64 {
        return Err(invalid(expr, "expands to too many hosts"));
    }
    let width = lo.len();
    Ok((start..=end).map(|n| format!("{n:0width$}")).collect())
}

fn invalid(expr: &str, reason: &str) -> ParseError {
    ParseError::InvalidHostlist { expr: expr.to_string(), reason: reason.to_string() }
}

#[cfg(test)]
#[path = "hostlist_tests.rs"]
mod tests;
