// ABOUTME: Timestamp parsing for track points and wall-clock deltas between them
// ABOUTME: Accepts RFC 3339 and zone-less ISO-8601 timestamps, the latter read as UTC
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacer Track Intelligence

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a track point timestamp, returning `None` for empty or unrecognized text
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Seconds elapsed from `previous` to `current`, millisecond precision
///
/// Negative when the timestamps are out of order.
#[must_use]
pub fn seconds_between(previous: &DateTime<Utc>, current: &DateTime<Utc>) -> f64 {
    (*current - *previous).num_milliseconds() as f64 / 1000.0
}

/// Positive delta in seconds between two optional timestamps
///
/// `None` when either side is missing or the delta is zero or negative.
#[must_use]
pub fn positive_delta(
    previous: Option<&DateTime<Utc>>,
    current: Option<&DateTime<Utc>>,
) -> Option<f64> {
    match (previous, current) {
        (Some(previous), Some(current)) => {
            Some(seconds_between(previous, current)).filter(|dt| *dt > 0.0)
        }
        _ => None,
    }
}
