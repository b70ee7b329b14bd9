// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.
//!
//! Location-history exports carry timestamps in several ISO-8601 shapes:
//! trailing `Z`, numeric offsets with or without a colon, and fractional
//! seconds of arbitrary length. `parse_timestamp` normalizes all of them
//! to UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an ISO-8601-like timestamp into UTC.
///
/// Accepts `2025-06-22T18:42:24Z`, `2025-06-22T18:42:24+03:00`,
/// `2025-06-22T18:42:24+0300`, each with an optional fractional-seconds
/// component of any length. A timestamp with no offset marker at all is
/// parsed naively and taken as UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let text = text.trim();

    // RFC3339 covers `Z` and colon offsets, including fractional seconds.
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Offsets without a colon (`+0300`) fall outside RFC3339.
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.with_timezone(&Utc));
    }

    // No offset marker left to honor: parse naively, take as UTC.
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| TimeParseError::Unrecognized(text.to_string()))
}

/// Errors from timestamp parsing.
#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Unrecognized timestamp format: {0}")]
    Unrecognized(String),
}
