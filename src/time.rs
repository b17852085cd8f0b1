// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helper functions around time.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use hifitime::{Duration, Epoch};
use thiserror::Error;

/// The formats accepted for UTC times, tried in order. A trailing " UTC" or
/// "Z" is stripped first.
const UTC_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Convert a chrono date-time (assumed to be UTC) into an [`Epoch`].
pub(crate) fn epoch_from_naive(dt: NaiveDateTime) -> Option<Epoch> {
    Epoch::maybe_from_gregorian_utc(
        dt.year(),
        dt.month() as u8,
        dt.day() as u8,
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
        // chrono represents leap seconds with nanoseconds >= 1e9.
        dt.nanosecond().min(999_999_999),
    )
    .ok()
}

/// Parse a UTC time like "2024-03-01 12:00:00 UTC", "2024-03-01T12:00:00Z"
/// or just a date ("2024-03-01", meaning midnight).
pub fn parse_utc(s: &str) -> Result<Epoch, TimeParseError> {
    let trimmed = s.trim();
    let trimmed = trimmed
        .strip_suffix("UTC")
        .or_else(|| trimmed.strip_suffix('Z'))
        .unwrap_or(trimmed)
        .trim_end();

    let dt = UTC_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TimeParseError(s.to_string()))?;
    epoch_from_naive(dt).ok_or_else(|| TimeParseError(s.to_string()))
}

/// Round to the nearest second and unpack into (y, m, d, h, min, s).
fn gregorian_seconds(e: Epoch) -> (i32, u8, u8, u8, u8, u8) {
    let (y, m, d, h, min, s, _) = (e + Duration::from_seconds(0.5)).to_gregorian_utc();
    (y, m, d, h, min, s)
}

/// Format like "2024-03-01 12:00:00 UTC".
pub fn format_utc(e: Epoch) -> String {
    let (y, m, d, h, min, s) = gregorian_seconds(e);
    format!("{y:04}-{m:02}-{d:02} {h:02}:{min:02}:{s:02} UTC")
}

/// Format like "2024-03-01T12:00:00Z".
pub fn format_iso(e: Epoch) -> String {
    let (y, m, d, h, min, s) = gregorian_seconds(e);
    format!("{y:04}-{m:02}-{d:02}T{h:02}:{min:02}:{s:02}Z")
}

/// Format for use in file names, like "20240301_120000".
pub(crate) fn format_compact(e: Epoch) -> String {
    let (y, m, d, h, min, s) = gregorian_seconds(e);
    format!("{y:04}{m:02}{d:02}_{h:02}{min:02}{s:02}")
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Could not parse '{0}' as a UTC time; expected something like '2024-03-01 12:00:00'")]
pub struct TimeParseError(pub String);
