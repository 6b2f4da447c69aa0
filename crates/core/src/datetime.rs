// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Common date and time functions.
//!
//! ISO 8601 parsing accepts the forms produced by the persistence layer: a bare date
//! (`2024-01-31`), a naive date-time with `T` or space separator and optional fractional
//! seconds, or a date-time with an explicit offset (`Z`, `+02:00`). Naive inputs are always
//! interpreted as UTC so every parsed timestamp carries an offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};

/// Number of nanoseconds in one second.
pub const NANOSECONDS_IN_SECOND: u64 = 1_000_000_000;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Stamps a naive date-time as UTC.
#[must_use]
pub fn naive_to_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    naive.and_utc().fixed_offset()
}

/// Returns midnight UTC at the start of `date`.
#[must_use]
pub fn date_to_midnight_utc(date: NaiveDate) -> DateTime<FixedOffset> {
    naive_to_utc(date.and_time(NaiveTime::MIN))
}

/// Parses an ISO 8601 date-time, assuming UTC when no offset is given.
///
/// A bare date is accepted and resolves to midnight UTC.
///
/// # Errors
///
/// Returns an error if `s` matches none of the supported ISO 8601 forms.
pub fn parse_iso_datetime(s: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive_to_utc(naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, ISO_DATE_FORMAT) {
        return Ok(date_to_midnight_utc(date));
    }

    anyhow::bail!("invalid ISO 8601 date-time '{s}'")
}

/// Parses an ISO 8601 date.
///
/// Full date-time text is accepted and truncated to its date component (in its own offset).
///
/// # Errors
///
/// Returns an error if `s` is neither an ISO date nor an ISO date-time.
pub fn parse_iso_date(s: &str) -> anyhow::Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, ISO_DATE_FORMAT) {
        return Ok(date);
    }

    parse_iso_datetime(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| anyhow::anyhow!("invalid ISO 8601 date '{s}'"))
}

/// Formats a date-time as RFC 3339, using `Z` for a zero offset.
#[must_use]
pub fn format_iso_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Returns the whole UNIX seconds of `dt` (truncated toward negative infinity).
#[must_use]
pub fn unix_secs(dt: &DateTime<FixedOffset>) -> i64 {
    dt.timestamp()
}

/// Returns the UNIX seconds of `dt` including the fractional part.
#[must_use]
pub fn unix_secs_f64(dt: &DateTime<FixedOffset>) -> f64 {
    dt.timestamp() as f64
        + f64::from(dt.timestamp_subsec_nanos()) / NANOSECONDS_IN_SECOND as f64
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2024-01-31T10:15:30Z", 0)]
    #[case("2024-01-31T10:15:30+02:00", 7_200)]
    #[case("2024-01-31 10:15:30+02:00", 7_200)]
    #[case("2024-01-31T10:15:30", 0)]
    #[case("2024-01-31 10:15:30.250", 0)]
    #[case("2024-01-31T10:15", 0)]
    fn test_parse_iso_datetime_offsets(#[case] input: &str, #[case] offset_secs: i32) {
        let dt = parse_iso_datetime(input).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), offset_secs);
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 15);
    }

    #[rstest]
    fn test_parse_iso_datetime_bare_date_is_midnight_utc() {
        let dt = parse_iso_datetime("2024-02-29").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
        assert_eq!(dt.day(), 29);
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("2024-13-01")]
    #[case("2024-01-31T25:00:00")]
    fn test_parse_iso_datetime_invalid(#[case] input: &str) {
        assert!(parse_iso_datetime(input).is_err());
    }

    #[rstest]
    #[case("2024-01-31", (2024, 1, 31))]
    #[case("2024-01-31T23:59:59", (2024, 1, 31))]
    #[case("2024-01-31T23:59:59-05:00", (2024, 1, 31))]
    fn test_parse_iso_date(#[case] input: &str, #[case] expected: (i32, u32, u32)) {
        let date = parse_iso_date(input).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), expected);
    }

    #[rstest]
    fn test_parse_iso_date_invalid() {
        let err = parse_iso_date("31/01/2024").unwrap_err();
        assert_eq!(err.to_string(), "invalid ISO 8601 date '31/01/2024'");
    }

    #[rstest]
    fn test_unix_secs() {
        let dt = parse_iso_datetime("1970-01-02T00:00:01.5Z").unwrap();
        assert_eq!(unix_secs(&dt), 86_401);
        assert!((unix_secs_f64(&dt) - 86_401.5).abs() < 1e-9);
    }

    #[rstest]
    fn test_format_iso_datetime() {
        let dt = parse_iso_datetime("2024-01-31 10:15:30").unwrap();
        assert_eq!(format_iso_datetime(&dt), "2024-01-31T10:15:30Z");
    }
}
