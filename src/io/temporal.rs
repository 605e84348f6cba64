//! Date/time recognition and the wall-clock timestamp convention.
//!
//! Two date shapes are accepted, tried in order: ISO `YYYY-MM-DD` and German
//! `DD.MM.YYYY`. Times are `H:MM` or `HH:MM`.
//!
//! Timestamps are built from the wall-clock fields as if they were UTC and
//! turned back into wall-clock fields the same way (`wall_clock`), so display
//! round-trips without any timezone database.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;

// `[0-9]` rather than `\d`: the latter also matches non-ASCII digits.
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("ISO date pattern"));
static GERMAN_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4})$").expect("German date pattern"));
static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").expect("clock pattern"));

/// Accepted date encodings, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    Iso,
    /// `DD.MM.YYYY`
    German,
}

impl DateFormat {
    pub const ORDERED: [DateFormat; 2] = [DateFormat::Iso, DateFormat::German];

    /// Match the shape and pull out `(year, month, day)`.
    ///
    /// No calendar validation happens here.
    pub fn match_fields(self, s: &str) -> Option<(i32, u32, u32)> {
        match self {
            DateFormat::Iso => {
                let caps = ISO_DATE.captures(s)?;
                Some((caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?))
            }
            DateFormat::German => {
                let caps = GERMAN_DATE.captures(s)?;
                Some((caps[3].parse().ok()?, caps[2].parse().ok()?, caps[1].parse().ok()?))
            }
        }
    }
}

/// Parse a calendar date in either accepted shape.
///
/// Impossible dates such as `2024-13-40` are `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let (y, m, d) = DateFormat::ORDERED
        .into_iter()
        .find_map(|format| format.match_fields(s))?;
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Parse `H:MM` / `HH:MM` into `(hours, minutes)`.
///
/// The values are not bounds-checked: `25:99` is `(25, 99)`.
pub fn parse_clock(s: &str) -> Option<(i64, i64)> {
    let caps = CLOCK.captures(s.trim())?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// Combine a date and a time field into epoch seconds.
///
/// Hours and minutes are added to midnight of the date, so out-of-range clock
/// values roll over into the following day(s).
pub fn to_timestamp(date: &str, time: &str) -> Option<i64> {
    let date = parse_date(date)?;
    let (hours, minutes) = parse_clock(time)?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    let wall = midnight + Duration::hours(hours) + Duration::minutes(minutes);
    Some(wall.and_utc().timestamp())
}

/// Seconds for a wall-clock date and time, for cutoffs computed on the calendar.
pub fn timestamp_of(wall: NaiveDateTime) -> i64 {
    wall.and_utc().timestamp()
}

/// Inverse of `to_timestamp`: the wall-clock fields of a timestamp.
pub fn wall_clock(ts: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.naive_utc())
}
