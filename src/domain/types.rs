//! Shared domain types.
//!
//! These types are intentionally small:
//!
//! - `Observation` / `Series` are the normalized output of ingest
//! - `RangeSelector` / `RangeSelection` name the lookback window shown
//! - `Source` says where the raw text comes from

use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// One normalized data point.
///
/// `time` is seconds since the epoch built from the wall-clock fields of the
/// row with no timezone applied; `value` is always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    time: i64,
    value: f64,
}

impl Observation {
    /// Returns `None` for NaN/infinite values.
    pub fn new(time: i64, value: f64) -> Option<Self> {
        value.is_finite().then_some(Self { time, value })
    }

    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Chronologically ordered observations from one ingestion cycle.
///
/// Ordering is by `time` only and stable, so duplicate timestamps keep their
/// input order. A `Series` is never edited after construction; a reload builds
/// a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: Vec<Observation>,
}

impl Series {
    pub fn from_unsorted(mut points: Vec<Observation>) -> Self {
        // `sort_by_key` is stable.
        points.sort_by_key(Observation::time);
        Self { points }
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Named lookback windows offered by the range controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeSelector {
    All,
    OneDay,
    OneWeek,
    OneMonth,
    ThreeMonths,
    OneYear,
    YearToDate,
}

impl RangeSelector {
    /// Display order of the range controls.
    pub const ALL: [RangeSelector; 7] = [
        RangeSelector::All,
        RangeSelector::OneDay,
        RangeSelector::OneWeek,
        RangeSelector::OneMonth,
        RangeSelector::ThreeMonths,
        RangeSelector::OneYear,
        RangeSelector::YearToDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RangeSelector::All => "ALL",
            RangeSelector::OneDay => "1D",
            RangeSelector::OneWeek => "1W",
            RangeSelector::OneMonth => "1M",
            RangeSelector::ThreeMonths => "3M",
            RangeSelector::OneYear => "1Y",
            RangeSelector::YearToDate => "YTD",
        }
    }

    /// Case-insensitive label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))
    }

    /// Fixed lookback in literal days, for the selectors that have one.
    ///
    /// `All` has no cutoff and `YearToDate` is anchored to the calendar.
    pub fn lookback_days(self) -> Option<i64> {
        match self {
            RangeSelector::OneDay => Some(1),
            RangeSelector::OneWeek => Some(7),
            RangeSelector::OneMonth => Some(30),
            RangeSelector::ThreeMonths => Some(90),
            RangeSelector::OneYear => Some(365),
            RangeSelector::All | RangeSelector::YearToDate => None,
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let n = Self::ALL.len();
        Self::ALL[(self.position() + n - 1) % n]
    }
}

/// A range request as it arrives from the outside.
///
/// Labels that don't name a `RangeSelector` are kept rather than rejected;
/// filtering treats them as "from the epoch on".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSelection {
    Named(RangeSelector),
    Unrecognized(String),
}

impl RangeSelection {
    pub fn parse(label: &str) -> Self {
        match RangeSelector::from_label(label) {
            Some(selector) => RangeSelection::Named(selector),
            None => RangeSelection::Unrecognized(label.to_string()),
        }
    }

    pub fn selector(&self) -> Option<RangeSelector> {
        match self {
            RangeSelection::Named(selector) => Some(*selector),
            RangeSelection::Unrecognized(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RangeSelection::Named(selector) => selector.label(),
            RangeSelection::Unrecognized(raw) => raw,
        }
    }
}

impl Default for RangeSelection {
    fn default() -> Self {
        RangeSelection::Named(RangeSelector::All)
    }
}

impl From<RangeSelector> for RangeSelection {
    fn from(value: RangeSelector) -> Self {
        RangeSelection::Named(value)
    }
}

impl FromStr for RangeSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RangeSelection::parse(s))
    }
}

/// Where the raw tabular text is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A published spreadsheet export (or any URL serving the text).
    Url(String),
    /// A local copy of the export.
    File(PathBuf),
}

impl Source {
    pub fn describe(&self) -> String {
        match self {
            Source::Url(url) => url.clone(),
            Source::File(path) => path.display().to_string(),
        }
    }
}

/// File format for `points export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}
