//! Range filtering: restrict a series to a lookback window.
//!
//! Cutoffs are computed from the last observation on the wall clock:
//! `1D`/`1W`/`1M`/`3M`/`1Y` subtract 1/7/30/90/365 literal days, `YTD` is
//! January 1st 00:00 of the last observation's year. The filter is inclusive
//! (`time >= cutoff`).

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::domain::{Observation, RangeSelection, RangeSelector, SECONDS_PER_DAY, Series};
use crate::io::temporal::{timestamp_of, wall_clock};

/// Cutoff used for labels that don't name a selector: the epoch.
pub const FALLBACK_CUTOFF: i64 = 0;

/// Lower time bound for `selection`, or `None` when nothing is cut (`ALL`).
pub fn cutoff(selection: &RangeSelection, last_time: i64) -> Option<i64> {
    let Some(selector) = selection.selector() else {
        return Some(FALLBACK_CUTOFF);
    };

    match selector {
        RangeSelector::All => None,
        RangeSelector::YearToDate => Some(start_of_year(last_time)),
        other => other
            .lookback_days()
            .map(|days| last_time - days * SECONDS_PER_DAY),
    }
}

/// Observations at or after the selection's cutoff.
///
/// The series is sorted, so the result is always a suffix of it. An empty
/// series gives an empty slice.
pub fn filter_range<'a>(series: &'a Series, selection: &RangeSelection) -> &'a [Observation] {
    let points = series.as_slice();
    let Some(last) = points.last() else {
        return points;
    };

    let Some(cut) = cutoff(selection, last.time()) else {
        return points;
    };

    let start = points.partition_point(|p| p.time() < cut);
    debug!(range = selection.label(), cutoff = cut, kept = points.len() - start, "applied range");
    &points[start..]
}

fn start_of_year(ts: i64) -> i64 {
    wall_clock(ts)
        .and_then(|wall| NaiveDate::from_ymd_opt(wall.year(), 1, 1))
        .and_then(|jan1| jan1.and_hms_opt(0, 0, 0))
        .map(timestamp_of)
        .unwrap_or(FALLBACK_CUTOFF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::temporal::to_timestamp;

    fn at(date: &str, time: &str, value: f64) -> Observation {
        Observation::new(to_timestamp(date, time).unwrap(), value).unwrap()
    }

    fn daily(n: i64) -> Series {
        let start = to_timestamp("2024-03-01", "12:00").unwrap();
        Series::from_unsorted(
            (0..n)
                .map(|i| Observation::new(start + i * SECONDS_PER_DAY, i as f64).unwrap())
                .collect(),
        )
    }

    fn named(selector: RangeSelector) -> RangeSelection {
        RangeSelection::Named(selector)
    }

    #[test]
    fn one_week_is_inclusive_of_the_boundary_day() {
        let series = daily(8);
        let week = filter_range(&series, &named(RangeSelector::OneWeek));
        assert_eq!(week.len(), 8);

        let series = daily(9);
        let week = filter_range(&series, &named(RangeSelector::OneWeek));
        assert_eq!(week.len(), 8);
        assert_eq!(week[0].value(), 1.0);
    }

    #[test]
    fn all_returns_everything() {
        let series = daily(400);
        assert_eq!(filter_range(&series, &named(RangeSelector::All)).len(), 400);
    }

    #[test]
    fn literal_day_counts() {
        let series = daily(400);
        assert_eq!(filter_range(&series, &named(RangeSelector::OneDay)).len(), 2);
        assert_eq!(filter_range(&series, &named(RangeSelector::OneMonth)).len(), 31);
        assert_eq!(filter_range(&series, &named(RangeSelector::ThreeMonths)).len(), 91);
        assert_eq!(filter_range(&series, &named(RangeSelector::OneYear)).len(), 366);
    }

    #[test]
    fn one_day_keeps_intraday_points_after_cutoff() {
        let series = Series::from_unsorted(vec![
            at("2024-03-04", "09:00", 1.0),
            at("2024-03-04", "10:00", 2.0),
            at("2024-03-05", "09:00", 3.0),
            at("2024-03-05", "10:00", 4.0),
        ]);
        let day = filter_range(&series, &named(RangeSelector::OneDay));
        let values: Vec<f64> = day.iter().map(Observation::value).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn ytd_starts_at_january_first() {
        let series = Series::from_unsorted(vec![
            at("2023-12-31", "23:59", 1.0),
            at("2024-01-01", "00:00", 2.0),
            at("2024-02-10", "08:00", 3.0),
        ]);
        let ytd = filter_range(&series, &named(RangeSelector::YearToDate));
        assert_eq!(ytd.len(), 2);
        assert_eq!(ytd[0].value(), 2.0);
        assert_eq!(
            cutoff(&named(RangeSelector::YearToDate), ytd[1].time()),
            to_timestamp("2024-01-01", "0:00")
        );
    }

    #[test]
    fn unrecognized_label_falls_back_to_epoch() {
        let series = Series::from_unsorted(vec![
            at("1969-12-31", "12:00", 1.0),
            at("1970-01-02", "12:00", 2.0),
            at("2024-01-01", "12:00", 3.0),
        ]);
        let sel = RangeSelection::parse("5Y");
        assert_eq!(cutoff(&sel, 0), Some(FALLBACK_CUTOFF));
        assert_eq!(filter_range(&series, &sel).len(), 2);
        assert_eq!(filter_range(&series, &named(RangeSelector::All)).len(), 3);
    }

    #[test]
    fn range_can_filter_out_everything() {
        let series = Series::from_unsorted(vec![at("1969-06-01", "12:00", 1.0), at("1969-07-01", "12:00", 2.0)]);
        assert!(filter_range(&series, &RangeSelection::parse("bogus")).is_empty());
    }

    #[test]
    fn empty_series_gives_empty_range() {
        let series = Series::default();
        for selector in RangeSelector::ALL {
            assert!(filter_range(&series, &named(selector)).is_empty());
        }
    }
}
