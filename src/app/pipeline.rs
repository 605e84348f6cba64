//! Shared load/view logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> ingest (tokenize, parse, reject, sort) -> range filter -> headline
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::info;

use crate::data::SourceClient;
use crate::domain::{Observation, RangeSelection, Series, Source};
use crate::error::AppError;
use crate::io::ingest::{Ingested, build_series};
use crate::report::Headline;
use crate::series::filter_range;

/// Output of one ingestion cycle: the series plus row counts.
pub type LoadOutput = Ingested;

/// The part of a series shown for one range, with its headline.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeView<'a> {
    pub selection: RangeSelection,
    pub points: &'a [Observation],
    /// `None` when the range is empty.
    pub headline: Option<Headline>,
}

/// Fetch and ingest the configured source.
pub fn load_series(source: &Source) -> Result<LoadOutput, AppError> {
    load_series_with(&SourceClient::new(), source)
}

/// Fetch and ingest with a caller-owned client (the TUI keeps one across reloads).
pub fn load_series_with(client: &SourceClient, source: &Source) -> Result<LoadOutput, AppError> {
    let raw = client.fetch_text(source)?;
    let out = ingest_text(&raw);
    info!(
        source = %source.describe(),
        lines = out.stats.lines_read,
        used = out.stats.rows_used,
        rejected = out.stats.rows_rejected,
        "loaded series"
    );
    Ok(out)
}

/// Ingest already-acquired text.
pub fn ingest_text(raw: &str) -> LoadOutput {
    build_series(raw)
}

/// Apply a range to the series and compute the headline for it.
pub fn view<'a>(series: &'a Series, selection: &RangeSelection) -> RangeView<'a> {
    let points = filter_range(series, selection);
    RangeView {
        selection: selection.clone(),
        points,
        headline: Headline::compute(points),
    }
}

/// Error for a cycle that produced no observations at all.
pub fn ensure_not_empty(out: &LoadOutput) -> Result<(), AppError> {
    if out.series.is_empty() {
        return Err(AppError::no_data(format!(
            "No data: none of the {} non-blank lines held a valid observation.",
            out.stats.lines_read
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RangeSelector;

    const RAW: &str = "\
Datum;Uhrzeit;Punkte
01.03.2024;12:00;100,00
02.03.2024;12:00;101,00
03.03.2024;12:00;99,50
04.03.2024;12:00;103,00
05.03.2024;12:00;104,00
06.03.2024;12:00;102,00
07.03.2024;12:00;108,00
08.03.2024;12:00;110,00
";

    #[test]
    fn week_view_covers_all_eight_days() {
        let out = ingest_text(RAW);
        let v = view(&out.series, &RangeSelection::Named(RangeSelector::OneWeek));
        assert_eq!(v.points.len(), 8);

        let h = v.headline.unwrap();
        assert!((h.change_abs - 10.0).abs() < 1e-9);
        assert!((h.change_pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn one_day_view_uses_its_own_first_point() {
        let out = ingest_text(RAW);
        let v = view(&out.series, &RangeSelection::Named(RangeSelector::OneDay));
        assert_eq!(v.points.len(), 2);
        let h = v.headline.unwrap();
        assert!((h.change_abs - 2.0).abs() < 1e-9);
    }

    #[test]
    fn header_only_input_is_no_data() {
        let out = ingest_text("Datum;Uhrzeit;Punkte\n\n\n");
        assert!(out.series.is_empty());
        let err = ensure_not_empty(&out).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_NO_DATA);

        let v = view(&out.series, &RangeSelection::default());
        assert!(v.points.is_empty());
        assert_eq!(v.headline, None);
    }
}
