//! Raw text ingest and normalization.
//!
//! This module turns the text of a spreadsheet export into a `Series`.
//!
//! Design goals:
//! - **Tolerant input**: comma or semicolon separated, ISO or German dates,
//!   decimal comma or point, stray header/blank rows anywhere
//! - **Silent row rejection**: a row that doesn't parse is dropped and only
//!   counted; ingest itself never fails
//! - **Deterministic output**: stable sort, so equal input gives an equal series

use tracing::debug;

use crate::domain::{Observation, Series};
use crate::io::numeric::parse_value;
use crate::io::temporal::to_timestamp;
use crate::io::tokenize::{Delimiter, detect_delimiter, split_record};

const BOM: char = '\u{feff}';

/// Aggregate counts for one ingest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestStats {
    /// Non-blank lines seen, header rows included.
    pub lines_read: usize,
    pub rows_used: usize,
    pub rows_rejected: usize,
    pub delimiter: Delimiter,
}

/// Ingest output: the sorted series plus counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingested {
    pub series: Series,
    pub stats: IngestStats,
}

/// Build a sorted series from the raw export text.
pub fn build_series(raw: &str) -> Ingested {
    let text = raw.strip_prefix(BOM).unwrap_or(raw);

    // `lines()` splits on `\n` and drops a trailing `\r`.
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let delimiter = detect_delimiter(lines.iter().copied());
    debug!(?delimiter, lines = lines.len(), "detected field delimiter");

    let points: Vec<Observation> = lines
        .iter()
        .filter_map(|line| parse_row(line, delimiter))
        .collect();

    let stats = IngestStats {
        lines_read: lines.len(),
        rows_used: points.len(),
        rows_rejected: lines.len() - points.len(),
        delimiter,
    };

    Ingested {
        series: Series::from_unsorted(points),
        stats,
    }
}

/// Parse one line into an observation, or `None` when the row is rejected.
///
/// Rejected: fewer than three fields, three empty leading fields, header rows
/// (first field mentions "date"/"datum"), and rows whose timestamp or value
/// doesn't parse. Fields from the third on are rejoined with the delimiter so
/// an unquoted decimal comma in a comma-separated file survives splitting.
pub fn parse_row(line: &str, delimiter: Delimiter) -> Option<Observation> {
    let fields = split_record(line, delimiter);
    if fields.len() < 3 {
        return None;
    }
    if fields[..3].iter().all(String::is_empty) {
        return None;
    }
    if is_header(&fields[0]) {
        return None;
    }

    let time = to_timestamp(&fields[0], &fields[1])?;
    let value = parse_value(&fields[2..].join(delimiter.as_str()))?;
    Observation::new(time, value)
}

fn is_header(first: &str) -> bool {
    let first = first.to_lowercase();
    first.contains("date") || first.contains("datum")
}
