//! Export a (filtered) series to CSV or JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets: raw epoch seconds,
//! the display timestamp, and the value with a decimal point.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{ExportFormat, Observation};
use crate::error::AppError;
use crate::report::format::format_timestamp_de;

/// Write observations to `path` in the requested format.
pub fn write_series(path: &Path, points: &[Observation], format: ExportFormat) -> Result<(), AppError> {
    match format {
        ExportFormat::Csv => write_series_csv(path, points),
        ExportFormat::Json => write_series_json(path, points),
    }
}

/// Write observations as `time,timestamp,value` rows.
pub fn write_series_csv(path: &Path, points: &[Observation]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "time,timestamp,value")
        .map_err(|e| AppError::config(format!("Failed to write export CSV header: {e}")))?;

    for p in points {
        writeln!(out, "{},{},{}", p.time(), format_timestamp_de(p.time()), p.value())
            .map_err(|e| AppError::config(format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::config(format!("Failed to flush export CSV: {e}")))
}

/// Write observations as a JSON array of `{ "time", "value" }` objects.
pub fn write_series_json(path: &Path, points: &[Observation]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let mut out = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut out, points)
        .map_err(|e| AppError::config(format!("Failed to write export JSON: {e}")))?;

    out.flush()
        .map_err(|e| AppError::config(format!("Failed to flush export JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::temporal::to_timestamp;

    fn sample() -> Vec<Observation> {
        vec![
            Observation::new(to_timestamp("2024-03-05", "09:30").unwrap(), 1234.56).unwrap(),
            Observation::new(to_timestamp("2024-03-06", "17:05").unwrap(), -2.5).unwrap(),
        ]
    }

    #[test]
    fn csv_export_has_header_and_display_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        write_series(&path, &sample(), ExportFormat::Csv).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time,timestamp,value");
        assert_eq!(lines[1], "1709631000,05.03.2024 09:30,1234.56");
        assert_eq!(lines[2], "1709744700,06.03.2024 17:05,-2.5");
    }

    #[test]
    fn json_export_lists_time_and_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.json");
        write_series(&path, &sample(), ExportFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["time"], 1709631000);
        assert_eq!(arr[1]["value"], -2.5);
    }

    #[test]
    fn unwritable_path_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("series.csv");
        let err = write_series(&path, &sample(), ExportFormat::Csv).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
    }
}
