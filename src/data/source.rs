//! Acquisition of the raw export text.
//!
//! The source location is explicit configuration: a URL (typically a published
//! spreadsheet CSV link) or a local file. Nothing is cached and nothing is
//! retried; a failed fetch is reported once.

use std::path::PathBuf;

use reqwest::blocking::Client;
use reqwest::header::CACHE_CONTROL;
use tracing::debug;

use crate::domain::Source;
use crate::error::AppError;

/// Environment variable consulted when neither `--file` nor `--url` is given.
pub const SOURCE_URL_ENV: &str = "POINTS_CSV_URL";

impl Source {
    /// Resolve the source from CLI flags, then the environment (`.env` included).
    ///
    /// `--file` wins over `--url`, which wins over `POINTS_CSV_URL`.
    pub fn resolve(file: Option<PathBuf>, url: Option<String>) -> Result<Self, AppError> {
        if let Some(path) = file {
            return Ok(Source::File(path));
        }
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            return Ok(Source::Url(url));
        }

        dotenvy::dotenv().ok();
        match std::env::var(SOURCE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Ok(Source::Url(url)),
            _ => Err(AppError::config(format!(
                "No data source configured. Pass --url/--file or set {SOURCE_URL_ENV} (.env is read)."
            ))),
        }
    }
}

pub struct SourceClient {
    client: Client,
}

impl Default for SourceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceClient {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    /// Fetch the whole export as text.
    pub fn fetch_text(&self, source: &Source) -> Result<String, AppError> {
        match source {
            Source::Url(url) => self.fetch_url(url),
            Source::File(path) => std::fs::read_to_string(path)
                .map_err(|e| AppError::unavailable(format!("Data unavailable: failed to read '{}': {e}", path.display()))),
        }
    }

    fn fetch_url(&self, url: &str) -> Result<String, AppError> {
        debug!(url, "fetching export");
        let resp = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .map_err(|e| AppError::unavailable(format!("Data unavailable: request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::unavailable(format!(
                "Data unavailable: request failed with status {}.",
                resp.status()
            )));
        }

        resp.text()
            .map_err(|e| AppError::unavailable(format!("Data unavailable: failed to read response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_flag_wins_over_url() {
        let source = Source::resolve(Some(PathBuf::from("a.csv")), Some("https://x".to_string())).unwrap();
        assert_eq!(source, Source::File(PathBuf::from("a.csv")));
    }

    #[test]
    fn url_flag_is_used_without_file() {
        let source = Source::resolve(None, Some("https://example.org/pub?output=csv".to_string())).unwrap();
        assert_eq!(source, Source::Url("https://example.org/pub?output=csv".to_string()));
    }

    #[test]
    fn file_source_is_read_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Datum;Zeit;Punkte\n05.03.2024;9:30;1,5\n").unwrap();

        let text = SourceClient::new()
            .fetch_text(&Source::File(file.path().to_path_buf()))
            .unwrap();
        assert!(text.starts_with("Datum;Zeit;Punkte"));
    }

    #[test]
    fn missing_file_is_unavailable_like_a_failed_fetch() {
        let err = SourceClient::new()
            .fetch_text(&Source::File(PathBuf::from("/definitely/not/here.csv")))
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_UNAVAILABLE);
        assert!(err.to_string().starts_with("Data unavailable: failed to read"));
    }
}
