//! Reporting: headline statistics and formatted output.

pub mod format;
pub mod headline;

pub use format::{HeadlineText, Tone, format_headline, format_summary};
pub use headline::Headline;
