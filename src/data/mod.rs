//! Data acquisition.

pub mod source;

pub use source::{SOURCE_URL_ENV, SourceClient};
