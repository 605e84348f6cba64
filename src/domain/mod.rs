//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - normalized observations and the ordered `Series`
//! - range selection (`RangeSelector`, `RangeSelection`)
//! - input/output configuration (`Source`, `ExportFormat`)

pub mod types;

pub use types::*;
