//! Input/output helpers.
//!
//! - record splitting and delimiter detection (`tokenize`)
//! - date/time and number recognition (`temporal`, `numeric`)
//! - raw text → `Series` (`ingest`)
//! - series exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;
pub mod numeric;
pub mod temporal;
pub mod tokenize;

pub use export::*;
pub use ingest::*;
