//! Views derived from a built `Series`.

pub mod range;

pub use range::{cutoff, filter_range};
