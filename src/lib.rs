//! `points-chart` library crate.
//!
//! The binary (`points`) is a thin wrapper around this library so that:
//!
//! - the ingest/range/headline core is testable without spawning processes
//! - front-ends (CLI printing, TUI) share one pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod series;
pub mod tui;
