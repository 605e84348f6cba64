//! Command-line parsing for the points chart.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the ingest and range code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{ExportFormat, RangeSelection};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "points", version, about = "Points time-series chart (spreadsheet CSV export)")]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to read the export from. Falls back to `POINTS_CSV_URL`.
#[derive(Debug, Args, Clone, Default)]
pub struct SourceArgs {
    /// URL of the published CSV export.
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Read a local copy of the export instead of fetching.
    #[arg(long, global = true, value_name = "CSV")]
    pub file: Option<PathBuf>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the headline for a range, plus an ASCII plot.
    Show(ShowArgs),
    /// Write the points of a range to CSV or JSON.
    Export(ExportArgs),
    /// Launch the interactive TUI.
    ///
    /// Range buttons, headline and chart, rendered with Ratatui.
    Tui(TuiArgs),
}

/// Options for `points show`.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// Range to show: ALL, 1D, 1W, 1M, 3M, 1Y or YTD.
    #[arg(short = 'r', long, default_value = "ALL")]
    pub range: RangeSelection,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for `points export`.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// Output path.
    #[arg(short, long, value_name = "PATH")]
    pub out: PathBuf,

    /// Range to export: ALL, 1D, 1W, 1M, 3M, 1Y or YTD.
    #[arg(short = 'r', long, default_value = "ALL")]
    pub range: RangeSelection,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,
}

/// Options for `points tui`.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Range selected at start-up.
    #[arg(short = 'r', long, default_value = "ALL")]
    pub range: RangeSelection,
}
