//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the data source
//! - sets up logging
//! - loads the series and prints/exports a range, or starts the TUI

use clap::Parser;
use tracing::warn;

use crate::cli::{Command, ExportArgs, ShowArgs};
use crate::domain::{RangeSelection, Source};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `points` binary.
pub fn run() -> Result<(), AppError> {
    // We want `points` and `points --file x.csv` to behave like `points tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let source = Source::resolve(cli.source.file.clone(), cli.source.url.clone())?;

    match cli.command {
        Command::Show(args) => {
            setup_logging(cli.verbose, cli.quiet);
            handle_show(&source, args)
        }
        Command::Export(args) => {
            setup_logging(cli.verbose, cli.quiet);
            handle_export(&source, args)
        }
        // No stderr subscriber here: log lines would tear the alternate screen.
        Command::Tui(args) => crate::tui::run(source, args.range),
    }
}

fn handle_show(source: &Source, args: ShowArgs) -> Result<(), AppError> {
    let loaded = pipeline::load_series(source)?;
    pipeline::ensure_not_empty(&loaded)?;
    warn_if_unrecognized(&args.range);

    let view = pipeline::view(&loaded.series, &args.range);
    println!(
        "{}",
        crate::report::format_summary(
            view.selection.label(),
            view.points.len(),
            loaded.series.len(),
            view.headline.as_ref(),
        )
    );

    if args.plot && !args.no_plot {
        println!("{}", crate::plot::render_ascii_plot(view.points, args.width, args.height));
    }

    Ok(())
}

fn handle_export(source: &Source, args: ExportArgs) -> Result<(), AppError> {
    let loaded = pipeline::load_series(source)?;
    pipeline::ensure_not_empty(&loaded)?;
    warn_if_unrecognized(&args.range);

    let view = pipeline::view(&loaded.series, &args.range);
    crate::io::export::write_series(&args.out, view.points, args.format)?;
    println!("Wrote {} points to {}", view.points.len(), args.out.display());
    Ok(())
}

fn warn_if_unrecognized(range: &RangeSelection) {
    if let RangeSelection::Unrecognized(label) = range {
        warn!(range = %label, "unrecognized range, showing everything from the epoch on");
    }
}

/// Set up structured logging to stderr.
///
/// `RUST_LOG` overrides the level picked by `-v`/`-q`.
fn setup_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = log_level(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("points_chart={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Rewrite argv so `points` defaults to `points tui`.
///
/// Rules:
/// - `points`                       -> `points tui`
/// - `points --file x.csv ...`      -> `points tui --file x.csv ...`
/// - `points --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "export" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
