//! Command-line parsing for the series store and correlation analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the normalization/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::SeriesKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "econ", version, about = "Monthly series store + correlation analyzer")]
pub struct Cli {
    /// Store file path (defaults to $ECON_DB_PATH, then `econ-store.json`).
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize two series CSVs to monthly aggregates and replace both tables.
    Upload(UploadArgs),
    /// Print a stored table, ordered by month.
    Show(TableArgs),
    /// Update a single month's value in a stored table.
    Edit(EditArgs),
    /// Render an ASCII line chart of a stored series.
    Chart(ChartArgs),
    /// Join the two series and report Pearson correlation + trend line.
    Correlate(CorrelateArgs),
    /// Normalize a geospatial listing CSV and print cleaned points + marker sizes.
    Map(MapArgs),
}

#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// Default-rate series CSV (date;value with a DD/MM/YYYY date column).
    #[arg(long, value_name = "CSV")]
    pub default_rate: PathBuf,

    /// Interest-rate series CSV (daily observations, same layout).
    #[arg(long, value_name = "CSV")]
    pub interest_rate: PathBuf,

    /// Field separator for both files.
    #[arg(long, default_value_t = ';')]
    pub delimiter: char,

    /// Treat the first row as data instead of a header to skip.
    #[arg(long)]
    pub no_header: bool,
}

#[derive(Debug, Parser)]
pub struct TableArgs {
    /// Which table to read.
    #[arg(long, value_enum)]
    pub table: SeriesKind,
}

#[derive(Debug, Parser)]
pub struct EditArgs {
    /// Which table to edit.
    #[arg(long, value_enum)]
    pub table: SeriesKind,

    /// Month key, `YYYY-MM`.
    #[arg(long, value_name = "YYYY-MM")]
    pub month: String,

    /// New value for the month.
    #[arg(long)]
    pub value: f64,
}

#[derive(Debug, Parser)]
pub struct ChartArgs {
    /// Which table to chart.
    #[arg(long, value_enum)]
    pub table: SeriesKind,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Parser)]
pub struct CorrelateArgs {
    /// Skip the ASCII scatter plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Parser)]
pub struct MapArgs {
    /// Listing CSV with latitude/longitude (and optional cost/name) columns.
    #[arg(long, value_name = "CSV")]
    pub file: PathBuf,
}
