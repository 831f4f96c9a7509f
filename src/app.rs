//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the store path and opens a store handle
//! - runs the requested workflow (upload, show, edit, chart, correlate, map)
//! - prints reports/plots

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{
    ChartArgs, Cli, Command, CorrelateArgs, EditArgs, MapArgs, TableArgs, UploadArgs,
};
use crate::error::AppError;
use crate::io::ingest::UploadOptions;
use crate::store::{AggregateStore, JsonStore};

pub mod pipeline;

/// Entry point for the `econ` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let db_path = resolve_store_path(cli.db);

    match cli.command {
        Command::Upload(args) => handle_upload(args, db_path),
        Command::Show(args) => handle_show(args, db_path),
        Command::Edit(args) => handle_edit(args, db_path),
        Command::Chart(args) => handle_chart(args, db_path),
        Command::Correlate(args) => handle_correlate(args, db_path),
        Command::Map(args) => handle_map(args),
    }
}

/// Store path resolution: `--db` flag, then `ECON_DB_PATH` (including `.env`),
/// then a local default.
fn resolve_store_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    dotenvy::dotenv().ok();
    std::env::var("ECON_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("econ-store.json"))
}

fn delimiter_byte(delimiter: char) -> Result<u8, AppError> {
    u8::try_from(delimiter).map_err(|_| {
        AppError::input(format!(
            "Delimiter '{delimiter}' is not a single-byte character."
        ))
    })
}

fn handle_upload(args: UploadArgs, db_path: PathBuf) -> Result<(), AppError> {
    let options = UploadOptions {
        delimiter: delimiter_byte(args.delimiter)?,
        has_headers: !args.no_header,
    };
    let mut store = JsonStore::new(db_path);

    let out = pipeline::run_upload_files(
        &mut store,
        &args.default_rate,
        &args.interest_rate,
        options,
    )?;

    print!(
        "{}",
        crate::report::format_upload_summary(&out.default_rate, &out.interest_rate)
    );
    Ok(())
}

fn handle_show(args: TableArgs, db_path: PathBuf) -> Result<(), AppError> {
    let store = JsonStore::new(db_path);
    let series = store.read_all(args.table.table_name())?;
    print!("{}", crate::report::format_series_table(args.table, &series));
    Ok(())
}

fn handle_edit(args: EditArgs, db_path: PathBuf) -> Result<(), AppError> {
    let mut store = JsonStore::new(db_path);
    let affected = store.update(args.table.table_name(), &args.month, args.value)?;

    // Zero-effect edits succeed; the caller just gets told.
    if affected == 0 {
        println!("No row for month {}; nothing updated.", args.month);
    } else {
        println!("Updated {} for month {}.", args.table.display_name(), args.month);
    }
    Ok(())
}

fn handle_chart(args: ChartArgs, db_path: PathBuf) -> Result<(), AppError> {
    let store = JsonStore::new(db_path);
    let series = store.read_all(args.table.table_name())?;
    print!(
        "{}",
        crate::plot::render_series_chart(&series, args.width, args.height)
    );
    Ok(())
}

fn handle_correlate(args: CorrelateArgs, db_path: PathBuf) -> Result<(), AppError> {
    let store = JsonStore::new(db_path);
    let corr = pipeline::run_correlation(&store)?;

    print!("{}", crate::report::format_correlation_summary(&corr));
    if !args.no_plot {
        print!(
            "{}",
            crate::plot::render_scatter_with_trend(
                &corr.points,
                corr.result.slope,
                corr.result.intercept,
                args.width,
                args.height,
            )
        );
    }
    Ok(())
}

fn handle_map(args: MapArgs) -> Result<(), AppError> {
    let dataset = crate::geo::load_geo_dataset_file(&args.file)?;
    print!("{}", crate::report::format_geo_summary(&dataset));
    Ok(())
}
