//! Shared upload/analysis workflows over an explicit store handle.
//!
//! Keeping this in one place avoids duplicating the core flows:
//! normalize -> replace (upload); read -> join -> correlate (report).
//!
//! The store is an injected trait object, so every workflow here runs against
//! `MemoryStore` in tests without touching a filesystem.

use std::io::Read;
use std::path::Path;

use crate::domain::{MonthlySeries, SeriesKind};
use crate::error::AppError;
use crate::io::ingest::{UploadOptions, normalize_series, normalize_series_file};
use crate::math::correlate::{Correlation, correlate};
use crate::store::AggregateStore;

/// Both normalized series as written by an upload.
#[derive(Debug, Clone)]
pub struct UploadOutput {
    pub default_rate: MonthlySeries,
    pub interest_rate: MonthlySeries,
}

/// Normalize both uploads and wholesale-replace both tables.
///
/// Both files are fully normalized before anything is written, so a data
/// error in either file leaves the store untouched.
pub fn run_upload<R1: Read, R2: Read>(
    store: &mut dyn AggregateStore,
    default_input: R1,
    interest_input: R2,
    options: UploadOptions,
) -> Result<UploadOutput, AppError> {
    let default_rate = normalize_series(default_input, SeriesKind::DefaultRate, options)?;
    let interest_rate = normalize_series(interest_input, SeriesKind::InterestRate, options)?;

    store.replace(SeriesKind::DefaultRate.table_name(), &default_rate)?;
    store.replace(SeriesKind::InterestRate.table_name(), &interest_rate)?;

    Ok(UploadOutput {
        default_rate,
        interest_rate,
    })
}

/// File-path variant of [`run_upload`].
pub fn run_upload_files(
    store: &mut dyn AggregateStore,
    default_path: &Path,
    interest_path: &Path,
    options: UploadOptions,
) -> Result<UploadOutput, AppError> {
    let default_rate = normalize_series_file(default_path, SeriesKind::DefaultRate, options)?;
    let interest_rate = normalize_series_file(interest_path, SeriesKind::InterestRate, options)?;

    store.replace(SeriesKind::DefaultRate.table_name(), &default_rate)?;
    store.replace(SeriesKind::InterestRate.table_name(), &interest_rate)?;

    Ok(UploadOutput {
        default_rate,
        interest_rate,
    })
}

/// Read both stored tables and correlate them.
pub fn run_correlation(store: &dyn AggregateStore) -> Result<Correlation, AppError> {
    let default_rate = store.read_all(SeriesKind::DefaultRate.table_name())?;
    let interest_rate = store.read_all(SeriesKind::InterestRate.table_name())?;
    correlate(&default_rate, &interest_rate)
}
