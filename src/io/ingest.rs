//! Series CSV ingest and monthly normalization.
//!
//! This module turns a two-column delimited upload (date; value) into a
//! `MonthlySeries` that is safe to persist.
//!
//! Design goals:
//! - **Strict dates**: every date must parse as `DD/MM/YYYY`, or the whole
//!   upload fails. No row-level partial acceptance.
//! - **Deterministic aggregation**: the reduction per month key depends only
//!   on the series kind (first-seen wins vs. arithmetic mean).
//! - **Separation of concerns**: no storage or correlation logic here.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::{MonthlySeries, SeriesKind};
use crate::error::AppError;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Default field separator for series uploads.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Load and normalize a series file to monthly granularity.
pub fn normalize_series_file(
    path: &Path,
    kind: SeriesKind,
    options: UploadOptions,
) -> Result<MonthlySeries, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open series CSV '{}': {e}", path.display())))?;
    normalize_series(file, kind, options)
}

/// Input conventions for a series upload.
#[derive(Debug, Clone, Copy)]
pub struct UploadOptions {
    /// Field separator, a single byte.
    pub delimiter: u8,
    /// Whether the file starts with a header row to skip.
    pub has_headers: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            has_headers: true,
        }
    }
}

/// Normalize a two-column (date; value) upload into a `MonthlySeries`.
///
/// The header row (when present) is skipped; fields are read positionally.
/// The month key is the `YYYY-MM` truncation of the parsed date. Reduction
/// per month key:
///
/// - `DefaultRate`: first occurrence wins; later values for a seen month are
///   ignored (exact duplicate rows are subsumed by the same rule).
/// - `InterestRate`: arithmetic mean of all observations in the month.
pub fn normalize_series<R: Read>(
    input: R,
    kind: SeriesKind,
    options: UploadOptions,
) -> Result<MonthlySeries, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    // CSV line numbers are 1-based; records() starts after the header row
    // when one is present.
    let first_line = if options.has_headers { 2 } else { 1 };

    let mut rows: Vec<(String, f64)> = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let line = idx + first_line;

        let record =
            result.map_err(|e| AppError::input(format!("CSV parse error on line {line}: {e}")))?;

        let date_field = field(&record, 0);
        let value_field = field(&record, 1);

        let date = NaiveDate::parse_from_str(date_field, DATE_FORMAT).map_err(|_| {
            AppError::InvalidDateFormat {
                line,
                value: date_field.to_string(),
            }
        })?;

        let value = value_field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| AppError::InvalidNumericInput {
                line,
                value: value_field.to_string(),
            })?;

        rows.push((month_key(date), value));
    }

    Ok(aggregate_monthly(rows, kind))
}

/// `YYYY-MM` truncation of a calendar date.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

fn aggregate_monthly(rows: Vec<(String, f64)>, kind: SeriesKind) -> MonthlySeries {
    match kind {
        SeriesKind::DefaultRate => rows.into_iter().collect(),
        SeriesKind::InterestRate => {
            let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
            for (month, value) in rows {
                let entry = sums.entry(month).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
            MonthlySeries::from_map(
                sums.into_iter()
                    .map(|(month, (sum, n))| (month, sum / n as f64))
                    .collect(),
            )
        }
    }
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize) -> &'a str {
    record.get(idx).map(str::trim).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(body: &str, kind: SeriesKind) -> Result<MonthlySeries, AppError> {
        normalize_series(body.as_bytes(), kind, UploadOptions::default())
    }

    #[test]
    fn derives_month_key_from_day_level_dates() {
        let s = normalize("data;valor\n15/01/2024;3.5\n", SeriesKind::DefaultRate).unwrap();
        assert_eq!(s.get("2024-01"), Some(3.5));
    }

    #[test]
    fn default_rate_keeps_first_value_per_month() {
        let body = "data;valor\n01/01/2024;1.1\n20/01/2024;9.9\n01/02/2024;2.2\n";
        let s = normalize(body, SeriesKind::DefaultRate).unwrap();
        assert_eq!(s.get("2024-01"), Some(1.1));
        assert_eq!(s.get("2024-02"), Some(2.2));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn interest_rate_averages_same_month_observations() {
        let body = "data;taxa\n01/03/2024;2.0\n02/03/2024;3.0\n03/03/2024;4.0\n";
        let s = normalize(body, SeriesKind::InterestRate).unwrap();
        assert_eq!(s.get("2024-03"), Some(3.0));
    }

    #[test]
    fn one_bad_date_fails_the_whole_upload() {
        let body = "data;valor\n01/01/2024;1.0\n2024-02-01;2.0\n";
        let err = normalize(body, SeriesKind::DefaultRate).unwrap_err();
        assert_eq!(
            err,
            AppError::InvalidDateFormat {
                line: 3,
                value: "2024-02-01".to_string(),
            }
        );
    }

    #[test]
    fn one_bad_value_fails_the_whole_upload() {
        let body = "data;valor\n01/01/2024;abc\n";
        let err = normalize(body, SeriesKind::DefaultRate).unwrap_err();
        assert_eq!(
            err,
            AppError::InvalidNumericInput {
                line: 2,
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn delimiter_is_configurable() {
        let body = "data,valor\n01/01/2024,1.5\n";
        let options = UploadOptions {
            delimiter: b',',
            ..UploadOptions::default()
        };
        let s = normalize_series(body.as_bytes(), SeriesKind::DefaultRate, options).unwrap();
        assert_eq!(s.get("2024-01"), Some(1.5));
    }

    #[test]
    fn headerless_files_report_one_based_lines() {
        let body = "01/01/2024;1.0\nbad;2.0\n";
        let options = UploadOptions {
            has_headers: false,
            ..UploadOptions::default()
        };
        let err = normalize_series(body.as_bytes(), SeriesKind::DefaultRate, options).unwrap_err();
        assert_eq!(
            err,
            AppError::InvalidDateFormat {
                line: 2,
                value: "bad".to_string(),
            }
        );
    }

    #[test]
    fn empty_body_yields_empty_series() {
        let s = normalize("data;valor\n", SeriesKind::InterestRate).unwrap();
        assert!(s.is_empty());
    }
}
