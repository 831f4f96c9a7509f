//! Monthly aggregate storage.
//!
//! The store holds the two recognized series tables keyed by month
//! (`YYYY-MM`). The contract is deliberately narrow:
//!
//! - `replace` — wholesale replace: all prior rows of the table are discarded
//!   and the given series is written in full (never a merge)
//! - `update` — single-cell write; an unknown month matches zero rows and is
//!   **not** an error (the caller detects zero-effect updates), an unknown
//!   table is
//! - `read_all` — the full series, ordered by month key ascending
//!
//! Each mutation is one transactional write: a concurrent reader observes
//! either the fully-old or fully-new table, never a partial one. Store handles
//! are passed explicitly so the pipeline stays testable without a filesystem
//! (`MemoryStore`); `JsonStore` persists to a single JSON file and commits via
//! write-temp-then-rename.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{MonthlySeries, SeriesKind};
use crate::error::AppError;

/// Key-value table store for the two monthly series.
pub trait AggregateStore {
    /// Atomically discard all rows of `table` and write `series` in full.
    fn replace(&mut self, table: &str, series: &MonthlySeries) -> Result<(), AppError>;

    /// Write a single cell. Returns the number of rows affected (0 when the
    /// month key does not exist — no existence pre-check, no error).
    fn update(&mut self, table: &str, month: &str, value: f64) -> Result<usize, AppError>;

    /// Read the full series, ordered by month key ascending.
    fn read_all(&self, table: &str) -> Result<MonthlySeries, AppError>;
}

fn resolve_table(table: &str) -> Result<SeriesKind, AppError> {
    SeriesKind::from_table_name(table).ok_or_else(|| AppError::UnknownTable {
        name: table.to_string(),
    })
}

/// Serialized shape of the persisted store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    default_rate: BTreeMap<String, f64>,
    #[serde(default)]
    interest_rate: BTreeMap<String, f64>,
}

impl StoreFile {
    fn table(&self, kind: SeriesKind) -> &BTreeMap<String, f64> {
        match kind {
            SeriesKind::DefaultRate => &self.default_rate,
            SeriesKind::InterestRate => &self.interest_rate,
        }
    }

    fn table_mut(&mut self, kind: SeriesKind) -> &mut BTreeMap<String, f64> {
        match kind {
            SeriesKind::DefaultRate => &mut self.default_rate,
            SeriesKind::InterestRate => &mut self.interest_rate,
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: StoreFile,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AggregateStore for MemoryStore {
    fn replace(&mut self, table: &str, series: &MonthlySeries) -> Result<(), AppError> {
        let kind = resolve_table(table)?;
        *self.tables.table_mut(kind) = series.as_map().clone();
        Ok(())
    }

    fn update(&mut self, table: &str, month: &str, value: f64) -> Result<usize, AppError> {
        let kind = resolve_table(table)?;
        match self.tables.table_mut(kind).get_mut(month) {
            Some(cell) => {
                *cell = value;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn read_all(&self, table: &str) -> Result<MonthlySeries, AppError> {
        let kind = resolve_table(table)?;
        Ok(MonthlySeries::from_map(self.tables.table(kind).clone()))
    }
}

/// File-backed store: one JSON document holding both tables.
///
/// Every mutation rewrites the whole document through a temp file followed by
/// an atomic rename, so readers never see a half-written table.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreFile, AppError> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let file = fs::File::open(&self.path).map_err(|e| {
            AppError::storage(format!("Failed to open store '{}': {e}", self.path.display()))
        })?;
        serde_json::from_reader(file).map_err(|e| {
            AppError::storage(format!("Invalid store file '{}': {e}", self.path.display()))
        })
    }

    fn commit(&self, tables: &StoreFile) -> Result<(), AppError> {
        let tmp = self.path.with_extension("json.tmp");
        let file = fs::File::create(&tmp).map_err(|e| {
            AppError::storage(format!("Failed to create store temp '{}': {e}", tmp.display()))
        })?;
        serde_json::to_writer_pretty(file, tables)
            .map_err(|e| AppError::storage(format!("Failed to write store: {e}")))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            AppError::storage(format!("Failed to commit store '{}': {e}", self.path.display()))
        })
    }
}

impl AggregateStore for JsonStore {
    fn replace(&mut self, table: &str, series: &MonthlySeries) -> Result<(), AppError> {
        let kind = resolve_table(table)?;
        let mut tables = self.load()?;
        *tables.table_mut(kind) = series.as_map().clone();
        self.commit(&tables)
    }

    fn update(&mut self, table: &str, month: &str, value: f64) -> Result<usize, AppError> {
        let kind = resolve_table(table)?;
        let mut tables = self.load()?;
        let Some(cell) = tables.table_mut(kind).get_mut(month) else {
            return Ok(0);
        };
        *cell = value;
        self.commit(&tables)?;
        Ok(1)
    }

    fn read_all(&self, table: &str) -> Result<MonthlySeries, AppError> {
        let kind = resolve_table(table)?;
        Ok(MonthlySeries::from_map(self.load()?.table(kind).clone()))
    }
}
