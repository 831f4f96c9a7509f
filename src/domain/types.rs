//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during normalization and analysis
//! - persisted as JSON by the store
//! - reloaded later for charts or correlation runs

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which monthly series a file or table refers to.
///
/// The two series aggregate differently on upload:
///
/// - `DefaultRate`: one observation per month is expected; if a month repeats,
///   the first-seen value wins and later values are ignored.
/// - `InterestRate`: daily observations; the stored monthly value is the
///   arithmetic mean of all observations sharing the month key.
///
/// The asymmetry reproduces observed upstream behavior and is flagged for
/// product clarification in DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    #[value(name = "default_rate")]
    DefaultRate,
    #[value(name = "interest_rate")]
    InterestRate,
}

impl SeriesKind {
    /// Store table name for this series.
    pub fn table_name(self) -> &'static str {
        match self {
            SeriesKind::DefaultRate => "default_rate",
            SeriesKind::InterestRate => "interest_rate",
        }
    }

    /// Resolve a table name as supplied by a caller.
    ///
    /// Unrecognized names are a caller error, not a fallback.
    pub fn from_table_name(name: &str) -> Option<SeriesKind> {
        match name {
            "default_rate" => Some(SeriesKind::DefaultRate),
            "interest_rate" => Some(SeriesKind::InterestRate),
            _ => None,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            SeriesKind::DefaultRate => "default rate",
            SeriesKind::InterestRate => "interest rate",
        }
    }
}

/// An ordered-by-month mapping from month key (`YYYY-MM`) to one numeric value.
///
/// Month keys are unique by construction; `YYYY-MM` strings sort
/// lexicographically in calendar order, so iteration is always ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlySeries {
    values: BTreeMap<String, f64>,
}

impl MonthlySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value only if the month has not been seen yet.
    ///
    /// Returns `true` if the value was inserted. This is the "first-seen wins"
    /// reduction used for the default-rate series.
    pub fn insert_first(&mut self, month: impl Into<String>, value: f64) -> bool {
        let month = month.into();
        if self.values.contains_key(&month) {
            return false;
        }
        self.values.insert(month, value);
        true
    }

    /// Set a month's value unconditionally (store-internal writes).
    pub fn set(&mut self, month: impl Into<String>, value: f64) {
        self.values.insert(month.into(), value);
    }

    pub fn get(&self, month: &str) -> Option<f64> {
        self.values.get(month).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(month, value)` pairs in ascending month order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(m, v)| (m.as_str(), *v))
    }

    pub fn months(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn from_map(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }

    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.values
    }
}

impl FromIterator<(String, f64)> for MonthlySeries {
    /// Collect pairs with first-seen-wins semantics on duplicate months.
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        let mut series = MonthlySeries::new();
        for (month, value) in iter {
            series.insert_first(month, value);
        }
        series
    }
}

/// Logical roles a source column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Latitude,
    Longitude,
    Cost,
    Name,
    Date,
    Value,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Latitude => "latitude",
            Role::Longitude => "longitude",
            Role::Cost => "cost",
            Role::Name => "name",
            Role::Date => "date",
            Role::Value => "value",
        }
    }
}

/// Mapping from logical roles to source column names.
///
/// Latitude and longitude are required (resolution fails without them); the
/// remaining roles fall back to defined behaviors when absent:
/// cost → imputation marker, name → synthesized `"Point {index}"` labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    pub latitude: String,
    pub longitude: String,
    pub cost: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub value: Option<String>,
}

/// A cleaned geospatial listing point.
///
/// `lat`/`lon` are always finite after cleaning and `cost` is always present
/// (imputed when the source had no usable value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub cost: f64,
    pub name: String,
}

/// Pearson correlation plus the degree-1 OLS fit of default rate on
/// interest rate. Derived per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Pearson coefficient in `[-1, 1]`.
    pub coefficient: f64,
    /// OLS slope `m` of `default_rate = m * interest_rate + b`.
    pub slope: f64,
    /// OLS intercept `b`.
    pub intercept: f64,
}
