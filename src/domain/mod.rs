//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - series identity and aggregation policy (`SeriesKind`)
//! - the persisted monthly aggregate unit (`MonthlySeries`)
//! - column-inference roles and resolution output (`Role`, `ResolvedSchema`)
//! - analysis outputs (`CorrelationResult`, `GeoPoint`)

pub mod types;

pub use types::*;
