//! Input/output helpers.
//!
//! - series CSV ingest + monthly normalization (`ingest`)
//! - fuzzy column-role resolution (`columns`)

pub mod columns;
pub mod ingest;

pub use columns::*;
pub use ingest::*;
