//! Crate-wide error type.
//!
//! Every failure surfaces as an `AppError` with a process exit code:
//!
//! - `2` — input/configuration errors (bad files, unknown tables, missing columns)
//! - `3` — data errors (unparseable rows, not enough joined observations)
//! - `4` — storage errors (the persisted table file could not be read/written)
//!
//! Data errors abort the whole operation: there is no row-level partial
//! acceptance and no partial commit.

use crate::domain::Role;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// A required logical column could not be resolved from the file headers.
    MissingRequiredColumn { role: Role, columns: Vec<String> },
    /// A date field did not parse strictly as `DD/MM/YYYY`.
    InvalidDateFormat { line: usize, value: String },
    /// A value field could not be parsed as a finite number.
    InvalidNumericInput { line: usize, value: String },
    /// The table name is not one of the recognized series tables.
    UnknownTable { name: String },
    /// Fewer than two usable joined months remain; correlation is undefined.
    InsufficientData { joined: usize },
    /// Input/configuration failure (file access, CSV structure, bad flags).
    Input { message: String },
    /// Persisted store failure (read/write/serialize).
    Storage { message: String },
}

impl AppError {
    pub fn input(message: impl Into<String>) -> Self {
        AppError::Input {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        AppError::Storage {
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::MissingRequiredColumn { .. }
            | AppError::UnknownTable { .. }
            | AppError::Input { .. } => 2,
            AppError::InvalidDateFormat { .. }
            | AppError::InvalidNumericInput { .. }
            | AppError::InsufficientData { .. } => 3,
            AppError::Storage { .. } => 4,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::MissingRequiredColumn { role, columns } => write!(
                f,
                "Could not resolve a `{}` column. Observed columns: [{}]",
                role.label(),
                columns.join(", ")
            ),
            AppError::InvalidDateFormat { line, value } => {
                write!(f, "Invalid date '{value}' on line {line}. Expected DD/MM/YYYY.")
            }
            AppError::InvalidNumericInput { line, value } => {
                write!(f, "Invalid numeric value '{value}' on line {line}.")
            }
            AppError::UnknownTable { name } => write!(
                f,
                "Unknown table '{name}'. Expected `default_rate` or `interest_rate`."
            ),
            AppError::InsufficientData { joined } => write!(
                f,
                "Insufficient data for correlation: {joined} usable joined month(s), need at least 2."
            ),
            AppError::Input { message } => write!(f, "{message}"),
            AppError::Storage { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for AppError {}
