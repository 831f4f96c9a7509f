//! Mathematical utilities: correlation, least squares, imputation, scaling.

pub mod correlate;
pub mod impute;
pub mod ols;
pub mod scale;

pub use correlate::*;
pub use impute::*;
pub use ols::*;
pub use scale::*;
