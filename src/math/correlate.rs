//! Correlation between the two stored monthly series.
//!
//! The two series are inner-joined on month key; months present in only one
//! series are dropped silently. On the joined pairs we compute:
//!
//! - the Pearson correlation coefficient of the two value columns
//! - an OLS degree-1 fit of default rate as a function of interest rate
//!   (the trend line drawn over the scatter)
//!
//! Fewer than 2 joined months, or a joined column with zero variance, is an
//! `InsufficientData` error: correlation is undefined there and emitting NaN
//! silently is forbidden.

use nalgebra::{DMatrix, DVector};

use crate::domain::{CorrelationResult, MonthlySeries};
use crate::error::AppError;
use crate::math::ols::solve_least_squares;

/// Correlation outputs plus the joined points for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    pub result: CorrelationResult,
    /// Joined month keys, ascending.
    pub months: Vec<String>,
    /// `(interest_rate, default_rate)` pairs, one per joined month.
    pub points: Vec<(f64, f64)>,
}

impl Correlation {
    /// Trend line endpoints over the observed x-range, for rendering
    /// `y = m*x + b` alongside the scatter.
    pub fn trend_endpoints(&self) -> ((f64, f64), (f64, f64)) {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        for &(x, _) in &self.points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
        }
        let m = self.result.slope;
        let b = self.result.intercept;
        ((x_min, m * x_min + b), (x_max, m * x_max + b))
    }
}

/// Join two monthly series and compute Pearson correlation + OLS trend line.
pub fn correlate(
    default_rate: &MonthlySeries,
    interest_rate: &MonthlySeries,
) -> Result<Correlation, AppError> {
    let mut months = Vec::new();
    let mut points = Vec::new();

    // Inner join on month key; iteration over a MonthlySeries is already
    // ascending, so the joined set stays month-ordered.
    for (month, y) in default_rate.iter() {
        if let Some(x) = interest_rate.get(month) {
            months.push(month.to_string());
            points.push((x, y));
        }
    }

    if points.len() < 2 {
        return Err(AppError::InsufficientData {
            joined: points.len(),
        });
    }

    let coefficient = pearson(&points).ok_or(AppError::InsufficientData {
        joined: points.len(),
    })?;

    let (slope, intercept) = fit_trend_line(&points).ok_or(AppError::InsufficientData {
        joined: points.len(),
    })?;

    Ok(Correlation {
        result: CorrelationResult {
            coefficient,
            slope,
            intercept,
        },
        months,
        points,
    })
}

/// Pearson correlation coefficient of the joined pairs.
///
/// Returns `None` when either column has zero variance (the coefficient
/// would be NaN).
fn pearson(points: &[(f64, f64)]) -> Option<f64> {
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(x, y) in points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom <= 0.0 || !denom.is_finite() {
        return None;
    }
    Some(cov / denom)
}

/// OLS degree-1 fit `(slope, intercept)` of y on x via the SVD solver.
fn fit_trend_line(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let n = points.len();
    let mut design = Vec::with_capacity(n * 2);
    for &(x, _) in points {
        design.push(1.0);
        design.push(x);
    }
    let x = DMatrix::from_row_slice(n, 2, &design);
    let y = DVector::from_iterator(n, points.iter().map(|p| p.1));

    let beta = solve_least_squares(&x, &y)?;
    Some((beta[1], beta[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(&str, f64)]) -> MonthlySeries {
        let mut s = MonthlySeries::new();
        for (m, v) in pairs {
            s.set(*m, *v);
        }
        s
    }

    #[test]
    fn single_shared_month_is_insufficient() {
        let a = series(&[("2024-01", 1.0), ("2024-02", 2.0)]);
        let b = series(&[("2024-02", 5.0), ("2024-03", 6.0)]);
        let err = correlate(&a, &b).unwrap_err();
        assert_eq!(err, AppError::InsufficientData { joined: 1 });
    }

    #[test]
    fn perfectly_linear_relation_recovers_slope_and_intercept() {
        // default_rate = 2 * interest_rate, three joined months
        let rates = series(&[("2024-01", 1.0), ("2024-02", 2.0), ("2024-03", 3.0)]);
        let defaults = series(&[("2024-01", 2.0), ("2024-02", 4.0), ("2024-03", 6.0)]);

        let corr = correlate(&defaults, &rates).unwrap();
        assert!((corr.result.coefficient - 1.0).abs() < 1e-9);
        assert!((corr.result.slope - 2.0).abs() < 1e-9);
        assert!(corr.result.intercept.abs() < 1e-9);
    }

    #[test]
    fn unmatched_months_are_dropped_silently() {
        let defaults = series(&[
            ("2024-01", 2.0),
            ("2024-02", 4.0),
            ("2024-03", 6.0),
            ("2099-12", 1.0),
        ]);
        let rates = series(&[("2024-01", 1.0), ("2024-02", 2.0), ("2024-03", 3.0)]);

        let corr = correlate(&defaults, &rates).unwrap();
        assert_eq!(corr.months, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(corr.points.len(), 3);
    }

    #[test]
    fn negative_relation_yields_negative_coefficient() {
        let rates = series(&[("2024-01", 1.0), ("2024-02", 2.0), ("2024-03", 3.0)]);
        let defaults = series(&[("2024-01", 6.0), ("2024-02", 4.0), ("2024-03", 2.0)]);

        let corr = correlate(&defaults, &rates).unwrap();
        assert!((corr.result.coefficient + 1.0).abs() < 1e-9);
        assert!((corr.result.slope + 2.0).abs() < 1e-9);
    }

    #[test]
    fn constant_column_is_rejected_rather_than_nan() {
        let rates = series(&[("2024-01", 3.0), ("2024-02", 3.0)]);
        let defaults = series(&[("2024-01", 1.0), ("2024-02", 2.0)]);
        let err = correlate(&defaults, &rates).unwrap_err();
        assert_eq!(err, AppError::InsufficientData { joined: 2 });
    }

    #[test]
    fn trend_endpoints_span_observed_x_range() {
        let rates = series(&[("2024-01", 1.0), ("2024-02", 2.0), ("2024-03", 3.0)]);
        let defaults = series(&[("2024-01", 2.0), ("2024-02", 4.0), ("2024-03", 6.0)]);
        let corr = correlate(&defaults, &rates).unwrap();

        let ((x0, y0), (x1, y1)) = corr.trend_endpoints();
        assert_eq!(x0, 1.0);
        assert_eq!(x1, 3.0);
        assert!((y0 - 2.0).abs() < 1e-9);
        assert!((y1 - 6.0).abs() < 1e-9);
    }
}
