//! Missing-value imputation for numeric columns.
//!
//! Policy (two tiers, applied in order):
//!
//! 1. If at least one usable value exists, fill every missing slot with the
//!    median of the usable values. If that median is itself non-finite,
//!    fall back to the constant `1.0`.
//! 2. If no usable value exists at all, every slot becomes `1.0`.
//!
//! "Missing" means `None` or NaN (numeric coercion upstream yields `None` for
//! unparseable fields). Values that are present stay untouched.

const FALLBACK: f64 = 1.0;

/// Fill missing values with the column median (constant fallback).
pub fn impute_with_median(values: &[Option<f64>]) -> Vec<f64> {
    let sample: Vec<f64> = values
        .iter()
        .filter_map(|v| *v)
        .filter(|v| !v.is_nan())
        .collect();

    let fill = match median(&sample) {
        Some(med) if med.is_finite() => med,
        _ => FALLBACK,
    };

    values
        .iter()
        .map(|v| match v {
            Some(x) if !x.is_nan() => *x,
            _ => fill,
        })
        .collect()
}

/// Median of a sample; `None` when the sample is empty.
///
/// Even-sized samples return the mean of the two middle values.
pub fn median(sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_missing_with_median_of_present_values() {
        let out = impute_with_median(&[Some(10.0), None, Some(30.0)]);
        assert_eq!(out, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn all_missing_becomes_constant_one() {
        let out = impute_with_median(&[None, None]);
        assert_eq!(out, vec![1.0, 1.0]);
    }

    #[test]
    fn nan_counts_as_missing() {
        let out = impute_with_median(&[Some(f64::NAN), Some(4.0), Some(6.0)]);
        assert_eq!(out, vec![5.0, 4.0, 6.0]);
    }

    #[test]
    fn non_finite_median_falls_back_to_constant() {
        // A sample dominated by infinities has a non-finite median; the fill
        // value must degrade to 1.0 rather than propagate inf.
        let out = impute_with_median(&[Some(f64::INFINITY), Some(f64::INFINITY), None]);
        assert_eq!(out[2], 1.0);
    }

    #[test]
    fn odd_and_even_medians() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }
}
