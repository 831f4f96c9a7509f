//! Marker-size scaling for map rendering.
//!
//! Costs are mapped linearly to a bounded visual size range so expensive
//! listings render as larger markers. Degenerate inputs (empty, any
//! non-finite value, all values practically equal) fall back to one constant
//! size instead of dividing by zero.

const SIZE_MIN: f64 = 6.0;
const SIZE_SPAN: f64 = 20.0;
const SIZE_MAX: f64 = SIZE_MIN + SIZE_SPAN;
const CONSTANT_SIZE: f64 = 10.0;
const EQUAL_EPS: f64 = 1e-9;

/// Map a cost column to marker sizes in `[6, 26]`.
///
/// Degenerate inputs yield `10.0` for every point. The final clamp cannot be
/// exceeded by the linear map itself but tolerates floating-point overshoot.
pub fn scale_markers(costs: &[f64]) -> Vec<f64> {
    if costs.is_empty() {
        return Vec::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in costs {
        if v.is_nan() {
            min = f64::NAN;
            max = f64::NAN;
            break;
        }
        min = min.min(v);
        max = max.max(v);
    }

    if !min.is_finite() || !max.is_finite() || (max - min).abs() < EQUAL_EPS {
        return vec![CONSTANT_SIZE; costs.len()];
    }

    costs
        .iter()
        .map(|&v| {
            let size = SIZE_MIN + SIZE_SPAN * (v - min) / (max - min);
            size.clamp(SIZE_MIN, SIZE_MAX)
        })
        .collect()
}
