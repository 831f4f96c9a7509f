//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed values: `o`
//! - connecting segments / trend line: `-`

use crate::domain::MonthlySeries;

/// Render a stored monthly series as a line chart.
///
/// Months are laid out left-to-right in key order; values are scaled to the
/// grid height with a small padding margin.
pub fn render_series_chart(series: &MonthlySeries, width: usize, height: usize) -> String {
    if series.is_empty() {
        return "(no data)\n".to_string();
    }

    let width = width.max(10);
    let height = height.max(5);

    let values: Vec<f64> = series.iter().map(|(_, v)| v).collect();
    let months: Vec<&str> = series.months().collect();

    let (y_min, y_max) = pad_range(min_of(&values), max_of(&values), 0.05);

    let mut grid = vec![vec![' '; width]; height];

    let n = values.len();
    let x_of = |i: usize| {
        if n == 1 {
            0
        } else {
            (i as f64 / (n - 1) as f64 * (width - 1) as f64).round() as usize
        }
    };

    // Connect consecutive observations, then overlay the markers.
    for i in 1..n {
        let (x0, y0) = (x_of(i - 1), map_y(values[i - 1], y_min, y_max, height));
        let (x1, y1) = (x_of(i), map_y(values[i], y_min, y_max, height));
        draw_segment(&mut grid, x0, y0, x1, y1);
    }
    for (i, &v) in values.iter().enumerate() {
        grid[map_y(v, y_min, y_max, height)][x_of(i)] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Chart: months=[{}, {}] | y=[{y_min:.2}, {y_max:.2}]\n",
        months[0],
        months[n - 1]
    ));
    push_grid(&mut out, grid);
    out
}

/// Render the correlation scatter with the fitted trend line overlaid.
pub fn render_scatter_with_trend(
    points: &[(f64, f64)],
    slope: f64,
    intercept: f64,
    width: usize,
    height: usize,
) -> String {
    if points.is_empty() {
        return "(no data)\n".to_string();
    }

    let width = width.max(10);
    let height = height.max(5);

    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let mut ys: Vec<f64> = points.iter().map(|p| p.1).collect();

    let (x_min, x_max) = pad_range(min_of(&xs), max_of(&xs), 0.05);

    // Include the trend line's extremes so it never leaves the grid.
    ys.push(slope * x_min + intercept);
    ys.push(slope * x_max + intercept);
    let (y_min, y_max) = pad_range(min_of(&ys), max_of(&ys), 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Trend line first so points can overlay it.
    for col in 0..width {
        let x = x_min + col as f64 / (width - 1) as f64 * (x_max - x_min);
        let y = slope * x + intercept;
        grid[map_y(y, y_min, y_max, height)][col] = '-';
    }

    for &(x, y) in points {
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Scatter: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}] | trend y = {slope:.4}x + {intercept:.4}\n"
    ));
    push_grid(&mut out, grid);
    out
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

fn draw_segment(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize) {
    let steps = x1.saturating_sub(x0).max(y0.abs_diff(y1)).max(1);
    for s in 0..=steps {
        let t = s as f64 / steps as f64;
        let x = x0 as f64 + t * (x1 as f64 - x0 as f64);
        let y = y0 as f64 + t * (y1 as f64 - y0 as f64);
        grid[y.round() as usize][x.round() as usize] = '-';
    }
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span.abs() < 1e-12 {
        return (min - 0.5, max + 0.5);
    }
    (min - span * frac, max + span * frac)
}

fn map_x(v: f64, min: f64, max: f64, width: usize) -> usize {
    let t = ((v - min) / (max - min)).clamp(0.0, 1.0);
    (t * (width - 1) as f64).round() as usize
}

fn map_y(v: f64, min: f64, max: f64, height: usize) -> usize {
    let t = ((v - min) / (max - min)).clamp(0.0, 1.0);
    // Row 0 is the top of the grid.
    ((1.0 - t) * (height - 1) as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_renders_placeholder() {
        assert_eq!(render_series_chart(&MonthlySeries::new(), 40, 10), "(no data)\n");
    }

    #[test]
    fn chart_has_requested_dimensions() {
        let mut s = MonthlySeries::new();
        s.set("2024-01", 1.0);
        s.set("2024-02", 2.0);
        s.set("2024-03", 3.0);

        let chart = render_series_chart(&s, 40, 10);
        let lines: Vec<&str> = chart.lines().collect();
        // 1 header + 10 grid rows
        assert_eq!(lines.len(), 11);
        assert!(lines[1..].iter().all(|l| l.chars().count() == 40));
        assert!(chart.contains('o'));
    }

    #[test]
    fn scatter_contains_points_and_trend() {
        let points = vec![(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        let plot = render_scatter_with_trend(&points, 2.0, 0.0, 40, 10);
        assert!(plot.contains('o'));
        assert!(plot.contains('-'));
        assert!(plot.contains("trend y = 2.0000x + 0.0000"));
    }

    #[test]
    fn single_month_series_does_not_panic() {
        let mut s = MonthlySeries::new();
        s.set("2024-01", 5.0);
        let chart = render_series_chart(&s, 20, 5);
        assert!(chart.contains('o'));
    }
}
