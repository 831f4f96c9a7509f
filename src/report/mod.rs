//! Reporting utilities: formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the normalization/correlation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{MonthlySeries, SeriesKind};
use crate::geo::GeoDataset;
use crate::math::correlate::Correlation;

/// Format a stored series as a two-column table, ordered by month.
pub fn format_series_table(kind: SeriesKind, series: &MonthlySeries) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== {} ({} month(s)) ===\n",
        kind.display_name(),
        series.len()
    ));
    out.push_str("month    value\n");
    for (month, value) in series.iter() {
        out.push_str(&format!("{month}  {value:.4}\n"));
    }
    if series.is_empty() {
        out.push_str("(empty)\n");
    }

    out
}

/// Format the upload result (row counts per table).
pub fn format_upload_summary(default_rate: &MonthlySeries, interest_rate: &MonthlySeries) -> String {
    let mut out = String::new();
    out.push_str("Upload stored.\n");
    out.push_str(&format!("- default_rate : {} month(s)\n", default_rate.len()));
    out.push_str(&format!("- interest_rate: {} month(s)\n", interest_rate.len()));
    out
}

/// Format the correlation summary (coefficient + trend line + joined window).
pub fn format_correlation_summary(corr: &Correlation) -> String {
    let mut out = String::new();

    out.push_str("=== Correlation: default rate vs. interest rate ===\n");
    out.push_str(&format!(
        "Joined months: {} ({} .. {})\n",
        corr.months.len(),
        corr.months.first().map(String::as_str).unwrap_or("-"),
        corr.months.last().map(String::as_str).unwrap_or("-"),
    ));
    out.push_str(&format!(
        "Pearson coefficient: {:.4}\n",
        corr.result.coefficient
    ));
    out.push_str(&format!(
        "Trend line: default_rate = {:.4} * interest_rate + {:.4}\n",
        corr.result.slope, corr.result.intercept
    ));

    out
}

/// Format the geospatial dataset summary.
pub fn format_geo_summary(dataset: &GeoDataset) -> String {
    let mut out = String::new();

    out.push_str("=== Listing dataset ===\n");
    out.push_str(&format!(
        "Rows: read={} kept={} dropped={}\n",
        dataset.rows_read,
        dataset.points.len(),
        dataset.rows_dropped
    ));
    match dataset.center {
        Some(center) => out.push_str(&format!(
            "Center: lat={:.5} lon={:.5}\n",
            center.lat, center.lon
        )),
        None => out.push_str("Center: (no points)\n"),
    }

    for (point, size) in dataset.points.iter().zip(&dataset.sizes) {
        out.push_str(&format!(
            "{:<24} lat={:.5} lon={:.5} cost={:.2} size={:.1}\n",
            point.name, point.lat, point.lon, point.cost, size
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_table_lists_months_ascending() {
        let mut s = MonthlySeries::new();
        s.set("2024-02", 2.0);
        s.set("2024-01", 1.0);

        let table = format_series_table(SeriesKind::DefaultRate, &s);
        let jan = table.find("2024-01").unwrap();
        let feb = table.find("2024-02").unwrap();
        assert!(jan < feb);
        assert!(table.contains("default rate"));
    }

    #[test]
    fn empty_table_is_marked() {
        let table = format_series_table(SeriesKind::InterestRate, &MonthlySeries::new());
        assert!(table.contains("(empty)"));
    }
}
