//! Geospatial listing normalization.
//!
//! Turns a heterogeneous listing CSV (arbitrary header names) into clean
//! `GeoPoint`s ready for map rendering:
//!
//! 1. resolve latitude/longitude/cost/name columns (`io::columns`)
//! 2. coerce lat/lon/cost to numbers; rows without a finite lat/lon are dropped
//! 3. synthesize `"Point {index}"` names from the zero-based source row
//!    position when no name column exists
//! 4. impute missing costs (median, constant fallback)
//! 5. compute marker sizes and the mean-lat/lon map center
//!
//! The point set is transient: recomputed per analysis request, never stored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::GeoPoint;
use crate::error::AppError;
use crate::io::columns::resolve_columns;
use crate::math::impute::impute_with_median;
use crate::math::scale::scale_markers;

/// Map center: arithmetic mean of the cleaned coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

/// Cleaned listing dataset plus derived rendering inputs.
#[derive(Debug, Clone)]
pub struct GeoDataset {
    pub points: Vec<GeoPoint>,
    /// Marker size per point, aligned with `points`.
    pub sizes: Vec<f64>,
    /// `None` when no row survived cleaning.
    pub center: Option<MapCenter>,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Load and normalize a listing CSV from disk.
pub fn load_geo_dataset_file(path: &Path) -> Result<GeoDataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open listing CSV '{}': {e}", path.display()))
    })?;
    load_geo_dataset(file)
}

/// Normalize a listing CSV into a `GeoDataset`.
pub fn load_geo_dataset<R: Read>(input: R) -> Result<GeoDataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read listing CSV headers: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let schema = resolve_columns(&headers)?;

    let col = |name: &str| headers.iter().position(|h| h == name);
    // Resolved names came from the header list, so these lookups cannot miss.
    let lat_idx = col(&schema.latitude).unwrap_or(usize::MAX);
    let lon_idx = col(&schema.longitude).unwrap_or(usize::MAX);
    let cost_idx = schema.cost.as_deref().and_then(col);
    let name_idx = schema.name.as_deref().and_then(col);

    let mut rows_read = 0usize;
    let mut kept: Vec<(f64, f64, Option<f64>, String)> = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        rows_read += 1;
        let record = result
            .map_err(|e| AppError::input(format!("Listing CSV parse error on row {idx}: {e}")))?;

        let lat = coerce_f64(record.get(lat_idx));
        let lon = coerce_f64(record.get(lon_idx));

        // Names are synthesized from the source row position, before any
        // row is dropped, so labels stay stable across cleaning runs.
        let name = match name_idx.and_then(|i| record.get(i)) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("Point {idx}"),
        };

        let (Some(lat), Some(lon)) = (lat, lon) else {
            continue;
        };

        let cost = cost_idx.and_then(|i| coerce_f64(record.get(i)));
        kept.push((lat, lon, cost, name));
    }

    let costs: Vec<Option<f64>> = kept.iter().map(|r| r.2).collect();
    let imputed = impute_with_median(&costs);

    let points: Vec<GeoPoint> = kept
        .into_iter()
        .zip(imputed)
        .map(|((lat, lon, _, name), cost)| GeoPoint { lat, lon, cost, name })
        .collect();

    let sizes = scale_markers(&points.iter().map(|p| p.cost).collect::<Vec<_>>());
    let center = map_center(&points);
    let rows_dropped = rows_read - points.len();

    Ok(GeoDataset {
        points,
        sizes,
        center,
        rows_read,
        rows_dropped,
    })
}

/// Mean of the cleaned coordinates, `None` for an empty point set.
pub fn map_center(points: &[GeoPoint]) -> Option<MapCenter> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    Some(MapCenter {
        lat: points.iter().map(|p| p.lat).sum::<f64>() / n,
        lon: points.iter().map(|p| p.lon).sum::<f64>() / n,
    })
}

/// Numeric coercion: unparseable or non-finite fields become `None`.
fn coerce_f64(field: Option<&str>) -> Option<f64> {
    field
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn load(body: &str) -> GeoDataset {
        load_geo_dataset(body.as_bytes()).unwrap()
    }

    #[test]
    fn resolves_fuzzy_headers_and_cleans_rows() {
        let body = "\
Latitude,Longitude,price,name
-22.9,-43.2,100,Copacabana
not-a-number,-43.3,200,Ipanema
-22.95,-43.18,300,Leblon
";
        let ds = load(body);
        assert_eq!(ds.rows_read, 3);
        assert_eq!(ds.rows_dropped, 1);
        assert_eq!(ds.points.len(), 2);
        assert_eq!(ds.points[0].name, "Copacabana");
        assert_eq!(ds.points[1].cost, 300.0);
    }

    #[test]
    fn synthesizes_names_from_source_row_position() {
        let body = "lat,lon\n1.0,2.0\nbad,2.0\n3.0,4.0\n";
        let ds = load(body);
        let names: Vec<&str> = ds.points.iter().map(|p| p.name.as_str()).collect();
        // Row 1 was dropped; labels keep the source positions.
        assert_eq!(names, vec!["Point 0", "Point 2"]);
    }

    #[test]
    fn imputes_missing_costs_with_median_of_kept_rows() {
        let body = "lat,lon,cost\n1.0,1.0,10\n2.0,2.0,\n3.0,3.0,30\n";
        let ds = load(body);
        let costs: Vec<f64> = ds.points.iter().map(|p| p.cost).collect();
        assert_eq!(costs, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn missing_cost_column_imputes_constant() {
        let body = "lat,lon\n1.0,1.0\n2.0,2.0\n";
        let ds = load(body);
        assert!(ds.points.iter().all(|p| p.cost == 1.0));
        // All-equal costs produce the constant marker size.
        assert_eq!(ds.sizes, vec![10.0, 10.0]);
    }

    #[test]
    fn center_is_mean_of_cleaned_coordinates() {
        let body = "lat,lon\n0.0,10.0\n2.0,20.0\n";
        let ds = load(body);
        let center = ds.center.unwrap();
        assert!((center.lat - 1.0).abs() < 1e-12);
        assert!((center.lon - 15.0).abs() < 1e-12);
    }

    #[test]
    fn missing_latitude_column_is_fatal() {
        let err = load_geo_dataset("lon,price\n1.0,2.0\n".as_bytes()).unwrap_err();
        match err {
            AppError::MissingRequiredColumn { role, .. } => assert_eq!(role, Role::Latitude),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_file_yields_empty_dataset_without_center() {
        let ds = load("lat,lon\n");
        assert!(ds.points.is_empty());
        assert!(ds.sizes.is_empty());
        assert!(ds.center.is_none());
    }

    #[test]
    fn marker_sizes_span_range_for_distinct_costs() {
        let body = "lat,lon,cost\n1.0,1.0,0\n2.0,2.0,10\n";
        let ds = load(body);
        assert_eq!(ds.sizes, vec![6.0, 26.0]);
    }
}
