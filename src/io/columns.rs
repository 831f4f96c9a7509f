//! Fuzzy column-role resolution.
//!
//! Listing exports name their columns inconsistently (`lat`, `Latitude`,
//! `LATITUDE`, ...). Resolution runs an ordered list of matcher strategies and
//! returns the first hit:
//!
//! 1. exact, case-sensitive match against a prioritized candidate list
//! 2. lowercased substring containment (first column containing a candidate)
//!
//! Latitude/longitude must resolve or the pipeline fails; the other roles have
//! defined fallbacks downstream.

use crate::domain::{ResolvedSchema, Role};
use crate::error::AppError;

const LAT_CANDIDATES: &[&str] = &["lat", "latitude", "Latitude", "Lat", "LATITUDE"];
const LON_CANDIDATES: &[&str] = &["LON", "lon", "Longitude", "Long", "Lng", "longitude"];
const COST_CANDIDATES: &[&str] = &["custos", "cost", "preço", "price", "valor", "valor_total"];
const NAME_CANDIDATES: &[&str] = &["nome", "descricao", "titulo", "name", "title", "local", "place"];
const DATE_CANDIDATES: &[&str] = &["data", "date", "dia"];
const VALUE_CANDIDATES: &[&str] = &["valor", "value", "taxa", "rate"];

type Matcher = fn(&[String], &[&str]) -> Option<usize>;

/// Matchers in priority order; the first strategy that hits wins.
const MATCHERS: [Matcher; 2] = [exact_match, substring_match];

/// Resolve all logical roles against a header list.
///
/// Fails with `MissingRequiredColumn` (naming the role and the observed
/// headers) when latitude or longitude cannot be resolved.
pub fn resolve_columns(headers: &[String]) -> Result<ResolvedSchema, AppError> {
    let require = |role: Role, candidates: &[&str]| {
        resolve_role(headers, candidates).ok_or_else(|| AppError::MissingRequiredColumn {
            role,
            columns: headers.to_vec(),
        })
    };

    Ok(ResolvedSchema {
        latitude: require(Role::Latitude, LAT_CANDIDATES)?,
        longitude: require(Role::Longitude, LON_CANDIDATES)?,
        cost: resolve_role(headers, COST_CANDIDATES),
        name: resolve_role(headers, NAME_CANDIDATES),
        date: resolve_role(headers, DATE_CANDIDATES),
        value: resolve_role(headers, VALUE_CANDIDATES),
    })
}

/// Resolve a single role to a source column name, if any strategy matches.
pub fn resolve_role(headers: &[String], candidates: &[&str]) -> Option<String> {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(headers, candidates))
        .map(|idx| headers[idx].clone())
}

fn exact_match(headers: &[String], candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        if let Some(idx) = headers.iter().position(|h| h == candidate) {
            return Some(idx);
        }
    }
    None
}

fn substring_match(headers: &[String], candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        let needle = candidate.to_lowercase();
        if let Some(idx) = headers
            .iter()
            .position(|h| h.to_lowercase().contains(&needle))
        {
            return Some(idx);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_wins_over_substring() {
        // `lat` matches exactly even though `platform` contains it as a substring.
        let h = headers(&["platform", "lat", "lon"]);
        assert_eq!(resolve_role(&h, LAT_CANDIDATES).as_deref(), Some("lat"));
    }

    #[test]
    fn substring_fallback_is_case_insensitive() {
        let h = headers(&["Pickup_LATITUDE", "Pickup_Longitude"]);
        let schema = resolve_columns(&h).unwrap();
        assert_eq!(schema.latitude, "Pickup_LATITUDE");
        assert_eq!(schema.longitude, "Pickup_Longitude");
    }

    #[test]
    fn candidate_priority_is_respected_within_a_strategy() {
        // Both columns exact-match a candidate; `custos` is listed first.
        let h = headers(&["price", "custos", "lat", "lon"]);
        assert_eq!(resolve_role(&h, COST_CANDIDATES).as_deref(), Some("custos"));
    }

    #[test]
    fn missing_longitude_is_fatal_and_names_the_columns() {
        let h = headers(&["lat", "price", "name"]);
        let err = resolve_columns(&h).unwrap_err();
        match err {
            AppError::MissingRequiredColumn { role, columns } => {
                assert_eq!(role, Role::Longitude);
                assert_eq!(columns, h);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn optional_roles_resolve_to_none_when_absent() {
        let h = headers(&["lat", "lon"]);
        let schema = resolve_columns(&h).unwrap();
        assert_eq!(schema.cost, None);
        assert_eq!(schema.name, None);
        assert_eq!(schema.date, None);
        assert_eq!(schema.value, None);
    }
}
