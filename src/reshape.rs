//! Long-format observations to wide per-year chart rows.

use std::collections::BTreeMap;

use crate::filter::first_matching_country;
use crate::types::{ChartRow, ObservationRecord};

/// What happens when two records land on the same (year, country) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// The record seen last overwrites earlier ones.
    #[default]
    LatestWins,
}

impl ConflictPolicy {
    fn merge(self, cells: &mut BTreeMap<String, f64>, country: String, value: f64) {
        match self {
            ConflictPolicy::LatestWins => {
                cells.insert(country, value);
            }
        }
    }
}

/// Wide rows in ascending year order, merged under
/// [`ConflictPolicy::LatestWins`].
///
/// Callers should narrow the filter to one row per (year, country); any
/// extra sex or age rows are silently overwritten.
pub fn reshape(records: &[ObservationRecord], selected_countries: &[String]) -> Vec<ChartRow> {
    if records.is_empty() || selected_countries.is_empty() {
        return Vec::new();
    }

    let policy = ConflictPolicy::default();
    // BTreeMap keeps rows in ascending year order.
    let mut by_year: BTreeMap<i32, ChartRow> = BTreeMap::new();
    for r in records {
        let country = first_matching_country(r, selected_countries)
            .map(str::to_string)
            .unwrap_or_else(|| r.country.clone());
        let row = by_year.entry(r.year).or_insert_with(|| ChartRow::new(r.year));
        policy.merge(&mut row.values, country, r.value);
    }
    by_year.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sex;

    fn rec(country: &str, year: i32, value: f64) -> ObservationRecord {
        ObservationRecord {
            country: country.to_string(),
            year,
            value,
            sex: Sex::Total,
            age_group: None,
            currency: None,
        }
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn groups_by_year_under_simplified_names() {
        let records = vec![
            rec("Chile", 2021, 50.0),
            rec("Bolivia (Plurinational State of)", 2020, 70.0),
            rec("Chile", 2020, 48.0),
        ];
        let rows = reshape(&records, &names(&["Chile", "Bolivia"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 2020);
        assert_eq!(rows[0].get("Bolivia"), Some(70.0));
        assert_eq!(rows[0].get("Chile"), Some(48.0));
        assert_eq!(rows[1].year, 2021);
        assert_eq!(rows[1].get("Bolivia"), None);
    }

    #[test]
    fn latest_wins_on_conflicting_cells() {
        let records = vec![rec("Chile", 2020, 1.0), rec("Chile", 2020, 2.0)];
        let sel = names(&["Chile"]);
        assert_eq!(ConflictPolicy::default(), ConflictPolicy::LatestWins);
        assert_eq!(reshape(&records, &sel)[0].get("Chile"), Some(2.0));
    }

    #[test]
    fn unmatched_country_falls_back_to_raw_label() {
        let rows = reshape(&[rec("Peru", 2020, 3.0)], &names(&["Chile"]));
        assert_eq!(rows[0].get("Peru"), Some(3.0));
    }

    #[test]
    fn empty_inputs_give_no_rows() {
        assert!(reshape(&[], &names(&["Chile"])).is_empty());
        assert!(reshape(&[rec("Chile", 2020, 1.0)], &[]).is_empty());
    }

    #[test]
    fn reshaping_twice_is_identical() {
        let records = vec![
            rec("Chile", 2022, 1.0),
            rec("Peru", 2021, 2.0),
            rec("Chile", 2021, 3.0),
        ];
        let sel = names(&["Peru", "Chile"]);
        assert_eq!(reshape(&records, &sel), reshape(&records, &sel));
    }

    #[test]
    fn serializes_flat() {
        let rows = reshape(&[rec("Chile", 2020, 4.5)], &names(&["Chile"]));
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json, serde_json::json!({ "year": 2020, "Chile": 4.5 }));
    }
}
