//! Predicate filtering over one normalized dataset.
//!
//! Country and age matching are substring tests, not equality: raw ILO labels
//! carry qualifiers (`"Bolivia (Plurinational State of)"`, `"Age (Youth,
//! adults): 15+"`) that the selection omits. This is a known loose-matching
//! policy; a short name can match inside a longer, unrelated label.

use crate::types::{AgeBucket, DatasetKey, FilterSelection, ObservationRecord, Sex};

/// Records of `key` that satisfy every predicate of `selection`.
pub fn filter_records(
    records: &[ObservationRecord],
    selection: &FilterSelection,
    key: DatasetKey,
) -> Vec<ObservationRecord> {
    records
        .iter()
        .filter(|r| matches_selection(r, selection, key))
        .cloned()
        .collect()
}

pub fn matches_selection(
    record: &ObservationRecord,
    selection: &FilterSelection,
    key: DatasetKey,
) -> bool {
    let (first, last) = selection.year_range;
    matches_sex(record, selection.sex)
        && record.year >= first
        && record.year <= last
        && matches_any_country(record, &selection.selected_countries)
        && (!key.has_age_dimension() || matches_age(record, selection.age_group))
}

/// `Total` selects every sex.
pub fn matches_sex(record: &ObservationRecord, sex: Sex) -> bool {
    sex == Sex::Total || record.sex == sex
}

pub fn matches_any_country(record: &ObservationRecord, countries: &[String]) -> bool {
    first_matching_country(record, countries).is_some()
}

/// The first selected name that occurs inside the record's raw label.
pub fn first_matching_country<'a>(
    record: &ObservationRecord,
    countries: &'a [String],
) -> Option<&'a str> {
    countries
        .iter()
        .map(String::as_str)
        .find(|c| record.country.contains(c))
}

/// Records without an age label pass; so does every record when no bucket
/// is selected.
pub fn matches_age(record: &ObservationRecord, bucket: Option<AgeBucket>) -> bool {
    match (bucket, record.age_group.as_deref()) {
        (Some(b), Some(label)) => label.contains(b.token()),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(country: &str, year: i32, sex: Sex, age: Option<&str>) -> ObservationRecord {
        ObservationRecord {
            country: country.to_string(),
            year,
            value: 1.0,
            sex,
            age_group: age.map(str::to_string),
            currency: None,
        }
    }

    fn selection(countries: &[&str], sex: Sex, age: Option<AgeBucket>) -> FilterSelection {
        FilterSelection {
            selected_countries: countries.iter().map(|c| c.to_string()).collect(),
            sex,
            age_group: age,
            year_range: (2015, 2020),
        }
    }

    #[test]
    fn total_sex_keeps_all_rows() {
        let rows = vec![
            rec("Chile", 2016, Sex::Male, None),
            rec("Chile", 2016, Sex::Female, None),
        ];
        let sel = selection(&["Chile"], Sex::Total, None);
        assert_eq!(filter_records(&rows, &sel, DatasetKey::Employment).len(), 2);

        let sel = selection(&["Chile"], Sex::Female, None);
        let out = filter_records(&rows, &sel, DatasetKey::Employment);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].sex, Sex::Female);
    }

    #[test]
    fn year_range_is_inclusive() {
        let rows = vec![
            rec("Chile", 2014, Sex::Total, None),
            rec("Chile", 2015, Sex::Total, None),
            rec("Chile", 2020, Sex::Total, None),
            rec("Chile", 2021, Sex::Total, None),
        ];
        let sel = selection(&["Chile"], Sex::Total, None);
        let years: Vec<i32> = filter_records(&rows, &sel, DatasetKey::Employment)
            .iter()
            .map(|r| r.year)
            .collect();
        assert_eq!(years, vec![2015, 2020]);
    }

    #[test]
    fn country_match_is_substring_based() {
        let rows = vec![
            rec("Bolivia (Plurinational State of)", 2016, Sex::Total, None),
            rec("Peru", 2016, Sex::Total, None),
        ];
        let sel = selection(&["Bolivia"], Sex::Total, None);
        let out = filter_records(&rows, &sel, DatasetKey::Employment);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "Bolivia (Plurinational State of)");
    }

    #[test]
    fn age_bucket_matches_inside_label_but_not_for_salary() {
        let rows = vec![
            rec("Chile", 2016, Sex::Total, Some("Age (Youth, adults): 15+")),
            rec("Chile", 2016, Sex::Total, Some("Age (Youth, adults): 15-24")),
        ];
        let sel = selection(&["Chile"], Sex::Total, Some(AgeBucket::From15To24));
        let out = filter_records(&rows, &sel, DatasetKey::Unemployment);
        assert_eq!(out.len(), 1);
        assert!(out[0].age_group.as_deref().unwrap().ends_with("15-24"));

        assert_eq!(filter_records(&rows, &sel, DatasetKey::Salary).len(), 2);
    }

    #[test]
    fn empty_country_selection_matches_nothing() {
        let rows = vec![rec("Chile", 2016, Sex::Total, None)];
        let sel = selection(&[], Sex::Total, None);
        assert!(filter_records(&rows, &sel, DatasetKey::Employment).is_empty());
    }
}
