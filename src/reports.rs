use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{iso3_code, palette_color};
use crate::types::{
    ChartRow, CountryAverage, InformalityGap, MapCell, ObservationRecord, PieSlice, Sex,
    SummaryStats,
};
use crate::util::{average, format_signed_percent};

const NOT_AVAILABLE: &str = "N/A";

/// Mean of `row` over the selected countries present in it.
fn row_mean(row: &ChartRow, countries: &[String]) -> Option<f64> {
    let values: Vec<f64> = countries.iter().filter_map(|c| row.get(c)).collect();
    if values.is_empty() {
        None
    } else {
        Some(average(&values))
    }
}

/// Headline numbers for the stat cards above a time-series chart.
pub fn summarize(rows: &[ChartRow], selected_countries: &[String], unit: &str) -> SummaryStats {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return empty_summary();
    };
    if selected_countries.is_empty() {
        return empty_summary();
    }

    let latest = row_mean(last, selected_countries);
    let previous = rows
        .len()
        .checked_sub(2)
        .and_then(|i| row_mean(&rows[i], selected_countries));

    let trend = match (latest, previous) {
        (Some(cur), Some(prev)) if prev != 0.0 => format_signed_percent((cur - prev) / prev * 100.0),
        _ => NOT_AVAILABLE.to_string(),
    };

    SummaryStats {
        latest_avg: latest
            .map(|avg| format!("{:.2}{}", avg, unit))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        year_range: format!("{} - {}", first.year, last.year),
        total_countries: selected_countries.len(),
        // Capacity estimate, not a count of filled cells.
        data_points: rows.len() * selected_countries.len(),
        trend,
    }
}

fn empty_summary() -> SummaryStats {
    SummaryStats {
        latest_avg: NOT_AVAILABLE.to_string(),
        year_range: NOT_AVAILABLE.to_string(),
        total_countries: 0,
        data_points: 0,
        trend: NOT_AVAILABLE.to_string(),
    }
}

/// Per-country mean across every chart row that has a value for it.
pub fn country_averages(rows: &[ChartRow], selected_countries: &[String]) -> Vec<CountryAverage> {
    selected_countries
        .iter()
        .map(|country| {
            let values: Vec<f64> = rows.iter().filter_map(|r| r.get(country)).collect();
            CountryAverage {
                country: country.clone(),
                average: average(&values),
            }
        })
        .collect()
}

/// Latest-year share per selected country. Countries without a positive
/// value that year get no slice; colors follow selection order.
pub fn latest_year_slices(rows: &[ChartRow], selected_countries: &[String]) -> Vec<PieSlice> {
    let Some(last) = rows.last() else {
        return Vec::new();
    };
    selected_countries
        .iter()
        .enumerate()
        .map(|(idx, country)| PieSlice {
            name: country.clone(),
            value: last.get(country).unwrap_or(0.0),
            fill: palette_color(idx),
        })
        .filter(|slice| slice.value > 0.0)
        .collect()
}

/// Choropleth cells for `year`: `Total` informal-employment records, one
/// per country (last record wins), for countries with an ISO-3 code.
pub fn choropleth(informal: &[ObservationRecord], year: i32) -> Vec<MapCell> {
    let mut by_country: BTreeMap<&str, &ObservationRecord> = BTreeMap::new();
    for r in informal
        .iter()
        .filter(|r| r.sex == Sex::Total && r.year == year)
    {
        by_country.insert(r.country.as_str(), r);
    }
    by_country
        .into_values()
        .filter_map(|r| {
            Some(MapCell {
                iso3: iso3_code(&r.country)?,
                country: r.country.clone(),
                year: r.year,
                value: r.value,
            })
        })
        .collect()
}

/// Years with `Total` informal-employment data, newest first.
pub fn choropleth_years(informal: &[ObservationRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = informal
        .iter()
        .filter(|r| r.sex == Sex::Total)
        .map(|r| r.year)
        .collect();
    years.into_iter().rev().collect()
}

/// Informality by sex for one year with the female-minus-male gap. Absent
/// sides count as zero.
pub fn informality_gender_gap(informal: &[ObservationRecord], year: i32) -> Vec<InformalityGap> {
    let mut by_country: BTreeMap<&str, [Option<f64>; 3]> = BTreeMap::new();
    for r in informal.iter().filter(|r| r.year == year) {
        let slot = match r.sex {
            Sex::Total => 0,
            Sex::Male => 1,
            Sex::Female => 2,
        };
        by_country.entry(r.country.as_str()).or_default()[slot] = Some(r.value);
    }
    by_country
        .into_iter()
        .map(|(country, [total, male, female])| {
            let male = male.unwrap_or(0.0);
            let female = female.unwrap_or(0.0);
            InformalityGap {
                country: country.to_string(),
                total: total.unwrap_or(0.0),
                male,
                female,
                gap: female - male,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, cells: &[(&str, f64)]) -> ChartRow {
        let mut r = ChartRow::new(year);
        for (c, v) in cells {
            r.values.insert(c.to_string(), *v);
        }
        r
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn informal(country: &str, year: i32, sex: Sex, value: f64) -> ObservationRecord {
        ObservationRecord {
            country: country.to_string(),
            year,
            value,
            sex,
            age_group: None,
            currency: None,
        }
    }

    #[test]
    fn trend_compares_last_two_rows() {
        let rows = vec![
            row(2022, &[("Chile", 40.0), ("Peru", 60.0)]),
            row(2023, &[("Chile", 50.0), ("Peru", 60.0)]),
        ];
        let stats = summarize(&rows, &names(&["Chile", "Peru"]), "%");
        assert_eq!(stats.latest_avg, "55.00%");
        assert_eq!(stats.trend, "+10.0%");
        assert_eq!(stats.year_range, "2022 - 2023");
        assert_eq!(stats.total_countries, 2);
        assert_eq!(stats.data_points, 4);
    }

    #[test]
    fn absent_countries_are_left_out_of_the_mean() {
        let rows = vec![row(2023, &[("Chile", 50.0)])];
        let stats = summarize(&rows, &names(&["Chile", "Peru"]), "%");
        assert_eq!(stats.latest_avg, "50.00%");
        assert_eq!(stats.trend, "N/A");
    }

    #[test]
    fn negative_trend_has_no_plus_sign() {
        let rows = vec![row(2022, &[("Chile", 50.0)]), row(2023, &[("Chile", 45.0)])];
        let stats = summarize(&rows, &names(&["Chile"]), "%");
        assert_eq!(stats.trend, "-10.0%");
    }

    #[test]
    fn empty_input_reports_not_available() {
        let stats = summarize(&[], &names(&["Chile"]), "%");
        assert_eq!(stats.latest_avg, "N/A");
        assert_eq!(stats.year_range, "N/A");
        assert_eq!(stats.data_points, 0);
        let stats = summarize(&[row(2023, &[("Chile", 1.0)])], &[], "%");
        assert_eq!(stats.total_countries, 0);
    }

    #[test]
    fn distribution_views() {
        let rows = vec![
            row(2022, &[("Chile", 40.0)]),
            row(2023, &[("Chile", 50.0), ("Peru", 0.0)]),
        ];
        let sel = names(&["Chile", "Peru"]);
        let avgs = country_averages(&rows, &sel);
        assert_eq!(avgs[0].average, 45.0);
        assert_eq!(avgs[1].average, 0.0);

        let slices = latest_year_slices(&rows, &sel);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].name, "Chile");
        assert_eq!(slices[0].fill, "#3B82F6");
    }

    #[test]
    fn choropleth_uses_total_rows_and_iso_codes() {
        let records = vec![
            informal("Peru", 2024, Sex::Total, 70.0),
            informal("Peru", 2024, Sex::Total, 72.0),
            informal("Peru", 2024, Sex::Male, 69.0),
            informal("Chile", 2023, Sex::Total, 27.0),
        ];
        let cells = choropleth(&records, 2024);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].iso3, "PER");
        assert_eq!(cells[0].value, 72.0);
        assert_eq!(choropleth_years(&records), vec![2024, 2023]);
    }

    #[test]
    fn informality_gap_is_female_minus_male() {
        let records = vec![
            informal("Chile", 2024, Sex::Male, 26.0),
            informal("Chile", 2024, Sex::Female, 29.5),
            informal("Chile", 2024, Sex::Total, 27.5),
        ];
        let gaps = informality_gender_gap(&records, 2024);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].gap, 3.5);
        assert_eq!(gaps[0].total, 27.5);
    }
}
