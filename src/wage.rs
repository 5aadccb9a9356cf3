//! Salary-centred views: the gender wage gap, the minimum-wage table,
//! participation by age band and the per-country gender timeline.

use std::collections::{BTreeMap, BTreeSet};

use crate::ingest::RawRecord;
use crate::types::{
    AgeBandPoint, GenderTimelineRow, MinimumWageRecord, ObservationRecord, Sex, WageGapEntry,
};
use crate::util::{parse_f64_or_zero, round_to};

const TEN_YEAR_BANDS: &str = "Age (10-year bands):";

#[derive(Default)]
struct SexPair {
    male: Option<f64>,
    female: Option<f64>,
}

impl SexPair {
    fn record(&mut self, r: &ObservationRecord) {
        match r.sex {
            Sex::Male => self.male = Some(r.value),
            Sex::Female => self.female = Some(r.value),
            Sex::Total => {}
        }
    }
}

/// Male/female salary pairs for every (country, year) in the USD salary
/// records, sorted by country then year. Pairs missing either side are
/// dropped; a later record for the same key replaces an earlier one.
pub fn compute_all_gaps(salary: &[ObservationRecord]) -> Vec<WageGapEntry> {
    let mut grouped: BTreeMap<(&str, i32), SexPair> = BTreeMap::new();
    for r in salary {
        grouped
            .entry((r.country.as_str(), r.year))
            .or_default()
            .record(r);
    }

    grouped
        .into_iter()
        .filter_map(|((country, year), pair)| {
            let (male, female) = (pair.male?, pair.female?);
            if male == 0.0 {
                return None;
            }
            Some(WageGapEntry {
                country: country.to_string(),
                year,
                male_salary: male,
                female_salary: female,
                // Signed: women out-earning men gives a negative gap.
                gap_percentage: round_to((male - female) / male * 100.0, 1),
            })
        })
        .collect()
}

/// Gap entries for one year.
pub fn compute_gaps(salary: &[ObservationRecord], year: i32) -> Vec<WageGapEntry> {
    compute_all_gaps(salary)
        .into_iter()
        .filter(|e| e.year == year)
        .collect()
}

/// Years with at least one complete male/female pair, newest first.
pub fn available_gap_years(salary: &[ObservationRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = compute_all_gaps(salary).iter().map(|e| e.year).collect();
    years.into_iter().rev().collect()
}

/// Rows of the flat `datos_sudamerica_2025.csv` file with a country name and
/// positive minimum wage and average income.
pub fn minimum_wages_from_records(raw: &[RawRecord]) -> Vec<MinimumWageRecord> {
    raw.iter()
        .filter_map(|row| {
            let country = row.get("Pais").map(str::trim).filter(|p| !p.is_empty())?;
            let minimum_wage = parse_f64_or_zero(row.get("Salario_Minimo_Mensual_USD_2025"));
            let average_income =
                parse_f64_or_zero(row.get("Ingreso_Promedio_Mensual_Estimado_USD_2025"));
            (minimum_wage > 0.0 && average_income > 0.0).then(|| MinimumWageRecord {
                country: country.to_string(),
                minimum_wage,
                average_income,
            })
        })
        .collect()
}

/// Pull `25-34` or `65+` out of a label like `Age (10-year bands): 25-34`.
pub fn ten_year_band(label: &str) -> Option<String> {
    let rest = label.strip_prefix(TEN_YEAR_BANDS)?.trim();
    let bytes = rest.as_bytes();
    let two_digits = |at: usize| bytes.len() >= at + 2 && bytes[at..at + 2].iter().all(u8::is_ascii_digit);
    if !two_digits(0) {
        return None;
    }
    match bytes.get(2) {
        Some(b'+') => Some(rest[..3].to_string()),
        Some(b'-') if two_digits(3) => Some(rest[..5].to_string()),
        _ => None,
    }
}

fn band_start(band: &str) -> u32 {
    band[..2].parse().unwrap_or(u32::MAX)
}

/// Male and female labor-force participation per 10-year age band for one
/// country (exact label) and year, ordered by band.
pub fn participation_by_age_band(
    labor_force: &[ObservationRecord],
    country: &str,
    year: i32,
) -> Vec<AgeBandPoint> {
    let mut points: Vec<AgeBandPoint> = labor_force
        .iter()
        .filter(|r| r.country == country && r.year == year && r.sex != Sex::Total)
        .filter_map(|r| {
            Some(AgeBandPoint {
                age_band: ten_year_band(r.age_group.as_deref()?)?,
                sex: r.sex,
                rate: r.value,
            })
        })
        .collect();
    points.sort_by(|a, b| {
        band_start(&a.age_band)
            .cmp(&band_start(&b.age_band))
            .then(a.sex.cmp(&b.sex))
    });
    points
}

/// Per-year male/female participation (15+) with the matching USD salaries
/// for one country. Years without both participation rates are dropped;
/// salary sides stay `None` when not reported.
pub fn gender_timeline(
    labor_force: &[ObservationRecord],
    salary: &[ObservationRecord],
    country: &str,
    year_range: (i32, i32),
) -> Vec<GenderTimelineRow> {
    let (first, last) = year_range;
    let in_scope =
        |r: &&ObservationRecord| r.country.contains(country) && r.year >= first && r.year <= last;

    let mut participation: BTreeMap<i32, SexPair> = BTreeMap::new();
    for r in labor_force.iter().filter(in_scope).filter(|r| {
        r.age_group
            .as_deref()
            .is_some_and(|a| a.contains("15+"))
    }) {
        participation.entry(r.year).or_default().record(r);
    }

    let mut salaries: BTreeMap<i32, SexPair> = BTreeMap::new();
    for r in salary.iter().filter(in_scope) {
        salaries.entry(r.year).or_default().record(r);
    }

    participation
        .into_iter()
        .filter_map(|(year, pair)| {
            let (male, female) = (pair.male?, pair.female?);
            let pay = salaries.get(&year);
            Some(GenderTimelineRow {
                year,
                participation_male: male,
                participation_female: female,
                participation_gap: male - female,
                salary_male: pay.and_then(|p| p.male),
                salary_female: pay.and_then(|p| p.female),
            })
        })
        .collect()
}
