//! Most-recent-observation lookups across indicators.
//!
//! Joins match records on the exact sex (so `Total` only picks `Total`
//! rows, unlike the time-series filter), on the age bucket for
//! age-disaggregated datasets, and on the same loose substring country test
//! the filter uses.

use crate::filter::matches_age;
use crate::loader::LoadedDatasets;
use crate::types::{
    AgeBucket, CompositeCountryRecord, DatasetKey, ObservationRecord, ScatterPoint, Sex,
};

/// Radar charts only draw this many countries.
pub const RADAR_COUNTRY_LIMIT: usize = 3;

/// Salary is divided by this before it joins the percentage indicators.
pub const SALARY_DISPLAY_DIVISOR: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeVariant {
    /// Capped at [`RADAR_COUNTRY_LIMIT`] countries.
    Radar,
    /// Bar/comparison charts: every selected country.
    Comparison,
}

/// Borrowed records of the five indicators.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorRecords<'a> {
    pub employment: &'a [ObservationRecord],
    pub unemployment: &'a [ObservationRecord],
    pub informal: &'a [ObservationRecord],
    pub labor_force: &'a [ObservationRecord],
    pub salary: &'a [ObservationRecord],
}

impl<'a> IndicatorRecords<'a> {
    pub fn from_loaded(loaded: &'a LoadedDatasets) -> Self {
        Self {
            employment: loaded.records(DatasetKey::Employment),
            unemployment: loaded.records(DatasetKey::Unemployment),
            informal: loaded.records(DatasetKey::Informal),
            labor_force: loaded.records(DatasetKey::LaborForce),
            salary: loaded.records(DatasetKey::Salary),
        }
    }
}

/// The newest record for `country`. Among records sharing the newest year
/// the first in input order wins.
pub fn latest_for_country<'a>(
    records: &'a [ObservationRecord],
    country: &str,
    sex: Sex,
    age_group: Option<AgeBucket>,
    key: DatasetKey,
) -> Option<&'a ObservationRecord> {
    records
        .iter()
        .filter(|r| r.sex == sex && r.country.contains(country))
        .filter(|r| !key.has_age_dimension() || matches_age(r, age_group))
        .fold(None, |best: Option<&ObservationRecord>, r| match best {
            Some(b) if b.year >= r.year => Some(b),
            _ => Some(r),
        })
}

/// Employment vs. unemployment points, one per selected country that has
/// data in both datasets.
///
/// The point's year is the later of the two source years; the indicators
/// may come from different reporting years.
pub fn build_scatter(
    selected_countries: &[String],
    sex: Sex,
    age_group: Option<AgeBucket>,
    employment: &[ObservationRecord],
    unemployment: &[ObservationRecord],
) -> Vec<ScatterPoint> {
    selected_countries
        .iter()
        .filter_map(|country| {
            let emp =
                latest_for_country(employment, country, sex, age_group, DatasetKey::Employment)?;
            let unemp = latest_for_country(
                unemployment,
                country,
                sex,
                age_group,
                DatasetKey::Unemployment,
            )?;
            Some(ScatterPoint {
                country: country.clone(),
                employment: emp.value,
                unemployment: unemp.value,
                year: emp.year.max(unemp.year),
            })
        })
        .collect()
}

/// Five-indicator record per selected country. Missing indicators are `0`
/// rather than dropping the country.
pub fn build_composite(
    selected_countries: &[String],
    sex: Sex,
    age_group: Option<AgeBucket>,
    indicators: &IndicatorRecords<'_>,
    variant: CompositeVariant,
) -> Vec<CompositeCountryRecord> {
    let limit = match variant {
        CompositeVariant::Radar => RADAR_COUNTRY_LIMIT,
        CompositeVariant::Comparison => selected_countries.len(),
    };
    let latest = |records: &[ObservationRecord], country: &str, key: DatasetKey| {
        latest_for_country(records, country, sex, age_group, key)
            .map(|r| r.value)
            .unwrap_or(0.0)
    };

    selected_countries
        .iter()
        .take(limit)
        .map(|country| CompositeCountryRecord {
            country: country.clone(),
            employment: latest(indicators.employment, country.as_str(), DatasetKey::Employment),
            unemployment: latest(indicators.unemployment, country.as_str(), DatasetKey::Unemployment),
            informal: latest(indicators.informal, country.as_str(), DatasetKey::Informal),
            labor_force: latest(indicators.labor_force, country.as_str(), DatasetKey::LaborForce),
            salary: latest(indicators.salary, country.as_str(), DatasetKey::Salary)
                / SALARY_DISPLAY_DIVISOR,
        })
        .collect()
}
