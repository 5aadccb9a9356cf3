use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tabled::Tabled;

use crate::util::display_2dp;

/// Sex disaggregation carried by every observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Sex {
    Total,
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Total => "Total",
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    /// Parse an ILO `sex.label` cell.
    ///
    /// Accepts both the bare form (`Male`) and the prefixed bulk-download
    /// form (`Sex: Male`). An empty label is read as `Total`.
    pub fn from_label(label: &str) -> Option<Sex> {
        let label = label.trim();
        let label = label.strip_prefix("Sex:").map(str::trim).unwrap_or(label);
        match label {
            "" | "Total" => Some(Sex::Total),
            "Male" => Some(Sex::Male),
            "Female" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age buckets the filter UI offers. Each one is matched as a substring of
/// the raw `classif1.label` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgeBucket {
    #[serde(rename = "15+")]
    From15,
    #[serde(rename = "15-64")]
    From15To64,
    #[serde(rename = "15-24")]
    From15To24,
    #[serde(rename = "25+")]
    From25,
}

impl AgeBucket {
    pub fn token(self) -> &'static str {
        match self {
            AgeBucket::From15 => "15+",
            AgeBucket::From15To64 => "15-64",
            AgeBucket::From15To24 => "15-24",
            AgeBucket::From25 => "25+",
        }
    }
}

/// The five indicators the dashboard knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DatasetKey {
    Employment,
    Unemployment,
    Informal,
    LaborForce,
    Salary,
}

impl DatasetKey {
    pub const ALL: [DatasetKey; 5] = [
        DatasetKey::Employment,
        DatasetKey::Unemployment,
        DatasetKey::Informal,
        DatasetKey::LaborForce,
        DatasetKey::Salary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKey::Employment => "employment",
            DatasetKey::Unemployment => "unemployment",
            DatasetKey::Informal => "informal",
            DatasetKey::LaborForce => "laborForce",
            DatasetKey::Salary => "salary",
        }
    }

    /// The salary dataset has no age dimension; its `classif1.label` column
    /// holds the currency denomination instead.
    pub fn has_age_dimension(self) -> bool {
        self != DatasetKey::Salary
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetDescriptor {
    pub key: DatasetKey,
    pub file_path: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
    pub color: &'static str,
}

/// One validated observation. `country` keeps the raw ILO label; use
/// [`ObservationRecord::display_name`] for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    pub country: String,
    pub year: i32,
    pub value: f64,
    pub sex: Sex,
    pub age_group: Option<String>,
    pub currency: Option<String>,
}

impl ObservationRecord {
    pub fn display_name(&self) -> String {
        crate::catalog::display_name(&self.country)
    }
}

/// User-driven filter state. Passed by reference into every pipeline
/// function; nothing in the crate keeps a copy between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    /// Display names (parenthetical qualifiers already stripped).
    pub selected_countries: Vec<String>,
    pub sex: Sex,
    /// `None` disables the age predicate.
    pub age_group: Option<AgeBucket>,
    /// Inclusive `(first, last)` year bounds.
    pub year_range: (i32, i32),
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            selected_countries: vec![
                "Chile".to_string(),
                "Argentina".to_string(),
                "Brazil".to_string(),
            ],
            sex: Sex::Total,
            age_group: Some(AgeBucket::From15),
            year_range: (2010, 2024),
        }
    }
}

/// One year of a wide-format time series: `{ year, <country>: value, ... }`.
/// Sparse: a country without an observation that year has no key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub year: i32,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl ChartRow {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, country: &str) -> Option<f64> {
        self.values.get(country).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct ScatterPoint {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "Employment", display_with = "display_2dp")]
    pub employment: f64,
    #[tabled(rename = "Unemployment", display_with = "display_2dp")]
    pub unemployment: f64,
    #[tabled(rename = "Year")]
    pub year: i32,
}

/// Fixed five-indicator shape for radar and comparison charts.
///
/// `salary` is the USD salary divided by 100 so it plots on the same axis as
/// the percentage indicators. It is a display scale, not a unit conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct CompositeCountryRecord {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "Employment", display_with = "display_2dp")]
    pub employment: f64,
    #[tabled(rename = "Unemployment", display_with = "display_2dp")]
    pub unemployment: f64,
    #[tabled(rename = "Informal", display_with = "display_2dp")]
    pub informal: f64,
    #[tabled(rename = "LaborForce", display_with = "display_2dp")]
    pub labor_force: f64,
    #[tabled(rename = "Salary/100", display_with = "display_2dp")]
    pub salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    #[tabled(rename = "LatestAvg")]
    pub latest_avg: String,
    #[tabled(rename = "YearRange")]
    pub year_range: String,
    #[tabled(rename = "Countries")]
    pub total_countries: usize,
    #[tabled(rename = "DataPoints")]
    pub data_points: usize,
    #[tabled(rename = "Trend")]
    pub trend: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct WageGapEntry {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "Year")]
    pub year: i32,
    #[tabled(rename = "MaleSalary", display_with = "display_2dp")]
    pub male_salary: f64,
    #[tabled(rename = "FemaleSalary", display_with = "display_2dp")]
    pub female_salary: f64,
    /// Signed: negative when women out-earn men.
    #[tabled(rename = "GapPct")]
    pub gap_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryAverage {
    pub country: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
    pub fill: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapCell {
    pub iso3: &'static str,
    pub country: String,
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InformalityGap {
    pub country: String,
    pub total: f64,
    pub male: f64,
    pub female: f64,
    /// `female - male`, in percentage points.
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct MinimumWageRecord {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "MinimumWageUSD", display_with = "display_2dp")]
    pub minimum_wage: f64,
    #[tabled(rename = "AverageIncomeUSD", display_with = "display_2dp")]
    pub average_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBandPoint {
    pub age_band: String,
    pub sex: Sex,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderTimelineRow {
    pub year: i32,
    pub participation_male: f64,
    pub participation_female: f64,
    /// `participation_male - participation_female`.
    pub participation_gap: f64,
    pub salary_male: Option<f64>,
    pub salary_female: Option<f64>,
}
