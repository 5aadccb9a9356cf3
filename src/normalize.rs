use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::is_south_american;
use crate::ingest::RawRecord;
use crate::types::{DatasetKey, ObservationRecord, Sex};
use crate::util::{parse_f64_safe, parse_leading_i32};

// ILO bulk-download column names shared by every indicator file.
const COL_COUNTRY: &str = "ref_area.label";
const COL_SEX: &str = "sex.label";
const COL_CLASSIF: &str = "classif1.label";
const COL_YEAR: &str = "time";
const COL_VALUE: &str = "obs_value";

const USD_MARKER: &str = "U.S. dollars";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_retained: usize,
}

impl LoadReport {
    pub fn rows_skipped(&self) -> usize {
        self.rows_read - self.rows_retained
    }
}

/// Validated records of one dataset plus the option lists the filter UI
/// offers. The option sets only see retained rows.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDataset {
    pub key: DatasetKey,
    pub records: Vec<ObservationRecord>,
    pub countries: BTreeSet<String>,
    pub sex_options: BTreeSet<String>,
    pub age_groups: BTreeSet<String>,
    pub years: BTreeSet<i32>,
    pub report: LoadReport,
}

impl NormalizedDataset {
    /// The result a failed load degrades to.
    pub fn empty(key: DatasetKey) -> Self {
        normalize(&[], key)
    }
}

pub fn normalize(raw: &[RawRecord], key: DatasetKey) -> NormalizedDataset {
    let mut records = Vec::new();
    let mut countries = BTreeSet::new();
    let mut sex_options = BTreeSet::new();
    let mut age_groups = BTreeSet::new();
    let mut years = BTreeSet::new();

    for row in raw {
        let Some(rec) = normalize_row(row, key) else {
            continue;
        };
        countries.insert(rec.country.clone());
        sex_options.insert(rec.sex.as_str().to_string());
        if let Some(age) = &rec.age_group {
            age_groups.insert(age.clone());
        }
        years.insert(rec.year);
        records.push(rec);
    }

    // Keep the filter UI populated even when nothing survived.
    if sex_options.is_empty() {
        sex_options.insert(Sex::Total.as_str().to_string());
    }
    if age_groups.is_empty() {
        age_groups.insert("15+".to_string());
    }

    let report = LoadReport {
        rows_read: raw.len(),
        rows_retained: records.len(),
    };
    debug!(
        dataset = %key,
        rows_read = report.rows_read,
        rows_retained = report.rows_retained,
        "normalized dataset"
    );

    NormalizedDataset {
        key,
        records,
        countries,
        sex_options,
        age_groups,
        years,
        report,
    }
}

/// Map one raw row onto an [`ObservationRecord`], or `None` if any field
/// fails validation.
fn normalize_row(row: &RawRecord, key: DatasetKey) -> Option<ObservationRecord> {
    let country = row.get(COL_COUNTRY)?.trim();
    if country.is_empty() || !is_south_american(country) {
        return None;
    }
    let year = parse_leading_i32(row.get(COL_YEAR))?;
    let value = parse_f64_safe(row.get(COL_VALUE))?;
    let sex = Sex::from_label(row.get(COL_SEX).unwrap_or(""))?;

    let classif = row
        .get(COL_CLASSIF)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let (age_group, currency) = if key.has_age_dimension() {
        (classif, None)
    } else {
        // No FX conversion anywhere: non-USD salary rows are dropped.
        match classif {
            Some(c) if c.contains(USD_MARKER) => (None, Some(c)),
            _ => return None,
        }
    };

    Some(ObservationRecord {
        country: country.to_string(),
        year,
        value,
        sex,
        age_group,
        currency,
    })
}
