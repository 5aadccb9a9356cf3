use std::collections::HashMap;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::catalog::{self, MINIMUM_WAGE_PATH};
use crate::error::LoadError;
use crate::ingest::{parse_csv, parse_flat_csv};
use crate::normalize::{normalize, NormalizedDataset};
use crate::types::{DatasetKey, MinimumWageRecord, ObservationRecord};
use crate::wage::minimum_wages_from_records;

/// The `fetchText` capability: resolve a catalog path to its text.
pub trait TextSource: Sync {
    fn fetch_text(&self, path: &str) -> Result<String, LoadError>;
}

/// Serves catalog paths (`/dataset/...`) from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    base_dir: PathBuf,
}

impl DirSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path.trim_start_matches('/'))
    }
}

impl TextSource for DirSource {
    fn fetch_text(&self, path: &str) -> Result<String, LoadError> {
        std::fs::read_to_string(self.resolve(path)).map_err(|source| LoadError::Fetch {
            path: path.to_string(),
            source,
        })
    }
}

/// Every dataset of one load batch. Datasets that failed are present but
/// empty; their errors sit in `failures`.
#[derive(Debug, Default)]
pub struct LoadedDatasets {
    datasets: HashMap<DatasetKey, NormalizedDataset>,
    pub failures: Vec<(DatasetKey, LoadError)>,
}

impl LoadedDatasets {
    pub fn get(&self, key: DatasetKey) -> Option<&NormalizedDataset> {
        self.datasets.get(&key)
    }

    /// Records of `key`, or an empty slice when it was never loaded.
    pub fn records(&self, key: DatasetKey) -> &[ObservationRecord] {
        self.datasets
            .get(&key)
            .map(|d| d.records.as_slice())
            .unwrap_or(&[])
    }

    pub fn insert(&mut self, dataset: NormalizedDataset) {
        self.datasets.insert(dataset.key, dataset);
    }

    pub fn total_records(&self) -> usize {
        self.datasets.values().map(|d| d.records.len()).sum()
    }
}

impl FromIterator<NormalizedDataset> for LoadedDatasets {
    fn from_iter<I: IntoIterator<Item = NormalizedDataset>>(iter: I) -> Self {
        let mut out = LoadedDatasets::default();
        for ds in iter {
            out.insert(ds);
        }
        out
    }
}

/// Fetch, parse and normalize one dataset.
#[instrument(skip(source))]
pub fn load_dataset<S: TextSource + ?Sized>(
    source: &S,
    key: DatasetKey,
) -> Result<NormalizedDataset, LoadError> {
    let path = catalog::descriptor(key).file_path;
    let text = source.fetch_text(path)?;
    let raw = parse_csv(&text).map_err(|source| LoadError::Parse {
        path: path.to_string(),
        source,
    })?;
    let dataset = normalize(&raw, key);
    info!(
        rows_read = dataset.report.rows_read,
        rows_retained = dataset.report.rows_retained,
        "dataset loaded"
    );
    Ok(dataset)
}

/// Load every catalog dataset concurrently.
///
/// A failing dataset is replaced by an empty one and recorded in
/// `failures`; the batch only fails when no dataset loaded at all.
pub fn load_all<S: TextSource + ?Sized>(source: &S) -> Result<LoadedDatasets, LoadError> {
    let results: Vec<(DatasetKey, Result<NormalizedDataset, LoadError>)> = DatasetKey::ALL
        .par_iter()
        .map(|&key| (key, load_dataset(source, key)))
        .collect();

    let mut loaded = LoadedDatasets::default();
    for (key, result) in results {
        match result {
            Ok(ds) => loaded.insert(ds),
            Err(e) => {
                warn!(dataset = %key, error = %e, "dataset unavailable, continuing without it");
                loaded.insert(NormalizedDataset::empty(key));
                loaded.failures.push((key, e));
            }
        }
    }

    if loaded.failures.len() == DatasetKey::ALL.len() {
        return Err(LoadError::AllDatasetsFailed {
            failed: loaded.failures.len(),
        });
    }
    Ok(loaded)
}

/// Fetch the flat minimum-wage file.
pub fn load_minimum_wages<S: TextSource + ?Sized>(
    source: &S,
) -> Result<Vec<MinimumWageRecord>, LoadError> {
    let text = source.fetch_text(MINIMUM_WAGE_PATH)?;
    let raw = parse_flat_csv(&text).map_err(|source| LoadError::Parse {
        path: MINIMUM_WAGE_PATH.to_string(),
        source,
    })?;
    Ok(minimum_wages_from_records(&raw))
}
