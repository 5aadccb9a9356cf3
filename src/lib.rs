//! Labor-market dashboard data pipeline for South American countries.
//!
//! CSV text is parsed (`ingest`), validated into typed observations
//! (`normalize`), filtered by a [`types::FilterSelection`] (`filter`) and
//! reshaped into chart-ready rows (`reshape`, `join`, `reports`, `wage`).
//! Every stage is a pure function of its inputs; the binary is a thin
//! console shell around this library.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod join;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod reports;
pub mod reshape;
pub mod types;
pub mod util;
pub mod wage;

pub use error::{IngestError, LoadError};
pub use loader::{load_all, DirSource, LoadedDatasets, TextSource};
pub use types::{DatasetKey, FilterSelection, ObservationRecord, Sex};
