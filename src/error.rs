//! Error taxonomy for dataset ingestion and loading.
//!
//! Row-level validation failures are not errors: the normalizer drops those
//! rows and only the retained/read counts reflect them.

/// Errors raised while splitting CSV text into records.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The text contains no non-blank line to use as a header.
    #[error("CSV text has no header row")]
    MissingHeader,

    /// A line could not be tokenized.
    #[error("malformed CSV at line {line}")]
    Csv {
        /// One-based line number in the source text.
        line: usize,
        /// Underlying CSV error.
        source: csv::Error,
    },
}

/// Errors raised while fetching and loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The text for `path` could not be retrieved.
    #[error("failed to fetch {path}")]
    Fetch {
        /// Catalog path that was requested.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The text for `path` was retrieved but could not be parsed.
    #[error("failed to parse {path}")]
    Parse {
        /// Catalog path that was requested.
        path: String,
        /// Underlying ingest error.
        source: IngestError,
    },

    /// Every dataset in the batch failed; nothing can be shown.
    #[error("no dataset could be loaded ({failed} failed)")]
    AllDatasetsFailed {
        /// Number of datasets that failed.
        failed: usize,
    },
}
