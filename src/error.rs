//! Typed startup errors.
//!
//! Everything in here is fatal: the process reports it and exits before any
//! request is served. Per-request failures (classification, empty matches)
//! are not errors and never show up in these enums.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or missing startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No inference token was supplied via `--token` or `HF_TOKEN`
    #[error("inference API token not found; pass --token or set HF_TOKEN")]
    MissingToken,

    /// Request timeout must be at least one second
    #[error("invalid timeout: {0} seconds")]
    InvalidTimeout(u64),

    /// Genre map override could not be read
    #[error("failed to read genre map {path}: {source}")]
    GenreMapIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Genre map override is not a JSON object of string lists
    #[error("malformed genre map {path}: {source}")]
    GenreMapFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Failures while loading the track dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Dataset file does not exist
    #[error("dataset file `{0}` not found")]
    NotFound(PathBuf),

    /// A column the selector depends on is absent after header normalization
    #[error("required column '{column}' not found in dataset `{path}`")]
    MissingColumn { column: String, path: PathBuf },

    /// CSV parse or read failure
    #[error("failed to read dataset `{path}`: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
