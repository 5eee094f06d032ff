//! Error types for the metrics loader.

use std::path::PathBuf;

use remap_common::{Metric, RemapError};
use thiserror::Error;

/// Errors that can occur while locating or reading a metrics dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Parameter(#[from] RemapError),

    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Decompression failed: {0}")]
    Decompression(String),

    #[error("Malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid value '{value}' for {column} in {} (data row {row})", path.display())]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Dataset {} has no data rows", .0.display())]
    Empty(PathBuf),

    #[error("Metric column {metric} missing from {}", path.display())]
    MissingColumn { metric: Metric, path: PathBuf },
}

impl DatasetError {
    /// True when the dataset file itself does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatasetError::NotFound(_))
    }
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
