//! Error types for chart rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while drawing or writing a chart.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Output directory does not exist: {}", .0.display())]
    OutputDirMissing(PathBuf),

    #[error("Chart has no series to draw")]
    NoSeries,

    #[error("Drawing backend error: {0}")]
    Backend(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch viewer '{viewer}': {source}")]
    Viewer {
        viewer: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid chart style: {0}")]
    Style(String),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
