//! Path utilities for test archives and temporary output.

use std::path::PathBuf;

/// Location of a real metrics archive, if `METRICS_DATA_DIR` points at one.
pub fn metrics_root_from_env() -> Option<PathBuf> {
    let dir = PathBuf::from(std::env::var("METRICS_DATA_DIR").ok()?);
    if dir.is_dir() {
        Some(dir)
    } else {
        None
    }
}

/// Creates a temporary directory for test output.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory with a specific prefix.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}
