//! Temporary metrics archives for loader and driver tests.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::generators::{bzip2_bytes, write_bytes, write_text};

/// A throwaway metrics root. Files are added by their path relative to the
/// root without the `.csv` extension, as produced by the dataset locator.
pub struct MetricsArchive {
    dir: tempfile::TempDir,
}

impl MetricsArchive {
    pub fn new() -> Self {
        Self {
            dir: crate::paths::temp_test_dir_with_prefix("metrics_archive_"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `<root>/<stem>.csv` and returns its path.
    pub fn add_csv(&self, stem: &Path, content: &str) -> PathBuf {
        let path = with_suffix(&self.root().join(stem), ".csv");
        write_text(&path, content);
        path
    }

    /// Writes `<root>/<stem>.csv.bz2` and returns its path.
    pub fn add_bz2(&self, stem: &Path, content: &str) -> PathBuf {
        let path = with_suffix(&self.root().join(stem), ".csv.bz2");
        write_bytes(&path, &bzip2_bytes(content));
        path
    }
}

impl Default for MetricsArchive {
    fn default() -> Self {
        Self::new()
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}
