//! Dataset resolution and loading.
//!
//! For a dataset stem, `<stem>.csv.bz2` is preferred over `<stem>.csv`. A
//! missing file is not an error at this layer: it is reported as
//! [`DatasetLookup::NotFound`] so callers decide the policy.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use remap_common::{GridPairing, Method, Variable, Variant};
use tracing::{debug, warn};

use crate::error::{DatasetError, Result};
use crate::locator::{DatasetKey, DatasetPath, MetricsLocator};
use crate::table::MetricsTable;

/// On-disk encoding of a metrics file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Bzip2,
}

/// Which file, if any, backs a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Found { path: PathBuf, compression: Compression },
    Missing { expected: PathBuf },
}

/// Outcome of loading a dataset: a table and the file it came from, or an
/// explicit not-found signal carrying the path that was expected.
#[derive(Debug, Clone)]
pub enum DatasetLookup {
    Found { table: MetricsTable, path: PathBuf },
    NotFound { expected: PathBuf },
}

impl DatasetLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, DatasetLookup::Found { .. })
    }

    pub fn table(&self) -> Option<&MetricsTable> {
        match self {
            DatasetLookup::Found { table, .. } => Some(table),
            DatasetLookup::NotFound { .. } => None,
        }
    }

    /// Path of the loaded file, or the plain `.csv` path that was expected.
    pub fn path(&self) -> &Path {
        match self {
            DatasetLookup::Found { path, .. } => path,
            DatasetLookup::NotFound { expected } => expected,
        }
    }

    /// Treat a missing dataset as an error.
    pub fn require(self) -> Result<(MetricsTable, PathBuf)> {
        match self {
            DatasetLookup::Found { table, path } => Ok((table, path)),
            DatasetLookup::NotFound { expected } => Err(DatasetError::NotFound(expected)),
        }
    }
}

impl MetricsLocator {
    /// Check which variant of the dataset exists on disk.
    pub fn resolve(&self, key: &DatasetKey) -> Resolved {
        resolve_path(&self.path_for(key))
    }

    /// Locate and load a dataset.
    pub fn load(&self, key: &DatasetKey) -> Result<DatasetLookup> {
        match self.resolve(key) {
            Resolved::Found { path, compression } => {
                debug!(path = %path.display(), ?compression, "Loading metrics dataset");
                let table = read_table(&path, compression)?;
                Ok(DatasetLookup::Found { table, path })
            }
            Resolved::Missing { expected } => {
                warn!(path = %expected.display(), "Could not find metrics dataset");
                Ok(DatasetLookup::NotFound { expected })
            }
        }
    }

    /// Uniform-mesh lookup from raw parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn load_uniform(
        &self,
        method: Method,
        pairing: GridPairing,
        source: u8,
        target: u8,
        variable: Variable,
        order: u8,
        variant: Variant,
    ) -> Result<DatasetLookup> {
        let key = DatasetKey::uniform(method, pairing, source, target, variable, order, variant)?;
        self.load(&key)
    }

    /// Regionally refined lookup from raw parameters.
    pub fn load_regionally_refined(
        &self,
        method: Method,
        source: u8,
        target: u8,
        variable: Variable,
        order: u8,
        variant: Variant,
    ) -> Result<DatasetLookup> {
        let key = DatasetKey::regionally_refined(method, source, target, variable, order, variant)?;
        self.load(&key)
    }
}

fn resolve_path(path: &DatasetPath) -> Resolved {
    let bz2 = path.bz2();
    if bz2.exists() {
        return Resolved::Found {
            path: bz2,
            compression: Compression::Bzip2,
        };
    }
    let csv = path.csv();
    if csv.exists() {
        return Resolved::Found {
            path: csv,
            compression: Compression::None,
        };
    }
    Resolved::Missing { expected: csv }
}

/// Read and parse a metrics file, decompressing bzip2 archives.
pub fn read_table(path: &Path, compression: Compression) -> Result<MetricsTable> {
    let data = fs::read(path).map_err(|source| DatasetError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    match compression {
        Compression::None => MetricsTable::from_reader(data.as_slice(), path),
        Compression::Bzip2 => {
            let decompressed = decompress_bzip2(&data)?;
            MetricsTable::from_reader(decompressed.as_slice(), path)
        }
    }
}

/// Decompress bzip2 data, including multi-stream archives.
pub fn decompress_bzip2(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = bzip2::read::MultiBzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| DatasetError::Decompression(e.to_string()))?;
    Ok(decompressed)
}
