//! Locating and loading remap metrics datasets.
//!
//! A [`DatasetKey`] names one metrics file by method, meshes, variable, order
//! and variant. [`MetricsLocator`] maps keys to paths under a metrics root and
//! loads them into [`MetricsTable`]s.
//!
//! ```no_run
//! use metrics_loader::{DatasetKey, MetricsLocator};
//! use remap_common::{GridPairing, Method, Variable, Variant};
//!
//! let locator = MetricsLocator::new("../MetricsData");
//! let key = DatasetKey::uniform(
//!     Method::TempestRemap,
//!     GridPairing::CsMpas,
//!     0,
//!     4,
//!     Variable::TotalPrecipWater,
//!     4,
//!     Variant::Default,
//! )?;
//! let lookup = locator.load(&key)?;
//! # Ok::<(), metrics_loader::DatasetError>(())
//! ```

pub mod error;
pub mod loader;
pub mod locator;
pub mod table;

pub use error::{DatasetError, Result};
pub use loader::{decompress_bzip2, read_table, Compression, DatasetLookup, Resolved};
pub use locator::{DatasetKey, DatasetPath, MetricsLocator, DEFAULT_METRICS_ROOT};
pub use table::MetricsTable;
