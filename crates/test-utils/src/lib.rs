//! Shared test utilities for the remap-metrics workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Temporary metrics archives laid out like the real `MetricsData` tree
//! - Synthetic metrics CSV generators (plain and bzip2)
//! - Skip macros for tests that need a real metrics archive
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro to skip a test if no real metrics archive is available.
///
/// Looks at `METRICS_DATA_DIR`. If it is unset or does not exist, the test
/// prints a skip message and returns early.
///
/// ```ignore
/// use test_utils::require_metrics_root;
///
/// #[test]
/// fn test_real_archive() {
///     let root = require_metrics_root!();
///     // Test code using root...
/// }
/// ```
#[macro_export]
macro_rules! require_metrics_root {
    () => {{
        match $crate::metrics_root_from_env() {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: metrics archive not found. Set METRICS_DATA_DIR to run.");
                return;
            }
        }
    }};
}
