//! Synthetic metrics CSV generators.
//!
//! Values follow predictable patterns so tests can check that the right
//! rows and columns survived loading.

use std::fs;
use std::io::Write;
use std::path::Path;

use remap_common::Metric;

/// Number of data rows in a real metrics file: one placeholder row plus one
/// row per remap iteration count.
pub const FULL_DATASET_ROWS: usize = 101;

/// Value stored for `metric` in data row `row` by [`metrics_csv`].
///
/// Row 0 is the placeholder and always holds `-1.0`. Other rows hold
/// `(metric_index + 1) * 1000 + row`, so both the column and the row can be
/// read back from a value.
pub fn synthetic_value(metric: Metric, row: usize) -> f64 {
    if row == 0 {
        return -1.0;
    }
    let index = Metric::ALL.iter().position(|m| *m == metric).unwrap_or(0);
    ((index + 1) * 1000 + row) as f64
}

/// Builds metrics CSV text with all 16 metric columns and `rows` data rows
/// (placeholder included), using [`synthetic_value`].
pub fn metrics_csv(rows: usize) -> String {
    metrics_csv_with(&Metric::ALL, rows, synthetic_value)
}

/// Builds metrics CSV text for the given columns with a custom value function.
pub fn metrics_csv_with(
    metrics: &[Metric],
    rows: usize,
    value: impl Fn(Metric, usize) -> f64,
) -> String {
    let mut out = String::new();
    let header: Vec<&str> = metrics.iter().map(|m| m.token()).collect();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in 0..rows {
        let cells: Vec<String> = metrics
            .iter()
            .map(|m| format!("{:e}", value(*m, row)))
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

/// Compresses text with bzip2.
pub fn bzip2_bytes(content: &str) -> Vec<u8> {
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder
        .write_all(content.as_bytes())
        .expect("Failed to compress test data");
    encoder.finish().expect("Failed to finish bzip2 stream")
}

/// Writes `content` to `path`, creating parent directories.
pub fn write_text(path: &Path, content: &str) {
    write_bytes(path, content.as_bytes());
}

/// Writes `bytes` to `path`, creating parent directories.
pub fn write_bytes(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create test directories");
    }
    fs::write(path, bytes).expect("Failed to write test file");
}
