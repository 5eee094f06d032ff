//! In-memory metrics table parsed from CSV.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use remap_common::{Metric, REMAP_ITERATIONS};
use tracing::debug;

use crate::error::{DatasetError, Result};

/// Metric columns of one dataset, with the placeholder row already removed.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    source: PathBuf,
    rows: usize,
    columns: BTreeMap<Metric, Vec<f64>>,
}

impl MetricsTable {
    /// Parse CSV text whose header row names the metric columns.
    ///
    /// The first data row duplicates the initial condition and is always
    /// dropped. Columns whose header is not a known metric (such as an
    /// unnamed index column) are ignored. Empty cells read as NaN.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let csv_err = |source_err: csv::Error| DatasetError::Csv {
            path: source.to_path_buf(),
            source: source_err,
        };

        let headers = csv_reader.headers().map_err(csv_err)?.clone();
        let mapped: Vec<(usize, Metric)> = headers
            .iter()
            .enumerate()
            .filter_map(|(i, h)| Metric::from_header(h).map(|m| (i, m)))
            .collect();

        let mut columns: BTreeMap<Metric, Vec<f64>> =
            mapped.iter().map(|(_, m)| (*m, Vec::new())).collect();

        let mut records = csv_reader.records();
        match records.next() {
            Some(placeholder) => {
                placeholder.map_err(csv_err)?;
            }
            None => return Err(DatasetError::Empty(source.to_path_buf())),
        }

        let mut rows = 0;
        for (row, record) in records.enumerate() {
            let record = record.map_err(csv_err)?;
            for (col, metric) in &mapped {
                let cell = record.get(*col).unwrap_or("");
                let value = parse_cell(cell).ok_or_else(|| DatasetError::InvalidValue {
                    path: source.to_path_buf(),
                    row: row + 1,
                    column: metric.token().to_string(),
                    value: cell.to_string(),
                })?;
                if let Some(values) = columns.get_mut(metric) {
                    values.push(value);
                }
            }
            rows += 1;
        }

        debug!(
            path = %source.display(),
            rows,
            columns = mapped.len(),
            "Parsed metrics table"
        );

        Ok(Self {
            source: source.to_path_buf(),
            rows,
            columns,
        })
    }

    /// File the table was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Number of data rows after the placeholder was dropped.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.columns.keys().copied()
    }

    pub fn has_metric(&self, metric: Metric) -> bool {
        self.columns.contains_key(&metric)
    }

    pub fn column(&self, metric: Metric) -> Result<&[f64]> {
        self.columns
            .get(&metric)
            .map(Vec::as_slice)
            .ok_or_else(|| DatasetError::MissingColumn {
                metric,
                path: self.source.clone(),
            })
    }

    /// Pair a metric column with the remap iteration counts, row by row.
    ///
    /// Rows beyond the iteration sequence (or iterations beyond the rows) are
    /// left out.
    pub fn iteration_series(&self, metric: Metric) -> Result<Vec<(u32, f64)>> {
        let column = self.column(metric)?;
        Ok(REMAP_ITERATIONS
            .iter()
            .copied()
            .zip(column.iter().copied())
            .collect())
    }
}

fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}
