//! Error and conservation metrics recorded per remap iteration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RemapError;

/// Number of remap iteration counts at which metrics were recorded.
pub const REMAP_ITERATION_COUNT: usize = 101;

/// Iteration counts: 1, then 10, 20, ..., 1000.
pub const REMAP_ITERATIONS: [u32; REMAP_ITERATION_COUNT] = build_remap_iterations();

const fn build_remap_iterations() -> [u32; REMAP_ITERATION_COUNT] {
    let mut out = [0u32; REMAP_ITERATION_COUNT];
    out[0] = 1;
    let mut i = 1;
    while i < REMAP_ITERATION_COUNT {
        out[i] = (i as u32) * 10;
        i += 1;
    }
    out
}

/// Named scalar measure stored as one CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Metric {
    /// Global conservation
    Gc,
    Gl1,
    Gl2,
    GlInf,
    /// Global maxima error
    GMaxE,
    /// Global minima error
    GMinE,
    LMaxL1,
    LMaxL2,
    LMaxLm,
    LMinL1,
    LMinL2,
    LMinLm,
    /// H^{1/2} seminorm of the gradient error on the target
    H12T,
    H1T,
    /// H^{1/2} seminorm of the gradient error on the source
    H12S,
    H1S,
}

/// How a metric column is transformed before it is plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricScale {
    /// `log10(|v|)`
    Log10Abs,
    /// Local extremum measures, plotted as recorded
    LocalExtremum,
    /// Plotted as recorded
    Identity,
}

impl MetricScale {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            MetricScale::Log10Abs => value.abs().log10(),
            MetricScale::LocalExtremum | MetricScale::Identity => value,
        }
    }
}

impl Metric {
    pub const ALL: [Metric; 16] = [
        Metric::Gc,
        Metric::Gl1,
        Metric::Gl2,
        Metric::GlInf,
        Metric::GMaxE,
        Metric::GMinE,
        Metric::LMaxL1,
        Metric::LMaxL2,
        Metric::LMaxLm,
        Metric::LMinL1,
        Metric::LMinL2,
        Metric::LMinLm,
        Metric::H12T,
        Metric::H1T,
        Metric::H12S,
        Metric::H1S,
    ];

    /// Column header in the metrics CSV files.
    pub fn token(&self) -> &'static str {
        match self {
            Metric::Gc => "GC",
            Metric::Gl1 => "GL1",
            Metric::Gl2 => "GL2",
            Metric::GlInf => "GLinf",
            Metric::GMaxE => "GMaxE",
            Metric::GMinE => "GMinE",
            Metric::LMaxL1 => "LMaxL1",
            Metric::LMaxL2 => "LMaxL2",
            Metric::LMaxLm => "LMaxLm",
            Metric::LMinL1 => "LMinL1",
            Metric::LMinL2 => "LMinL2",
            Metric::LMinLm => "LMinLm",
            Metric::H12T => "H12T",
            Metric::H1T => "H1T",
            Metric::H12S => "H12S",
            Metric::H1S => "H1S",
        }
    }

    pub fn scale(&self) -> MetricScale {
        match self {
            Metric::Gc
            | Metric::Gl1
            | Metric::Gl2
            | Metric::GlInf
            | Metric::H12T
            | Metric::H1T
            | Metric::H12S
            | Metric::H1S => MetricScale::Log10Abs,
            Metric::LMaxL1
            | Metric::LMaxL2
            | Metric::LMaxLm
            | Metric::LMinL1
            | Metric::LMinL2
            | Metric::LMinLm => MetricScale::LocalExtremum,
            Metric::GMaxE | Metric::GMinE => MetricScale::Identity,
        }
    }

    /// Exact, case-sensitive match against a CSV header.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.token() == header.trim())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Metric {
    type Err = RemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_header(s)
            .or_else(|| {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|m| m.token().eq_ignore_ascii_case(s.trim()))
            })
            .ok_or_else(|| RemapError::unknown("metric", s))
    }
}

impl TryFrom<String> for Metric {
    type Error = RemapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Metric> for String {
    fn from(metric: Metric) -> Self {
        metric.token().to_string()
    }
}
