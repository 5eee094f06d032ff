//! Comparison charts for remap metrics.
//!
//! Each chart plots one metric against remap iterations for several
//! remapping schemes:
//! - Metric transforms and legend labels
//! - PNG output for batch runs
//! - SVG output handed to the platform viewer for interactive runs

pub mod chart;
pub mod error;
pub mod labels;
pub mod output;
pub mod style;

pub use chart::{ComparisonChart, Series};
pub use error::{RenderError, Result};
pub use output::{chart_file_name, open_in_viewer, render_png, render_svg, show_interactive};
pub use style::ChartStyle;
