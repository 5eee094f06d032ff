//! Comparison chart generation for remap metrics.
//!
//! This crate provides:
//! - Plot plans (YAML or the built-in paper plan)
//! - The render loop over requests, resolution pairs and grid pairings
//! - Console and JSON summaries of a run

pub mod config;
pub mod driver;
pub mod report;

pub use config::{MethodOrders, PlotPlan, PlotRequest};
pub use driver::{build_chart, expand_request, ChartRecord, JobFailure, PlotDriver, PlotError, PlotJob, RenderSummary};
pub use report::{format_grids, format_locate, SummaryReport};
