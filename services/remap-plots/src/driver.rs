//! The render loop: plan requests to saved charts.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use metrics_loader::{DatasetError, DatasetKey, MetricsLocator, MetricsTable};
use rayon::prelude::*;
use remap_common::{GridPairing, Mesh, Metric, RemapError, Variable, REMAP_ITERATIONS};
use renderer::labels::{chart_title, series_label};
use renderer::{chart_file_name, render_png, show_interactive, ChartStyle, ComparisonChart, RenderError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, info_span, warn};

use crate::config::{MethodOrders, PlotPlan, PlotRequest};

/// Why one (request, mesh) combination produced no charts.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error(transparent)]
    Parameter(#[from] RemapError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PlotError {
    /// True when an expected metrics file was absent.
    pub fn is_dataset_not_found(&self) -> bool {
        matches!(self, PlotError::Dataset(e) if e.is_not_found())
    }
}

/// A single chart combination to render.
#[derive(Debug, Clone)]
pub struct PlotJob {
    pub variable: Variable,
    pub metrics: Vec<Metric>,
    pub mesh: Mesh,
    pub orders: MethodOrders,
}

impl PlotJob {
    /// Title context, e.g. `Topography - CS-MPAS`. Regionally refined meshes
    /// always pair CS with MPAS.
    pub fn context(&self) -> String {
        let pairing = match self.mesh {
            Mesh::Uniform { pairing, .. } => pairing,
            Mesh::RegionallyRefined { .. } => GridPairing::CsMpas,
        };
        format!("{} - {}", self.variable, pairing)
    }
}

/// One chart that was produced.
#[derive(Debug, Clone, Serialize)]
pub struct ChartRecord {
    pub metric: Metric,
    pub variable: Variable,
    pub mesh: String,
    /// Saved PNG, or the temporary SVG handed to the viewer.
    pub path: PathBuf,
}

/// One combination that failed.
#[derive(Debug, Clone, Serialize)]
pub struct JobFailure {
    pub variable: Variable,
    pub mesh: String,
    pub missing_dataset: bool,
    pub error: String,
}

/// Outcome of a render run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderSummary {
    pub combinations: usize,
    pub charts: Vec<ChartRecord>,
    pub failures: Vec<JobFailure>,
    /// Combinations not attempted because an earlier one failed with
    /// `fail_fast` set.
    pub skipped: usize,
    pub elapsed: Duration,
}

impl RenderSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.combinations - self.failures.len() - self.skipped
    }

    fn record(&mut self, job: &PlotJob, outcome: Option<Result<Vec<ChartRecord>, PlotError>>) {
        self.combinations += 1;
        match outcome {
            Some(Ok(charts)) => self.charts.extend(charts),
            Some(Err(err)) => self.failures.push(JobFailure {
                variable: job.variable,
                mesh: job.mesh.to_string(),
                missing_dataset: err.is_dataset_not_found(),
                error: err.to_string(),
            }),
            None => self.skipped += 1,
        }
    }
}

/// Renders plan requests against a metrics archive.
pub struct PlotDriver {
    locator: MetricsLocator,
    output_dir: PathBuf,
    style: ChartStyle,
    interactive: bool,
    parallel: bool,
    fail_fast: bool,
}

impl PlotDriver {
    pub fn from_plan(plan: &PlotPlan) -> Self {
        Self {
            locator: MetricsLocator::new(&plan.metrics_root),
            output_dir: plan.output_dir.clone(),
            style: plan.chart.clone(),
            interactive: plan.interactive,
            parallel: plan.parallel,
            fail_fast: plan.fail_fast,
        }
    }

    /// Render every request of a plan.
    pub fn run(&self, plan: &PlotPlan) -> Result<RenderSummary, PlotError> {
        let mut jobs = Vec::with_capacity(plan.combination_count());
        for request in &plan.requests {
            jobs.extend(expand_request(request)?);
        }
        info!(
            requests = plan.requests.len(),
            combinations = jobs.len(),
            parallel = self.parallel,
            interactive = self.interactive,
            "Starting render run"
        );
        Ok(self.render_jobs(&jobs))
    }

    /// Render all combinations of one request.
    pub fn render_request(&self, request: &PlotRequest) -> Result<RenderSummary, PlotError> {
        let jobs = expand_request(request)?;
        Ok(self.render_jobs(&jobs))
    }

    fn render_jobs(&self, jobs: &[PlotJob]) -> RenderSummary {
        let start = Instant::now();
        let abort = AtomicBool::new(false);

        let run_one = |job: &PlotJob| -> Option<Result<Vec<ChartRecord>, PlotError>> {
            if self.fail_fast && abort.load(Ordering::Relaxed) {
                return None;
            }
            let result = self.render_job(job);
            if let Err(err) = &result {
                error!(mesh = %job.mesh, variable = %job.variable, error = %err, "Combination failed");
                abort.store(true, Ordering::Relaxed);
            }
            Some(result)
        };

        let outcomes: Vec<_> = if self.parallel {
            jobs.par_iter().map(run_one).collect()
        } else {
            let mut outcomes = Vec::with_capacity(jobs.len());
            for job in jobs {
                outcomes.push(run_one(job));
            }
            outcomes
        };

        let mut summary = RenderSummary::default();
        for (job, outcome) in jobs.iter().zip(outcomes) {
            summary.record(job, outcome);
        }
        summary.elapsed = start.elapsed();

        if summary.skipped > 0 {
            warn!(skipped = summary.skipped, "Skipped combinations after failure");
        }
        summary
    }

    /// Load the five compared datasets for one mesh and render each metric.
    pub fn render_job(&self, job: &PlotJob) -> Result<Vec<ChartRecord>, PlotError> {
        let _span = info_span!("combination", mesh = %job.mesh, variable = %job.variable).entered();

        let tables = self.load_series(job)?;

        let mut records = Vec::with_capacity(job.metrics.len());
        for &metric in &job.metrics {
            let chart = build_chart(metric, &job.context(), &tables)?;
            let path = if self.interactive {
                show_interactive(&chart, &self.style)?
            } else {
                let file_name = chart_file_name(metric, job.variable, &job.mesh);
                render_png(&chart, &self.style, &self.output_dir, &file_name)?
            };
            records.push(ChartRecord {
                metric,
                variable: job.variable,
                mesh: job.mesh.to_string(),
                path,
            });
        }
        Ok(records)
    }

    /// Every series must load; a missing file fails the whole combination.
    fn load_series(&self, job: &PlotJob) -> Result<Vec<(String, MetricsTable)>, PlotError> {
        job.orders
            .schemes()
            .into_iter()
            .map(|(method, variant, order)| -> Result<(String, MetricsTable), PlotError> {
                let key = DatasetKey::new(method, job.mesh, job.variable, order, variant)?;
                let (table, _) = self.locator.load(&key)?.require()?;
                Ok((series_label(method, variant, order), table))
            })
            .collect()
    }
}

/// Expand a request into its (mesh) combinations.
pub fn expand_request(request: &PlotRequest) -> Result<Vec<PlotJob>, PlotError> {
    Ok(request
        .meshes()?
        .into_iter()
        .map(|mesh| job_for(request, mesh))
        .collect())
}

fn job_for(request: &PlotRequest, mesh: Mesh) -> PlotJob {
    PlotJob {
        variable: request.variable,
        metrics: request.metrics.clone(),
        mesh,
        orders: request.orders,
    }
}

/// Build one metric's chart from loaded tables.
pub fn build_chart(
    metric: Metric,
    context: &str,
    tables: &[(String, MetricsTable)],
) -> Result<ComparisonChart, PlotError> {
    let mut chart = ComparisonChart::new(metric, chart_title(metric, context));
    for (label, table) in tables {
        chart.push_series(label.clone(), &REMAP_ITERATIONS, table.column(metric)?);
    }
    Ok(chart)
}
