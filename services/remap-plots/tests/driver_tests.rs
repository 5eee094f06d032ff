//! Render loop tests against temporary metrics archives.

use metrics_loader::{DatasetKey, MetricsLocator};
use remap_common::{Mesh, Metric, Variable};
use remap_plots::{
    build_chart, expand_request, MethodOrders, PlotDriver, PlotJob, PlotPlan, PlotRequest, RenderSummary,
};
use renderer::chart_file_name;
use test_utils::{metrics_csv, synthetic_value, temp_test_dir, MetricsArchive, FULL_DATASET_ROWS};

/// Write all five compared datasets of a job into the archive.
fn populate(archive: &MetricsArchive, job: &PlotJob) {
    for (method, variant, order) in job.orders.schemes() {
        let key = DatasetKey::new(method, job.mesh, job.variable, order, variant).unwrap();
        archive.add_bz2(&key.relative_stem(), &metrics_csv(FULL_DATASET_ROWS));
    }
}

/// Every chart of the summary exists on disk under the expected name.
fn assert_charts_on_disk(summary: &RenderSummary, jobs: &[PlotJob], output_dir: &std::path::Path) {
    let mut expected = Vec::new();
    for job in jobs {
        for &metric in &job.metrics {
            expected.push(output_dir.join(chart_file_name(metric, job.variable, &job.mesh)));
        }
    }
    assert_eq!(summary.charts.len(), expected.len());
    for record in &summary.charts {
        assert!(record.path.is_file(), "missing chart {}", record.path.display());
        assert_eq!(
            record.path.file_name().unwrap().to_string_lossy(),
            chart_file_name(record.metric, record.variable, &mesh_of(jobs, &record.mesh))
        );
        assert!(expected.contains(&record.path));
    }
}

fn mesh_of(jobs: &[PlotJob], display: &str) -> Mesh {
    jobs.iter()
        .find(|job| job.mesh.to_string() == display)
        .map(|job| job.mesh)
        .unwrap()
}

fn rrm_request() -> PlotRequest {
    PlotRequest::regionally_refined(Variable::Topography, vec![Metric::Gc, Metric::LMinL2])
        .with_resolutions(&[(2, 2)])
}

fn plan_for(archive: &MetricsArchive, request: PlotRequest) -> PlotPlan {
    let mut plan = PlotPlan::paper();
    plan.metrics_root = archive.root().to_path_buf();
    plan.output_dir = archive.root().join("does-not-exist");
    plan.requests = vec![request];
    plan
}

// ============================================================================
// Combination expansion
// ============================================================================

#[test]
fn test_expand_uniform_request() {
    let request = PlotRequest::uniform(Variable::CloudFraction, vec![Metric::GMaxE])
        .with_resolutions(&[(0, 4), (4, 4)]);
    let jobs = expand_request(&request).unwrap();
    assert_eq!(jobs.len(), 6);
    assert_eq!(jobs[0].context(), "CloudFraction - CS-MPAS");
    assert_eq!(jobs[4].context(), "CloudFraction - MPAS-RLL");
}

#[test]
fn test_expand_rrm_request_forces_single_slot() {
    let jobs = expand_request(&rrm_request()).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].mesh, Mesh::regionally_refined(2, 2).unwrap());
    assert_eq!(jobs[0].context(), "Topography - CS-MPAS");
}

// ============================================================================
// Chart building from loaded tables
// ============================================================================

#[test]
fn test_build_chart_from_archive() {
    let archive = MetricsArchive::new();
    let job = expand_request(&rrm_request()).unwrap().remove(0);
    populate(&archive, &job);

    let locator = MetricsLocator::new(archive.root());
    let tables: Vec<_> = job
        .orders
        .schemes()
        .into_iter()
        .map(|(method, variant, order)| {
            let key = DatasetKey::new(method, job.mesh, job.variable, order, variant).unwrap();
            let (table, _) = locator.load(&key).unwrap().require().unwrap();
            (renderer::labels::series_label(method, variant, order), table)
        })
        .collect();

    let chart = build_chart(Metric::LMinL2, &job.context(), &tables).unwrap();
    assert_eq!(chart.series().len(), 5);
    for series in chart.series() {
        assert_eq!(series.points().len(), 100);
        assert_eq!(series.points()[0].1, synthetic_value(Metric::LMinL2, 1));
    }

    let chart = build_chart(Metric::Gc, &job.context(), &tables).unwrap();
    let expected = synthetic_value(Metric::Gc, 1).log10();
    assert!((chart.series()[0].points()[0].1 - expected).abs() < 1e-12);
}

#[test]
fn test_build_chart_missing_column() {
    let archive = MetricsArchive::new();
    let job = expand_request(&rrm_request()).unwrap().remove(0);
    let key = DatasetKey::new(
        remap_common::Method::TempestRemap,
        job.mesh,
        job.variable,
        4,
        remap_common::Variant::Default,
    )
    .unwrap();
    archive.add_csv(&key.relative_stem(), "GC\n0\n1\n");
    let (table, _) = MetricsLocator::new(archive.root())
        .load(&key)
        .unwrap()
        .require()
        .unwrap();

    let err = build_chart(Metric::H1S, "ctx", &[("TR".to_string(), table)]).unwrap_err();
    assert!(err.to_string().contains("H1S"));
}

// ============================================================================
// Render loop
// ============================================================================

#[test]
fn test_missing_dataset_fails_combination() {
    let archive = MetricsArchive::new();
    let plan = plan_for(&archive, rrm_request());

    let summary = PlotDriver::from_plan(&plan).run(&plan).unwrap();
    assert_eq!(summary.combinations, 1);
    assert!(summary.has_failures());
    assert!(summary.failures[0].missing_dataset);
    assert!(summary.failures[0].error.contains("metrics_cs128_icodr5_O4_Topography"));
    assert!(summary.charts.is_empty());
}

#[test]
fn test_one_missing_series_fails_whole_combination() {
    let archive = MetricsArchive::new();
    let job = expand_request(&rrm_request()).unwrap().remove(0);
    populate(&archive, &job);

    let mut plan = plan_for(&archive, rrm_request());
    plan.requests[0].orders = MethodOrders {
        esmf: 1,
        ..MethodOrders::default()
    };

    let summary = PlotDriver::from_plan(&plan).run(&plan).unwrap();
    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].error.contains("conserve_Topography"));
}

#[test]
fn test_missing_output_dir_fails_after_loading() {
    let archive = MetricsArchive::new();
    let job = expand_request(&rrm_request()).unwrap().remove(0);
    populate(&archive, &job);
    let plan = plan_for(&archive, rrm_request());

    let summary = PlotDriver::from_plan(&plan).run(&plan).unwrap();
    assert_eq!(summary.failures.len(), 1);
    assert!(!summary.failures[0].missing_dataset);
    assert!(summary.failures[0].error.contains("does-not-exist"));
    assert!(!plan.output_dir.exists());
}

#[test]
fn test_failures_are_isolated_per_combination() {
    let archive = MetricsArchive::new();
    let request = PlotRequest::regionally_refined(Variable::Topography, vec![Metric::Gc])
        .with_resolutions(&[(0, 2), (2, 0), (2, 2)]);
    let plan = plan_for(&archive, request);

    let summary = PlotDriver::from_plan(&plan).run(&plan).unwrap();
    assert_eq!(summary.combinations, 3);
    assert_eq!(summary.failures.len(), 3);
    assert_eq!(summary.skipped, 0);
}

#[test]
fn test_fail_fast_skips_remaining_combinations() {
    let archive = MetricsArchive::new();
    let request = PlotRequest::regionally_refined(Variable::Topography, vec![Metric::Gc])
        .with_resolutions(&[(0, 2), (2, 0), (2, 2)]);
    let mut plan = plan_for(&archive, request);
    plan.fail_fast = true;

    let summary = PlotDriver::from_plan(&plan).run(&plan).unwrap();
    assert_eq!(summary.combinations, 3);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.succeeded(), 0);
}

#[test]
fn test_parallel_run_reports_every_combination() {
    let archive = MetricsArchive::new();
    let request = PlotRequest::uniform(Variable::CloudFraction, vec![Metric::GMaxE]);
    let mut plan = plan_for(&archive, request);
    plan.parallel = true;

    let summary = PlotDriver::from_plan(&plan).run(&plan).unwrap();
    assert_eq!(summary.combinations, 15);
    assert_eq!(summary.failures.len(), 15);
    assert!(summary.failures.iter().all(|f| f.missing_dataset));
}

// ============================================================================
// Full runs
// ============================================================================

#[test]
fn test_uniform_run_writes_chart_per_metric_and_combination() {
    let archive = MetricsArchive::new();
    let output = temp_test_dir();
    let request = PlotRequest::uniform(Variable::TotalPrecipWater, vec![Metric::Gc, Metric::GMaxE])
        .with_resolutions(&[(0, 4)]);
    let jobs = expand_request(&request).unwrap();
    for job in &jobs {
        populate(&archive, job);
    }

    let mut plan = plan_for(&archive, request);
    plan.output_dir = output.path().to_path_buf();

    let summary = PlotDriver::from_plan(&plan).run(&plan).unwrap();
    assert!(!summary.has_failures(), "{:?}", summary.failures);
    assert_eq!(summary.combinations, 3);
    assert_eq!(summary.succeeded(), 3);
    assert_charts_on_disk(&summary, &jobs, output.path());
    assert!(output
        .path()
        .join("GC_TotalPrecipWater_RLL-CS_0-4.png")
        .is_file());
}

#[test]
fn test_rrm_request_writes_charts() {
    let archive = MetricsArchive::new();
    let output = temp_test_dir();
    let request = rrm_request();
    let jobs = expand_request(&request).unwrap();
    populate(&archive, &jobs[0]);

    let mut plan = plan_for(&archive, request.clone());
    plan.output_dir = output.path().to_path_buf();

    let summary = PlotDriver::from_plan(&plan).render_request(&request).unwrap();
    assert!(!summary.has_failures(), "{:?}", summary.failures);
    assert_eq!(summary.combinations, 1);
    assert_charts_on_disk(&summary, &jobs, output.path());
    assert!(output.path().join("RRM-LMinL2_Topography_CSr2-MPASr2.png").is_file());
}
