//! Tests for chart construction and output handling.

use remap_common::{GridPairing, Mesh, Method, Metric, Variable, Variant, REMAP_ITERATIONS};
use renderer::labels::{chart_title, series_label, y_axis_label, LEGEND_TITLE, X_AXIS_LABEL};
use renderer::{chart_file_name, render_png, render_svg, ChartStyle, ComparisonChart, RenderError};
use test_utils::temp_test_dir;

fn five_scheme_chart(metric: Metric) -> ComparisonChart {
    let mut chart = ComparisonChart::new(metric, chart_title(metric, "Topography - CS-MPAS"));
    let schemes = [
        (Method::TempestRemap, Variant::Default, 4),
        (Method::Gmls, Variant::Default, 4),
        (Method::Gmls, Variant::Caas, 4),
        (Method::WlsEnor, Variant::Default, 4),
        (Method::Esmf, Variant::Default, 2),
    ];
    for (i, (method, variant, order)) in schemes.into_iter().enumerate() {
        let values: Vec<f64> = (0..100).map(|row| 10f64.powi(-(i as i32)) * (row + 1) as f64).collect();
        chart.push_series(series_label(method, variant, order), &REMAP_ITERATIONS, &values);
    }
    chart
}

// ============================================================================
// Chart model
// ============================================================================

#[test]
fn test_five_series_with_expected_legends() {
    let chart = five_scheme_chart(Metric::Gc);
    let labels: Vec<&str> = chart.series().iter().map(|s| s.label()).collect();
    assert_eq!(
        labels,
        vec![
            "TempestRemap(p=3)",
            "GMLS(p=4)",
            "GMLS-CAAS(p=4)",
            "WLS-ENOR(p=4)",
            "ESMF(conserve2nd)"
        ]
    );
}

#[test]
fn test_series_length_follows_shorter_axis() {
    let chart = five_scheme_chart(Metric::Gc);
    for series in chart.series() {
        assert_eq!(series.points().len(), 100);
        assert_eq!(series.points()[0].0, 1.0);
        assert_eq!(series.points()[99].0, 990.0);
    }
}

#[test]
fn test_log_metric_values_are_transformed() {
    let chart = five_scheme_chart(Metric::H1T);
    let tr = &chart.series()[0];
    assert_eq!(tr.points()[9].1, 1.0);
    let gmls = &chart.series()[1];
    assert_eq!(gmls.points()[9].1, 0.0);
}

#[test]
fn test_chart_metadata() {
    let chart = five_scheme_chart(Metric::LMaxL2);
    assert_eq!(chart.metric(), Metric::LMaxL2);
    assert_eq!(chart.y_label(), y_axis_label(Metric::LMaxL2));
    assert_eq!(chart.title(), "L₂ Local Maxima: Topography - CS-MPAS");
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_missing_output_dir_is_not_created() {
    let dir = temp_test_dir();
    let missing = dir.path().join("images");
    let chart = five_scheme_chart(Metric::Gc);

    let err = render_png(&chart, &ChartStyle::default(), &missing, "GC.png").unwrap_err();
    assert!(matches!(err, RenderError::OutputDirMissing(ref p) if p == &missing));
    assert!(!missing.exists());
}

#[test]
fn test_empty_chart_is_rejected() {
    let dir = temp_test_dir();
    let chart = ComparisonChart::new(Metric::Gc, "empty");
    let err = render_png(&chart, &ChartStyle::default(), dir.path(), "GC.png").unwrap_err();
    assert!(matches!(err, RenderError::NoSeries));
}

#[test]
fn test_file_names_for_every_pairing() {
    for pairing in GridPairing::ALL {
        let mesh = Mesh::uniform(pairing, 4, 0).unwrap();
        let name = chart_file_name(Metric::LMinL2, Variable::Topography, &mesh);
        assert_eq!(name, format!("LMinL2_Topography_{}_4-0.png", pairing.token()));
    }
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_svg_contains_legend_and_axis_text() {
    let chart = five_scheme_chart(Metric::GMaxE);
    let svg = render_svg(&chart, &ChartStyle::default()).unwrap();

    assert!(svg.contains(LEGEND_TITLE));
    assert!(svg.contains(X_AXIS_LABEL));
    for series in chart.series() {
        assert!(svg.contains(series.label()), "legend entry {} missing", series.label());
    }
    assert!(svg.contains("bold"));
}

#[test]
fn test_png_written_into_existing_dir() {
    let dir = temp_test_dir();
    let chart = five_scheme_chart(Metric::Gl2);

    let path = render_png(&chart, &ChartStyle::default(), dir.path(), "GL2.png").unwrap();
    assert_eq!(path, dir.path().join("GL2.png"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}
