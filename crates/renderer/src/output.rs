//! Writing charts to disk and handing them to a viewer.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use plotters::prelude::*;
use remap_common::{Mesh, Metric, Variable};
use tracing::{debug, info};

use crate::chart::ComparisonChart;
use crate::error::{RenderError, Result};
use crate::style::ChartStyle;

/// File name of a saved chart.
///
/// Uniform: `<metric>_<variable>_<pairing>_<s>-<t>.png`.
/// Regionally refined: `RRM-<metric>_<variable>_CSr<s>-MPASr<t>.png`.
pub fn chart_file_name(metric: Metric, variable: Variable, mesh: &Mesh) -> String {
    let (source, target) = mesh.indices();
    match mesh {
        Mesh::Uniform { pairing, .. } => {
            format!("{metric}_{variable}_{}_{source}-{target}.png", pairing.token())
        }
        Mesh::RegionallyRefined { .. } => {
            format!("RRM-{metric}_{variable}_CSr{source}-MPASr{target}.png")
        }
    }
}

/// Render a chart as PNG into an existing directory.
///
/// The directory is never created.
pub fn render_png(
    chart: &ComparisonChart,
    style: &ChartStyle,
    output_dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    if !output_dir.is_dir() {
        return Err(RenderError::OutputDirMissing(output_dir.to_path_buf()));
    }
    let path = output_dir.join(file_name);
    {
        let root = BitMapBackend::new(&path, style.size()).into_drawing_area();
        chart.draw(&root, style)?;
    }
    info!(path = %path.display(), metric = %chart.metric(), "Saved chart");
    Ok(path)
}

/// Render a chart as an SVG document in memory.
pub fn render_svg(chart: &ComparisonChart, style: &ChartStyle) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, style.size()).into_drawing_area();
        chart.draw(&root, style)?;
    }
    Ok(svg)
}

/// Write the chart to a kept temporary SVG and open it in the platform viewer.
///
/// Returns the temporary file's path; it outlives the process so the viewer
/// can still read it.
pub fn show_interactive(chart: &ComparisonChart, style: &ChartStyle) -> Result<PathBuf> {
    let svg = render_svg(chart, style)?;

    let mut file = tempfile::Builder::new()
        .prefix(&format!("{}-", chart.metric()))
        .suffix(".svg")
        .tempfile()
        .map_err(|source| RenderError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
    file.write_all(svg.as_bytes())
        .map_err(|source| RenderError::Io {
            path: file.path().to_path_buf(),
            source,
        })?;
    let (_, path) = file.keep().map_err(|err| RenderError::Io {
        path: err.file.path().to_path_buf(),
        source: err.error,
    })?;

    open_in_viewer(&path)?;
    info!(path = %path.display(), metric = %chart.metric(), "Opened chart in viewer");
    Ok(path)
}

/// Launch the platform's default handler for a file without waiting on it.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let (program, args) = platform_viewer();
    debug!(viewer = program, path = %path.display(), "Launching viewer");
    Command::new(program)
        .args(args)
        .arg(path)
        .spawn()
        .map_err(|source| RenderError::Viewer {
            viewer: program.to_string(),
            source,
        })?;
    Ok(())
}

fn platform_viewer() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}
