//! Console reporting for render runs and the resolution tables.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use metrics_loader::{DatasetPath, Resolved};
use remap_common::grid::{RRM_RESOLUTIONS, UNIFORM_RESOLUTIONS};
use remap_common::{GridFamily, RrmRes, UniformRes};

use crate::driver::RenderSummary;

/// Formats render results for output.
pub struct SummaryReport;

impl SummaryReport {
    /// Format a run summary as a console table.
    pub fn format_table(summary: &RenderSummary) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec!["Render Summary", ""]);

        table.add_row(vec!["Duration:", &format!("{:.1}s", summary.elapsed.as_secs_f64())]);
        table.add_row(vec!["Combinations:", &summary.combinations.to_string()]);
        table.add_row(vec!["Succeeded:", &summary.succeeded().to_string()]);
        table.add_row(vec!["Failed:", &summary.failures.len().to_string()]);
        if summary.skipped > 0 {
            table.add_row(vec!["Skipped:", &summary.skipped.to_string()]);
        }
        table.add_row(vec!["Charts:", &summary.charts.len().to_string()]);

        let mut out = table.to_string();

        if !summary.failures.is_empty() {
            let mut failures = Table::new();
            failures
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec!["Variable", "Mesh", "Error"]);
            for failure in &summary.failures {
                failures.add_row(vec![
                    failure.variable.to_string(),
                    failure.mesh.clone(),
                    failure.error.clone(),
                ]);
            }
            out.push('\n');
            out.push_str(&failures.to_string());
        }
        out
    }

    /// Format a run summary as JSON.
    pub fn format_json(summary: &RenderSummary) -> serde_json::Result<String> {
        serde_json::to_string_pretty(summary)
    }
}

/// Uniform and regionally refined resolution tables with element counts.
pub fn format_grids() -> String {
    let mut uniform = Table::new();
    uniform
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Index", "CS", "ICOD", "RLL"]);
    for index in 0..UNIFORM_RESOLUTIONS {
        let mut row = vec![index.to_string()];
        if let Ok(res) = UniformRes::new(index as u8) {
            for family in GridFamily::ALL {
                row.push(format!("{} ({})", family.label(res), family.element_count(res)));
            }
        }
        uniform.add_row(row);
    }

    let mut rrm = Table::new();
    rrm.load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["RRM Index", "CS elements", "MPAS elements"]);
    for index in 0..RRM_RESOLUTIONS {
        if let Ok(res) = RrmRes::new(index as u8) {
            rrm.add_row(vec![
                index.to_string(),
                res.cs_elements().to_string(),
                res.icod_elements().to_string(),
            ]);
        }
    }

    format!("Uniform meshes\n{}\n\nRegionally refined meshes\n{}", uniform, rrm)
}

/// Resolved dataset location and which file variant exists.
pub fn format_locate(path: &DatasetPath, resolved: &Resolved) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Dataset", ""]);
    table.add_row(vec!["Stem:", &path.stem().display().to_string()]);
    table.add_row(vec!["bzip2:", &path.bz2().display().to_string()]);
    table.add_row(vec!["csv:", &path.csv().display().to_string()]);
    let status = match resolved {
        Resolved::Found { path, compression } => {
            format!("found {} ({:?})", path.display(), compression)
        }
        Resolved::Missing { .. } => "missing".to_string(),
    };
    table.add_row(vec!["Status:", &status]);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::JobFailure;
    use remap_common::Variable;

    #[test]
    fn test_grids_table_lists_all_labels() {
        let out = format_grids();
        assert!(out.contains("720-1440 (1036800)"));
        assert!(out.contains("16 (1536)"));
        assert!(out.contains("247328"));
    }

    #[test]
    fn test_summary_lists_failures() {
        let summary = RenderSummary {
            combinations: 2,
            failures: vec![JobFailure {
                variable: Variable::Topography,
                mesh: "RRM CSr2 -> MPASr2".to_string(),
                missing_dataset: true,
                error: "Dataset not found: x.csv".to_string(),
            }],
            ..Default::default()
        };
        let out = SummaryReport::format_table(&summary);
        assert!(out.contains("Dataset not found: x.csv"));
        assert!(out.contains("Topography"));
    }

    #[test]
    fn test_summary_json() {
        let json = SummaryReport::format_json(&RenderSummary::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["combinations"], 0);
    }
}
