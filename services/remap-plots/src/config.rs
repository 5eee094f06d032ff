//! Plot plan loading and validation.
//!
//! A plan lists chart requests plus run-wide settings. Plans are YAML files
//! with `${VAR}` / `${VAR:-default}` environment substitution; without one,
//! the built-in paper plan is used.

use anyhow::{Context, Result};
use metrics_loader::DEFAULT_METRICS_ROOT;
use remap_common::{GridPairing, Mesh, MeshMode, Method, Metric, RemapResult, Variable, Variant};
use renderer::ChartStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Plan
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotPlan {
    #[serde(default = "default_metrics_root")]
    pub metrics_root: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Open each chart in a viewer instead of writing PNGs.
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub parallel: bool,
    /// Stop scheduling combinations after the first failure.
    #[serde(default)]
    pub fail_fast: bool,
    #[serde(default)]
    pub chart: ChartStyle,
    pub requests: Vec<PlotRequest>,
}

/// One call of the plot routine: a variable, the metrics to chart, and the
/// meshes to compare on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotRequest {
    pub variable: Variable,
    pub metrics: Vec<Metric>,
    #[serde(default = "default_resolutions")]
    pub resolutions: Vec<(u8, u8)>,
    #[serde(default = "default_grid_types")]
    pub grid_types: Vec<GridPairing>,
    #[serde(default)]
    pub orders: MethodOrders,
    #[serde(default)]
    pub mode: MeshMode,
}

/// Requested order per method. GMLS and GMLS-CAAS share one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodOrders {
    pub tempest_remap: u8,
    pub gmls: u8,
    pub wls_enor: u8,
    pub esmf: u8,
}

impl Default for MethodOrders {
    fn default() -> Self {
        Self {
            tempest_remap: 4,
            gmls: 4,
            wls_enor: 4,
            esmf: 2,
        }
    }
}

impl MethodOrders {
    /// The five compared schemes, in legend order.
    pub fn schemes(&self) -> [(Method, Variant, u8); 5] {
        [
            (Method::TempestRemap, Variant::Default, self.tempest_remap),
            (Method::Gmls, Variant::Default, self.gmls),
            (Method::Gmls, Variant::Caas, self.gmls),
            (Method::WlsEnor, Variant::Default, self.wls_enor),
            (Method::Esmf, Variant::Default, self.esmf),
        ]
    }
}

fn default_metrics_root() -> PathBuf {
    PathBuf::from(DEFAULT_METRICS_ROOT)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_resolutions() -> Vec<(u8, u8)> {
    vec![(0, 0), (2, 2), (4, 4), (0, 4), (4, 0)]
}

fn default_grid_types() -> Vec<GridPairing> {
    GridPairing::ALL.to_vec()
}

impl PlotRequest {
    pub fn uniform(variable: Variable, metrics: Vec<Metric>) -> Self {
        Self {
            variable,
            metrics,
            resolutions: default_resolutions(),
            grid_types: default_grid_types(),
            orders: MethodOrders::default(),
            mode: MeshMode::Uniform,
        }
    }

    pub fn regionally_refined(variable: Variable, metrics: Vec<Metric>) -> Self {
        Self {
            mode: MeshMode::RegionallyRefined,
            ..Self::uniform(variable, metrics)
        }
    }

    pub fn with_resolutions(mut self, resolutions: &[(u8, u8)]) -> Self {
        self.resolutions = resolutions.to_vec();
        self
    }

    pub fn with_grid_types(mut self, grid_types: &[GridPairing]) -> Self {
        self.grid_types = grid_types.to_vec();
        self
    }

    /// Meshes to chart, resolution pair outermost. Regionally refined
    /// requests ignore `grid_types` and yield one mesh per pair.
    pub fn meshes(&self) -> RemapResult<Vec<Mesh>> {
        let mut meshes = Vec::new();
        for &(source, target) in &self.resolutions {
            match self.mode {
                MeshMode::Uniform => {
                    for &pairing in &self.grid_types {
                        meshes.push(Mesh::uniform(pairing, source, target)?);
                    }
                }
                MeshMode::RegionallyRefined => {
                    meshes.push(Mesh::regionally_refined(source, target)?);
                }
            }
        }
        Ok(meshes)
    }
}

// ============================================================================
// Loading
// ============================================================================

impl PlotPlan {
    /// Load a plan file with environment variable substitution.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plot plan from {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid plot plan {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let expanded = expand_env_vars(content)?;
        let plan: PlotPlan =
            serde_yaml::from_str(&expanded).with_context(|| "Failed to parse plot plan YAML")?;
        plan.validate()?;
        Ok(plan)
    }

    /// The nine chart requests of the paper's figures.
    pub fn paper() -> Self {
        let uniform_pairs = [(0, 4), (4, 0), (4, 4)];
        let rrm_pairs = [(0, 2), (2, 0), (2, 2)];
        Self {
            metrics_root: default_metrics_root(),
            output_dir: default_output_dir(),
            interactive: false,
            parallel: false,
            fail_fast: false,
            chart: ChartStyle::default(),
            requests: vec![
                PlotRequest::uniform(Variable::TotalPrecipWater, vec![Metric::Gc])
                    .with_resolutions(&uniform_pairs)
                    .with_grid_types(&[GridPairing::CsMpas]),
                PlotRequest::uniform(Variable::CloudFraction, vec![Metric::GMaxE])
                    .with_resolutions(&uniform_pairs)
                    .with_grid_types(&[GridPairing::MpasRll]),
                PlotRequest::uniform(Variable::Topography, vec![Metric::GMinE])
                    .with_resolutions(&uniform_pairs)
                    .with_grid_types(&[GridPairing::CsMpas]),
                PlotRequest::uniform(Variable::TotalPrecipWater, vec![Metric::LMaxL2])
                    .with_resolutions(&uniform_pairs)
                    .with_grid_types(&[GridPairing::CsMpas]),
                PlotRequest::uniform(Variable::Topography, vec![Metric::LMinL2])
                    .with_resolutions(&uniform_pairs)
                    .with_grid_types(&[GridPairing::RllCs]),
                PlotRequest::regionally_refined(Variable::Topography, vec![Metric::Gc])
                    .with_resolutions(&rrm_pairs),
                PlotRequest::regionally_refined(Variable::CloudFraction, vec![Metric::GMaxE])
                    .with_resolutions(&rrm_pairs),
                PlotRequest::regionally_refined(Variable::Topography, vec![Metric::LMaxL2])
                    .with_resolutions(&[(2, 2)]),
                PlotRequest::regionally_refined(Variable::Topography, vec![Metric::LMinL2])
                    .with_resolutions(&[(2, 2)]),
            ],
        }
    }

    /// Apply command-line overrides. Flags can only switch options on.
    pub fn apply_overrides(
        &mut self,
        metrics_root: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        interactive: bool,
        parallel: bool,
        fail_fast: bool,
    ) {
        if let Some(root) = metrics_root {
            self.metrics_root = root;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self.interactive |= interactive;
        self.parallel |= parallel;
        self.fail_fast |= fail_fast;
    }

    /// Total number of (request, mesh) combinations.
    pub fn combination_count(&self) -> usize {
        self.requests
            .iter()
            .map(|r| match r.mode {
                MeshMode::Uniform => r.resolutions.len() * r.grid_types.len(),
                MeshMode::RegionallyRefined => r.resolutions.len(),
            })
            .sum()
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.requests.is_empty(), "Plot plan has no requests");
        anyhow::ensure!(
            !self.output_dir.as_os_str().is_empty(),
            "output_dir cannot be empty"
        );
        self.chart.validate()?;

        for (i, request) in self.requests.iter().enumerate() {
            validate_request(request).with_context(|| format!("Invalid request #{}", i + 1))?;
        }
        Ok(())
    }
}

fn validate_request(request: &PlotRequest) -> Result<()> {
    anyhow::ensure!(!request.metrics.is_empty(), "metrics cannot be empty");
    anyhow::ensure!(!request.resolutions.is_empty(), "resolutions cannot be empty");
    if request.mode == MeshMode::Uniform {
        anyhow::ensure!(!request.grid_types.is_empty(), "grid_types cannot be empty");
    }
    for (method, variant, order) in request.orders.schemes() {
        method.validate_order(order)?;
        method.validate_variant(variant)?;
    }
    request.meshes()?;
    Ok(())
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand environment variables in YAML content
/// Supports ${VAR} and ${VAR:-default} syntax. Comment lines are left as is.
pub fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
        } else {
            result.push_str(&expand_line(line)?);
        }
    }
    Ok(result)
}

fn expand_line(line: &str) -> Result<String> {
    let mut result = String::new();
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            let mut brace_count = 1;

            while brace_count > 0 {
                match chars.next() {
                    Some('{') => {
                        brace_count += 1;
                        var_expr.push('{');
                    }
                    Some('}') => {
                        brace_count -= 1;
                        if brace_count > 0 {
                            var_expr.push('}');
                        }
                    }
                    Some(c) => var_expr.push(c),
                    None => anyhow::bail!("Unclosed variable substitution: ${{{}", var_expr),
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Resolve variable expression (supports VAR and VAR:-default syntax)
fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match std::env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim()).with_context(|| format!("Environment variable {} not set", expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_env_vars_simple() {
        std::env::set_var("REMAP_PLOTS_TEST_VAR", "test_value");
        let result = expand_env_vars("prefix_${REMAP_PLOTS_TEST_VAR}_suffix").unwrap();
        assert_eq!(result, "prefix_test_value_suffix");
    }

    #[test]
    fn test_expand_env_vars_with_default() {
        std::env::remove_var("REMAP_PLOTS_NONEXISTENT");
        let result = expand_env_vars("root: ${REMAP_PLOTS_NONEXISTENT:-../MetricsData}").unwrap();
        assert_eq!(result, "root: ../MetricsData");
    }

    #[test]
    fn test_expand_env_vars_missing_required() {
        std::env::remove_var("REMAP_PLOTS_REQUIRED");
        assert!(expand_env_vars("${REMAP_PLOTS_REQUIRED}").is_err());
    }

    #[test]
    fn test_expand_env_vars_leaves_comments_alone() {
        std::env::remove_var("REMAP_PLOTS_COMMENTED");
        let content = "# uses ${REMAP_PLOTS_COMMENTED}\n  # ${ALSO_UNSET\nroot: ${REMAP_PLOTS_COMMENTED:-x}\n";
        let result = expand_env_vars(content).unwrap();
        assert_eq!(
            result,
            "# uses ${REMAP_PLOTS_COMMENTED}\n  # ${ALSO_UNSET\nroot: x\n"
        );
    }

    #[test]
    fn test_expand_env_vars_unclosed() {
        assert!(expand_env_vars("root: ${UNCLOSED").is_err());
    }

    #[test]
    fn test_resolve_var_expr_override_default() {
        std::env::set_var("REMAP_PLOTS_SET_VAR", "custom");
        assert_eq!(resolve_var_expr("REMAP_PLOTS_SET_VAR:-default").unwrap(), "custom");
    }

    #[test]
    fn test_default_orders() {
        let orders = MethodOrders::default();
        let schemes = orders.schemes();
        assert_eq!(schemes[0], (Method::TempestRemap, Variant::Default, 4));
        assert_eq!(schemes[2], (Method::Gmls, Variant::Caas, 4));
        assert_eq!(schemes[4], (Method::Esmf, Variant::Default, 2));
    }

    #[test]
    fn test_rrm_request_ignores_grid_types() {
        let request = PlotRequest::regionally_refined(Variable::Topography, vec![Metric::Gc])
            .with_resolutions(&[(0, 2), (2, 2)]);
        let meshes = request.meshes().unwrap();
        assert_eq!(meshes.len(), 2);
        assert!(meshes.iter().all(|m| m.mode() == MeshMode::RegionallyRefined));
    }

    #[test]
    fn test_uniform_meshes_are_resolution_major() {
        let request = PlotRequest::uniform(Variable::Topography, vec![Metric::Gc])
            .with_resolutions(&[(0, 4), (4, 0)]);
        let meshes = request.meshes().unwrap();
        assert_eq!(meshes.len(), 6);
        assert_eq!(meshes[0], Mesh::uniform(GridPairing::CsMpas, 0, 4).unwrap());
        assert_eq!(meshes[2], Mesh::uniform(GridPairing::RllCs, 0, 4).unwrap());
        assert_eq!(meshes[3], Mesh::uniform(GridPairing::CsMpas, 4, 0).unwrap());
    }

    #[test]
    fn test_paper_plan_is_valid() {
        let plan = PlotPlan::paper();
        assert_eq!(plan.requests.len(), 9);
        assert!(plan.validate().is_ok());
        assert_eq!(plan.combination_count(), 5 * 3 + 2 * 3 + 2);
    }
}
