//! Axis labels, titles and legend names for comparison charts.

use remap_common::{EsmfScheme, Method, Metric, Variant};

pub const X_AXIS_LABEL: &str = "Remap Iterations";

/// Heading drawn above the series legend.
pub const LEGEND_TITLE: &str = "Remapping Schemes";

/// Y-axis label for a metric.
pub fn y_axis_label(metric: Metric) -> &'static str {
    match metric {
        Metric::Gc => "Global Field Integral",
        Metric::Gl1 => "L₁ Global Error",
        Metric::Gl2 => "L₂ Global Error",
        Metric::GlInf => "L∞ Global Error",
        Metric::GMaxE => "L∞ of Global Field Maxima",
        Metric::GMinE => "L∞ of Global Field Minima",
        Metric::LMaxL1 => "L₁ of Local Field Maxima",
        Metric::LMaxL2 => "L₂ of Local Field Maxima",
        Metric::LMaxLm => "L∞ of Local Field Maxima",
        Metric::LMinL1 => "L₁ of Local Field Minima",
        Metric::LMinL2 => "L₂ of Local Field Minima",
        Metric::LMinLm => "L∞ of Local Field Minima",
        Metric::H12T => "H(0.5,T) Gradient Error on Target",
        Metric::H1T => "H(1,T) Gradient Error on Target",
        Metric::H12S => "H(0.5,S) Gradient Error on Source",
        Metric::H1S => "H(1,S) Gradient Error on Source",
    }
}

/// Leading part of the chart title for a metric.
pub fn title_prefix(metric: Metric) -> &'static str {
    match metric {
        Metric::Gc => "Global conservation",
        Metric::Gl1 => "L₁ Error Metric",
        Metric::Gl2 => "L₂ Error Metric",
        Metric::GlInf => "L∞ Error Metric",
        Metric::GMaxE => "L∞ of Global Maxima",
        Metric::GMinE => "L∞ of Global Minima",
        Metric::LMaxL1 => "L₁ Local Maxima",
        Metric::LMaxL2 => "L₂ Local Maxima",
        Metric::LMaxLm => "L∞ Local Maxima",
        Metric::LMinL1 => "L₁ Local Minima",
        Metric::LMinL2 => "L₂ Local Minima",
        Metric::LMinLm => "L∞ Local Minima",
        Metric::H12T => "H(0.5,T) Gradient Error Metric",
        Metric::H1T => "H(1,T) Gradient Error Metric",
        Metric::H12S => "H(0.5,S) Gradient Error Metric",
        Metric::H1S => "H(1,S) Gradient Error Metric",
    }
}

/// Full chart title, e.g. `Global conservation: Topography - CS-MPAS`.
pub fn chart_title(metric: Metric, context: &str) -> String {
    format!("{}: {}", title_prefix(metric), context)
}

/// Legend entry for one remapping scheme at a given order.
///
/// TempestRemap reports its polynomial degree (order - 1), ESMF its
/// conservative scheme, the rest the order itself.
pub fn series_label(method: Method, variant: Variant, order: u8) -> String {
    match method {
        Method::TempestRemap => format!("{}(p={})", method.token(), order.saturating_sub(1)),
        Method::Esmf => match EsmfScheme::from_order(order) {
            Ok(scheme) => format!("{}({})", method.token(), scheme),
            Err(_) => format!("{}(order {})", method.token(), order),
        },
        Method::Gmls | Method::WlsEnor => match variant.dir_suffix() {
            Some(suffix) => format!("{}-{}(p={})", method.token(), suffix, order),
            None => format!("{}(p={})", method.token(), order),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_labels() {
        assert_eq!(
            series_label(Method::TempestRemap, Variant::Default, 4),
            "TempestRemap(p=3)"
        );
        assert_eq!(series_label(Method::Gmls, Variant::Default, 4), "GMLS(p=4)");
        assert_eq!(series_label(Method::Gmls, Variant::Caas, 4), "GMLS-CAAS(p=4)");
        assert_eq!(series_label(Method::WlsEnor, Variant::Default, 4), "WLS-ENOR(p=4)");
        assert_eq!(series_label(Method::Esmf, Variant::Default, 2), "ESMF(conserve2nd)");
        assert_eq!(series_label(Method::Esmf, Variant::Default, 1), "ESMF(conserve)");
    }

    #[test]
    fn test_every_metric_has_distinct_y_label() {
        let mut labels: Vec<_> = Metric::ALL.iter().map(|m| y_axis_label(*m)).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Metric::ALL.len());
    }

    #[test]
    fn test_chart_title() {
        assert_eq!(
            chart_title(Metric::Gc, "Topography - CS-MPAS"),
            "Global conservation: Topography - CS-MPAS"
        );
    }
}
