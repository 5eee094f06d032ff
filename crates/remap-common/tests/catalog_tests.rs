//! Tests for the categorical tables and their serde representation.

use remap_common::{
    GridFamily, GridPairing, Method, Metric, MetricScale, Variable, REMAP_ITERATIONS,
};

// ============================================================================
// Metric bucketing
// ============================================================================

#[test]
fn test_every_metric_has_exactly_one_scale() {
    let log = [
        "GC", "GL1", "GL2", "GLinf", "H12T", "H1T", "H12S", "H1S",
    ];
    let local = ["LMaxL1", "LMaxL2", "LMaxLm", "LMinL1", "LMinL2", "LMinLm"];

    for metric in Metric::ALL {
        let expected = if log.contains(&metric.token()) {
            MetricScale::Log10Abs
        } else if local.contains(&metric.token()) {
            MetricScale::LocalExtremum
        } else {
            MetricScale::Identity
        };
        assert_eq!(metric.scale(), expected, "metric {}", metric);
    }
}

#[test]
fn test_metric_tokens_are_unique() {
    let mut tokens: Vec<_> = Metric::ALL.iter().map(|m| m.token()).collect();
    tokens.sort_unstable();
    tokens.dedup();
    assert_eq!(tokens.len(), 16);
}

#[test]
fn test_iterations_are_evenly_spaced_after_first() {
    for pair in REMAP_ITERATIONS[1..].windows(2) {
        assert_eq!(pair[1] - pair[0], 10);
    }
}

// ============================================================================
// Serde tokens
// ============================================================================

#[test]
fn test_enums_deserialize_from_tokens() {
    let methods: Vec<Method> = serde_yaml::from_str("[TempestRemap, GMLS, WLS-ENOR, ESMF]").unwrap();
    assert_eq!(methods, Method::ALL.to_vec());

    let pairings: Vec<GridPairing> = serde_yaml::from_str("[CS-MPAS, MPAS-RLL, RLL-CS]").unwrap();
    assert_eq!(pairings, GridPairing::ALL.to_vec());

    let metrics: Vec<Metric> = serde_yaml::from_str("[GC, GMaxE, LMinL2]").unwrap();
    assert_eq!(metrics, vec![Metric::Gc, Metric::GMaxE, Metric::LMinL2]);

    let variable: Variable = serde_yaml::from_str("CloudFraction").unwrap();
    assert_eq!(variable, Variable::CloudFraction);
}

#[test]
fn test_unknown_token_is_rejected() {
    let result: Result<Metric, _> = serde_yaml::from_str("GL3");
    assert!(result.is_err());
    let result: Result<GridPairing, _> = serde_yaml::from_str("CS-RLL");
    assert!(result.is_err());
}

#[test]
fn test_serialize_uses_tokens() {
    let yaml = serde_yaml::to_string(&GridPairing::RllCs).unwrap();
    assert_eq!(yaml.trim(), "RLL-CS");
    let yaml = serde_yaml::to_string(&Metric::GlInf).unwrap();
    assert_eq!(yaml.trim(), "GLinf");
}

// ============================================================================
// Resolution tables
// ============================================================================

#[test]
fn test_resolution_tables_are_monotonic() {
    for family in GridFamily::ALL {
        assert!(family.elements().windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_cs_and_icod_share_labels() {
    assert_eq!(GridFamily::Cs.labels(), GridFamily::Icod.labels());
    assert_ne!(GridFamily::Cs.labels(), GridFamily::Rll.labels());
}
