//! Deterministic mapping from dataset parameters to archive paths.
//!
//! Layout under the metrics root:
//!
//! ```text
//! UniformlyRefined/<method>[-CAAS]/<pairing>/<degree-N|scheme>/metrics_<src>_<tgt>_<order>_<variable>
//! RegionallyRefined/<method>[-CAAS]/<degree-N|scheme>/metrics_<src>_<tgt>_<order>_<variable>
//! ```
//!
//! The token grammar differs per method and must match the existing archives
//! byte for byte, including the label tables each method happened to use.

use std::path::{Path, PathBuf};

use remap_common::{
    EsmfScheme, GridFamily, GridPairing, Mesh, Method, RemapResult, RrmRes, UniformRes, Variable,
    Variant,
};

/// Default location of the metrics archive, relative to the working directory.
pub const DEFAULT_METRICS_ROOT: &str = "../MetricsData";

const UNIFORM_DIR: &str = "UniformlyRefined";
const RRM_DIR: &str = "RegionallyRefined";

/// Fully validated identity of one metrics file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetKey {
    method: Method,
    variant: Variant,
    order: u8,
    variable: Variable,
    mesh: Mesh,
}

impl DatasetKey {
    /// Validate the parameter tuple. Nothing touches the filesystem here.
    pub fn new(
        method: Method,
        mesh: Mesh,
        variable: Variable,
        order: u8,
        variant: Variant,
    ) -> RemapResult<Self> {
        method.validate_order(order)?;
        method.validate_variant(variant)?;
        Ok(Self {
            method,
            variant,
            order,
            variable,
            mesh,
        })
    }

    /// Uniform-mesh dataset from raw resolution indices.
    pub fn uniform(
        method: Method,
        pairing: GridPairing,
        source: u8,
        target: u8,
        variable: Variable,
        order: u8,
        variant: Variant,
    ) -> RemapResult<Self> {
        let mesh = Mesh::uniform(pairing, source, target)?;
        Self::new(method, mesh, variable, order, variant)
    }

    /// Regionally refined dataset from raw resolution indices.
    pub fn regionally_refined(
        method: Method,
        source: u8,
        target: u8,
        variable: Variable,
        order: u8,
        variant: Variant,
    ) -> RemapResult<Self> {
        let mesh = Mesh::regionally_refined(source, target)?;
        Self::new(method, mesh, variable, order, variant)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn order(&self) -> u8 {
        self.order
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn mesh(&self) -> Mesh {
        self.mesh
    }

    /// Path relative to the metrics root, without the `.csv` extension.
    pub fn relative_stem(&self) -> PathBuf {
        let mut path = PathBuf::new();
        match self.mesh {
            Mesh::Uniform {
                pairing,
                source,
                target,
            } => {
                path.push(UNIFORM_DIR);
                path.push(self.method_dir());
                path.push(pairing.token());
                path.push(self.order_dir());
                path.push(self.uniform_file_stem(pairing, source, target));
            }
            Mesh::RegionallyRefined { source, target } => {
                path.push(RRM_DIR);
                path.push(self.method_dir());
                path.push(self.order_dir());
                path.push(self.rrm_file_stem(source, target));
            }
        }
        path
    }

    fn method_dir(&self) -> String {
        match self.variant.dir_suffix() {
            Some(suffix) => format!("{}-{}", self.method.token(), suffix),
            None => self.method.token().to_string(),
        }
    }

    fn esmf_scheme(&self) -> EsmfScheme {
        // order is already validated against {1, 2}
        if self.order == 1 {
            EsmfScheme::Conserve
        } else {
            EsmfScheme::Conserve2nd
        }
    }

    fn order_dir(&self) -> String {
        match self.method {
            Method::Esmf => self.esmf_scheme().token().to_string(),
            method if method.uses_degree_offset() => format!("degree-{}", self.order - 1),
            _ => format!("degree-{}", self.order),
        }
    }

    fn order_token(&self) -> String {
        match self.method {
            Method::TempestRemap | Method::Gmls => format!("O{}", self.order),
            Method::WlsEnor => format!("p={}", self.order),
            Method::Esmf => self.esmf_scheme().token().to_string(),
        }
    }

    fn uniform_file_stem(&self, pairing: GridPairing, source: UniformRes, target: UniformRes) -> String {
        let (source_labels, target_labels) = uniform_label_tables(self.method, pairing);
        format!(
            "metrics_{}{}_{}{}_{}_{}",
            pairing.source().prefix(),
            source_labels.label(source),
            pairing.target().prefix(),
            target_labels.label(target),
            self.order_token(),
            self.variable
        )
    }

    fn rrm_file_stem(&self, source: RrmRes, target: RrmRes) -> String {
        let cs = GridFamily::Cs.labels();
        let icod = GridFamily::Icod.labels();
        let (s, t) = (source.index(), target.index());
        match self.method {
            Method::TempestRemap | Method::Esmf => format!(
                "metrics_cs{}_icodr{}_{}_{}",
                cs[1 + s],
                t + 3,
                self.order_token(),
                self.variable
            ),
            Method::Gmls => format!(
                "metrics_CS{}_ICOD{}_{}_{}",
                cs[1 + s],
                icod[1 + t],
                self.order_token(),
                self.variable
            ),
            Method::WlsEnor => format!(
                "metrics_RRMr{}_MPAS{}_{}_{}",
                cs[s],
                icod[t],
                self.order_token(),
                self.variable
            ),
        }
    }
}

/// Label tables supplying the (source, target) resolution labels.
///
/// Only TempestRemap names lat/lon meshes by their RLL labels; the other
/// methods' archives use the CS/ICOD numeric labels throughout.
fn uniform_label_tables(method: Method, pairing: GridPairing) -> (GridFamily, GridFamily) {
    use GridFamily::{Cs, Icod};
    match (method, pairing) {
        (Method::TempestRemap, _) => (pairing.source(), pairing.target()),
        (Method::Gmls, GridPairing::CsMpas) => (Cs, Icod),
        (Method::Gmls, GridPairing::MpasRll) => (Icod, Icod),
        (Method::Gmls, GridPairing::RllCs) => (Icod, Cs),
        (Method::WlsEnor | Method::Esmf, GridPairing::CsMpas) => (Cs, Icod),
        (Method::WlsEnor | Method::Esmf, GridPairing::MpasRll) => (Icod, Cs),
        (Method::WlsEnor | Method::Esmf, GridPairing::RllCs) => (Cs, Cs),
    }
}

/// Canonical base path of a dataset, from which both file variants derive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetPath {
    stem: PathBuf,
}

impl DatasetPath {
    pub fn stem(&self) -> &Path {
        &self.stem
    }

    /// `<stem>.csv`
    pub fn csv(&self) -> PathBuf {
        append_extension(&self.stem, ".csv")
    }

    /// `<stem>.csv.bz2`
    pub fn bz2(&self) -> PathBuf {
        append_extension(&self.stem, ".csv.bz2")
    }
}

/// Appends `ext` verbatim; the stem is never treated as having an extension.
fn append_extension(stem: &Path, ext: &str) -> PathBuf {
    let mut os = stem.as_os_str().to_os_string();
    os.push(ext);
    PathBuf::from(os)
}

/// Resolves dataset keys against a metrics root directory.
#[derive(Debug, Clone)]
pub struct MetricsLocator {
    root: PathBuf,
}

impl MetricsLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &DatasetKey) -> DatasetPath {
        DatasetPath {
            stem: self.root.join(key.relative_stem()),
        }
    }
}

impl Default for MetricsLocator {
    fn default() -> Self {
        Self::new(DEFAULT_METRICS_ROOT)
    }
}
