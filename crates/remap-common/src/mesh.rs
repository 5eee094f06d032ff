//! Source/target mesh selection for a single dataset.

use std::fmt;

use crate::error::RemapResult;
use crate::grid::{GridPairing, RrmRes, UniformRes};

/// Comparison mode of a plot request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshMode {
    #[default]
    Uniform,
    RegionallyRefined,
}

/// The meshes a dataset was remapped between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mesh {
    Uniform {
        pairing: GridPairing,
        source: UniformRes,
        target: UniformRes,
    },
    RegionallyRefined {
        source: RrmRes,
        target: RrmRes,
    },
}

impl Mesh {
    pub fn uniform(pairing: GridPairing, source: u8, target: u8) -> RemapResult<Self> {
        Ok(Mesh::Uniform {
            pairing,
            source: UniformRes::new(source)?,
            target: UniformRes::new(target)?,
        })
    }

    pub fn regionally_refined(source: u8, target: u8) -> RemapResult<Self> {
        Ok(Mesh::RegionallyRefined {
            source: RrmRes::new(source)?,
            target: RrmRes::new(target)?,
        })
    }

    pub fn mode(&self) -> MeshMode {
        match self {
            Mesh::Uniform { .. } => MeshMode::Uniform,
            Mesh::RegionallyRefined { .. } => MeshMode::RegionallyRefined,
        }
    }

    /// Raw (source, target) resolution indices.
    pub fn indices(&self) -> (usize, usize) {
        match self {
            Mesh::Uniform { source, target, .. } => (source.index(), target.index()),
            Mesh::RegionallyRefined { source, target } => (source.index(), target.index()),
        }
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mesh::Uniform {
                pairing,
                source,
                target,
            } => write!(
                f,
                "{} {}{} -> {}{}",
                pairing,
                pairing.source().prefix(),
                pairing.source().label(*source),
                pairing.target().prefix(),
                pairing.target().label(*target)
            ),
            Mesh::RegionallyRefined { source, target } => {
                write!(f, "RRM CSr{} -> MPASr{}", source, target)
            }
        }
    }
}
