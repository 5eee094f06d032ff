//! Grid families, grid pairings and resolution tables.
//!
//! Uniform comparisons remap between two of three grid families (cubed-sphere,
//! icosahedral MPAS, regular lat/lon) at five resolutions each. Regionally
//! refined comparisons use three fixed variable-resolution meshes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RemapError, RemapResult};

/// Number of uniform resolutions per grid family.
pub const UNIFORM_RESOLUTIONS: usize = 5;

/// Number of regionally refined resolutions.
pub const RRM_RESOLUTIONS: usize = 3;

/// A family of uniform meshes with its own resolution labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridFamily {
    /// Cubed-sphere
    Cs,
    /// Icosahedral (MPAS) dual mesh
    Icod,
    /// Regular latitude/longitude
    Rll,
}

impl GridFamily {
    pub const ALL: [GridFamily; 3] = [GridFamily::Cs, GridFamily::Icod, GridFamily::Rll];

    /// Token prefixed to a resolution label in metric file names.
    pub fn prefix(&self) -> &'static str {
        match self {
            GridFamily::Cs => "CS",
            GridFamily::Icod => "ICOD",
            GridFamily::Rll => "RLL",
        }
    }

    pub fn labels(&self) -> &'static [&'static str; UNIFORM_RESOLUTIONS] {
        match self {
            GridFamily::Cs => &["16", "32", "64", "128", "256"],
            GridFamily::Icod => &["16", "32", "64", "128", "256"],
            GridFamily::Rll => &["30-60", "90-180", "180-360", "360-720", "720-1440"],
        }
    }

    pub fn elements(&self) -> &'static [u64; UNIFORM_RESOLUTIONS] {
        match self {
            GridFamily::Cs => &[1536, 6144, 24576, 98304, 393216],
            GridFamily::Icod => &[2562, 10242, 40962, 163842, 655362],
            GridFamily::Rll => &[1800, 16200, 64800, 259200, 1036800],
        }
    }

    pub fn label(&self, res: UniformRes) -> &'static str {
        self.labels()[res.index()]
    }

    pub fn element_count(&self, res: UniformRes) -> u64 {
        self.elements()[res.index()]
    }
}

/// Source and target grid families of a uniform comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GridPairing {
    /// Cubed-sphere to MPAS
    CsMpas,
    /// MPAS to lat/lon
    MpasRll,
    /// Lat/lon to cubed-sphere
    RllCs,
}

impl GridPairing {
    pub const ALL: [GridPairing; 3] = [
        GridPairing::CsMpas,
        GridPairing::MpasRll,
        GridPairing::RllCs,
    ];

    /// Directory name, also used in chart file names.
    pub fn token(&self) -> &'static str {
        match self {
            GridPairing::CsMpas => "CS-MPAS",
            GridPairing::MpasRll => "MPAS-RLL",
            GridPairing::RllCs => "RLL-CS",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            GridPairing::CsMpas => 0,
            GridPairing::MpasRll => 1,
            GridPairing::RllCs => 2,
        }
    }

    pub fn from_index(index: usize) -> RemapResult<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            RemapError::invalid("grid_pairing", format!("index {} out of range [0, 3)", index))
        })
    }

    /// Grid family whose prefix names the source mesh in file names.
    pub fn source(&self) -> GridFamily {
        match self {
            GridPairing::CsMpas => GridFamily::Cs,
            GridPairing::MpasRll => GridFamily::Icod,
            GridPairing::RllCs => GridFamily::Rll,
        }
    }

    /// Grid family whose prefix names the target mesh in file names.
    pub fn target(&self) -> GridFamily {
        match self {
            GridPairing::CsMpas => GridFamily::Icod,
            GridPairing::MpasRll => GridFamily::Rll,
            GridPairing::RllCs => GridFamily::Cs,
        }
    }
}

impl fmt::Display for GridPairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for GridPairing {
    type Err = RemapError;

    /// Accepts the directory token (case-insensitive), the legacy
    /// `CS-ICOD`/`ICOD-RLL` spellings, or the legacy index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.trim().parse::<usize>() {
            return Self::from_index(index);
        }
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "CS-MPAS" | "CS-ICOD" => Ok(GridPairing::CsMpas),
            "MPAS-RLL" | "ICOD-RLL" => Ok(GridPairing::MpasRll),
            "RLL-CS" => Ok(GridPairing::RllCs),
            _ => Err(RemapError::unknown("grid pairing", s)),
        }
    }
}

impl TryFrom<String> for GridPairing {
    type Error = RemapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GridPairing> for String {
    fn from(pairing: GridPairing) -> Self {
        pairing.token().to_string()
    }
}

/// Validated index into the uniform resolution tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniformRes(u8);

impl UniformRes {
    pub fn new(index: u8) -> RemapResult<Self> {
        if (index as usize) < UNIFORM_RESOLUTIONS {
            Ok(Self(index))
        } else {
            Err(RemapError::invalid(
                "resolution",
                format!("uniform index {} out of range [0, {})", index, UNIFORM_RESOLUTIONS),
            ))
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UniformRes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated index into the regionally refined resolution tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RrmRes(u8);

impl RrmRes {
    pub fn new(index: u8) -> RemapResult<Self> {
        if (index as usize) < RRM_RESOLUTIONS {
            Ok(Self(index))
        } else {
            Err(RemapError::invalid(
                "resolution",
                format!("RRM index {} out of range [0, {})", index, RRM_RESOLUTIONS),
            ))
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Element count of the refined cubed-sphere mesh.
    pub fn cs_elements(&self) -> u64 {
        RRM_CS_ELEMENTS[self.index()]
    }

    /// Element count of the refined MPAS mesh.
    pub fn icod_elements(&self) -> u64 {
        RRM_ICOD_ELEMENTS[self.index()]
    }
}

impl fmt::Display for RrmRes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const RRM_CS_ELEMENTS: [u64; RRM_RESOLUTIONS] = [15858, 112606, 247328];
pub const RRM_ICOD_ELEMENTS: [u64; RRM_RESOLUTIONS] = [15970, 28535, 67886];
